//! Elbow Router - orthogonal connector routing for diagram editors
//!
//! This library computes right-angle (elbow) routes for arrows whose ends
//! may be bound to shapes on a canvas. The route leaves each bound shape
//! along an inferred heading, clears the shapes with a short stub and steers
//! around them on the way.
//!
//! # Example
//!
//! ```rust
//! use elbow_router::{route_elbow_arrow, Arrow, Point, RouterConfig};
//!
//! let arrow = Arrow::between("a", Point::new(0.0, 0.0), Point::new(100.0, 0.0));
//! let route = route_elbow_arrow(&arrow, None, &RouterConfig::default());
//! assert_eq!(route, vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
//! ```

pub mod debug;
pub mod error;
pub mod geometry;
pub mod routing;
pub mod scene;

pub use debug::{DebugColor, NoopObserver, RouteObserver, SvgDebugConfig, SvgRecorder};
pub use error::SceneError;
pub use geometry::{Bounds, Heading, Point, Segment, Vector};
pub use routing::{route_elbow_arrow, route_elbow_arrow_with_observer, ConfigError, RouterConfig};
pub use scene::{Arrow, EmptyScene, SceneQuery, SceneSnapshot, Shape, ShapeId, ShapeKind};

/// Route one arrow of a scene snapshot by id
///
/// # Example
///
/// ```rust
/// use elbow_router::{route_arrow, Point, RouterConfig, SceneSnapshot};
///
/// let scene = SceneSnapshot::from_str(r#"
///     [[shapes]]
///     id = "a"
///     x = 0.0
///     y = 0.0
///     width = 100.0
///     height = 100.0
///
///     [[arrows]]
///     id = "out"
///     x = 100.0
///     y = 50.0
///     points = [[0.0, 0.0], [200.0, 0.0]]
///     start_binding = "a"
/// "#).unwrap();
///
/// let route = route_arrow(&scene, "out", &RouterConfig::default()).unwrap();
/// assert_eq!(route.first(), Some(&Point::new(0.0, 0.0)));
/// assert_eq!(route.last(), Some(&Point::new(200.0, 0.0)));
/// ```
pub fn route_arrow(
    scene: &SceneSnapshot,
    id: &str,
    config: &RouterConfig,
) -> Result<Vec<Point>, SceneError> {
    let arrow = scene.arrow(id)?;
    Ok(route_elbow_arrow(arrow, Some(scene), config))
}
