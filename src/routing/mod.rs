//! Elbow arrow routing
//!
//! Routing runs in world space:
//! 1. Resolve the shapes both ends are bound to (or hover) and infer the
//!    heading each end leaves its shape with
//! 2. Place a stub at each end that clears its shape's dongle box
//! 3. Grow an orthogonal route between the stubs, steering around the
//!    hit-box obstacles
//! 4. Drop repeated points, optionally simplify, then convert back to the
//!    arrow's local space with the endpoints pinned to the input

mod binding;
mod bounds;
mod config;
mod detour;
mod kernel;
mod simplify;

pub use binding::{endpoint_headings, heading_for_point, resolve_shape, EndpointShapes};
pub use bounds::{dongle_point, obstacles, start_end_bounds, stub_point};
pub use config::{ConfigError, RouterConfig};
pub use detour::{detour_candidate, hit_offset, resolve_intersections, HitOffset};
pub use kernel::{grow_route, next_point};
pub use simplify::simplify;

use tracing::{debug, trace};

use crate::debug::{NoopObserver, RouteObserver};
use crate::geometry::Point;
use crate::scene::{Arrow, EmptyScene, SceneQuery};

/// Route an elbow arrow between its first and last points.
///
/// Returns points in the arrow's local space. Arrows with fewer than two
/// points are returned unchanged. Without a scene both ends route unbound.
pub fn route_elbow_arrow(
    arrow: &Arrow,
    scene: Option<&dyn SceneQuery>,
    config: &RouterConfig,
) -> Vec<Point> {
    route_elbow_arrow_with_observer(arrow, scene, config, &mut NoopObserver)
}

/// Same as [`route_elbow_arrow`], reporting diagnostics to `observer`
pub fn route_elbow_arrow_with_observer(
    arrow: &Arrow,
    scene: Option<&dyn SceneQuery>,
    config: &RouterConfig,
    observer: &mut dyn RouteObserver,
) -> Vec<Point> {
    let (Some(&first), Some(&last)) = (arrow.points.first(), arrow.points.last()) else {
        return arrow.points.clone();
    };
    if arrow.points.len() < 2 {
        return arrow.points.clone();
    }

    observer.clear();

    let scene: &dyn SceneQuery = match scene {
        Some(scene) => scene,
        None => {
            debug!(arrow = %arrow.id, "no scene available, routing unbound");
            &EmptyScene
        }
    };

    let start = arrow.to_world(first);
    let end = arrow.to_world(last);

    let shapes = EndpointShapes::resolve(scene, arrow, start, end);
    let [start_heading, end_heading] =
        endpoint_headings(scene, &shapes, start, end, config.search_cone_multiplier);

    let [start_dongle, end_dongle] = start_end_bounds(
        scene,
        &shapes,
        start,
        end,
        config.dongle_extension,
        config.hitbox_extension,
        observer,
    );
    let start_stub = stub_point(
        start,
        start_heading,
        start_dongle.as_ref(),
        end,
        config.min_dongle_size,
    );
    let end_stub = stub_point(end, end_heading, end_dongle.as_ref(), start, config.min_dongle_size);

    let hitboxes = start_end_bounds(
        scene,
        &shapes,
        start,
        end,
        config.hitbox_extension,
        config.hitbox_extension,
        observer,
    );
    let avoid = obstacles(hitboxes, start_stub, end_stub);

    let mut route = grow_route(&[start, start_stub], &[end_stub, end], &avoid, config, observer);
    route.dedup();
    let route = if config.simplify { simplify(&route) } else { route };

    trace!(
        arrow = %arrow.id,
        ?start_heading,
        ?end_heading,
        obstacles = avoid.len(),
        points = route.len(),
        "routed elbow arrow"
    );

    let local: Vec<Point> = route.into_iter().map(|p| arrow.to_local(p)).collect();
    pin_endpoints(local, first, last)
}

/// Put the input endpoints back after the round trip through world space.
///
/// The local/world translation is not exact in floating point. Every
/// coordinate equal to a drifted endpoint's is moved with it, so segments
/// stay axis aligned. Points the snap makes equal are merged.
fn pin_endpoints(mut route: Vec<Point>, first: Point, last: Point) -> Vec<Point> {
    let (Some(&drift_first), Some(&drift_last)) = (route.first(), route.last()) else {
        return route;
    };

    for (from, to) in [(drift_first, first), (drift_last, last)] {
        for p in route.iter_mut() {
            if p.x == from.x {
                p.x = to.x;
            }
            if p.y == from.y {
                p.y = to.y;
            }
        }
    }

    if let Some(p) = route.first_mut() {
        *p = first;
    }
    if let Some(p) = route.last_mut() {
        *p = last;
    }
    route.dedup();
    route
}
