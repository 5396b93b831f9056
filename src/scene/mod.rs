//! Read-only view of the host scene
//!
//! The router never owns or mutates shapes. Hosts implement [`SceneQuery`]
//! over their own storage; [`SceneSnapshot`] is a plain-data implementation
//! that can be loaded from TOML.

pub mod shape;
pub mod snapshot;

pub use shape::{max_binding_gap, Arrow, Shape, ShapeId, ShapeKind};
pub use snapshot::SceneSnapshot;

use crate::geometry::Point;

/// Queries the router makes against the host scene.
///
/// Implementations must return a consistent snapshot for the duration of a
/// single routing call.
pub trait SceneQuery {
    /// All shapes that are not deleted, bottom-most first
    fn non_deleted_shapes(&self) -> Box<dyn Iterator<Item = &Shape> + '_>;

    /// Look up a non-deleted shape by id
    fn shape(&self, id: &ShapeId) -> Option<&Shape>;

    /// Binding gap around a shape; hosts may override the default sizing
    fn binding_gap(&self, shape: &Shape) -> f64 {
        shape.max_binding_gap()
    }
}

/// A scene with no shapes; arrows routed against it are always unbound
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyScene;

impl SceneQuery for EmptyScene {
    fn non_deleted_shapes(&self) -> Box<dyn Iterator<Item = &Shape> + '_> {
        Box::new(std::iter::empty())
    }

    fn shape(&self, _id: &ShapeId) -> Option<&Shape> {
        None
    }
}

/// The topmost shape whose binding region contains `point`.
///
/// A point binds when it lies inside the shape or within its binding gap of
/// the outline.
pub fn hovered_shape<'s, S>(scene: &'s S, point: Point) -> Option<&'s Shape>
where
    S: SceneQuery + ?Sized,
{
    scene
        .non_deleted_shapes()
        .filter(|shape| shape.distance_to_point(point) <= scene.binding_gap(shape))
        .last()
}
