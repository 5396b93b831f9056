//! Binding resolution and approach heading inference

use std::f64::consts::FRAC_PI_4;

use tracing::debug;

use crate::geometry::{point_in_triangle, Heading, Point, Rotation};
use crate::scene::{hovered_shape, Arrow, SceneQuery, Shape, ShapeId, ShapeKind};

/// The shapes resolved for both ends of an arrow
#[derive(Debug, Clone, Copy, Default)]
pub struct EndpointShapes<'s> {
    pub start: Option<&'s Shape>,
    pub end: Option<&'s Shape>,
}

impl<'s> EndpointShapes<'s> {
    /// Resolve both ends of `arrow`, given its endpoints in world space
    pub fn resolve<S>(scene: &'s S, arrow: &Arrow, start: Point, end: Point) -> Self
    where
        S: SceneQuery + ?Sized,
    {
        Self {
            start: resolve_shape(scene, arrow.start_binding.as_ref(), start),
            end: resolve_shape(scene, arrow.end_binding.as_ref(), end),
        }
    }

    pub fn both(&self) -> Option<(&'s Shape, &'s Shape)> {
        self.start.zip(self.end)
    }
}

/// The shape an endpoint is attached to.
///
/// An explicit binding wins, even when it points at a missing shape;
/// otherwise the topmost hovered shape is used.
pub fn resolve_shape<'s, S>(
    scene: &'s S,
    binding: Option<&ShapeId>,
    point: Point,
) -> Option<&'s Shape>
where
    S: SceneQuery + ?Sized,
{
    match binding {
        Some(id) => {
            let shape = scene.shape(id);
            if shape.is_none() {
                debug!(shape = %id, "bound shape not found, routing endpoint unbound");
            }
            shape
        }
        None => hovered_shape(scene, point),
    }
}

/// Heading from which a route should leave (or enter) `shape` at `point`.
///
/// The shape's box is enlarged by `gap` and split into four search cones
/// between its center and its corners, pushed outward by `cone_multiplier`.
/// Diamond cones are turned by 45° and only yield `Left` or `Right`.
/// Returns `None` when the point is outside the enlarged box.
pub fn heading_for_point(
    shape: &Shape,
    point: Point,
    gap: f64,
    cone_multiplier: f64,
) -> Option<Heading> {
    let bounds = shape.extended_bounds(gap);
    if !bounds.contains(point) {
        return None;
    }

    let mid = bounds.center();
    let is_diamond = shape.kind == ShapeKind::Diamond;
    let cone_rotation = Rotation::new(if is_diamond { FRAC_PI_4 } else { 0.0 }, mid);
    let [top_left, top_right, bottom_right, bottom_left] = bounds
        .corners()
        .map(|corner| cone_rotation.transform_point(corner.scale_from(mid, cone_multiplier)));

    let headings = if is_diamond {
        [Heading::Right, Heading::Right, Heading::Left]
    } else {
        [Heading::Up, Heading::Right, Heading::Down]
    };
    let cones = [
        (top_left, top_right),
        (top_right, bottom_right),
        (bottom_right, bottom_left),
    ];

    let heading = cones
        .iter()
        .zip(headings)
        .find(|((a, b), _)| point_in_triangle(point, *a, *b, mid))
        .map(|(_, heading)| heading)
        .unwrap_or(Heading::Left);

    Some(heading)
}

/// Headings for both ends, `None` where an end has no shape or lies outside
/// its binding area
pub fn endpoint_headings<S>(
    scene: &S,
    shapes: &EndpointShapes<'_>,
    start: Point,
    end: Point,
    cone_multiplier: f64,
) -> [Option<Heading>; 2]
where
    S: SceneQuery + ?Sized,
{
    let heading = |shape: Option<&Shape>, point: Point| {
        shape.and_then(|s| heading_for_point(s, point, scene.binding_gap(s), cone_multiplier))
    };
    [heading(shapes.start, start), heading(shapes.end, end)]
}
