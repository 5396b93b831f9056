//! Obstacle and dongle box preparation

use crate::debug::{DebugColor, RouteObserver};
use crate::geometry::{Bounds, Heading, Point};
use crate::scene::{SceneQuery, Shape};

use super::binding::EndpointShapes;

/// Padded boxes around the start and end shapes.
///
/// `offset` is the regime padding (dongle or hit-box). When both ends are
/// bound, the padding follows the gap between the two shapes instead, so
/// shapes that sit close together still leave room for a stub. A box is
/// `None` when its end has no shape or the endpoint has been dragged out of
/// the shape's binding area.
pub fn start_end_bounds<S>(
    scene: &S,
    shapes: &EndpointShapes<'_>,
    start: Point,
    end: Point,
    offset: f64,
    hitbox_extension: f64,
    observer: &mut dyn RouteObserver,
) -> [Option<Bounds>; 2]
where
    S: SceneQuery + ?Sized,
{
    let padding = match shapes.both() {
        Some((start_shape, end_shape)) => end_shape
            .bounds()
            .corners()
            .into_iter()
            .map(|corner| start_shape.distance_to_point(corner))
            .fold(f64::INFINITY, f64::min),
        None => offset,
    };
    let inflation = hitbox_extension.max(padding / 2.0 - hitbox_extension);

    let mut bounded = |shape: Option<&Shape>, point: Point| {
        let shape = shape?;
        if !shape.extended_bounds(scene.binding_gap(shape)).contains(point) {
            return None;
        }
        let bounds = shape.extended_bounds(inflation);
        observer.bounds(bounds, DebugColor::Gray);
        Some(bounds)
    };

    [bounded(shapes.start, start), bounded(shapes.end, end)]
}

/// Where a bound endpoint's stub ends: one unit past the far edge of the
/// dongle box in the direction of `heading`.
///
/// `None` when the endpoint is not strictly inside the box.
pub fn dongle_point(point: Point, heading: Heading, dongle: &Bounds) -> Option<Point> {
    if !dongle.contains(point) {
        return None;
    }
    let stub = match heading {
        Heading::Up => Point::new(point.x, dongle.min_y - 1.0),
        Heading::Right => Point::new(dongle.max_x + 1.0, point.y),
        Heading::Down => Point::new(point.x, dongle.max_y + 1.0),
        Heading::Left => Point::new(dongle.min_x - 1.0, point.y),
    };
    Some(stub)
}

/// The stub point for one end of the route.
///
/// With a heading the stub clears the dongle box; otherwise, or when no box
/// is available, it is `min_dongle_size` along the heading (or toward
/// `other` for an unbound end).
pub fn stub_point(
    point: Point,
    heading: Option<Heading>,
    dongle: Option<&Bounds>,
    other: Point,
    min_dongle_size: f64,
) -> Point {
    match heading {
        Some(heading) => dongle
            .and_then(|bounds| dongle_point(point, heading, bounds))
            .unwrap_or_else(|| point + heading.to_vector() * min_dongle_size),
        None => {
            let toward = (other - point).heading().unwrap_or(Heading::Left);
            point + toward.to_vector() * min_dongle_size
        }
    }
}

/// Obstacle boxes the path must route around: those containing neither
/// stub
pub fn obstacles(boxes: [Option<Bounds>; 2], start_stub: Point, end_stub: Point) -> Vec<Bounds> {
    boxes
        .into_iter()
        .flatten()
        .filter(|bounds| !(bounds.contains(start_stub) || bounds.contains(end_stub)))
        .collect()
}
