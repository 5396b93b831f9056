//! Route simplification

use crate::geometry::Point;

/// Drop repeated points and interior points on a straight run.
///
/// The first and last points are kept. Running it on its own output changes
/// nothing.
pub fn simplify(points: &[Point]) -> Vec<Point> {
    let mut result: Vec<Point> = Vec::with_capacity(points.len());

    for &point in points {
        if result.last() == Some(&point) {
            continue;
        }
        let collinear = match result.as_slice() {
            [.., before, last] => (*last - *before).heading() == (point - *last).heading(),
            _ => false,
        };
        if collinear {
            if let Some(last) = result.last_mut() {
                *last = point;
            }
        } else {
            result.push(point);
        }
    }

    result
}
