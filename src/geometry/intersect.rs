//! Segment intersection and point-in-triangle tests

use super::types::{Point, Segment};

/// Intersection point of two segments.
///
/// Both segments are treated as open: touching at an endpoint, or running
/// parallel (including collinear overlap), is not an intersection.
pub fn segments_intersect_at(a: &Segment, b: &Segment) -> Option<Point> {
    let r = a.vector();
    let s = b.vector();
    let denominator = r.cross(s);
    if denominator == 0.0 {
        return None;
    }

    let i = b.start - a.start;
    let t = i.cross(s) / denominator;
    let u = i.cross(r) / denominator;

    if !(t > 0.0 && t < 1.0 && u > 0.0 && u < 1.0) {
        return None;
    }

    // Perpendicular axis-aligned segments meet exactly at shared coordinates
    let a_horizontal = r.y == 0.0;
    let a_vertical = r.x == 0.0;
    if a_horizontal && s.x == 0.0 {
        Some(Point::new(b.start.x, a.start.y))
    } else if a_vertical && s.y == 0.0 {
        Some(Point::new(a.start.x, b.start.y))
    } else {
        Some(a.start + r * t)
    }
}

/// Check whether `p` lies inside (or on the border of) the triangle `a b c`
pub fn point_in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    fn sign(p1: Point, p2: Point, p3: Point) -> f64 {
        (p1.x - p3.x) * (p2.y - p3.y) - (p2.x - p3.x) * (p1.y - p3.y)
    }

    let d1 = sign(p, a, b);
    let d2 = sign(p, b, c);
    let d3 = sign(p, c, a);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;

    !(has_neg && has_pos)
}
