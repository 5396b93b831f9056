//! Bindable shapes and arrows as seen by the router

use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

use serde::Deserialize;

use crate::geometry::{Bounds, Point, Rotation};

/// Smallest binding gap around any shape
pub const MIN_BINDING_GAP: f64 = 16.0;
/// Largest binding gap around any shape
pub const MAX_BINDING_GAP: f64 = 32.0;

/// Identifier of a shape in the scene
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(pub String);

impl ShapeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShapeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Outline of a bindable shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Ellipse,
    /// Diamonds are approached from their side points only
    Diamond,
}

/// A shape an arrow endpoint can bind to
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    #[serde(default)]
    pub kind: ShapeKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in radians about the shape center
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub deleted: bool,
}

impl Shape {
    pub fn new(
        id: impl Into<String>,
        kind: ShapeKind,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            id: ShapeId::new(id),
            kind,
            x,
            y,
            width,
            height,
            angle: 0.0,
            deleted: false,
        }
    }

    pub fn rectangle(id: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(id, ShapeKind::Rectangle, x, y, width, height)
    }

    pub fn diamond(id: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(id, ShapeKind::Diamond, x, y, width, height)
    }

    pub fn ellipse(id: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(id, ShapeKind::Ellipse, x, y, width, height)
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_deleted(mut self, deleted: bool) -> Self {
        self.deleted = deleted;
        self
    }

    /// Unrotated axis-aligned box of the shape
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    pub fn rotation(&self) -> Rotation {
        Rotation::new(self.angle, self.center())
    }

    /// Rotated loose bounds of the shape grown by `offset` on every side.
    ///
    /// Heading inference (offset = binding gap) and obstacle construction
    /// (offset = hit-box or dongle padding) both go through here.
    pub fn extended_bounds(&self, offset: f64) -> Bounds {
        self.rotation().transform_bounds(&self.bounds()).inflate(offset)
    }

    /// Default binding gap for a shape of the given size
    pub fn max_binding_gap(&self) -> f64 {
        max_binding_gap(self.kind, self.width, self.height)
    }

    /// Signed distance from `point` to the shape outline, negative inside
    pub fn distance_to_point(&self, point: Point) -> f64 {
        let local = self.rotation().inverse_transform_point(point) - self.center();
        let px = local.x.abs();
        let py = local.y.abs();
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;

        match self.kind {
            ShapeKind::Rectangle => rectangle_distance(px, py, hw, hh),
            ShapeKind::Diamond => {
                let norm = hw.hypot(hh);
                if norm == 0.0 {
                    return px.hypot(py);
                }
                // Side through (hw, 0) and (0, hh), first quadrant
                (hh * px + hw * py - hw * hh) / norm
            }
            ShapeKind::Ellipse => {
                if hw == 0.0 || hh == 0.0 {
                    return rectangle_distance(px, py, hw, hh);
                }
                let closest = closest_point_on_ellipse(px, py, hw, hh);
                let distance = (px - closest.x).hypot(py - closest.y);
                if (px / hw).powi(2) + (py / hh).powi(2) < 1.0 {
                    -distance
                } else {
                    distance
                }
            }
        }
    }
}

/// Gap around a shape within which a nearby point still binds to it
pub fn max_binding_gap(kind: ShapeKind, width: f64, height: f64) -> f64 {
    let ratio = match kind {
        ShapeKind::Diamond => FRAC_1_SQRT_2,
        ShapeKind::Rectangle | ShapeKind::Ellipse => 1.0,
    };
    let smaller_dimension = ratio * width.min(height);
    (0.25 * smaller_dimension).clamp(MIN_BINDING_GAP, MAX_BINDING_GAP)
}

fn rectangle_distance(px: f64, py: f64, hw: f64, hh: f64) -> f64 {
    (px - hw).max(py - hh)
}

/// Closest outline point of an axis-aligned ellipse with semi-axes `a`, `b`
/// to the first-quadrant point `(px, py)`
fn closest_point_on_ellipse(px: f64, py: f64, a: f64, b: f64) -> Point {
    let mut tx = FRAC_1_SQRT_2;
    let mut ty = FRAC_1_SQRT_2;

    for _ in 0..3 {
        let x = a * tx;
        let y = b * ty;
        let ex = (a * a - b * b) * tx.powi(3) / a;
        let ey = (b * b - a * a) * ty.powi(3) / b;
        let rx = x - ex;
        let ry = y - ey;
        let qx = px - ex;
        let qy = py - ey;
        let r = rx.hypot(ry);
        let q = qx.hypot(qy);
        if q == 0.0 {
            break;
        }
        tx = ((qx * r / q + ex) / a).clamp(0.0, 1.0);
        ty = ((qy * r / q + ey) / b).clamp(0.0, 1.0);
        let t = tx.hypot(ty);
        tx /= t;
        ty /= t;
    }

    Point::new(a * tx, b * ty)
}

/// An arrow as stored by the host: a world origin plus local points
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Arrow {
    pub id: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub points: Vec<Point>,
    #[serde(default)]
    pub start_binding: Option<ShapeId>,
    #[serde(default)]
    pub end_binding: Option<ShapeId>,
}

impl Arrow {
    pub fn new(id: impl Into<String>, origin: Point, points: Vec<Point>) -> Self {
        Self {
            id: id.into(),
            x: origin.x,
            y: origin.y,
            points,
            start_binding: None,
            end_binding: None,
        }
    }

    /// Arrow whose origin is its first point, given both ends in world space
    pub fn between(id: impl Into<String>, start: Point, end: Point) -> Self {
        Self::new(
            id,
            start,
            vec![Point::new(0.0, 0.0), Point::new(end.x - start.x, end.y - start.y)],
        )
    }

    pub fn with_start_binding(mut self, shape: impl Into<ShapeId>) -> Self {
        self.start_binding = Some(shape.into());
        self
    }

    pub fn with_end_binding(mut self, shape: impl Into<ShapeId>) -> Self {
        self.end_binding = Some(shape.into());
        self
    }

    pub fn to_world(&self, local: Point) -> Point {
        Point::new(self.x + local.x, self.y + local.y)
    }

    pub fn to_local(&self, world: Point) -> Point {
        Point::new(world.x - self.x, world.y - self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPSILON: f64 = 0.001;

    #[test]
    fn test_binding_gap_is_clamped() {
        assert_eq!(max_binding_gap(ShapeKind::Rectangle, 100.0, 100.0), 25.0);
        assert_eq!(max_binding_gap(ShapeKind::Rectangle, 10.0, 400.0), MIN_BINDING_GAP);
        assert_eq!(max_binding_gap(ShapeKind::Ellipse, 400.0, 400.0), MAX_BINDING_GAP);
        let diamond = max_binding_gap(ShapeKind::Diamond, 100.0, 100.0);
        assert!((diamond - 25.0 * FRAC_1_SQRT_2).abs() < EPSILON);
    }

    #[test]
    fn test_rectangle_distance() {
        let shape = Shape::rectangle("a", 0.0, 0.0, 100.0, 100.0);
        assert_eq!(shape.distance_to_point(Point::new(105.0, 0.0)), 5.0);
        assert_eq!(shape.distance_to_point(Point::new(50.0, -20.0)), 20.0);
        assert_eq!(shape.distance_to_point(Point::new(50.0, 50.0)), -50.0);
    }

    #[test]
    fn test_rotated_rectangle_distance() {
        let shape = Shape::rectangle("a", 0.0, 25.0, 100.0, 50.0).with_angle(FRAC_PI_2);
        // Rotated a quarter turn the shape spans y from 0 to 100
        let d = shape.distance_to_point(Point::new(50.0, -10.0));
        assert!((d - 10.0).abs() < EPSILON, "got {}", d);
    }

    #[test]
    fn test_diamond_distance() {
        let shape = Shape::diamond("d", 0.0, 0.0, 100.0, 100.0);
        // Right vertex at (100, 50)
        let d = shape.distance_to_point(Point::new(100.0, 50.0));
        assert!(d.abs() < EPSILON);
        assert!(shape.distance_to_point(Point::new(50.0, 50.0)) < 0.0);
        // The diamond corner region of the box is outside the outline
        assert!(shape.distance_to_point(Point::new(95.0, 5.0)) > 0.0);
    }

    #[test]
    fn test_ellipse_distance() {
        let shape = Shape::ellipse("e", 0.0, 0.0, 100.0, 100.0);
        let d = shape.distance_to_point(Point::new(110.0, 50.0));
        assert!((d - 10.0).abs() < 0.01, "got {}", d);
        assert!(shape.distance_to_point(Point::new(50.0, 60.0)) < 0.0);
    }

    #[test]
    fn test_extended_bounds_inflates_rotated_box() {
        let shape = Shape::rectangle("a", 0.0, 0.0, 100.0, 50.0).with_angle(FRAC_PI_2);
        let b = shape.extended_bounds(5.0);
        assert!((b.min_x - 20.0).abs() < EPSILON);
        assert!((b.max_x - 80.0).abs() < EPSILON);
        assert!((b.min_y - -30.0).abs() < EPSILON);
        assert!((b.max_y - 80.0).abs() < EPSILON);
    }

    #[test]
    fn test_arrow_space_conversion() {
        let arrow = Arrow::between("x", Point::new(10.0, 20.0), Point::new(40.0, -5.0));
        assert_eq!(arrow.points[1], Point::new(30.0, -25.0));
        assert_eq!(arrow.to_world(arrow.points[1]), Point::new(40.0, -5.0));
        assert_eq!(arrow.to_local(Point::new(10.0, 20.0)), Point::new(0.0, 0.0));
    }
}
