//! Rotation about a center point and the loose rotated bounds of a box.
//!
//! ## Loose Bounds Algorithm
//!
//! Rather than computing tight bounds for a rotated shape, the four corners
//! of its axis-aligned box are rotated about the center and the axis-aligned
//! box of those corners is taken. This over-covers diamonds and ellipses,
//! which is acceptable for obstacle avoidance.
//!
//! ## Rotation Convention
//!
//! Angles are in radians. With y pointing down, positive angles rotate
//! clockwise on screen.

use super::types::{Bounds, Point};

/// A 2D rotation about a center point
#[derive(Debug, Clone, Copy)]
pub struct Rotation {
    /// Rotation angle in radians (clockwise on screen)
    pub angle: f64,
    /// Center point of rotation
    pub center: Point,
}

impl Rotation {
    pub fn new(angle: f64, center: Point) -> Self {
        Self { angle, center }
    }

    /// Check if this is effectively a no-op
    pub fn is_identity(&self) -> bool {
        self.angle.abs() < f64::EPSILON
    }

    /// Rotate a point about the center:
    /// ```text
    /// x' = cx + (x - cx) * cos(θ) - (y - cy) * sin(θ)
    /// y' = cy + (x - cx) * sin(θ) + (y - cy) * cos(θ)
    /// ```
    pub fn transform_point(&self, point: Point) -> Point {
        if self.is_identity() {
            return point;
        }

        let (sin_a, cos_a) = self.angle.sin_cos();
        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;

        Point::new(
            self.center.x + dx * cos_a - dy * sin_a,
            self.center.y + dx * sin_a + dy * cos_a,
        )
    }

    /// Rotate a point the opposite way, mapping world space back into the
    /// unrotated frame
    pub fn inverse_transform_point(&self, point: Point) -> Point {
        Rotation::new(-self.angle, self.center).transform_point(point)
    }

    /// Transform a box using the loose bounds algorithm
    pub fn transform_bounds(&self, bounds: &Bounds) -> Bounds {
        if self.is_identity() {
            return *bounds;
        }

        let rotated = bounds.corners().map(|p| self.transform_point(p));
        // A box always has four corners, so the fold below cannot be empty.
        Bounds::from_points(rotated).unwrap_or(*bounds)
    }
}
