//! Geometry primitives: points, vectors, headings, bounds and rotation
//!
//! Everything here is a pure value type or a pure function.

pub mod intersect;
pub mod transform;
pub mod types;

pub use intersect::{point_in_triangle, segments_intersect_at};
pub use transform::Rotation;
pub use types::{Bounds, Heading, Point, Segment, Vector};
