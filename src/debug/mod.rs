//! Diagnostic hooks for watching the router work
//!
//! The router reports what it is considering (obstacle boxes, edges it hit,
//! detour candidates) to a [`RouteObserver`]. Observers only receive copies;
//! nothing they do can change the computed route.

pub mod svg;

pub use svg::{SvgDebugConfig, SvgRecorder};

use crate::geometry::{Bounds, Point, Segment};

/// Color hint for a diagnostic primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugColor {
    /// Rejected or blocking geometry, and left detour candidates
    Red,
    /// Right detour candidates
    Green,
    #[default]
    Gray,
}

impl DebugColor {
    pub fn as_css(&self) -> &'static str {
        match self {
            DebugColor::Red => "#f44336",
            DebugColor::Green => "#4caf50",
            DebugColor::Gray => "#999999",
        }
    }
}

/// Receives diagnostic drawing calls during a routing run.
///
/// All methods default to doing nothing.
pub trait RouteObserver {
    /// A new routing run begins
    fn clear(&mut self) {}

    /// A new kernel step begins
    fn new_frame(&mut self) {}

    fn point(&mut self, _point: Point, _color: DebugColor) {}

    fn segment(&mut self, _segment: Segment, _color: DebugColor) {}

    fn bounds(&mut self, _bounds: Bounds, _color: DebugColor) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RouteObserver for NoopObserver {}
