#![forbid(unsafe_code)]

//! Pointer enter/leave tracking for a single rectangle.
//!
//! A card owns exactly one region covering its whole box, so moving between
//! the card's own parts never produces a leave.

use naju_core::geometry::{Point, Rect};

/// Boundary crossing reported by [`HitRegion::pointer_moved`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hover {
    /// The pointer moved into the region.
    Enter,
    /// The pointer moved out of the region.
    Leave,
}

/// A rectangle with remembered pointer-inside state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitRegion {
    bounds: Rect,
    inside: bool,
}

impl HitRegion {
    /// Create a region with the pointer outside.
    #[must_use]
    pub const fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            inside: false,
        }
    }

    /// Region bounds.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Whether the pointer is currently inside.
    #[must_use]
    pub const fn is_inside(&self) -> bool {
        self.inside
    }

    /// Whether `p` falls inside the bounds, regardless of tracked state.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Move the region. Reports a crossing if the last known pointer
    /// position is no longer consistent with the new bounds.
    pub fn set_bounds(&mut self, bounds: Rect, pointer: Option<Point>) -> Option<Hover> {
        self.bounds = bounds;
        self.pointer_moved(pointer)
    }

    /// Feed a pointer position (`None` when the pointer left the window).
    pub fn pointer_moved(&mut self, pointer: Option<Point>) -> Option<Hover> {
        let now_inside = pointer.is_some_and(|p| self.bounds.contains(p));
        match (self.inside, now_inside) {
            (false, true) => {
                self.inside = true;
                Some(Hover::Enter)
            }
            (true, false) => {
                self.inside = false;
                Some(Hover::Leave)
            }
            _ => None,
        }
    }
}
