#![forbid(unsafe_code)]

//! Rounded-rectangle outline geometry.
//!
//! The outline is twelve control points, three per corner, meant to be drawn
//! as a smoothed (spline) polygon. The polygon is inset by one pixel so a
//! width-3 outline stays inside the box.
//!
//! # Invariants
//!
//! 1. Box sides are floored at 2 before anything else.
//! 2. The radius used is `min(radius, max(8, min(w, h) / 6))`.
//! 3. [`RoundedShape`] recomputes only when its box size changes.

use naju_core::geometry::{Point, Rect, Size};

/// Number of control points in an outline.
pub const OUTLINE_POINTS: usize = 12;

/// Effective corner radius for a box of `width × height`.
#[must_use]
pub fn effective_radius(width: u32, height: u32, radius: u32) -> u32 {
    let side = width.max(2).min(height.max(2));
    radius.min((side / 6).max(8))
}

/// Control points of a rounded rectangle for a box of `width × height`.
#[must_use]
pub fn compute_outline(width: u32, height: u32, radius: u32) -> [Point; OUTLINE_POINTS] {
    let (w, h) = (width.max(2), height.max(2));
    let r = to_i32(effective_radius(w, h, radius));
    let (x1, y1) = (1, 1);
    let (x2, y2) = (to_i32(w) - 2, to_i32(h) - 2);
    [
        Point::new(x1 + r, y1),
        Point::new(x2 - r, y1),
        Point::new(x2, y1),
        Point::new(x2, y1 + r),
        Point::new(x2, y2 - r),
        Point::new(x2, y2),
        Point::new(x2 - r, y2),
        Point::new(x1 + r, y2),
        Point::new(x1, y2),
        Point::new(x1, y2 - r),
        Point::new(x1, y1 + r),
        Point::new(x1, y1),
    ]
}

fn to_i32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

/// A rounded box that caches its outline for the last size it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundedShape {
    radius: u32,
    padding: u32,
    size: Size,
    outline: [Point; OUTLINE_POINTS],
}

impl RoundedShape {
    /// Create a shape with a nominal corner radius and inner padding.
    #[must_use]
    pub fn new(radius: u32, padding: u32) -> Self {
        let size = Size::new(2, 2);
        Self {
            radius,
            padding,
            size,
            outline: compute_outline(size.width, size.height, radius),
        }
    }

    /// Apply a new box size. Returns whether the outline changed and the
    /// shape needs a redraw.
    pub fn resize(&mut self, size: Size) -> bool {
        let size = size.at_least(2);
        if size == self.size {
            return false;
        }
        self.size = size;
        self.outline = compute_outline(size.width, size.height, self.radius);
        true
    }

    /// Current outline control points.
    #[must_use]
    pub fn outline(&self) -> &[Point; OUTLINE_POINTS] {
        &self.outline
    }

    /// Current (floored) box size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Nominal corner radius.
    #[must_use]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Radius actually used for the current size.
    #[must_use]
    pub fn effective_radius(&self) -> u32 {
        effective_radius(self.size.width, self.size.height, self.radius)
    }

    /// Content box: `padding` from the top-left, at least 10 wide.
    #[must_use]
    pub fn inner(&self) -> Rect {
        let pad = self.padding.saturating_mul(2);
        Rect::new(
            to_i32(self.padding),
            to_i32(self.padding),
            self.size.width.saturating_sub(pad).max(10),
            self.size.height.saturating_sub(pad),
        )
    }
}
