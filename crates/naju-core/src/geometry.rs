#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Pixel coordinates with the origin at the top-left. Positions are signed
//! because sliding panels are routinely placed off-screen to the left;
//! extents are unsigned.

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Horizontal position.
    pub x: i32,
    /// Vertical position.
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The shorter of the two sides.
    #[inline]
    pub const fn min_side(&self) -> u32 {
        if self.width < self.height {
            self.width
        } else {
            self.height
        }
    }

    /// Raise each side to at least `floor`.
    #[inline]
    pub const fn at_least(&self, floor: u32) -> Self {
        Self {
            width: if self.width < floor { floor } else { self.width },
            height: if self.height < floor { floor } else { self.height },
        }
    }
}

/// An axis-aligned rectangle used for panel placement and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Size of the rectangle.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        let (px, py) = (i64::from(p.x), i64::from(p.y));
        px >= i64::from(self.x) && px < self.right() && py >= i64::from(self.y) && py < self.bottom()
    }

    /// Move the rectangle by the given offsets.
    #[inline]
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(10, 20, 5, 5);
        assert!(r.contains(Point::new(10, 20)));
        assert!(r.contains(Point::new(14, 24)));
        assert!(!r.contains(Point::new(15, 20)));
        assert!(!r.contains(Point::new(10, 25)));
        assert!(!r.contains(Point::new(9, 20)));
    }

    #[test]
    fn negative_origin_contains() {
        let r = Rect::new(-536, 0, 520, 100);
        assert!(r.contains(Point::new(-20, 50)));
        assert!(!r.contains(Point::new(-16, 50)));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        let r = Rect::new(0, 0, 0, 10);
        assert!(r.is_empty());
        assert!(!r.contains(Point::new(0, 0)));
    }

    #[test]
    fn edges_do_not_overflow() {
        let r = Rect::new(i32::MAX, i32::MAX, u32::MAX, u32::MAX);
        assert!(r.right() > i64::from(i32::MAX));
        assert!(r.bottom() > i64::from(i32::MAX));
    }

    #[test]
    fn size_helpers() {
        let s = Size::new(300, 120);
        assert_eq!(s.min_side(), 120);
        assert_eq!(Size::new(0, 1).at_least(2), Size::new(2, 2));
        assert_eq!(s.at_least(2), s);
    }

    #[test]
    fn translate_saturates() {
        let r = Rect::new(i32::MAX - 1, 0, 1, 1).translate(10, -3);
        assert_eq!(r.x, i32::MAX);
        assert_eq!(r.y, -3);
    }
}
