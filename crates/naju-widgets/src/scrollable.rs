#![forbid(unsafe_code)]

//! Vertical scroll container with a clamped offset.
//!
//! The offset always stays in `[0, max(0, content - viewport)]`. Wheel input
//! only counts while the pointer is over the container: entering subscribes
//! to the wheel, leaving unsubscribes. Drags scroll regardless.

use std::ops::Range;

/// One unit of scroll input. Positive values scroll down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDelta {
    /// Whole wheel notches.
    Notches(i32),
    /// Line units.
    Lines(i32),
    /// Raw pixels (scrollbar drag).
    Pixels(i32),
}

impl WheelDelta {
    /// Convert a platform wheel delta in 1/120 notch units, where positive
    /// means "away from the user" (scroll up).
    #[must_use]
    pub fn from_wheel_units(delta: i32) -> Self {
        Self::Notches(-(delta / 120))
    }

    /// Button-style wheel events: button 4 scrolls up, button 5 down, three
    /// lines at a time.
    #[must_use]
    pub fn from_button(button: u8) -> Option<Self> {
        match button {
            4 => Some(Self::Lines(-3)),
            5 => Some(Self::Lines(3)),
            _ => None,
        }
    }
}

/// Scroll state of a single vertical viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollableContainer {
    offset: u32,
    content: u32,
    viewport: u32,
    line: u32,
    lines_per_notch: u32,
    wheel_subscribed: bool,
}

impl ScrollableContainer {
    /// Create an empty container. `line` is the pixel size of a line unit.
    #[must_use]
    pub fn new(line: u32, lines_per_notch: u32) -> Self {
        Self {
            offset: 0,
            content: 0,
            viewport: 0,
            line,
            lines_per_notch,
            wheel_subscribed: false,
        }
    }

    /// Current offset in pixels.
    #[must_use]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Content extent.
    #[must_use]
    pub fn content_extent(&self) -> u32 {
        self.content
    }

    /// Viewport extent.
    #[must_use]
    pub fn viewport_extent(&self) -> u32 {
        self.viewport
    }

    /// Largest valid offset.
    #[must_use]
    pub fn max_offset(&self) -> u32 {
        self.content.saturating_sub(self.viewport)
    }

    /// Whether wheel input is currently accepted.
    #[must_use]
    pub fn is_wheel_subscribed(&self) -> bool {
        self.wheel_subscribed
    }

    /// Content slice currently in view.
    #[must_use]
    pub fn visible_range(&self) -> Range<u32> {
        let end = self.offset.saturating_add(self.viewport).min(self.content);
        self.offset..end.max(self.offset)
    }

    /// Set the content extent, re-clamping the offset.
    pub fn set_content_extent(&mut self, content: u32) {
        self.content = content;
        self.clamp();
    }

    /// Set the viewport extent, re-clamping the offset.
    pub fn set_viewport_extent(&mut self, viewport: u32) {
        self.viewport = viewport;
        self.clamp();
    }

    /// Pointer entered the container.
    pub fn pointer_entered(&mut self) {
        self.wheel_subscribed = true;
    }

    /// Pointer left the container.
    pub fn pointer_left(&mut self) {
        self.wheel_subscribed = false;
    }

    /// Apply wheel input. Ignored unless subscribed. Returns whether the
    /// offset changed.
    pub fn wheel(&mut self, delta: WheelDelta) -> bool {
        if !self.wheel_subscribed {
            return false;
        }
        self.scroll_by(self.pixels(delta))
    }

    /// Apply a drag of `pixels`. Returns whether the offset changed.
    pub fn drag(&mut self, pixels: i32) -> bool {
        self.scroll_by(i64::from(pixels))
    }

    /// Jump to an absolute offset (clamped). Returns whether it changed.
    pub fn scroll_to(&mut self, offset: u32) -> bool {
        let before = self.offset;
        self.offset = offset;
        self.clamp();
        self.offset != before
    }

    fn pixels(&self, delta: WheelDelta) -> i64 {
        let line = i64::from(self.line);
        match delta {
            WheelDelta::Notches(n) => i64::from(n) * i64::from(self.lines_per_notch) * line,
            WheelDelta::Lines(n) => i64::from(n) * line,
            WheelDelta::Pixels(n) => i64::from(n),
        }
    }

    fn scroll_by(&mut self, pixels: i64) -> bool {
        let before = self.offset;
        let next = (i64::from(self.offset) + pixels).clamp(0, i64::from(self.max_offset()));
        self.offset = u32::try_from(next).unwrap_or(0);
        self.offset != before
    }

    fn clamp(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }
}

impl Default for ScrollableContainer {
    fn default() -> Self {
        Self::new(20, 3)
    }
}
