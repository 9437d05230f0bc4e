#![forbid(unsafe_code)]

//! Horizontal slide between the patient list and the profile panel.
//!
//! At `p = 0` the list sits at the left edge and the profile panel starts one
//! `panel_width + gap` to its right; at `p = 1` the list has slid fully off
//! to the left and the profile panel fills the container.
//!
//! ```text
//! list.x    = trunc(lerp(0, -(panel_width + gap), p))
//! profile.x = trunc(lerp(panel_width + gap, 0, p))
//! profile.w = container.w - profile.x
//! ```
//!
//! Every dimension is floored at 1 and `p` is clamped to `[0, 1]`.

use naju_core::geometry::{Rect, Size};

/// Geometry of the two sliding panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideLayout {
    /// Width of the list panel.
    pub panel_width: u32,
    /// Gap between the list panel and the profile panel.
    pub gap: u32,
}

/// Rectangles of both panels for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelPlacement {
    /// Patient list panel.
    pub list: Rect,
    /// Patient profile panel.
    pub profile: Rect,
}

impl Default for SlideLayout {
    fn default() -> Self {
        Self {
            panel_width: 520,
            gap: 16,
        }
    }
}

impl SlideLayout {
    /// Create a layout with the given panel width and gap.
    #[must_use]
    pub const fn new(panel_width: u32, gap: u32) -> Self {
        Self { panel_width, gap }
    }

    /// Horizontal travel of both panels between `p = 0` and `p = 1`.
    #[must_use]
    pub fn travel(&self) -> i64 {
        i64::from(self.panel_width) + i64::from(self.gap)
    }

    /// Place both panels inside `container` at progress `p`.
    #[must_use]
    pub fn place(&self, container: Size, p: f32) -> PanelPlacement {
        let container = container.at_least(1);
        let p = if p.is_nan() { 0.0 } else { f64::from(p.clamp(0.0, 1.0)) };
        let travel = self.travel() as f64;

        let list_x = clamp_i32((-travel * p).trunc());
        let profile_x = clamp_i32((travel - travel * p).trunc());
        let profile_width = (i64::from(container.width) - i64::from(profile_x)).max(1);

        PanelPlacement {
            list: Rect::new(list_x, 0, self.panel_width.max(1), container.height),
            profile: Rect::new(
                profile_x,
                0,
                u32::try_from(profile_width).unwrap_or(u32::MAX),
                container.height,
            ),
        }
    }
}

fn clamp_i32(v: f64) -> i32 {
    v.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_view_placement() {
        let placed = SlideLayout::new(520, 16).place(Size::new(1200, 800), 0.0);
        assert_eq!(placed.list, Rect::new(0, 0, 520, 800));
        assert_eq!(placed.profile, Rect::new(536, 0, 664, 800));
    }

    #[test]
    fn profile_view_placement() {
        let placed = SlideLayout::new(520, 16).place(Size::new(1200, 800), 1.0);
        assert_eq!(placed.list.x, -536);
        assert_eq!(placed.profile, Rect::new(0, 0, 1200, 800));
    }

    #[test]
    fn midway_truncates_toward_zero() {
        // 536 * 0.3 = 160.8
        let placed = SlideLayout::default().place(Size::new(1200, 800), 0.3);
        assert_eq!(placed.list.x, -160);
        // 536 - 160.8 = 375.2
        assert_eq!(placed.profile.x, 375);
        assert_eq!(placed.profile.width, 825);
    }

    #[test]
    fn degenerate_container_floors_dimensions() {
        let placed = SlideLayout::default().place(Size::new(0, 0), 0.0);
        assert_eq!(placed.list.height, 1);
        assert_eq!(placed.profile.width, 1);
        assert_eq!(placed.profile.height, 1);
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        let layout = SlideLayout::default();
        let size = Size::new(900, 600);
        assert_eq!(layout.place(size, -0.5), layout.place(size, 0.0));
        assert_eq!(layout.place(size, 3.0), layout.place(size, 1.0));
        assert_eq!(layout.place(size, f32::NAN), layout.place(size, 0.0));
    }
}
