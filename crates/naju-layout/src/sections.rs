#![forbid(unsafe_code)]

//! One- or two-column placement of the profile sections.
//!
//! The mode is a pure function of the available width: strictly wider than
//! the threshold gives two columns. Sections fill columns left to right,
//! row by row, and each row is as tall as its tallest section.

use naju_core::geometry::Rect;

/// Default width above which sections go side by side.
pub const TWO_COLUMN_THRESHOLD: u32 = 980;

/// Column mode of the section area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SectionLayout {
    /// Sections stacked vertically at full width.
    #[default]
    OneColumn,
    /// Sections in two equal columns.
    TwoColumn,
}

impl SectionLayout {
    /// Pick the mode for `width`.
    #[must_use]
    pub const fn for_width(width: u32, threshold: u32) -> Self {
        if width > threshold {
            Self::TwoColumn
        } else {
            Self::OneColumn
        }
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(self) -> u32 {
        match self {
            Self::OneColumn => 1,
            Self::TwoColumn => 2,
        }
    }

    /// Place sections of the given heights inside `area`, separated by `gap`.
    ///
    /// Returns one rectangle per height, in input order.
    #[must_use]
    pub fn place(self, area: Rect, heights: &[u32], gap: u32) -> Vec<Rect> {
        let cols = self.columns();
        let gaps = gap.saturating_mul(cols - 1);
        let col_width = (area.width.saturating_sub(gaps) / cols).max(1);

        let mut rects = Vec::with_capacity(heights.len());
        let mut y = i64::from(area.y);
        for row in heights.chunks(cols as usize) {
            let mut x = i64::from(area.x);
            for &h in row {
                rects.push(Rect::new(to_i32(x), to_i32(y), col_width, h));
                x += i64::from(col_width) + i64::from(gap);
            }
            let row_height = row.iter().copied().max().unwrap_or(0);
            y += i64::from(row_height) + i64::from(gap);
        }
        rects
    }
}

fn to_i32(v: i64) -> i32 {
    i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        assert_eq!(SectionLayout::for_width(980, TWO_COLUMN_THRESHOLD), SectionLayout::OneColumn);
        assert_eq!(SectionLayout::for_width(981, TWO_COLUMN_THRESHOLD), SectionLayout::TwoColumn);
        assert_eq!(SectionLayout::for_width(0, TWO_COLUMN_THRESHOLD), SectionLayout::OneColumn);
    }

    #[test]
    fn one_column_stacks() {
        let rects = SectionLayout::OneColumn.place(Rect::new(10, 20, 600, 900), &[100, 0, 50], 12);
        assert_eq!(rects[0], Rect::new(10, 20, 600, 100));
        assert_eq!(rects[1], Rect::new(10, 132, 600, 0));
        assert_eq!(rects[2], Rect::new(10, 144, 600, 50));
    }

    #[test]
    fn two_columns_side_by_side() {
        let rects = SectionLayout::TwoColumn.place(Rect::new(0, 0, 1012, 900), &[300, 120], 12);
        assert_eq!(rects[0], Rect::new(0, 0, 500, 300));
        assert_eq!(rects[1], Rect::new(512, 0, 500, 120));
    }

    #[test]
    fn two_columns_wrap_rows_by_tallest() {
        let rects = SectionLayout::TwoColumn.place(Rect::new(0, 0, 1000, 900), &[80, 200, 40], 10);
        assert_eq!(rects[2].y, 210);
        assert_eq!(rects[2].x, 0);
    }

    #[test]
    fn narrow_area_keeps_positive_width() {
        let rects = SectionLayout::TwoColumn.place(Rect::new(0, 0, 5, 10), &[1, 1], 16);
        assert!(rects.iter().all(|r| r.width >= 1));
    }
}
