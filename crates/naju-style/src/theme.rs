#![forbid(unsafe_code)]

//! Theme palette with semantic color slots.
//!
//! A [`Theme`] is an injected configuration value: widgets read their colors
//! from it and the thumbnail cache keys derived images by its [`ThemeId`].
//! Only the `earth` palette ships; switching palettes at runtime is not
//! wired into the widgets.

use crate::color::Rgb;

/// Identifier of a palette, part of every thumbnail cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeId {
    /// Warm paper background with gold and earth-green accents.
    #[default]
    Earth,
}

impl ThemeId {
    /// Stable lower-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Earth => "earth",
        }
    }
}

/// Semantic color slots used by the workbench.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Palette identifier.
    pub id: ThemeId,
    /// Window background.
    pub bg: Rgb,
    /// Side panel fill.
    pub panel: Rgb,
    /// Card fill.
    pub card: Rgb,
    /// Secondary card fill (photo frames).
    pub card2: Rgb,
    /// Resting outline color.
    pub border: Rgb,
    /// Primary text.
    pub fg: Rgb,
    /// Secondary text.
    pub muted: Rgb,
    /// Highlight outline (hover glow target, selected card).
    pub accent: Rgb,
    /// Secondary accent.
    pub accent2: Rgb,
    /// Soft accent for header hover fills.
    pub accent_soft: Rgb,
    /// Button background.
    pub btn_bg: Rgb,
    /// Destructive actions.
    pub danger: Rgb,
}

impl Theme {
    /// The `earth` palette.
    #[must_use]
    pub const fn earth() -> Self {
        Self {
            id: ThemeId::Earth,
            bg: Rgb::new(0xf7, 0xf2, 0xe8),
            panel: Rgb::new(0xfb, 0xf6, 0xee),
            card: Rgb::new(0xff, 0xff, 0xff),
            card2: Rgb::new(0xf2, 0xea, 0xdc),
            border: Rgb::new(0xe3, 0xd6, 0xc2),
            fg: Rgb::new(0x1d, 0x1b, 0x17),
            muted: Rgb::new(0x6e, 0x66, 0x5c),
            accent: Rgb::new(0xc7, 0xa6, 0x4b),
            accent2: Rgb::new(0x3f, 0x6b, 0x4c),
            accent_soft: Rgb::new(0xef, 0xe2, 0xc4),
            btn_bg: Rgb::new(0xf3, 0xea, 0xdb),
            danger: Rgb::new(0xb2, 0x4a, 0x3a),
        }
    }

    /// Look up a built-in palette.
    #[must_use]
    pub const fn builtin(id: ThemeId) -> Self {
        match id {
            ThemeId::Earth => Self::earth(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::earth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_earth() {
        let theme = Theme::default();
        assert_eq!(theme.id, ThemeId::Earth);
        assert_eq!(theme.accent.to_hex(), "#c7a64b");
        assert_eq!(theme.border.to_hex(), "#e3d6c2");
    }

    #[test]
    fn builtin_lookup_matches_constructor() {
        assert_eq!(Theme::builtin(ThemeId::Earth), Theme::earth());
        assert_eq!(ThemeId::Earth.name(), "earth");
    }
}
