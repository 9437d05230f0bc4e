#![forbid(unsafe_code)]

//! RGB colors with hex parsing and component-wise interpolation.

use std::fmt;
use std::str::FromStr;

use naju_core::animation::Lerp;

/// RGB color (opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel (0–255).
    pub r: u8,
    /// Green channel (0–255).
    pub g: u8,
    /// Blue channel (0–255).
    pub b: u8,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a new RGB color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColorParseError::Length(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorParseError::Digit(hex.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lower-case `#rrggbb` form.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Blend toward `other` by `t` (0 keeps `self`, 1 yields `other`).
    #[must_use]
    pub fn mix(self, other: Self, t: f32) -> Self {
        <Self as Lerp>::lerp(self, other, t)
    }
}

impl Lerp for Rgb {
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        Self::new(u8::lerp(a.r, b.r, t), u8::lerp(a.g, b.g, t), u8::lerp(a.b, b.b, t))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Errors raised when parsing a hex color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Input is not six hex digits (optionally prefixed by `#`).
    Length(String),
    /// Input contains a non-hex digit.
    Digit(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(input) => write!(f, "expected #rrggbb, got {input:?}"),
            Self::Digit(input) => write!(f, "invalid hex digit in {input:?}"),
        }
    }
}

impl std::error::Error for ColorParseError {}
