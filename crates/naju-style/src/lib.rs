#![forbid(unsafe_code)]

//! Style: RGB colors and the injected theme palette.

pub mod color;
pub mod theme;

pub use color::{ColorParseError, Rgb};
pub use theme::{Theme, ThemeId};
