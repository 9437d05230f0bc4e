#![forbid(unsafe_code)]

//! Core: geometry primitives, easing curves and value interpolation.
//!
//! Everything in this crate is a pure function of its inputs. Timing lives in
//! `naju-runtime`; colors and palettes live in `naju-style`.

pub mod animation;
pub mod geometry;

pub use animation::{EasingFn, Lerp, ease_in, ease_in_out, ease_out, lerp, linear};
pub use geometry::{Point, Rect, Size};
