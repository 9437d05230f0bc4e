#![forbid(unsafe_code)]

//! Layout for the workbench panels.
//!
//! - [`SlideLayout`] - placement of the list and profile panels at slide
//!   progress `p`
//! - [`SectionLayout`] - one or two columns of collapsible sections, chosen
//!   from the available width
//!
//! Both are pure functions of their inputs, so a resize in the middle of an
//! animation only needs to call them again.

pub mod sections;
pub mod slide;

pub use naju_core::geometry::{Rect, Size};
pub use sections::SectionLayout;
pub use slide::{PanelPlacement, SlideLayout};
