#![forbid(unsafe_code)]

//! Animated widgets for the NAJU patient workbench.
//!
//! Every widget here is headless: it owns its state machine and the values
//! a renderer reads (outline points, colors, widths, heights, rectangles,
//! pixel buffers). Timed work goes through a caller-owned
//! [`Scheduler`](naju_runtime::Scheduler); each widget takes the message to
//! schedule and is handed the fired token back on `tick`.
//!
//! - [`shape`] - rounded outline geometry
//! - [`hit`] - pointer enter/leave tracking
//! - [`card`] - card visual state with its glow and hit region
//! - [`hover_glow`] - outline glow state machine
//! - [`collapsible`] - animated accordion section
//! - [`view_transition`] - list/profile slide
//! - [`scrollable`] - clamped scroll offset
//! - [`thumbnail`] - derived preview image cache
//! - [`scramble`] - hover text scramble

pub mod card;
pub mod collapsible;
pub mod hit;
pub mod hover_glow;
pub mod scramble;
pub mod scrollable;
pub mod shape;
pub mod thumbnail;
pub mod view_transition;

pub use card::{Card, CardVisualState};
pub use collapsible::{CollapsibleSection, SectionPhase};
pub use hit::{HitRegion, Hover};
pub use hover_glow::{Glow, GlowPhase, HoverGlow, HoverGlowConfig};
pub use scramble::TextScramble;
pub use scrollable::{ScrollableContainer, WheelDelta};
pub use shape::{RoundedShape, compute_outline};
pub use thumbnail::{
    CacheKey, CacheStats, PhotoResolver, ProfilePhoto, ThumbnailCache, ThumbnailError, profile_photo,
};
pub use view_transition::{ViewMode, ViewTransition};
