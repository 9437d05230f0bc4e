#![forbid(unsafe_code)]

//! Timing runtime for the NAJU workbench.
//!
//! The [`Scheduler`] is the only source of future work: controllers register
//! typed messages with a delay and the owner dispatches them when virtual
//! time is advanced. [`Tween`] layers step-based interpolation on top.

pub mod scheduler;
pub mod tween;

pub use scheduler::{Fired, Scheduler, Token};
pub use tween::{AnimationKey, Property, Tween, TweenStep};
