#![forbid(unsafe_code)]

//! NAJU patient workbench public facade crate.
//!
//! Wires the animated widgets to a record store: the [`Workbench`] owns the
//! scheduler, the card list, the profile sections and the list/profile
//! slide, and routes every fired tick back to its controller. Storage stays
//! behind the [`RecordStore`] trait; [`MemoryRecordStore`] is an in-memory
//! implementation for tests and demos.

use std::fmt;

pub mod card_list;
pub mod config;
pub mod records;
pub mod workbench;

// --- Facade re-exports -----------------------------------------------------

pub use card_list::{CardEntry, CardList, CardModel};
pub use config::{LayoutConfig, MotionConfig, REDUCED_MOTION_ENV, ScrollConfig, WorkbenchConfig};
pub use records::{
    Attachment, AttachmentTables, MemoryRecordStore, RecordError, RecordId, RecordStore,
    RecordSummary, StoreResolver, is_evaluation, split_attachments,
};
pub use workbench::{AnimKey, ClickOutcome, ProfileView, SectionId, Target, Workbench};

// --- Core re-exports -------------------------------------------------------

pub use naju_core::geometry::{Point, Rect, Size};

// --- Layout re-exports -----------------------------------------------------

pub use naju_layout::{PanelPlacement, SectionLayout, SlideLayout};

// --- Runtime re-exports ----------------------------------------------------

pub use naju_runtime::{AnimationKey, Fired, Property, Scheduler, Token, Tween, TweenStep};

// --- Style re-exports ------------------------------------------------------

pub use naju_style::{ColorParseError, Rgb, Theme, ThemeId};

// --- Widget re-exports -----------------------------------------------------

pub use naju_widgets::{
    Card, CardVisualState, CollapsibleSection, GlowPhase, Hover, ProfilePhoto, ScrollableContainer,
    SectionPhase, TextScramble, ThumbnailCache, ViewMode, ViewTransition, WheelDelta,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for the workbench.
#[derive(Debug)]
pub enum Error {
    /// I/O failure outside the record store.
    Io(std::io::Error),
    /// The record store failed or the record does not exist.
    Record(RecordError),
    /// A palette color could not be parsed.
    Color(ColorParseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Record(err) => write!(f, "{err}"),
            Self::Color(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Record(err) => Some(err),
            Self::Color(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<RecordError> for Error {
    fn from(err: RecordError) -> Self {
        Self::Record(err)
    }
}

impl From<ColorParseError> for Error {
    fn from(err: ColorParseError) -> Self {
        Self::Color(err)
    }
}

/// Standard result type for naju APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ClickOutcome, Error, MemoryRecordStore, Point, RecordId, RecordStore, RecordSummary,
        Result, SectionId, Size, Theme, ViewMode, WheelDelta, Workbench, WorkbenchConfig,
    };

    pub use crate::{core, layout, runtime, style, widgets};
}

pub use naju_core as core;
pub use naju_layout as layout;
pub use naju_runtime as runtime;
pub use naju_style as style;
pub use naju_widgets as widgets;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn record_error_converts_and_chains() {
        let err: Error = RecordError::Missing(RecordId::new("p9")).into();
        assert!(matches!(err, Error::Record(RecordError::Missing(_))));
        assert!(err.to_string().contains("p9"));
        assert!(err.source().is_some());
    }

    #[test]
    fn color_error_converts() {
        let err: Error = Rgb::from_hex("#zz").map_err(Error::from).unwrap_err();
        assert!(matches!(err, Error::Color(_)));
    }
}
