#![forbid(unsafe_code)]

//! Workbench configuration.
//!
//! Plain structs with defaults matching the shipped application and
//! chainable setters. The only environment input is
//! `NAJU_REDUCED_MOTION=1`, which collapses every tween to a single step and
//! turns breathing off.

use std::env;
use std::time::Duration;

use naju_layout::SlideLayout;
use naju_style::Theme;
use naju_widgets::HoverGlowConfig;

/// Environment variable that requests reduced motion.
pub const REDUCED_MOTION_ENV: &str = "NAJU_REDUCED_MOTION";

// ---------------------------------------------------------------------------
// Motion
// ---------------------------------------------------------------------------

/// Animation timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionConfig {
    /// Interval between tween ticks.
    /// Default: 16ms
    pub tick: Duration,
    /// Ticks in the card glow enter/leave tweens.
    /// Default: 12
    pub glow_steps: u32,
    /// Interval between breathing pulses.
    /// Default: 70ms
    pub breathing_interval: Duration,
    /// Whether hovered cards pulse.
    /// Default: true
    pub breathing: bool,
    /// Ticks in a section height tween.
    /// Default: 12
    pub section_steps: u32,
    /// Ticks in the list/profile slide.
    /// Default: 18
    pub view_steps: u32,
    /// Length of the title scramble.
    /// Default: 360ms
    pub scramble_duration: Duration,
    /// Interval between scramble frames.
    /// Default: 35ms
    pub scramble_interval: Duration,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(16),
            glow_steps: 12,
            breathing_interval: Duration::from_millis(70),
            breathing: true,
            section_steps: 12,
            view_steps: 18,
            scramble_duration: Duration::from_millis(360),
            scramble_interval: Duration::from_millis(35),
        }
    }
}

impl MotionConfig {
    /// Defaults, adjusted by `NAJU_REDUCED_MOTION`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_value(env::var(REDUCED_MOTION_ENV).ok().as_deref())
    }

    /// Defaults, adjusted by a raw `NAJU_REDUCED_MOTION` value.
    #[must_use]
    pub fn from_env_value(value: Option<&str>) -> Self {
        let reduced = matches!(value.map(str::trim), Some("1" | "true" | "yes"));
        if reduced {
            Self::default().reduced()
        } else {
            Self::default()
        }
    }

    /// Single-step tweens, no breathing, no scramble.
    #[must_use]
    pub fn reduced(mut self) -> Self {
        self.glow_steps = 1;
        self.section_steps = 1;
        self.view_steps = 1;
        self.breathing = false;
        self.scramble_duration = Duration::ZERO;
        self
    }

    /// Set the tween tick interval.
    #[must_use]
    pub fn tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Set the slide step count.
    #[must_use]
    pub fn view_steps(mut self, steps: u32) -> Self {
        self.view_steps = steps;
        self
    }

    /// Set the section step count.
    #[must_use]
    pub fn section_steps(mut self, steps: u32) -> Self {
        self.section_steps = steps;
        self
    }

    /// Enable or disable breathing.
    #[must_use]
    pub fn breathing(mut self, enabled: bool) -> Self {
        self.breathing = enabled;
        self
    }

    /// Glow timing derived from this configuration.
    #[must_use]
    pub fn glow(&self) -> HoverGlowConfig {
        HoverGlowConfig::default()
            .steps(self.glow_steps)
            .tick(self.tick)
            .breathing_interval(self.breathing_interval)
            .breathing(self.breathing)
    }

    /// Whether titles scramble on hover.
    #[must_use]
    pub fn scramble_enabled(&self) -> bool {
        !self.scramble_duration.is_zero()
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Geometry constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Width of the patient list panel.
    /// Default: 520
    pub panel_width: u32,
    /// Gap between the list and profile panels.
    /// Default: 16
    pub gap: u32,
    /// Profile width above which sections sit side by side.
    /// Default: 980
    pub two_column_threshold: u32,
    /// Card height.
    /// Default: 330
    pub card_height: u32,
    /// Card corner radius.
    /// Default: 26
    pub card_radius: u32,
    /// Card inner padding.
    /// Default: 14
    pub card_padding: u32,
    /// Space around each card in the list.
    /// Default: 10
    pub card_margin: u32,
    /// Card thumbnail width.
    /// Default: 420
    pub thumbnail_width: u32,
    /// Card thumbnail height.
    /// Default: 220
    pub thumbnail_height: u32,
    /// Height of the profile header above the sections.
    /// Default: 240
    pub profile_header_height: u32,
    /// Height of a section header (title and subtitle).
    /// Default: 52
    pub section_header_height: u32,
    /// Gap between sections.
    /// Default: 16
    pub section_gap: u32,
    /// Height of one attachment table row.
    /// Default: 28
    pub table_row_height: u32,
    /// Rows an attachment table shows before scrolling.
    /// Default: 15
    pub table_visible_rows: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            panel_width: 520,
            gap: 16,
            two_column_threshold: 980,
            card_height: 330,
            card_radius: 26,
            card_padding: 14,
            card_margin: 10,
            thumbnail_width: 420,
            thumbnail_height: 220,
            profile_header_height: 240,
            section_header_height: 52,
            section_gap: 16,
            table_row_height: 28,
            table_visible_rows: 15,
        }
    }
}

impl LayoutConfig {
    /// Set the list panel width.
    #[must_use]
    pub fn panel_width(mut self, width: u32) -> Self {
        self.panel_width = width;
        self
    }

    /// Set the panel gap.
    #[must_use]
    pub fn gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    /// Set the card height.
    #[must_use]
    pub fn card_height(mut self, height: u32) -> Self {
        self.card_height = height;
        self
    }

    /// Slide geometry.
    #[must_use]
    pub fn slide(&self) -> SlideLayout {
        SlideLayout::new(self.panel_width, self.gap)
    }

    /// Vertical space one card takes in the list, margins included.
    #[must_use]
    pub fn card_pitch(&self) -> u32 {
        self.card_height.saturating_add(self.card_margin.saturating_mul(2))
    }

    /// Natural height of an attachment table with `rows` rows (plus its
    /// heading row).
    #[must_use]
    pub fn table_height(&self, rows: usize) -> u32 {
        let rows = u32::try_from(rows).unwrap_or(u32::MAX).min(self.table_visible_rows);
        self.table_row_height.saturating_mul(rows + 1)
    }
}

// ---------------------------------------------------------------------------
// Scroll
// ---------------------------------------------------------------------------

/// Wheel scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollConfig {
    /// Pixels per line unit.
    /// Default: 20
    pub line: u32,
    /// Lines per wheel notch.
    /// Default: 3
    pub lines_per_notch: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            line: 20,
            lines_per_notch: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Workbench
// ---------------------------------------------------------------------------

/// Everything the workbench needs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkbenchConfig {
    /// Animation timing.
    pub motion: MotionConfig,
    /// Geometry.
    pub layout: LayoutConfig,
    /// Wheel scaling.
    pub scroll: ScrollConfig,
    /// Palette.
    pub theme: Theme,
}

impl WorkbenchConfig {
    /// Defaults with motion read from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            motion: MotionConfig::from_env(),
            ..Self::default()
        }
    }

    /// Set the motion configuration.
    #[must_use]
    pub fn motion(mut self, motion: MotionConfig) -> Self {
        self.motion = motion;
        self
    }

    /// Set the layout configuration.
    #[must_use]
    pub fn layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Set the scroll configuration.
    #[must_use]
    pub fn scroll(mut self, scroll: ScrollConfig) -> Self {
        self.scroll = scroll;
        self
    }

    /// Set the palette.
    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}
