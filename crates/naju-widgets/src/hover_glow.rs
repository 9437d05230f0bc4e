#![forbid(unsafe_code)]

//! Outline glow with a breathing pulse while the pointer is over a card.
//!
//! # State Machine
//!
//! ```text
//!            enter                 tween done
//!   Idle ───────────▶ Entering ───────────────▶ Breathing
//!    ▲                 ▲    │ leave                 │ leave
//!    │ tween done      │    ▼                       ▼
//!    └──────────── Leaving ◀────────────────────────┘
//!                   │ enter (replays Entering from the current glow)
//! ```
//!
//! Entering and Leaving tween the outline color and width from wherever they
//! currently are. Breathing pulses every interval: pulse `k` computes
//! `s = (sin(k / 8) + 1) / 2`, blends the color to `0.55 + 0.45·s` of the
//! way toward the hover color and uses width 3 when `s > 0.55`, else 2.
//!
//! # Invariants
//!
//! 1. The displayed outline width is always 1, 2 or 3.
//! 2. At most one glow tick is pending: the tween tick or the pulse, never
//!    both.
//! 3. A selected card ignores leave and keeps its highlight. Selection is
//!    read at the call site, never stored here.
//!
//! # Failure Modes
//!
//! - Enter while Entering or Breathing, and leave while Idle or Leaving, are
//!   no-ops.
//! - Ticks carrying a stale token are ignored.

use std::time::Duration;

use naju_core::animation::Lerp;
use naju_runtime::{Scheduler, Token, Tween, TweenStep};
use naju_style::Rgb;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Timing of the glow animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverGlowConfig {
    /// Ticks in the enter and leave tweens.
    /// Default: 12
    pub steps: u32,
    /// Interval between tween ticks.
    /// Default: 16ms
    pub tick: Duration,
    /// Interval between breathing pulses.
    /// Default: 70ms
    pub breathing_interval: Duration,
    /// Whether to pulse at all once fully entered.
    /// Default: true
    pub breathing: bool,
}

impl Default for HoverGlowConfig {
    fn default() -> Self {
        Self {
            steps: 12,
            tick: Duration::from_millis(16),
            breathing_interval: Duration::from_millis(70),
            breathing: true,
        }
    }
}

impl HoverGlowConfig {
    /// Set the tween step count.
    #[must_use]
    pub fn steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    /// Set the tween tick interval.
    #[must_use]
    pub fn tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Set the breathing pulse interval.
    #[must_use]
    pub fn breathing_interval(mut self, interval: Duration) -> Self {
        self.breathing_interval = interval;
        self
    }

    /// Enable or disable breathing.
    #[must_use]
    pub fn breathing(mut self, enabled: bool) -> Self {
        self.breathing = enabled;
        self
    }
}

// ---------------------------------------------------------------------------
// Glow value
// ---------------------------------------------------------------------------

/// Outline color and (continuous) width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    /// Outline color.
    pub color: Rgb,
    /// Continuous outline width in `[1, 3]`.
    pub width: f32,
}

impl Glow {
    /// Create a glow value.
    #[must_use]
    pub const fn new(color: Rgb, width: f32) -> Self {
        Self { color, width }
    }

    /// Displayed outline width: truncated and kept within 1..=3.
    #[must_use]
    pub fn outline_width(&self) -> u8 {
        if self.width.is_nan() {
            return 1;
        }
        self.width.trunc().clamp(1.0, 3.0) as u8
    }
}

impl Lerp for Glow {
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        Self {
            color: Rgb::lerp(a.color, b.color, t),
            width: f32::lerp(a.width, b.width, t),
        }
    }
}

/// Breathing strength of pulse `k`, in `[0, 1]`.
#[must_use]
pub fn pulse_strength(k: u32) -> f32 {
    ((k as f32 / 8.0).sin() + 1.0) / 2.0
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Phase of the glow state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlowPhase {
    /// Resting outline, nothing scheduled.
    #[default]
    Idle,
    /// Tweening toward the hover outline.
    Entering,
    /// Pulsing around the hover outline.
    Breathing,
    /// Tweening back to the base outline.
    Leaving,
}

/// Per-card glow controller.
#[derive(Debug, Clone)]
pub struct HoverGlow {
    config: HoverGlowConfig,
    base: Rgb,
    hover: Rgb,
    phase: GlowPhase,
    tween: Tween<Glow>,
    pulse: Option<Token>,
    pulses: u32,
}

impl HoverGlow {
    /// Create an idle glow resting at `base`, width 1.
    #[must_use]
    pub fn new(base: Rgb, hover: Rgb, config: HoverGlowConfig) -> Self {
        Self {
            config,
            base,
            hover,
            phase: GlowPhase::Idle,
            tween: Tween::new(Glow::new(base, 1.0), config.tick),
            pulse: None,
            pulses: 0,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GlowPhase {
        self.phase
    }

    /// Current glow value.
    #[must_use]
    pub fn glow(&self) -> Glow {
        self.tween.value()
    }

    /// Current outline color.
    #[must_use]
    pub fn color(&self) -> Rgb {
        self.tween.value().color
    }

    /// Current displayed outline width.
    #[must_use]
    pub fn outline_width(&self) -> u8 {
        self.tween.value().outline_width()
    }

    /// Pulses delivered since Breathing began.
    #[must_use]
    pub fn pulses(&self) -> u32 {
        self.pulses
    }

    /// Whether a glow tick is pending.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.tween.is_running() || self.pulse.is_some()
    }

    /// Change the resting and hover colors used by later transitions.
    pub fn set_palette(&mut self, base: Rgb, hover: Rgb) {
        self.base = base;
        self.hover = hover;
    }

    /// Pointer entered the card. Returns whether the phase changed.
    pub fn enter<M>(&mut self, sched: &mut Scheduler<M>, msg: M) -> bool {
        match self.phase {
            GlowPhase::Entering | GlowPhase::Breathing => false,
            GlowPhase::Idle | GlowPhase::Leaving => {
                self.stop_pulse(sched);
                let to = Glow::new(self.hover, 3.0);
                self.tween.retarget(sched, to, self.config.steps, msg);
                self.transition(GlowPhase::Entering);
                true
            }
        }
    }

    /// Pointer left the card. `selected` cards keep their highlight.
    /// Returns whether the phase changed.
    pub fn leave<M>(&mut self, sched: &mut Scheduler<M>, selected: bool, msg: M) -> bool {
        if selected {
            return false;
        }
        match self.phase {
            GlowPhase::Idle | GlowPhase::Leaving => false,
            GlowPhase::Entering | GlowPhase::Breathing => {
                self.stop_pulse(sched);
                let to = Glow::new(self.base, 1.0);
                self.tween.retarget(sched, to, self.config.steps, msg);
                self.transition(GlowPhase::Leaving);
                true
            }
        }
    }

    /// Deliver a fired glow tick. Returns whether the glow changed.
    pub fn tick<M: Clone>(&mut self, sched: &mut Scheduler<M>, token: Token, msg: M) -> bool {
        if self.pulse == Some(token) {
            self.pulse = None;
            self.breathe(sched, msg);
            return true;
        }
        match self.tween.tick(sched, token, msg.clone()) {
            TweenStep::Stale => false,
            TweenStep::Running(_) => true,
            TweenStep::Finished(_) => {
                match self.phase {
                    GlowPhase::Entering => {
                        self.transition(GlowPhase::Breathing);
                        self.pulses = 0;
                        if self.config.breathing {
                            self.pulse = Some(sched.schedule(self.config.breathing_interval, msg));
                        }
                    }
                    GlowPhase::Leaving => self.transition(GlowPhase::Idle),
                    GlowPhase::Idle | GlowPhase::Breathing => {}
                }
                true
            }
        }
    }

    /// Cancel all glow work and rest at `glow`.
    pub fn settle<M>(&mut self, sched: &mut Scheduler<M>, glow: Glow) {
        self.stop_pulse(sched);
        self.tween.snap(sched, glow);
        self.transition(GlowPhase::Idle);
    }

    fn breathe<M>(&mut self, sched: &mut Scheduler<M>, msg: M) {
        self.pulses = self.pulses.saturating_add(1);
        let s = pulse_strength(self.pulses);
        let color = self.base.mix(self.hover, 0.55 + 0.45 * s);
        let width = if s > 0.55 { 3.0 } else { 2.0 };
        self.tween.snap(sched, Glow::new(color, width));
        self.pulse = Some(sched.schedule(self.config.breathing_interval, msg));
    }

    fn stop_pulse<M>(&mut self, sched: &mut Scheduler<M>) {
        sched.cancel_slot(&mut self.pulse);
    }

    fn transition(&mut self, next: GlowPhase) {
        if self.phase != next {
            #[cfg(feature = "tracing")]
            tracing::debug!(from = ?self.phase, to = ?next, "glow transition");
            self.phase = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: Rgb = Rgb::new(0xe3, 0xd6, 0xc2);
    const HOVER: Rgb = Rgb::new(0xc7, 0xa6, 0x4b);

    fn glow() -> HoverGlow {
        HoverGlow::new(BASE, HOVER, HoverGlowConfig::default())
    }

    fn run(glow: &mut HoverGlow, sched: &mut Scheduler<()>, dt: Duration) -> Vec<u8> {
        let mut widths = Vec::new();
        sched.advance(dt, |s, fired| {
            glow.tick(s, fired.token, ());
            widths.push(glow.outline_width());
        });
        widths
    }

    #[test]
    fn enter_reaches_hover_then_breathes() {
        let mut sched = Scheduler::new();
        let mut g = glow();
        assert!(g.enter(&mut sched, ()));
        run(&mut g, &mut sched, Duration::from_millis(12 * 16));
        assert_eq!(g.phase(), GlowPhase::Breathing);
        assert_eq!(g.color(), HOVER);
        assert_eq!(g.outline_width(), 3);

        run(&mut g, &mut sched, Duration::from_millis(70));
        assert_eq!(g.pulses(), 1);
        // s(1) = (sin(0.125) + 1) / 2 ≈ 0.562
        assert_eq!(g.outline_width(), 3);
        assert_eq!(sched.pending_count(), 1);
    }

    #[test]
    fn leave_returns_to_idle_base() {
        let mut sched = Scheduler::new();
        let mut g = glow();
        g.enter(&mut sched, ());
        run(&mut g, &mut sched, Duration::from_millis(500));
        assert!(g.leave(&mut sched, false, ()));
        assert_eq!(g.phase(), GlowPhase::Leaving);
        assert_eq!(sched.pending_count(), 1);
        run(&mut g, &mut sched, Duration::from_millis(12 * 16));
        assert_eq!(g.phase(), GlowPhase::Idle);
        assert_eq!(g.glow(), Glow::new(BASE, 1.0));
        assert!(sched.is_idle());
    }

    #[test]
    fn selected_card_ignores_leave() {
        let mut sched = Scheduler::new();
        let mut g = glow();
        g.enter(&mut sched, ());
        assert!(!g.leave(&mut sched, true, ()));
        assert_eq!(g.phase(), GlowPhase::Entering);
    }

    #[test]
    fn redundant_events_are_noops() {
        let mut sched = Scheduler::new();
        let mut g = glow();
        assert!(!g.leave(&mut sched, false, ()));
        g.enter(&mut sched, ());
        let token = g.tween.token();
        assert!(!g.enter(&mut sched, ()));
        assert_eq!(g.tween.token(), token);
    }

    #[test]
    fn reenter_during_leave_resumes_from_current_glow() {
        let mut sched = Scheduler::new();
        let mut g = glow();
        g.enter(&mut sched, ());
        run(&mut g, &mut sched, Duration::from_millis(12 * 16));
        g.leave(&mut sched, false, ());
        run(&mut g, &mut sched, Duration::from_millis(3 * 16));
        let mid = g.glow();
        assert!(mid.width < 3.0 && mid.width > 1.0);

        assert!(g.enter(&mut sched, ()));
        assert_eq!(g.phase(), GlowPhase::Entering);
        assert_eq!(g.glow(), mid);
        assert_eq!(sched.pending_count(), 1);
    }

    #[test]
    fn width_stays_in_range_through_every_tick() {
        let mut sched = Scheduler::new();
        let mut g = glow();
        g.enter(&mut sched, ());
        let mut widths = run(&mut g, &mut sched, Duration::from_millis(400));
        g.leave(&mut sched, false, ());
        widths.extend(run(&mut g, &mut sched, Duration::from_millis(40)));
        g.enter(&mut sched, ());
        widths.extend(run(&mut g, &mut sched, Duration::from_millis(400)));
        assert!(widths.iter().all(|w| (1..=3).contains(w)));
    }

    #[test]
    fn settle_cancels_everything() {
        let mut sched = Scheduler::new();
        let mut g = glow();
        g.enter(&mut sched, ());
        run(&mut g, &mut sched, Duration::from_millis(300));
        g.settle(&mut sched, Glow::new(HOVER, 3.0));
        assert_eq!(g.phase(), GlowPhase::Idle);
        assert!(sched.is_idle());
        assert_eq!(g.outline_width(), 3);
    }

    #[test]
    fn breathing_disabled_holds_hover() {
        let mut sched = Scheduler::new();
        let mut g = HoverGlow::new(BASE, HOVER, HoverGlowConfig::default().breathing(false));
        g.enter(&mut sched, ());
        run(&mut g, &mut sched, Duration::from_secs(1));
        assert_eq!(g.phase(), GlowPhase::Breathing);
        assert!(sched.is_idle());
        assert_eq!(g.glow(), Glow::new(HOVER, 3.0));
    }

    #[test]
    fn pulse_strength_is_bounded() {
        for k in 0..200 {
            let s = pulse_strength(k);
            assert!((0.0..=1.0).contains(&s));
        }
    }
}
