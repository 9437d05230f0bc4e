#![forbid(unsafe_code)]

//! Step tweens driven by the [`Scheduler`].
//!
//! A [`Tween`] is one animation job: it owns the endpoints, the step counter,
//! the tick interval and the token of its single pending tick. Each tick the
//! owner hands the fired token back through [`Tween::tick`], which reports the
//! new value and schedules the following tick with the same message.
//!
//! Tick `i` of `n` reports `lerp(from, to, easing(i / n))`; the default
//! easing is [`ease_out`].
//!
//! # Invariants
//!
//! 1. At most one tick is pending per tween. [`start`](Tween::start) cancels
//!    the previous token before scheduling the first tick of a new run.
//! 2. The final tick reports `to` exactly.
//! 3. A tick whose token is not the tween's current token reports
//!    [`TweenStep::Stale`] and changes nothing.
//!
//! # Failure Modes
//!
//! - `steps == 0`: treated as a single step that lands on `to`.
//! - [`cancel`](Tween::cancel) mid-run: the current value stays where it was.

use std::time::Duration;

use naju_core::animation::{EasingFn, Lerp, ease_out};

use crate::scheduler::{Scheduler, Token};

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Animated property of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// Outline color and width of a card.
    Outline,
    /// Scrambled card title.
    Text,
    /// Visible height of a collapsible body.
    Height,
    /// Slide progress between the list and profile views.
    Progress,
}

/// The `(target, property)` pair an animation job runs on.
///
/// Used as the scheduler message so each tick can be routed back to the
/// controller that owns the job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationKey<T> {
    /// Animated object.
    pub target: T,
    /// Animated property.
    pub property: Property,
}

impl<T> AnimationKey<T> {
    /// Create a key.
    #[must_use]
    pub const fn new(target: T, property: Property) -> Self {
        Self { target, property }
    }
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// Outcome of delivering a tick to a [`Tween`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenStep<V> {
    /// The token does not belong to the current run.
    Stale,
    /// Intermediate value; another tick is pending.
    Running(V),
    /// Final value; the run is over.
    Finished(V),
}

impl<V: Copy> TweenStep<V> {
    /// Value reported by this step, if any.
    #[must_use]
    pub fn value(&self) -> Option<V> {
        match *self {
            Self::Stale => None,
            Self::Running(v) | Self::Finished(v) => Some(v),
        }
    }

    /// Whether this step ended the run.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

/// A cancellable, step-based interpolation between two values.
#[derive(Debug, Clone)]
pub struct Tween<V> {
    from: V,
    to: V,
    value: V,
    steps: u32,
    step: u32,
    interval: Duration,
    easing: EasingFn,
    token: Option<Token>,
}

impl<V: Lerp> Tween<V> {
    /// Create an idle tween resting at `value`.
    #[must_use]
    pub fn new(value: V, interval: Duration) -> Self {
        Self {
            from: value,
            to: value,
            value,
            steps: 0,
            step: 0,
            interval,
            easing: ease_out,
            token: None,
        }
    }

    /// Set the easing curve.
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> V {
        self.value
    }

    /// End value of the current (or last) run.
    #[must_use]
    pub fn target(&self) -> V {
        self.to
    }

    /// Whether a tick is pending.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.token.is_some()
    }

    /// Token of the pending tick.
    #[must_use]
    pub fn token(&self) -> Option<Token> {
        self.token
    }

    /// Ticks delivered in the current run.
    #[must_use]
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Total ticks of the current run.
    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Tick interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start a run from `from` to `to` over `steps` ticks, cancelling any run
    /// in flight. `msg` is scheduled for every tick.
    pub fn start<M>(
        &mut self,
        sched: &mut Scheduler<M>,
        from: V,
        to: V,
        steps: u32,
        msg: M,
    ) -> Token {
        sched.cancel_slot(&mut self.token);
        self.from = from;
        self.to = to;
        self.value = from;
        self.steps = steps;
        self.step = 0;
        let token = sched.schedule(self.interval, msg);
        tracing::trace!(token = token.id(), steps, "tween started");
        self.token = Some(token);
        token
    }

    /// Start a run from the current value.
    pub fn retarget<M>(&mut self, sched: &mut Scheduler<M>, to: V, steps: u32, msg: M) -> Token {
        let from = self.value;
        self.start(sched, from, to, steps, msg)
    }

    /// Deliver a fired tick. Non-final ticks re-schedule `msg`.
    pub fn tick<M>(&mut self, sched: &mut Scheduler<M>, token: Token, msg: M) -> TweenStep<V> {
        if self.token != Some(token) {
            return TweenStep::Stale;
        }
        self.token = None;
        let total = self.steps.max(1);
        self.step = (self.step + 1).min(total);
        let t = self.step as f32 / total as f32;
        self.value = V::lerp(self.from, self.to, (self.easing)(t));
        if self.step >= total {
            tracing::trace!(token = token.id(), steps = self.steps, "tween finished");
            return TweenStep::Finished(self.value);
        }
        self.token = Some(sched.schedule(self.interval, msg));
        TweenStep::Running(self.value)
    }

    /// Stop the run, keeping the current value. Returns whether a tick was
    /// pending.
    pub fn cancel<M>(&mut self, sched: &mut Scheduler<M>) -> bool {
        sched.cancel_slot(&mut self.token)
    }

    /// Stop any run and rest at `value`.
    pub fn snap<M>(&mut self, sched: &mut Scheduler<M>, value: V) {
        self.cancel(sched);
        self.from = value;
        self.to = value;
        self.value = value;
        self.step = self.steps;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Key = AnimationKey<u32>;

    fn key() -> Key {
        AnimationKey::new(7, Property::Height)
    }

    fn run<V: Lerp>(tween: &mut Tween<V>, sched: &mut Scheduler<Key>, dt: Duration) -> Vec<TweenStep<V>> {
        let mut steps = Vec::new();
        sched.advance(dt, |s, fired| steps.push(tween.tick(s, fired.token, fired.msg)));
        steps
    }

    #[test]
    fn reports_ease_out_values_and_lands_on_target() {
        let mut sched = Scheduler::new();
        let mut tween = Tween::new(0.0f32, Duration::from_millis(16));
        tween.start(&mut sched, 0.0, 1.0, 4, key());
        let steps = run(&mut tween, &mut sched, Duration::from_secs(1));
        let values: Vec<f32> = steps.iter().filter_map(TweenStep::value).collect();
        assert_eq!(values, vec![0.4375, 0.75, 0.9375, 1.0]);
        assert!(steps[3].is_finished());
        assert!(!tween.is_running());
        assert!(sched.is_idle());
    }

    #[test]
    fn integer_ticks_truncate() {
        let mut sched = Scheduler::new();
        let mut tween = Tween::new(0u32, Duration::from_millis(16));
        tween.start(&mut sched, 0, 10, 3, key());
        let values: Vec<u32> = run(&mut tween, &mut sched, Duration::from_secs(1))
            .iter()
            .filter_map(TweenStep::value)
            .collect();
        // ease_out(1/3) = 0.555.., ease_out(2/3) = 0.888..
        assert_eq!(values, vec![5, 8, 10]);
    }

    #[test]
    fn restart_cancels_previous_token() {
        let mut sched = Scheduler::new();
        let mut tween = Tween::new(0i32, Duration::from_millis(16));
        let first = tween.start(&mut sched, 0, 100, 12, key());
        let second = tween.retarget(&mut sched, -50, 12, key());
        assert!(!sched.is_pending(first));
        assert!(sched.is_pending(second));
        assert_eq!(sched.pending_where(|k| *k == key()).len(), 1);
    }

    #[test]
    fn stale_tick_is_ignored() {
        let mut sched = Scheduler::new();
        let mut tween = Tween::new(0i32, Duration::from_millis(16));
        let stale = tween.start(&mut sched, 0, 100, 12, key());
        tween.retarget(&mut sched, 10, 12, key());
        assert_eq!(tween.tick(&mut sched, stale, key()), TweenStep::Stale);
        assert_eq!(tween.step(), 0);
    }

    #[test]
    fn zero_steps_finishes_on_first_tick() {
        let mut sched = Scheduler::new();
        let mut tween = Tween::new(3u32, Duration::from_millis(16));
        tween.start(&mut sched, 3, 9, 0, key());
        let steps = run(&mut tween, &mut sched, Duration::from_millis(16));
        assert_eq!(steps, vec![TweenStep::Finished(9)]);
    }

    #[test]
    fn cancel_keeps_current_value() {
        let mut sched = Scheduler::new();
        let mut tween = Tween::new(0u32, Duration::from_millis(16));
        tween.start(&mut sched, 0, 100, 12, key());
        run(&mut tween, &mut sched, Duration::from_millis(32));
        let mid = tween.value();
        assert!(mid > 0 && mid < 100);
        assert!(tween.cancel(&mut sched));
        assert!(!tween.cancel(&mut sched));
        run(&mut tween, &mut sched, Duration::from_secs(1));
        assert_eq!(tween.value(), mid);
    }

    #[test]
    fn snap_rests_at_value() {
        let mut sched = Scheduler::new();
        let mut tween = Tween::new(0u32, Duration::from_millis(16));
        tween.start(&mut sched, 0, 100, 12, key());
        tween.snap(&mut sched, 42);
        assert_eq!(tween.value(), 42);
        assert_eq!(tween.target(), 42);
        assert!(sched.is_idle());
    }
}
