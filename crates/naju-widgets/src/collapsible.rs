#![forbid(unsafe_code)]

//! Accordion section with an animated body height.
//!
//! `toggle` flips the target immediately (the chevron follows at once),
//! measures the natural content height at that moment and tweens the
//! visible height toward it, or toward 0 when collapsing. Toggling again
//! mid-flight restarts from the current height.
//!
//! # Invariants
//!
//! 1. Heights are never negative; a missing or negative measurement is 0.
//! 2. The visible height moves monotonically toward the target, without
//!    overshoot, and equals it once settled.
//! 3. At most one height tick is pending.

use std::time::Duration;

use naju_runtime::{Scheduler, Token, Tween, TweenStep};
use naju_style::{Rgb, Theme};

/// Chevron shown while the section is (or is becoming) expanded.
pub const CHEVRON_EXPANDED: char = '▾';
/// Chevron shown while the section is (or is becoming) collapsed.
pub const CHEVRON_COLLAPSED: char = '▸';

/// Observable phase of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionPhase {
    /// Settled open.
    Expanded,
    /// Settled closed.
    Collapsed,
    /// Height tween in flight.
    Animating {
        /// Direction of the tween.
        to_expanded: bool,
    },
}

/// A titled section whose body can be collapsed.
#[derive(Debug, Clone)]
pub struct CollapsibleSection {
    title: String,
    expanded: bool,
    steps: u32,
    height: Tween<u32>,
    header_hovered: bool,
}

impl CollapsibleSection {
    /// Create an expanded section with an empty body.
    #[must_use]
    pub fn new(title: impl Into<String>, steps: u32, tick: Duration) -> Self {
        Self {
            title: title.into(),
            expanded: true,
            steps,
            height: Tween::new(0, tick),
            header_hovered: false,
        }
    }

    /// Section title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether the target state is expanded.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SectionPhase {
        match (self.height.is_running(), self.expanded) {
            (true, to_expanded) => SectionPhase::Animating { to_expanded },
            (false, true) => SectionPhase::Expanded,
            (false, false) => SectionPhase::Collapsed,
        }
    }

    /// Chevron for the target state.
    #[must_use]
    pub fn chevron(&self) -> char {
        if self.expanded {
            CHEVRON_EXPANDED
        } else {
            CHEVRON_COLLAPSED
        }
    }

    /// Visible body height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height.value()
    }

    /// Height the body is heading to.
    #[must_use]
    pub fn target_height(&self) -> u32 {
        self.height.target()
    }

    /// Whether a height tick is pending.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.height.is_running()
    }

    /// Flip the section. `measure` is asked for the natural body height only
    /// when expanding.
    pub fn toggle<M, F>(&mut self, sched: &mut Scheduler<M>, measure: F, msg: M) -> Token
    where
        F: FnOnce() -> Option<i32>,
    {
        self.expanded = !self.expanded;
        let target = if self.expanded {
            sanitize(measure())
        } else {
            0
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(
            title = %self.title,
            expanded = self.expanded,
            from = self.height.value(),
            to = target,
            "section toggled"
        );
        self.height.retarget(sched, target, self.steps, msg)
    }

    /// Deliver a fired height tick. Returns whether the height changed.
    pub fn tick<M>(&mut self, sched: &mut Scheduler<M>, token: Token, msg: M) -> bool {
        !matches!(self.height.tick(sched, token, msg), TweenStep::Stale)
    }

    /// The body's natural height changed. A settled, expanded section snaps
    /// to it and an expanding one is retargeted from its current height with
    /// `msg`; a collapsed or collapsing section ignores it. Returns whether
    /// the height or its target changed.
    pub fn content_resized<M>(
        &mut self,
        sched: &mut Scheduler<M>,
        natural: Option<i32>,
        msg: M,
    ) -> bool {
        if !self.expanded {
            return false;
        }
        let natural = sanitize(natural);
        if self.height.is_running() {
            if natural == self.height.target() {
                return false;
            }
            self.height.retarget(sched, natural, self.steps, msg);
            return true;
        }
        if natural == self.height.value() {
            return false;
        }
        self.height.snap(sched, natural);
        true
    }

    /// Track pointer hover over the header.
    pub fn set_header_hovered(&mut self, hovered: bool) {
        self.header_hovered = hovered;
    }

    /// Header background: soft accent while hovered, card fill otherwise.
    #[must_use]
    pub fn header_fill(&self, theme: &Theme) -> Rgb {
        if self.header_hovered {
            theme.accent_soft
        } else {
            theme.card
        }
    }
}

fn sanitize(measured: Option<i32>) -> u32 {
    measured.and_then(|h| u32::try_from(h).ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(16);

    fn settle(section: &mut CollapsibleSection, sched: &mut Scheduler<()>) -> Vec<u32> {
        let mut heights = Vec::new();
        sched.advance(Duration::from_secs(1), |s, fired| {
            section.tick(s, fired.token, ());
            heights.push(section.height());
        });
        heights
    }

    fn open(natural: i32) -> (CollapsibleSection, Scheduler<()>) {
        let mut sched = Scheduler::new();
        let mut section = CollapsibleSection::new("Documentos", 12, TICK);
        section.content_resized(&mut sched, Some(natural), ());
        (section, sched)
    }

    #[test]
    fn starts_expanded() {
        let (section, _) = open(240);
        assert_eq!(section.phase(), SectionPhase::Expanded);
        assert_eq!(section.height(), 240);
        assert_eq!(section.chevron(), '▾');
    }

    #[test]
    fn collapse_converges_monotonically() {
        let (mut section, mut sched) = open(240);
        section.toggle(&mut sched, || Some(240), ());
        assert_eq!(section.chevron(), '▸');
        assert_eq!(section.phase(), SectionPhase::Animating { to_expanded: false });
        let heights = settle(&mut section, &mut sched);
        assert_eq!(heights.len(), 12);
        assert!(heights.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(section.height(), 0);
        assert_eq!(section.phase(), SectionPhase::Collapsed);
    }

    #[test]
    fn expand_measures_at_toggle_time() {
        let (mut section, mut sched) = open(240);
        section.toggle(&mut sched, || Some(240), ());
        settle(&mut section, &mut sched);
        section.toggle(&mut sched, || Some(310), ());
        let heights = settle(&mut section, &mut sched);
        assert!(heights.windows(2).all(|w| w[1] >= w[0]));
        assert_eq!(section.height(), 310);
    }

    #[test]
    fn double_toggle_returns_to_start() {
        let (mut section, mut sched) = open(240);
        section.toggle(&mut sched, || Some(240), ());
        section.toggle(&mut sched, || Some(240), ());
        assert!(section.is_expanded());
        assert_eq!(sched.pending_count(), 1);
        settle(&mut section, &mut sched);
        assert_eq!(section.height(), section.target_height());
        assert_eq!(section.height(), 240);
        assert!(sched.is_idle());
    }

    #[test]
    fn malformed_measurement_targets_zero() {
        let (mut section, mut sched) = open(100);
        section.toggle(&mut sched, || None, ());
        settle(&mut section, &mut sched);
        section.toggle(&mut sched, || Some(-5), ());
        assert_eq!(section.target_height(), 0);
        settle(&mut section, &mut sched);
        assert_eq!(section.height(), 0);
    }

    #[test]
    fn resize_snaps_when_settled_open_and_ignores_collapse() {
        let (mut section, mut sched) = open(100);
        assert!(section.content_resized(&mut sched, Some(180), ()));
        assert_eq!(section.height(), 180);
        section.toggle(&mut sched, || Some(180), ());
        assert!(!section.content_resized(&mut sched, Some(50), ()));
        settle(&mut section, &mut sched);
        assert!(!section.content_resized(&mut sched, Some(50), ()));
        assert_eq!(section.height(), 0);
    }

    #[test]
    fn resize_while_expanding_retargets() {
        let (mut section, mut sched) = open(28);
        section.toggle(&mut sched, || None, ());
        settle(&mut section, &mut sched);
        section.toggle(&mut sched, || Some(28), ());
        sched.advance(Duration::from_millis(32), |s, fired| {
            section.tick(s, fired.token, ());
        });
        let mid = section.height();
        assert!(section.is_animating());
        assert!(section.content_resized(&mut sched, Some(168), ()));
        assert_eq!(section.target_height(), 168);
        assert!(!section.content_resized(&mut sched, Some(168), ()));
        let heights = settle(&mut section, &mut sched);
        assert!(heights.windows(2).all(|w| w[0] <= w[1]));
        assert!(heights[0] >= mid);
        assert_eq!(section.height(), 168);
    }

    #[test]
    fn header_hover_uses_soft_accent() {
        let theme = Theme::earth();
        let (mut section, _) = open(0);
        assert_eq!(section.header_fill(&theme), theme.card);
        section.set_header_hovered(true);
        assert_eq!(section.header_fill(&theme), theme.accent_soft);
    }
}
