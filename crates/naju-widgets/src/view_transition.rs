#![forbid(unsafe_code)]

//! Slide between the patient list and the patient profile.
//!
//! One transition exists per workbench. Its single tween drives the slide
//! progress `p` (0 = list, 1 = profile); panel rectangles are recomputed
//! from `(container, p)` on every tick and every resize.

use std::time::Duration;

use naju_core::geometry::Size;
use naju_layout::{PanelPlacement, SlideLayout};
use naju_runtime::{Scheduler, Token, Tween, TweenStep};

/// Which view the workbench is showing (or heading to).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    /// Patient list.
    #[default]
    List,
    /// Patient profile.
    Profile,
}

impl ViewMode {
    /// Slide progress at rest in this mode.
    #[must_use]
    pub const fn progress(self) -> f32 {
        match self {
            Self::List => 0.0,
            Self::Profile => 1.0,
        }
    }
}

/// Controller of the list/profile slide.
#[derive(Debug, Clone)]
pub struct ViewTransition {
    mode: ViewMode,
    steps: u32,
    progress: Tween<f32>,
    layout: SlideLayout,
    container: Size,
}

impl ViewTransition {
    /// Create a transition resting on the list.
    #[must_use]
    pub fn new(layout: SlideLayout, steps: u32, tick: Duration) -> Self {
        Self {
            mode: ViewMode::List,
            steps,
            progress: Tween::new(0.0, tick),
            layout,
            container: Size::new(1, 1),
        }
    }

    /// Target mode.
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Current slide progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    /// Whether a slide tick is pending.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.progress.is_running()
    }

    /// Whether the Back affordance is shown.
    #[must_use]
    pub fn back_visible(&self) -> bool {
        self.mode == ViewMode::Profile
    }

    /// Slide toward `mode`. Returns `None` without touching anything when
    /// already in (or heading to) `mode`.
    pub fn set_mode<M>(&mut self, sched: &mut Scheduler<M>, mode: ViewMode, msg: M) -> Option<Token> {
        if mode == self.mode {
            return None;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(from = ?self.mode, to = ?mode, p = self.progress.value(), "view transition");
        self.mode = mode;
        Some(self.progress.retarget(sched, mode.progress(), self.steps, msg))
    }

    /// Escape key: leave the profile for the list.
    pub fn escape<M>(&mut self, sched: &mut Scheduler<M>, msg: M) -> Option<Token> {
        if self.mode == ViewMode::Profile {
            self.set_mode(sched, ViewMode::List, msg)
        } else {
            None
        }
    }

    /// Deliver a fired slide tick. Returns whether the panels moved.
    pub fn tick<M>(&mut self, sched: &mut Scheduler<M>, token: Token, msg: M) -> bool {
        !matches!(self.progress.tick(sched, token, msg), TweenStep::Stale)
    }

    /// Container was resized; the next placement reflows at the current `p`.
    pub fn resize(&mut self, container: Size) {
        self.container = container.at_least(1);
    }

    /// Container size.
    #[must_use]
    pub fn container(&self) -> Size {
        self.container
    }

    /// Slide geometry.
    #[must_use]
    pub fn layout(&self) -> SlideLayout {
        self.layout
    }

    /// Panel rectangles at the current progress.
    #[must_use]
    pub fn placement(&self) -> PanelPlacement {
        self.layout.place(self.container, self.progress.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use naju_core::geometry::Rect;

    fn transition() -> ViewTransition {
        let mut vt = ViewTransition::new(SlideLayout::new(520, 16), 18, Duration::from_millis(16));
        vt.resize(Size::new(1200, 800));
        vt
    }

    fn run(vt: &mut ViewTransition, sched: &mut Scheduler<()>, dt: Duration) -> Vec<f32> {
        let mut ps = Vec::new();
        sched.advance(dt, |s, fired| {
            vt.tick(s, fired.token, ());
            ps.push(vt.progress());
        });
        ps
    }

    #[test]
    fn slides_to_profile_in_eighteen_ticks() {
        let mut sched = Scheduler::new();
        let mut vt = transition();
        assert!(vt.set_mode(&mut sched, ViewMode::Profile, ()).is_some());
        assert!(vt.back_visible());
        let ps = run(&mut vt, &mut sched, Duration::from_secs(1));
        assert_eq!(ps.len(), 18);
        assert_eq!(vt.progress(), 1.0);
        let placed = vt.placement();
        assert_eq!(placed.list.x, -536);
        assert_eq!(placed.profile, Rect::new(0, 0, 1200, 800));
    }

    #[test]
    fn same_mode_is_noop() {
        let mut sched = Scheduler::new();
        let mut vt = transition();
        assert!(vt.set_mode(&mut sched, ViewMode::List, ()).is_none());
        vt.set_mode(&mut sched, ViewMode::Profile, ());
        let before = (sched.pending_count(), vt.progress(), vt.progress.token());
        assert!(vt.set_mode(&mut sched, ViewMode::Profile, ()).is_none());
        assert_eq!((sched.pending_count(), vt.progress(), vt.progress.token()), before);
    }

    #[test]
    fn reversing_mid_slide_keeps_single_tick() {
        let mut sched = Scheduler::new();
        let mut vt = transition();
        vt.set_mode(&mut sched, ViewMode::Profile, ());
        run(&mut vt, &mut sched, Duration::from_millis(5 * 16));
        let mid = vt.progress();
        assert!(mid > 0.0 && mid < 1.0);
        assert!(vt.escape(&mut sched, ()).is_some());
        assert_eq!(sched.pending_count(), 1);
        run(&mut vt, &mut sched, Duration::from_secs(1));
        assert_eq!(vt.progress(), 0.0);
        assert!(!vt.back_visible());
        assert_eq!(vt.placement().list.x, 0);
    }

    #[test]
    fn escape_on_list_does_nothing() {
        let mut sched = Scheduler::new();
        let mut vt = transition();
        assert!(vt.escape(&mut sched, ()).is_none());
        assert!(sched.is_idle());
    }

    #[test]
    fn resize_mid_slide_reflows() {
        let mut sched = Scheduler::new();
        let mut vt = transition();
        vt.set_mode(&mut sched, ViewMode::Profile, ());
        run(&mut vt, &mut sched, Duration::from_millis(4 * 16));
        vt.resize(Size::new(0, 0));
        let placed = vt.placement();
        assert!(placed.profile.width >= 1 && placed.profile.height >= 1);
        vt.resize(Size::new(900, 500));
        assert_eq!(vt.placement().profile.right(), 900);
    }
}
