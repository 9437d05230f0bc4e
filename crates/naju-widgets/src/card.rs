#![forbid(unsafe_code)]

//! Patient card: rounded box, glow controller and a single hit region.
//!
//! The outline color and width are owned by the card's [`HoverGlow`]; the
//! only other writer is [`Card::settle`], which paints the selection state
//! after a theme change or a selection repaint.

use naju_core::geometry::{Point, Rect, Size};
use naju_runtime::{Scheduler, Token};
use naju_style::{Rgb, Theme};

use crate::hit::{HitRegion, Hover};
use crate::hover_glow::{Glow, HoverGlow, HoverGlowConfig};
use crate::shape::RoundedShape;

/// Everything a renderer needs to draw a card frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardVisualState {
    /// Fill color.
    pub fill: Rgb,
    /// Outline color.
    pub outline: Rgb,
    /// Outline width, 1..=3.
    pub outline_width: u8,
    /// Effective corner radius.
    pub radius: u32,
    /// Box size.
    pub size: Size,
}

/// A card with its own glow and hit region.
#[derive(Debug, Clone)]
pub struct Card {
    shape: RoundedShape,
    glow: HoverGlow,
    hit: HitRegion,
    fill: Rgb,
}

impl Card {
    /// Create a card painted from `theme`: card fill, border outline at
    /// rest, accent outline on hover.
    #[must_use]
    pub fn new(theme: &Theme, radius: u32, padding: u32, glow: HoverGlowConfig) -> Self {
        Self {
            shape: RoundedShape::new(radius, padding),
            glow: HoverGlow::new(theme.border, theme.accent, glow),
            hit: HitRegion::default(),
            fill: theme.card,
        }
    }

    /// Place the card. Returns a crossing if the pointer ends up on the
    /// other side of the new bounds.
    pub fn place(&mut self, bounds: Rect, pointer: Option<Point>) -> Option<Hover> {
        self.shape.resize(bounds.size());
        self.hit.set_bounds(bounds, pointer)
    }

    /// Feed a pointer position.
    pub fn pointer_moved(&mut self, pointer: Option<Point>) -> Option<Hover> {
        self.hit.pointer_moved(pointer)
    }

    /// Card bounds.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.hit.bounds()
    }

    /// Whether `p` hits the card.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        self.hit.contains(p)
    }

    /// Whether the pointer is over the card.
    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hit.is_inside()
    }

    /// Outline geometry.
    #[must_use]
    pub fn shape(&self) -> &RoundedShape {
        &self.shape
    }

    /// Glow controller.
    #[must_use]
    pub fn glow(&self) -> &HoverGlow {
        &self.glow
    }

    /// Start the enter glow.
    pub fn enter<M>(&mut self, sched: &mut Scheduler<M>, msg: M) -> bool {
        self.glow.enter(sched, msg)
    }

    /// Start the leave glow unless `selected`.
    pub fn leave<M>(&mut self, sched: &mut Scheduler<M>, selected: bool, msg: M) -> bool {
        self.glow.leave(sched, selected, msg)
    }

    /// Deliver a glow tick.
    pub fn tick<M: Clone>(&mut self, sched: &mut Scheduler<M>, token: Token, msg: M) -> bool {
        self.glow.tick(sched, token, msg)
    }

    /// Cancel glow work and paint the selection state: accent at width 3
    /// when selected, border at width 1 otherwise.
    pub fn settle<M>(&mut self, sched: &mut Scheduler<M>, theme: &Theme, selected: bool) {
        self.fill = theme.card;
        self.glow.set_palette(theme.border, theme.accent);
        let rest = if selected {
            Glow::new(theme.accent, 3.0)
        } else {
            Glow::new(theme.border, 1.0)
        };
        self.glow.settle(sched, rest);
    }

    /// Current visual state.
    #[must_use]
    pub fn visual(&self) -> CardVisualState {
        CardVisualState {
            fill: self.fill,
            outline: self.glow.color(),
            outline_width: self.glow.outline_width(),
            radius: self.shape.effective_radius(),
            size: self.shape.size(),
        }
    }
}
