#![forbid(unsafe_code)]

//! Patient card list.
//!
//! One [`CardEntry`] per record: the display model, the card widget (shape,
//! glow, hit region) and the scrambling title. Entries are stacked in a
//! single column inside the list panel; entry `i` sits at
//! `margin + i·pitch − scroll` from the panel top.
//!
//! # Invariants
//!
//! 1. Every entry carries its [`RecordId`]; hit-testing answers with the id,
//!    never a position.
//! 2. Ids are unique within a list.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;

use image::RgbaImage;
use naju_core::geometry::{Point, Rect};
use naju_runtime::{Fired, Property, Scheduler};
use naju_style::Theme;
use naju_widgets::{Card, Hover, TextScramble};

use crate::config::{LayoutConfig, MotionConfig};
use crate::records::{RecordId, RecordSummary};
use crate::workbench::{AnimKey, Target};

/// Title shown for records without a name.
pub const UNNAMED: &str = "sin nombre";

/// Meta line shown when neither document nor age is known.
pub const NO_META: &str = "—";

/// Description shown when neither city nor occupation is known.
pub const NO_DESCRIPTION: &str = "click para abrir el perfil";

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// Texts and thumbnail of one card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardModel {
    /// Record the card opens.
    pub id: RecordId,
    /// Lower-cased name.
    pub title: String,
    /// `document · N años`.
    pub meta: String,
    /// `city · occupation`.
    pub description: String,
    /// Photo the thumbnail was derived from.
    pub photo_file_name: Option<String>,
    /// Derived thumbnail.
    pub thumbnail: Arc<RgbaImage>,
}

impl CardModel {
    /// Build the card texts for `summary`.
    #[must_use]
    pub fn from_summary(summary: &RecordSummary, thumbnail: Arc<RgbaImage>) -> Self {
        let name = summary.display_name.trim();
        let title = if name.is_empty() {
            UNNAMED.to_string()
        } else {
            name.to_lowercase()
        };

        let mut meta = Vec::new();
        if !summary.document_label.trim().is_empty() {
            meta.push(summary.document_label.trim().to_string());
        }
        if let Some(age) = summary.age.filter(|&a| a > 0) {
            meta.push(format!("{age} años"));
        }

        let description: Vec<&str> = [summary.city.trim(), summary.occupation.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            id: summary.id.clone(),
            title,
            meta: if meta.is_empty() {
                NO_META.to_string()
            } else {
                meta.join(" · ")
            },
            description: if description.is_empty() {
                NO_DESCRIPTION.to_string()
            } else {
                description.join(" · ")
            },
            photo_file_name: summary.photo_file_name.clone(),
            thumbnail,
        }
    }
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// A card model with its live widgets.
#[derive(Debug, Clone)]
pub struct CardEntry {
    model: CardModel,
    card: Card,
    title: TextScramble,
}

impl CardEntry {
    /// Display model.
    #[must_use]
    pub fn model(&self) -> &CardModel {
        &self.model
    }

    /// Card widget.
    #[must_use]
    pub fn card(&self) -> &Card {
        &self.card
    }

    /// Title scramble.
    #[must_use]
    pub fn title(&self) -> &TextScramble {
        &self.title
    }

    fn key(&self, property: Property) -> AnimKey {
        AnimKey::new(Target::Card(self.model.id.clone()), property)
    }
}

/// Ordered card entries with an id index.
#[derive(Debug, Clone, Default)]
pub struct CardList {
    entries: Vec<CardEntry>,
    index: HashMap<RecordId, usize>,
}

impl CardList {
    /// Empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every entry. Pending work of the old cards is cancelled and
    /// each new card rests in its selection state.
    pub fn rebuild(
        &mut self,
        sched: &mut Scheduler<AnimKey>,
        models: Vec<CardModel>,
        theme: &Theme,
        layout: &LayoutConfig,
        motion: &MotionConfig,
        selected: Option<&RecordId>,
    ) {
        self.clear(sched, theme);
        for model in models {
            if self.index.contains_key(&model.id) {
                continue;
            }
            let mut card = Card::new(theme, layout.card_radius, layout.card_padding, motion.glow());
            card.settle(sched, theme, selected == Some(&model.id));
            let title = TextScramble::new(
                model.title.clone(),
                motion.scramble_duration,
                motion.scramble_interval,
                seed_for(&model.id),
            );
            self.index.insert(model.id.clone(), self.entries.len());
            self.entries.push(CardEntry { model, card, title });
        }
    }

    /// Drop every entry, cancelling its pending work.
    pub fn clear(&mut self, sched: &mut Scheduler<AnimKey>, theme: &Theme) {
        for entry in &mut self.entries {
            entry.card.settle(sched, theme, false);
            entry.title.restore(sched);
        }
        self.entries.clear();
        self.index.clear();
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = &CardEntry> {
        self.entries.iter()
    }

    /// Entry for `id`.
    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&CardEntry> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    /// Total content height for the scroll container.
    #[must_use]
    pub fn content_height(&self, layout: &LayoutConfig) -> u32 {
        let n = u32::try_from(self.entries.len()).unwrap_or(u32::MAX);
        layout.card_pitch().saturating_mul(n)
    }

    /// Indices of entries intersecting the scrolled content slice `view`.
    #[must_use]
    pub fn visible(&self, view: Range<u32>, layout: &LayoutConfig) -> Range<usize> {
        let pitch = layout.card_pitch().max(1);
        let first = (view.start / pitch) as usize;
        let last = view.end.div_ceil(pitch) as usize;
        first.min(self.entries.len())..last.min(self.entries.len())
    }

    /// Place every card inside `panel` scrolled by `offset`. Returns the
    /// hover crossings the move caused.
    pub fn place(
        &mut self,
        panel: Rect,
        offset: u32,
        pointer: Option<Point>,
        layout: &LayoutConfig,
    ) -> Vec<(RecordId, Hover)> {
        let margin = i64::from(layout.card_margin);
        let pitch = i64::from(layout.card_pitch());
        let width = panel.width.saturating_sub(layout.card_margin * 2).max(1);
        let x = clamp_i32(i64::from(panel.x) + margin);
        // Pointer outside the panel cannot hover a card that is clipped away.
        let pointer = pointer.filter(|&p| panel.contains(p));
        let mut crossings = Vec::new();
        for (i, entry) in self.entries.iter_mut().enumerate() {
            let y = i64::from(panel.y) + margin + i as i64 * pitch - i64::from(offset);
            let bounds = Rect::new(x, clamp_i32(y), width, layout.card_height.max(1));
            if let Some(hover) = entry.card.place(bounds, pointer) {
                crossings.push((entry.model.id.clone(), hover));
            }
        }
        crossings
    }

    /// Feed a pointer move to every card. Returns the crossings.
    pub fn pointer_moved(&mut self, pointer: Option<Point>, panel: Rect) -> Vec<(RecordId, Hover)> {
        let pointer = pointer.filter(|&p| panel.contains(p));
        self.entries
            .iter_mut()
            .filter_map(|entry| {
                entry
                    .card
                    .pointer_moved(pointer)
                    .map(|hover| (entry.model.id.clone(), hover))
            })
            .collect()
    }

    /// Card under `p`.
    #[must_use]
    pub fn hit(&self, p: Point) -> Option<&RecordId> {
        self.entries
            .iter()
            .find(|entry| entry.card.contains(p))
            .map(|entry| &entry.model.id)
    }

    /// Start or stop the hover effects of `id`.
    pub fn hover(
        &mut self,
        sched: &mut Scheduler<AnimKey>,
        id: &RecordId,
        hover: Hover,
        selected: bool,
        scramble: bool,
    ) {
        let Some(&i) = self.index.get(id) else {
            return;
        };
        let entry = &mut self.entries[i];
        let outline = entry.key(Property::Outline);
        match hover {
            Hover::Enter => {
                entry.card.enter(sched, outline);
                if scramble {
                    let text = entry.key(Property::Text);
                    entry.title.start(sched, text);
                }
            }
            Hover::Leave => {
                entry.card.leave(sched, selected, outline);
                entry.title.restore(sched);
            }
        }
    }

    /// Paint the selection state of `id`.
    pub fn settle(&mut self, sched: &mut Scheduler<AnimKey>, id: &RecordId, theme: &Theme, selected: bool) {
        if let Some(&i) = self.index.get(id) {
            self.entries[i].card.settle(sched, theme, selected);
        }
    }

    /// Route a fired tick to the card it belongs to.
    pub fn tick(&mut self, sched: &mut Scheduler<AnimKey>, fired: Fired<AnimKey>) -> bool {
        let Target::Card(id) = &fired.msg.target else {
            return false;
        };
        let Some(&i) = self.index.get(id) else {
            return false;
        };
        let entry = &mut self.entries[i];
        match fired.msg.property {
            Property::Outline => entry.card.tick(sched, fired.token, fired.msg),
            Property::Text => entry.title.tick(sched, fired.token, fired.msg),
            Property::Height | Property::Progress => false,
        }
    }
}

fn clamp_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// FNV-1a over the id so each card scrambles the same way every run.
fn seed_for(id: &RecordId) -> u64 {
    id.as_str()
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325, |h, b| (h ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3))
}
