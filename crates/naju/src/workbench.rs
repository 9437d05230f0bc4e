#![forbid(unsafe_code)]

//! The workbench: one list panel, one profile panel, and every controller
//! that animates them, driven by a single virtual-time scheduler.
//!
//! The embedding application forwards input (`pointer_moved`, `click`,
//! `wheel`, `drag`, `escape`, `resize`) and collaborator notifications
//! (`on_record_selected`, `on_photo_changed`, `on_view_requested`), then
//! calls [`Workbench::advance`] with the elapsed frame time. Every fired
//! tick carries an [`AnimKey`] naming the `(target, property)` it belongs
//! to and is routed back to the controller that owns that pair.
//!
//! # Invariants
//!
//! 1. Ticks run to completion one at a time; layout is recomputed once per
//!    `advance` after the last tick.
//! 2. Cards are never rebuilt while ticks are being dispatched.
//! 3. The selected card rests at accent width 3; every other card rests at
//!    border width 1.
//!
//! # Failure Modes
//!
//! - Collaborator listing failures degrade to empty lists with a `warn` log.
//! - Selecting an unknown record returns [`RecordError::Missing`] and leaves
//!   the current selection alone.

use std::fmt;
use std::time::Duration;

use naju_core::geometry::{Point, Rect, Size};
use naju_layout::{PanelPlacement, SectionLayout};
use naju_runtime::{AnimationKey, Fired, Property, Scheduler, Token};
use naju_widgets::{
    CollapsibleSection, ProfilePhoto, ScrollableContainer, ThumbnailCache, ViewMode, ViewTransition,
    WheelDelta, profile_photo,
};

use crate::card_list::{CardList, CardModel};
use crate::config::WorkbenchConfig;
use crate::records::{AttachmentTables, RecordError, RecordId, RecordStore, RecordSummary, StoreResolver};
use crate::{Error, Result};

/// Title of the documents section.
pub const DOCUMENTS_TITLE: &str = "Archivos del paciente";

/// Title of the evaluations section.
pub const EVALUATIONS_TITLE: &str = "Evaluaciones";

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// The two collapsible sections of the profile panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    /// Every uploaded file.
    Documents,
    /// Clinical-evaluation exports.
    Evaluations,
}

impl SectionId {
    /// Both sections in layout order.
    pub const ALL: [Self; 2] = [Self::Documents, Self::Evaluations];
}

/// Animated object a tick belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// A patient card.
    Card(RecordId),
    /// A profile section.
    Section(SectionId),
    /// The list/profile slide.
    View,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card(id) => write!(f, "card:{id}"),
            Self::Section(s) => write!(f, "section:{s:?}"),
            Self::View => f.write_str("view"),
        }
    }
}

/// Scheduler message of the workbench.
pub type AnimKey = AnimationKey<Target>;

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// What the profile panel shows for the selected record.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    /// Selected record.
    pub summary: RecordSummary,
    /// Documents and evaluations tables.
    pub tables: AttachmentTables,
    /// Profile picture or placeholder.
    pub photo: ProfilePhoto,
}

/// What a click landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A card was clicked and its record selected.
    Card(RecordId),
    /// A section header was clicked and the section toggled.
    Section(SectionId),
    /// Nothing interactive.
    Nothing,
}

// ---------------------------------------------------------------------------
// Workbench
// ---------------------------------------------------------------------------

/// Headless patient workbench over a [`RecordStore`].
#[derive(Debug)]
pub struct Workbench<S> {
    store: S,
    config: WorkbenchConfig,
    scheduler: Scheduler<AnimKey>,
    cards: CardList,
    thumbnails: ThumbnailCache<RecordId>,
    view: ViewTransition,
    scroll: ScrollableContainer,
    documents: CollapsibleSection,
    evaluations: CollapsibleSection,
    section_layout: SectionLayout,
    section_rects: Vec<Rect>,
    selected: Option<RecordId>,
    profile: Option<ProfileView>,
    pointer: Option<Point>,
    dispatching: bool,
    query: String,
}

impl<S: RecordStore> Workbench<S> {
    /// Create a workbench of `size` and load the unfiltered card list.
    pub fn new(store: S, config: WorkbenchConfig, size: Size) -> Self {
        let motion = config.motion;
        let mut view = ViewTransition::new(config.layout.slide(), motion.view_steps, motion.tick);
        view.resize(size);
        let mut wb = Self {
            store,
            scheduler: Scheduler::new(),
            cards: CardList::new(),
            thumbnails: ThumbnailCache::new(),
            view,
            scroll: ScrollableContainer::new(config.scroll.line, config.scroll.lines_per_notch),
            documents: CollapsibleSection::new(DOCUMENTS_TITLE, motion.section_steps, motion.tick),
            evaluations: CollapsibleSection::new(EVALUATIONS_TITLE, motion.section_steps, motion.tick),
            section_layout: SectionLayout::OneColumn,
            section_rects: Vec::new(),
            selected: None,
            profile: None,
            pointer: None,
            dispatching: false,
            query: String::new(),
            config,
        };
        wb.refresh("");
        wb
    }

    // -----------------------------------------------------------------------
    // Collaborator notifications
    // -----------------------------------------------------------------------

    /// Rebuild the card list from records matching `query`.
    pub fn refresh(&mut self, query: &str) {
        debug_assert!(!self.dispatching, "card rebuild requested during tick dispatch");
        if self.dispatching {
            return;
        }
        self.query = query.to_string();
        let summaries = self.store.list_records(query).unwrap_or_else(|err| {
            tracing::warn!(query, error = %err, "record listing failed");
            Vec::new()
        });

        let layout = self.config.layout;
        let theme_id = self.config.theme.id;
        let resolver = StoreResolver(&self.store);
        let models: Vec<CardModel> = summaries
            .iter()
            .map(|summary| {
                let thumb = self.thumbnails.get(
                    &resolver,
                    &summary.id,
                    summary.photo_file_name.as_deref().unwrap_or(""),
                    layout.thumbnail_width,
                    layout.thumbnail_height,
                    theme_id,
                );
                CardModel::from_summary(summary, thumb)
            })
            .collect();

        tracing::debug!(query, cards = models.len(), "card list rebuilt");
        self.cards.rebuild(
            &mut self.scheduler,
            models,
            &self.config.theme,
            &layout,
            &self.config.motion,
            self.selected.as_ref(),
        );
        self.reflow();
    }

    /// Select `id`: repaint the cards, load its profile and slide to it.
    pub fn on_record_selected(&mut self, id: &RecordId) -> Result<()> {
        let summary = self.find_summary(id)?;

        let theme = self.config.theme.clone();
        if let Some(previous) = self.selected.replace(id.clone())
            && &previous != id
        {
            self.cards.settle(&mut self.scheduler, &previous, &theme, false);
        }
        self.cards.settle(&mut self.scheduler, id, &theme, true);

        let tables = self.store.attachment_tables(id).unwrap_or_else(|err| {
            tracing::warn!(record = %id, error = %err, "attachment listing failed");
            AttachmentTables::default()
        });
        let photo = profile_photo(
            &StoreResolver(&self.store),
            id,
            summary.photo_file_name.as_deref(),
            &theme,
        );
        tracing::debug!(
            record = %id,
            documents = tables.documents.len(),
            evaluations = tables.evaluations.len(),
            placeholder = photo.is_placeholder(),
            "record selected"
        );
        self.profile = Some(ProfileView {
            summary,
            tables,
            photo,
        });
        self.sync_section_heights();
        self.on_view_requested(ViewMode::Profile);
        self.reflow();
        Ok(())
    }

    /// The photo of `id` changed: drop its thumbnails and rebuild the cards.
    pub fn on_photo_changed(&mut self, id: &RecordId) {
        let removed = self.thumbnails.invalidate(id);
        tracing::debug!(record = %id, removed, "photo changed");
        let query = std::mem::take(&mut self.query);
        self.refresh(&query);

        if self.selected.as_ref() == Some(id)
            && let Ok(summary) = self.find_summary(id)
            && let Some(profile) = self.profile.as_mut()
        {
            profile.photo = profile_photo(
                &StoreResolver(&self.store),
                id,
                summary.photo_file_name.as_deref(),
                &self.config.theme,
            );
            profile.summary = summary;
        }
    }

    /// Slide to `mode`. Returns the slide's first tick, or `None` when
    /// already there.
    pub fn on_view_requested(&mut self, mode: ViewMode) -> Option<Token> {
        self.view.set_mode(&mut self.scheduler, mode, view_key())
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Window resized.
    pub fn resize(&mut self, size: Size) {
        self.view.resize(size);
        self.reflow();
    }

    /// Pointer moved (or left the window with `None`).
    pub fn pointer_moved(&mut self, pointer: Option<Point>) {
        self.pointer = pointer;
        let list = self.view.placement().list;
        let crossings = self.cards.pointer_moved(pointer, list);
        self.apply_crossings(crossings);
        self.track_hover(list);
    }

    /// Primary click at `p`.
    pub fn click(&mut self, p: Point) -> ClickOutcome {
        let placement = self.view.placement();
        if placement.list.contains(p)
            && let Some(id) = self.cards.hit(p).cloned()
        {
            return match self.on_record_selected(&id) {
                Ok(()) => ClickOutcome::Card(id),
                Err(err) => {
                    tracing::warn!(record = %id, error = %err, "card selection failed");
                    ClickOutcome::Nothing
                }
            };
        }
        if placement.profile.contains(p)
            && let Some(section) = self.section_header_at(p)
        {
            self.toggle_section(section);
            return ClickOutcome::Section(section);
        }
        ClickOutcome::Nothing
    }

    /// Wheel input over the list. Returns whether the list scrolled.
    pub fn wheel(&mut self, delta: WheelDelta) -> bool {
        let moved = self.scroll.wheel(delta);
        if moved {
            self.reflow();
        }
        moved
    }

    /// Scrollbar drag of `pixels`. Returns whether the list scrolled.
    pub fn drag(&mut self, pixels: i32) -> bool {
        let moved = self.scroll.drag(pixels);
        if moved {
            self.reflow();
        }
        moved
    }

    /// Escape key. Returns whether it started a slide back to the list.
    pub fn escape(&mut self) -> bool {
        self.view.escape(&mut self.scheduler, view_key()).is_some()
    }

    /// Flip a profile section, measuring its table at this moment.
    pub fn toggle_section(&mut self, section: SectionId) -> Token {
        let natural = self.natural_height(section);
        let key = AnimKey::new(Target::Section(section), Property::Height);
        let token = match section {
            SectionId::Documents => self.documents.toggle(&mut self.scheduler, || natural, key),
            SectionId::Evaluations => self.evaluations.toggle(&mut self.scheduler, || natural, key),
        };
        self.reflow();
        token
    }

    // -----------------------------------------------------------------------
    // Time
    // -----------------------------------------------------------------------

    /// Let `dt` pass: dispatch every due tick in deadline order, then reflow.
    /// Returns the number of ticks dispatched.
    pub fn advance(&mut self, dt: Duration) -> usize {
        let until = self.scheduler.now().saturating_add(dt);
        self.dispatching = true;
        let mut fired = 0;
        while let Some(entry) = self.scheduler.pop_due(until) {
            self.dispatch(entry);
            fired += 1;
        }
        self.scheduler.advance_clock(until);
        self.dispatching = false;
        if fired > 0 {
            self.reflow();
        }
        fired
    }

    fn dispatch(&mut self, fired: Fired<AnimKey>) {
        let token = fired.token;
        let target = fired.msg.target.clone();
        let changed = match (&target, fired.msg.property) {
            (Target::Card(_), _) => self.cards.tick(&mut self.scheduler, fired),
            (Target::Section(SectionId::Documents), Property::Height) => {
                self.documents.tick(&mut self.scheduler, token, fired.msg)
            }
            (Target::Section(SectionId::Evaluations), Property::Height) => {
                self.evaluations.tick(&mut self.scheduler, token, fired.msg)
            }
            (Target::View, Property::Progress) => self.view.tick(&mut self.scheduler, token, fired.msg),
            (target, property) => {
                tracing::trace!(%target, ?property, %token, "unroutable tick");
                false
            }
        };
        if !changed {
            tracing::trace!(%token, "stale tick");
        }
    }

    // -----------------------------------------------------------------------
    // Layout
    // -----------------------------------------------------------------------

    fn reflow(&mut self) {
        let layout = self.config.layout;
        let placement = self.view.placement();

        self.scroll.set_viewport_extent(placement.list.height);
        self.scroll.set_content_extent(self.cards.content_height(&layout));
        let crossings = self
            .cards
            .place(placement.list, self.scroll.offset(), self.pointer, &layout);
        self.apply_crossings(crossings);

        let area = profile_body(placement.profile, layout.profile_header_height);
        self.section_layout = SectionLayout::for_width(area.width, layout.two_column_threshold);
        let heights: Vec<u32> = SectionId::ALL
            .iter()
            .map(|&s| layout.section_header_height.saturating_add(self.section(s).height()))
            .collect();
        self.section_rects = self.section_layout.place(area, &heights, layout.section_gap);

        self.track_hover(placement.list);
    }

    fn track_hover(&mut self, list: Rect) {
        if self.pointer.is_some_and(|p| list.contains(p)) {
            self.scroll.pointer_entered();
        } else {
            self.scroll.pointer_left();
        }
        let hovered = self.pointer.and_then(|p| self.section_header_at(p));
        self.documents
            .set_header_hovered(hovered == Some(SectionId::Documents));
        self.evaluations
            .set_header_hovered(hovered == Some(SectionId::Evaluations));
    }

    fn apply_crossings(&mut self, crossings: Vec<(RecordId, naju_widgets::Hover)>) {
        let scramble = self.config.motion.scramble_enabled();
        for (id, hover) in crossings {
            let selected = self.selected.as_ref() == Some(&id);
            self.cards
                .hover(&mut self.scheduler, &id, hover, selected, scramble);
        }
    }

    fn section_header_at(&self, p: Point) -> Option<SectionId> {
        let header = self.config.layout.section_header_height;
        SectionId::ALL
            .iter()
            .zip(&self.section_rects)
            .find(|(_, rect)| Rect::new(rect.x, rect.y, rect.width, header).contains(p))
            .map(|(&s, _)| s)
    }

    fn natural_height(&self, section: SectionId) -> Option<i32> {
        let profile = self.profile.as_ref()?;
        let rows = match section {
            SectionId::Documents => profile.tables.documents.len(),
            SectionId::Evaluations => profile.tables.evaluations.len(),
        };
        i32::try_from(self.config.layout.table_height(rows)).ok()
    }

    fn sync_section_heights(&mut self) {
        let documents = self.natural_height(SectionId::Documents);
        let evaluations = self.natural_height(SectionId::Evaluations);
        let key = |section| AnimKey::new(Target::Section(section), Property::Height);
        self.documents
            .content_resized(&mut self.scheduler, documents, key(SectionId::Documents));
        self.evaluations
            .content_resized(&mut self.scheduler, evaluations, key(SectionId::Evaluations));
    }

    fn find_summary(&self, id: &RecordId) -> Result<RecordSummary> {
        self.store
            .list_records("")?
            .into_iter()
            .find(|summary| &summary.id == id)
            .ok_or_else(|| Error::Record(RecordError::Missing(id.clone())))
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Record storage.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable record storage. Call [`Workbench::refresh`] or
    /// [`Workbench::on_photo_changed`] after changing it.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Configuration.
    #[must_use]
    pub fn config(&self) -> &WorkbenchConfig {
        &self.config
    }

    /// Animation scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &Scheduler<AnimKey> {
        &self.scheduler
    }

    /// Whether no animation work is pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.scheduler.is_idle()
    }

    /// Card list.
    #[must_use]
    pub fn cards(&self) -> &CardList {
        &self.cards
    }

    /// Thumbnail cache.
    #[must_use]
    pub fn thumbnails(&self) -> &ThumbnailCache<RecordId> {
        &self.thumbnails
    }

    /// Slide controller.
    #[must_use]
    pub fn view(&self) -> &ViewTransition {
        &self.view
    }

    /// Current panel rectangles.
    #[must_use]
    pub fn placement(&self) -> PanelPlacement {
        self.view.placement()
    }

    /// List scroll state.
    #[must_use]
    pub fn scroll(&self) -> &ScrollableContainer {
        &self.scroll
    }

    /// A profile section.
    #[must_use]
    pub fn section(&self, section: SectionId) -> &CollapsibleSection {
        match section {
            SectionId::Documents => &self.documents,
            SectionId::Evaluations => &self.evaluations,
        }
    }

    /// Current section arrangement.
    #[must_use]
    pub fn section_layout(&self) -> SectionLayout {
        self.section_layout
    }

    /// Section rectangles, in [`SectionId::ALL`] order.
    #[must_use]
    pub fn section_rects(&self) -> &[Rect] {
        &self.section_rects
    }

    /// Selected record.
    #[must_use]
    pub fn selected(&self) -> Option<&RecordId> {
        self.selected.as_ref()
    }

    /// Profile panel contents.
    #[must_use]
    pub fn profile(&self) -> Option<&ProfileView> {
        self.profile.as_ref()
    }

    /// Current search query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }
}

fn view_key() -> AnimKey {
    AnimKey::new(Target::View, Property::Progress)
}

/// Profile panel minus its header.
fn profile_body(profile: Rect, header: u32) -> Rect {
    let header = header.min(profile.height.saturating_sub(1));
    Rect::new(
        profile.x,
        profile
            .y
            .saturating_add(i32::try_from(header).unwrap_or(i32::MAX)),
        profile.width,
        profile.height - header,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::MemoryRecordStore;

    fn store() -> MemoryRecordStore {
        let mut store = MemoryRecordStore::new();
        store.insert(RecordSummary::new("a", "Ana"));
        store.insert(RecordSummary::new("b", "Beto"));
        store
    }

    #[test]
    fn profile_body_keeps_one_row() {
        assert_eq!(
            profile_body(Rect::new(536, 0, 664, 800), 240),
            Rect::new(536, 240, 664, 560)
        );
        assert_eq!(profile_body(Rect::new(0, 0, 10, 100), 240).height, 1);
    }

    #[test]
    fn unknown_record_is_missing() {
        let mut wb = Workbench::new(store(), WorkbenchConfig::default(), Size::new(1200, 800));
        let err = wb.on_record_selected(&RecordId::new("zzz"));
        assert!(matches!(err, Err(Error::Record(RecordError::Missing(_)))));
        assert_eq!(wb.selected(), None);
        assert_eq!(wb.view().mode(), ViewMode::List);
    }

    #[test]
    fn stray_keys_are_ignored() {
        let mut wb = Workbench::new(store(), WorkbenchConfig::default(), Size::new(1200, 800));
        wb.scheduler
            .schedule(Duration::from_millis(1), AnimKey::new(Target::View, Property::Height));
        wb.scheduler.schedule(
            Duration::from_millis(1),
            AnimKey::new(Target::Card(RecordId::new("gone")), Property::Outline),
        );
        assert_eq!(wb.advance(Duration::from_millis(5)), 2);
        assert!(wb.is_idle());
    }

    #[test]
    fn target_display() {
        assert_eq!(Target::Card(RecordId::new("a")).to_string(), "card:a");
        assert_eq!(Target::Section(SectionId::Documents).to_string(), "section:Documents");
        assert_eq!(Target::View.to_string(), "view");
    }
}
