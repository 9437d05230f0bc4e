#![forbid(unsafe_code)]

//! Structured logging integration tests.
//!
//! Capture every event the workbench emits and check the levels and fields
//! of the ones the embedding application relies on.
//!
//! Widget events need the default `tracing` feature:
//!   cargo test -p naju --test tracing_tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use naju::prelude::*;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured event with its level and fields.
#[derive(Debug, Clone)]
struct CapturedEvent {
    level: Level,
    fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn message(&self) -> &str {
        self.fields.get("message").map_or("", String::as_str)
    }
}

/// A tracing Layer that records every event.
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

/// Visitor that extracts event fields.
struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

/// Run `f` under a capturing subscriber and return what it logged.
fn with_captured_events<F>(f: F) -> Vec<CapturedEvent>
where
    F: FnOnce(),
{
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: Arc::clone(&events),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn find<'a>(events: &'a [CapturedEvent], message: &str) -> Option<&'a CapturedEvent> {
    events.iter().find(|e| e.message() == message)
}

fn store() -> MemoryRecordStore {
    let mut store = MemoryRecordStore::new();
    store.insert(RecordSummary::new("a", "Ana"));
    store
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn listing_failure_is_a_warning() {
    let events = with_captured_events(|| {
        let mut wb = Workbench::new(store(), WorkbenchConfig::default(), Size::new(1200, 800));
        wb.store_mut().set_unavailable(true);
        wb.refresh("ana");
    });
    let warn = find(&events, "record listing failed").expect("warning emitted");
    assert_eq!(warn.level, Level::WARN);
    assert_eq!(warn.fields.get("query").map(String::as_str), Some("ana"));
    assert!(warn.fields.contains_key("error"));
}

#[test]
fn selection_is_logged_at_debug() {
    let events = with_captured_events(|| {
        let mut wb = Workbench::new(store(), WorkbenchConfig::default(), Size::new(1200, 800));
        wb.on_record_selected(&RecordId::new("a")).unwrap();
    });
    let selected = find(&events, "record selected").expect("selection logged");
    assert_eq!(selected.level, Level::DEBUG);
    assert_eq!(selected.fields.get("record").map(String::as_str), Some("a"));
    assert_eq!(selected.fields.get("placeholder").map(String::as_str), Some("true"));
}

#[test]
fn scheduling_is_traced() {
    let events = with_captured_events(|| {
        let mut wb = Workbench::new(store(), WorkbenchConfig::default(), Size::new(1200, 800));
        wb.on_view_requested(ViewMode::Profile);
        wb.on_view_requested(ViewMode::List);
        wb.advance(Duration::from_millis(500));
    });
    assert!(
        events
            .iter()
            .any(|e| e.level == Level::TRACE && e.message() == "scheduled")
    );
    assert!(
        events
            .iter()
            .any(|e| e.level == Level::TRACE && e.message() == "cancelled")
    );
}

#[test]
fn view_transition_is_logged_by_widgets() {
    let events = with_captured_events(|| {
        let mut wb = Workbench::new(store(), WorkbenchConfig::default(), Size::new(1200, 800));
        wb.on_view_requested(ViewMode::Profile);
    });
    let transition = find(&events, "view transition").expect("transition logged");
    assert_eq!(transition.level, Level::DEBUG);
    assert_eq!(transition.fields.get("to").map(String::as_str), Some("Profile"));
}
