//! Capture of `tracing` events for assertions on what a stage logged.
//!
//! The capturing subscriber is installed only for the duration of the
//! closure, so tests do not fight over the global dispatcher.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// One recorded event.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedEvent {
    pub level: Level,
    pub message: String,
    /// Structured fields other than the message, formatted with `Debug`
    pub fields: Vec<(String, String)>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Events recorded while running a closure.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs {
    pub events: Vec<CapturedEvent>,
}

impl CapturedLogs {
    pub fn at_level(&self, level: Level) -> Vec<&CapturedEvent> {
        self.events.iter().filter(|e| e.level == level).collect()
    }

    pub fn count(&self, level: Level) -> usize {
        self.at_level(level).len()
    }

    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.events
            .iter()
            .any(|e| e.level == level && e.message.contains(needle))
    }
}

/// Run `f` with a capturing subscriber and return its result with the events.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, CapturedLogs) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(CaptureLayer {
        events: Arc::clone(&events),
    });

    let result = tracing::subscriber::with_default(subscriber, f);

    let events = events
        .lock()
        .map(|mut guard| std::mem::take(&mut *guard))
        .unwrap_or_default();
    (result, CapturedLogs { events })
}

struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        if let Ok(mut events) = self.events.lock() {
            events.push(CapturedEvent {
                level: *event.metadata().level(),
                message: visitor.message,
                fields: visitor.fields,
            });
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name().to_string(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push((field.name().to_string(), format!("{:?}", value)));
        }
    }
}
