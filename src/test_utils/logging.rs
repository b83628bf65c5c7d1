//! Log capture for asserting on `tracing` events in tests.
//!
//! The capture layer is installed as the global subscriber once per test
//! binary. Tests run in parallel and share the buffer, so assertions should
//! look for messages unique to the test rather than clear and count.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

static LOG_STORAGE: OnceLock<Arc<Mutex<LogStorage>>> = OnceLock::new();

/// Bounded buffer of captured events.
#[derive(Default)]
pub struct LogStorage {
    entries: VecDeque<LogEntry>,
    max_entries: usize,
}

impl LogStorage {
    #[must_use]
    pub const fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    #[must_use]
    pub const fn entries(&self) -> &VecDeque<LogEntry> {
        &self.entries
    }

    #[must_use]
    pub fn contains(&self, level: Level, message: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.level == level && e.message.contains(message))
    }
}

/// A captured event.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    #[must_use]
    pub fn new(level: Level, target: &str, message: &str) -> Self {
        Self {
            level,
            target: target.to_string(),
            message: message.to_string(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

fn storage() -> Arc<Mutex<LogStorage>> {
    LOG_STORAGE
        .get_or_init(|| Arc::new(Mutex::new(LogStorage::new(10_000))))
        .clone()
}

/// Snapshot of every captured entry.
#[must_use]
pub fn captured_logs() -> Vec<LogEntry> {
    storage()
        .lock()
        .map(|s| s.entries().iter().cloned().collect())
        .unwrap_or_default()
}

/// Whether an entry at `level` containing `message` was captured.
#[must_use]
pub fn logs_contain(level: Level, message: &str) -> bool {
    storage()
        .lock()
        .is_ok_and(|s| s.contains(level, message))
}

/// Render captured entries for a failing assertion.
#[must_use]
pub fn format_logs_for_display() -> String {
    let logs = captured_logs();
    if logs.is_empty() {
        return String::from("No logs captured");
    }
    logs.iter()
        .map(|e| format!("[{}] {}: {}", e.level, e.target, e.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Layer that copies every event into the shared storage.
pub struct CaptureLayer {
    storage: Arc<Mutex<LogStorage>>,
}

impl<S> tracing_subscriber::Layer<S> for CaptureLayer
where
    S: tracing::Subscriber,
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        struct Visitor<'a> {
            message: &'a mut String,
            fields: &'a mut Vec<(String, String)>,
        }

        impl tracing::field::Visit for Visitor<'_> {
            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                if field.name() == "message" {
                    *self.message = value.to_string();
                } else {
                    self.fields.push((field.name().to_string(), value.to_string()));
                }
            }

            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                let value = format!("{value:?}");
                if field.name() == "message" {
                    *self.message = value;
                } else {
                    self.fields.push((field.name().to_string(), value));
                }
            }
        }

        let metadata = event.metadata();
        let mut entry = LogEntry::new(*metadata.level(), metadata.target(), "");
        event.record(&mut Visitor {
            message: &mut entry.message,
            fields: &mut entry.fields,
        });

        if let Ok(mut storage) = self.storage.lock() {
            storage.push(entry);
        }
    }
}

/// Install the capture layer as the global subscriber at `debug`.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_log_capture() {
    static INSTALLED: OnceLock<()> = OnceLock::new();
    INSTALLED.get_or_init(|| {
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new("debug"))
            .with(CaptureLayer { storage: storage() });
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// Assert that an entry with the given level and message fragment was captured.
#[macro_export]
macro_rules! assert_log_contains {
    ($level:expr, $message:expr) => {{
        assert!(
            $crate::test_utils::logging::logs_contain($level, $message),
            "Expected log with level {} containing '{}'\nCaptured logs:\n{}",
            $level,
            $message,
            $crate::test_utils::logging::format_logs_for_display()
        );
    }};
}
