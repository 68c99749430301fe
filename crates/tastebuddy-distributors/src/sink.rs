//! Side channel for warnings and errors raised inside adapters.
//!
//! Adapters receive a sink instead of reaching for a global logger, so a test
//! can hand in a [`MemorySink`] and assert exactly what was reported.

use std::error::Error;
use std::sync::{Mutex, PoisonError};

/// Receives `(operation, message)` events from adapters.
///
/// Implementations must not panic and must not block for longer than a short
/// uncontended lock. Reporting never alters the adapter's control flow.
pub trait LogSink: Send + Sync {
    fn warn(&self, operation: &str, message: &str);
    fn error(&self, operation: &str, error: &dyn Error);
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn warn(&self, operation: &str, message: &str) {
        tracing::warn!(operation, "{message}");
    }

    fn error(&self, operation: &str, error: &dyn Error) {
        tracing::error!(operation, error = %error, "distributor operation failed");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub level: LogLevel,
    pub operation: String,
    pub message: String,
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<LogEvent>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn count(&self, level: LogLevel) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.level == level)
            .count()
    }

    fn push(&self, level: LogLevel, operation: &str, message: String) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogEvent {
                level,
                operation: operation.to_owned(),
                message,
            });
    }
}

impl LogSink for MemorySink {
    fn warn(&self, operation: &str, message: &str) {
        self.push(LogLevel::Warn, operation, message.to_owned());
    }

    fn error(&self, operation: &str, error: &dyn Error) {
        self.push(LogLevel::Error, operation, error.to_string());
    }
}
