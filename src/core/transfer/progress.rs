//! Progress reporting seam between the orchestrator and the presentation layer

use crate::domain::Account;
use std::fmt;

/// How a progress message should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(label)
    }
}

/// Receives the orchestrator's progress messages
pub trait ProgressSink: Send + Sync {
    fn log(&self, message: &str, severity: Severity);

    /// Called after a bulk operation with the updated account list
    fn refresh(&self, _accounts: &[Account]) {}
}

/// Sink that only forwards to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn log(&self, message: &str, severity: Severity) {
        trace_message(message, severity);
    }
}

/// Forwards messages to a sink and keeps a copy of every line
pub struct ProgressLog<'a> {
    sink: &'a dyn ProgressSink,
    lines: Vec<String>,
}

impl<'a> ProgressLog<'a> {
    pub fn new(sink: &'a dyn ProgressSink) -> Self {
        Self {
            sink,
            lines: Vec::new(),
        }
    }

    pub fn emit(&mut self, message: impl Into<String>, severity: Severity) {
        let message = message.into();
        self.sink.log(&message, severity);
        self.lines.push(message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.emit(message, Severity::Info);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.emit(message, Severity::Warning);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.emit(message, Severity::Error);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// Emits a progress message as a tracing event at the matching level
pub fn trace_message(message: &str, severity: Severity) {
    match severity {
        Severity::Info | Severity::Success => tracing::info!(severity = %severity, "{message}"),
        Severity::Warning => tracing::warn!("{message}"),
        Severity::Error => tracing::error!("{message}"),
    }
}
