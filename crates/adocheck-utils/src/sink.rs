//! Diagnostic sinks
//!
//! The converter never prints processor messages itself. Callers inject a
//! [`DiagnosticSink`] and decide afterwards what to show and how to exit.

use crate::types::{Diagnostic, Severity};

/// Receiver for diagnostics produced during a conversion pass.
pub trait DiagnosticSink {
    /// Record one diagnostic.
    fn record(&mut self, severity: Severity, message: &str);
}

/// Sink that keeps every record, in arrival order.
///
/// ```rust
/// use adocheck_utils::{DiagnosticSink, MemoryLogger, Severity};
///
/// let mut logger = MemoryLogger::new();
/// logger.record(Severity::Info, "skipping unknown attribute");
/// logger.record(Severity::Warn, "line 4: list item index out of sequence");
///
/// assert_eq!(logger.len(), 2);
/// assert_eq!(logger.max_severity(), Some(Severity::Warn));
/// assert_eq!(logger.at_or_above(Severity::Warn).count(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryLogger {
    records: Vec<Diagnostic>,
}

impl MemoryLogger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in arrival order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.records
    }

    /// Records whose severity is `threshold` or higher, in arrival order.
    pub fn at_or_above(&self, threshold: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter().filter(move |d| d.severity >= threshold)
    }

    #[must_use]
    pub fn has_at_least(&self, threshold: Severity) -> bool {
        self.records.iter().any(|d| d.severity >= threshold)
    }

    #[must_use]
    pub fn max_severity(&self) -> Option<Severity> {
        self.records.iter().map(|d| d.severity).max()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl DiagnosticSink for MemoryLogger {
    fn record(&mut self, severity: Severity, message: &str) {
        self.records.push(Diagnostic::new(severity, message));
    }
}

/// Sink that forwards each record to `tracing` at the matching level.
///
/// `source` is attached as a field so events can be attributed to the
/// document or example that produced them.
#[derive(Debug, Clone)]
pub struct TracingSink {
    source: String,
}

impl TracingSink {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl DiagnosticSink for TracingSink {
    fn record(&mut self, severity: Severity, message: &str) {
        let source = self.source.as_str();
        match severity {
            Severity::Debug => tracing::debug!(source, "{message}"),
            Severity::Info => tracing::info!(source, "{message}"),
            Severity::Warn => tracing::warn!(source, "{message}"),
            Severity::Error | Severity::Fatal => tracing::error!(source, severity = %severity, "{message}"),
        }
    }
}
