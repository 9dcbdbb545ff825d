use std::fmt;

use adocheck_utils::error::{ErrorCategory, UserFriendlyError};
use thiserror::Error;

/// One example that did not pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleFailure {
    pub line: usize,
    pub title: Option<String>,
    pub reason: String,
}

impl fmt::Display for ExampleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(f, "line {} ({title}): {}", self.line, self.reason),
            None => write!(f, "line {}: {}", self.line, self.reason),
        }
    }
}

fn render_failures(failures: &[ExampleFailure]) -> String {
    failures
        .iter()
        .map(|failure| format!("\n  - {failure}"))
        .collect()
}

fn summarize(failures: &[ExampleFailure], total: &usize) -> String {
    format!(
        "{} of {total} examples failed{}",
        failures.len(),
        render_failures(failures)
    )
}

/// Why a file failed its doctests.
#[derive(Error, Debug)]
pub enum DoctestError {
    #[error("cannot read {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("{}", summarize(.failures, .total))]
    ExamplesFailed {
        path: String,
        total: usize,
        failures: Vec<ExampleFailure>,
    },
}

impl DoctestError {
    /// Failed examples, empty for an unreadable file.
    #[must_use]
    pub fn failures(&self) -> &[ExampleFailure] {
        match self {
            Self::Unreadable { .. } => &[],
            Self::ExamplesFailed { failures, .. } => failures,
        }
    }
}

impl UserFriendlyError for DoctestError {
    fn user_message(&self) -> String {
        match self {
            Self::Unreadable { path, .. } => format!("Could not read '{path}'"),
            Self::ExamplesFailed {
                path,
                total,
                failures,
            } => format!("{} of {total} examples in '{path}' failed", failures.len()),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Unreadable { reason, .. } => Some(reason.clone()),
            Self::ExamplesFailed { failures, .. } => Some(render_failures(failures).trim_start().to_string()),
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Unreadable { .. } => vec!["Check that the file exists and is readable".to_string()],
            Self::ExamplesFailed { .. } => vec![
                "Update the expected output, or use '...' to match lines that vary".to_string(),
                "Mark examples that cannot run here with [source%skip,console]".to_string(),
            ],
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Unreadable { .. } => ErrorCategory::FileSystem,
            Self::ExamplesFailed { .. } => ErrorCategory::Doctest,
        }
    }
}
