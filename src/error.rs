//! Umbrella error for the CLI layer

use adocheck_convert::ConvertError;
use adocheck_doctest::DoctestError;
use adocheck_runner::RunnerError;
use adocheck_utils::ExitCode;
use adocheck_utils::error::{ConfigError, ErrorCategory, UserFriendlyError, render_for_user};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdocheckError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Doctest(#[from] DoctestError),

    #[error(transparent)]
    Runner(#[from] RunnerError),

    #[error("Could not scan {root} for documents: {reason}")]
    Selection { root: String, reason: String },
}

impl AdocheckError {
    /// Every failure exits 1; the tools have no finer-grained codes.
    #[must_use]
    pub fn to_exit_code(&self) -> ExitCode {
        match self {
            Self::Config(_)
            | Self::Convert(_)
            | Self::Doctest(_)
            | Self::Runner(_)
            | Self::Selection { .. } => ExitCode::FAILURE,
        }
    }

    /// Multi-line report with context and suggestions, for stderr.
    #[must_use]
    pub fn display_for_user(&self) -> String {
        render_for_user(self)
    }
}

impl UserFriendlyError for AdocheckError {
    fn user_message(&self) -> String {
        match self {
            Self::Config(e) => e.user_message(),
            Self::Convert(e) => e.user_message(),
            Self::Doctest(e) => e.user_message(),
            Self::Runner(e) => e.to_string(),
            Self::Selection { root, .. } => format!("Could not scan '{root}' for documents"),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Config(e) => e.context(),
            Self::Convert(e) => e.context(),
            Self::Doctest(e) => e.context(),
            Self::Runner(_) => None,
            Self::Selection { reason, .. } => Some(reason.clone()),
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Config(e) => e.suggestions(),
            Self::Convert(e) => e.suggestions(),
            Self::Doctest(e) => e.suggestions(),
            Self::Runner(_) => Vec::new(),
            Self::Selection { .. } => {
                vec!["Pass the files to test explicitly".to_string()]
            }
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(e) => e.category(),
            Self::Convert(e) => e.category(),
            Self::Doctest(e) => e.category(),
            Self::Runner(_) => ErrorCategory::Backend,
            Self::Selection { .. } => ErrorCategory::FileSystem,
        }
    }
}
