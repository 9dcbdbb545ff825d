use adocheck_runner::RunnerError;
use adocheck_utils::error::{ErrorCategory, UserFriendlyError};
use thiserror::Error;

/// Failures that stop a conversion outright.
///
/// Diagnostics inside the document are not errors; they go to the sink.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("AsciiDoc processor '{program}' is unavailable: {reason}")]
    BackendUnavailable { program: String, reason: String },

    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("{message}")]
    Exception { message: String },

    #[error("Processor exited with {status} without reporting a diagnostic")]
    AbnormalExit { status: String, stderr_tail: String },

    #[error("Could not stage snippet for conversion: {reason}")]
    Staging { reason: String },

    #[error(transparent)]
    Runner(#[from] RunnerError),
}

impl ConvertError {
    /// Message printed after `FATAL: ` by the validator.
    #[must_use]
    pub fn fatal_message(&self) -> String {
        match self {
            Self::AbnormalExit {
                status,
                stderr_tail,
            } if !stderr_tail.is_empty() => {
                format!("processor exited with {status}: {stderr_tail}")
            }
            other => other.to_string(),
        }
    }
}

impl UserFriendlyError for ConvertError {
    fn user_message(&self) -> String {
        match self {
            Self::BackendUnavailable { program, .. } => {
                format!("The AsciiDoc processor '{program}' could not be loaded")
            }
            Self::InputNotFound { path } => format!("Input file '{path}' does not exist"),
            Self::Exception { message } => format!("Conversion raised: {message}"),
            Self::AbnormalExit { status, .. } => format!("Processor exited with {status}"),
            Self::Staging { reason } => format!("Could not write temporary input: {reason}"),
            Self::Runner(err) => match err {
                RunnerError::Timeout { timeout, .. } => {
                    format!("Conversion timed out after {timeout:?}")
                }
                other => other.to_string(),
            },
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::BackendUnavailable { reason, .. } => Some(reason.clone()),
            Self::AbnormalExit { stderr_tail, .. } if !stderr_tail.is_empty() => {
                Some(stderr_tail.clone())
            }
            Self::Runner(RunnerError::Timeout { program, .. }) => {
                Some(format!("'{program}' was terminated"))
            }
            _ => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::BackendUnavailable { .. } => vec![
                "Install Asciidoctor (gem install asciidoctor) and make sure it is on PATH".to_string(),
                "Or set [backend] program in .adocheck/config.toml".to_string(),
            ],
            Self::InputNotFound { .. } => vec!["Check the path passed on the command line".to_string()],
            Self::Runner(RunnerError::Timeout { .. }) => {
                vec!["Raise [backend] timeout_secs in .adocheck/config.toml".to_string()]
            }
            _ => Vec::new(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::BackendUnavailable { .. } => ErrorCategory::Backend,
            Self::InputNotFound { .. } | Self::Staging { .. } => ErrorCategory::FileSystem,
            Self::Exception { .. } | Self::AbnormalExit { .. } | Self::Runner(_) => {
                ErrorCategory::Conversion
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exception_message_is_verbatim() {
        let err = ConvertError::Exception {
            message: "doc.adoc: Failed to load AsciiDoc document".to_string(),
        };
        assert_eq!(err.fatal_message(), "doc.adoc: Failed to load AsciiDoc document");
        assert_eq!(err.category(), ErrorCategory::Conversion);
    }

    #[test]
    fn test_abnormal_exit_includes_stderr_tail() {
        let err = ConvertError::AbnormalExit {
            status: "exit code 3".to_string(),
            stderr_tail: "segfault".to_string(),
        };
        assert_eq!(err.fatal_message(), "processor exited with exit code 3: segfault");
        assert_eq!(err.context().as_deref(), Some("segfault"));
    }

    #[test]
    fn test_backend_unavailable_has_suggestions() {
        let err = ConvertError::BackendUnavailable {
            program: "asciidoctor".to_string(),
            reason: "not found on PATH".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Backend);
        assert!(!err.suggestions().is_empty());
        assert!(err.user_message().contains("asciidoctor"));
    }

    #[test]
    fn test_timeout_is_a_conversion_error() {
        let err = ConvertError::from(RunnerError::Timeout {
            program: "asciidoctor".to_string(),
            timeout: std::time::Duration::from_millis(1500),
        });
        assert_eq!(err.category(), ErrorCategory::Conversion);
        assert_eq!(err.user_message(), "Conversion timed out after 1.5s");
    }
}
