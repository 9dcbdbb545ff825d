use std::fmt;
use thiserror::Error;

/// Trait for providing user-friendly error reporting with context and suggestions
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get contextual information about the error
    fn context(&self) -> Option<String>;

    /// Get suggested actions to resolve the error
    fn suggestions(&self) -> Vec<String>;

    /// Get the error category for grouping similar errors
    fn category(&self) -> ErrorCategory;
}

/// Categories of errors for better organization and handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Backend,
    Conversion,
    Doctest,
    FileSystem,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Backend => write!(f, "Backend"),
            Self::Conversion => write!(f, "Conversion"),
            Self::Doctest => write!(f, "Doctest"),
            Self::FileSystem => write!(f, "File System"),
        }
    }
}

/// Render an error as a multi-line report: message, context, suggestions.
#[must_use]
pub fn render_for_user(err: &dyn UserFriendlyError) -> String {
    let mut output = format!("Error: {}\n", err.user_message());

    if let Some(ctx) = err.context() {
        output.push_str(&format!("\nContext: {ctx}\n"));
    }

    let suggestions = err.suggestions();
    if !suggestions.is_empty() {
        output.push_str("\nSuggestions:\n");
        for suggestion in suggestions {
            output.push_str(&format!("  • {suggestion}\n"));
        }
    }

    output
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration file {path}: {reason}")]
    InvalidFile { path: String, reason: String },

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found at {path}")]
    NotFound { path: String },

    #[error("Configuration discovery failed: {reason}")]
    DiscoveryFailed { reason: String },
}

impl UserFriendlyError for ConfigError {
    fn user_message(&self) -> String {
        match self {
            Self::InvalidFile { path, reason } => {
                format!("Configuration file {path} has invalid format: {reason}")
            }
            Self::InvalidValue { key, value } => {
                format!("Configuration '{key}' has invalid value: {value}")
            }
            Self::NotFound { path } => format!("Configuration file not found: {path}"),
            Self::DiscoveryFailed { reason } => {
                format!("Failed to discover configuration: {reason}")
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::InvalidFile { .. } => Some(
                "Configuration files are TOML with optional [backend] and [doctest] sections."
                    .to_string(),
            ),
            Self::NotFound { .. } | Self::DiscoveryFailed { .. } => Some(
                "adocheck searches for .adocheck/config.toml starting from the current directory upward."
                    .to_string(),
            ),
            Self::InvalidValue { .. } => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidFile { .. } => vec![
                "Check the TOML syntax of the configuration file".to_string(),
                "Remove unknown keys; only [backend] and [doctest] are read".to_string(),
            ],
            Self::InvalidValue { key, .. } => match key.as_str() {
                "backend.timeout_secs" | "doctest.timeout_secs" => {
                    vec!["Use a positive number of seconds".to_string()]
                }
                "doctest.include" | "doctest.exclude" => {
                    vec!["Use glob syntax such as '**/*.adoc'".to_string()]
                }
                _ => vec!["Remove the option to use the default value".to_string()],
            },
            Self::NotFound { .. } => vec![
                "Pass an existing file to --config".to_string(),
                "Omit --config to use discovery and defaults".to_string(),
            ],
            Self::DiscoveryFailed { .. } => vec![
                "Check read permissions on the current directory and its parents".to_string(),
            ],
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Configuration
    }
}
