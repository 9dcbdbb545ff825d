use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use adocheck_config::BackendConfig;
use adocheck_utils::Severity;

/// Processor safe mode, least to most restrictive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SafeMode {
    Unsafe,
    Safe,
    Server,
    Secure,
}

impl SafeMode {
    #[must_use]
    pub const fn as_arg(self) -> &'static str {
        match self {
            Self::Unsafe => "unsafe",
            Self::Safe => "safe",
            Self::Server => "server",
            Self::Secure => "secure",
        }
    }
}

impl fmt::Display for SafeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

/// How a single conversion is run.
///
/// ```rust
/// use adocheck_config::BackendConfig;
/// use adocheck_convert::{ConvertOptions, SafeMode};
/// use adocheck_utils::Severity;
///
/// let options = ConvertOptions::for_validation(&BackendConfig::default());
/// assert_eq!(options.safe_mode, SafeMode::Secure);
/// assert_eq!(options.failure_level, Some(Severity::Warn));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    pub safe_mode: SafeMode,
    /// Processor exits non-zero once a diagnostic at this level is logged
    pub failure_level: Option<Severity>,
    pub backend: String,
    pub attributes: BTreeMap<String, String>,
    /// Render without header and footer
    pub embedded: bool,
    pub timeout: Duration,
}

impl ConvertOptions {
    /// Options from configuration, secure mode, no failure level.
    #[must_use]
    pub fn from_backend_config(config: &BackendConfig) -> Self {
        Self {
            safe_mode: SafeMode::Secure,
            failure_level: None,
            backend: config.backend.clone(),
            attributes: config.attributes.clone(),
            embedded: false,
            timeout: config.timeout(),
        }
    }

    /// Sandboxed conversion that treats warnings as failures.
    #[must_use]
    pub fn for_validation(config: &BackendConfig) -> Self {
        Self::from_backend_config(config)
            .safe_mode(SafeMode::Secure)
            .failure_level(Severity::Warn)
    }

    #[must_use]
    pub fn safe_mode(mut self, mode: SafeMode) -> Self {
        self.safe_mode = mode;
        self
    }

    #[must_use]
    pub fn failure_level(mut self, level: Severity) -> Self {
        self.failure_level = Some(level);
        self
    }

    #[must_use]
    pub fn embedded(mut self, embedded: bool) -> Self {
        self.embedded = embedded;
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
