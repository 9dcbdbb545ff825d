use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PROGRAM: &str = "asciidoctor";
pub const DEFAULT_BACKEND: &str = "html5";
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_INCLUDE: &str = "**/*.adoc";
pub const DEFAULT_DOCTEST_TIMEOUT_SECS: u64 = 30;

/// Where a configuration value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Defaults,
    ConfigFile(PathBuf),
    Cli,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Defaults => write!(f, "defaults"),
            Self::ConfigFile(path) => write!(f, "config file ({})", path.display()),
            Self::Cli => write!(f, "CLI"),
        }
    }
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Explicit config file; disables discovery
    pub config_path: Option<PathBuf>,
    pub verbose: bool,
}

/// The external AsciiDoc processor and how to invoke it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Executable name (resolved on PATH) or path
    pub program: String,
    /// Output backend passed as `--backend`
    pub backend: String,
    pub timeout_secs: u64,
    /// Document attributes passed as `-a name=value`
    pub attributes: BTreeMap<String, String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            backend: DEFAULT_BACKEND.to_string(),
            timeout_secs: DEFAULT_BACKEND_TIMEOUT_SECS,
            attributes: BTreeMap::new(),
        }
    }
}

impl BackendConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Doctest file selection and example execution settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctestConfig {
    /// Glob selecting files when no paths are given
    pub include: String,
    pub exclude: Vec<String>,
    /// Source languages treated as console transcripts
    pub console_languages: Vec<String>,
    /// Per-command timeout
    pub timeout_secs: u64,
}

impl Default for DoctestConfig {
    fn default() -> Self {
        Self {
            include: DEFAULT_INCLUDE.to_string(),
            exclude: vec![
                "**/node_modules/**".to_string(),
                "**/target/**".to_string(),
                "**/.git/**".to_string(),
            ],
            console_languages: vec!["console".to_string(), "shell-session".to_string()],
            timeout_secs: DEFAULT_DOCTEST_TIMEOUT_SECS,
        }
    }
}

impl DoctestConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Effective configuration after applying precedence.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub backend: BackendConfig,
    pub doctest: DoctestConfig,
    pub verbose: bool,
    /// File the values were loaded from, if any
    pub config_file: Option<PathBuf>,
    /// Source of each key that was set, for `--verbose` reporting
    pub source_attribution: HashMap<String, ConfigSource>,
}

/// On-disk TOML layout. Every key is optional so partial files merge over defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TomlConfig {
    pub backend: Option<TomlBackend>,
    pub doctest: Option<TomlDoctest>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TomlBackend {
    pub program: Option<String>,
    pub backend: Option<String>,
    pub timeout_secs: Option<u64>,
    pub attributes: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TomlDoctest {
    pub include: Option<String>,
    pub exclude: Option<Vec<String>>,
    pub console_languages: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
}
