use std::path::{Path, PathBuf};

use adocheck_utils::error::ConfigError;

use super::model::{CliArgs, Config, ConfigSource, TomlConfig};
use super::{CONFIG_DIR, CONFIG_FILE};

impl Config {
    /// Discover and load configuration with precedence: CLI > file > defaults
    ///
    /// Uses the current working directory for config file discovery when no
    /// explicit path is provided in `cli_args`.
    pub fn discover(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let start_dir = std::env::current_dir().map_err(|e| ConfigError::DiscoveryFailed {
            reason: format!("cannot read current directory: {e}"),
        })?;
        Self::discover_from(&start_dir, cli_args)
    }

    /// Discover and load configuration starting from a specific directory
    ///
    /// This is the path-driven variant used by tests to avoid process-global state.
    pub fn discover_from(start_dir: &Path, cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        for key in [
            "backend.program",
            "backend.backend",
            "backend.timeout_secs",
            "doctest.include",
            "doctest.exclude",
            "doctest.console_languages",
            "doctest.timeout_secs",
            "verbose",
        ] {
            config
                .source_attribution
                .insert(key.to_string(), ConfigSource::Defaults);
        }

        let config_path = match &cli_args.config_path {
            Some(explicit) => {
                if !explicit.is_file() {
                    return Err(ConfigError::NotFound {
                        path: explicit.display().to_string(),
                    });
                }
                Some(explicit.clone())
            }
            None => Self::discover_config_file_from(start_dir),
        };

        if let Some(path) = &config_path {
            let file_config = Self::load_config_file(path)?;
            config.apply_file(file_config, path);
            config.config_file = Some(path.clone());
            tracing::debug!(path = %path.display(), "loaded configuration file");
        }

        if cli_args.verbose {
            config.verbose = true;
            config
                .source_attribution
                .insert("verbose".to_string(), ConfigSource::Cli);
        }

        config.validate()?;
        Ok(config)
    }

    /// Search upward from `start_dir` for `.adocheck/config.toml`.
    ///
    /// Stops at the filesystem root or at a repository root marker.
    #[must_use]
    pub fn discover_config_file_from(start_dir: &Path) -> Option<PathBuf> {
        let mut current_dir = start_dir.to_path_buf();

        loop {
            let config_path = current_dir.join(CONFIG_DIR).join(CONFIG_FILE);
            if config_path.is_file() {
                return Some(config_path);
            }

            if current_dir.join(".git").exists()
                || current_dir.join(".hg").exists()
                || current_dir.join(".svn").exists()
            {
                return None;
            }

            match current_dir.parent() {
                Some(parent) => current_dir = parent.to_path_buf(),
                None => return None,
            }
        }
    }

    fn load_config_file(path: &Path) -> Result<TomlConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::InvalidFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::InvalidFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn apply_file(&mut self, file: TomlConfig, path: &Path) {
        let source = ConfigSource::ConfigFile(path.to_path_buf());
        let mark = |attribution: &mut std::collections::HashMap<String, ConfigSource>,
                        key: &str| {
            attribution.insert(key.to_string(), source.clone());
        };

        if let Some(backend) = file.backend {
            if let Some(program) = backend.program {
                self.backend.program = program;
                mark(&mut self.source_attribution, "backend.program");
            }
            if let Some(name) = backend.backend {
                self.backend.backend = name;
                mark(&mut self.source_attribution, "backend.backend");
            }
            if let Some(timeout) = backend.timeout_secs {
                self.backend.timeout_secs = timeout;
                mark(&mut self.source_attribution, "backend.timeout_secs");
            }
            if let Some(attributes) = backend.attributes {
                self.backend.attributes = attributes;
                mark(&mut self.source_attribution, "backend.attributes");
            }
        }

        if let Some(doctest) = file.doctest {
            if let Some(include) = doctest.include {
                self.doctest.include = include;
                mark(&mut self.source_attribution, "doctest.include");
            }
            if let Some(exclude) = doctest.exclude {
                self.doctest.exclude = exclude;
                mark(&mut self.source_attribution, "doctest.exclude");
            }
            if let Some(languages) = doctest.console_languages {
                self.doctest.console_languages = languages;
                mark(&mut self.source_attribution, "doctest.console_languages");
            }
            if let Some(timeout) = doctest.timeout_secs {
                self.doctest.timeout_secs = timeout;
                mark(&mut self.source_attribution, "doctest.timeout_secs");
            }
        }
    }
}
