use adocheck_utils::error::ConfigError;
use globset::Glob;

use super::model::Config;

impl Config {
    /// Reject values that would make the tools misbehave later.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.program.trim().is_empty() {
            return Err(invalid("backend.program", "must not be empty"));
        }
        if self.backend.backend.trim().is_empty() {
            return Err(invalid("backend.backend", "must not be empty"));
        }
        if self.backend.timeout_secs == 0 {
            return Err(invalid("backend.timeout_secs", "0"));
        }
        if self.doctest.timeout_secs == 0 {
            return Err(invalid("doctest.timeout_secs", "0"));
        }
        if self.doctest.console_languages.is_empty() {
            return Err(invalid("doctest.console_languages", "must not be empty"));
        }

        Glob::new(&self.doctest.include)
            .map_err(|e| invalid("doctest.include", &format!("{}: {e}", self.doctest.include)))?;
        for pattern in &self.doctest.exclude {
            Glob::new(pattern)
                .map_err(|e| invalid("doctest.exclude", &format!("{pattern}: {e}")))?;
        }

        for name in self.backend.attributes.keys() {
            if name.is_empty() || name.contains('=') || name.contains(char::is_whitespace) {
                return Err(invalid("backend.attributes", name));
            }
        }

        Ok(())
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
