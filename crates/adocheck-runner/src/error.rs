//! Error types for runner module

use std::time::Duration;
use thiserror::Error;

/// Process execution errors
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Failed to spawn '{program}': {reason}")]
    SpawnFailed { program: String, reason: String },

    #[error("Native execution failed: {reason}")]
    NativeExecutionFailed { reason: String },

    #[error("Execution of '{program}' timed out after {timeout:?}")]
    Timeout { program: String, timeout: Duration },
}

impl RunnerError {
    /// True when the program could not be started at all (missing binary, permissions)
    #[must_use]
    pub fn is_spawn_failure(&self) -> bool {
        matches!(self, Self::SpawnFailed { .. })
    }
}
