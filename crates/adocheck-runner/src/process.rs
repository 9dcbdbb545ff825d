use crate::error::RunnerError;
use std::time::Duration;

use super::CommandSpec;

/// Output from a process execution.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Standard output from the process
    pub stdout: Vec<u8>,
    /// Standard error from the process
    pub stderr: Vec<u8>,
    /// Exit code from the process (None if terminated by signal)
    pub exit_code: Option<i32>,
}

impl ProcessOutput {
    #[must_use]
    pub fn new(stdout: Vec<u8>, stderr: Vec<u8>, exit_code: Option<i32>) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
        }
    }

    /// Get stdout as a UTF-8 string, lossy conversion.
    #[must_use]
    pub fn stdout_string(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    /// Get stderr as a UTF-8 string, lossy conversion.
    #[must_use]
    pub fn stderr_string(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }

    /// Check if the process exited successfully (exit code 0).
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Trait for process execution.
///
/// Implementations MUST use argv-style APIs only (no shell string evaluation).
/// The converter and the doctest runner take a `&dyn ProcessRunner` so tests can
/// substitute canned output for the real processor.
///
/// # Example
///
/// ```rust
/// use adocheck_runner::{CommandSpec, ProcessOutput, ProcessRunner, RunnerError};
/// use std::time::Duration;
///
/// struct Canned;
///
/// impl ProcessRunner for Canned {
///     fn run(&self, _cmd: &CommandSpec, _timeout: Duration) -> Result<ProcessOutput, RunnerError> {
///         Ok(ProcessOutput::new(b"ok\n".to_vec(), Vec::new(), Some(0)))
///     }
/// }
///
/// let out = Canned.run(&CommandSpec::new("anything"), Duration::from_secs(1)).unwrap();
/// assert!(out.success());
/// ```
pub trait ProcessRunner {
    /// Execute a command with the given timeout.
    ///
    /// * `Ok(ProcessOutput)` - the process completed (possibly with non-zero exit code)
    /// * `Err(RunnerError::Timeout)` - the process timed out and was killed
    /// * `Err(RunnerError::SpawnFailed)` - the program could not be started
    fn run(&self, cmd: &CommandSpec, timeout: Duration) -> Result<ProcessOutput, RunnerError>;
}
