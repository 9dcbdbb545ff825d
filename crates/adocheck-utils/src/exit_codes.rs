//! Exit codes for the adocheck binaries.
//!
//! # Exit Code Table
//!
//! | Code | Constant | Description |
//! |------|----------|-------------|
//! | 0 | `SUCCESS` | Clean validation / every doctest file passed |
//! | 1 | `FAILURE` | Usage error, backend unavailable, diagnostics found, conversion exception, or doctest failures |
//!
//! Both tools report every failure mode with the same code; the reason is
//! printed to the user, not encoded in the status.

/// Process exit code.
///
/// ```rust
/// use adocheck_utils::ExitCode;
///
/// assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
/// assert_eq!(ExitCode::from_failure_count(0), ExitCode::SUCCESS);
/// assert_eq!(ExitCode::from_failure_count(3), ExitCode::FAILURE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Success - nothing to report
    pub const SUCCESS: ExitCode = ExitCode(0);

    /// Failure - any usage, backend, validation or doctest failure
    pub const FAILURE: ExitCode = ExitCode(1);

    /// Get the numeric exit code value for `std::process::exit()`.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// `FAILURE` when any failure was counted, `SUCCESS` otherwise.
    #[must_use]
    pub const fn from_failure_count(failures: usize) -> Self {
        if failures > 0 {
            Self::FAILURE
        } else {
            Self::SUCCESS
        }
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}
