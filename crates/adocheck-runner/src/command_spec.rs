use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

// ============================================================================
// CommandSpec - argv-style process specification
// ============================================================================

/// Specification for a command to execute.
///
/// All process execution goes through this type to ensure argv-style invocation.
/// Arguments are kept as discrete elements and never joined into a shell string.
///
/// # Example
///
/// ```rust
/// use adocheck_runner::CommandSpec;
/// use std::ffi::OsString;
///
/// let cmd = CommandSpec::new("asciidoctor")
///     .arg("--safe-mode")
///     .arg("secure")
///     .cwd("/path/to/docs");
///
/// assert_eq!(cmd.program, OsString::from("asciidoctor"));
/// assert_eq!(cmd.args.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandSpec {
    /// The program to execute
    pub program: OsString,
    /// Arguments as discrete elements (NOT shell strings)
    pub args: Vec<OsString>,
    /// Optional working directory
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Create a new `CommandSpec` with the given program.
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Build a spec from an already-split argv (program first).
    ///
    /// Returns `None` for an empty argv.
    ///
    /// ```rust
    /// use adocheck_runner::CommandSpec;
    ///
    /// let cmd = CommandSpec::from_argv(["echo", "hello world"]).unwrap();
    /// assert_eq!(cmd.args.len(), 1);
    /// assert!(CommandSpec::from_argv(Vec::<String>::new()).is_none());
    /// ```
    #[must_use]
    pub fn from_argv<I, S>(argv: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut iter = argv.into_iter();
        let program = iter.next()?;
        Some(Self::new(program).args(iter))
    }

    /// Add a single argument to the command.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments to the command.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory for the command.
    #[must_use]
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Program name for messages, lossy.
    #[must_use]
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Convert this `CommandSpec` into a `std::process::Command`.
    ///
    /// The resulting `Command` uses argv-style argument passing only.
    #[must_use]
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}
