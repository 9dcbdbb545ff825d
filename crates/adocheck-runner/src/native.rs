use crate::error::RunnerError;
use std::process::Stdio;
use std::time::Duration;

use super::{CommandSpec, ProcessOutput, ProcessRunner};

/// Native process runner using `std::process::Command`.
///
/// Stdin is closed, stdout and stderr are captured. Timeouts are enforced
/// with a waiter thread; on expiry the child and its process group are killed.
///
/// # Example
///
/// ```rust,no_run
/// use adocheck_runner::{CommandSpec, NativeRunner, ProcessRunner};
/// use std::time::Duration;
///
/// let runner = NativeRunner::new();
/// let cmd = CommandSpec::new("asciidoctor").arg("--version");
/// let output = runner.run(&cmd, Duration::from_secs(30)).unwrap();
/// assert!(output.success());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRunner;

impl NativeRunner {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// How long a killed process may take to release its pipes before the
/// waiter thread is abandoned.
const KILL_GRACE: Duration = Duration::from_millis(500);

impl ProcessRunner for NativeRunner {
    fn run(&self, cmd: &CommandSpec, timeout: Duration) -> Result<ProcessOutput, RunnerError> {
        use std::sync::mpsc;
        use std::thread;

        tracing::debug!(command = %cmd, timeout = ?timeout, "spawning process");

        let mut command = cmd.to_command();
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        // Own process group, so a timeout also reaches anything the command forks.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let child = command.spawn().map_err(|e| RunnerError::SpawnFailed {
            program: cmd.program_name(),
            reason: e.to_string(),
        })?;

        let (tx, rx) = mpsc::channel();
        let child_id = child.id();

        let handle = thread::spawn(move || {
            let output = child.wait_with_output();
            let _ = tx.send(output);
        });

        match rx.recv_timeout(timeout) {
            Ok(output_result) => {
                let _ = handle.join();

                let output = output_result.map_err(|e| RunnerError::NativeExecutionFailed {
                    reason: format!("Failed to wait for process: {e}"),
                })?;

                tracing::debug!(
                    command = %cmd,
                    exit_code = ?output.status.code(),
                    "process finished"
                );

                Ok(ProcessOutput::new(
                    output.stdout,
                    output.stderr,
                    output.status.code(),
                ))
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                Self::terminate_process(child_id);

                // A descendant outside the group can still hold the pipes open;
                // the waiter is detached rather than joined in that case.
                if rx.recv_timeout(KILL_GRACE).is_ok() {
                    let _ = handle.join();
                } else {
                    tracing::debug!(command = %cmd, "pipes still open after kill, detaching waiter");
                }

                tracing::warn!(command = %cmd, "process timed out and was killed");
                Err(RunnerError::Timeout {
                    program: cmd.program_name(),
                    timeout,
                })
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(RunnerError::NativeExecutionFailed {
                reason: "Process monitoring thread terminated unexpectedly".to_string(),
            }),
        }
    }
}

impl NativeRunner {
    /// Terminate a process and, on Unix, the process group it leads.
    ///
    /// On Unix, sends SIGKILL to the group.
    /// On Windows, uses TerminateProcess on the child.
    fn terminate_process(pid: u32) {
        #[cfg(unix)]
        {
            let Ok(pgid) = i32::try_from(pid) else {
                tracing::warn!(pid, "process id out of range, not killed");
                return;
            };
            // SAFETY: kill(2) on the group led by a child we spawned with
            // process_group(0); a group that already exited only yields ESRCH.
            unsafe {
                libc::kill(-pgid, libc::SIGKILL);
            }
        }

        #[cfg(windows)]
        {
            use windows::Win32::Foundation::CloseHandle;
            use windows::Win32::System::Threading::{
                OpenProcess, PROCESS_TERMINATE, TerminateProcess,
            };

            // SAFETY: handle is checked by OpenProcess and closed right after use.
            unsafe {
                if let Ok(handle) = OpenProcess(PROCESS_TERMINATE, false, pid) {
                    let _ = TerminateProcess(handle, 1);
                    let _ = CloseHandle(handle);
                }
            }
        }

        #[cfg(not(any(unix, windows)))]
        {
            let _ = pid;
        }
    }
}
