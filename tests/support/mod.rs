//! Shared fixtures for the CLI integration tests
//!
//! Each test gets a temporary workspace holding a stub `asciidoctor` script and
//! a `.adocheck/config.toml` pointing at it. The stub decides what to log from
//! markers in the input:
//!
//! | Marker | Stub behaviour |
//! |--------|----------------|
//! | `STUB-INFO` | logs an INFO record |
//! | `STUB-WARN` | logs a WARNING record and exits 1 |
//! | `STUB-ERROR` | logs an ERROR record and exits 1 |
//! | `STUB-CRASH` | reports FAILED and exits 1 |
//!
//! Otherwise it prints the input wrapped in a paragraph.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempDir;

pub const STUB_LOG_ENV: &str = "ADOCHECK_STUB_LOG";

const STUB_SCRIPT: &str = r#"#!/bin/sh
if [ -n "$ADOCHECK_STUB_LOG" ]; then
  printf '%s\n' "$*" >> "$ADOCHECK_STUB_LOG"
fi
if [ "$1" = "--version" ]; then
  echo "Asciidoctor 2.0.23 [https://asciidoctor.org]"
  exit 0
fi
for arg in "$@"; do input="$arg"; done
content=$(cat "$input")
case "$content" in
  *STUB-CRASH*)
    echo "asciidoctor: FAILED: $input: Failed to load AsciiDoc document - stub crash" >&2
    echo "  Use --trace to show backtrace" >&2
    exit 1 ;;
esac
status=0
case "$content" in
  *STUB-INFO*) echo "asciidoctor: INFO: $input: line 1: stub info" >&2 ;;
esac
case "$content" in
  *STUB-WARN*) echo "asciidoctor: WARNING: $input: line 2: stub warning" >&2; status=1 ;;
esac
case "$content" in
  *STUB-ERROR*) echo "asciidoctor: ERROR: $input: line 3: stub error" >&2; status=1 ;;
esac
printf '<div class="paragraph"><p>%s</p></div>\n' "$content"
exit $status
"#;

pub struct Workspace {
    dir: TempDir,
    stub: PathBuf,
}

impl Workspace {
    /// Workspace with the stub processor configured.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        // Keep config discovery from walking above the workspace.
        fs::create_dir(dir.path().join(".git")).expect("create .git");

        let stub = dir.path().join("bin").join("asciidoctor-stub");
        fs::create_dir_all(stub.parent().expect("stub has parent")).expect("create bin");
        fs::write(&stub, STUB_SCRIPT).expect("write stub");
        fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).expect("chmod stub");

        let workspace = Self { dir, stub };
        workspace.write_config(&format!(
            "[backend]\nprogram = \"{}\"\ntimeout_secs = 30\n",
            workspace.stub.display()
        ));
        workspace
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn stub(&self) -> &Path {
        &self.stub
    }

    pub fn write_config(&self, body: &str) {
        let config_dir = self.path().join(".adocheck");
        fs::create_dir_all(&config_dir).expect("create config dir");
        fs::write(config_dir.join("config.toml"), body).expect("write config");
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(&path, content).expect("write document");
        path
    }

    pub fn stub_log(&self) -> PathBuf {
        self.path().join("stub-calls.log")
    }

    /// Every argv the stub was called with, one line per call.
    pub fn stub_calls(&self) -> Vec<String> {
        fs::read_to_string(self.stub_log())
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Command {
        self.command(assert_cmd::cargo::cargo_bin!("adoc-validate"))
    }

    pub fn doctest(&self) -> Command {
        self.command(assert_cmd::cargo::cargo_bin!("adoc-doctest"))
    }

    fn command(&self, program: &Path) -> Command {
        let mut cmd = Command::new(program);
        cmd.current_dir(self.path())
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .env(STUB_LOG_ENV, self.stub_log())
            .stdin(Stdio::null());
        cmd
    }
}
