//! End-to-end tests for the `adoc-validate` binary against a stub processor
#![cfg(unix)]

mod support;

use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;

use support::Workspace;

#[test]
fn test_missing_argument_prints_usage() {
    let ws = Workspace::new();

    ws.validate()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage: adoc-validate <file>"))
        .stdout(predicate::str::is_empty());

    assert!(ws.stub_calls().is_empty(), "nothing should be converted");
}

#[test]
fn test_help_and_version_exit_zero() {
    let ws = Workspace::new();

    ws.validate()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("adoc-validate"));

    ws.validate()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("adoc-validate"));
}

#[test]
fn test_unknown_flag_exits_one() {
    let ws = Workspace::new();
    ws.validate().arg("--no-such-flag").assert().code(1);
}

#[test]
fn test_clean_document_exits_zero_silently() {
    let ws = Workspace::new();
    ws.write("guide.adoc", "= Guide\n\nNothing to see here.\n");

    ws.validate()
        .arg("guide.adoc")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_runs_secure_with_warn_failure_level() {
    let ws = Workspace::new();
    ws.write("guide.adoc", "= Guide\n");

    ws.validate().arg("guide.adoc").assert().success();

    let calls = ws.stub_calls();
    let conversion = calls
        .iter()
        .find(|call| call.ends_with("guide.adoc"))
        .expect("stub converted the document");
    assert!(conversion.contains("--safe-mode secure"), "{conversion}");
    assert!(conversion.contains("--failure-level WARN"), "{conversion}");
}

#[test]
fn test_info_records_do_not_fail() {
    let ws = Workspace::new();
    ws.write("guide.adoc", "= Guide\n\nSTUB-INFO\n");

    ws.validate()
        .arg("guide.adoc")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_warning_is_printed_and_fails() {
    let ws = Workspace::new();
    ws.write("guide.adoc", "= Guide\n\nSTUB-WARN\n");

    ws.validate()
        .arg("guide.adoc")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("WARNING: "))
        .stderr(predicate::str::contains("line 2: stub warning"));
}

#[test]
fn test_every_finding_is_printed_in_order() {
    let ws = Workspace::new();
    ws.write("guide.adoc", "STUB-INFO STUB-WARN STUB-ERROR\n");

    let output = ws.validate().arg("guide.adoc").output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8(output.stderr).unwrap();
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines.len(), 2, "{stderr}");
    assert!(lines[0].starts_with("WARNING: "), "{stderr}");
    assert!(lines[1].starts_with("ERROR: "), "{stderr}");
    assert!(!stderr.contains("stub info"));
}

#[test]
fn test_processor_failure_is_fatal() {
    let ws = Workspace::new();
    ws.write("guide.adoc", "STUB-CRASH\n");

    ws.validate()
        .arg("guide.adoc")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("FATAL: "))
        .stderr(predicate::str::contains("stub crash"));
}

#[test]
fn test_missing_input_is_fatal() {
    let ws = Workspace::new();

    ws.validate()
        .arg("absent.adoc")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("FATAL: Input file not found"));
}

#[test]
fn test_unavailable_backend_fails_before_converting() {
    let ws = Workspace::new();
    ws.write_config("[backend]\nprogram = \"/nonexistent/adocheck/asciidoctor\"\n");
    ws.write("guide.adoc", "= Guide\n");

    ws.validate()
        .arg("guide.adoc")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("could not be loaded"));
}

#[test]
fn test_explicit_config_path() {
    let ws = Workspace::new();
    ws.write_config("[backend]\nprogram = \"/nonexistent/adocheck/asciidoctor\"\n");
    ws.write(
        "alt.toml",
        &format!("[backend]\nprogram = \"{}\"\n", ws.stub().display()),
    );
    ws.write("guide.adoc", "= Guide\n");

    ws.validate()
        .args(["--config", "alt.toml", "guide.adoc"])
        .assert()
        .success();
}

#[test]
fn test_invalid_config_is_reported() {
    let ws = Workspace::new();
    ws.write_config("[backend\nprogram = \n");
    ws.write("guide.adoc", "= Guide\n");

    ws.validate()
        .arg("guide.adoc")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config.toml"));
}
