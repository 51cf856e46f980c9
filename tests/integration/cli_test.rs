//! Integration tests for the docmirror binary
//!
//! `cat` stands in for jsdoc2md so the captured output is the source text itself.

#![cfg(unix)]

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::tempdir;

fn run_docmirror(cwd: &Path, args: &[&str]) -> (String, String, bool) {
    run_docmirror_with_env(cwd, args, &[])
}

fn run_docmirror_with_env(cwd: &Path, args: &[&str], envs: &[(&str, &str)]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_docmirror"))
        .current_dir(cwd)
        .args(args)
        .env_remove("RUST_LOG")
        .envs(envs.iter().copied())
        .env_remove("DOCMIRROR_SOURCE")
        .env_remove("DOCMIRROR_OUTPUT")
        .env_remove("DOCMIRROR_CONVERTER")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to run docmirror");

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    (stdout, stderr, output.status.success())
}

fn write_scenario(root: &Path) {
    fs::create_dir_all(root.join("src/sub")).unwrap();
    fs::write(root.join("src/a.js"), "/** a */").unwrap();
    fs::write(root.join("src/sub/b.js"), "/** b */").unwrap();
    fs::write(root.join("src/readme.txt"), "not a script").unwrap();
}

#[test]
fn test_default_layout_from_working_directory() {
    let tmp = tempdir().unwrap();
    write_scenario(tmp.path());

    let (stdout, stderr, success) = run_docmirror(tmp.path(), &["--converter", "cat", "--sort"]);

    assert!(success, "Command should succeed: stderr={}", stderr);
    assert_eq!(fs::read_to_string(tmp.path().join("docs/src/a.md")).unwrap(), "/** a */");
    assert_eq!(fs::read_to_string(tmp.path().join("docs/src/sub/b.md")).unwrap(), "/** b */");
    assert!(!tmp.path().join("docs/src/readme.md").exists());
    assert!(stdout.contains("✓ a.js -> docs/src/a.md"), "stdout: {}", stdout);
}

#[test]
fn test_rerun_overwrites_without_error() {
    let tmp = tempdir().unwrap();
    write_scenario(tmp.path());
    let args = ["--converter", "cat", "--quiet"];

    let (_, stderr, success) = run_docmirror(tmp.path(), &args);
    assert!(success, "first run failed: {}", stderr);

    fs::write(tmp.path().join("src/a.js"), "/** a, revised */").unwrap();
    let (stdout, stderr, success) = run_docmirror(tmp.path(), &args);

    assert!(success, "second run failed: {}", stderr);
    assert!(stdout.is_empty(), "quiet run printed: {}", stdout);
    assert_eq!(
        fs::read_to_string(tmp.path().join("docs/src/a.md")).unwrap(),
        "/** a, revised */"
    );
}

#[test]
fn test_blocked_destination_fails() {
    let tmp = tempdir().unwrap();
    write_scenario(tmp.path());
    fs::write(tmp.path().join("blocked"), "").unwrap();

    let (_, stderr, success) =
        run_docmirror(tmp.path(), &["src", "--output", "blocked/docs", "--converter", "cat"]);

    assert!(!success);
    assert!(stderr.contains("✗"), "stderr: {}", stderr);
    assert!(!tmp.path().join("blocked/docs").exists());
}

#[test]
fn test_abort_on_conversion_error() {
    let tmp = tempdir().unwrap();
    write_scenario(tmp.path());

    let (_, stderr, success) = run_docmirror(
        tmp.path(),
        &["--converter", "false", "--on-conversion-error", "abort"],
    );

    assert!(!success);
    assert!(stderr.contains("exited with status 1"), "stderr: {}", stderr);
}

#[test]
fn test_warn_on_conversion_error_keeps_going() {
    let tmp = tempdir().unwrap();
    write_scenario(tmp.path());

    let (_, stderr, success) = run_docmirror(tmp.path(), &["--converter", "false"]);

    assert!(success, "warn policy should not fail the run: {}", stderr);
    assert!(stderr.contains("⚠"), "stderr: {}", stderr);
    assert!(tmp.path().join("docs/src/sub/b.md").exists());
}

#[test]
fn test_ignore_on_conversion_error_is_silent() {
    let tmp = tempdir().unwrap();
    write_scenario(tmp.path());

    let (_, stderr, success) = run_docmirror(
        tmp.path(),
        &["--converter", "false", "--on-conversion-error", "ignore"],
    );

    assert!(success, "ignore policy should not fail the run: {}", stderr);
    assert!(!stderr.contains("⚠"), "stderr: {}", stderr);
    assert!(tmp.path().join("docs/src/a.md").exists());
}

#[test]
fn test_rust_log_overrides_default_level() {
    let tmp = tempdir().unwrap();
    write_scenario(tmp.path());

    let (_, stderr, success) =
        run_docmirror_with_env(tmp.path(), &["--converter", "cat"], &[("RUST_LOG", "debug")]);

    assert!(success, "stderr: {}", stderr);
    assert!(stderr.contains("DEBUG"), "stderr: {}", stderr);
    assert!(stderr.contains("visiting directory"), "stderr: {}", stderr);
}

#[test]
fn test_default_level_hides_debug_events() {
    let tmp = tempdir().unwrap();
    write_scenario(tmp.path());

    let (_, stderr, success) = run_docmirror(tmp.path(), &["--converter", "cat"]);

    assert!(success, "stderr: {}", stderr);
    assert!(!stderr.contains("visiting directory"), "stderr: {}", stderr);
}

#[test]
fn test_json_report() {
    let tmp = tempdir().unwrap();
    write_scenario(tmp.path());

    let (stdout, stderr, success) =
        run_docmirror(tmp.path(), &["--converter", "cat", "--mapping", "flattened", "--json"]);

    assert!(success, "stderr: {}", stderr);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["files_converted"], 2);
    assert_eq!(report["files_skipped"], 1);
    assert!(tmp.path().join("docs/a.md").exists());
}

#[test]
fn test_missing_source_is_rejected() {
    let tmp = tempdir().unwrap();

    let (_, stderr, success) = run_docmirror(tmp.path(), &["nowhere", "--converter", "cat"]);

    assert!(!success);
    assert!(stderr.contains("Invalid configuration"), "stderr: {}", stderr);
}
