//! End-to-end CLI integration tests using test fixtures.
//!
//! Each fixture in `tests/fixtures/` contains:
//! - `formula.json` and `subject.json`
//! - an optional `case.json` with the dialect, roles, and evaluation instant
//! - an `expected.report.json` (timestamps use the "__TIMESTAMP__" placeholder)
//!
//! These tests run the CLI against each fixture and verify:
//! 1. Exit code matches expected (0 = no match, 2 = match)
//! 2. JSON output matches expected (ignoring timestamps and tool version)

use assert_cmd::Command;
use modcond_test_util::normalize_nondeterministic;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

/// Wraps the deprecated cargo_bin to centralize the deprecation warning.
#[allow(deprecated)]
fn modcond_cmd() -> Command {
    Command::cargo_bin("modcond").expect("modcond binary not found - run `cargo build` first")
}

/// Get the path to the test fixtures directory
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("modcond-cli crate should have a parent directory")
        .parent()
        .expect("crates directory should have a parent (repo root)")
        .join("tests")
        .join("fixtures")
}

/// Run the fixture through the matching subcommand and return the exit code and report.
fn run_fixture(fixture_name: &str) -> (i32, Value) {
    let fixture_path = fixtures_dir().join(fixture_name);
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let report_path = temp_dir.path().join("report.json");

    let case: Value = std::fs::read_to_string(fixture_path.join("case.json"))
        .map(|text| serde_json::from_str(&text).expect("Failed to parse case.json"))
        .unwrap_or(Value::Null);

    let mut cmd = modcond_cmd();
    cmd.arg("--config")
        .arg(fixture_path.join("modcond.toml"))
        .arg(case["dialect"].as_str().unwrap_or("note"))
        .arg("--formula")
        .arg(fixture_path.join("formula.json"))
        .arg("--subject")
        .arg(fixture_path.join("subject.json"))
        .arg("--report-out")
        .arg(&report_path);
    if let Some(roles) = case["roles"].as_array() {
        for role in roles {
            cmd.arg("--role").arg(role.as_str().expect("role is a string"));
        }
    }
    if let Some(now) = case["now"].as_str() {
        cmd.arg("--now").arg(now);
    }

    let output = cmd.output().expect("Failed to run command");
    let exit_code = output.status.code().unwrap_or(-1);

    let report_content = std::fs::read_to_string(&report_path).expect("Failed to read report");
    let report: Value = serde_json::from_str(&report_content).expect("Failed to parse report JSON");

    (exit_code, report)
}

fn load_expected_report(fixture_name: &str) -> Value {
    let expected_path = fixtures_dir()
        .join(fixture_name)
        .join("expected.report.json");
    let content = std::fs::read_to_string(&expected_path).expect("Failed to read expected report");
    serde_json::from_str(&content).expect("Failed to parse expected report")
}

fn assert_reports_match(actual: Value, expected: Value, fixture_name: &str) {
    let actual = normalize_nondeterministic(actual);
    let expected = normalize_nondeterministic(expected);

    assert_eq!(
        actual,
        expected,
        "Report mismatch for fixture '{}'.\n\nActual:\n{}\n\nExpected:\n{}",
        fixture_name,
        serde_json::to_string_pretty(&actual).unwrap(),
        serde_json::to_string_pretty(&expected).unwrap()
    );
}

fn check_fixture(fixture_name: &str, expected_exit: i32) {
    let (exit_code, report) = run_fixture(fixture_name);
    assert_eq!(exit_code, expected_exit, "exit code for fixture '{fixture_name}'");
    assert_reports_match(report, load_expected_report(fixture_name), fixture_name);
}

// ============================================================================
// Fixture tests
// ============================================================================

#[test]
fn fixture_note_spam_match() {
    check_fixture("note_spam_match", 2);
}

#[test]
fn fixture_note_clean() {
    check_fixture("note_clean", 0);
}

#[test]
fn fixture_note_role_exempt() {
    check_fixture("note_role_exempt", 0);
}

#[test]
fn fixture_user_new_remote() {
    check_fixture("user_new_remote", 2);
}

#[test]
fn fixture_user_unsupported_kind() {
    check_fixture("user_unsupported_kind", 0);
}

#[test]
fn fixture_note_role_exempt_without_role_matches() {
    let fixture_path = fixtures_dir().join("note_role_exempt");
    let output = modcond_cmd()
        .arg("--config")
        .arg(fixture_path.join("modcond.toml"))
        .arg("note")
        .arg("--formula")
        .arg(fixture_path.join("formula.json"))
        .arg("--subject")
        .arg(fixture_path.join("subject.json"))
        .output()
        .expect("Failed to run command");

    assert_eq!(output.status.code(), Some(2));
    let report: Value = serde_json::from_slice(&output.stdout).expect("report on stdout");
    assert_eq!(report["verdict"], "match");
}
