//! CLI tests for the non-inspection subcommands and error exits.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

#[allow(deprecated)]
fn modcond_cmd() -> Command {
    Command::cargo_bin("modcond").expect("modcond binary not found - run `cargo build` first")
}

const CLASSES: [&str; 28] = [
    "_", "0", "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p",
    "q", "r", "s", "t", "u", "v", "w", "x", "y", "z",
];

fn uniform_table(weight: f64) -> serde_json::Value {
    let row: serde_json::Map<String, serde_json::Value> =
        CLASSES.iter().map(|c| (c.to_string(), weight.into())).collect();
    let table: serde_json::Map<String, serde_json::Value> = CLASSES
        .iter()
        .map(|r| (r.to_string(), serde_json::Value::Object(row.clone())))
        .collect();
    serde_json::Value::Object(table)
}

fn write_json(dir: &Path, name: &str, value: &serde_json::Value) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string(value).expect("json")).expect("write file");
    path
}

#[test]
fn explain_known_kind() {
    modcond_cmd()
        .args(["explain", "hasLikelyBlurhash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("```json"));
}

#[test]
fn explain_unknown_kind_fails() {
    modcond_cmd()
        .args(["explain", "isFriday"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown formula kind: isFriday"));
}

#[test]
fn entropy_scores_with_table_file() {
    let dir = TempDir::new().expect("temp dir");
    let table = write_json(dir.path(), "table.json", &uniform_table(1.0));

    modcond_cmd()
        .arg("--config")
        .arg(dir.path().join("modcond.toml"))
        .arg("--entropy-table")
        .arg(&table)
        .args(["entropy", "ab"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total\": 3.0"))
        .stdout(predicate::str::contains("\"mean\": 1.5"));
}

#[test]
fn entropy_without_table_fails() {
    let dir = TempDir::new().expect("temp dir");
    modcond_cmd()
        .arg("--config")
        .arg(dir.path().join("modcond.toml"))
        .args(["entropy", "ab"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no entropy table configured"));
}

#[test]
fn invalid_table_under_error_policy_fails() {
    let dir = TempDir::new().expect("temp dir");
    let table = write_json(dir.path(), "table.json", &serde_json::json!({ "_": {} }));

    modcond_cmd()
        .arg("--config")
        .arg(dir.path().join("modcond.toml"))
        .arg("--entropy-table")
        .arg(&table)
        .args(["--entropy-table-policy", "error", "entropy", "ab"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid entropy_table"));
}

#[test]
fn invalid_table_under_disable_policy_is_logged_once() {
    let dir = TempDir::new().expect("temp dir");
    let table = write_json(dir.path(), "table.json", &serde_json::json!({ "_": {} }));

    let output = modcond_cmd()
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(dir.path().join("modcond.toml"))
        .arg("--entropy-table")
        .arg(&table)
        .args(["entropy", "ab"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no entropy table configured"))
        .get_output()
        .clone();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("ignoring invalid entropy table").count(), 1);
    assert!(!stderr.contains("entropy table rejected"));
}

#[test]
fn validate_table_reports_both_outcomes() {
    let dir = TempDir::new().expect("temp dir");
    let good = write_json(dir.path(), "good.json", &uniform_table(0.25));
    let bad = write_json(dir.path(), "bad.json", &serde_json::json!([1, 2, 3]));

    modcond_cmd()
        .arg("validate-table")
        .arg(&good)
        .assert()
        .success()
        .stdout(predicate::str::contains("valid entropy table"));

    modcond_cmd()
        .arg("validate-table")
        .arg(&bad)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must be an object"));
}

#[test]
fn validate_flags_leaves_of_the_other_dialect() {
    let dir = TempDir::new().expect("temp dir");
    let formula = write_json(
        dir.path(),
        "formula.json",
        &serde_json::json!({
            "type": "or",
            "values": [{ "type": "isBot" }, { "type": "hasFiles" }]
        }),
    );

    modcond_cmd()
        .arg("--config")
        .arg(dir.path().join("modcond.toml"))
        .arg("validate")
        .arg(&formula)
        .args(["--dialect", "note"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("unsupported: {\"type\":\"isBot\"}"));

    modcond_cmd()
        .arg("--config")
        .arg(dir.path().join("modcond.toml"))
        .arg("validate")
        .arg(&formula)
        .args(["--dialect", "user"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("unsupported: {\"type\":\"hasFiles\"}"));
}

#[test]
fn formula_deeper_than_limit_is_a_runtime_error() {
    let dir = TempDir::new().expect("temp dir");
    let formula = write_json(
        dir.path(),
        "formula.json",
        &serde_json::json!({ "type": "not", "value": { "type": "not", "value": { "type": "true" } } }),
    );
    let subject = write_json(dir.path(), "subject.json", &serde_json::json!({ "userId": "u1" }));

    modcond_cmd()
        .arg("--config")
        .arg(dir.path().join("modcond.toml"))
        .args(["--max-depth", "2", "note", "--formula"])
        .arg(&formula)
        .arg("--subject")
        .arg(&subject)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("exceeds max_depth 2"));
}

#[test]
fn config_file_replaces_browser_safe_list() {
    let dir = TempDir::new().expect("temp dir");
    let config = dir.path().join("modcond.toml");
    std::fs::write(&config, "browser_safe_types = [\"image/png\"]\n").expect("write config");
    let formula = write_json(dir.path(), "formula.json", &serde_json::json!({ "type": "hasBrowserInsafe" }));
    let subject = write_json(
        dir.path(),
        "subject.json",
        &serde_json::json!({
            "userId": "u1",
            "files": [{ "size": 10, "type": "image/gif", "md5": "x" }]
        }),
    );

    modcond_cmd()
        .arg("--config")
        .arg(&config)
        .arg("note")
        .arg("--formula")
        .arg(&formula)
        .arg("--subject")
        .arg(&subject)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("\"verdict\": \"match\""));
}

#[test]
fn bad_now_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let formula = write_json(dir.path(), "formula.json", &serde_json::json!({ "type": "isLocal" }));
    let subject = write_json(
        dir.path(),
        "subject.json",
        &serde_json::json!({ "id": "u1", "username": "a", "createdAt": "2024-01-01T00:00:00Z" }),
    );

    modcond_cmd()
        .arg("--config")
        .arg(dir.path().join("modcond.toml"))
        .arg("user")
        .arg("--formula")
        .arg(&formula)
        .arg("--subject")
        .arg(&subject)
        .args(["--now", "yesterday"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("parse --now"));
}
