//! Shared test utilities for the modcond workspace.
//!
//! This crate exists because `xtask` needs `normalize_nondeterministic` at
//! runtime (not behind `#[cfg(test)]`), so a `#[cfg(test)]` module inside
//! `modcond-types` would not suffice.

use serde_json::Value;

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// `tool.version` is replaced with `"__VERSION__"` only on a root object that
/// looks like an inspection report (`schema`, `tool`, `verdict`, `data`).
/// Timestamp keys are replaced at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_report = obj.contains_key("schema")
            && obj.contains_key("tool")
            && obj.contains_key("verdict")
            && obj.contains_key("data");
        if is_report
            && let Some(tool) = obj.get_mut("tool")
            && let Some(tool_obj) = tool.as_object_mut()
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at"] {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_report_envelope() {
        let report = json!({
            "schema": "modcond.report.v1",
            "tool": { "name": "modcond", "version": "0.1.0" },
            "dialect": "note",
            "started_at": "2024-06-01T00:00:00Z",
            "finished_at": "2024-06-01T00:00:01Z",
            "verdict": "match",
            "data": { "subject_user": "u1" }
        });
        let normalized = normalize_nondeterministic(report);
        assert_eq!(normalized["tool"]["version"], "__VERSION__");
        assert_eq!(normalized["started_at"], "__TIMESTAMP__");
        assert_eq!(normalized["finished_at"], "__TIMESTAMP__");
        assert_eq!(normalized["data"]["subject_user"], "u1");
    }

    #[test]
    fn leaves_version_alone_outside_reports() {
        let value = json!({ "tool": { "version": "9.9.9" }, "started_at": "x" });
        let normalized = normalize_nondeterministic(value);
        assert_eq!(normalized["tool"]["version"], "9.9.9");
        assert_eq!(normalized["started_at"], "__TIMESTAMP__");
    }
}
