use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for inspection reports.
pub const SCHEMA_REPORT_V1: &str = "modcond.report.v1";

/// Which formula family a document belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Note-prohibition formulas, evaluated against a candidate note.
    Note,
    /// Role-assignment formulas, evaluated against a user account.
    User,
}

impl Dialect {
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Note => "note",
            Dialect::User => "user",
        }
    }
}

/// Outcome of one inspection. The host maps `Match` to a rejection or role grant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Match,
    NoMatch,
}

impl From<bool> for Verdict {
    fn from(matched: bool) -> Self {
        if matched {
            Verdict::Match
        } else {
            Verdict::NoMatch
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Summary of what was evaluated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct InspectionData {
    /// Kind tag of the root node; absent for the null formula.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_kind: Option<String>,
    pub formula_depth: u32,
    pub formula_nodes: u32,
    /// Nodes that parsed as unsupported and therefore never match.
    pub unsupported_nodes: u32,
    /// Identifier of the inspected user (author for notes).
    pub subject_user: String,
    /// Error that forced a `no_match` verdict, if evaluation failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct InspectionReport {
    pub schema: String,
    pub tool: ToolMeta,
    pub dialect: Dialect,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub data: InspectionData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn verdict_serializes_snake_case() {
        let json = serde_json::to_value(Verdict::NoMatch).expect("serialize verdict");
        assert_eq!(json, "no_match");
        assert_eq!(Verdict::from(true), Verdict::Match);
    }

    #[test]
    fn report_round_trips_through_json() {
        let report = InspectionReport {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "modcond".to_string(),
                version: "0.1.0".to_string(),
            },
            dialect: Dialect::Note,
            started_at: datetime!(2024-02-19 12:00:00 UTC),
            finished_at: datetime!(2024-02-19 12:00:01 UTC),
            verdict: Verdict::Match,
            data: InspectionData {
                root_kind: Some("hasText".to_string()),
                formula_depth: 1,
                formula_nodes: 1,
                unsupported_nodes: 0,
                subject_user: "9abc".to_string(),
                evaluation_error: None,
            },
        };

        let text = serde_json::to_string(&report).expect("serialize report");
        assert!(text.contains("\"started_at\":\"2024-02-19T12:00:00Z\""));
        let back: InspectionReport = serde_json::from_str(&text).expect("parse report");
        assert_eq!(back, report);
    }
}
