use anyhow::Context;
use modcond_types::{InspectionReport, SCHEMA_REPORT_V1};

pub fn serialize_report(report: &InspectionReport) -> anyhow::Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(report).context("serialize report json")?;
    bytes.push(b'\n');
    Ok(bytes)
}

pub fn parse_report_json(text: &str) -> anyhow::Result<InspectionReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema}");
    }

    serde_json::from_value(value).context("parse modcond report")
}
