//! Username entropy scoring and table checks.

use anyhow::Context;
use modcond_domain::entropy::{self, EntropyTable};

#[derive(Clone, Debug, PartialEq)]
pub struct EntropyOutput {
    pub username: String,
    pub total: f64,
    pub mean: f64,
}

/// Result of checking a candidate transition table.
#[derive(Clone, Debug, PartialEq)]
pub enum TableCheck {
    Valid(EntropyTable),
    Invalid(String),
}

impl TableCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, TableCheck::Valid(_))
    }
}

/// Score `username` against `table`. Without a table there is nothing to score.
pub fn run_entropy(username: &str, table: Option<&EntropyTable>) -> anyhow::Result<EntropyOutput> {
    let Some(table) = table else {
        anyhow::bail!("no entropy table configured (set entropy_table or pass --table)");
    };

    Ok(EntropyOutput {
        username: username.to_string(),
        total: entropy::score(username, table),
        mean: entropy::mean_score(username, table),
    })
}

pub fn run_validate_table(table_text: &str) -> anyhow::Result<TableCheck> {
    let doc: serde_json::Value =
        serde_json::from_str(table_text).context("parse entropy table json")?;

    Ok(match entropy::validate_table(&doc) {
        Ok(table) => TableCheck::Valid(table),
        Err(err) => TableCheck::Invalid(err.to_string()),
    })
}
