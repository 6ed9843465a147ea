//! The `validate` use case: check a formula document before it is stored.

use anyhow::Context;
use modcond_domain::{Formula, Leaf, NoteFormula, UserFormula};
use modcond_types::Dialect;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq)]
pub struct ValidateOutput {
    pub dialect: Dialect,
    pub root_kind: Option<String>,
    pub depth: usize,
    pub nodes: usize,
    pub max_depth: usize,
    /// Raw documents that will never match, in document order.
    pub unsupported: Vec<Value>,
}

impl ValidateOutput {
    pub fn too_deep(&self) -> bool {
        self.depth > self.max_depth
    }

    /// A formula is clean when every node is understood and it fits the depth limit.
    pub fn is_clean(&self) -> bool {
        self.unsupported.is_empty() && !self.too_deep()
    }
}

pub fn run_validate(
    formula_text: &str,
    dialect: Dialect,
    max_depth: usize,
) -> anyhow::Result<ValidateOutput> {
    let doc: Value = serde_json::from_str(formula_text).context("parse formula json")?;

    let output = match dialect {
        Dialect::Note => summarize(dialect, &NoteFormula::from_value(&doc), max_depth),
        Dialect::User => summarize(dialect, &UserFormula::from_value(&doc), max_depth),
    };

    tracing::debug!(
        dialect = dialect.as_str(),
        depth = output.depth,
        unsupported = output.unsupported.len(),
        "validated formula"
    );
    Ok(output)
}

fn summarize<L: Leaf>(dialect: Dialect, formula: &Formula<L>, max_depth: usize) -> ValidateOutput {
    ValidateOutput {
        dialect,
        root_kind: formula.kind().map(str::to_string),
        depth: formula.depth(),
        nodes: formula.node_count(),
        max_depth,
        unsupported: formula.unsupported().into_iter().cloned().collect(),
    }
}
