//! The `explain` use case: look up formula kind documentation.

use modcond_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    /// Found an explanation for the kind.
    Found(&'static Explanation),
    /// Unknown kind; includes every kind the engine understands.
    NotFound {
        kind: String,
        available_kinds: Vec<&'static str>,
    },
}

/// Look up an explanation for a formula kind tag.
pub fn run_explain(kind: &str) -> ExplainOutput {
    match explain::lookup_explanation(kind) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            kind: kind.to_string(),
            available_kinds: explain::all_kinds().collect(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");

    let dialects: Vec<&str> = exp.dialects.iter().map(|d| d.as_str()).collect();
    out.push_str(&format!("Dialects: {}\n\n", dialects.join(", ")));

    out.push_str("Example\n");
    out.push_str("-------\n");
    out.push_str("```json\n");
    out.push_str(exp.example);
    out.push('\n');
    out.push_str("```\n");

    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(kind: &str, kinds: &[&'static str]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown formula kind: {}\n\n", kind));
    out.push_str("Available kinds:\n");
    for k in kinds {
        out.push_str(&format!("  - {}\n", k));
    }

    out
}
