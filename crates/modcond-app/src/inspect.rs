//! The `inspect` use cases: evaluate a formula against one subject and produce a report.

use anyhow::Context;
use modcond_domain::model::{NoteSubject, RoleId, UserSubject};
use modcond_domain::{
    Capabilities, EvalError, Formula, Leaf, NoteFacts, NoteLeaf, UserFacts, UserLeaf,
    try_evaluate,
};
use modcond_settings::{Overrides, ResolvedConfig};
use modcond_types::{
    Dialect, InspectionData, InspectionReport, SCHEMA_REPORT_V1, ToolMeta, Verdict,
};
use time::OffsetDateTime;

use crate::config::load_config;

/// Input for the note inspection use case.
#[derive(Clone, Debug)]
pub struct NoteInput<'a> {
    /// Formula document as JSON text.
    pub formula_text: &'a str,
    /// Note subject as JSON text.
    pub subject_text: &'a str,
    /// Roles currently held by the note's author.
    pub roles: Vec<RoleId>,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    pub overrides: Overrides,
}

/// Input for the user inspection use case.
#[derive(Clone, Debug)]
pub struct UserInput<'a> {
    pub formula_text: &'a str,
    pub subject_text: &'a str,
    pub roles: Vec<RoleId>,
    /// Evaluation instant; defaults to the current time.
    pub now: Option<OffsetDateTime>,
    pub config_text: &'a str,
    pub overrides: Overrides,
}

/// Output from an inspection.
#[derive(Clone, Debug)]
pub struct InspectOutput {
    pub report: InspectionReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

pub fn run_inspect_note(input: NoteInput<'_>) -> anyhow::Result<InspectOutput> {
    let started_at = OffsetDateTime::now_utc();
    let resolved = load_config(input.config_text, input.overrides.clone())?;

    let formula: Formula<NoteLeaf> =
        parse_formula(input.formula_text, resolved.effective.max_depth)?;
    let subject: NoteSubject =
        serde_json::from_str(input.subject_text).context("parse note subject")?;

    let caps = Capabilities::standard();
    let facts = NoteFacts::assemble(&subject, &input.roles, caps.decoder, &resolved.effective);
    let outcome = try_evaluate(&formula, &facts, &caps);

    let report = build_report(
        Dialect::Note,
        &formula,
        subject.user_id.clone(),
        outcome,
        started_at,
    );
    Ok(InspectOutput {
        report,
        resolved_config: resolved,
    })
}

pub fn run_inspect_user(input: UserInput<'_>) -> anyhow::Result<InspectOutput> {
    let started_at = OffsetDateTime::now_utc();
    let resolved = load_config(input.config_text, input.overrides.clone())?;

    let formula: Formula<UserLeaf> =
        parse_formula(input.formula_text, resolved.effective.max_depth)?;
    let subject: UserSubject =
        serde_json::from_str(input.subject_text).context("parse user subject")?;

    let caps = Capabilities::standard();
    let facts = UserFacts::assemble(
        &subject,
        &input.roles,
        input.now.unwrap_or(started_at),
        resolved.effective.entropy_table.as_ref(),
        caps.decoder,
    );
    let outcome = try_evaluate(&formula, &facts, &caps);

    let report = build_report(Dialect::User, &formula, subject.id.clone(), outcome, started_at);
    Ok(InspectOutput {
        report,
        resolved_config: resolved,
    })
}

/// Map verdict to exit code: 0 = no match, 2 = match.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::NoMatch => 0,
        Verdict::Match => 2,
    }
}

pub(crate) fn parse_formula<L: Leaf>(text: &str, max_depth: usize) -> anyhow::Result<Formula<L>> {
    let doc: serde_json::Value = serde_json::from_str(text).context("parse formula json")?;
    let formula = Formula::from_value(&doc);
    let depth = formula.depth();
    if depth > max_depth {
        anyhow::bail!("formula depth {depth} exceeds max_depth {max_depth}");
    }
    Ok(formula)
}

fn build_report<L: Leaf>(
    dialect: Dialect,
    formula: &Formula<L>,
    subject_user: String,
    outcome: Result<bool, EvalError>,
    started_at: OffsetDateTime,
) -> InspectionReport {
    let (verdict, evaluation_error) = match outcome {
        Ok(matched) => (Verdict::from(matched), None),
        Err(err) => {
            tracing::debug!(error = %err, dialect = dialect.as_str(), "evaluation failed closed");
            (Verdict::NoMatch, Some(err.to_string()))
        }
    };

    InspectionReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "modcond".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        dialect,
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict,
        data: InspectionData {
            root_kind: formula.kind().map(str::to_string),
            formula_depth: formula.depth() as u32,
            formula_nodes: formula.node_count() as u32,
            unsupported_nodes: formula.unsupported_count() as u32,
            subject_user,
            evaluation_error,
        },
    }
}
