//! CLI entry point for modcond.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `modcond-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use modcond_app::{
    ExplainOutput, InspectOutput, NoteInput, TableCheck, UserInput, load_config, run_entropy,
    run_explain, run_inspect_note, run_inspect_user, run_validate, run_validate_table,
    serialize_report, verdict_exit_code,
};
use modcond_domain::model::RoleId;
use modcond_settings::{EntropyTablePolicy, Overrides};
use modcond_types::Dialect;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "modcond",
    version,
    about = "Evaluate moderation formulas against notes and user accounts"
)]
struct Cli {
    /// Path to modcond config TOML. A missing file means defaults.
    #[arg(long, default_value = "modcond.toml")]
    config: Utf8PathBuf,

    /// Override the deepest formula accepted.
    #[arg(long)]
    max_depth: Option<u32>,

    /// Username entropy transition table (JSON). Replaces the config's table.
    #[arg(long)]
    entropy_table: Option<Utf8PathBuf>,

    /// What to do with an invalid entropy table.
    #[arg(long, value_enum)]
    entropy_table_policy: Option<TablePolicyArg>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a note-prohibition formula against a note.
    Note {
        /// Formula document (JSON).
        #[arg(long)]
        formula: Utf8PathBuf,
        /// Note subject (JSON).
        #[arg(long)]
        subject: Utf8PathBuf,
        /// Role held by the note's author. Repeatable.
        #[arg(long = "role")]
        roles: Vec<String>,
        /// Where to write the JSON report (stdout when omitted).
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,
    },

    /// Evaluate a role-assignment formula against a user account.
    User {
        #[arg(long)]
        formula: Utf8PathBuf,
        /// User subject (JSON).
        #[arg(long)]
        subject: Utf8PathBuf,
        /// Role currently held by the user. Repeatable.
        #[arg(long = "role")]
        roles: Vec<String>,
        /// Evaluation instant (RFC 3339). Defaults to now.
        #[arg(long)]
        now: Option<String>,
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,
    },

    /// Score a username with the configured entropy table.
    Entropy {
        username: String,
    },

    /// Check an entropy transition table file.
    ValidateTable {
        path: Utf8PathBuf,
    },

    /// Check a formula document without evaluating it.
    Validate {
        path: Utf8PathBuf,
        #[arg(long, value_enum)]
        dialect: DialectArg,
    },

    /// Explain a formula kind.
    Explain {
        /// The kind tag (e.g. "hasLikelyBlurhash").
        kind: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DialectArg {
    Note,
    User,
}

impl From<DialectArg> for Dialect {
    fn from(value: DialectArg) -> Self {
        match value {
            DialectArg::Note => Dialect::Note,
            DialectArg::User => Dialect::User,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TablePolicyArg {
    Disable,
    Error,
}

impl From<TablePolicyArg> for EntropyTablePolicy {
    fn from(value: TablePolicyArg) -> Self {
        match value {
            TablePolicyArg::Disable => EntropyTablePolicy::Disable,
            TablePolicyArg::Error => EntropyTablePolicy::Error,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    match run(&cli) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("modcond error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.cmd {
        Commands::Note {
            formula,
            subject,
            roles,
            report_out,
        } => cmd_note(cli, formula, subject, roles, report_out.as_deref()),
        Commands::User {
            formula,
            subject,
            roles,
            now,
            report_out,
        } => cmd_user(cli, formula, subject, roles, now.as_deref(), report_out.as_deref()),
        Commands::Entropy { username } => cmd_entropy(cli, username),
        Commands::ValidateTable { path } => cmd_validate_table(path),
        Commands::Validate { path, dialect } => cmd_validate(cli, path, (*dialect).into()),
        Commands::Explain { kind } => Ok(cmd_explain(kind)),
    }
}

fn cmd_note(
    cli: &Cli,
    formula: &Utf8Path,
    subject: &Utf8Path,
    roles: &[String],
    report_out: Option<&Utf8Path>,
) -> anyhow::Result<i32> {
    let formula_text = read_text(formula, "formula")?;
    let subject_text = read_text(subject, "note subject")?;
    let config_text = read_config(&cli.config);

    let output = run_inspect_note(NoteInput {
        formula_text: &formula_text,
        subject_text: &subject_text,
        roles: role_ids(roles),
        config_text: &config_text,
        overrides: overrides(cli)?,
    })?;

    emit_report(&output, report_out)
}

fn cmd_user(
    cli: &Cli,
    formula: &Utf8Path,
    subject: &Utf8Path,
    roles: &[String],
    now: Option<&str>,
    report_out: Option<&Utf8Path>,
) -> anyhow::Result<i32> {
    let now = now
        .map(|text| {
            OffsetDateTime::parse(text, &Rfc3339)
                .with_context(|| format!("parse --now as RFC 3339: {text}"))
        })
        .transpose()?;

    let formula_text = read_text(formula, "formula")?;
    let subject_text = read_text(subject, "user subject")?;
    let config_text = read_config(&cli.config);

    let output = run_inspect_user(UserInput {
        formula_text: &formula_text,
        subject_text: &subject_text,
        roles: role_ids(roles),
        now,
        config_text: &config_text,
        overrides: overrides(cli)?,
    })?;

    emit_report(&output, report_out)
}

fn cmd_entropy(cli: &Cli, username: &str) -> anyhow::Result<i32> {
    let resolved = load_config(&read_config(&cli.config), overrides(cli)?)?;
    let output = run_entropy(username, resolved.effective.entropy_table.as_ref())?;
    let doc = serde_json::json!({
        "username": output.username,
        "total": output.total,
        "mean": output.mean,
    });
    println!("{}", serde_json::to_string_pretty(&doc).context("serialize entropy score")?);
    Ok(0)
}

fn cmd_validate_table(path: &Utf8Path) -> anyhow::Result<i32> {
    let text = read_text(path, "entropy table")?;
    match run_validate_table(&text)? {
        TableCheck::Valid(_) => {
            println!("{path}: valid entropy table");
            Ok(0)
        }
        TableCheck::Invalid(reason) => {
            eprintln!("{path}: {reason}");
            Ok(2)
        }
    }
}

fn cmd_validate(cli: &Cli, path: &Utf8Path, dialect: Dialect) -> anyhow::Result<i32> {
    let text = read_text(path, "formula")?;
    let resolved = load_config(&read_config(&cli.config), overrides(cli)?)?;
    let output = run_validate(&text, dialect, resolved.effective.max_depth)?;

    println!(
        "{path}: {} formula, root {}, depth {}, {} nodes",
        dialect.as_str(),
        output.root_kind.as_deref().unwrap_or("(null)"),
        output.depth,
        output.nodes,
    );
    for raw in &output.unsupported {
        println!("  unsupported: {raw}");
    }
    if output.too_deep() {
        println!("  depth {} exceeds max_depth {}", output.depth, output.max_depth);
    }

    Ok(if output.is_clean() { 0 } else { 2 })
}

fn cmd_explain(kind: &str) -> i32 {
    match run_explain(kind) {
        ExplainOutput::Found(exp) => {
            print!("{}", modcond_app::format_explanation(exp));
            0
        }
        ExplainOutput::NotFound {
            kind,
            available_kinds,
        } => {
            eprint!("{}", modcond_app::format_not_found(&kind, &available_kinds));
            1
        }
    }
}

fn overrides(cli: &Cli) -> anyhow::Result<Overrides> {
    let entropy_table: Option<serde_json::Value> = cli
        .entropy_table
        .as_deref()
        .map(|path| {
            let text = read_text(path, "entropy table")?;
            serde_json::from_str(&text).with_context(|| format!("parse entropy table: {path}"))
        })
        .transpose()?;

    Ok(Overrides {
        max_depth: cli.max_depth,
        entropy_table,
        entropy_table_policy: cli.entropy_table_policy.map(Into::into),
    })
}

fn role_ids(roles: &[String]) -> Vec<RoleId> {
    roles.iter().map(|r| RoleId::new(r.as_str())).collect()
}

/// Missing config is allowed; defaults apply.
fn read_config(path: &Utf8Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            tracing::debug!(path = %path, error = %err, "no config file, using defaults");
            String::new()
        }
    }
}

fn read_text(path: &Utf8Path, what: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {what}: {path}"))
}

fn emit_report(output: &InspectOutput, report_out: Option<&Utf8Path>) -> anyhow::Result<i32> {
    let data = serialize_report(&output.report).context("serialize report")?;

    match report_out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create directory: {}", parent))?;
            }
            std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
        }
        None => {
            use std::io::Write;
            std::io::stdout()
                .write_all(&data)
                .context("write report to stdout")?;
        }
    }

    Ok(verdict_exit_code(output.report.verdict))
}
