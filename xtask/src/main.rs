//! Developer tasks (schema generation, fixture checks, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use modcond_app::{NoteInput, UserInput, run_inspect_note, run_inspect_user, serialize_report};
use modcond_domain::model::RoleId;
use modcond_settings::Overrides;
use modcond_test_util::normalize_nondeterministic;
use modcond_types::{Dialect, ids};
use schemars::schema_for;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Get the project root (parent of xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("Cannot determine current directory")?,
    };

    if manifest_dir.ends_with("xtask")
        && let Some(parent) = manifest_dir.parent()
    {
        return Ok(parent.to_path_buf());
    }
    Ok(manifest_dir)
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

fn fixtures_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("tests").join("fixtures"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "modcond.report.v1.json",
            generate: || schema_for!(modcond_types::InspectionReport),
        },
        SchemaSpec {
            filename: "modcond.config.v1.json",
            generate: || schema_for!(modcond_settings::ModcondConfigV1),
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

/// Per-fixture inputs besides the formula and subject documents.
#[derive(Debug, Default, Deserialize)]
struct CaseSpec {
    dialect: Option<Dialect>,
    #[serde(default)]
    roles: Vec<String>,
    /// RFC 3339 evaluation instant for user fixtures.
    now: Option<String>,
}

/// Run every fixture case through the app layer and compare (or rewrite)
/// `expected.report.json`.
fn fixtures(bless: bool) -> anyhow::Result<()> {
    let dir = fixtures_dir()?;
    let mut cases: Vec<PathBuf> = fs::read_dir(&dir)
        .with_context(|| format!("read {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect();
    cases.sort();

    let mut mismatched = Vec::new();
    for case in &cases {
        let name = case
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let actual = run_case(case).with_context(|| format!("fixture {name}"))?;
        let expected_path = case.join("expected.report.json");

        if bless {
            let mut text =
                serde_json::to_string_pretty(&actual).context("serialize expected report")?;
            text.push('\n');
            fs::write(&expected_path, text)
                .with_context(|| format!("write {}", expected_path.display()))?;
            println!("Blessed {name}");
            continue;
        }

        let expected_text = fs::read_to_string(&expected_path)
            .with_context(|| format!("read {}", expected_path.display()))?;
        let expected: serde_json::Value =
            serde_json::from_str(&expected_text).context("parse expected report")?;
        if normalize_nondeterministic(expected) != actual {
            mismatched.push(name);
        }
    }

    if mismatched.is_empty() {
        println!("{} fixtures match.", cases.len());
        Ok(())
    } else {
        for name in &mismatched {
            eprintln!("  - {name}");
        }
        bail!("{} fixtures out of date; run `cargo xtask bless-fixtures`", mismatched.len())
    }
}

fn run_case(case: &Path) -> anyhow::Result<serde_json::Value> {
    let read = |file: &str| {
        let path = case.join(file);
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
    };

    let spec: CaseSpec = match read("case.json") {
        Ok(text) => serde_json::from_str(&text).context("parse case.json")?,
        Err(_) => CaseSpec::default(),
    };
    let formula_text = read("formula.json")?;
    let subject_text = read("subject.json")?;
    let config_text = read("modcond.toml").unwrap_or_default();
    let roles: Vec<RoleId> = spec.roles.iter().map(|r| RoleId::new(r.as_str())).collect();

    let output = match spec.dialect.unwrap_or(Dialect::Note) {
        Dialect::Note => run_inspect_note(NoteInput {
            formula_text: &formula_text,
            subject_text: &subject_text,
            roles,
            config_text: &config_text,
            overrides: Overrides::default(),
        })?,
        Dialect::User => {
            let now = spec
                .now
                .as_deref()
                .map(|text| OffsetDateTime::parse(text, &Rfc3339).context("parse now"))
                .transpose()?;
            run_inspect_user(UserInput {
                formula_text: &formula_text,
                subject_text: &subject_text,
                roles,
                now,
                config_text: &config_text,
                overrides: Overrides::default(),
            })?
        }
    };

    let bytes = serialize_report(&output.report)?;
    let value = serde_json::from_slice(&bytes).context("reparse report")?;
    Ok(normalize_nondeterministic(value))
}

/// Every kind either dialect understands has a complete explanation.
fn explain_coverage() -> anyhow::Result<()> {
    let kinds = ids::CONNECTIVE_KINDS
        .iter()
        .chain(ids::NOTE_LEAF_KINDS)
        .chain(ids::USER_LEAF_KINDS);

    let mut errors = Vec::new();
    let mut count = 0usize;
    for kind in kinds {
        count += 1;
        match modcond_types::lookup_explanation(kind) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("Kind '{kind}' has empty title"));
                }
                if exp.description.is_empty() {
                    errors.push(format!("Kind '{kind}' has empty description"));
                }
                if serde_json::from_str::<serde_json::Value>(exp.example).is_err() {
                    errors.push(format!("Kind '{kind}' has an example that is not JSON"));
                }
            }
            None => errors.push(format!("Kind '{kind}' has no explanation")),
        }
    }

    if errors.is_empty() {
        println!("{count} kinds have explanations");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {error}");
        }
        bail!("Explain coverage validation failed with {} errors", errors.len())
    }
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  fixtures          Check tests/fixtures expected reports against the app layer");
    eprintln!("  bless-fixtures    Rewrite tests/fixtures expected reports");
    eprintln!("  explain-coverage  Validate every formula kind has an explanation");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "fixtures" => fixtures(false),
        "bless-fixtures" => fixtures(true),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
