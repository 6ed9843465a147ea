//! Use case orchestration for modcond.
//!
//! This crate provides the application layer: use cases that coordinate the settings and domain
//! layers. It is intentionally thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod config;
mod explain;
mod inspect;
mod report;
mod scoring;
mod validate;

pub use config::load_config;
pub use explain::{format_explanation, format_not_found, run_explain, ExplainOutput};
pub use inspect::{
    run_inspect_note, run_inspect_user, verdict_exit_code, InspectOutput, NoteInput, UserInput,
};
pub use report::{parse_report_json, serialize_report};
pub use scoring::{run_entropy, run_validate_table, EntropyOutput, TableCheck};
pub use validate::{run_validate, ValidateOutput};
