//! Stable DTOs and IDs used across the modcond workspace.
//!
//! This crate is intentionally boring:
//! - stable string IDs for every formula kind of both dialects
//! - the inspection report emitted by the app layer
//! - explain registry describing each kind

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod report;

pub use explain::{lookup_explanation, Explanation};
pub use report::{
    Dialect, InspectionData, InspectionReport, ToolMeta, Verdict, SCHEMA_REPORT_V1,
};
