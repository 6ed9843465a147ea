//! Config parsing and engine policy resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{EntropyTablePolicy, ModcondConfigV1};
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `modcond.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<ModcondConfigV1> {
    let cfg: ModcondConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective engine config (file values, then overrides).
pub fn resolve_config(cfg: ModcondConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
