use anyhow::Context;
use modcond_settings::{ModcondConfigV1, Overrides, ResolvedConfig};

/// Parse and resolve configuration text. Empty text means defaults.
pub fn load_config(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let cfg = if config_text.trim().is_empty() {
        ModcondConfigV1::default()
    } else {
        modcond_settings::parse_config_toml(config_text).context("parse config")?
    };

    modcond_settings::resolve_config(cfg, overrides).context("resolve config")
}
