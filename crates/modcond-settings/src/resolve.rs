use crate::model::{EntropyTablePolicy, ModcondConfigV1};
use anyhow::Context;
use modcond_domain::entropy;
use modcond_domain::policy::EngineConfig;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub max_depth: Option<u32>,
    /// Entropy table loaded by the caller (e.g. from a separate JSON file).
    pub entropy_table: Option<serde_json::Value>,
    pub entropy_table_policy: Option<EntropyTablePolicy>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EngineConfig,
    /// Set when a configured entropy table was rejected under the `disable` policy.
    pub entropy_table_rejected: Option<String>,
}

pub fn resolve_config(cfg: ModcondConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let mut effective = EngineConfig::default();

    if let Some(types) = cfg.browser_safe_types {
        validate_mime_list(&types)?;
        effective.browser_safe_types = types;
    }

    if let Some(depth) = overrides.max_depth.or(cfg.max_depth) {
        if depth == 0 {
            anyhow::bail!("max_depth must be at least 1");
        }
        effective.max_depth = depth as usize;
    }

    let policy = overrides
        .entropy_table_policy
        .or(cfg.entropy_table_policy)
        .unwrap_or_default();

    let mut entropy_table_rejected = None;
    if let Some(doc) = overrides.entropy_table.or(cfg.entropy_table) {
        match entropy::validate_table(&doc) {
            Ok(table) => effective.entropy_table = Some(table),
            Err(err) => match policy {
                EntropyTablePolicy::Error => {
                    return Err(err).context("invalid entropy_table");
                }
                EntropyTablePolicy::Disable => {
                    tracing::warn!(error = %err, "ignoring invalid entropy table");
                    entropy_table_rejected = Some(err.to_string());
                }
            },
        }
    }

    Ok(ResolvedConfig {
        effective,
        entropy_table_rejected,
    })
}

fn validate_mime_list(types: &[String]) -> anyhow::Result<()> {
    for mime in types {
        let Some((top, sub)) = mime.split_once('/') else {
            anyhow::bail!("invalid browser_safe_types entry: {mime} (expected type/subtype)");
        };
        if top.is_empty() || sub.is_empty() {
            anyhow::bail!("invalid browser_safe_types entry: {mime} (expected type/subtype)");
        }
    }
    Ok(())
}
