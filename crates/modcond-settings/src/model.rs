use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `modcond.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ModcondConfigV1 {
    /// Optional schema string for tooling (`modcond.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// MIME types treated as browser-safe. Replaces the built-in list when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_safe_types: Option<Vec<String>>,

    /// Deepest formula accepted. Defaults to 32.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,

    /// Inline 28x28 transition table keyed by class (`_`, `0`, `a`..`z`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entropy_table: Option<serde_json::Value>,

    /// What to do when `entropy_table` is invalid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entropy_table_policy: Option<EntropyTablePolicy>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntropyTablePolicy {
    /// Log a warning and disable the username entropy leaves.
    #[default]
    Disable,
    /// Refuse the configuration.
    Error,
}
