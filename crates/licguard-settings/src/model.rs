use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Stable schema identifier for the config file.
pub const SCHEMA_CONFIG_V1: &str = "licguard.config.v1";

/// `licguard.toml` / `licguard.yaml` schema v1.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LicguardConfigV1 {
    /// Optional schema string for tooling (`licguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Minimum classifier confidence in `[0, 1]`. Defaults to 0.80.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    /// Permitted license names. Empty allows any resolvable license.
    #[serde(default)]
    pub allow: Vec<String>,

    #[serde(default)]
    pub exceptions: ExceptionsConfig,

    /// Authoritative license declarations that replace classifier output.
    #[serde(default, rename = "override")]
    pub overrides: Vec<OverrideConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExceptionsConfig {
    /// Modules allowed to have no identifiable license.
    #[serde(default)]
    pub unresolvable_license: Vec<ModuleSelector>,

    /// Modules allowed to carry licenses outside the allow list.
    #[serde(default)]
    pub license_not_permitted: Vec<NotPermittedExceptionConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ModuleSelector {
    pub path: String,
    /// Exact version; absent matches every version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct NotPermittedExceptionConfig {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Licenses to tolerate; empty tolerates all of them.
    #[serde(default)]
    pub licenses: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct OverrideConfig {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub licenses: Vec<String>,
}
