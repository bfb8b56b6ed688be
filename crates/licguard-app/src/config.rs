use anyhow::Context;
use licguard_domain::policy::Policy;
use licguard_settings::{ConfigFormat, LicguardConfigV1};
use std::path::Path;

/// Read and resolve a config file; `None` yields the default policy.
pub fn load_policy(path: Option<&Path>) -> anyhow::Result<Policy> {
    let cfg = match path {
        None => LicguardConfigV1::default(),
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            licguard_settings::parse_config(&text, ConfigFormat::from_path(path))
                .with_context(|| format!("invalid config {}", path.display()))?
        }
    };
    licguard_settings::resolve_config(cfg).context("resolve config")
}
