//! Config parsing and policy resolution.
//!
//! This crate is IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{
    ExceptionsConfig, LicguardConfigV1, ModuleSelector, NotPermittedExceptionConfig,
    OverrideConfig, SCHEMA_CONFIG_V1,
};
pub use resolve::resolve_config;

use anyhow::Context;
use std::path::Path;

/// On-disk encoding of a config file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// `.yaml` / `.yml` select YAML; everything else is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Toml,
        }
    }
}

/// Parse `licguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<LicguardConfigV1> {
    let cfg: LicguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Parse `licguard.yaml` into a typed model. An empty document is an empty config.
pub fn parse_config_yaml(input: &str) -> anyhow::Result<LicguardConfigV1> {
    if input.trim().is_empty() {
        return Ok(LicguardConfigV1::default());
    }
    let cfg: LicguardConfigV1 = serde_yaml::from_str(input)?;
    Ok(cfg)
}

pub fn parse_config(input: &str, format: ConfigFormat) -> anyhow::Result<LicguardConfigV1> {
    match format {
        ConfigFormat::Toml => parse_config_toml(input).context("parse TOML config"),
        ConfigFormat::Yaml => parse_config_yaml(input).context("parse YAML config"),
    }
}
