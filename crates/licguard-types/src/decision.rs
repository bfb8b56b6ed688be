use crate::model::{BuildInfo, Module};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable schema identifier for the JSON summary.
pub const SCHEMA_SUMMARY_V1: &str = "licguard.summary.v1";

/// The compliance verdict for one module. Closed set: rendering is a lookup
/// table, never derived logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Decision {
    #[serde(rename = "allowed")]
    Allowed,
    #[serde(rename = "unresolvable-license")]
    UnresolvableLicense,
    #[serde(rename = "licenses-not-allowed")]
    LicenseNotPermitted,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Allowed => "allowed",
            Decision::UnresolvableLicense => "unresolvable-license",
            Decision::LicenseNotPermitted => "licenses-not-allowed",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A module together with its verdict and the binaries that embed it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EvaluatedModule {
    pub module: Module,
    pub decision: Decision,
    /// Licenses found on the module that policy does not permit.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub not_permitted: Vec<String>,
    /// Paths of the binaries that declared this module as a dependency.
    #[serde(default)]
    pub binaries: Vec<String>,
}

impl EvaluatedModule {
    pub fn allowed(&self) -> bool {
        self.decision == Decision::Allowed
    }

    pub fn explain(&self) -> String {
        match self.decision {
            Decision::Allowed => "allowed".to_string(),
            Decision::UnresolvableLicense => "not allowed - unresolvable license".to_string(),
            Decision::LicenseNotPermitted => format!(
                "not allowed - non-permitted licenses: {}",
                self.not_permitted.join(", ")
            ),
        }
    }
}

/// Everything a scan produced: the audited binaries and the evaluated modules
/// sorted by module path.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Summary {
    pub binaries: Vec<BuildInfo>,
    pub modules: Vec<EvaluatedModule>,
}

impl Summary {
    pub fn violations(&self) -> impl Iterator<Item = &EvaluatedModule> {
        self.modules.iter().filter(|m| !m.allowed())
    }

    pub fn is_compliant(&self) -> bool {
        self.violations().next().is_none()
    }
}
