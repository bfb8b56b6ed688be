use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Build info embedded into one compiled binary.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BuildInfo {
    /// OS level absolute path to the binary.
    pub path: String,
    /// Main package path, e.g. `github.com/foo/bar/cmd/baz`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_path: Option<String>,
    /// Main module path, e.g. `github.com/foo/bar`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_path: Option<String>,
    /// Every dependency listed in the build info, in manifest order.
    #[serde(default)]
    pub module_refs: Vec<ModuleReference>,
}

impl BuildInfo {
    pub fn new<S: Into<String>>(path: S) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// Identity of a dependency. Both fields are opaque: two references are the
/// same dependency iff path and version are byte-equal.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct ModuleReference {
    pub path: String,
    pub version: String,
}

impl ModuleReference {
    pub fn new<P: Into<String>, V: Into<String>>(path: P, version: V) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
        }
    }

    /// Filesystem replacements (`=> ../fork`) cannot be fetched or classified.
    pub fn is_local(&self) -> bool {
        self.path.starts_with("./") || self.path.starts_with("../") || self.path.starts_with('/')
    }
}

impl fmt::Display for ModuleReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.path, self.version)
    }
}

/// A resolved module: a reference plus where its source lives and what it is
/// licensed under.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Module {
    #[serde(flatten)]
    pub reference: ModuleReference,
    /// Source tree location; `None` for local replacements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    #[serde(default)]
    pub licenses: Vec<License>,
}

impl Module {
    pub fn new(reference: ModuleReference, dir: Option<String>) -> Self {
        Self {
            reference,
            dir,
            licenses: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.reference.path
    }

    pub fn version(&self) -> &str {
        &self.reference.version
    }

    pub fn license_names(&self) -> Vec<&str> {
        self.licenses.iter().map(|l| l.name.as_str()).collect()
    }
}

/// One license classification hit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct License {
    /// Identifier matched against policy (usually SPDX).
    pub name: String,
    /// File the license was classified from; absent for overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Classifier confidence in `[0, 1]`.
    pub confidence: f64,
}

impl License {
    /// A license asserted by configuration rather than classification.
    pub fn declared<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            path: None,
            content: None,
            confidence: 1.0,
        }
    }
}
