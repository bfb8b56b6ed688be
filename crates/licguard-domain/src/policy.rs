use licguard_types::ModuleReference;

/// Minimum classifier confidence used when configuration does not set one.
pub const DEFAULT_THRESHOLD: f64 = 0.80;

/// Selects modules by exact path, optionally narrowed to one exact version.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleScope {
    pub path: String,
    /// `None` matches every version.
    pub version: Option<String>,
}

impl ModuleScope {
    pub fn new<S: Into<String>>(path: S, version: Option<String>) -> Self {
        Self {
            path: path.into(),
            version: version.filter(|v| !v.is_empty()),
        }
    }

    pub fn any_version<S: Into<String>>(path: S) -> Self {
        Self::new(path, None)
    }

    pub fn matches(&self, reference: &ModuleReference) -> bool {
        self.path == reference.path
            && self
                .version
                .as_deref()
                .is_none_or(|v| v == reference.version)
    }
}

/// Replace whatever the classifier found with these license names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LicenseOverride {
    pub scope: ModuleScope,
    pub licenses: Vec<String>,
}

/// Suppress license-not-permitted findings for a module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotPermittedException {
    pub scope: ModuleScope,
    /// Empty suppresses every finding for the module.
    pub licenses: Vec<String>,
}

impl NotPermittedException {
    pub fn covers(&self, license: &str) -> bool {
        self.licenses.is_empty() || self.licenses.iter().any(|l| l == license)
    }
}

/// The effective policy the engine evaluates against.
#[derive(Clone, Debug, PartialEq)]
pub struct Policy {
    pub threshold: f64,
    /// Empty disables license-name enforcement.
    pub allow: Vec<String>,
    pub overrides: Vec<LicenseOverride>,
    pub unresolvable_exceptions: Vec<ModuleScope>,
    pub not_permitted_exceptions: Vec<NotPermittedException>,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            allow: Vec::new(),
            overrides: Vec::new(),
            unresolvable_exceptions: Vec::new(),
            not_permitted_exceptions: Vec::new(),
        }
    }
}
