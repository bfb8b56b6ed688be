//! Shared test utilities for the licguard workspace.
//!
//! Deterministic stand-ins for the toolchain collaborators, plus JSON
//! normalization for comparing summaries produced in scratch directories.

#![forbid(unsafe_code)]

use async_trait::async_trait;
use licguard_toolchain::{
    ClassifyLicense, ExtractBuildInfo, LicenseMatch, ResolveModules, ToolchainError,
    UnresolvedModule, unresolved_refs,
};
use licguard_types::{Module, ModuleReference};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Returns a fixed manifest regardless of the requested binaries.
#[derive(Debug)]
pub struct StaticExtractor {
    result: Result<String, String>,
    requests: Mutex<Vec<Vec<String>>>,
}

impl StaticExtractor {
    pub fn new<S: Into<String>>(manifest: S) -> Self {
        Self {
            result: Ok(manifest.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call as if `go version -m` exited non-zero.
    pub fn failing<S: Into<String>>(stderr: S) -> Self {
        Self {
            result: Err(stderr.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Binary lists passed to each `extract` call so far.
    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ExtractBuildInfo for StaticExtractor {
    async fn extract(&self, binaries: &[String]) -> Result<String, ToolchainError> {
        if let Ok(mut r) = self.requests.lock() {
            r.push(binaries.to_vec());
        }
        self.result
            .clone()
            .map_err(|stderr| ToolchainError::CommandFailed {
                command: "go version -m".to_string(),
                status: "exit status: 1".to_string(),
                stderr,
            })
    }
}

/// Resolves references from a fixed table; anything else is unresolved.
#[derive(Debug, Default)]
pub struct StaticResolver {
    modules: BTreeMap<ModuleReference, Module>,
    requests: Mutex<Vec<Vec<ModuleReference>>>,
}

impl StaticResolver {
    pub fn new<I: IntoIterator<Item = Module>>(modules: I) -> Self {
        Self {
            modules: modules
                .into_iter()
                .map(|m| (m.reference.clone(), m))
                .collect(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Vec<ModuleReference>> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ResolveModules for StaticResolver {
    async fn resolve(&self, refs: &[ModuleReference]) -> Result<Vec<Module>, ToolchainError> {
        if let Ok(mut r) = self.requests.lock() {
            r.push(refs.to_vec());
        }
        let found: Vec<Module> = refs
            .iter()
            .filter_map(|r| self.modules.get(r).cloned())
            .collect();
        let missing = unresolved_refs(refs, &found);
        if !missing.is_empty() {
            return Err(ToolchainError::Unresolved(
                missing
                    .into_iter()
                    .map(|reference| UnresolvedModule {
                        reference,
                        reason: None,
                    })
                    .collect(),
            ));
        }
        Ok(found)
    }
}

/// Never finishes resolving; for exercising cancellation.
#[derive(Debug, Default)]
pub struct PendingResolver;

#[async_trait]
impl ResolveModules for PendingResolver {
    async fn resolve(&self, _refs: &[ModuleReference]) -> Result<Vec<Module>, ToolchainError> {
        std::future::pending().await
    }
}

/// Classifies a license file by its exact (trimmed) text.
#[derive(Debug, Default)]
pub struct StaticClassifier {
    by_text: BTreeMap<String, Vec<LicenseMatch>>,
}

impl StaticClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files whose trimmed text equals `text` yield `name` at `confidence`.
    pub fn with<T: Into<String>, N: Into<String>>(
        mut self,
        text: T,
        name: N,
        confidence: f64,
    ) -> Self {
        self.by_text
            .entry(text.into())
            .or_default()
            .push(LicenseMatch::new(name, confidence));
        self
    }
}

impl ClassifyLicense for StaticClassifier {
    fn classify(
        &self,
        content: &[u8],
        threshold: f64,
    ) -> Result<Vec<LicenseMatch>, ToolchainError> {
        let text = String::from_utf8_lossy(content);
        Ok(self
            .by_text
            .get(text.trim())
            .map(|hits| {
                hits.iter()
                    .filter(|h| h.confidence >= threshold)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Normalize scratch-directory dependent JSON for golden comparison.
///
/// Every string starting with `root` has that prefix replaced by `__ROOT__`,
/// and license `content` bodies are replaced by `__CONTENT__`.
pub fn normalize_summary(mut value: Value, root: &str) -> Value {
    normalize_recursive(&mut value, root);
    value
}

fn normalize_recursive(value: &mut Value, root: &str) {
    match value {
        Value::Object(map) => {
            if map.contains_key("content") {
                map.insert(
                    "content".to_string(),
                    Value::String("__CONTENT__".to_string()),
                );
            }
            for val in map.values_mut() {
                normalize_recursive(val, root);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_recursive(val, root);
            }
        }
        Value::String(s) => {
            if !root.is_empty()
                && let Some(rest) = s.strip_prefix(root)
            {
                *s = format!("__ROOT__{rest}");
            }
        }
        _ => {}
    }
}
