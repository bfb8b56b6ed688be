use crate::{ExtractBuildInfo, ResolveModules, ToolchainError, UnresolvedModule};
use async_trait::async_trait;
use licguard_types::{Module, ModuleReference};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Extractor and resolver backed by the `go` command.
#[derive(Clone, Debug)]
pub struct GoToolchain {
    go: PathBuf,
    /// Directory whose `vendor/` tree is consulted in vendor mode.
    work_dir: PathBuf,
    goflags: Option<String>,
}

impl GoToolchain {
    /// `go` is the toolchain binary; `GOFLAGS` is captured from the environment.
    pub fn new<P: Into<PathBuf>>(go: P) -> Self {
        Self {
            go: go.into(),
            work_dir: PathBuf::from("."),
            goflags: std::env::var("GOFLAGS").ok(),
        }
    }

    pub fn with_work_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.work_dir = dir.into();
        self
    }

    pub fn with_goflags(mut self, goflags: Option<String>) -> Self {
        self.goflags = goflags;
        self
    }

    fn vendor_mode(&self) -> bool {
        self.goflags
            .as_deref()
            .is_some_and(|f| f.contains("-mod=vendor"))
            || self.work_dir.join("vendor").join("modules.txt").is_file()
    }

    /// Run `go` in a scratch directory and capture its output, whatever the
    /// exit status.
    async fn output(&self, args: &[String]) -> Result<GoOutput, ToolchainError> {
        let scratch = tempfile::Builder::new()
            .prefix("licguard")
            .tempdir()
            .map_err(ToolchainError::Scratch)?;
        let command = format!("{} {}", self.go.display(), args.join(" "));
        debug!(%command, "running go toolchain");

        let output = Command::new(&self.go)
            .args(args)
            .current_dir(scratch.path())
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ToolchainError::Spawn {
                program: self.go.display().to_string(),
                source,
            })?;
        debug!(status = %output.status, bytes = output.stdout.len(), "go toolchain finished");
        Ok(GoOutput { command, output })
    }

    async fn run(&self, args: &[String]) -> Result<Vec<u8>, ToolchainError> {
        let out = self.output(args).await?;
        if !out.output.status.success() {
            return Err(out.into_failure());
        }
        Ok(out.output.stdout)
    }

    /// `go mod download -json` reports per-module failures in its JSON and
    /// then exits 1, so the stream is decoded regardless of the status.
    async fn module_stream(&self, args: &[String]) -> Result<Vec<GoModule>, ToolchainError> {
        let out = self.output(args).await?;
        if out.output.status.success() {
            return decode_stream(&out.output.stdout);
        }
        match decode_stream(&out.output.stdout) {
            Ok(entries) if !entries.is_empty() => Ok(entries),
            _ => Err(out.into_failure()),
        }
    }
}

struct GoOutput {
    command: String,
    output: std::process::Output,
}

impl GoOutput {
    fn into_failure(self) -> ToolchainError {
        ToolchainError::CommandFailed {
            command: self.command,
            status: self.output.status.to_string(),
            stderr: String::from_utf8_lossy(&self.output.stderr).trim().to_string(),
        }
    }
}

#[async_trait]
impl ExtractBuildInfo for GoToolchain {
    async fn extract(&self, binaries: &[String]) -> Result<String, ToolchainError> {
        let mut args = vec!["version".to_string(), "-m".to_string()];
        args.extend(binaries.iter().cloned());
        let stdout = self.run(&args).await?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

#[async_trait]
impl ResolveModules for GoToolchain {
    async fn resolve(&self, refs: &[ModuleReference]) -> Result<Vec<Module>, ToolchainError> {
        if refs.is_empty() {
            return Ok(Vec::new());
        }

        let vendor = self.vendor_mode();
        let base: &[&str] = if vendor {
            &["list", "-m", "-json", "-mod=readonly"]
        } else {
            &["mod", "download", "-json"]
        };
        let mut args: Vec<String> = base.iter().map(|a| a.to_string()).collect();
        let remote: Vec<&ModuleReference> = refs.iter().filter(|r| !r.is_local()).collect();
        args.extend(remote.iter().map(|r| r.to_string()));
        debug!(vendor, modules = remote.len(), "resolving modules");

        let mut modules = Vec::with_capacity(refs.len());
        let mut reasons = BTreeMap::new();
        if !remote.is_empty() {
            for entry in self.module_stream(&args).await? {
                let reference = ModuleReference::new(entry.path, entry.version);
                let mut dir = entry.dir;
                if vendor {
                    let vendored = self.work_dir.join("vendor").join(&reference.path);
                    if vendored.is_dir() {
                        dir = vendored.display().to_string();
                    }
                }
                if dir.is_empty() {
                    if let Some(err) = entry.error {
                        reasons.insert(reference, err.into_message());
                    }
                    continue;
                }
                modules.push(Module::new(reference, Some(dir)));
            }
        }

        // Filesystem replacements are never fetched; overrides supply their licenses.
        modules.extend(
            refs.iter()
                .filter(|r| r.is_local())
                .map(|r| Module::new(r.clone(), None)),
        );

        let missing = unresolved_refs(refs, &modules);
        if !missing.is_empty() {
            return Err(ToolchainError::Unresolved(
                missing
                    .into_iter()
                    .map(|reference| UnresolvedModule {
                        reason: reasons.remove(&reference),
                        reference,
                    })
                    .collect(),
            ));
        }
        Ok(modules)
    }
}

/// Requested references that have no module in `resolved`, in request order.
pub fn unresolved_refs(
    requested: &[ModuleReference],
    resolved: &[Module],
) -> Vec<ModuleReference> {
    let found: BTreeSet<&ModuleReference> = resolved.iter().map(|m| &m.reference).collect();
    requested
        .iter()
        .filter(|r| !found.contains(r))
        .cloned()
        .collect()
}

/// One object of the `go mod download -json` / `go list -m -json` stream.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GoModule {
    path: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    dir: String,
    #[serde(default)]
    error: Option<GoModuleError>,
}

/// `go mod download` reports a string, `go list` an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GoModuleError {
    Text(String),
    Detail {
        #[serde(rename = "Err")]
        err: String,
    },
}

impl GoModuleError {
    fn into_message(self) -> String {
        match self {
            GoModuleError::Text(s) => s,
            GoModuleError::Detail { err } => err,
        }
    }
}

fn decode_stream(bytes: &[u8]) -> Result<Vec<GoModule>, ToolchainError> {
    serde_json::Deserializer::from_slice(bytes)
        .into_iter::<GoModule>()
        .map(|m| m.map_err(ToolchainError::from))
        .collect()
}
