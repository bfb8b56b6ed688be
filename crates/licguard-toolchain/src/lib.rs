//! Adapters around the outside world: the Go toolchain and the license classifier.
//!
//! The traits here are the seams the use-case layer is generic over; the
//! concrete types shell out to `go` and wrap `askalono`.

#![forbid(unsafe_code)]

mod classify;
mod discover;
mod error;
mod go;

pub use classify::{AskalonoClassifier, LicenseMatch, classify_module};
pub use discover::license_files;
pub use error::{ToolchainError, UnresolvedModule};
pub use go::{GoToolchain, unresolved_refs};

use async_trait::async_trait;
use licguard_types::{Module, ModuleReference};

/// Produces manifest text (`go version -m` format) for a set of binaries.
#[async_trait]
pub trait ExtractBuildInfo: Send + Sync {
    async fn extract(&self, binaries: &[String]) -> Result<String, ToolchainError>;
}

/// Locates the source tree of every referenced module.
///
/// Implementations must return one module per requested reference or fail
/// with [`ToolchainError::Unresolved`].
#[async_trait]
pub trait ResolveModules: Send + Sync {
    async fn resolve(&self, refs: &[ModuleReference]) -> Result<Vec<Module>, ToolchainError>;
}

/// Names the licenses contained in one license file.
pub trait ClassifyLicense: Send + Sync {
    /// Hits scoring below `threshold` are dropped.
    fn classify(&self, content: &[u8], threshold: f64) -> Result<Vec<LicenseMatch>, ToolchainError>;
}
