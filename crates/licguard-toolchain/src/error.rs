use licguard_types::ModuleReference;
use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ToolchainError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("failed to create a scratch directory: {0}")]
    Scratch(#[source] io::Error),

    #[error("failed to decode go output: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{}", missing_lines(.0))]
    MissingBuildInfo(Vec<String>),

    #[error("{}", unresolved_lines(.0))]
    Unresolved(Vec<UnresolvedModule>),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid license file pattern: {0}")]
    Pattern(#[from] globset::Error),

    #[error("license classifier: {0}")]
    Classifier(String),
}

/// A requested reference the resolver did not return.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnresolvedModule {
    pub reference: ModuleReference,
    /// Error text reported by the toolchain, if any.
    pub reason: Option<String>,
}

impl fmt::Display for UnresolvedModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "module {} could not be resolved", self.reference)?;
        if let Some(reason) = &self.reason {
            write!(f, ": {reason}")?;
        }
        Ok(())
    }
}

fn missing_lines(paths: &[String]) -> String {
    paths
        .iter()
        .map(|p| format!("modules could not be obtained from {p}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn unresolved_lines(modules: &[UnresolvedModule]) -> String {
    modules
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
