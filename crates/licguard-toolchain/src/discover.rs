use crate::ToolchainError;
use globset::{GlobBuilder, GlobMatcher};
use std::fs;
use std::path::{Path, PathBuf};

/// `LICENSE`, `LICENCE.md`, `COPYING`, `license-mit`, ...
const LICENSE_FILE_GLOB: &str = "{li[cs]en[cs]e,copying}*";

fn matcher() -> Result<GlobMatcher, ToolchainError> {
    Ok(GlobBuilder::new(LICENSE_FILE_GLOB)
        .case_insensitive(true)
        .literal_separator(true)
        .build()?
        .compile_matcher())
}

/// Candidate license files directly inside `dir`, sorted by file name.
///
/// Subdirectories are not searched and Go sources are never candidates.
pub fn license_files(dir: &Path) -> Result<Vec<PathBuf>, ToolchainError> {
    let matcher = matcher()?;
    let io_err = |source| ToolchainError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut out = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if entry.file_type().map_err(io_err)?.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if matcher.is_match(name) && !name.ends_with(".go") {
            out.push(entry.path());
        }
    }
    out.sort();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .filter_map(|p| p.file_name()?.to_str().map(str::to_string))
            .collect()
    }

    #[test]
    fn finds_license_like_files_only() {
        let tmp = tempfile::tempdir().expect("tempdir");
        for name in [
            "LICENSE",
            "licence.txt",
            "COPYING",
            "License-MIT.md",
            "license.go",
            "README.md",
            "main.go",
            "NOTICE",
        ] {
            fs::write(tmp.path().join(name), "text").expect("write");
        }
        fs::create_dir(tmp.path().join("licenses")).expect("mkdir");

        let found = license_files(tmp.path()).expect("scan");
        assert_eq!(names(&found), vec!["COPYING", "LICENSE", "License-MIT.md", "licence.txt"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = license_files(&tmp.path().join("absent")).expect_err("missing dir");
        assert!(matches!(err, ToolchainError::Io { .. }));
    }
}
