use crate::{ClassifyLicense, ToolchainError, discover::license_files};
use askalono::{ScanStrategy, Store, TextData};
use licguard_types::{License, Module};
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

/// One classifier hit for a license file.
#[derive(Clone, Debug, PartialEq)]
pub struct LicenseMatch {
    pub name: String,
    pub confidence: f64,
}

impl LicenseMatch {
    pub fn new<S: Into<String>>(name: S, confidence: f64) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

/// SPDX texts compiled into the binary, used when no cache file is given.
const BUNDLED_LICENSES: &[(&str, &str)] = &[
    ("0BSD", include_str!("../licenses/0BSD.txt")),
    ("Apache-2.0", include_str!("../licenses/Apache-2.0.txt")),
    ("BSD-2-Clause", include_str!("../licenses/BSD-2-Clause.txt")),
    ("BSD-3-Clause", include_str!("../licenses/BSD-3-Clause.txt")),
    ("BSL-1.0", include_str!("../licenses/BSL-1.0.txt")),
    ("ISC", include_str!("../licenses/ISC.txt")),
    ("MIT", include_str!("../licenses/MIT.txt")),
    ("Unlicense", include_str!("../licenses/Unlicense.txt")),
    ("Zlib", include_str!("../licenses/Zlib.txt")),
];

/// License classifier backed by an askalono store.
pub struct AskalonoClassifier {
    store: Store,
}

impl AskalonoClassifier {
    /// The licenses shipped with licguard.
    pub fn bundled() -> Self {
        let mut store = Store::new();
        for (name, text) in BUNDLED_LICENSES {
            store.add_license((*name).to_string(), TextData::from(*text));
        }
        Self { store }
    }

    /// Load a store from an askalono cache file (`askalono cache` output).
    pub fn from_cache_file(path: &Path) -> Result<Self, ToolchainError> {
        let file = fs::File::open(path).map_err(|source| ToolchainError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_cache(file)
    }

    pub fn from_cache<R: Read>(reader: R) -> Result<Self, ToolchainError> {
        let store =
            Store::from_cache(reader).map_err(|e| ToolchainError::Classifier(e.to_string()))?;
        Ok(Self { store })
    }

    /// Names of the licenses this classifier can identify, sorted.
    pub fn license_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.store.licenses().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl ClassifyLicense for AskalonoClassifier {
    fn classify(
        &self,
        content: &[u8],
        threshold: f64,
    ) -> Result<Vec<LicenseMatch>, ToolchainError> {
        // askalono indexes the best match unconditionally.
        if self.store.is_empty() {
            return Ok(Vec::new());
        }
        let text = String::from_utf8_lossy(content);
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let strategy = ScanStrategy::new(&self.store)
            .confidence_threshold(threshold as f32)
            .optimize(true);
        let result = strategy
            .scan(&TextData::from(text.as_ref()))
            .map_err(|e| ToolchainError::Classifier(e.to_string()))?;

        let mut hits = Vec::new();
        if let Some(license) = result.license {
            hits.push(LicenseMatch::new(license.name, f64::from(result.score)));
        }
        for contained in result.containing {
            let score = f64::from(contained.score);
            if score >= threshold {
                hits.push(LicenseMatch::new(contained.license.name, score));
            }
        }
        Ok(hits)
    }
}

/// Attach classified licenses to a resolved module.
///
/// Local modules and modules without a source directory are returned
/// untouched. Within one file, repeated names keep the highest confidence.
pub fn classify_module<C: ClassifyLicense + ?Sized>(
    mut module: Module,
    classifier: &C,
    threshold: f64,
) -> Result<Module, ToolchainError> {
    if module.reference.is_local() {
        return Ok(module);
    }
    let Some(dir) = module.dir.as_deref() else {
        return Ok(module);
    };

    let mut licenses = Vec::new();
    for path in license_files(Path::new(dir))? {
        let bytes = fs::read(&path).map_err(|source| ToolchainError::Io {
            path: path.clone(),
            source,
        })?;

        let mut best: BTreeMap<String, f64> = BTreeMap::new();
        for hit in classifier.classify(&bytes, threshold)? {
            let entry = best.entry(hit.name).or_insert(hit.confidence);
            if hit.confidence > *entry {
                *entry = hit.confidence;
            }
        }

        let content = String::from_utf8_lossy(&bytes).into_owned();
        let file = path.display().to_string();
        licenses.extend(best.into_iter().map(|(name, confidence)| License {
            name,
            path: Some(file.clone()),
            content: Some(content.clone()),
            confidence,
        }));
    }

    tracing::debug!(module = %module.reference, found = licenses.len(), "classified module");
    module.licenses = licenses;
    Ok(module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use licguard_types::ModuleReference;

    /// Maps file contents line by line: `<name> <confidence>`.
    struct LineClassifier;

    impl ClassifyLicense for LineClassifier {
        fn classify(
            &self,
            content: &[u8],
            threshold: f64,
        ) -> Result<Vec<LicenseMatch>, ToolchainError> {
            let text = String::from_utf8_lossy(content);
            Ok(text
                .lines()
                .filter_map(|l| {
                    let (name, conf) = l.split_once(' ')?;
                    let conf: f64 = conf.parse().ok()?;
                    (conf >= threshold).then(|| LicenseMatch::new(name, conf))
                })
                .collect())
        }
    }

    fn module_in(dir: &Path) -> Module {
        Module::new(
            ModuleReference::new("example.com/lib", "v1.0.0"),
            Some(dir.display().to_string()),
        )
    }

    #[test]
    fn hits_become_licenses_with_file_details() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join("LICENSE"), "Apache-2.0 0.95\n").expect("write");

        let m = classify_module(module_in(tmp.path()), &LineClassifier, 0.8).expect("classify");
        assert_eq!(m.licenses.len(), 1);
        let l = &m.licenses[0];
        assert_eq!(l.name, "Apache-2.0");
        assert_eq!(l.confidence, 0.95);
        assert_eq!(l.content.as_deref(), Some("Apache-2.0 0.95\n"));
        assert!(l.path.as_deref().is_some_and(|p| p.ends_with("LICENSE")));
    }

    #[test]
    fn duplicate_names_in_one_file_keep_best_confidence() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join("LICENSE"), "MIT 0.85\nMIT 0.97\nMIT 0.9\n").expect("write");

        let m = classify_module(module_in(tmp.path()), &LineClassifier, 0.8).expect("classify");
        assert_eq!(m.license_names(), vec!["MIT"]);
        assert_eq!(m.licenses[0].confidence, 0.97);
    }

    #[test]
    fn same_license_in_two_files_is_reported_twice() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join("COPYING"), "MIT 0.9\n").expect("write");
        fs::write(tmp.path().join("LICENSE"), "MIT 0.9\n").expect("write");

        let m = classify_module(module_in(tmp.path()), &LineClassifier, 0.8).expect("classify");
        assert_eq!(m.license_names(), vec!["MIT", "MIT"]);
    }

    #[test]
    fn below_threshold_hits_are_dropped() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join("LICENSE"), "MIT 0.5\n").expect("write");

        let m = classify_module(module_in(tmp.path()), &LineClassifier, 0.8).expect("classify");
        assert!(m.licenses.is_empty());
    }

    #[test]
    fn local_modules_are_skipped() {
        let m = Module::new(ModuleReference::new("../fork", ""), Some("/nonexistent".into()));
        let out = classify_module(m.clone(), &LineClassifier, 0.8).expect("classify");
        assert_eq!(out, m);
    }

    #[test]
    fn missing_module_dir_is_fatal() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let m = module_in(&tmp.path().join("gone"));
        assert!(classify_module(m, &LineClassifier, 0.8).is_err());
    }

    const MIT: &str = include_str!("../licenses/MIT.txt");

    #[test]
    fn bundled_store_knows_common_licenses() {
        let classifier = AskalonoClassifier::bundled();
        let names = classifier.license_names();
        for expected in ["Apache-2.0", "BSD-3-Clause", "ISC", "MIT"] {
            assert!(names.contains(&expected), "{expected} missing from {names:?}");
        }
    }

    #[test]
    fn exact_license_text_is_identified() {
        let hits = AskalonoClassifier::bundled()
            .classify(MIT.as_bytes(), 0.8)
            .expect("classify");
        assert_eq!(hits.len(), 1, "{hits:?}");
        assert_eq!(hits[0].name, "MIT");
        assert!(hits[0].confidence > 0.99, "{hits:?}");
    }

    #[test]
    fn copyright_line_does_not_hurt_the_match() {
        let text = MIT.replace(
            "Copyright (c) <year> <copyright holders>",
            "Copyright (c) 2021 Example Corp",
        );
        let hits = AskalonoClassifier::bundled()
            .classify(text.as_bytes(), 0.9)
            .expect("classify");
        assert!(hits.iter().any(|h| h.name == "MIT"), "{hits:?}");
    }

    #[test]
    fn license_inside_a_larger_file_is_found() {
        let text = format!(
            "Vendored third party notices\n\n\
             The parser in this directory was imported from an upstream project.\n\
             Its original license follows below and applies to those files only.\n\n{MIT}"
        );
        let hits = AskalonoClassifier::bundled()
            .classify(text.as_bytes(), 0.8)
            .expect("classify");
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|h| h.name == "MIT"), "{hits:?}");
        assert!(hits.iter().all(|h| h.confidence >= 0.8), "{hits:?}");
    }

    #[test]
    fn unrelated_text_is_below_threshold() {
        let text = "This directory holds generated protocol buffer code.\n\
                    Run make generate after editing any of the schema files.\n";
        let hits = AskalonoClassifier::bundled()
            .classify(text.as_bytes(), 0.8)
            .expect("classify");
        assert!(hits.is_empty(), "{hits:?}");
    }

    #[test]
    fn threshold_gates_partial_matches() {
        // The first half of MIT: a weak match, well under a strict floor.
        let half: String = MIT.lines().take(8).collect::<Vec<_>>().join("\n");
        let strict = AskalonoClassifier::bundled()
            .classify(half.as_bytes(), 0.99)
            .expect("classify");
        assert!(strict.is_empty(), "{strict:?}");
    }

    #[test]
    fn empty_store_identifies_nothing() {
        let c = AskalonoClassifier {
            store: Store::new(),
        };
        assert!(c.classify(MIT.as_bytes(), 0.8).expect("classify").is_empty());
    }

    #[test]
    fn blank_file_identifies_nothing() {
        let hits = AskalonoClassifier::bundled()
            .classify(b"  \n\n", 0.8)
            .expect("classify");
        assert!(hits.is_empty());
    }

    #[test]
    fn corrupt_cache_is_a_classifier_error() {
        let err = AskalonoClassifier::from_cache(&b"not a cache"[..])
            .err()
            .expect("bad cache");
        assert!(matches!(err, ToolchainError::Classifier(_)));
    }
}
