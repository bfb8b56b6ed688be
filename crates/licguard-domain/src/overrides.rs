use crate::policy::LicenseOverride;
use licguard_types::{License, Module};

/// Replace the license list of every module matched by an override.
///
/// Runs after classification, so a matching override fully supersedes what
/// the classifier found. When several overrides match a module the last one
/// in configuration order wins.
pub fn apply_overrides(mut modules: Vec<Module>, overrides: &[LicenseOverride]) -> Vec<Module> {
    if overrides.is_empty() {
        return modules;
    }

    for module in &mut modules {
        let Some(o) = overrides
            .iter()
            .rev()
            .find(|o| o.scope.matches(&module.reference))
        else {
            continue;
        };
        module.licenses = o.licenses.iter().map(License::declared).collect();
    }
    modules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ModuleScope;
    use crate::test_support::{classified, license_override};

    #[test]
    fn override_replaces_classifier_output() {
        let modules = vec![classified("example.com/lib", "v1.0.0", &[("Unknown", 0.81)])];
        let out = apply_overrides(
            modules,
            &[license_override("example.com/lib", None, &["MIT", "BSD-3-Clause"])],
        );

        assert_eq!(out[0].license_names(), vec!["MIT", "BSD-3-Clause"]);
        assert!(out[0].licenses.iter().all(|l| l.confidence == 1.0));
        assert!(out[0].licenses.iter().all(|l| l.path.is_none()));
    }

    #[test]
    fn versioned_override_leaves_other_versions_alone() {
        let modules = vec![
            classified("example.com/lib", "v1.0.0", &[("Apache-2.0", 0.93)]),
            classified("example.com/lib", "v2.0.0", &[("Apache-2.0", 0.93)]),
        ];
        let out = apply_overrides(
            modules,
            &[license_override("example.com/lib", Some("v2.0.0"), &["MIT"])],
        );

        assert_eq!(out[0].license_names(), vec!["Apache-2.0"]);
        assert_eq!(out[0].licenses[0].confidence, 0.93);
        assert_eq!(out[1].license_names(), vec!["MIT"]);
    }

    #[test]
    fn later_override_wins() {
        let modules = vec![classified("example.com/lib", "v1.0.0", &[])];
        let out = apply_overrides(
            modules,
            &[
                license_override("example.com/lib", None, &["MIT"]),
                license_override("example.com/lib", None, &["ISC"]),
            ],
        );
        assert_eq!(out[0].license_names(), vec!["ISC"]);
    }

    #[test]
    fn unmatched_modules_are_untouched() {
        let modules = vec![classified("example.com/other", "v1.0.0", &[("MIT", 0.9)])];
        let before = modules.clone();
        let out = apply_overrides(
            modules,
            &[LicenseOverride {
                scope: ModuleScope::any_version("example.com/lib"),
                licenses: vec!["ISC".to_string()],
            }],
        );
        assert_eq!(out, before);
    }
}
