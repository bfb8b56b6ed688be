use crate::policy::{ModuleScope, Policy};
use crate::test_support::{build_info, classified, license_override};
use crate::{apply_overrides, evaluate, unique_module_refs};
use licguard_types::Decision;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn module_path() -> impl Strategy<Value = String> {
    "example\\.com/[a-c]{1,2}"
}

fn version() -> impl Strategy<Value = String> {
    "v[0-2]\\.[0-2]\\.0"
}

fn license_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["MIT", "Apache-2.0", "GPL-3.0", "BSD-3-Clause"])
        .prop_map(str::to_string)
}

proptest! {
    #[test]
    fn unique_refs_match_set_cardinality(
        bins in prop::collection::vec(
            prop::collection::vec((module_path(), version()), 0..6),
            0..4,
        )
    ) {
        let infos: Vec<_> = bins
            .iter()
            .enumerate()
            .map(|(i, refs)| {
                let pairs: Vec<(&str, &str)> =
                    refs.iter().map(|(p, v)| (p.as_str(), v.as_str())).collect();
                build_info(&format!("/bin/{i}"), &pairs)
            })
            .collect();

        let expected: BTreeSet<(String, String)> = bins.into_iter().flatten().collect();
        let refs = unique_module_refs(&infos);
        prop_assert_eq!(refs.len(), expected.len());
        prop_assert!(refs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn empty_allow_list_never_rejects_by_name(
        licenses in prop::collection::vec(license_name(), 1..4)
    ) {
        let pairs: Vec<(&str, f64)> = licenses.iter().map(|l| (l.as_str(), 0.9)).collect();
        let modules = vec![classified("example.com/a", "v1.0.0", &pairs)];
        let results = evaluate(&Policy::default(), &[], modules);
        prop_assert_eq!(results[0].decision, Decision::Allowed);
        prop_assert!(results[0].not_permitted.is_empty());
    }

    #[test]
    fn versioned_override_touches_only_its_version(
        target in version(),
        versions in prop::collection::vec(version(), 1..5),
    ) {
        let modules: Vec<_> = versions
            .iter()
            .map(|v| classified("example.com/a", v, &[("Apache-2.0", 0.9)]))
            .collect();
        let out = apply_overrides(
            modules,
            &[license_override("example.com/a", Some(target.as_str()), &["MIT"])],
        );
        for m in &out {
            let expected = if m.version() == target { "MIT" } else { "Apache-2.0" };
            prop_assert_eq!(m.license_names(), vec![expected]);
        }
    }

    #[test]
    fn decision_is_allowed_iff_no_findings(
        licenses in prop::collection::vec(license_name(), 0..4),
        allow in prop::collection::vec(license_name(), 0..3),
        excepted in any::<bool>(),
    ) {
        let mut policy = Policy {
            allow,
            ..Policy::default()
        };
        if excepted {
            policy.unresolvable_exceptions.push(ModuleScope::any_version("example.com/a"));
        }
        let pairs: Vec<(&str, f64)> = licenses.iter().map(|l| (l.as_str(), 0.9)).collect();
        let r = &evaluate(&policy, &[], vec![classified("example.com/a", "v1.0.0", &pairs)])[0];

        match r.decision {
            Decision::Allowed => prop_assert!(r.not_permitted.is_empty()),
            Decision::LicenseNotPermitted => prop_assert!(!r.not_permitted.is_empty()),
            Decision::UnresolvableLicense => {
                prop_assert!(licenses.is_empty());
                prop_assert!(!excepted);
            }
        }
    }
}
