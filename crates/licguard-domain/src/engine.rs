use crate::policy::{ModuleScope, NotPermittedException, Policy};
use licguard_types::{BuildInfo, Decision, EvaluatedModule, Module, ModuleReference};
use std::collections::{BTreeMap, BTreeSet};

/// Decide, for every module, whether its licenses are acceptable.
///
/// Per module, in order:
/// 1. no licenses at all -> `UnresolvableLicense`, unless excepted
/// 2. each license outside a non-empty allow list -> `LicenseNotPermitted`,
///    unless excepted; every such name is recorded
///
/// Results are sorted by module path. Ties keep input order.
pub fn evaluate(
    policy: &Policy,
    binaries: &[BuildInfo],
    modules: Vec<Module>,
) -> Vec<EvaluatedModule> {
    let usage = usage_index(binaries);
    let allow: BTreeSet<&str> = policy.allow.iter().map(String::as_str).collect();
    let unresolvable = index_by_path(&policy.unresolvable_exceptions, |s| s);
    let not_permitted = index_by_path(&policy.not_permitted_exceptions, |e| &e.scope);

    let mut results: Vec<EvaluatedModule> = modules
        .into_iter()
        .map(|module| {
            let binaries = usage
                .get(&module.reference)
                .map(|paths| paths.iter().map(|p| p.to_string()).collect())
                .unwrap_or_default();

            let mut decision = Decision::Allowed;
            let mut not_permitted_names = Vec::new();

            if module.licenses.is_empty()
                && !is_unresolvable_excepted(&unresolvable, &module.reference)
            {
                decision = Decision::UnresolvableLicense;
            }

            for license in &module.licenses {
                if !allow.is_empty()
                    && !allow.contains(license.name.as_str())
                    && !is_not_permitted_excepted(&not_permitted, &module.reference, &license.name)
                {
                    decision = Decision::LicenseNotPermitted;
                    not_permitted_names.push(license.name.clone());
                }
            }

            EvaluatedModule {
                module,
                decision,
                not_permitted: not_permitted_names,
                binaries,
            }
        })
        .collect();

    results.sort_by(|a, b| a.module.path().cmp(b.module.path()));
    results
}

/// Module reference -> paths of the binaries that declare it.
fn usage_index(binaries: &[BuildInfo]) -> BTreeMap<&ModuleReference, Vec<&str>> {
    let mut index: BTreeMap<&ModuleReference, Vec<&str>> = BTreeMap::new();
    for bin in binaries {
        for r in &bin.module_refs {
            index.entry(r).or_default().push(bin.path.as_str());
        }
    }
    index
}

fn index_by_path<'a, T>(
    rules: &'a [T],
    scope: impl Fn(&'a T) -> &'a ModuleScope,
) -> BTreeMap<&'a str, Vec<&'a T>> {
    let mut index: BTreeMap<&str, Vec<&T>> = BTreeMap::new();
    for rule in rules {
        index.entry(scope(rule).path.as_str()).or_default().push(rule);
    }
    index
}

fn is_unresolvable_excepted(
    index: &BTreeMap<&str, Vec<&ModuleScope>>,
    reference: &ModuleReference,
) -> bool {
    index
        .get(reference.path.as_str())
        .is_some_and(|scopes| scopes.iter().any(|s| s.matches(reference)))
}

fn is_not_permitted_excepted(
    index: &BTreeMap<&str, Vec<&NotPermittedException>>,
    reference: &ModuleReference,
    license: &str,
) -> bool {
    index.get(reference.path.as_str()).is_some_and(|exceptions| {
        exceptions
            .iter()
            .any(|e| e.scope.matches(reference) && e.covers(license))
    })
}
