use licguard_types::{BuildInfo, ModuleReference};
use std::collections::BTreeSet;

/// Every distinct module reference across the supplied binaries.
///
/// The result is sorted by (path, version) so downstream tooling sees a
/// stable argument order.
pub fn unique_module_refs(infos: &[BuildInfo]) -> Vec<ModuleReference> {
    infos
        .iter()
        .flat_map(|info| info.module_refs.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::build_info;

    #[test]
    fn shared_dependencies_collapse() {
        let infos = vec![
            build_info("/bin/a", &[("example.com/x", "v1.0.0"), ("example.com/y", "v1.0.0")]),
            build_info("/bin/b", &[("example.com/x", "v1.0.0"), ("example.com/x", "v1.1.0")]),
        ];
        let refs = unique_module_refs(&infos);
        assert_eq!(
            refs,
            vec![
                ModuleReference::new("example.com/x", "v1.0.0"),
                ModuleReference::new("example.com/x", "v1.1.0"),
                ModuleReference::new("example.com/y", "v1.0.0"),
            ]
        );
    }

    #[test]
    fn no_binaries_no_refs() {
        assert!(unique_module_refs(&[]).is_empty());
    }
}
