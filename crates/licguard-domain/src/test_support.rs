use crate::policy::{LicenseOverride, ModuleScope, Policy};
use licguard_types::{BuildInfo, License, Module, ModuleReference};

pub fn build_info(path: &str, refs: &[(&str, &str)]) -> BuildInfo {
    let mut info = BuildInfo::new(path);
    info.module_refs = refs
        .iter()
        .map(|(p, v)| ModuleReference::new(*p, *v))
        .collect();
    info
}

pub fn classified(path: &str, version: &str, licenses: &[(&str, f64)]) -> Module {
    let mut module = Module::new(ModuleReference::new(path, version), Some(format!("/mod/{path}")));
    module.licenses = licenses
        .iter()
        .map(|(name, confidence)| License {
            name: (*name).to_string(),
            path: Some(format!("/mod/{path}/LICENSE")),
            content: None,
            confidence: *confidence,
        })
        .collect();
    module
}

pub fn license_override(path: &str, version: Option<&str>, licenses: &[&str]) -> LicenseOverride {
    LicenseOverride {
        scope: ModuleScope::new(path, version.map(str::to_string)),
        licenses: licenses.iter().map(|l| l.to_string()).collect(),
    }
}

pub fn policy_allowing(allow: &[&str]) -> Policy {
    Policy {
        allow: allow.iter().map(|l| l.to_string()).collect(),
        ..Policy::default()
    }
}
