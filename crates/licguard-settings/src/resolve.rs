use crate::model::{LicguardConfigV1, ModuleSelector};
use anyhow::Context;
use licguard_domain::policy::{
    DEFAULT_THRESHOLD, LicenseOverride, ModuleScope, NotPermittedException, Policy,
};

/// Validate the parsed config and turn it into the policy the engine evaluates.
pub fn resolve_config(cfg: LicguardConfigV1) -> anyhow::Result<Policy> {
    let threshold = match cfg.threshold {
        Some(t) if !(0.0..=1.0).contains(&t) => {
            anyhow::bail!("threshold must be within [0, 1], got {t}")
        }
        Some(t) => t,
        None => DEFAULT_THRESHOLD,
    };

    let unresolvable_exceptions = cfg
        .exceptions
        .unresolvable_license
        .into_iter()
        .enumerate()
        .map(|(i, sel)| {
            scope(sel).with_context(|| format!("invalid exceptions.unresolvableLicense[{i}]"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let not_permitted_exceptions = cfg
        .exceptions
        .license_not_permitted
        .into_iter()
        .enumerate()
        .map(|(i, e)| -> anyhow::Result<NotPermittedException> {
            let scope = scope(ModuleSelector {
                path: e.path,
                version: e.version,
            })
            .with_context(|| format!("invalid exceptions.licenseNotPermitted[{i}]"))?;
            Ok(NotPermittedException {
                scope,
                licenses: e.licenses,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let overrides = cfg
        .overrides
        .into_iter()
        .enumerate()
        .map(|(i, o)| -> anyhow::Result<LicenseOverride> {
            if o.licenses.is_empty() {
                anyhow::bail!(
                    "invalid override[{i}]: override for {} declares no licenses",
                    o.path
                );
            }
            let scope = scope(ModuleSelector {
                path: o.path,
                version: o.version,
            })
            .with_context(|| format!("invalid override[{i}]"))?;
            Ok(LicenseOverride {
                scope,
                licenses: o.licenses,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Policy {
        threshold,
        allow: cfg.allow,
        overrides,
        unresolvable_exceptions,
        not_permitted_exceptions,
    })
}

fn scope(sel: ModuleSelector) -> anyhow::Result<ModuleScope> {
    if sel.path.trim().is_empty() {
        anyhow::bail!("module path must not be empty");
    }
    Ok(ModuleScope::new(sel.path, sel.version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NotPermittedExceptionConfig, OverrideConfig};

    #[test]
    fn empty_config_resolves_to_default_policy() {
        let policy = resolve_config(LicguardConfigV1::default()).expect("resolve");
        assert_eq!(policy, Policy::default());
        assert_eq!(policy.threshold, 0.80);
    }

    #[test]
    fn threshold_is_carried_and_bounded() {
        let cfg = LicguardConfigV1 {
            threshold: Some(0.95),
            ..LicguardConfigV1::default()
        };
        assert_eq!(resolve_config(cfg).expect("resolve").threshold, 0.95);

        for bad in [-0.1, 1.5, f64::NAN] {
            let cfg = LicguardConfigV1 {
                threshold: Some(bad),
                ..LicguardConfigV1::default()
            };
            let err = resolve_config(cfg).expect_err("out of range");
            assert!(err.to_string().contains("threshold"));
        }
    }

    #[test]
    fn empty_version_means_any_version() {
        let mut cfg = LicguardConfigV1::default();
        cfg.exceptions.unresolvable_license.push(ModuleSelector {
            path: "example.com/blob".to_string(),
            version: Some(String::new()),
        });
        let policy = resolve_config(cfg).expect("resolve");
        assert_eq!(
            policy.unresolvable_exceptions,
            vec![ModuleScope::any_version("example.com/blob")]
        );
    }

    #[test]
    fn exception_requires_a_path() {
        let mut cfg = LicguardConfigV1::default();
        cfg.exceptions
            .license_not_permitted
            .push(NotPermittedExceptionConfig::default());
        let err = resolve_config(cfg).expect_err("empty path");
        assert!(format!("{err:#}").contains("licenseNotPermitted[0]"));
        assert!(format!("{err:#}").contains("module path must not be empty"));
    }

    #[test]
    fn override_requires_licenses() {
        let cfg = LicguardConfigV1 {
            overrides: vec![OverrideConfig {
                path: "example.com/lib".to_string(),
                version: None,
                licenses: Vec::new(),
            }],
            ..LicguardConfigV1::default()
        };
        let err = resolve_config(cfg).expect_err("no licenses");
        assert!(err.to_string().contains("declares no licenses"));
    }

    #[test]
    fn overrides_keep_configuration_order() {
        let cfg = LicguardConfigV1 {
            overrides: vec![
                OverrideConfig {
                    path: "example.com/lib".to_string(),
                    version: None,
                    licenses: vec!["MIT".to_string()],
                },
                OverrideConfig {
                    path: "example.com/lib".to_string(),
                    version: Some("v1.0.0".to_string()),
                    licenses: vec!["ISC".to_string()],
                },
            ],
            ..LicguardConfigV1::default()
        };
        let policy = resolve_config(cfg).expect("resolve");
        assert_eq!(policy.overrides.len(), 2);
        assert_eq!(policy.overrides[1].licenses, vec!["ISC".to_string()]);
        assert_eq!(policy.overrides[1].scope.version.as_deref(), Some("v1.0.0"));
    }
}
