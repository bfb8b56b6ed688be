//! The `scan` use case: binaries in, evaluated summary out.

use anyhow::Context;
use licguard_domain::policy::Policy;
use licguard_toolchain::{ClassifyLicense, ExtractBuildInfo, ResolveModules, ToolchainError};
use licguard_types::{BuildInfo, Summary};
use std::collections::BTreeSet;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// The run was cancelled before it completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("scan cancelled")]
pub struct Cancelled;

/// Whether `err` (or anything it wraps) is a [`Cancelled`].
pub fn is_cancelled(err: &anyhow::Error) -> bool {
    err.chain().any(|e| e.is::<Cancelled>())
}

#[derive(Clone, Debug)]
pub struct ScanInput<'a> {
    /// Absolute paths of the binaries to audit.
    pub binaries: &'a [String],
    pub policy: &'a Policy,
}

/// Extract, parse, resolve, classify, override, evaluate.
///
/// Every collaborator call races `token`; cancellation surfaces as
/// [`Cancelled`] and drops (and so kills) any running child process.
pub async fn run_scan<E, R, C>(
    input: ScanInput<'_>,
    extractor: &E,
    resolver: &R,
    classifier: &C,
    token: &CancellationToken,
) -> anyhow::Result<Summary>
where
    E: ExtractBuildInfo + ?Sized,
    R: ResolveModules + ?Sized,
    C: ClassifyLicense + ?Sized,
{
    if input.binaries.is_empty() {
        anyhow::bail!("path to at least one binary must be supplied");
    }

    let manifest = cancellable(token, extractor.extract(input.binaries))
        .await
        .context("extract build info")?;
    let infos = licguard_manifest::parse(&manifest).context("parse build info")?;
    verify_coverage(input.binaries, &infos)?;

    let refs = licguard_domain::unique_module_refs(&infos);
    info!(binaries = infos.len(), modules = refs.len(), "extracted build info");

    let resolved = cancellable(token, resolver.resolve(&refs))
        .await
        .context("resolve modules")?;
    info!(modules = resolved.len(), "resolved modules");

    let mut classified = Vec::with_capacity(resolved.len());
    for module in resolved {
        if token.is_cancelled() {
            return Err(Cancelled.into());
        }
        let id = module.reference.to_string();
        let module = licguard_toolchain::classify_module(module, classifier, input.policy.threshold)
            .with_context(|| format!("classify licenses of {id}"))?;
        classified.push(module);
    }
    info!(modules = classified.len(), "classified licenses");

    let modules = licguard_domain::apply_overrides(classified, &input.policy.overrides);
    let evaluated = licguard_domain::evaluate(input.policy, &infos, modules);
    let summary = licguard_domain::summarize(infos, evaluated);
    info!(
        modules = summary.modules.len(),
        violations = summary.violations().count(),
        "evaluated policy"
    );
    Ok(summary)
}

/// Every requested binary must have produced a build info record.
pub fn verify_coverage(requested: &[String], infos: &[BuildInfo]) -> Result<(), ToolchainError> {
    let seen: BTreeSet<&str> = infos.iter().map(|i| i.path.as_str()).collect();
    let missing: Vec<String> = requested
        .iter()
        .filter(|p| !seen.contains(p.as_str()))
        .cloned()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ToolchainError::MissingBuildInfo(missing))
    }
}

async fn cancellable<T, F>(token: &CancellationToken, fut: F) -> anyhow::Result<T>
where
    F: Future<Output = Result<T, ToolchainError>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(Cancelled.into()),
        res = fut => Ok(res?),
    }
}
