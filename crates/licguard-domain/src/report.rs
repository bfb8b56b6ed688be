use licguard_types::{BuildInfo, EvaluatedModule, Summary};

/// Package binaries and evaluated modules into the scan result.
///
/// `binaries` keeps manifest order; `modules` is expected to arrive sorted
/// from [`crate::evaluate`].
pub fn summarize(binaries: Vec<BuildInfo>, modules: Vec<EvaluatedModule>) -> Summary {
    Summary { binaries, modules }
}
