//! Use case orchestration for licguard.
//!
//! Coordinates the manifest parser, toolchain adapters, policy engine and
//! renderers. The CLI crate depends on this; it only handles argument parsing
//! and process concerns.

#![forbid(unsafe_code)]

mod config;
mod output;
mod scan;
mod violations;

pub use config::load_policy;
pub use output::write_json;
pub use scan::{Cancelled, ScanInput, is_cancelled, run_scan, verify_coverage};
pub use violations::{Violation, Violations, exit_code};
