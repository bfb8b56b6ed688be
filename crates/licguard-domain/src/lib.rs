//! Pure policy evaluation (no IO).
//!
//! Input: build info parsed elsewhere and modules already resolved and
//! classified by collaborators.
//! Output: one decision per module, packaged into a summary.

#![forbid(unsafe_code)]

pub mod policy;
pub mod refs;
pub mod report;

mod engine;
mod overrides;

pub use engine::evaluate;
pub use overrides::apply_overrides;
pub use refs::unique_module_refs;
pub use report::summarize;

#[cfg(test)]
mod properties;
#[cfg(test)]
mod test_support;
