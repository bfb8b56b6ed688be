//! Stable DTOs used across the licguard workspace.
//!
//! This crate is intentionally boring:
//! - the build info extracted from a binary
//! - module references, resolved modules and license hits
//! - the per-module decision and the summary emitted by a scan

#![forbid(unsafe_code)]

pub mod decision;
pub mod model;

pub use decision::{Decision, EvaluatedModule, Summary, SCHEMA_SUMMARY_V1};
pub use model::{BuildInfo, License, Module, ModuleReference};
