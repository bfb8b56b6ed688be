//! Build info manifest parsing.
//!
//! Input is the full text printed by `go version -m <bin>...` for one or more
//! binaries. Output is one [`BuildInfo`] per binary, in input order.
//!
//! Parsing is fail-fast: the first malformed line aborts the whole parse and
//! nothing partial is returned.

#![forbid(unsafe_code)]

mod error;
mod parse;

pub use error::ParseError;
pub use parse::{parse, Parser};

use licguard_types::BuildInfo;

/// Fuzz-friendly API. Never panics on any input.
pub mod fuzz {
    use super::*;

    /// Parse arbitrary text and discard the result.
    pub fn parse_manifest(text: &str) -> Result<usize, ParseError> {
        let infos: Vec<BuildInfo> = super::parse(text)?;
        Ok(infos.len())
    }
}
