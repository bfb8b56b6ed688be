use thiserror::Error;

/// A malformed manifest. Every variant carries the literal offending line.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unrecognised version line: {0}")]
    UnrecognisedVersionLine(String),

    /// A tab-prefixed line appeared before any binary header.
    #[error("invalid build info line: {0}")]
    InvalidBuildInfoLine(String),

    #[error("invalid path line: {0}")]
    InvalidPathLine(String),

    #[error("invalid mod line: {0}")]
    InvalidModLine(String),

    #[error("invalid dep line: {0}")]
    InvalidDepLine(String),

    #[error("expected path replacement, received: {0}")]
    ExpectedReplacement(String),

    #[error("unrecognised line: {0}")]
    UnrecognisedLine(String),

    /// Input ended while a `dep` line was still waiting for its `=>` line.
    #[error("missing path replacement at end of input")]
    MissingReplacement,
}

impl ParseError {
    /// The offending line, when there is one.
    pub fn line(&self) -> Option<&str> {
        match self {
            ParseError::UnrecognisedVersionLine(l)
            | ParseError::InvalidBuildInfoLine(l)
            | ParseError::InvalidPathLine(l)
            | ParseError::InvalidModLine(l)
            | ParseError::InvalidDepLine(l)
            | ParseError::ExpectedReplacement(l)
            | ParseError::UnrecognisedLine(l) => Some(l),
            ParseError::MissingReplacement => None,
        }
    }
}
