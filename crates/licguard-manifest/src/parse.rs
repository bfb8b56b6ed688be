use crate::ParseError;
use licguard_types::{BuildInfo, ModuleReference};
use regex::Regex;
use std::mem;
use std::sync::LazyLock;

const REPLACEMENT_MARKER: &str = "=>";

/// Parse the output of `go version -m` for any number of binaries.
pub fn parse(text: &str) -> Result<Vec<BuildInfo>, ParseError> {
    let mut parser = Parser::new();
    for line in text.split('\n') {
        parser.feed(line)?;
    }
    parser.finish()
}

#[derive(Debug, Default)]
enum State {
    #[default]
    AwaitingHeader,
    InRecord(BuildInfo),
    /// The previous line was a 4-field `dep`; the next build info line must
    /// be its `=>` replacement.
    AwaitingReplacement(BuildInfo),
}

/// Line-at-a-time manifest parser.
///
/// After `feed` returns an error the parser must be discarded.
#[derive(Debug, Default)]
pub struct Parser {
    state: State,
    results: Vec<BuildInfo>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, line: &str) -> Result<(), ParseError> {
        if line.is_empty() {
            return Ok(());
        }
        if !line.starts_with('\t') {
            return self.header(line);
        }

        let fields: Vec<&str> = line.split('\t').collect();
        let [_, kind, ..] = fields.as_slice() else {
            return Err(ParseError::InvalidBuildInfoLine(line.to_string()));
        };

        self.state = match mem::take(&mut self.state) {
            State::AwaitingHeader => {
                return Err(ParseError::InvalidBuildInfoLine(line.to_string()));
            }
            State::InRecord(current) => record_line(current, kind, &fields, line)?,
            State::AwaitingReplacement(current) => {
                if *kind != REPLACEMENT_MARKER {
                    return Err(ParseError::ExpectedReplacement(line.to_string()));
                }
                record_line(current, kind, &fields, line)?
            }
        };
        Ok(())
    }

    pub fn finish(mut self) -> Result<Vec<BuildInfo>, ParseError> {
        match mem::take(&mut self.state) {
            State::AwaitingHeader => {}
            State::InRecord(current) => self.results.push(current),
            State::AwaitingReplacement(_) => return Err(ParseError::MissingReplacement),
        }
        Ok(self.results)
    }

    fn header(&mut self, line: &str) -> Result<(), ParseError> {
        let Some(path) = binary_path(line) else {
            return Err(ParseError::UnrecognisedVersionLine(line.to_string()));
        };
        match mem::take(&mut self.state) {
            State::AwaitingHeader => {}
            State::InRecord(previous) => self.results.push(previous),
            State::AwaitingReplacement(_) => {
                return Err(ParseError::ExpectedReplacement(line.to_string()));
            }
        }
        self.state = State::InRecord(BuildInfo::new(path));
        Ok(())
    }
}

fn record_line(
    mut current: BuildInfo,
    kind: &str,
    fields: &[&str],
    line: &str,
) -> Result<State, ParseError> {
    match kind {
        "path" => {
            let [_, _, package_path] = fields else {
                return Err(ParseError::InvalidPathLine(line.to_string()));
            };
            current.package_path = Some(package_path.to_string());
        }
        "mod" => {
            let [_, _, module_path, _, _] = fields else {
                return Err(ParseError::InvalidModLine(line.to_string()));
            };
            current.module_path = Some(module_path.to_string());
        }
        "dep" | REPLACEMENT_MARKER => match fields {
            [_, _, path, version, _] => {
                current.module_refs.push(ModuleReference::new(*path, *version));
            }
            [_, _, _, _] => return Ok(State::AwaitingReplacement(current)),
            _ => return Err(ParseError::InvalidDepLine(line.to_string())),
        },
        // Emitted since Go 1.18; nothing in it affects licensing.
        "build" => {}
        // Go 1.18+ prints a bare tab after replacement lines.
        "" => {}
        _ => return Err(ParseError::UnrecognisedLine(line.to_string())),
    }
    Ok(State::InRecord(current))
}

/// `<path>: <toolchain version>`, where the version is `go1.21.3`,
/// `devel go1.18-0c83e01e0c ...` or `devel +b7a85e0003 ...`. The lazy path
/// group lets paths that themselves contain `": "` still match.
static HEADER: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^(.*?): (?:(?:devel )?go[0-9]+|devel \+[0-9a-f]+)").ok()
});

fn binary_path(line: &str) -> Option<&str> {
    let captures = HEADER.as_ref()?.captures(line)?;
    captures.get(1).map(|m| m.as_str())
}
