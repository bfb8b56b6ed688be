use licguard_types::Summary;
use std::fmt;

/// One disallowed module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub explanation: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.explanation)
    }
}

/// Every disallowed module of a scan, reported together.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{}", lines(.0))]
pub struct Violations(pub Vec<Violation>);

impl Violations {
    /// `None` when every module is allowed.
    pub fn from_summary(summary: &Summary) -> Option<Self> {
        let found: Vec<Violation> = summary
            .violations()
            .map(|m| Violation {
                path: m.module.path().to_string(),
                explanation: m.explain(),
            })
            .collect();
        (!found.is_empty()).then_some(Violations(found))
    }
}

fn lines(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Process exit code for a completed scan: 0 compliant, 2 policy violations.
pub fn exit_code(summary: &Summary) -> i32 {
    if summary.is_compliant() { 0 } else { 2 }
}
