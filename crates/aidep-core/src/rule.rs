use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How badly a known conflict breaks an installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Numeric rank for threshold comparison (critical > high > medium > low).
    pub fn rank(self) -> u8 {
        match self {
            Severity::Critical => 4,
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
        }
    }

    /// Parse a user-supplied severity name. Accepts `moderate` as an alias
    /// for `medium`.
    pub fn parse(s: &str) -> Option<Severity> {
        match s.to_lowercase().as_str() {
            "critical" => Some(Severity::Critical),
            "high" => Some(Severity::High),
            "medium" | "moderate" => Some(Severity::Medium),
            "low" => Some(Severity::Low),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A curated record of two or more packages whose version combination is
/// known to break, plus remediation data.
///
/// `packages` keeps the author's ordering; conflict evaluation walks it in
/// order, so the first package failing its version checks decides the
/// verdict. `working_versions` and `alternative` are keyed by lower-cased
/// package name.
#[derive(Debug, Clone)]
pub struct ConflictRule {
    pub id: String,
    pub packages: Vec<String>,
    pub description: String,
    pub severity: Severity,
    /// Primary known-good version combination.
    pub working_versions: BTreeMap<String, String>,
    /// Secondary known-good combination, typically the modern upgrade path.
    /// Empty when the rule has no alternative.
    pub alternative: BTreeMap<String, String>,
    /// Pre-written fix instructions shown to the user.
    pub fix: String,
    pub tip: Option<String>,
}

/// The result of matching one rule against a project's dependencies.
///
/// Constructed during a single evaluation pass and handed to the
/// presentation layer; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluatedConflict {
    pub id: String,
    pub description: String,
    pub severity: Severity,
    /// The subset of the caller's dependencies named by the rule, keyed by
    /// the rule's original package-name casing.
    pub affected_packages: BTreeMap<String, String>,
    pub working_versions: BTreeMap<String, String>,
    pub alternative: BTreeMap<String, String>,
    pub fix: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_rank_ordering() {
        assert!(Severity::Critical.rank() > Severity::High.rank());
        assert!(Severity::High.rank() > Severity::Medium.rank());
        assert!(Severity::Medium.rank() > Severity::Low.rank());
    }

    #[test]
    fn severity_parse_names() {
        assert_eq!(Severity::parse("critical"), Some(Severity::Critical));
        assert_eq!(Severity::parse("HIGH"), Some(Severity::High));
        assert_eq!(Severity::parse("moderate"), Some(Severity::Medium));
        assert_eq!(Severity::parse("low"), Some(Severity::Low));
        assert_eq!(Severity::parse("urgent"), None);
    }

    #[test]
    fn severity_display_lowercase() {
        assert_eq!(Severity::Critical.to_string(), "critical");
        assert_eq!(Severity::Medium.to_string(), "medium");
    }
}
