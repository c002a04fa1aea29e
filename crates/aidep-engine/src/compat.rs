//! Range-keyed compatibility lookup: which versions of other packages are
//! known to work with the one the caller declared.

use std::collections::BTreeMap;

use aidep_core::compat::{CompatRange, CompatibilityTable};

use crate::version::{self, PyVersion};

/// Find the compatibility bucket matching the declared version of `package`
/// and return its other-package map. Empty when the package is unknown, not
/// declared, or declared without a concrete `MAJOR.MINOR`.
///
/// Buckets are scanned in table order and the first matching range key wins.
pub fn lookup(
    package: &str,
    dependencies: &BTreeMap<String, String>,
    table: &CompatibilityTable,
) -> BTreeMap<String, Vec<String>> {
    matching_range(package, dependencies, table)
        .map(|range| range.compatible.clone())
        .unwrap_or_default()
}

/// Like [`lookup`], but returns the matched bucket itself so callers can
/// also see its range key.
pub fn matching_range<'a>(
    package: &str,
    dependencies: &BTreeMap<String, String>,
    table: &'a CompatibilityTable,
) -> Option<&'a CompatRange> {
    let package = package.to_lowercase();
    let ranges = table.get(&package)?;

    let declared = dependencies
        .get(&package)
        .map(String::as_str)
        .unwrap_or_default();
    let current = version::extract_major_minor(declared)?;

    ranges
        .iter()
        .find(|range| version_in_range(current, &range.versions))
}

/// Match a version against one textual range key.
///
/// `X.Y.x` is a literal prefix match, a trailing `+` is an inclusive
/// dotted-numeric lower bound, anything else is exact equality. Unlike
/// specifier evaluation this fails closed: an unparsable bound matches
/// nothing, and the scan moves on to the next bucket.
fn version_in_range(version: &str, range: &str) -> bool {
    if let Some(base) = range.strip_suffix(".x") {
        return version.starts_with(base);
    }

    if let Some(base) = range.strip_suffix('+') {
        return match (PyVersion::parse(version), PyVersion::parse(base)) {
            (Some(current), Some(bound)) => current >= bound,
            _ => false,
        };
    }

    version == range
}

#[cfg(test)]
mod tests {
    use super::*;
    use aidep_core::db::compatibility_matrix;

    fn deps(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(name, spec)| (name.to_string(), spec.to_string()))
            .collect()
    }

    #[test]
    fn selects_open_ended_bucket() {
        let compat = lookup(
            "langchain",
            &deps(&[("langchain", "0.1.5")]),
            compatibility_matrix(),
        );
        assert_eq!(
            compat.get("openai").map(Vec::as_slice),
            Some(&["1.0+".to_string()][..])
        );
        assert!(compat.contains_key("langchain-openai"));
    }

    #[test]
    fn selects_exact_bucket() {
        let compat = lookup(
            "langchain",
            &deps(&[("langchain", "==0.0.330")]),
            compatibility_matrix(),
        );
        // MAJOR.MINOR extraction yields "0.0", which only matches by prefix
        // or bound, never the exact three-component key.
        assert!(compat.is_empty());
    }

    #[test]
    fn selects_wildcard_bucket() {
        let compat = lookup(
            "llama-index",
            &deps(&[("llama-index", "0.5.27")]),
            compatibility_matrix(),
        );
        assert_eq!(
            compat.get("langchain").map(Vec::as_slice),
            Some(&["0.0.142".to_string()][..])
        );
    }

    #[test]
    fn unknown_package_is_empty() {
        let compat = lookup(
            "left-pad",
            &deps(&[("left-pad", "1.0.0")]),
            compatibility_matrix(),
        );
        assert!(compat.is_empty());
    }

    #[test]
    fn undeclared_package_is_empty() {
        let compat = lookup("langchain", &BTreeMap::new(), compatibility_matrix());
        assert!(compat.is_empty());
    }

    #[test]
    fn unversioned_declaration_is_empty() {
        let compat = lookup(
            "langchain",
            &deps(&[("langchain", "*")]),
            compatibility_matrix(),
        );
        assert!(compat.is_empty());
    }

    #[test]
    fn case_insensitive_package_name() {
        let compat = lookup(
            "OpenAI",
            &deps(&[("openai", "1.12.0")]),
            compatibility_matrix(),
        );
        assert_eq!(
            compat.get("langchain").map(Vec::as_slice),
            Some(&[">=0.1.0".to_string()][..])
        );
    }

    #[test]
    fn wildcard_key_matches_by_prefix() {
        assert!(version_in_range("0.5", "0.5.x"));
        assert!(!version_in_range("0.6", "0.5.x"));
    }

    #[test]
    fn plus_key_is_inclusive_lower_bound() {
        assert!(version_in_range("0.1", "0.1.0+"));
        assert!(version_in_range("0.2", "0.1.0+"));
        assert!(!version_in_range("0.0", "0.1.0+"));
    }

    #[test]
    fn plus_key_fails_closed_on_garbage() {
        assert!(!version_in_range("abc", "0.1.0+"));
        assert!(!version_in_range("0.1", "x+"));
    }

    #[test]
    fn exact_key_requires_equality() {
        assert!(version_in_range("0.28", "0.28"));
        assert!(!version_in_range("0.28", "0.27"));
    }
}
