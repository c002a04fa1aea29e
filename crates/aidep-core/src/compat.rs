use std::collections::BTreeMap;

/// One range-keyed bucket of the compatibility matrix.
///
/// `versions` is a textual range key in one of three forms: an exact dotted
/// version (`"0.0.330"`), a wildcard (`"0.5.x"`), or an open-ended lower
/// bound (`"0.1.0+"`). The buckets for a package are scanned in definition
/// order and the first matching key wins, so overlapping keys are resolved
/// by position, not specificity.
#[derive(Debug, Clone)]
pub struct CompatRange {
    pub versions: String,
    /// Other-package name -> list of compatible version specifiers.
    pub compatible: BTreeMap<String, Vec<String>>,
}

/// Package name (lower-case) -> ordered compatibility buckets.
pub type CompatibilityTable = BTreeMap<String, Vec<CompatRange>>;
