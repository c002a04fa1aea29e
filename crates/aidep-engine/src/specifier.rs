//! Specifier satisfaction with lenient matching.
//!
//! A specifier is one of: an exact pin (`==1.0.0`), a comparison range
//! (`>=1.21.0,<2.0.0`), a bare `X.Y` wildcard prefix, or anything else
//! (empty, unrecognized). The rule database is heuristic, not
//! authoritative, so evaluation never errors: an unparsable specifier
//! counts as satisfied. A missed conflict is acceptable; a crashed scan or
//! a false positive that blocks an unaffected build is not.

use crate::version::{self, PyVersion};

/// Lenient-match fallback: what an unparsable specifier evaluates to.
const LENIENT_MATCH: bool = true;

/// Check whether `version` satisfies `spec`.
///
/// The version is normalized first (and so is the right-hand side of an
/// exact pin). Comparison ranges are comma-separated clauses combined by
/// AND, compared with pre-release-aware ordering. A bare `X.Y` spec is a
/// coarse wildcard: it matches any version sharing its major component.
pub fn satisfies(version: &str, spec: &str) -> bool {
    let spec = spec.trim();
    let normalized = version::normalize(version);

    if spec.contains("==") {
        let pinned = spec.replace("==", "");
        return normalized == version::normalize(pinned.trim());
    }

    if spec.contains('>') || spec.contains('<') {
        return match eval_bounds(&normalized, spec) {
            Some(satisfied) => satisfied,
            None => {
                tracing::debug!("unparsable specifier {spec:?}, treating as satisfied");
                LENIENT_MATCH
            }
        };
    }

    if has_wildcard_prefix(spec) {
        let major = spec.split('.').next().unwrap_or_default();
        return normalized.starts_with(major);
    }

    LENIENT_MATCH
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Ge,
    Le,
    Gt,
    Lt,
    Ne,
}

/// Evaluate a comparison-range spec. `None` means the spec (or the version
/// itself) did not parse and the caller should fall back to the lenient
/// default.
fn eval_bounds(normalized_version: &str, spec: &str) -> Option<bool> {
    let current = PyVersion::parse(normalized_version)?;

    // Parse every clause before judging any: a malformed clause anywhere
    // makes the whole spec unparsable, not half-evaluated.
    let mut bounds: Vec<(Op, PyVersion)> = Vec::new();
    for clause in spec.split(',') {
        let clause = clause.trim();
        if let Some(rest) = clause.strip_prefix("~=") {
            // Compatible release: `~=1.4.2` means `>=1.4.2, <1.5.0`.
            let rest = rest.trim();
            bounds.push((Op::Ge, PyVersion::parse(rest)?));
            bounds.push((Op::Lt, compatible_ceiling(rest)?));
        } else {
            let (op, bound_str) = split_clause(clause)?;
            bounds.push((op, PyVersion::parse(bound_str)?));
        }
    }

    Some(bounds.into_iter().all(|(op, bound)| match op {
        Op::Ge => current >= bound,
        Op::Le => current <= bound,
        Op::Gt => current > bound,
        Op::Lt => current < bound,
        Op::Ne => current != bound,
    }))
}

fn split_clause(clause: &str) -> Option<(Op, &str)> {
    // Two-character operators first so ">=" is not read as ">" + "=1.0".
    for (prefix, op) in [
        (">=", Op::Ge),
        ("<=", Op::Le),
        ("!=", Op::Ne),
        (">", Op::Gt),
        ("<", Op::Lt),
    ] {
        if let Some(rest) = clause.strip_prefix(prefix) {
            let rest = rest.trim();
            if rest.is_empty() {
                return None;
            }
            return Some((op, rest));
        }
    }
    None
}

/// The exclusive upper bound of a compatible-release clause: `~=1.4.2`
/// allows `>=1.4.2, <1.5.0`; `~=1.4` allows `>=1.4, <2.0`.
fn compatible_ceiling(bound: &str) -> Option<PyVersion> {
    let numeric: Vec<&str> = bound
        .split('.')
        .take_while(|part| part.chars().all(|c| c.is_ascii_digit()) && !part.is_empty())
        .collect();
    if numeric.len() < 2 {
        return None;
    }
    let mut components: Vec<u64> = numeric[..numeric.len() - 1]
        .iter()
        .map(|p| p.parse().ok())
        .collect::<Option<_>>()?;
    *components.last_mut()? += 1;
    let ceiling: Vec<String> = components.iter().map(u64::to_string).collect();
    PyVersion::parse(&ceiling.join("."))
}

/// True for a bare `X.Y`-prefixed spec with no operator.
fn has_wildcard_prefix(spec: &str) -> bool {
    let mut parts = spec.splitn(2, '.');
    let major = parts.next().unwrap_or_default();
    let rest = parts.next().unwrap_or_default();
    !major.is_empty()
        && major.chars().all(|c| c.is_ascii_digit())
        && rest.starts_with(|c: char| c.is_ascii_digit())
}
