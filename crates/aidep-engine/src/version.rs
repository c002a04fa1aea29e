//! Python-style version parsing, normalization, and comparison.
//!
//! Versions in Python manifests come in several shapes: a bare
//! `MAJOR.MINOR`, a full `MAJOR.MINOR.PATCH`, and either of those with a
//! pre-release tag glued on (`1.5a1`, `2.0.0rc1`). Comparison pads missing
//! numeric components with zeros and orders pre-releases as
//! `alpha < beta < rc < release` at an equal numeric tuple.

use std::cmp::Ordering;
use std::fmt;

/// A parsed version with comparable numeric components and an optional
/// pre-release tag.
#[derive(Debug, Clone)]
pub struct PyVersion {
    release: Vec<u64>,
    pre: Option<PreRelease>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PreRelease {
    tag: PreTag,
    number: u64,
}

/// Pre-release tags with defined ordering, below any release.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
enum PreTag {
    Alpha,
    Beta,
    Rc,
}

impl PreTag {
    /// Canonical spelling of a tag alias: `a`/`alpha`, `b`/`beta`, `c`/`rc`.
    fn from_alias(alias: &str) -> Option<PreTag> {
        match alias.to_lowercase().as_str() {
            "a" | "alpha" => Some(PreTag::Alpha),
            "b" | "beta" => Some(PreTag::Beta),
            "c" | "rc" => Some(PreTag::Rc),
            _ => None,
        }
    }

    fn canonical(self) -> &'static str {
        match self {
            PreTag::Alpha => "alpha",
            PreTag::Beta => "beta",
            PreTag::Rc => "rc",
        }
    }
}

impl PyVersion {
    /// Parse a version string, tolerating a missing patch component and an
    /// attached or `-`/`.`-separated pre-release tag.
    ///
    /// Returns `None` for anything that is not a dotted numeric version,
    /// leaving the caller to apply its own leniency policy.
    pub fn parse(input: &str) -> Option<PyVersion> {
        let s = input.trim();
        let mut release = Vec::new();
        let mut rest = s;

        loop {
            let digits = leading_digits(rest);
            if digits.is_empty() {
                return None;
            }
            release.push(digits.parse().ok()?);
            rest = &rest[digits.len()..];
            match rest.as_bytes().first() {
                Some(b'.') if rest[1..].starts_with(|c: char| c.is_ascii_digit()) => {
                    rest = &rest[1..];
                }
                _ => break,
            }
        }

        if rest.is_empty() {
            return Some(PyVersion { release, pre: None });
        }

        // Optional separator before the tag: "1.0.0-rc1", "1.0.0.rc1", "1.0.0rc1".
        let rest = rest.strip_prefix(['-', '.']).unwrap_or(rest);
        let letters = leading_letters(rest);
        let tag = PreTag::from_alias(letters)?;
        let rest = &rest[letters.len()..];
        let digits = leading_digits(rest);
        if !rest[digits.len()..].is_empty() {
            return None;
        }
        let number = if digits.is_empty() {
            0
        } else {
            digits.parse().ok()?
        };

        Some(PyVersion {
            release,
            pre: Some(PreRelease { tag, number }),
        })
    }

    fn component(&self, i: usize) -> u64 {
        self.release.get(i).copied().unwrap_or(0)
    }
}

impl PartialEq for PyVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PyVersion {}

impl Ord for PyVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.release.len().max(other.release.len());
        for i in 0..len {
            let ord = self.component(i).cmp(&other.component(i));
            if ord != Ordering::Equal {
                return ord;
            }
        }
        match (&self.pre, &other.pre) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.tag.cmp(&b.tag).then(a.number.cmp(&b.number)),
        }
    }
}

impl PartialOrd for PyVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.release.iter().map(u64::to_string).collect();
        write!(f, "{}", parts.join("."))?;
        if let Some(pre) = &self.pre {
            write!(f, "-{}{}", pre.tag.canonical(), pre.number)?;
        }
        Ok(())
    }
}

/// Canonicalize a raw version string into a comparable form.
///
/// Recognized shapes are `MAJOR.MINOR`, `MAJOR.MINOR.PATCH`, and either of
/// those immediately followed by a pre-release tag (`a`/`alpha`, `b`/`beta`,
/// `c`/`rc`, optional trailing digits). A missing patch component becomes
/// `.0`; a tag is rewritten as `-<tag><digits>` with its alias canonicalized.
/// Anything else is returned unchanged: this tool flags likely conflicts,
/// it does not validate version syntax.
pub fn normalize(raw: &str) -> String {
    let s = raw.trim();
    let Some(shape) = parse_shape(s) else {
        return raw.to_string();
    };
    match shape {
        Shape {
            patch: Some(_),
            tag: None,
            ..
        } => s.to_string(),
        Shape {
            major,
            minor,
            patch: None,
            tag: None,
        } => format!("{major}.{minor}.0"),
        Shape {
            major,
            minor,
            patch,
            tag: Some((tag, digits)),
        } => {
            let patch = patch.unwrap_or("0");
            format!("{major}.{minor}.{patch}-{}{digits}", tag.canonical())
        }
    }
}

struct Shape<'a> {
    major: &'a str,
    minor: &'a str,
    patch: Option<&'a str>,
    tag: Option<(PreTag, &'a str)>,
}

fn parse_shape(s: &str) -> Option<Shape<'_>> {
    let major = leading_digits(s);
    if major.is_empty() {
        return None;
    }
    let rest = s[major.len()..].strip_prefix('.')?;
    let minor = leading_digits(rest);
    if minor.is_empty() {
        return None;
    }
    let mut rest = &rest[minor.len()..];

    let mut patch = None;
    if let Some(after_dot) = rest.strip_prefix('.') {
        let digits = leading_digits(after_dot);
        if digits.is_empty() {
            return None;
        }
        patch = Some(digits);
        rest = &after_dot[digits.len()..];
    }

    if rest.is_empty() {
        return Some(Shape {
            major,
            minor,
            patch,
            tag: None,
        });
    }

    // The tag must follow the numeric part directly, with no separator.
    let letters = leading_letters(rest);
    let tag = PreTag::from_alias(letters)?;
    let digits = leading_digits(&rest[letters.len()..]);
    if !rest[letters.len() + digits.len()..].is_empty() {
        return None;
    }
    Some(Shape {
        major,
        minor,
        patch,
        tag: Some((tag, digits)),
    })
}

/// Find the first concrete version number in a specifier string:
/// `MAJOR.MINOR.PATCH` with an optional attached pre-release tag, or a bare
/// `MAJOR.MINOR`. Returns `None` when the string pins nothing concrete.
pub fn extract_version(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            if let Some(end) = match_version_at(text, i) {
                return Some(&text[i..end]);
            }
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
        } else {
            i += 1;
        }
    }
    None
}

/// Find the first `MAJOR.MINOR` pair in a specifier string.
pub fn extract_major_minor(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let major = leading_digits(&text[i..]);
            let after = i + major.len();
            if bytes.get(after) == Some(&b'.') {
                let minor = leading_digits(&text[after + 1..]);
                if !minor.is_empty() {
                    return Some(&text[i..after + 1 + minor.len()]);
                }
            }
            i = after;
        } else {
            i += 1;
        }
    }
    None
}

fn match_version_at(text: &str, start: usize) -> Option<usize> {
    let s = &text[start..];
    let major = leading_digits(s);
    let rest = s[major.len()..].strip_prefix('.')?;
    let minor = leading_digits(rest);
    if minor.is_empty() {
        return None;
    }
    let two_part_end = start + major.len() + 1 + minor.len();

    let after_minor = &rest[minor.len()..];
    let Some(after_dot) = after_minor.strip_prefix('.') else {
        return Some(two_part_end);
    };
    let patch = leading_digits(after_dot);
    if patch.is_empty() {
        return Some(two_part_end);
    }
    let mut end = two_part_end + 1 + patch.len();

    // A recognized pre-release tag attached to the patch is part of the
    // version; any other trailing text is not.
    let after_patch = &after_dot[patch.len()..];
    let letters = leading_letters(after_patch);
    if PreTag::from_alias(letters).is_some() {
        let digits = leading_digits(&after_patch[letters.len()..]);
        end += letters.len() + digits.len();
    }
    Some(end)
}

fn leading_digits(s: &str) -> &str {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    &s[..end]
}

fn leading_letters(s: &str) -> &str {
    let end = s
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(s.len());
    &s[..end]
}
