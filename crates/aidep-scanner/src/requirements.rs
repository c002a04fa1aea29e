//! requirements.txt parsing.

use std::collections::BTreeMap;

/// Parse requirements.txt content into lower-cased name -> raw specifier.
///
/// Comments, blank lines, editable installs (`-e`) and VCS URLs (`git+`)
/// are skipped, as is any line that does not look like a plain
/// name-plus-specifier declaration.
pub fn parse(content: &str) -> BTreeMap<String, String> {
    let mut dependencies = BTreeMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with("-e") || line.starts_with("git+") {
            continue;
        }
        match parse_line(line) {
            Some((name, spec)) => {
                dependencies.insert(name.to_lowercase(), spec);
            }
            None => tracing::debug!("skipping unrecognized requirement line {line:?}"),
        }
    }

    dependencies
}

/// Parse a single requirement line into `(name, specifier)`.
///
/// The name is a run of `[A-Za-z0-9_-]`; whatever follows must begin with a
/// specifier operator character (or be empty) for the line to count.
/// Inline comments are stripped first.
pub fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.split('#').next().unwrap_or_default().trim();
    if line.is_empty() {
        return None;
    }

    let name_end = line
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(line.len());
    if name_end == 0 {
        return None;
    }

    let (name, rest) = line.split_at(name_end);
    if !rest.is_empty() && !rest.starts_with(['>', '=', '<', '~', '!']) {
        return None;
    }

    Some((name.to_string(), rest.trim().to_string()))
}
