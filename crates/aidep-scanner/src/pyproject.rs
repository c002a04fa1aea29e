//! pyproject.toml parsing.
//!
//! Dependencies can live in several places depending on the build tool:
//! PEP 621 `[project] dependencies` (a list of requirement strings), or
//! Poetry/PDM tables under `[tool.*.dependencies]` (requirement strings or
//! `name = version` tables). All locations found are merged.

use std::collections::BTreeMap;

use crate::requirements;

const DEPENDENCY_LOCATIONS: &[&[&str]] = &[
    &["project", "dependencies"],
    &["tool", "poetry", "dependencies"],
    &["tool", "pdm", "dependencies"],
];

/// Parse pyproject.toml content into lower-cased name -> raw specifier.
/// Unparsable content yields an empty mapping.
pub fn parse(content: &str) -> BTreeMap<String, String> {
    let doc: toml::Value = match content.parse() {
        Ok(doc) => doc,
        Err(e) => {
            tracing::debug!("unparsable pyproject.toml: {e}");
            return BTreeMap::new();
        }
    };

    let mut dependencies = BTreeMap::new();
    for location in DEPENDENCY_LOCATIONS {
        let mut node = Some(&doc);
        for key in *location {
            node = node.and_then(|n| n.get(key));
        }
        if let Some(node) = node {
            collect(node, &mut dependencies);
        }
    }
    dependencies
}

fn collect(node: &toml::Value, dependencies: &mut BTreeMap<String, String>) {
    match node {
        // PEP 621 / list form: entries are requirement strings.
        toml::Value::Array(entries) => {
            for entry in entries {
                if let Some(line) = entry.as_str() {
                    if let Some((name, spec)) = requirements::parse_line(line) {
                        dependencies.insert(name.to_lowercase(), spec);
                    }
                }
            }
        }
        // Poetry/PDM table form: name = "spec" or name = { version = "spec" }.
        toml::Value::Table(entries) => {
            for (name, value) in entries {
                if name.eq_ignore_ascii_case("python") {
                    continue;
                }
                let spec = match value {
                    toml::Value::String(spec) => spec.clone(),
                    toml::Value::Table(detail) => detail
                        .get("version")
                        .and_then(|v| v.as_str())
                        .unwrap_or_default()
                        .to_string(),
                    _ => continue,
                };
                dependencies.insert(name.to_lowercase(), spec);
            }
        }
        _ => {}
    }
}
