//! Operation: print compatible version combinations for one package.

use std::path::Path;

use aidep_core::db;
use aidep_engine::compat;
use aidep_scanner::DependencyScanner;

/// Print the compatibility buckets for `package`, marking the one that
/// matches the project's declared version when there is one.
pub fn suggest(package: &str, project_root: &Path) -> miette::Result<()> {
    let matrix = db::compatibility_matrix();
    let package_lower = package.to_lowercase();

    let Some(ranges) = matrix.get(&package_lower) else {
        aidep_util::progress::status_warn(
            "Suggest",
            &format!("no compatibility data for '{package}'"),
        );
        println!("Packages with compatibility data:");
        for name in matrix.keys() {
            println!("  {name}");
        }
        return Ok(());
    };

    // Project context is optional: suggestions work without a manifest.
    let dependencies = DependencyScanner::new(project_root)
        .scan_project()
        .unwrap_or_default();
    let selected = compat::matching_range(&package_lower, &dependencies, matrix)
        .map(|range| range.versions.clone());

    println!("Compatible version combinations for {package}:");
    println!();
    for range in ranges {
        let marker = if selected.as_deref() == Some(range.versions.as_str()) {
            "  (matches your project)"
        } else {
            ""
        };
        println!("  {package} {}{marker}", range.versions);
        for (other, specs) in &range.compatible {
            println!("    {other}: {}", specs.join(", "));
        }
        println!();
    }

    if let Some(example) = install_example(&package_lower) {
        println!("Installation examples:");
        for line in example.lines() {
            println!("  {line}");
        }
    }

    Ok(())
}

/// Canned install commands for the packages people ask about most.
fn install_example(package: &str) -> Option<&'static str> {
    match package {
        "langchain" => Some(
            "# stable older combination:\n\
             pip install langchain==0.0.330 openai==0.28.1\n\
             # current combination:\n\
             pip install langchain>=0.2.0 langchain-openai>=0.1.0 openai>=1.0.0",
        ),
        "llama-index" => Some(
            "# stable older combination:\n\
             pip install llama-index==0.8.69 openai==0.28.1\n\
             # current combination:\n\
             pip install llama-index>=0.9.0 openai>=1.0.0",
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_package_succeeds() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(suggest("langchain", tmp.path()).is_ok());
    }

    #[test]
    fn unknown_package_succeeds_with_listing() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(suggest("left-pad", tmp.path()).is_ok());
    }

    #[test]
    fn install_examples_cover_major_frameworks() {
        assert!(install_example("langchain").is_some());
        assert!(install_example("llama-index").is_some());
        assert!(install_example("openai").is_none());
    }
}
