//! Operation: scan a project for known AI-framework conflicts.

use std::collections::BTreeMap;
use std::path::Path;

use aidep_core::config::{GlobalConfig, OutputFormat};
use aidep_core::db;
use aidep_core::rule::{EvaluatedConflict, Severity};
use aidep_engine::checker;
use aidep_scanner::DependencyScanner;
use aidep_util::errors::AidepError;

/// Options for `aidep check`.
#[derive(Default)]
pub struct CheckOptions {
    /// Minimum severity to fail on: "low", "medium", "high", "critical".
    pub fail_on: Option<String>,
    /// Output format override; defaults to the global config setting.
    pub format: Option<OutputFormat>,
    /// Additional conflict ids to ignore, merged with the global config.
    pub ignore: Vec<String>,
    /// Print the discovered dependency table before the verdict.
    pub verbose: bool,
}

/// Scan the project's requirements for known conflicts and print a report.
pub fn check(project_root: &Path, opts: &CheckOptions) -> miette::Result<()> {
    let scanner = DependencyScanner::new(project_root);
    let Some(req_file) = scanner.find_requirements_file() else {
        return Err(AidepError::NoRequirementsFile {
            path: project_root.display().to_string(),
        }
        .into());
    };

    let sp = aidep_util::progress::spinner(&format!("Scanning {}...", req_file.display()));
    let dependencies = scanner.scan_project()?;
    let ai_deps = scanner.filter_ai_frameworks(&dependencies);
    sp.finish_and_clear();

    if dependencies.is_empty() {
        aidep_util::progress::status_warn(
            "Check",
            &format!("no dependencies found in {}", req_file.display()),
        );
        return Ok(());
    }
    if ai_deps.is_empty() {
        aidep_util::progress::status("Check", "no AI framework dependencies detected");
        return Ok(());
    }

    let config = GlobalConfig::load();
    let mut conflicts = checker::evaluate(&ai_deps, db::conflict_rules());
    conflicts.retain(|c| {
        let keep = !config.is_ignored(&c.id) && !opts.ignore.contains(&c.id);
        if !keep {
            tracing::debug!("suppressing ignored conflict {}", c.id);
        }
        keep
    });

    match opts.format.unwrap_or(config.output) {
        OutputFormat::Json => print_json(&conflicts)?,
        OutputFormat::Text => print_text(&ai_deps, &conflicts, opts.verbose),
    }

    fail_on_threshold(&conflicts, opts.fail_on.as_deref())
}

fn print_json(conflicts: &[EvaluatedConflict]) -> miette::Result<()> {
    let json = serde_json::to_string_pretty(conflicts).map_err(|e| AidepError::Generic {
        message: format!("Failed to serialize conflicts: {e}"),
    })?;
    println!("{json}");
    Ok(())
}

fn print_text(
    ai_deps: &BTreeMap<String, String>,
    conflicts: &[EvaluatedConflict],
    verbose: bool,
) {
    if verbose {
        println!("{:<30} Specifier", "Package");
        println!("{}", "-".repeat(45));
        for (name, spec) in ai_deps {
            let spec = if spec.is_empty() { "*" } else { spec.as_str() };
            println!("{name:<30} {spec}");
        }
        println!();
    }

    if conflicts.is_empty() {
        aidep_util::progress::status(
            "Check",
            &format!(
                "{} AI framework dependencies, no known conflicts detected",
                ai_deps.len()
            ),
        );
        return;
    }

    println!(
        "Found {} potential conflict(s) in {} AI framework dependencies:",
        conflicts.len(),
        ai_deps.len()
    );
    println!();

    for conflict in conflicts {
        print_conflict(conflict);
    }

    println!("Next steps: pick a fix strategy above, update your requirements,");
    println!("and re-run in a clean virtual environment.");
}

fn print_conflict(conflict: &EvaluatedConflict) {
    println!(
        "  [{}] {}",
        conflict.severity.to_string().to_uppercase(),
        conflict.id
    );
    println!("    {}", conflict.description);

    let joined = |versions: &BTreeMap<String, String>| {
        versions
            .iter()
            .map(|(name, spec)| {
                if spec.is_empty() {
                    format!("{name} *")
                } else {
                    format!("{name} {spec}")
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    };

    println!("    affected: {}", joined(&conflict.affected_packages));
    if !conflict.working_versions.is_empty() {
        println!("    known good: {}", joined(&conflict.working_versions));
    }
    if !conflict.alternative.is_empty() {
        println!("    upgrade path: {}", joined(&conflict.alternative));
    }

    println!("    fix:");
    for line in conflict.fix.lines() {
        println!("      {line}");
    }
    if let Some(tip) = db::conflict_rules()
        .iter()
        .find(|r| r.id == conflict.id)
        .and_then(|r| r.tip.as_deref())
    {
        println!("    tip: {tip}");
    }
    println!();
}

/// Fail when any reported conflict reaches the requested severity, in the
/// manner of an audit threshold. No threshold, no failure: the report
/// itself is the product.
fn fail_on_threshold(
    conflicts: &[EvaluatedConflict],
    fail_on: Option<&str>,
) -> miette::Result<()> {
    let Some(threshold) = fail_on else {
        return Ok(());
    };
    let Some(threshold) = Severity::parse(threshold) else {
        return Err(AidepError::Generic {
            message: format!("Unknown severity '{threshold}' (expected low, medium, high, or critical)"),
        }
        .into());
    };

    let has_severe = conflicts
        .iter()
        .any(|c| c.severity.rank() >= threshold.rank());
    if has_severe {
        return Err(AidepError::Conflicts {
            message: format!("found conflicts at or above '{threshold}' severity"),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aidep_core::rule::Severity;

    fn conflict(severity: Severity) -> EvaluatedConflict {
        EvaluatedConflict {
            id: "test-conflict".to_string(),
            description: "test".to_string(),
            severity,
            affected_packages: BTreeMap::new(),
            working_versions: BTreeMap::new(),
            alternative: BTreeMap::new(),
            fix: "pip install something".to_string(),
        }
    }

    #[test]
    fn no_threshold_never_fails() {
        assert!(fail_on_threshold(&[conflict(Severity::Critical)], None).is_ok());
    }

    #[test]
    fn threshold_fails_at_or_above() {
        assert!(fail_on_threshold(&[conflict(Severity::Critical)], Some("high")).is_err());
        assert!(fail_on_threshold(&[conflict(Severity::High)], Some("high")).is_err());
        assert!(fail_on_threshold(&[conflict(Severity::Medium)], Some("high")).is_ok());
    }

    #[test]
    fn unknown_threshold_is_an_error() {
        assert!(fail_on_threshold(&[], Some("urgent")).is_err());
    }
}
