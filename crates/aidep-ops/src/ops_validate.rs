//! Operation: validate a single requirements file for known conflicts.

use std::path::Path;

use aidep_core::config::GlobalConfig;
use aidep_core::db;
use aidep_engine::checker;
use aidep_scanner::DependencyScanner;
use aidep_util::errors::AidepError;

/// Evaluate exactly the given file. Succeeds iff no known conflict fires;
/// the non-zero exit on conflict is what makes this usable as a CI gate.
pub fn validate(file: &Path) -> miette::Result<()> {
    if !file.is_file() {
        return Err(AidepError::Generic {
            message: format!("No such file: {}", file.display()),
        }
        .into());
    }

    let dependencies = aidep_scanner::parse_file(file)?;
    if dependencies.is_empty() {
        aidep_util::progress::status_warn(
            "Validate",
            &format!("no dependencies found in {}", file.display()),
        );
        return Ok(());
    }

    let parent = file.parent().unwrap_or(Path::new("."));
    let ai_deps = DependencyScanner::new(parent).filter_ai_frameworks(&dependencies);
    if ai_deps.is_empty() {
        aidep_util::progress::status("Validate", "no AI framework dependencies to validate");
        return Ok(());
    }

    let config = GlobalConfig::load();
    let mut conflicts = checker::evaluate(&ai_deps, db::conflict_rules());
    conflicts.retain(|c| !config.is_ignored(&c.id));

    if conflicts.is_empty() {
        aidep_util::progress::status(
            "Validate",
            &format!("{} passed, no known conflicts", file.display()),
        );
        return Ok(());
    }

    for conflict in &conflicts {
        println!(
            "  [{}] {}",
            conflict.severity.to_string().to_uppercase(),
            conflict.description
        );
    }
    Err(AidepError::Conflicts {
        message: format!(
            "{} potential conflict(s) in {}",
            conflicts.len(),
            file.display()
        ),
    }
    .into())
}
