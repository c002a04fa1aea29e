//! Operation: list the known conflict database.

use aidep_core::db;

/// Print every tracked conflict with its packages, severity, and summary.
pub fn list() -> miette::Result<()> {
    let rules = db::conflict_rules();
    println!("Known AI framework conflicts: {}", rules.len());
    println!();

    for (i, rule) in rules.iter().enumerate() {
        println!(
            "{:>3}. {} [{}]",
            i + 1,
            rule.packages.join(", "),
            rule.severity
        );
        println!("     {}", rule.description);
    }

    println!();
    println!("Run 'aidep check' to scan your project against these conflicts.");
    Ok(())
}
