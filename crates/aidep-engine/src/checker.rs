//! Rule matching: which known conflicts apply to a set of declared
//! dependencies, and do the declared versions fall inside them.

use std::collections::BTreeMap;

use aidep_core::rule::{ConflictRule, EvaluatedConflict};

use crate::{specifier, version};

/// Match every rule against the declared dependencies and return the
/// conflicts that fire, in rule-database order.
///
/// `dependencies` maps package name to the raw declared specifier (possibly
/// empty). Keys are compared case-insensitively. The function is total:
/// malformed entries contribute nothing, they never abort the pass.
pub fn evaluate(
    dependencies: &BTreeMap<String, String>,
    rules: &[ConflictRule],
) -> Vec<EvaluatedConflict> {
    let declared: BTreeMap<String, &str> = dependencies
        .iter()
        .map(|(name, spec)| (name.to_lowercase(), spec.as_str()))
        .collect();

    let mut found = Vec::new();
    for rule in rules {
        let affected = affected_packages(rule, &declared);
        // The rule applies only when at least two of its packages are
        // actually declared; one package alone cannot conflict with itself.
        if affected.len() < 2 {
            continue;
        }
        if is_conflicting(&affected, &rule.working_versions, &rule.alternative) {
            tracing::debug!("rule {} fired", rule.id);
            found.push(EvaluatedConflict {
                id: rule.id.clone(),
                description: rule.description.clone(),
                severity: rule.severity,
                affected_packages: affected.into_iter().collect(),
                working_versions: rule.working_versions.clone(),
                alternative: rule.alternative.clone(),
                fix: rule.fix.clone(),
            });
        }
    }
    found
}

/// The subset of declared dependencies a rule names, in the rule's package
/// order and under the rule's original casing.
fn affected_packages(
    rule: &ConflictRule,
    declared: &BTreeMap<String, &str>,
) -> Vec<(String, String)> {
    rule.packages
        .iter()
        .filter_map(|name| {
            declared
                .get(&name.to_lowercase())
                .map(|spec| (name.clone(), spec.to_string()))
        })
        .collect()
}

/// Decide whether the affected versions fall outside the rule's known-good
/// combinations.
///
/// Packages are checked in order; the first one whose version satisfies
/// neither the working specifier nor the alternative decides the verdict
/// for the whole rule. A package with no extractable version number is
/// skipped, never a conflict signal by itself.
fn is_conflicting(
    affected: &[(String, String)],
    working: &BTreeMap<String, String>,
    alternative: &BTreeMap<String, String>,
) -> bool {
    if affected.is_empty() {
        return false;
    }

    for (name, declared_spec) in affected {
        let Some(current) = version::extract_version(declared_spec) else {
            // Nothing pinned, might be okay.
            continue;
        };

        let key = name.to_lowercase();
        let Some(working_spec) = working.get(&key) else {
            continue;
        };
        if specifier::satisfies(current, working_spec) {
            continue;
        }
        match alternative.get(&key) {
            Some(alt_spec) if specifier::satisfies(current, alt_spec) => {}
            _ => return true,
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use aidep_core::db::conflict_rules;
    use aidep_core::rule::Severity;

    fn deps(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(name, spec)| (name.to_string(), spec.to_string()))
            .collect()
    }

    fn versions(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        deps(pairs)
    }

    fn test_rule() -> ConflictRule {
        ConflictRule {
            id: "langchain-llama-sqlalchemy".to_string(),
            packages: vec!["langchain".to_string(), "llama-index".to_string()],
            description: "SQLAlchemy pin mismatch".to_string(),
            severity: Severity::Critical,
            working_versions: versions(&[("langchain", "==0.0.198"), ("llama-index", "==0.7.5")]),
            alternative: versions(&[("langchain", ">=0.1.0"), ("llama-index", ">=0.8.0")]),
            fix: "pip install langchain==0.0.198 llama-index==0.7.5".to_string(),
            tip: None,
        }
    }

    #[test]
    fn empty_dependencies_yield_no_conflicts() {
        let conflicts = evaluate(&BTreeMap::new(), conflict_rules());
        assert!(conflicts.is_empty());
    }

    #[test]
    fn one_of_two_packages_is_not_applicable() {
        let conflicts = evaluate(&deps(&[("langchain", "0.0.200")]), &[test_rule()]);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn outside_working_and_alternative_fires() {
        // 0.0.200 satisfies neither the 0.0.198 pin nor >=0.1.0.
        let conflicts = evaluate(
            &deps(&[("langchain", "0.0.200"), ("llama-index", "0.7.5")]),
            &[test_rule()],
        );
        assert_eq!(conflicts.len(), 1);
        let conflict = &conflicts[0];
        assert_eq!(conflict.id, "langchain-llama-sqlalchemy");
        assert_eq!(conflict.severity, Severity::Critical);
        assert_eq!(
            conflict.affected_packages.get("langchain").map(String::as_str),
            Some("0.0.200")
        );
    }

    #[test]
    fn working_versions_do_not_fire() {
        let conflicts = evaluate(
            &deps(&[("langchain", "0.0.198"), ("llama-index", "0.7.5")]),
            &[test_rule()],
        );
        assert!(conflicts.is_empty());
    }

    #[test]
    fn alternative_versions_do_not_fire() {
        let conflicts = evaluate(
            &deps(&[("langchain", "0.1.4"), ("llama-index", "0.8.2")]),
            &[test_rule()],
        );
        assert!(conflicts.is_empty());
    }

    #[test]
    fn unpinned_specifiers_are_skipped() {
        let conflicts = evaluate(
            &deps(&[("langchain", ""), ("llama-index", "*")]),
            &[test_rule()],
        );
        assert!(conflicts.is_empty());
    }

    #[test]
    fn rule_without_alternative_fires_on_working_miss() {
        let mut rule = test_rule();
        rule.alternative.clear();
        let conflicts = evaluate(
            &deps(&[("langchain", "0.1.4"), ("llama-index", "0.8.2")]),
            &[rule],
        );
        assert_eq!(conflicts.len(), 1);
    }

    #[test]
    fn results_preserve_rule_order() {
        let mut second = test_rule();
        second.id = "second-rule".to_string();
        second.working_versions = versions(&[("langchain", "==9.9.9")]);
        second.alternative.clear();

        let conflicts = evaluate(
            &deps(&[("langchain", "0.0.200"), ("llama-index", "0.7.5")]),
            &[test_rule(), second],
        );
        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].id, "langchain-llama-sqlalchemy");
        assert_eq!(conflicts[1].id, "second-rule");
    }

    #[test]
    fn package_casing_is_insensitive() {
        let conflicts = evaluate(
            &deps(&[("LangChain", "0.0.200"), ("llama-index", "0.7.5")]),
            &[test_rule()],
        );
        assert_eq!(conflicts.len(), 1);
    }

    // Scenarios against the shipped rule database.

    #[test]
    fn langchain_llama_sqlalchemy_scenario_fires() {
        let conflicts = evaluate(
            &deps(&[("langchain", "0.0.200"), ("llama-index", "0.7.5")]),
            conflict_rules(),
        );
        assert!(conflicts
            .iter()
            .any(|c| c.id == "langchain-llama-sqlalchemy"));
    }

    #[test]
    fn modern_openai_langchain_scenario_is_clean() {
        let conflicts = evaluate(
            &deps(&[("openai", "1.0.0"), ("langchain", ">=0.2.0")]),
            conflict_rules(),
        );
        assert!(conflicts.is_empty());
    }

    #[test]
    fn pydantic_v2_with_old_langchain_fires() {
        // 0.0.250 is neither the 0.0.330 pin nor on the >=0.1.0 upgrade path.
        let conflicts = evaluate(
            &deps(&[("pydantic", "2.0.0"), ("langchain", "0.0.250")]),
            conflict_rules(),
        );
        assert!(conflicts.iter().any(|c| c.id == "pydantic-v2-breaking"));
    }
}
