use super::*;

#[test]
fn exit_codes_are_distinct() {
    assert_ne!(EXIT_SUCCESS, EXIT_VIOLATIONS);
    assert_ne!(EXIT_SUCCESS, EXIT_CONFIG_ERROR);
    assert_ne!(EXIT_VIOLATIONS, EXIT_CONFIG_ERROR);
}

#[test]
fn default_linter_runs_every_rule() {
    let linter = Linter::default();
    assert_eq!(linter.rule_count(), RuleId::ALL.len());

    let diagnostics = linter.lint_source("class lower {\n}");
    let rules: Vec<_> = diagnostics.iter().map(|d| d.rule).collect();
    assert_eq!(rules, vec![RuleId::TypeNameCasing, RuleId::FinalNewline]);
    assert!(diagnostics.iter().all(|d| d.severity == Severity::Error));
}
