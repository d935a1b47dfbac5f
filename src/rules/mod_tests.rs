use super::*;

#[test]
fn registry_holds_every_configurable_rule_in_order() {
    let registry = RuleRegistry::builtin();
    let ids: Vec<_> = registry.iter().map(|rule| rule.id).collect();
    assert_eq!(ids, RuleId::ALL.to_vec());
    assert!(registry.get(RuleId::LexError).is_none());
}

#[test]
fn only_line_length_defaults_to_warning() {
    for rule in RuleRegistry::builtin().iter() {
        let expected = if rule.id == RuleId::MaxLineLength {
            Severity::Warning
        } else {
            Severity::Error
        };
        assert_eq!(rule.default_severity(), expected, "{}", rule.id);
    }
}

#[test]
fn rule_ids_parse_from_their_kebab_case_names() {
    for id in RuleId::ALL {
        assert_eq!(id.as_str().parse::<RuleId>().unwrap(), id);
    }
}

#[test]
fn unknown_and_internal_ids_are_rejected() {
    assert!(matches!(
        "no-such-rule".parse::<RuleId>(),
        Err(OspreyLintError::UnknownRule(name)) if name == "no-such-rule"
    ));
    assert!("lex-error".parse::<RuleId>().is_err());
}

#[test]
fn serde_names_match_display() {
    for id in RuleId::ALL {
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}

#[test]
fn text_only_rules_need_no_tokens() {
    let registry = RuleRegistry::builtin();
    let text_only: Vec<_> = registry
        .iter()
        .filter(|rule| rule.input == RuleInput::Text)
        .map(|rule| rule.id)
        .collect();
    assert_eq!(
        text_only,
        vec![RuleId::TrailingWhitespace, RuleId::FinalNewline]
    );
}
