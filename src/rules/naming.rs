//! Capitalization of declaration names and underscore use on fields.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::declaration::{DeclarationCategory, DeclarationSpan, Visibility};
use crate::lexer::TokenKind;

use super::{LintContext, Rule, RuleId, RuleInput, Violation};

pub const TYPE_NAME_CASING: Rule = Rule {
    id: RuleId::TypeNameCasing,
    input: RuleInput::Declarations,
    description: "Type names are UpperCamelCase (abbreviations of up to two letters stay upper case)",
    check: check_type_name_casing,
};

pub const MEMBER_NAME_CASING: Rule = Rule {
    id: RuleId::MemberNameCasing,
    input: RuleInput::Declarations,
    description: "Member names are lowerCamelCase, constants included",
    check: check_member_name_casing,
};

pub const BACKING_FIELD_UNDERSCORE: Rule = Rule {
    id: RuleId::BackingFieldUnderscore,
    input: RuleInput::Declarations,
    description: "Only private fields backing a property carry a single leading underscore",
    check: check_backing_field_underscore,
};

static UPPER_CAMEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").expect("Invalid regex"));

static LOWER_CAMEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][A-Za-z0-9]*$").expect("Invalid regex"));

static UPPER_SNAKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9]*(_[A-Z0-9]+)*$").expect("Invalid regex"));

/// Longest run of capitals allowed for an abbreviation (`IO` in `IOError`).
const MAX_ABBREVIATION: usize = 2;

/// Whether every run of capitals is an abbreviation of acceptable length.
///
/// A run followed by a lower-case letter ends with the first letter of the
/// next word, so `IOError` holds the abbreviation `IO` while `HTMLDocument`
/// holds `HTML`.
fn abbreviations_ok(name: &str) -> bool {
    let chars: Vec<char> = name.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_uppercase() {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i].is_ascii_uppercase() {
            i += 1;
        }
        let run = i - start;
        let abbreviation = if chars.get(i).is_some_and(char::is_ascii_lowercase) {
            run - 1
        } else {
            run
        };
        if abbreviation > MAX_ABBREVIATION {
            return false;
        }
    }
    true
}

#[must_use]
pub fn is_upper_camel_case(name: &str) -> bool {
    UPPER_CAMEL.is_match(name) && abbreviations_ok(name)
}

#[must_use]
pub fn is_lower_camel_case(name: &str) -> bool {
    LOWER_CAMEL.is_match(name) && abbreviations_ok(name)
}

fn check_type_name_casing(ctx: &LintContext<'_>) -> Vec<Violation> {
    ctx.spans
        .iter()
        .filter(|span| span.category == DeclarationCategory::Type)
        .filter(|span| !is_upper_camel_case(span.name.text))
        .map(|span| {
            Violation::at(
                &span.name,
                format!("type name `{}` should be UpperCamelCase", span.name.text),
            )
        })
        .collect()
}

fn check_member_name_casing(ctx: &LintContext<'_>) -> Vec<Violation> {
    ctx.spans
        .iter()
        .filter(|span| {
            !matches!(
                span.category,
                DeclarationCategory::Type | DeclarationCategory::OperatorOverload
            ) && span.name.kind == TokenKind::Identifier
        })
        .filter_map(|span| {
            let name = casing_name(span);
            if is_lower_camel_case(name) {
                return None;
            }
            let message = if span.constant && UPPER_SNAKE.is_match(name) {
                format!(
                    "constant `{}` should be lowerCamelCase, not UPPER_SNAKE_CASE",
                    span.name.text
                )
            } else {
                format!(
                    "{} name `{}` should be lowerCamelCase",
                    span.category.as_str(),
                    span.name.text
                )
            };
            Some(Violation::at(&span.name, message))
        })
        .collect()
}

/// Underscores on field names are judged by `backing-field-underscore`.
fn casing_name<'a>(span: &DeclarationSpan<'a>) -> &'a str {
    if span.category == DeclarationCategory::Field {
        let trimmed = span.name.text.trim_matches('_');
        if !trimmed.is_empty() {
            return trimmed;
        }
    }
    span.name.text
}

fn check_backing_field_underscore(ctx: &LintContext<'_>) -> Vec<Violation> {
    let properties: HashSet<(Option<usize>, &str)> = ctx
        .spans
        .iter()
        .filter(|span| span.category == DeclarationCategory::Property)
        .map(|span| (span.parent, span.name.text))
        .collect();

    ctx.spans
        .iter()
        .filter(|span| span.category == DeclarationCategory::Field)
        .filter_map(|field| {
            let name = field.name.text;
            let logical = field.logical_name();
            let backs_property = field.visibility == Visibility::Private
                && !logical.is_empty()
                && properties.contains(&(field.parent, logical));

            let message = if backs_property {
                let expected = format!("_{logical}");
                (name != expected).then(|| {
                    format!("backing field for property `{logical}` should be named `{expected}`")
                })?
            } else if name.starts_with('_') || name.ends_with('_') {
                format!(
                    "field `{name}` must not have a leading or trailing underscore; \
                     only private backing fields start with `_`"
                )
            } else {
                return None;
            };
            Some(Violation::at(&field.name, message))
        })
        .collect()
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;
