use crate::declaration::{DeclarationCategory, DeclarationSpan};

use super::{LintContext, Rule, RuleId, RuleInput, Violation};

pub const BLANK_LINE_SEPARATION: Rule = Rule {
    id: RuleId::BlankLineSeparation,
    input: RuleInput::Declarations,
    description: "Separate adjacent members with a blank line; fields only at visibility changes",
    check: check_blank_line_separation,
};

const fn always_separated(category: DeclarationCategory) -> bool {
    matches!(
        category,
        DeclarationCategory::Type
            | DeclarationCategory::Method
            | DeclarationCategory::Property
            | DeclarationCategory::EnumValue
            | DeclarationCategory::OperatorOverload
            | DeclarationCategory::Iterator
    )
}

fn check_blank_line_separation(ctx: &LintContext<'_>) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (i, current) in ctx.spans.iter().enumerate() {
        let Some(previous) = previous_sibling(ctx.spans, i) else {
            continue;
        };
        let Some(message) = separation_required(previous, current) else {
            continue;
        };
        let separated = (previous.end_line() + 1..current.start_line())
            .any(|number| ctx.is_blank_line(number));
        if !separated {
            violations.push(Violation::at(&current.start, message));
        }
    }
    violations
}

/// The closest earlier span with the same parent, provided no span of a
/// different scope sits between the two at that level.
fn previous_sibling<'s, 'a>(
    spans: &'s [DeclarationSpan<'a>],
    index: usize,
) -> Option<&'s DeclarationSpan<'a>> {
    let current = &spans[index];
    spans[..index]
        .iter()
        .rev()
        .find(|span| span.depth <= current.depth)
        .filter(|span| span.parent == current.parent)
}

fn separation_required(previous: &DeclarationSpan<'_>, current: &DeclarationSpan<'_>) -> Option<String> {
    if always_separated(previous.category) && always_separated(current.category) {
        return Some(format!(
            "expected a blank line between {} `{}` and {} `{}`",
            previous.category.as_str(),
            previous.name.text,
            current.category.as_str(),
            current.name.text
        ));
    }
    if previous.category == DeclarationCategory::Field
        && current.category == DeclarationCategory::Field
        && previous.visibility != current.visibility
    {
        return Some(format!(
            "expected a blank line between {} and {} fields",
            previous.visibility.as_str(),
            current.visibility.as_str()
        ));
    }
    None
}

#[cfg(test)]
#[path = "separation_tests.rs"]
mod tests;
