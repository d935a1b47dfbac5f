//! Vertical alignment of `=` and `:` in declarations.
//!
//! Padding an operator so that it lines up with the one on the next line is
//! only allowed in hash literals. Everywhere a declaration introduces a value
//! (locals, fields, enum values, default parameters) a single space is used.

use std::collections::{BTreeSet, HashSet};

use crate::declaration::DeclarationCategory;
use crate::lexer::TokenKind;

use super::{LintContext, Rule, RuleId, RuleInput, Violation};

pub const NO_ALIGN_IN_DECLARATIONS: Rule = Rule {
    id: RuleId::NoAlignInDeclarations,
    input: RuleInput::Declarations,
    description: "Do not align `=` or `:` across declarations with extra spaces",
    check: check_no_align,
};

fn is_declaration_operator(ctx: &LintContext<'_>, index: usize) -> bool {
    let token = ctx.tokens[index];
    token.is_operator("=") || token.is_punct(":")
}

fn check_no_align(ctx: &LintContext<'_>) -> Vec<Violation> {
    aligned_operators(ctx)
        .into_iter()
        .map(|i| {
            Violation::at(
                &ctx.tokens[i - 1],
                format!(
                    "do not align `{}` in declarations; use a single space",
                    ctx.tokens[i].text
                ),
            )
        })
        .collect()
}

/// Padded declaration operators that line up with one on an adjacent line,
/// in token order.
pub(super) fn aligned_operators(ctx: &LintContext<'_>) -> Vec<usize> {
    let mut operators = BTreeSet::new();
    collect_variable_operators(ctx, &mut operators);
    collect_span_operators(ctx, &mut operators);

    let placed: HashSet<(usize, usize, &str)> = operators
        .iter()
        .map(|&i| {
            let t = ctx.tokens[i];
            (t.line(), t.column(), t.text)
        })
        .collect();

    operators
        .into_iter()
        .filter(|&i| is_padded(ctx, i))
        .filter(|&i| {
            let token = ctx.tokens[i];
            let (line, column) = (token.line(), token.column());
            placed.contains(&(line + 1, column, token.text))
                || (line > 1 && placed.contains(&(line - 1, column, token.text)))
        })
        .collect()
}

/// Preceded by whitespace other than a single space, not counting indentation.
fn is_padded(ctx: &LintContext<'_>, index: usize) -> bool {
    index > 0
        && ctx.tokens[index - 1].kind.is_whitespace()
        && ctx.tokens[index - 1].text != " "
        && !ctx.is_indentation(index - 1)
}

/// `=`/`:` at the top bracket level of `var`/`const` statements, covering
/// locals and field initializers alike.
fn collect_variable_operators(ctx: &LintContext<'_>, out: &mut BTreeSet<usize>) {
    let tokens = ctx.tokens;
    for (start, token) in tokens.iter().enumerate() {
        if !(token.is_keyword("var") || token.is_keyword("const")) {
            continue;
        }
        let mut depth = 0usize;
        for (i, t) in tokens.iter().enumerate().skip(start + 1) {
            if !t.kind.is_significant() {
                continue;
            }
            if t.is_opening_bracket() {
                depth += 1;
            } else if t.is_closing_bracket() {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            } else if depth == 0 {
                if t.is_punct(";") {
                    break;
                }
                if is_declaration_operator(ctx, i) {
                    out.insert(i);
                }
            }
        }
    }
}

/// Enum value initializers and default parameter values.
fn collect_span_operators(ctx: &LintContext<'_>, out: &mut BTreeSet<usize>) {
    for span in ctx.spans {
        let Some(name) = ctx.token_index(&span.name) else {
            continue;
        };
        match span.category {
            DeclarationCategory::EnumValue => {
                if let Some((i, next)) = ctx.next_significant(name)
                    && next.is_operator("=")
                {
                    out.insert(i);
                }
            }
            DeclarationCategory::Method
            | DeclarationCategory::Iterator
            | DeclarationCategory::OperatorOverload => collect_parameter_defaults(ctx, name, out),
            _ => {}
        }
    }
}

fn collect_parameter_defaults(ctx: &LintContext<'_>, name: usize, out: &mut BTreeSet<usize>) {
    let Some((open, paren)) = ctx.next_significant(name) else {
        return;
    };
    if !paren.is_punct("(") {
        return;
    }
    let mut depth = 0usize;
    for (i, t) in ctx.tokens.iter().enumerate().skip(open) {
        if t.kind != TokenKind::Punctuation && t.kind != TokenKind::Operator {
            continue;
        }
        if t.is_opening_bracket() {
            depth += 1;
        } else if t.is_closing_bracket() {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                break;
            }
        } else if depth == 1 && t.is_operator("=") {
            out.insert(i);
        }
    }
}

#[cfg(test)]
#[path = "alignment_tests.rs"]
mod tests;
