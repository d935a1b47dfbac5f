//! Horizontal spacing around brackets and operators.

use crate::lexer::{Token, TokenKind};

use super::{LintContext, Rule, RuleId, RuleInput, Violation};

pub const PAREN_BRACKET_SPACING: Rule = Rule {
    id: RuleId::ParenBracketSpacing,
    input: RuleInput::Tokens,
    description: "No space directly inside parentheses, brackets or braces",
    check: check_paren_bracket_spacing,
};

pub const INFIX_OPERATOR_SPACING: Rule = Rule {
    id: RuleId::InfixOperatorSpacing,
    input: RuleInput::Declarations,
    description: "Infix operators are surrounded by a single space on each side",
    check: check_infix_operator_spacing,
};

pub const UNARY_NOT_SPACING: Rule = Rule {
    id: RuleId::UnaryNotSpacing,
    input: RuleInput::Tokens,
    description: "`not` is followed by one space; other unary operators touch their operand",
    check: check_unary_not_spacing,
};

/// Operators that join two operands. `+` and `-` are unary in operand position.
const INFIX_OPERATORS: &[&str] = &[
    "**=", "<<=", ">>=", "??=", "::", "->", "=>", "**", "==", "!=", "<=", ">=", "+=", "-=", "*=",
    "/=", "%=", "&=", "|=", "^=", "<<", ">>", "&&", "||", "??", "=", "+", "-", "*", "/", "%", "<",
    ">", "&", "|", "^",
];

const INFIX_KEYWORDS: &[&str] = &["and", "or", "is"];

const PREFIX_OPERATORS: &[&str] = &["!", "~"];

fn is_infix(ctx: &LintContext<'_>, index: usize) -> bool {
    let token = ctx.tokens[index];
    match token.kind {
        TokenKind::Operator => {
            INFIX_OPERATORS.contains(&token.text)
                && !(matches!(token.text, "+" | "-") && ctx.is_unary_position(index))
                && !names_overload(ctx, index)
        }
        TokenKind::Keyword => INFIX_KEYWORDS.contains(&token.text),
        _ => false,
    }
}

/// The operator in `operator ==(other)` is a name, not an operation.
fn names_overload(ctx: &LintContext<'_>, index: usize) -> bool {
    ctx.prev_significant(index)
        .is_some_and(|(_, prev)| prev.is_keyword("operator"))
}

fn is_unary(ctx: &LintContext<'_>, index: usize) -> bool {
    let token = ctx.tokens[index];
    token.kind == TokenKind::Operator
        && (PREFIX_OPERATORS.contains(&token.text)
            || (matches!(token.text, "+" | "-") && ctx.is_unary_position(index)))
}

const fn is_space_like(token: &Token<'_>) -> bool {
    matches!(token.kind, TokenKind::Whitespace(_) | TokenKind::Newline)
}

/// Tokens after which whitespace is expected anyway.
fn mandates_space_after(ctx: &LintContext<'_>, index: usize) -> bool {
    let token = ctx.tokens[index];
    match token.kind {
        TokenKind::Operator | TokenKind::Keyword => true,
        TokenKind::Punctuation => matches!(token.text, "," | ";" | ":"),
        _ => false,
    }
}

fn check_paren_bracket_spacing(ctx: &LintContext<'_>) -> Vec<Violation> {
    let tokens = ctx.tokens;
    let mut violations = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        if token.is_opening_bracket() {
            if let Some(space) = tokens.get(i + 1)
                && space.kind.is_whitespace()
                && !ctx.is_trailing(i + 1)
                && !tokens.get(i + 2).is_some_and(|t| t.kind == TokenKind::Comment)
            {
                violations.push(Violation::at(
                    space,
                    format!("unexpected space after `{}`", token.text),
                ));
            }
        } else if token.is_closing_bracket()
            && i > 0
            && tokens[i - 1].kind.is_whitespace()
            && !ctx.is_indentation(i - 1)
        {
            let exempt = ctx.prev_significant(i).is_some_and(|(p, prev)| {
                // `{ }` is already reported after the opener
                prev.is_opening_bracket()
                    || is_infix(ctx, p)
                    || prev.is_keyword("not")
            });
            if !exempt {
                violations.push(Violation::at(
                    &tokens[i - 1],
                    format!("unexpected space before `{}`", token.text),
                ));
            }
        }
    }
    violations
}

fn check_infix_operator_spacing(ctx: &LintContext<'_>) -> Vec<Violation> {
    let tokens = ctx.tokens;
    let aligned = super::alignment::aligned_operators(ctx);
    let mut violations = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        if !is_infix(ctx, i) {
            continue;
        }
        match i.checked_sub(1).map(|p| (p, &tokens[p])) {
            Some((p, prev)) if is_space_like(prev) => {
                if is_wide_gap(ctx, p) && aligned.binary_search(&i).is_err() {
                    violations.push(Violation::at(
                        prev,
                        format!("use a single space before `{}`", token.text),
                    ));
                }
            }
            _ => violations.push(Violation::at(
                token,
                format!("missing space before `{}`", token.text),
            )),
        }
        match tokens.get(i + 1) {
            Some(next) if is_space_like(next) => {
                if is_wide_gap(ctx, i + 1) {
                    violations.push(Violation::at(
                        next,
                        format!("use a single space after `{}`", token.text),
                    ));
                }
            }
            next => violations.push(Violation::at(
                next.unwrap_or(token),
                format!("missing space after `{}`", token.text),
            )),
        }
    }
    violations
}

/// Whitespace other than one space, line breaks, indentation and trailing
/// whitespace.
fn is_wide_gap(ctx: &LintContext<'_>, index: usize) -> bool {
    let token = ctx.tokens[index];
    token.kind.is_whitespace()
        && token.text != " "
        && !ctx.is_indentation(index)
        && !ctx.is_trailing(index)
}

fn check_unary_not_spacing(ctx: &LintContext<'_>) -> Vec<Violation> {
    let tokens = ctx.tokens;
    let mut violations = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        let is_not = token.is_keyword("not");
        if !is_not && !is_unary(ctx, i) {
            continue;
        }

        let next = tokens.get(i + 1);
        if is_not {
            let single = next.is_some_and(Token::is_single_space) && !ctx.is_trailing(i + 1);
            if !single {
                violations.push(Violation::at(
                    token,
                    "`not` must be followed by exactly one space",
                ));
            }
        } else if next.is_some_and(|t| !t.kind.is_significant()) {
            violations.push(Violation::at(
                token,
                format!("unexpected space after unary `{}`", token.text),
            ));
        }

        if let Some(violation) = leading_space_violation(ctx, i, is_not) {
            violations.push(violation);
        }
    }
    violations
}

fn leading_space_violation(ctx: &LintContext<'_>, index: usize, is_not: bool) -> Option<Violation> {
    let token = ctx.tokens[index];
    let space = index.checked_sub(1).map(|i| ctx.tokens[i])?;
    if !space.kind.is_whitespace() || ctx.is_indentation(index - 1) {
        return None;
    }
    let (p, prev) = ctx.prev_significant(index)?;
    if prev.is_opening_bracket() {
        return None;
    }
    if mandates_space_after(ctx, p) {
        return (space.text != " ").then(|| {
            Violation::at(
                &space,
                format!("expected a single space before `{}`", token.text),
            )
        });
    }
    // `x not in y` style uses of `not` are not unary
    if is_not {
        return None;
    }
    Some(Violation::at(
        &space,
        format!("unexpected space before unary `{}`", token.text),
    ))
}

#[cfg(test)]
#[path = "spacing_tests.rs"]
mod tests;
