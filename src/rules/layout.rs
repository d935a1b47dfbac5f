//! Line-oriented rules: length, indentation and blank lines.

use crate::lexer::TokenKind;

use super::{LintContext, Rule, RuleId, RuleInput, Violation};

pub const MAX_LINE_LENGTH: Rule = Rule {
    id: RuleId::MaxLineLength,
    input: RuleInput::Tokens,
    description: "Lines should not exceed the configured length (tabs expand to tab stops)",
    check: check_max_line_length,
};

pub const INDENTATION_TABS: Rule = Rule {
    id: RuleId::IndentationTabs,
    input: RuleInput::Tokens,
    description: "Indent with tabs; spaces are only allowed for alignment after the tabs",
    check: check_indentation_tabs,
};

pub const TRAILING_WHITESPACE: Rule = Rule {
    id: RuleId::TrailingWhitespace,
    input: RuleInput::Text,
    description: "Lines must not end with whitespace",
    check: check_trailing_whitespace,
};

pub const FINAL_NEWLINE: Rule = Rule {
    id: RuleId::FinalNewline,
    input: RuleInput::Text,
    description: "Files must end with exactly one newline",
    check: check_final_newline,
};

pub const MULTIPLE_BLANK_LINES: Rule = Rule {
    id: RuleId::MultipleBlankLines,
    input: RuleInput::Tokens,
    description: "Never use more than one consecutive blank line",
    check: check_multiple_blank_lines,
};

fn check_max_line_length(ctx: &LintContext<'_>) -> Vec<Violation> {
    let limit = ctx.settings.max_line_length;
    let tab_width = ctx.settings.tab_width.max(1);
    let mut violations = Vec::new();

    for line in ctx.lines.iter() {
        let mut width = 0;
        let mut crossed_at = None;
        for (i, c) in line.text.chars().enumerate() {
            width = if c == '\t' {
                (width / tab_width + 1) * tab_width
            } else {
                width + 1
            };
            if width > limit && crossed_at.is_none() {
                crossed_at = Some(i + 1);
            }
        }
        let Some(column) = crossed_at else {
            continue;
        };
        if crosses_inside_string(ctx, line.number, column) {
            continue;
        }
        violations.push(Violation::new(
            line.number,
            column,
            format!("line is {width} columns long, exceeding the limit of {limit}"),
        ));
    }
    violations
}

/// A long string literal (typically a message) may push a line over the limit.
fn crosses_inside_string(ctx: &LintContext<'_>, line: usize, column: usize) -> bool {
    let after = ctx
        .tokens
        .partition_point(|t| (t.line(), t.column()) <= (line, column));
    after.checked_sub(1).is_some_and(|i| {
        let t = ctx.tokens[i];
        t.kind == TokenKind::StringLiteral && t.line() == line && column < t.span.end.column
    })
}

fn check_indentation_tabs(ctx: &LintContext<'_>) -> Vec<Violation> {
    ctx.lines
        .iter()
        .filter(|line| !line.is_blank() && !ctx.in_block_comment(line.number))
        .filter_map(|line| {
            indentation_problem(line.text)
                .map(|(column, message)| Violation::new(line.number, column, message))
        })
        .collect()
}

/// Leading whitespace must be tabs optionally followed by alignment spaces.
fn indentation_problem(text: &str) -> Option<(usize, &'static str)> {
    let mut seen_tab = false;
    let mut seen_space = false;
    for (i, c) in text.chars().enumerate() {
        match c {
            '\t' if seen_space => return Some((i + 1, "tab after space in indentation")),
            '\t' => seen_tab = true,
            ' ' if !seen_tab => {
                return Some((i + 1, "indentation must use tabs, not spaces"));
            }
            ' ' => seen_space = true,
            c if c.is_whitespace() => {
                return Some((i + 1, "unexpected whitespace character in indentation"));
            }
            _ => break,
        }
    }
    None
}

fn check_trailing_whitespace(ctx: &LintContext<'_>) -> Vec<Violation> {
    ctx.lines
        .iter()
        .filter(|line| line.text.ends_with(char::is_whitespace))
        .map(|line| {
            let column = line.text.trim_end().chars().count() + 1;
            Violation::new(line.number, column, "trailing whitespace")
        })
        .collect()
}

fn check_final_newline(ctx: &LintContext<'_>) -> Vec<Violation> {
    let Some(last) = ctx.lines.last() else {
        return Vec::new();
    };
    if !last.terminated {
        return vec![Violation::new(
            last.number,
            last.char_len().max(1),
            "file must end with a newline",
        )];
    }

    // Walk back over the blank lines the file ends with.
    let mut first_extra = None;
    let mut number = last.number;
    while number > 1 && ctx.lines.get(number).is_some_and(|line| line.is_blank()) {
        first_extra = Some(number);
        number -= 1;
    }
    first_extra
        .map(|number| {
            Violation::new(number, 1, "file must end with exactly one newline")
        })
        .into_iter()
        .collect()
}

fn check_multiple_blank_lines(ctx: &LintContext<'_>) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut run = 0;
    for line in ctx.lines.iter() {
        if ctx.is_blank_line(line.number) {
            run += 1;
            if run == 2 {
                violations.push(Violation::new(
                    line.number,
                    1,
                    "more than one consecutive blank line",
                ));
            }
        } else {
            run = 0;
        }
    }
    violations
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
