use crate::config::LintSettings;
use crate::declaration::DeclarationSpan;
use crate::lexer::{Token, TokenKind};

/// Keywords that end an operand, so a following `+`/`-` is binary.
const VALUE_KEYWORDS: &[&str] = &["this", "base", "null", "true", "false"];

/// One physical line without its terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub number: usize,
    pub text: &'a str,
    /// Whether the line ends with `\n` (as opposed to end of input).
    pub terminated: bool,
}

impl Line<'_> {
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Physical lines of a source file, split on `\n` with a trailing `\r`
/// removed. A final `\n` does not start a new line.
#[derive(Debug, Clone, Default)]
pub struct LineIndex<'a> {
    lines: Vec<Line<'a>>,
}

impl<'a> LineIndex<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        let mut lines = Vec::new();
        let mut rest = source;
        while !rest.is_empty() {
            let number = lines.len() + 1;
            if let Some(end) = rest.find('\n') {
                let raw = &rest[..end];
                lines.push(Line {
                    number,
                    text: raw.strip_suffix('\r').unwrap_or(raw),
                    terminated: true,
                });
                rest = &rest[end + 1..];
            } else {
                lines.push(Line {
                    number,
                    text: rest,
                    terminated: false,
                });
                break;
            }
        }
        Self { lines }
    }

    /// Line by 1-based number.
    #[must_use]
    pub fn get(&self, number: usize) -> Option<&Line<'a>> {
        number.checked_sub(1).and_then(|i| self.lines.get(i))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line<'a>> {
        self.lines.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Line<'a>> {
        self.lines.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Everything a rule may look at for one file.
///
/// `tokens` covers the whole file (whitespace and comments included) and is
/// empty when no enabled rule needed tokenizing; `spans` likewise.
pub struct LintContext<'a> {
    pub source: &'a str,
    pub lines: LineIndex<'a>,
    pub tokens: &'a [Token<'a>],
    pub spans: &'a [DeclarationSpan<'a>],
    pub settings: &'a LintSettings,
    /// Per line: starts inside a block comment opened on an earlier line.
    comment_continuation: Vec<bool>,
}

impl<'a> LintContext<'a> {
    #[must_use]
    pub fn new(
        source: &'a str,
        tokens: &'a [Token<'a>],
        spans: &'a [DeclarationSpan<'a>],
        settings: &'a LintSettings,
    ) -> Self {
        let lines = LineIndex::new(source);
        let mut comment_continuation = vec![false; lines.len()];
        for comment in tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Comment && t.is_multi_line())
        {
            for number in comment.line() + 1..=comment.end_line() {
                if let Some(slot) = comment_continuation.get_mut(number - 1) {
                    *slot = true;
                }
            }
        }
        Self {
            source,
            lines,
            tokens,
            spans,
            settings,
            comment_continuation,
        }
    }

    /// Context over raw text only, for rules that never look at tokens.
    #[must_use]
    pub fn text_only(source: &'a str, settings: &'a LintSettings) -> Self {
        Self::new(source, &[], &[], settings)
    }

    /// True when the line begins inside a multi-line block comment.
    #[must_use]
    pub fn in_block_comment(&self, number: usize) -> bool {
        number
            .checked_sub(1)
            .and_then(|i| self.comment_continuation.get(i))
            .copied()
            .unwrap_or(false)
    }

    /// A whitespace-only line that is not part of a block comment.
    #[must_use]
    pub fn is_blank_line(&self, number: usize) -> bool {
        self.lines.get(number).is_some_and(Line::is_blank) && !self.in_block_comment(number)
    }

    #[must_use]
    pub fn prev_significant(&self, index: usize) -> Option<(usize, Token<'a>)> {
        (0..index.min(self.tokens.len()))
            .rev()
            .find(|&i| self.tokens[i].kind.is_significant())
            .map(|i| (i, self.tokens[i]))
    }

    #[must_use]
    pub fn next_significant(&self, index: usize) -> Option<(usize, Token<'a>)> {
        (index + 1..self.tokens.len())
            .find(|&i| self.tokens[i].kind.is_significant())
            .map(|i| (i, self.tokens[i]))
    }

    /// Index of a token (as found in a declaration span) in `tokens`.
    #[must_use]
    pub fn token_index(&self, token: &Token<'_>) -> Option<usize> {
        self.tokens
            .binary_search_by_key(&token.span.start.offset, |t| t.span.start.offset)
            .ok()
    }

    /// Whitespace opening a line.
    #[must_use]
    pub fn is_indentation(&self, index: usize) -> bool {
        self.tokens.get(index).is_some_and(|t| t.kind.is_whitespace())
            && (index == 0 || self.tokens[index - 1].kind == TokenKind::Newline)
    }

    /// Whitespace closing a line or the file.
    #[must_use]
    pub fn is_trailing(&self, index: usize) -> bool {
        self.tokens.get(index).is_some_and(|t| t.kind.is_whitespace())
            && self
                .tokens
                .get(index + 1)
                .is_none_or(|t| t.kind == TokenKind::Newline)
    }

    /// Whether an operator at `index` starts an operand rather than joining two.
    #[must_use]
    pub fn is_unary_position(&self, index: usize) -> bool {
        let Some((_, prev)) = self.prev_significant(index) else {
            return true;
        };
        match prev.kind {
            TokenKind::Operator => true,
            TokenKind::Punctuation => !prev.is_closing_bracket(),
            TokenKind::Keyword => !VALUE_KEYWORDS.contains(&prev.text),
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
