use super::error::LexError;
use super::token::{OPERATORS, Position, Span, Token, TokenKind, WhitespaceKind, is_keyword};

/// Lazy, restartable tokenizer over Osprey source text.
///
/// Every byte of input is covered by exactly one token: whitespace, newlines
/// and comments are emitted rather than skipped. Cloning the tokenizer
/// captures its position, so a clone taken before iteration restarts the scan.
/// After the first `LexError` the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    source: &'a str,
    pos: Position,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: Position::start(),
            failed: false,
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos.offset..]
    }

    /// Consume `len` bytes and build the token covering them.
    fn emit(&mut self, kind: TokenKind, len: usize) -> Token<'a> {
        let start = self.pos;
        let text = &self.source[start.offset..start.offset + len];
        for c in text.chars() {
            if c == '\n' {
                self.pos.line += 1;
                self.pos.column = 1;
            } else {
                self.pos.column += 1;
            }
        }
        self.pos.offset += len;
        Token {
            kind,
            text,
            span: Span {
                start,
                end: self.pos,
            },
        }
    }

    fn scan(&mut self, first: char) -> Result<Token<'a>, LexError> {
        let rest = self.rest();

        if first == '\n' {
            return Ok(self.emit(TokenKind::Newline, 1));
        }
        if rest.starts_with("\r\n") {
            return Ok(self.emit(TokenKind::Newline, 2));
        }
        if first.is_whitespace() {
            let (kind, len) = whitespace_run(rest);
            return Ok(self.emit(TokenKind::Whitespace(kind), len));
        }
        if rest.starts_with("//") {
            return Ok(self.emit(TokenKind::Comment, line_comment_len(rest)));
        }
        if rest.starts_with("/*") {
            return match rest[2..].find("*/") {
                Some(end) => Ok(self.emit(TokenKind::Comment, end + 4)),
                None => Err(LexError::UnterminatedComment {
                    line: self.pos.line,
                    column: self.pos.column,
                }),
            };
        }
        if first == '"' || first == '\'' {
            return match string_len(rest, first) {
                Some(len) => Ok(self.emit(TokenKind::StringLiteral, len)),
                None => Err(LexError::UnterminatedString {
                    line: self.pos.line,
                    column: self.pos.column,
                }),
            };
        }
        if first.is_ascii_digit() {
            return Ok(self.emit(TokenKind::NumberLiteral, number_len(rest)));
        }
        if first.is_alphabetic() || first == '_' {
            let len = rest
                .char_indices()
                .find(|&(_, c)| !(c.is_alphanumeric() || c == '_'))
                .map_or(rest.len(), |(i, _)| i);
            let kind = if is_keyword(&rest[..len]) {
                TokenKind::Keyword
            } else {
                TokenKind::Identifier
            };
            return Ok(self.emit(kind, len));
        }
        if let Some(op) = OPERATORS.iter().find(|op| rest.starts_with(**op)) {
            return Ok(self.emit(TokenKind::Operator, op.len()));
        }
        Ok(self.emit(TokenKind::Punctuation, first.len_utf8()))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let first = self.rest().chars().next()?;
        let result = self.scan(first);
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}

/// Tokenize the whole input eagerly.
///
/// # Errors
/// Returns the first `LexError` encountered (unterminated string or comment).
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    Tokenizer::new(source).collect()
}

fn whitespace_run(rest: &str) -> (WhitespaceKind, usize) {
    let mut tabs = false;
    let mut spaces = false;
    let mut len = 0;
    for (i, c) in rest.char_indices() {
        if c == '\n' || !c.is_whitespace() || rest[i..].starts_with("\r\n") {
            break;
        }
        if c == '\t' {
            tabs = true;
        } else {
            spaces = true;
        }
        len = i + c.len_utf8();
    }
    let kind = match (tabs, spaces) {
        (true, false) => WhitespaceKind::Tabs,
        (false, _) => WhitespaceKind::Spaces,
        (true, true) => WhitespaceKind::Mixed,
    };
    (kind, len)
}

fn line_comment_len(rest: &str) -> usize {
    let end = rest.find('\n').unwrap_or(rest.len());
    if end > 0 && rest.as_bytes()[end - 1] == b'\r' && end < rest.len() {
        end - 1
    } else {
        end
    }
}

/// Length of a quoted string including both quotes, or `None` when the line
/// or input ends first.
fn string_len(rest: &str, quote: char) -> Option<usize> {
    let mut chars = rest.char_indices().skip(1);
    while let Some((i, c)) = chars.next() {
        match c {
            '\n' | '\r' => return None,
            '\\' => match chars.next() {
                Some((_, '\n' | '\r')) | None => return None,
                Some(_) => {}
            },
            c if c == quote => return Some(i + c.len_utf8()),
            _ => {}
        }
    }
    None
}

fn number_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    let mut len = 0;
    while len < bytes.len() {
        let b = bytes[len];
        let continues_fraction =
            b == b'.' && bytes.get(len + 1).is_some_and(u8::is_ascii_digit);
        if b.is_ascii_alphanumeric() || b == b'_' || continues_fraction {
            len += 1;
        } else {
            break;
        }
    }
    len
}

#[cfg(test)]
#[path = "tokenizer_tests.rs"]
mod tests;
