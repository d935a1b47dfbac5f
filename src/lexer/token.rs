/// A 1-based location in source text.
///
/// `offset` is a byte offset; `column` counts Unicode scalar values so that it
/// matches what an editor shows for UTF-8 input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

/// Half-open range `[start, end)` covered by a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Shape of a whitespace run. Indentation rules care about tabs, alignment
/// rules care about spaces, so the distinction is made at lexing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhitespaceKind {
    Tabs,
    Spaces,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Keyword,
    Operator,
    Punctuation,
    NumberLiteral,
    StringLiteral,
    Comment,
    Whitespace(WhitespaceKind),
    Newline,
}

impl TokenKind {
    #[must_use]
    pub const fn is_whitespace(self) -> bool {
        matches!(self, Self::Whitespace(_))
    }

    /// Tokens that carry meaning for the declaration detector and spacing rules.
    #[must_use]
    pub const fn is_significant(self) -> bool {
        !matches!(self, Self::Whitespace(_) | Self::Newline | Self::Comment)
    }
}

/// A lexical token borrowing its text from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
}

impl Token<'_> {
    #[must_use]
    pub const fn line(&self) -> usize {
        self.span.start.line
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.span.start.column
    }

    #[must_use]
    pub const fn end_line(&self) -> usize {
        self.span.end.line
    }

    #[must_use]
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    #[must_use]
    pub fn is_punct(&self, text: &str) -> bool {
        self.is(TokenKind::Punctuation, text)
    }

    #[must_use]
    pub fn is_keyword(&self, text: &str) -> bool {
        self.is(TokenKind::Keyword, text)
    }

    #[must_use]
    pub fn is_operator(&self, text: &str) -> bool {
        self.is(TokenKind::Operator, text)
    }

    #[must_use]
    pub fn is_opening_bracket(&self) -> bool {
        self.kind == TokenKind::Punctuation && matches!(self.text, "(" | "[" | "{")
    }

    #[must_use]
    pub fn is_closing_bracket(&self) -> bool {
        self.kind == TokenKind::Punctuation && matches!(self.text, ")" | "]" | "}")
    }

    /// True for a whitespace run made of exactly one space character.
    #[must_use]
    pub fn is_single_space(&self) -> bool {
        self.kind.is_whitespace() && self.text == " "
    }

    /// True for a comment that spans more than one line.
    #[must_use]
    pub const fn is_multi_line(&self) -> bool {
        self.span.end.line > self.span.start.line
    }
}

pub const KEYWORDS: &[&str] = &[
    "abstract",
    "and",
    "base",
    "break",
    "catch",
    "class",
    "const",
    "continue",
    "do",
    "else",
    "enum",
    "false",
    "finally",
    "for",
    "function",
    "get",
    "if",
    "in",
    "inheritable",
    "is",
    "iter",
    "namespace",
    "new",
    "not",
    "null",
    "operator",
    "or",
    "override",
    "private",
    "protected",
    "public",
    "return",
    "set",
    "static",
    "this",
    "throw",
    "true",
    "try",
    "use",
    "var",
    "while",
    "with",
    "yield",
];

/// Operators ordered longest first so that a prefix scan yields the longest match.
pub const OPERATORS: &[&str] = &[
    "**=", "<<=", ">>=", "??=", "::", "->", "=>", "**", "==", "!=", "<=", ">=", "+=", "-=", "*=",
    "/=", "%=", "&=", "|=", "^=", "<<", ">>", "&&", "||", "??", "?.", "..", "=", "+", "-", "*",
    "/", "%", "<", ">", "&", "|", "^", "~", "!", "?", ".", "@",
];

#[must_use]
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.binary_search(&word).is_ok()
}
