use crate::lexer::{Token, TokenKind};

use super::{DeclarationCategory, DeclarationSpan, Visibility};

const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "abstract",
    "override",
    "inheritable",
];

/// Finds declaration spans with brace and keyword matching.
///
/// Works over significant tokens only. Bodies of methods, properties and
/// other members are skipped wholesale, which is also what keeps lambda
/// braces from ever being classified.
pub struct DeclarationDetector<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    spans: Vec<DeclarationSpan<'a>>,
    /// Open `namespace { … }` blocks around the current position.
    namespaces: usize,
}

/// Modifiers and starting token collected before the declaration keyword.
#[derive(Clone, Copy)]
struct Header<'a> {
    start: Token<'a>,
    visibility: Visibility,
    depth: usize,
    parent: Option<usize>,
}

impl<'a> DeclarationDetector<'a> {
    #[must_use]
    pub fn new(tokens: &[Token<'a>]) -> Self {
        Self {
            tokens: tokens
                .iter()
                .copied()
                .filter(|t| t.kind.is_significant())
                .collect(),
            pos: 0,
            spans: Vec::new(),
            namespaces: 0,
        }
    }

    /// Run the detector over the whole file, returning spans in source order.
    #[must_use]
    pub fn detect(mut self) -> Vec<DeclarationSpan<'a>> {
        self.parse_scope(None, 0, false);
        self.spans
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<Token<'a>> {
        self.tokens.get(self.pos + ahead).copied()
    }

    fn last_token(&self) -> Option<Token<'a>> {
        self.tokens.last().copied()
    }

    /// Parse declarations until the closing `}` of the current scope (left
    /// unconsumed) or the end of input.
    fn parse_scope(&mut self, parent: Option<usize>, depth: usize, in_type: bool) {
        while let Some(token) = self.peek() {
            if token.is_punct("}") {
                if parent.is_some() || self.namespaces > 0 {
                    return;
                }
                self.pos += 1;
                continue;
            }
            if token.is_punct(";") {
                self.pos += 1;
                continue;
            }
            self.parse_member(parent, depth, in_type);
        }
    }

    fn parse_member(&mut self, parent: Option<usize>, depth: usize, in_type: bool) {
        let Some(start) = self.peek() else {
            return;
        };
        let mut header = Header {
            start,
            visibility: Visibility::default(),
            depth,
            parent,
        };
        while let Some(token) = self.peek()
            && token.kind == TokenKind::Keyword
            && MODIFIERS.contains(&token.text)
        {
            if let Some(visibility) = Visibility::from_keyword(token.text) {
                header.visibility = visibility;
            }
            self.pos += 1;
        }

        let Some(keyword) = self.peek() else {
            return;
        };
        let recognised = match (keyword.kind, keyword.text) {
            (TokenKind::Keyword, "class") => self.parse_type(header, false),
            (TokenKind::Keyword, "enum") => self.parse_type(header, true),
            (TokenKind::Keyword, "function") => {
                self.parse_callable(header, DeclarationCategory::Method)
            }
            (TokenKind::Keyword, "iter") => {
                self.parse_callable(header, DeclarationCategory::Iterator)
            }
            (TokenKind::Keyword, "operator") => self.parse_operator(header),
            (TokenKind::Keyword, "new") if self.peek_at(1).is_some_and(|t| t.is_punct("(")) => {
                self.parse_constructor(header)
            }
            (TokenKind::Keyword, "get" | "set") => self.parse_property(header),
            (TokenKind::Keyword, "var" | "const") if in_type => self.parse_fields(header),
            (TokenKind::Keyword, "namespace") if !in_type => self.parse_namespace(parent, depth),
            _ => false,
        };

        if !recognised {
            tracing::trace!(
                line = keyword.line(),
                column = keyword.column(),
                "skipping unclassified statement"
            );
            self.skip_statement();
        }
    }

    fn push(
        &mut self,
        header: Header<'a>,
        category: DeclarationCategory,
        name: Token<'a>,
        end: Token<'a>,
    ) -> usize {
        self.spans.push(DeclarationSpan {
            category,
            name,
            start: header.start,
            end,
            visibility: header.visibility,
            depth: header.depth,
            parent: header.parent,
            constant: false,
        });
        self.spans.len() - 1
    }

    /// `class Name … { members }` or `enum Name … { values }`.
    fn parse_type(&mut self, header: Header<'a>, is_enum: bool) -> bool {
        self.pos += 1;
        let Some(name) = self.peek().filter(|t| t.kind == TokenKind::Identifier) else {
            return false;
        };
        self.pos += 1;
        if !self.advance_to_block_open() {
            return false;
        }
        let Some(open) = self.peek() else {
            return false;
        };
        let index = self.push(header, DeclarationCategory::Type, name, open);
        self.pos += 1;

        if is_enum {
            self.parse_enum_values(index, header.depth + 1);
        } else {
            self.parse_scope(Some(index), header.depth + 1, true);
        }

        let end = match self.peek() {
            Some(close) => {
                self.pos += 1;
                close
            }
            None => self.last_token().unwrap_or(open),
        };
        self.spans[index].end = end;
        true
    }

    /// `namespace Name { … }` adds no nesting: its members are parsed as if
    /// they stood in the enclosing scope. The `namespace Name;` form is left
    /// to the caller to skip.
    fn parse_namespace(&mut self, parent: Option<usize>, depth: usize) -> bool {
        self.pos += 1;
        if !self.advance_to_block_open() {
            return false;
        }
        self.pos += 1;

        self.namespaces += 1;
        self.parse_scope(parent, depth, false);
        self.namespaces -= 1;

        if self.peek().is_some_and(|t| t.is_punct("}")) {
            self.pos += 1;
        }
        true
    }

    /// Skip a base-type clause such as `: Base` up to the body's `{`.
    fn advance_to_block_open(&mut self) -> bool {
        while let Some(token) = self.peek() {
            if token.is_punct("{") {
                return true;
            }
            if token.is_punct(";") || token.is_punct("}") {
                return false;
            }
            self.pos += 1;
        }
        false
    }

    fn parse_enum_values(&mut self, parent: usize, depth: usize) {
        while let Some(token) = self.peek() {
            if token.is_punct("}") {
                return;
            }
            if token.is_punct(",") {
                self.pos += 1;
                continue;
            }
            if token.kind != TokenKind::Identifier {
                self.pos += 1;
                continue;
            }
            self.pos += 1;
            let end = self.skip_until_separator(&[","]).unwrap_or(token);
            self.spans.push(DeclarationSpan {
                category: DeclarationCategory::EnumValue,
                name: token,
                start: token,
                end,
                visibility: Visibility::Public,
                depth,
                parent: Some(parent),
                constant: false,
            });
        }
    }

    /// `function name(…) body` and `iter name(…) body`.
    fn parse_callable(&mut self, header: Header<'a>, category: DeclarationCategory) -> bool {
        // `function(` is a lambda
        let Some(name) = self.peek_at(1).filter(|t| t.kind == TokenKind::Identifier) else {
            return false;
        };
        self.pos += 2;
        self.parse_signature_and_body(header, category, name)
    }

    fn parse_constructor(&mut self, header: Header<'a>) -> bool {
        let Some(name) = self.peek() else {
            return false;
        };
        self.pos += 1;
        self.parse_signature_and_body(header, DeclarationCategory::Method, name)
    }

    fn parse_operator(&mut self, header: Header<'a>) -> bool {
        let Some(name) = self.peek_at(1).filter(|t| !t.is_punct("(")) else {
            return false;
        };
        self.pos += 2;
        self.parse_signature_and_body(header, DeclarationCategory::OperatorOverload, name)
    }

    fn parse_signature_and_body(
        &mut self,
        header: Header<'a>,
        category: DeclarationCategory,
        name: Token<'a>,
    ) -> bool {
        if !self.peek().is_some_and(|t| t.is_punct("(")) {
            return false;
        }
        if self.skip_balanced().is_none() {
            return false;
        }
        match self.parse_body() {
            Some(end) => {
                self.push(header, category, name, end);
                true
            }
            None => false,
        }
    }

    /// `get name body` / `set name body`.
    fn parse_property(&mut self, header: Header<'a>) -> bool {
        let Some(name) = self.peek_at(1).filter(|t| t.kind == TokenKind::Identifier) else {
            return false;
        };
        self.pos += 2;
        match self.parse_body() {
            Some(end) => {
                self.push(header, DeclarationCategory::Property, name, end);
                true
            }
            None => false,
        }
    }

    /// A `{ … }` block, an `=> expr;` body or an abstract `;`.
    fn parse_body(&mut self) -> Option<Token<'a>> {
        let token = self.peek()?;
        if token.is_punct("{") {
            return self.skip_balanced();
        }
        if token.is_operator("=>") {
            self.pos += 1;
            let end = self.skip_until_separator(&[])?;
            return self
                .peek()
                .filter(|t| t.is_punct(";"))
                .map(|semi| {
                    self.pos += 1;
                    semi
                })
                .or(Some(end));
        }
        if token.is_punct(";") {
            self.pos += 1;
            return Some(token);
        }
        None
    }

    /// `var a = 1, b;` inside a type body: one field span per declarator.
    fn parse_fields(&mut self, header: Header<'a>) -> bool {
        let constant = self.peek().is_some_and(|t| t.is_keyword("const"));
        self.pos += 1;
        let mut first = true;
        let mut found = false;
        while let Some(name) = self.peek().filter(|t| t.kind == TokenKind::Identifier) {
            self.pos += 1;
            let last = self.skip_until_separator(&[","]).unwrap_or(name);
            let end = match self.peek() {
                Some(semi) if semi.is_punct(";") => semi,
                _ => last,
            };
            let start = if first { header.start } else { name };
            self.spans.push(DeclarationSpan {
                category: DeclarationCategory::Field,
                name,
                start,
                end,
                visibility: header.visibility,
                depth: header.depth,
                parent: header.parent,
                constant,
            });
            first = false;
            found = true;
            match self.peek() {
                Some(t) if t.is_punct(",") => self.pos += 1,
                Some(t) if t.is_punct(";") => {
                    self.pos += 1;
                    break;
                }
                _ => break,
            }
        }
        found
    }

    /// Advance past tokens up to (not including) a `;`, a closing `}` of the
    /// enclosing scope, or one of `extra` at bracket depth zero. Returns the
    /// last token consumed.
    fn skip_until_separator(&mut self, extra: &[&str]) -> Option<Token<'a>> {
        let mut last = None;
        while let Some(token) = self.peek() {
            if token.kind == TokenKind::Punctuation
                && (token.text == ";" || token.text == "}" || extra.contains(&token.text))
            {
                break;
            }
            if token.is_opening_bracket() {
                last = self.skip_balanced();
                if last.is_none() {
                    break;
                }
                continue;
            }
            last = Some(token);
            self.pos += 1;
        }
        last
    }

    /// Consume a bracketed group starting at the current opening bracket,
    /// returning its closing token. Returns `None` at end of input.
    fn skip_balanced(&mut self) -> Option<Token<'a>> {
        let mut depth = 0usize;
        while let Some(token) = self.peek() {
            self.pos += 1;
            if token.is_opening_bracket() {
                depth += 1;
            } else if token.is_closing_bracket() {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(token);
                }
            }
        }
        None
    }

    /// Skip a statement that is not a declaration: up to and including `;`,
    /// or through one brace block, stopping before the scope's closing `}`.
    fn skip_statement(&mut self) {
        while let Some(token) = self.peek() {
            if token.is_punct(";") {
                self.pos += 1;
                break;
            }
            if token.is_punct("}") {
                break;
            }
            if token.is_punct("{") {
                self.skip_balanced();
                break;
            }
            if token.is_opening_bracket() {
                self.skip_balanced();
                continue;
            }
            self.pos += 1;
        }
    }
}

#[cfg(test)]
#[path = "detector_tests.rs"]
mod tests;
