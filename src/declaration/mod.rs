//! Shallow structural pass locating declaration boundaries.
//!
//! Only the rules that look for missing blank lines or wrong naming categories
//! consume these spans, so the detector prefers skipping a block it cannot
//! classify over guessing.

mod detector;

pub use detector::DeclarationDetector;

use serde::Serialize;

use crate::lexer::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DeclarationCategory {
    Type,
    Method,
    Property,
    Field,
    EnumValue,
    OperatorOverload,
    Iterator,
}

impl DeclarationCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Method => "method",
            Self::Property => "property",
            Self::Field => "field",
            Self::EnumValue => "enum value",
            Self::OperatorOverload => "operator overload",
            Self::Iterator => "iterator",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    #[default]
    Private,
}

impl Visibility {
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "public" => Some(Self::Public),
            "protected" => Some(Self::Protected),
            "private" => Some(Self::Private),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        }
    }
}

/// Textual boundary of one declaration.
///
/// `start` is the first modifier (or keyword) of the declaration and `end`
/// its closing `}` or `;`. Spans nest: `parent` is the index of the
/// enclosing type span in the detector output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclarationSpan<'a> {
    pub category: DeclarationCategory,
    pub name: Token<'a>,
    pub start: Token<'a>,
    pub end: Token<'a>,
    pub visibility: Visibility,
    pub depth: usize,
    pub parent: Option<usize>,
    /// Declared with `const` (fields only).
    pub constant: bool,
}

impl DeclarationSpan<'_> {
    #[must_use]
    pub const fn start_line(&self) -> usize {
        self.start.line()
    }

    #[must_use]
    pub const fn end_line(&self) -> usize {
        self.end.end_line()
    }

    /// Name with any leading underscores removed.
    #[must_use]
    pub fn logical_name(&self) -> &str {
        self.name.text.trim_start_matches('_')
    }
}
