//! Built-in style rules and the context they run against.
//!
//! A rule is a plain function from a [`LintContext`] to the violations it
//! found. Rules never share state, so the engine may run them in any order.

mod alignment;
mod context;
mod layout;
mod naming;
mod separation;
mod spacing;

pub use context::{LintContext, Line, LineIndex};

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::diagnostic::{Diagnostic, Severity};
use crate::error::OspreyLintError;

/// Stable identifier of a rule, also used as its config key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    MaxLineLength,
    IndentationTabs,
    NoAlignInDeclarations,
    TrailingWhitespace,
    FinalNewline,
    ParenBracketSpacing,
    InfixOperatorSpacing,
    UnaryNotSpacing,
    BlankLineSeparation,
    MultipleBlankLines,
    TypeNameCasing,
    MemberNameCasing,
    BackingFieldUnderscore,
    /// Reported when a file cannot be tokenized. Not configurable.
    LexError,
}

impl RuleId {
    /// Every configurable rule, in registry order.
    pub const ALL: [Self; 13] = [
        Self::MaxLineLength,
        Self::IndentationTabs,
        Self::NoAlignInDeclarations,
        Self::TrailingWhitespace,
        Self::FinalNewline,
        Self::ParenBracketSpacing,
        Self::InfixOperatorSpacing,
        Self::UnaryNotSpacing,
        Self::BlankLineSeparation,
        Self::MultipleBlankLines,
        Self::TypeNameCasing,
        Self::MemberNameCasing,
        Self::BackingFieldUnderscore,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MaxLineLength => "max-line-length",
            Self::IndentationTabs => "indentation-tabs",
            Self::NoAlignInDeclarations => "no-align-in-declarations",
            Self::TrailingWhitespace => "trailing-whitespace",
            Self::FinalNewline => "final-newline",
            Self::ParenBracketSpacing => "paren-bracket-spacing",
            Self::InfixOperatorSpacing => "infix-operator-spacing",
            Self::UnaryNotSpacing => "unary-not-spacing",
            Self::BlankLineSeparation => "blank-line-separation",
            Self::MultipleBlankLines => "multiple-blank-lines",
            Self::TypeNameCasing => "type-name-casing",
            Self::MemberNameCasing => "member-name-casing",
            Self::BackingFieldUnderscore => "backing-field-underscore",
            Self::LexError => "lex-error",
        }
    }

    /// Line length is a soft limit; everything else is an error by default.
    #[must_use]
    pub const fn default_severity(self) -> Severity {
        match self {
            Self::MaxLineLength => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleId {
    type Err = OspreyLintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| OspreyLintError::UnknownRule(s.to_string()))
    }
}

/// What a rule needs computed before it can run. Ordered by cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RuleInput {
    /// Raw lines only.
    Text,
    /// The token stream.
    Tokens,
    /// Tokens plus declaration spans.
    Declarations,
}

/// A violation found by a rule, before the engine stamps id and severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Violation {
    #[must_use]
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn at(token: &crate::lexer::Token<'_>, message: impl Into<String>) -> Self {
        Self::new(token.line(), token.column(), message)
    }

    #[must_use]
    pub fn into_diagnostic(self, rule: RuleId, severity: Severity) -> Diagnostic {
        Diagnostic::new(rule, severity, self.message, self.line, self.column)
    }
}

pub type CheckFn = fn(&LintContext<'_>) -> Vec<Violation>;

/// A single style check.
#[derive(Clone, Copy)]
pub struct Rule {
    pub id: RuleId,
    pub input: RuleInput,
    pub description: &'static str,
    pub check: CheckFn,
}

impl Rule {
    #[must_use]
    pub const fn default_severity(&self) -> Severity {
        self.id.default_severity()
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("input", &self.input)
            .finish_non_exhaustive()
    }
}

/// Ordered mapping from rule id to rule.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: IndexMap<RuleId, Rule>,
}

impl RuleRegistry {
    #[must_use]
    pub fn builtin() -> Self {
        let rules = [
            layout::MAX_LINE_LENGTH,
            layout::INDENTATION_TABS,
            alignment::NO_ALIGN_IN_DECLARATIONS,
            layout::TRAILING_WHITESPACE,
            layout::FINAL_NEWLINE,
            spacing::PAREN_BRACKET_SPACING,
            spacing::INFIX_OPERATOR_SPACING,
            spacing::UNARY_NOT_SPACING,
            separation::BLANK_LINE_SEPARATION,
            layout::MULTIPLE_BLANK_LINES,
            naming::TYPE_NAME_CASING,
            naming::MEMBER_NAME_CASING,
            naming::BACKING_FIELD_UNDERSCORE,
        ];
        Self {
            rules: rules.into_iter().map(|rule| (rule.id, rule)).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}


#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
