mod error;
mod token;
mod tokenizer;

pub use error::LexError;
pub use token::{KEYWORDS, OPERATORS, Position, Span, Token, TokenKind, WhitespaceKind, is_keyword};
pub use tokenizer::{Tokenizer, tokenize};

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
