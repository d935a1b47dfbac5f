use thiserror::Error;

/// Malformed input that prevents tokenizing a file.
///
/// The reported position is where the unterminated construct starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated string literal starting at {line}:{column}")]
    UnterminatedString { line: usize, column: usize },

    #[error("unterminated block comment starting at {line}:{column}")]
    UnterminatedComment { line: usize, column: usize },
}

impl LexError {
    /// Line and column of the construct that was left open.
    #[must_use]
    pub const fn position(&self) -> (usize, usize) {
        match self {
            Self::UnterminatedString { line, column }
            | Self::UnterminatedComment { line, column } => (*line, *column),
        }
    }
}
