pub mod cli;
pub mod config;
pub mod declaration;
pub mod diagnostic;
pub mod error;
pub mod lexer;
pub mod linter;
pub mod output;
pub mod rules;
pub mod scanner;

pub use diagnostic::{Diagnostic, Severity};
pub use error::{OspreyLintError, Result};
pub use linter::{Linter, Report};
pub use rules::RuleId;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_VIOLATIONS: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
