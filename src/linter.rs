//! Per-file pipeline: tokenize, detect declarations, run rules, sort.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::config::{LintSettings, RuleConfiguration};
use crate::declaration::DeclarationDetector;
use crate::diagnostic::{Diagnostic, Severity};
use crate::error::{OspreyLintError, Result};
use crate::lexer::tokenize;
use crate::rules::{LintContext, Rule, RuleInput, RuleRegistry};

/// Runs the enabled rules over source text.
///
/// Holds only immutable state, so one `Linter` is shared by every worker of
/// a parallel run.
#[derive(Debug, Clone)]
pub struct Linter {
    rules: Vec<(Rule, Severity)>,
    settings: LintSettings,
}

impl Default for Linter {
    fn default() -> Self {
        Self::new(&RuleConfiguration::defaults(), LintSettings::default())
    }
}

impl Linter {
    #[must_use]
    pub fn new(configuration: &RuleConfiguration, settings: LintSettings) -> Self {
        let registry = RuleRegistry::builtin();
        let rules = configuration
            .enabled()
            .filter_map(|(id, severity)| registry.get(id).map(|rule| (*rule, severity)))
            .collect();
        Self { rules, settings }
    }

    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Lint one file's text. Diagnostics come back sorted.
    ///
    /// A file that cannot be tokenized yields a single `lex-error`
    /// diagnostic and no rule output.
    #[must_use]
    pub fn lint_source(&self, source: &str) -> Vec<Diagnostic> {
        let Some(needed) = self.rules.iter().map(|(rule, _)| rule.input).max() else {
            return Vec::new();
        };

        let mut diagnostics = if needed == RuleInput::Text {
            self.run_rules(&LintContext::text_only(source, &self.settings))
        } else {
            let tokens = match tokenize(source) {
                Ok(tokens) => tokens,
                Err(error) => {
                    tracing::debug!(%error, "tokenizing failed");
                    return vec![Diagnostic::from(&error)];
                }
            };
            let spans = if needed == RuleInput::Declarations {
                DeclarationDetector::new(&tokens).detect()
            } else {
                Vec::new()
            };
            self.run_rules(&LintContext::new(source, &tokens, &spans, &self.settings))
        };

        diagnostics.sort();
        diagnostics
    }

    fn run_rules(&self, ctx: &LintContext<'_>) -> Vec<Diagnostic> {
        self.rules
            .iter()
            .flat_map(|(rule, severity)| {
                (rule.check)(ctx)
                    .into_iter()
                    .map(move |violation| violation.into_diagnostic(rule.id, *severity))
            })
            .collect()
    }

    /// # Errors
    /// Returns an error if the file cannot be read as UTF-8 text.
    pub fn lint_file(&self, path: &Path) -> Result<FileReport> {
        let source = std::fs::read_to_string(path).map_err(|source| OspreyLintError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let diagnostics = self.lint_source(&source);
        tracing::debug!(
            path = %path.display(),
            diagnostics = diagnostics.len(),
            "linted file"
        );
        Ok(FileReport {
            path: path.to_path_buf(),
            diagnostics,
        })
    }

    /// Lint files in parallel. The report keeps the input order.
    #[must_use]
    pub fn lint_files(&self, paths: &[PathBuf]) -> Report {
        self.lint_files_with(paths, |_| {})
    }

    /// Like [`lint_files`](Self::lint_files), calling `on_file` after each
    /// file (from whichever worker processed it).
    ///
    /// Unreadable files are logged and listed in [`Report::skipped`].
    #[must_use]
    pub fn lint_files_with<F>(&self, paths: &[PathBuf], on_file: F) -> Report
    where
        F: Fn(&Path) + Sync,
    {
        let outcomes: Vec<_> = paths
            .par_iter()
            .map(|path| {
                let outcome = self.lint_file(path);
                on_file(path);
                outcome
            })
            .collect();

        let mut report = Report::default();
        for (path, outcome) in paths.iter().zip(outcomes) {
            match outcome {
                Ok(file) => report.files.push(file),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping file");
                    report.skipped.push(path.clone());
                }
            }
        }
        report
    }
}

/// Diagnostics for one file, sorted by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    Clean,
    ViolationsFound,
}

/// Outcome of a multi-file run, files in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub files: Vec<FileReport>,
    /// Files that could not be read as UTF-8 text.
    pub skipped: Vec<PathBuf>,
}

impl Report {
    #[must_use]
    pub fn status(&self) -> ReportStatus {
        if self.files.iter().all(FileReport::is_clean) {
            ReportStatus::Clean
        } else {
            ReportStatus::ViolationsFound
        }
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.files.iter().map(FileReport::error_count).sum()
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.files.iter().map(FileReport::warning_count).sum()
    }

    /// Warnings alone never fail a run.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Every collected file was read and linted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = (&Path, &Diagnostic)> {
        self.files
            .iter()
            .flat_map(|file| file.diagnostics.iter().map(|d| (file.path.as_path(), d)))
    }
}

#[cfg(test)]
#[path = "linter_tests.rs"]
mod tests;
