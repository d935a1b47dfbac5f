use serde::Serialize;

use crate::diagnostic::Diagnostic;
use crate::error::Result;
use crate::linter::Report;

use super::{OutputFormatter, display_path};

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: Summary,
    files: Vec<FileResult<'a>>,
    skipped: Vec<String>,
}

#[derive(Serialize)]
struct Summary {
    files: usize,
    errors: usize,
    warnings: usize,
    skipped: usize,
}

#[derive(Serialize)]
struct FileResult<'a> {
    path: String,
    diagnostics: &'a [Diagnostic],
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let output = JsonOutput {
            summary: Summary {
                files: report.files.len(),
                errors: report.error_count(),
                warnings: report.warning_count(),
                skipped: report.skipped.len(),
            },
            files: report
                .files
                .iter()
                .map(|file| FileResult {
                    path: display_path(&file.path),
                    diagnostics: &file.diagnostics,
                })
                .collect(),
            skipped: report.skipped.iter().map(|p| display_path(p)).collect(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
