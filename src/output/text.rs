use std::fmt::Write;

use crate::diagnostic::{Diagnostic, Severity};
use crate::error::Result;
use crate::linter::Report;

use super::{OutputFormatter, display_path};

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    Always,
    Never,
}

mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// One line per diagnostic followed by a summary line.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if std::env::var_os("NO_COLOR").is_some() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    fn format_diagnostic(&self, path: &str, diagnostic: &Diagnostic, output: &mut String) {
        let color = match diagnostic.severity {
            Severity::Error => ansi::RED,
            Severity::Warning => ansi::YELLOW,
        };
        let severity = self.colorize(diagnostic.severity.as_str(), color);
        let _ = writeln!(
            output,
            "{path}:{}:{}: {severity}: {} [{}]",
            diagnostic.line, diagnostic.column, diagnostic.message, diagnostic.rule
        );
    }

    fn format_summary(&self, report: &Report) -> String {
        let errors = report.error_count();
        let warnings = report.warning_count();
        let files = report.files.len();
        let mut summary = format!(
            "{}, {} in {}",
            plural(errors, "error"),
            plural(warnings, "warning"),
            plural(files, "file")
        );
        if !report.is_complete() {
            let _ = write!(
                summary,
                ", {} skipped",
                plural(report.skipped.len(), "unreadable file")
            );
        }
        if errors > 0 || !report.is_complete() {
            self.colorize(&summary, ansi::BOLD)
        } else {
            summary
        }
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let mut output = String::new();
        for file in &report.files {
            let path = display_path(&file.path);
            for diagnostic in &file.diagnostics {
                self.format_diagnostic(&path, diagnostic, &mut output);
            }
        }
        for path in &report.skipped {
            let label = self.colorize("skipped", ansi::RED);
            let _ = writeln!(
                output,
                "{}: {label}: could not be read as UTF-8 text",
                display_path(path)
            );
        }
        let _ = writeln!(output, "{}", self.format_summary(report));
        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
