//! Configuration semantic validation.
//!
//! Runs after parsing: range checks, glob syntax and rule table contents.

use crate::config::{Config, RuleConfiguration};
use crate::error::{OspreyLintError, Result};

/// Validates semantic correctness of a configuration.
///
/// # Errors
/// Returns an error if a setting is zero, an exclude glob is invalid, or a
/// `[rules]` table names an unknown rule or an impossible severity.
pub fn validate_config_semantics(config: &Config) -> Result<()> {
    validate_settings(config)?;
    validate_glob_patterns(config)?;
    RuleConfiguration::from_config(config)?;
    Ok(())
}

fn validate_settings(config: &Config) -> Result<()> {
    if config.settings.max_line_length == 0 {
        return Err(OspreyLintError::Config(
            "settings.max_line_length must be at least 1".to_string(),
        ));
    }
    if config.settings.tab_width == 0 {
        return Err(OspreyLintError::Config(
            "settings.tab_width must be at least 1".to_string(),
        ));
    }
    if config.scanner.extensions.iter().any(|ext| ext.is_empty()) {
        return Err(OspreyLintError::Config(
            "scanner.extensions must not contain an empty extension".to_string(),
        ));
    }
    Ok(())
}

fn validate_glob_patterns(config: &Config) -> Result<()> {
    for pattern in &config.scanner.exclude {
        globset::Glob::new(pattern).map_err(|e| OspreyLintError::InvalidPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
