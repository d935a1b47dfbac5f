use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::diagnostic::Severity;
use crate::error::{OspreyLintError, Result};
use crate::rules::RuleId;

/// On-disk configuration, as parsed from `.osprey-lint.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub scanner: ScannerConfig,

    #[serde(default)]
    pub settings: LintSettings,

    /// Per-rule overrides keyed by rule id (`[rules.trailing-whitespace]`).
    ///
    /// Keys stay strings here so that an unknown id can be reported by name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub rules: IndexMap<String, RuleConfig>,
}

/// Which files a directory scan picks up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScannerConfig {
    /// File extensions to lint, without the leading dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns of files and directories to skip.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            exclude: Vec::new(),
        }
    }
}

/// Numeric knobs shared by every rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LintSettings {
    /// Soft limit in display columns.
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,

    /// Columns a tab advances to when measuring line length.
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,
}

impl Default for LintSettings {
    fn default() -> Self {
        Self {
            max_line_length: default_max_line_length(),
            tab_width: default_tab_width(),
        }
    }
}

/// `[rules.<id>]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Overrides the rule's default severity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: None,
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["osp".to_string()]
}

const fn default_max_line_length() -> usize {
    120
}

const fn default_tab_width() -> usize {
    4
}

const fn default_true() -> bool {
    true
}

/// Resolved state of one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSetting {
    pub enabled: bool,
    pub severity: Severity,
}

/// Immutable per-run view of which rules run and how loudly.
///
/// Built once from a [`Config`] and handed to the linter, which never
/// consults anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConfiguration {
    settings: IndexMap<RuleId, RuleSetting>,
}

impl Default for RuleConfiguration {
    fn default() -> Self {
        Self::defaults()
    }
}

impl RuleConfiguration {
    /// Every rule enabled at its default severity.
    #[must_use]
    pub fn defaults() -> Self {
        let settings = RuleId::ALL
            .into_iter()
            .map(|id| {
                (
                    id,
                    RuleSetting {
                        enabled: true,
                        severity: id.default_severity(),
                    },
                )
            })
            .collect();
        Self { settings }
    }

    /// Apply the `[rules]` tables of a config on top of the defaults.
    ///
    /// # Errors
    /// Returns an error for an unknown rule id or when `max-line-length` is
    /// raised to `error`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut resolved = Self::defaults();
        for (name, rule) in &config.rules {
            let id: RuleId = name.parse()?;
            if id == RuleId::MaxLineLength && rule.severity == Some(Severity::Error) {
                return Err(OspreyLintError::Config(format!(
                    "rules.{id}.severity cannot be 'error'; line length is a soft limit"
                )));
            }
            if let Some(setting) = resolved.settings.get_mut(&id) {
                setting.enabled = rule.enabled;
                if let Some(severity) = rule.severity {
                    setting.severity = severity;
                }
            }
        }
        Ok(resolved)
    }

    pub fn disable(&mut self, id: RuleId) {
        if let Some(setting) = self.settings.get_mut(&id) {
            setting.enabled = false;
        }
    }

    #[must_use]
    pub fn setting(&self, id: RuleId) -> Option<RuleSetting> {
        self.settings.get(&id).copied()
    }

    #[must_use]
    pub fn is_enabled(&self, id: RuleId) -> bool {
        self.setting(id).is_some_and(|s| s.enabled)
    }

    /// Enabled rules with their effective severity, in registry order.
    pub fn enabled(&self) -> impl Iterator<Item = (RuleId, Severity)> + '_ {
        self.settings
            .iter()
            .filter(|(_, s)| s.enabled)
            .map(|(id, s)| (*id, s.severity))
    }

    pub fn iter(&self) -> impl Iterator<Item = (RuleId, RuleSetting)> + '_ {
        self.settings.iter().map(|(id, s)| (*id, *s))
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
