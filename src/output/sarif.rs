use serde::Serialize;

use crate::diagnostic::{Diagnostic, Severity};
use crate::error::Result;
use crate::linter::Report;
use crate::rules::{RuleId, RuleRegistry};

use super::{OutputFormatter, display_path};

/// SARIF 2.1.0 output formatter for code scanning services.
#[derive(Debug, Default)]
pub struct SarifFormatter;

impl SarifFormatter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";
const TOOL_NAME: &str = "osprey-lint";
const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

const LEX_ERROR_DESCRIPTION: &str = "The file could not be tokenized";

#[derive(Serialize)]
struct SarifLog {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<Run>,
}

#[derive(Serialize)]
struct Run {
    tool: Tool,
    invocations: Vec<Invocation>,
    results: Vec<SarifResult>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Invocation {
    execution_successful: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_execution_notifications: Vec<Notification>,
}

#[derive(Serialize)]
struct Notification {
    level: &'static str,
    message: Message,
}

#[derive(Serialize)]
struct Tool {
    driver: ToolDriver,
}

#[derive(Serialize)]
struct ToolDriver {
    name: &'static str,
    version: &'static str,
    rules: Vec<ReportingDescriptor>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportingDescriptor {
    id: &'static str,
    short_description: MultiformatMessageString,
    default_configuration: ReportingConfiguration,
}

#[derive(Serialize)]
struct ReportingConfiguration {
    level: &'static str,
}

#[derive(Serialize)]
struct MultiformatMessageString {
    text: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: &'static str,
    rule_index: usize,
    level: &'static str,
    message: Message,
    locations: Vec<Location>,
}

#[derive(Serialize)]
struct Message {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    physical_location: PhysicalLocation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PhysicalLocation {
    artifact_location: ArtifactLocation,
    region: Region,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactLocation {
    uri: String,
    uri_base_id: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Region {
    start_line: usize,
    start_column: usize,
}

const fn level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    }
}

impl SarifFormatter {
    /// Every built-in rule followed by `lex-error`.
    fn build_rules() -> Vec<ReportingDescriptor> {
        RuleRegistry::builtin()
            .iter()
            .map(|rule| ReportingDescriptor {
                id: rule.id.as_str(),
                short_description: MultiformatMessageString {
                    text: rule.description,
                },
                default_configuration: ReportingConfiguration {
                    level: level(rule.default_severity()),
                },
            })
            .chain(std::iter::once(ReportingDescriptor {
                id: RuleId::LexError.as_str(),
                short_description: MultiformatMessageString {
                    text: LEX_ERROR_DESCRIPTION,
                },
                default_configuration: ReportingConfiguration { level: "error" },
            }))
            .collect()
    }

    fn rule_index(rules: &[ReportingDescriptor], id: RuleId) -> usize {
        rules
            .iter()
            .position(|descriptor| descriptor.id == id.as_str())
            .unwrap_or(rules.len().saturating_sub(1))
    }

    fn invocation(report: &Report) -> Invocation {
        Invocation {
            execution_successful: report.is_complete(),
            tool_execution_notifications: report
                .skipped
                .iter()
                .map(|path| Notification {
                    level: "error",
                    message: Message {
                        text: format!("{}: could not be read as UTF-8 text", display_path(path)),
                    },
                })
                .collect(),
        }
    }

    fn convert(rules: &[ReportingDescriptor], uri: &str, diagnostic: &Diagnostic) -> SarifResult {
        SarifResult {
            rule_id: diagnostic.rule.as_str(),
            rule_index: Self::rule_index(rules, diagnostic.rule),
            level: level(diagnostic.severity),
            message: Message {
                text: diagnostic.message.clone(),
            },
            locations: vec![Location {
                physical_location: PhysicalLocation {
                    artifact_location: ArtifactLocation {
                        uri: uri.to_string(),
                        uri_base_id: "%SRCROOT%",
                    },
                    region: Region {
                        start_line: diagnostic.line,
                        start_column: diagnostic.column,
                    },
                },
            }],
        }
    }
}

impl OutputFormatter for SarifFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let rules = Self::build_rules();
        let results = report
            .files
            .iter()
            .flat_map(|file| {
                let uri = display_path(&file.path);
                file.diagnostics
                    .iter()
                    .map(|d| Self::convert(&rules, &uri, d))
                    .collect::<Vec<_>>()
            })
            .collect();

        let log = SarifLog {
            schema: SARIF_SCHEMA,
            version: SARIF_VERSION,
            runs: vec![Run {
                tool: Tool {
                    driver: ToolDriver {
                        name: TOOL_NAME,
                        version: TOOL_VERSION,
                        rules,
                    },
                },
                invocations: vec![Self::invocation(report)],
                results,
            }],
        };

        Ok(serde_json::to_string_pretty(&log)?)
    }
}

#[cfg(test)]
#[path = "sarif_tests.rs"]
mod tests;
