use std::error::Error as _;
use std::path::PathBuf;

use super::*;

#[test]
fn error_display_config() {
    let err = OspreyLintError::Config("tab_width must be at least 1".to_string());
    assert_eq!(
        err.to_string(),
        "Configuration error: tab_width must be at least 1"
    );
}

#[test]
fn error_display_file_read() {
    let err = OspreyLintError::FileRead {
        path: PathBuf::from("widget.osp"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
    };
    assert!(err.to_string().contains("widget.osp"));
    assert!(err.source().is_some());
}

#[test]
fn error_display_unknown_rule() {
    let err = OspreyLintError::UnknownRule("no-tabs".to_string());
    assert_eq!(err.to_string(), "Unknown rule: no-tabs");
}

#[test]
fn invalid_pattern_keeps_glob_source() {
    let source = globset::Glob::new("[").unwrap_err();
    let err = OspreyLintError::InvalidPattern {
        pattern: "[".to_string(),
        source,
    };
    assert_eq!(err.to_string(), "Invalid glob pattern: [");
    assert!(err.source().is_some());
}

#[test]
fn toml_errors_convert() {
    let parse: std::result::Result<toml::Value, _> = toml::from_str("a = ");
    let err: OspreyLintError = parse.unwrap_err().into();
    assert!(err.to_string().starts_with("TOML parse error"));
}

#[test]
fn io_errors_convert() {
    let err: OspreyLintError = std::io::Error::other("disk on fire").into();
    assert_eq!(err.to_string(), "IO error: disk on fire");
}
