#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the osprey-lint binary.
#[macro_export]
macro_rules! osprey_lint {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("osprey-lint"))
    };
}

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `.osprey-lint.toml` at the fixture root.
    pub fn create_config(&self, content: &str) -> PathBuf {
        self.create_file(".osprey-lint.toml", content)
    }

    pub fn read(&self, relative_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative_path)).expect("Failed to read file")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Source that passes every rule.
pub const CLEAN_SOURCE: &str = include_str!("../fixtures/clean.osp");

/// One type-name-casing error on line 1, column 7.
pub const BAD_CLASS_NAME: &str = "class widget {\n}\n";

/// One max-line-length warning and nothing else.
pub fn long_line_source(width: usize) -> String {
    format!("// {}\n", "x".repeat(width - 3))
}

/// Downgrades type-name-casing to a warning.
pub const WARNING_CONFIG: &str = r#"
[rules.type-name-casing]
severity = "warning"
"#;
