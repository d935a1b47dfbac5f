use std::fs;
use std::path::Path;

use super::*;
use tempfile::TempDir;

struct AcceptAllFilter;

impl FileFilter for AcceptAllFilter {
    fn should_include(&self, _path: &Path) -> bool {
        true
    }
}

struct OspreyOnlyFilter;

impl FileFilter for OspreyOnlyFilter {
    fn should_include(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == "osp")
    }
}

#[test]
fn scanner_finds_files_in_subdirectories() {
    let temp_dir = TempDir::new().unwrap();
    let sub_dir = temp_dir.path().join("src");
    fs::create_dir(&sub_dir).unwrap();
    fs::write(sub_dir.join("main.osp"), "").unwrap();
    fs::write(temp_dir.path().join("top.osp"), "").unwrap();

    let scanner = DirectoryScanner::new(AcceptAllFilter);
    let files = scanner.scan(temp_dir.path()).unwrap();

    assert_eq!(files.len(), 2);
}

#[test]
fn scanner_respects_filter() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("widget.osp"), "").unwrap();
    fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

    let scanner = DirectoryScanner::new(OspreyOnlyFilter);
    let files = scanner.scan(temp_dir.path()).unwrap();

    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("widget.osp"));
}

#[test]
fn scan_results_are_sorted() {
    let temp_dir = TempDir::new().unwrap();
    for name in ["c.osp", "a.osp", "b.osp"] {
        fs::write(temp_dir.path().join(name), "").unwrap();
    }

    let files = DirectoryScanner::new(OspreyOnlyFilter)
        .scan(temp_dir.path())
        .unwrap();

    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.osp", "b.osp", "c.osp"]);
}

#[test]
fn scanning_a_missing_root_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = DirectoryScanner::new(AcceptAllFilter).scan(&temp_dir.path().join("gone"));
    assert!(matches!(result, Err(OspreyLintError::FileRead { .. })));
}

#[test]
fn explicit_files_bypass_the_filter() {
    let temp_dir = TempDir::new().unwrap();
    let script = temp_dir.path().join("build.script");
    fs::write(&script, "").unwrap();

    let files = DirectoryScanner::new(OspreyOnlyFilter)
        .collect(std::slice::from_ref(&script))
        .unwrap();

    assert_eq!(files, vec![script]);
}

#[test]
fn collect_keeps_argument_order_and_drops_duplicates() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("lib");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("a.osp"), "").unwrap();
    let main = temp_dir.path().join("main.osp");
    fs::write(&main, "").unwrap();

    let files = DirectoryScanner::new(OspreyOnlyFilter)
        .collect(&[main.clone(), dir.clone(), main.clone()])
        .unwrap();

    assert_eq!(files, vec![main, dir.join("a.osp")]);
}
