// Test utility module for fieldleak integration tests
#![allow(dead_code)]

use fieldleak::commands::{check_sources, discover_files, load_sources};
use fieldleak::{CheckReport, FieldleakConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The on-disk Go fixture tree shipped with the tests.
pub fn converters_fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/converters")
}

/// Discover, parse and check `root` the way the `check` command does.
pub fn check_dir(root: &Path, settings: &FieldleakConfig) -> CheckReport {
    let files = discover_files(&[root.to_path_buf()], settings).expect("Failed to discover files");
    let targets = load_sources(&files.targets);
    let dependencies = load_sources(&files.dependencies);
    check_sources(&targets, &dependencies, settings.classifier_config())
}

/// Temporary Go module tree built from `(relative path, source)` pairs.
pub fn go_tree(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    for (relative, source) in files {
        let path = temp_dir.path().join(relative);
        fs::create_dir_all(path.parent().expect("fixture path has a parent"))
            .expect("Failed to create fixture dir");
        fs::write(&path, source).expect("Failed to write fixture file");
    }
    temp_dir
}

/// Diagnostic file paths relative to `root`, with forward slashes.
pub fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
