use crate::errors::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Discovers Go source files under a root, honoring `.gitignore`.
pub struct FileWalker {
    root: PathBuf,
    ignore_patterns: Vec<glob::Pattern>,
    include_tests: bool,
    include_vendor: bool,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ignore_patterns: vec![],
            include_tests: false,
            include_vendor: false,
        }
    }

    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Result<Self> {
        self.ignore_patterns = patterns
            .iter()
            .map(|pattern| glob::Pattern::new(pattern))
            .collect::<std::result::Result<_, _>>()?;
        Ok(self)
    }

    pub fn include_tests(mut self, include: bool) -> Self {
        self.include_tests = include;
        self
    }

    pub fn include_vendor(mut self, include: bool) -> Self {
        self.include_vendor = include;
        self
    }

    /// Matching files, sorted by path. A root that is itself a file is
    /// returned as-is when it passes the filters.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .sort_by_file_path(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && self.should_process(path) {
                files.push(path.to_path_buf());
            } else if path.is_file() {
                log::trace!("skipping {}", path.display());
            }
        }

        files.sort();
        Ok(files)
    }

    fn should_process(&self, path: &Path) -> bool {
        if path.extension().and_then(|ext| ext.to_str()) != Some("go") {
            return false;
        }
        if !self.include_tests && is_test_file(path) {
            return false;
        }
        if !self.include_vendor && is_vendored(path) {
            return false;
        }

        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        !self
            .ignore_patterns
            .iter()
            .any(|pattern| pattern.matches_path(path) || pattern.matches_path(relative))
    }
}

pub fn is_test_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with("_test.go"))
}

/// Any `vendor` directory segment, matching Go's vendoring layout.
pub fn is_vendored(path: &Path) -> bool {
    path.parent()
        .is_some_and(|dir| dir.components().any(|c| c.as_os_str() == "vendor"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "package x\n").unwrap();
    }

    fn relative(root: &Path, files: Vec<PathBuf>) -> Vec<String> {
        files
            .into_iter()
            .map(|f| {
                f.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    fn fixture() -> TempDir {
        let temp = TempDir::new().unwrap();
        for file in [
            "model/order.go",
            "model/order_test.go",
            "convert/b.go",
            "convert/a.go",
            "vendor/github.com/acme/lib/lib.go",
            "testdata/sample.go",
            "README.md",
        ] {
            touch(temp.path(), file);
        }
        temp
    }

    #[test]
    fn test_walk_skips_tests_vendor_and_non_go() {
        let temp = fixture();
        let files = FileWalker::new(temp.path().to_path_buf()).walk().unwrap();
        assert_eq!(
            relative(temp.path(), files),
            vec![
                "convert/a.go",
                "convert/b.go",
                "model/order.go",
                "testdata/sample.go"
            ]
        );
    }

    #[test]
    fn test_walk_with_includes_and_ignores() {
        let temp = fixture();
        let files = FileWalker::new(temp.path().to_path_buf())
            .include_tests(true)
            .include_vendor(true)
            .with_ignore_patterns(&["testdata/**".to_string()])
            .unwrap()
            .walk()
            .unwrap();
        assert_eq!(
            relative(temp.path(), files),
            vec![
                "convert/a.go",
                "convert/b.go",
                "model/order.go",
                "model/order_test.go",
                "vendor/github.com/acme/lib/lib.go",
            ]
        );
    }

    #[test]
    fn test_single_file_root() {
        let temp = fixture();
        let file = temp.path().join("model/order.go");
        assert_eq!(FileWalker::new(file.clone()).walk().unwrap(), vec![file]);
    }

    #[test]
    fn test_invalid_ignore_pattern() {
        assert!(FileWalker::new(PathBuf::from("."))
            .with_ignore_patterns(&["[".to_string()])
            .is_err());
    }

    #[test]
    fn test_path_predicates() {
        assert!(is_test_file(Path::new("pkg/convert_test.go")));
        assert!(!is_test_file(Path::new("pkg/testing.go")));
        assert!(is_vendored(Path::new("root/vendor/x/y.go")));
        assert!(!is_vendored(Path::new("root/vendors/y.go")));
        assert!(!is_vendored(Path::new("vendor.go")));
    }
}
