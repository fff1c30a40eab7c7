use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::FieldleakConfig;
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".fieldleak.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse config from a TOML string and check the ignore patterns compile
pub fn parse_and_validate_config(contents: &str) -> std::result::Result<FieldleakConfig, String> {
    let config = toml::from_str::<FieldleakConfig>(contents)
        .map_err(|e| format!("Failed to parse {CONFIG_FILE_NAME}: {e}"))?;

    for pattern in config.ignore_patterns() {
        glob::Pattern::new(pattern)
            .map_err(|e| format!("Invalid ignore pattern {pattern:?}: {e}"))?;
    }

    if let Some(format) = &config.output.default_format {
        if !matches!(format.as_str(), "terminal" | "json") {
            return Err(format!(
                "Unknown output.default_format {format:?} (expected \"terminal\" or \"json\")"
            ));
        }
    }

    Ok(config)
}

pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<FieldleakConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Only actual failures are logged, not a missing file
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// `start` and its parents, nearest first, at most `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find `.fieldleak.toml` in `start` or one of its ancestors
pub fn load_config_from_dir(start: &Path) -> FieldleakConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            FieldleakConfig::default()
        })
}

pub fn load_config() -> FieldleakConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from_dir(&dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            FieldleakConfig::default()
        }
    }
}

/// Load an explicitly requested config file; unlike discovery, failures are errors
pub fn load_config_from(path: &Path) -> Result<FieldleakConfig> {
    let contents = read_config_file(path)
        .map_err(|e| Error::file_system("Failed to read config file", path, e))?;
    parse_and_validate_config(&contents).map_err(Error::Configuration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = parse_and_validate_config(indoc! {r#"
            [analysis]
            include_methods = true

            [heuristics]
            name_affinity = false

            [ignore]
            patterns = ["testdata/**", "**/generated/*.go"]

            [output]
            default_format = "json"
        "#})
        .unwrap();

        assert!(config.analysis.include_methods);
        assert!(!config.analysis.include_tests);
        assert!(!config.heuristics.name_affinity);
        assert!(config.heuristics.container_compatibility);
        assert_eq!(config.ignore.patterns.len(), 2);
        assert_eq!(config.output.default_format.as_deref(), Some("json"));

        let classifier = config.classifier_config();
        assert!(classifier.include_methods);
        assert!(!classifier.name_affinity);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(
            parse_and_validate_config("").unwrap(),
            FieldleakConfig::default()
        );
        assert!(FieldleakConfig::default().heuristics.name_affinity);
    }

    #[test]
    fn test_invalid_configs_are_rejected() {
        let err = parse_and_validate_config("[analysis]\ninclude_methods = \"yes\"\n").unwrap_err();
        assert!(err.contains(".fieldleak.toml"), "unexpected error: {err}");

        let err = parse_and_validate_config("[ignore]\npatterns = [\"a/[\"]\n").unwrap_err();
        assert!(err.contains("Invalid ignore pattern"), "unexpected error: {err}");

        let err = parse_and_validate_config("[output]\ndefault_format = \"xml\"\n").unwrap_err();
        assert!(err.contains("default_format"), "unexpected error: {err}");
    }

    #[test]
    fn test_directory_ancestors_limit() {
        let dirs: Vec<PathBuf> = directory_ancestors(PathBuf::from("/a/b/c"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c"), PathBuf::from("/a/b")]);
    }

    #[test]
    fn test_load_config_from_parent_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[analysis]\ninclude_vendor = true\n",
        )
        .unwrap();
        let nested = temp.path().join("pkg").join("model");
        fs::create_dir_all(&nested).unwrap();

        let config = load_config_from_dir(&nested);
        assert!(config.analysis.include_vendor);
    }

    #[test]
    fn test_malformed_discovered_config_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "not toml [").unwrap();
        assert_eq!(load_config_from_dir(temp.path()), FieldleakConfig::default());
    }

    #[test]
    fn test_explicit_config_errors_propagate() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.toml");
        assert!(matches!(
            load_config_from(&missing),
            Err(Error::FileSystem { .. })
        ));

        let bad = temp.path().join("bad.toml");
        fs::write(&bad, "[heuristics]\nname_affinity = 3\n").unwrap();
        assert!(matches!(load_config_from(&bad), Err(Error::Configuration(_))));
    }
}
