//! `.fieldleak.toml` configuration model and discovery.

mod core;
mod loader;

pub use self::core::{AnalysisSettings, FieldleakConfig, HeuristicsConfig, IgnoreConfig, OutputConfig};
pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_dir,
    parse_and_validate_config, CONFIG_FILE_NAME,
};

/// Contents written by `fieldleak init`; parses to [`FieldleakConfig::default`]
/// apart from the ignore patterns.
pub const DEFAULT_CONFIG_TOML: &str = r#"# Fieldleak Configuration

[analysis]
# Analyze functions with a receiver
include_methods = false
# Analyze *_test.go files
include_tests = false
# Analyze files under vendor/
include_vendor = false

[heuristics]
# Input and output type names must contain one another (case-insensitive)
name_affinity = true
# Slices convert to slices, maps to maps, single records to single records
container_compatibility = true

[ignore]
patterns = [
    "testdata/**",
    "**/*.pb.go",
]

[output]
default_format = "terminal"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_toml_parses() {
        let config = parse_and_validate_config(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(config.analysis, AnalysisSettings::default());
        assert_eq!(config.heuristics, HeuristicsConfig::default());
        assert_eq!(config.ignore.patterns, vec!["testdata/**", "**/*.pb.go"]);
    }
}
