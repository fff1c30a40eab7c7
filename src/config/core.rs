use serde::{Deserialize, Serialize};

use crate::analyzers::converter::ClassifierConfig;

/// Root configuration structure for fieldleak
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FieldleakConfig {
    /// Which functions and files are analyzed
    #[serde(default)]
    pub analysis: AnalysisSettings,

    /// Converter classification heuristics
    #[serde(default)]
    pub heuristics: HeuristicsConfig,

    /// Ignore patterns
    #[serde(default)]
    pub ignore: IgnoreConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl FieldleakConfig {
    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            include_methods: self.analysis.include_methods,
            name_affinity: self.heuristics.name_affinity,
            container_compatibility: self.heuristics.container_compatibility,
        }
    }

    /// Glob patterns for paths to skip
    pub fn ignore_patterns(&self) -> &[String] {
        &self.ignore.patterns
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AnalysisSettings {
    /// Analyze functions with a receiver
    #[serde(default)]
    pub include_methods: bool,

    /// Analyze `_test.go` files
    #[serde(default)]
    pub include_tests: bool,

    /// Analyze files under `vendor/`
    #[serde(default)]
    pub include_vendor: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeuristicsConfig {
    /// Input and output type names must contain one another
    #[serde(default = "default_true")]
    pub name_affinity: bool,

    /// Collections only convert to the same kind of collection
    #[serde(default = "default_true")]
    pub container_compatibility: bool,
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            name_affinity: true,
            container_compatibility: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct IgnoreConfig {
    #[serde(default)]
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// `terminal` or `json`
    #[serde(default)]
    pub default_format: Option<String>,
    /// Enable colored output (default: auto-detect based on TTY)
    #[serde(default)]
    pub use_color: Option<bool>,
}
