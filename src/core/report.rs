//! Results of a check run, as handed to the output writers.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// One leaking converter function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeakDiagnostic {
    pub file: PathBuf,
    pub function: String,
    pub line: usize,
    pub column: usize,
    /// Declaration text up to the body, for display.
    pub signature: String,
    pub missing_input_fields: Vec<String>,
    pub missing_output_fields: Vec<String>,
    pub message: String,
}

/// End-of-run counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AnalysisSummary {
    pub files_analyzed: usize,
    pub files_with_warnings: usize,
    pub warnings: usize,
}

impl AnalysisSummary {
    pub fn has_warnings(&self) -> bool {
        self.warnings > 0
    }
}

impl fmt::Display for AnalysisSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_warnings() {
            write!(
                f,
                "Files total analyzed: {}. Warnings: {} caught in {} files",
                self.files_analyzed, self.warnings, self.files_with_warnings
            )
        } else {
            write!(f, "Files total analyzed: {}. Warnings: 0", self.files_analyzed)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CheckReport {
    pub diagnostics: Vec<LeakDiagnostic>,
    pub summary: AnalysisSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_text() {
        let clean = AnalysisSummary {
            files_analyzed: 3,
            ..AnalysisSummary::default()
        };
        assert_eq!(clean.to_string(), "Files total analyzed: 3. Warnings: 0");

        let warned = AnalysisSummary {
            files_analyzed: 3,
            files_with_warnings: 1,
            warnings: 2,
        };
        assert_eq!(
            warned.to_string(),
            "Files total analyzed: 3. Warnings: 2 caught in 1 files"
        );
    }
}
