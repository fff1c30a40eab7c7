//! Converter leak detection.
//!
//! A function is first classified from its signature alone; only plausible
//! converters have their bodies walked and their field usage checked.

pub mod candidate;
pub mod classifier;
pub mod output_fields;
pub mod usage;
pub mod validator;

pub use candidate::{extract_candidate, Candidate, ContainerKind, RecordShape};
pub use classifier::{
    is_possible_converter, ClassifierConfig, ContainerCompatibility, ConverterClassifier,
    NameAffinity, PairHeuristic,
};
pub use output_fields::collect_output_fields;
pub use usage::{collect_used_fields, collect_used_methods, UsageLookup};
pub use validator::{validate_converter, ConverterValidationResult, ValidationError};

use crate::core::ast::{FuncDecl, SourceFile};
use crate::frontend::TypeInfo;

/// Outcome of analyzing one function declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    NotConverter,
    Valid,
    Leaking(ConverterValidationResult),
    Skipped(ValidationError),
}

pub struct ConverterAnalyzer {
    classifier: ConverterClassifier,
}

impl Default for ConverterAnalyzer {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

impl ConverterAnalyzer {
    pub fn new(config: ClassifierConfig) -> Self {
        Self::with_classifier(ConverterClassifier::new(config))
    }

    pub fn with_classifier(classifier: ConverterClassifier) -> Self {
        Self { classifier }
    }

    pub fn analyze_function(
        &self,
        file: &SourceFile,
        func: &FuncDecl,
        types: &dyn TypeInfo,
    ) -> Verdict {
        let signature = types.signature(file, func);
        if !self
            .classifier
            .is_possible_converter(func, signature.as_ref())
        {
            return Verdict::NotConverter;
        }

        match validate_converter(func, signature.as_ref()) {
            Ok(result) if result.valid => Verdict::Valid,
            Ok(result) => Verdict::Leaking(result),
            Err(err) => Verdict::Skipped(err),
        }
    }

    /// Verdicts for every function of `file`, in declaration order.
    pub fn analyze_file<'f>(
        &self,
        file: &'f SourceFile,
        types: &dyn TypeInfo,
    ) -> Vec<(&'f FuncDecl, Verdict)> {
        file.functions
            .iter()
            .map(|func| (func, self.analyze_function(file, func, types)))
            .collect()
    }
}
