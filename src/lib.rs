// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod frontend;
pub mod io;
pub mod logging;

// Re-export commonly used types
pub use crate::core::{
    AnalysisSummary, CheckReport, FuncDecl, LeakDiagnostic, Position, Signature, SourceFile, Type,
};

pub use crate::analyzers::converter::{
    extract_candidate, is_possible_converter, validate_converter, Candidate, ClassifierConfig,
    ContainerKind, ConverterAnalyzer, ConverterClassifier, ConverterValidationResult,
    PairHeuristic, ValidationError, Verdict,
};

pub use crate::config::FieldleakConfig;

pub use crate::errors::{Error, Result};

pub use crate::frontend::{parse_go_file, PackageIndex, TypeInfo};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
