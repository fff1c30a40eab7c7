//! Analyzers that run over lowered Go sources.

pub mod converter;

pub use converter::{ConverterAnalyzer, Verdict};
