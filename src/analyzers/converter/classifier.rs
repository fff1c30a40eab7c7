//! Signature-level pre-filter deciding which functions look like converters.
//!
//! The pairing rules are heuristics over declared type names and container
//! kinds. Each one is a [`PairHeuristic`] so callers can switch rules off or
//! add their own.

use super::candidate::{extract_candidate, Candidate, ContainerKind};
use crate::core::ast::FuncDecl;
use crate::core::types::Signature;

/// A rule an (input, output) candidate pair must satisfy.
pub trait PairHeuristic {
    fn name(&self) -> &'static str;
    fn matches(&self, input: &Candidate, output: &Candidate) -> bool;
}

/// Collections map to the same collection kind; single records map to
/// single records.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerCompatibility;

impl PairHeuristic for ContainerCompatibility {
    fn name(&self) -> &'static str {
        "container_compatibility"
    }

    fn matches(&self, input: &Candidate, output: &Candidate) -> bool {
        match input.container {
            ContainerKind::Slice | ContainerKind::Map => input.container == output.container,
            ContainerKind::None | ContainerKind::Pointer => !output.container.is_collection(),
        }
    }
}

/// One type name contains the other, ignoring case.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameAffinity;

impl PairHeuristic for NameAffinity {
    fn name(&self) -> &'static str {
        "name_affinity"
    }

    fn matches(&self, input: &Candidate, output: &Candidate) -> bool {
        names_related(&input.name, &output.name)
    }
}

pub fn names_related(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

/// Explicit classifier settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Analyze functions with a receiver too.
    pub include_methods: bool,
    pub name_affinity: bool,
    pub container_compatibility: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            include_methods: false,
            name_affinity: true,
            container_compatibility: true,
        }
    }
}

pub struct ConverterClassifier {
    include_methods: bool,
    heuristics: Vec<Box<dyn PairHeuristic>>,
}

impl Default for ConverterClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

impl ConverterClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        let mut heuristics: Vec<Box<dyn PairHeuristic>> = Vec::new();
        if config.container_compatibility {
            heuristics.push(Box::new(ContainerCompatibility));
        }
        if config.name_affinity {
            heuristics.push(Box::new(NameAffinity));
        }
        Self {
            include_methods: config.include_methods,
            heuristics,
        }
    }

    /// Add a rule every accepted pair must also satisfy.
    pub fn with_heuristic(mut self, heuristic: impl PairHeuristic + 'static) -> Self {
        self.heuristics.push(Box::new(heuristic));
        self
    }

    pub fn heuristic_names(&self) -> Vec<&'static str> {
        self.heuristics.iter().map(|h| h.name()).collect()
    }

    /// Whether `func` is worth validating.
    ///
    /// A missing signature is a rejection, as are methods unless enabled.
    pub fn is_possible_converter(&self, func: &FuncDecl, signature: Option<&Signature>) -> bool {
        if func.is_method() && !self.include_methods {
            return false;
        }
        let Some(signature) = signature else {
            return false;
        };
        if signature.params.is_empty() || signature.results.is_empty() {
            return false;
        }

        let inputs: Vec<Candidate> = signature
            .params
            .iter()
            .filter_map(|var| extract_candidate(&var.ty))
            .collect();
        if inputs.is_empty() {
            return false;
        }
        let outputs: Vec<Candidate> = signature
            .results
            .iter()
            .filter_map(|var| extract_candidate(&var.ty))
            .collect();
        if outputs.is_empty() {
            return false;
        }

        inputs.iter().any(|input| {
            outputs.iter().any(|output| {
                self.heuristics
                    .iter()
                    .all(|heuristic| heuristic.matches(input, output))
            })
        })
    }
}

/// Classify with the given settings and the default heuristics.
pub fn is_possible_converter(
    func: &FuncDecl,
    signature: Option<&Signature>,
    config: ClassifierConfig,
) -> bool {
    ConverterClassifier::new(config).is_possible_converter(func, signature)
}
