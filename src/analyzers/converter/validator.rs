//! Validation of a converter: every exported input field read, every
//! exported output field written.

use super::candidate::{extract_candidate, Candidate, RecordShape};
use super::output_fields::collect_output_fields;
use super::usage::{collect_used_fields, collect_used_methods, UsageLookup};
use crate::core::ast::{FieldList, FuncDecl};
use crate::core::types::{Signature, Var};
use serde::Serialize;
use thiserror::Error;

/// Verdict for one converter function.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ConverterValidationResult {
    /// Every exported field on both sides is used.
    pub valid: bool,
    /// Input fields never read, qualified as `var.Field`.
    pub missing_input_fields: Vec<String>,
    /// Output fields never written, qualified when the result is named.
    pub missing_output_fields: Vec<String>,
}

impl ConverterValidationResult {
    pub fn message(&self) -> String {
        format!(
            "converter function is leaking fields: missing input fields: [{}]; missing output fields: [{}]",
            self.missing_input_fields.join(", "),
            self.missing_output_fields.join(", ")
        )
    }
}

/// A classified converter whose input or output could not be pinned down.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("cannot get type info for function {0:?}")]
    MissingSignature(String),

    #[error("function {0:?} must have at least one parameter and one result")]
    TooFewPositions(String),

    #[error("cannot determine candidate input parameter for function {0:?}")]
    NoInputCandidate(String),

    #[error("cannot determine candidate output parameter for function {0:?}")]
    NoOutputCandidate(String),

    #[error("function {0:?} has no body")]
    MissingBody(String),
}

/// First position of `fields` whose resolved type is a candidate, with the
/// name declared for that position.
///
/// `vars` holds one entry per position; a field declaring `a, b T` covers
/// two consecutive entries.
pub fn find_candidate_param(fields: &FieldList, vars: &[Var]) -> Option<(Candidate, Option<String>)> {
    let mut index = 0;
    for field in &fields.fields {
        for position in 0..field.arity() {
            let var = vars.get(index)?;
            if let Some(candidate) = extract_candidate(&var.ty) {
                return Some((candidate, field.names.get(position).cloned()));
            }
            index += 1;
        }
    }
    None
}

/// Exported fields of `shape` missing from `used`.
///
/// With `getters`, a field `F` also counts as used when `GetF` was called.
pub fn collect_missing_fields(
    shape: &RecordShape,
    used: &UsageLookup,
    getters: Option<&UsageLookup>,
) -> Vec<String> {
    shape
        .fields
        .iter()
        .filter(|field| !used.look_up(field))
        .filter(|field| !getters.is_some_and(|methods| methods.look_up(&format!("Get{field}"))))
        .cloned()
        .collect()
}

fn qualify(var: &str, fields: Vec<String>) -> Vec<String> {
    if var.is_empty() {
        return fields;
    }
    fields
        .into_iter()
        .map(|field| format!("{var}.{field}"))
        .collect()
}

/// Validate a function that already passed classification.
pub fn validate_converter(
    func: &FuncDecl,
    signature: Option<&Signature>,
) -> Result<ConverterValidationResult, ValidationError> {
    let name = || func.name.clone();

    let signature = signature.ok_or_else(|| ValidationError::MissingSignature(name()))?;
    if signature.params.is_empty() || signature.results.is_empty() {
        return Err(ValidationError::TooFewPositions(name()));
    }

    let (input, in_var) = match find_candidate_param(&func.params, &signature.params) {
        Some((candidate, Some(var))) => (candidate, var),
        _ => return Err(ValidationError::NoInputCandidate(name())),
    };
    let (output, out_var) = find_candidate_param(&func.results, &signature.results)
        .ok_or_else(|| ValidationError::NoOutputCandidate(name()))?;
    let out_var = out_var.unwrap_or_default();

    let body = func
        .body
        .as_ref()
        .ok_or_else(|| ValidationError::MissingBody(name()))?;

    let fields_read = collect_used_fields(body, &in_var);
    let methods_called = collect_used_methods(body, &in_var);
    let missing_input_fields = qualify(
        &in_var,
        collect_missing_fields(&input.shape, &fields_read, Some(&methods_called)),
    );

    let fields_written = collect_output_fields(func, &out_var, &output.name);
    let missing_output_fields = qualify(
        &out_var,
        collect_missing_fields(&output.shape, &fields_written, None),
    );

    Ok(ConverterValidationResult {
        valid: missing_input_fields.is_empty() && missing_output_fields.is_empty(),
        missing_input_fields,
        missing_output_fields,
    })
}
