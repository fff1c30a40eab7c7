//! Recognition of record-shaped parameter and result types.

use crate::core::types::{StructType, Type};
use serde::Serialize;
use std::fmt;

/// Wrapping structure around a candidate's record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    /// Plain record value.
    None,
    Pointer,
    /// Slice or array.
    Slice,
    /// Map; only the value type matters.
    Map,
}

impl ContainerKind {
    pub fn is_collection(self) -> bool {
        matches!(self, ContainerKind::Slice | ContainerKind::Map)
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContainerKind::None => "none",
            ContainerKind::Pointer => "pointer",
            ContainerKind::Slice => "slice",
            ContainerKind::Map => "map",
        };
        f.write_str(name)
    }
}

/// Exported field names of a record, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RecordShape {
    pub fields: Vec<String>,
}

impl RecordShape {
    pub fn of(st: &StructType) -> Self {
        Self {
            fields: st.exported_field_names(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// Declared name of the record type.
    pub name: String,
    pub container: ContainerKind,
    pub shape: RecordShape,
}

/// Normalize a parameter or result type into a [`Candidate`].
///
/// At most one container level (slice, array or map value) and then at most
/// one pointer are unwrapped; what remains must be a named struct type.
pub fn extract_candidate(ty: &Type) -> Option<Candidate> {
    let (mut container, mut ty) = match ty {
        Type::Slice(elem) | Type::Array(elem) => (ContainerKind::Slice, elem.as_ref()),
        Type::Map { value, .. } => (ContainerKind::Map, value.as_ref()),
        other => (ContainerKind::None, other),
    };

    if let Type::Pointer(inner) = ty {
        if container == ContainerKind::None {
            container = ContainerKind::Pointer;
        }
        ty = inner.as_ref();
    }

    let Type::Named(named) = ty else {
        return None;
    };
    let Type::Struct(st) = named.underlying.as_ref() else {
        return None;
    };

    Some(Candidate {
        name: named.name.clone(),
        container,
        shape: RecordShape::of(st),
    })
}
