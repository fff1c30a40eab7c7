//! Resolved type model.
//!
//! These are the types handed out by the type-resolution service
//! ([`crate::frontend::TypeInfo`]). Struct types only record field names,
//! which keeps recursive declarations (`type Node struct { Next *Node }`)
//! finite without any indirection.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// Predeclared types: `string`, `int`, `error`, `any`, ...
    Basic(String),
    Named(NamedType),
    Struct(StructType),
    Pointer(Box<Type>),
    Slice(Box<Type>),
    Array(Box<Type>),
    Map { key: Box<Type>, value: Box<Type> },
    Chan(Box<Type>),
    Interface,
    Func,
    TypeParam(String),
    /// A reference the resolver could not follow (missing package, cycle, ...).
    Unresolved(String),
}

impl Type {
    pub fn pointer(inner: Type) -> Self {
        Type::Pointer(Box::new(inner))
    }

    pub fn slice(elem: Type) -> Self {
        Type::Slice(Box::new(elem))
    }

    pub fn map(key: Type, value: Type) -> Self {
        Type::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn basic(name: &str) -> Self {
        Type::Basic(name.to_string())
    }

    /// Underlying type: a named type's representation, anything else itself.
    pub fn underlying(&self) -> &Type {
        match self {
            Type::Named(named) => &named.underlying,
            other => other,
        }
    }
}

/// A defined type: `type Order struct { ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedType {
    pub package: String,
    pub name: String,
    /// Never itself a `Type::Named`.
    pub underlying: Box<Type>,
}

impl NamedType {
    pub fn new(package: &str, name: &str, underlying: Type) -> Self {
        Self {
            package: package.to_string(),
            name: name.to_string(),
            underlying: Box::new(underlying),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructType {
    pub fields: Vec<StructField>,
}

impl StructType {
    pub fn new(fields: Vec<StructField>) -> Self {
        Self { fields }
    }

    /// Convenience constructor for plain (non-embedded) fields.
    pub fn with_fields(names: &[&str]) -> Self {
        Self {
            fields: names.iter().map(|name| StructField::new(name)).collect(),
        }
    }

    pub fn exported_field_names(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|field| field.is_exported())
            .map(|field| field.name.clone())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructField {
    pub name: String,
    /// Embedded fields are named after their type.
    pub embedded: bool,
}

impl StructField {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            embedded: false,
        }
    }

    pub fn embedded(name: &str) -> Self {
        Self {
            name: name.to_string(),
            embedded: true,
        }
    }

    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }
}

/// Go's visibility rule: an identifier is exported when it starts with an
/// upper-case letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// One parameter or result position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Var {
    pub name: Option<String>,
    pub ty: Type,
}

impl Var {
    pub fn new(name: Option<&str>, ty: Type) -> Self {
        Self {
            name: name.map(str::to_string),
            ty,
        }
    }
}

/// Resolved function signature, one [`Var`] per declared position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    pub params: Vec<Var>,
    pub results: Vec<Var>,
}

impl Signature {
    pub fn new(params: Vec<Var>, results: Vec<Var>) -> Self {
        Self { params, results }
    }
}
