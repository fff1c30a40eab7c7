//! Type resolution over a set of parsed Go files.
//!
//! Packages are identified by directory. Import paths are matched against
//! indexed directories by path suffix (`converters/model` matches
//! `.../src/converters/model`), falling back to a unique package name. Types
//! the index cannot see resolve to [`Type::Unresolved`] and are never
//! treated as records.

use crate::core::ast::{FuncDecl, Import, SourceFile, StructFieldDecl, TypeExpr, TypeSpec};
use crate::core::types::{NamedType, Signature, StructField, StructType, Type, Var};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Predeclared Go types.
const BUILTIN_TYPES: &[&str] = &[
    "any",
    "bool",
    "byte",
    "comparable",
    "complex64",
    "complex128",
    "error",
    "float32",
    "float64",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "rune",
    "string",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
];

/// Type-resolution service the analysis is written against.
pub trait TypeInfo {
    /// Resolve a type expression written in `file`. Names listed in
    /// `type_params` are type parameters in scope.
    fn resolve(&self, file: &SourceFile, ty: &TypeExpr, type_params: &[String]) -> Type;

    /// Resolved signature of a declared function, or `None` when it cannot
    /// be determined.
    fn signature(&self, file: &SourceFile, func: &FuncDecl) -> Option<Signature> {
        resolve_signature(self, file, func)
    }
}

/// Resolve every parameter and result position of `func`.
///
/// Variadic parameters resolve to slices. Type parameters of the function
/// and of a generic receiver are in scope.
pub fn resolve_signature<T>(info: &T, file: &SourceFile, func: &FuncDecl) -> Option<Signature>
where
    T: TypeInfo + ?Sized,
{
    if func.name.is_empty() {
        return None;
    }

    let mut type_params = func.type_params.clone();
    if let Some(receiver) = &func.receiver {
        for field in &receiver.fields {
            type_params.extend(receiver_type_params(&field.ty));
        }
    }

    let vars = |list: &crate::core::ast::FieldList| -> Vec<Var> {
        let mut vars = Vec::with_capacity(list.arity());
        for field in &list.fields {
            let mut ty = info.resolve(file, &field.ty, &type_params);
            if field.variadic {
                ty = Type::slice(ty);
            }
            if field.names.is_empty() {
                vars.push(Var::new(None, ty));
            } else {
                for name in &field.names {
                    vars.push(Var::new(Some(name.as_str()), ty.clone()));
                }
            }
        }
        vars
    };

    Some(Signature::new(vars(&func.params), vars(&func.results)))
}

/// `func (p *Page[T]) ...` brings `T` into scope.
fn receiver_type_params(ty: &TypeExpr) -> Vec<String> {
    match ty {
        TypeExpr::Pointer(inner) => receiver_type_params(inner),
        TypeExpr::Generic { args, .. } => args
            .iter()
            .filter_map(|arg| match arg {
                TypeExpr::Name {
                    package: None,
                    name,
                } => Some(name.clone()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[derive(Debug, Clone)]
struct TypeDecl {
    spec: TypeSpec,
    /// Imports of the file the type is declared in.
    imports: Vec<Import>,
}

#[derive(Debug, Clone)]
struct Package {
    name: String,
    types: HashMap<String, TypeDecl>,
}

/// Lexical context a type expression is resolved in.
struct Scope<'a> {
    dir: &'a Path,
    imports: &'a [Import],
    type_params: &'a [String],
}

/// [`TypeInfo`] backed by the declarations of every indexed file.
#[derive(Debug, Clone, Default)]
pub struct PackageIndex {
    packages: BTreeMap<PathBuf, Package>,
}

impl PackageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(files: &[SourceFile]) -> Self {
        let mut index = Self::new();
        for file in files {
            index.add_file(file);
        }
        index
    }

    pub fn add_file(&mut self, file: &SourceFile) {
        let package = self
            .packages
            .entry(package_dir(file).to_path_buf())
            .or_insert_with(|| Package {
                name: file.package.clone(),
                types: HashMap::new(),
            });

        for spec in &file.types {
            package.types.insert(
                spec.name.clone(),
                TypeDecl {
                    spec: spec.clone(),
                    imports: file.imports.clone(),
                },
            );
        }
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    /// Directory of the package an import path refers to.
    fn package_for(&self, import_path: &str) -> Option<&Path> {
        if let Some(dir) = self
            .packages
            .keys()
            .find(|dir| !import_path.is_empty() && dir.ends_with(import_path))
        {
            return Some(dir);
        }

        let last_segment = import_path.rsplit('/').next()?;
        let mut by_name = self
            .packages
            .iter()
            .filter(|(_, package)| package.name == last_segment);
        match (by_name.next(), by_name.next()) {
            (Some((dir, _)), None) => Some(dir),
            _ => None,
        }
    }

    fn resolve_in(&self, scope: &Scope<'_>, ty: &TypeExpr, stack: &mut Vec<(PathBuf, String)>) -> Type {
        match ty {
            TypeExpr::Name {
                package: None,
                name,
            } => self.resolve_unqualified(scope, name, stack),
            TypeExpr::Name {
                package: Some(qualifier),
                name,
            } => scope
                .imports
                .iter()
                .find(|import| import.local_name() == Some(qualifier.as_str()))
                .and_then(|import| self.package_for(&import.path))
                .map(|dir| self.lookup(dir, name, stack))
                .unwrap_or_else(|| Type::Unresolved(format!("{qualifier}.{name}"))),
            TypeExpr::Pointer(inner) => Type::pointer(self.resolve_in(scope, inner, stack)),
            TypeExpr::Slice(elem) => Type::slice(self.resolve_in(scope, elem, stack)),
            TypeExpr::Array(elem) => Type::Array(Box::new(self.resolve_in(scope, elem, stack))),
            TypeExpr::Map { key, value } => Type::map(
                self.resolve_in(scope, key, stack),
                self.resolve_in(scope, value, stack),
            ),
            TypeExpr::Chan(elem) => Type::Chan(Box::new(self.resolve_in(scope, elem, stack))),
            TypeExpr::Struct(decls) => Type::Struct(struct_type(decls)),
            TypeExpr::Generic { base, .. } => self.resolve_in(scope, base, stack),
            TypeExpr::Interface => Type::Interface,
            TypeExpr::Func => Type::Func,
            TypeExpr::Other(text) => Type::Unresolved(text.clone()),
        }
    }

    fn resolve_unqualified(
        &self,
        scope: &Scope<'_>,
        name: &str,
        stack: &mut Vec<(PathBuf, String)>,
    ) -> Type {
        if scope.type_params.iter().any(|param| param == name) {
            return Type::TypeParam(name.to_string());
        }
        if self.declares(scope.dir, name) {
            return self.lookup(scope.dir, name, stack);
        }

        let dot_import = scope
            .imports
            .iter()
            .filter(|import| import.alias.as_deref() == Some("."))
            .filter_map(|import| self.package_for(&import.path))
            .find(|dir| self.declares(dir, name));
        if let Some(dir) = dot_import {
            return self.lookup(dir, name, stack);
        }

        if BUILTIN_TYPES.contains(&name) {
            Type::basic(name)
        } else {
            Type::Unresolved(name.to_string())
        }
    }

    fn declares(&self, dir: &Path, name: &str) -> bool {
        self.packages
            .get(dir)
            .is_some_and(|package| package.types.contains_key(name))
    }

    fn lookup(&self, dir: &Path, name: &str, stack: &mut Vec<(PathBuf, String)>) -> Type {
        let Some(package) = self.packages.get(dir) else {
            return Type::Unresolved(name.to_string());
        };
        let Some(decl) = package.types.get(name) else {
            return Type::Unresolved(format!("{}.{name}", package.name));
        };

        let key = (dir.to_path_buf(), name.to_string());
        if stack.contains(&key) {
            log::debug!("type cycle through {}.{}", package.name, name);
            return Type::Unresolved(name.to_string());
        }

        stack.push(key);
        let scope = Scope {
            dir,
            imports: &decl.imports,
            type_params: &decl.spec.type_params,
        };
        let target = self.resolve_in(&scope, &decl.spec.ty, stack);
        stack.pop();

        if decl.spec.alias {
            target
        } else {
            Type::Named(NamedType::new(
                &package.name,
                name,
                target.underlying().clone(),
            ))
        }
    }
}

impl TypeInfo for PackageIndex {
    fn resolve(&self, file: &SourceFile, ty: &TypeExpr, type_params: &[String]) -> Type {
        let scope = Scope {
            dir: package_dir(file),
            imports: &file.imports,
            type_params,
        };
        self.resolve_in(&scope, ty, &mut Vec::new())
    }

    fn signature(&self, file: &SourceFile, func: &FuncDecl) -> Option<Signature> {
        if !self.packages.contains_key(package_dir(file)) {
            return None;
        }
        resolve_signature(self, file, func)
    }
}

fn package_dir(file: &SourceFile) -> &Path {
    file.path.parent().unwrap_or_else(|| Path::new(""))
}

fn struct_type(decls: &[StructFieldDecl]) -> StructType {
    let mut fields = Vec::new();
    for decl in decls {
        if decl.embedded {
            let base = match &decl.ty {
                TypeExpr::Pointer(inner) => inner.base_name(),
                other => other.base_name(),
            };
            if let Some(name) = base {
                fields.push(StructField::embedded(name));
            }
        } else {
            fields.extend(decl.names.iter().map(|name| StructField::new(name)));
        }
    }
    StructType::new(fields)
}
