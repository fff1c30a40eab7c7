//! Go syntax model consumed by the converter analysis.
//!
//! The tree-sitter front end lowers each source file into these types. The
//! model keeps only what the analysis needs (declarations, parameter
//! groupings, statement and expression trees), but it is complete enough
//! that any member access in a body remains reachable by the visitor.

use serde::Serialize;
use std::path::PathBuf;

/// 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Name from the `package` clause.
    pub package: String,
    pub imports: Vec<Import>,
    pub types: Vec<TypeSpec>,
    pub functions: Vec<FuncDecl>,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, package: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            package: package.into(),
            imports: Vec::new(),
            types: Vec::new(),
            functions: Vec::new(),
        }
    }

    /// Find the import a qualifier such as `model` in `model.Sample` refers to.
    pub fn import_for(&self, qualifier: &str) -> Option<&Import> {
        self.imports
            .iter()
            .find(|import| import.local_name() == Some(qualifier))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub alias: Option<String>,
    pub path: String,
}

impl Import {
    /// The identifier this import is referenced by inside the file.
    ///
    /// Blank (`_`) and dot (`.`) imports have no usable qualifier.
    pub fn local_name(&self) -> Option<&str> {
        match self.alias.as_deref() {
            Some("_") | Some(".") => None,
            Some(alias) => Some(alias),
            None => self.path.rsplit('/').next().filter(|s| !s.is_empty()),
        }
    }
}

/// A `type` declaration, either a defined type or an alias (`type A = B`).
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub name: String,
    pub type_params: Vec<String>,
    pub alias: bool,
    pub ty: TypeExpr,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: String,
    /// Position of the function's name identifier.
    pub position: Position,
    /// Source text of the declaration up to (not including) the body.
    pub header: String,
    pub receiver: Option<FieldList>,
    pub type_params: Vec<String>,
    pub params: FieldList,
    pub results: FieldList,
    pub body: Option<Block>,
}

impl FuncDecl {
    pub fn is_method(&self) -> bool {
        self.receiver.is_some()
    }
}

/// Parameter, result or receiver list, keeping the source grouping
/// (`a, b int` is one field with two names).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldList {
    pub fields: Vec<Field>,
}

impl FieldList {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Number of positions declared; an unnamed field still takes one.
    pub fn arity(&self) -> usize {
        self.fields.iter().map(Field::arity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub names: Vec<String>,
    pub ty: TypeExpr,
    pub variadic: bool,
}

impl Field {
    pub fn named(names: &[&str], ty: TypeExpr) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            ty,
            variadic: false,
        }
    }

    pub fn anonymous(ty: TypeExpr) -> Self {
        Self {
            names: Vec::new(),
            ty,
            variadic: false,
        }
    }

    pub fn arity(&self) -> usize {
        self.names.len().max(1)
    }
}

/// A type as written in source, before resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Name {
        package: Option<String>,
        name: String,
    },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Array(Box<TypeExpr>),
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Struct(Vec<StructFieldDecl>),
    Generic {
        base: Box<TypeExpr>,
        args: Vec<TypeExpr>,
    },
    Chan(Box<TypeExpr>),
    Interface,
    Func,
    Other(String),
}

impl TypeExpr {
    pub fn name(name: &str) -> Self {
        TypeExpr::Name {
            package: None,
            name: name.to_string(),
        }
    }

    pub fn qualified(package: &str, name: &str) -> Self {
        TypeExpr::Name {
            package: Some(package.to_string()),
            name: name.to_string(),
        }
    }

    pub fn pointer(inner: TypeExpr) -> Self {
        TypeExpr::Pointer(Box::new(inner))
    }

    pub fn slice(elem: TypeExpr) -> Self {
        TypeExpr::Slice(Box::new(elem))
    }

    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        TypeExpr::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Declared name of the type, ignoring package qualifier and type arguments.
    pub fn base_name(&self) -> Option<&str> {
        match self {
            TypeExpr::Name { name, .. } => Some(name),
            TypeExpr::Generic { base, .. } => base.base_name(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructFieldDecl {
    pub names: Vec<String>,
    pub ty: TypeExpr,
    pub embedded: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self { stmts }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `:=`
    Define,
    /// `+=`, `|=`, `<<=`, ...
    Compound(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    Assign {
        lhs: Vec<Expr>,
        op: AssignOp,
        rhs: Vec<Expr>,
    },
    IncDec {
        target: Expr,
        increment: bool,
    },
    Send {
        channel: Expr,
        value: Expr,
    },
    Return(Vec<Expr>),
    Go(Expr),
    Defer(Expr),
    /// `var` or `const` declaration inside a body.
    Decl(Vec<ValueSpec>),
    /// Local `type` declaration.
    TypeDecl(Vec<TypeSpec>),
    Block(Block),
    If {
        init: Option<Box<Stmt>>,
        cond: Expr,
        then: Block,
        otherwise: Option<Box<Stmt>>,
    },
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        post: Option<Box<Stmt>>,
        body: Block,
    },
    Range {
        lhs: Vec<Expr>,
        define: bool,
        expr: Expr,
        body: Block,
    },
    Switch {
        init: Option<Box<Stmt>>,
        tag: Option<Expr>,
        clauses: Vec<CaseClause>,
    },
    TypeSwitch {
        init: Option<Box<Stmt>>,
        binding: Option<String>,
        subject: Expr,
        clauses: Vec<CaseClause>,
    },
    Select {
        clauses: Vec<CaseClause>,
    },
    Labeled {
        label: String,
        stmt: Option<Box<Stmt>>,
    },
    /// `break`, `continue`, `goto`, `fallthrough`.
    Branch(String),
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpec {
    pub names: Vec<String>,
    pub ty: Option<TypeExpr>,
    pub values: Vec<Expr>,
}

/// One arm of an expression switch, type switch or select.
///
/// Expression cases fill `values`, type cases fill `types`, select cases
/// carry their communication statement in `comm`. A default arm has all
/// three empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaseClause {
    pub values: Vec<Expr>,
    pub types: Vec<TypeExpr>,
    pub comm: Option<Box<Stmt>>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(String),
    Selector {
        operand: Box<Expr>,
        field: String,
    },
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
    },
    /// Composite literal; `ty` is `None` for elided inner literals such as
    /// the elements of `[]T{{...}, {...}}`.
    Composite {
        ty: Option<TypeExpr>,
        elements: Vec<Element>,
    },
    Unary {
        op: String,
        operand: Box<Expr>,
    },
    Binary {
        op: String,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Index {
        operand: Box<Expr>,
        index: Box<Expr>,
    },
    Slice {
        operand: Box<Expr>,
        bounds: Vec<Expr>,
    },
    TypeAssert {
        operand: Box<Expr>,
        ty: TypeExpr,
    },
    /// A type in expression position (`make([]T, n)`, conversions).
    Type(TypeExpr),
    FuncLit {
        params: FieldList,
        results: FieldList,
        body: Block,
    },
    Lit(String),
    Paren(Box<Expr>),
    /// Any construct not modeled above; keeps its sub-expressions reachable.
    Other(Vec<Expr>),
}

impl Expr {
    pub fn ident(name: &str) -> Self {
        Expr::Ident(name.to_string())
    }

    pub fn selector(operand: Expr, field: &str) -> Self {
        Expr::Selector {
            operand: Box::new(operand),
            field: field.to_string(),
        }
    }

    pub fn call(func: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            func: Box::new(func),
            args,
        }
    }

    pub fn address_of(operand: Expr) -> Self {
        Expr::Unary {
            op: "&".to_string(),
            operand: Box::new(operand),
        }
    }

    /// `true` when this is exactly the identifier `name`.
    pub fn is_ident(&self, name: &str) -> bool {
        matches!(self, Expr::Ident(ident) if ident == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub key: Option<Expr>,
    pub value: Expr,
}

impl Element {
    pub fn keyed(key: &str, value: Expr) -> Self {
        Self {
            key: Some(Expr::ident(key)),
            value,
        }
    }

    pub fn positional(value: Expr) -> Self {
        Self { key: None, value }
    }
}
