pub mod ast;
pub mod report;
pub mod types;
pub mod visit;

pub use ast::{Block, Expr, FieldList, FuncDecl, Position, SourceFile, Stmt, TypeExpr};
pub use report::{AnalysisSummary, CheckReport, LeakDiagnostic};
pub use types::{NamedType, Signature, StructField, StructType, Type, Var};
