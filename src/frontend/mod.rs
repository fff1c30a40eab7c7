//! Go front end: tree-sitter parsing, lowering into the syntax model, and
//! type resolution.

pub mod lower;
pub mod parser;
pub mod resolver;

pub use lower::lower_source_file;
pub use parser::{has_parse_errors, parse_source, GoAst};
pub use resolver::{resolve_signature, PackageIndex, TypeInfo};

use crate::core::SourceFile;
use crate::errors::Result;
use std::path::Path;

/// Parse and lower one Go file.
///
/// Syntax errors are not fatal: tree-sitter recovers, and whatever could be
/// parsed is still analyzed.
pub fn parse_go_file(path: &Path, content: &str) -> Result<SourceFile> {
    let ast = parse_source(content, path)?;
    if has_parse_errors(&ast.tree) {
        log::warn!("syntax errors in {}, analyzing recovered tree", path.display());
    }
    Ok(lower_source_file(&ast))
}
