//! Tree-sitter parser integration for Go
//!
//! Provides parsing using the tree-sitter-go grammar.

use crate::core::Position;
use crate::errors::{Error, Result};
use std::path::{Path, PathBuf};
use tree_sitter::{Language, Node, Parser, Tree};

/// A parsed Go source file together with the text it was parsed from.
#[derive(Clone, Debug)]
pub struct GoAst {
    pub tree: Tree,
    pub source: String,
    pub path: PathBuf,
}

fn go_language() -> Language {
    tree_sitter_go::LANGUAGE.into()
}

/// Parse Go source code into a tree-sitter AST
pub fn parse_source(content: &str, path: &Path) -> Result<GoAst> {
    let mut parser = Parser::new();
    parser
        .set_language(&go_language())
        .map_err(|e| Error::parse(path, format!("failed to load Go grammar: {e}")))?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| Error::parse(path, "parser produced no syntax tree"))?;

    Ok(GoAst {
        tree,
        path: path.to_path_buf(),
        source: content.to_string(),
    })
}

/// Check if a parse tree has errors
pub fn has_parse_errors(tree: &Tree) -> bool {
    tree.root_node().has_error()
}

/// Get text for a tree-sitter node
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    source
        .get(node.start_byte()..node.end_byte())
        .unwrap_or_default()
}

/// 1-indexed start position of a node
pub fn node_position(node: &Node) -> Position {
    let point = node.start_position();
    Position::new(point.row + 1, point.column + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_go() {
        let source = "package model\n\ntype Order struct {\n\tID string\n}\n";
        let ast = parse_source(source, Path::new("model/order.go")).unwrap();
        assert!(!has_parse_errors(&ast.tree));
        assert_eq!(ast.tree.root_node().kind(), "source_file");
    }

    #[test]
    fn test_parse_errors_are_reported_not_fatal() {
        let source = "package model\n\nfunc Broken( {\n";
        let ast = parse_source(source, Path::new("broken.go")).unwrap();
        assert!(has_parse_errors(&ast.tree));
    }

    #[test]
    fn test_node_text_and_position() {
        let source = "package model\nvar x = 42\n";
        let ast = parse_source(source, Path::new("x.go")).unwrap();

        let root = ast.tree.root_node();
        assert_eq!(node_text(&root, &ast.source), source);

        let var_decl = root.named_child(1).unwrap();
        assert_eq!(var_decl.kind(), "var_declaration");
        assert_eq!(node_position(&var_decl), Position::new(2, 1));
    }
}
