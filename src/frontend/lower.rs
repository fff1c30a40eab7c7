//! Lowering of tree-sitter-go syntax trees into [`crate::core::ast`].
//!
//! Lowering is total: node kinds without a dedicated mapping become
//! `Expr::Other` / `TypeExpr::Other`, keeping nested expressions reachable.

use super::parser::{node_position, node_text, GoAst};
use crate::core::ast::{
    AssignOp, Block, CaseClause, Element, Expr, Field, FieldList, FuncDecl, Import, SourceFile,
    Stmt, StructFieldDecl, TypeExpr, TypeSpec, ValueSpec,
};
use std::path::Path;
use tree_sitter::Node;

/// Node kinds that denote a type when they appear in expression position.
const TYPE_KINDS: &[&str] = &[
    "type_identifier",
    "qualified_type",
    "pointer_type",
    "slice_type",
    "array_type",
    "implicit_length_array_type",
    "map_type",
    "struct_type",
    "interface_type",
    "channel_type",
    "function_type",
    "generic_type",
    "parenthesized_type",
];

const LITERAL_KINDS: &[&str] = &[
    "interpreted_string_literal",
    "raw_string_literal",
    "int_literal",
    "float_literal",
    "imaginary_literal",
    "rune_literal",
    "nil",
    "true",
    "false",
    "iota",
];

pub fn lower_source_file(ast: &GoAst) -> SourceFile {
    let lowerer = Lowerer {
        source: &ast.source,
    };
    lowerer.source_file(ast.tree.root_node(), &ast.path)
}

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

fn field_children<'t>(node: Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor)
        .filter(|child| child.is_named() && !child.is_extra())
        .collect()
}

fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token);
    found
}

fn unquote(literal: &str) -> String {
    literal.trim_matches(|c| c == '"' || c == '`').to_string()
}

struct Lowerer<'src> {
    source: &'src str,
}

impl<'src> Lowerer<'src> {
    fn text(&self, node: Node<'_>) -> &'src str {
        node_text(&node, self.source)
    }

    fn owned_text(&self, node: Node<'_>) -> String {
        self.text(node).to_string()
    }

    fn source_file(&self, root: Node<'_>, path: &Path) -> SourceFile {
        let mut file = SourceFile::new(path, "");
        for child in named_children(root) {
            match child.kind() {
                "package_clause" => {
                    if let Some(name) = named_children(child).first() {
                        file.package = self.owned_text(*name);
                    }
                }
                "import_declaration" => self.imports(child, &mut file.imports),
                "type_declaration" => file.types.extend(self.type_specs(child)),
                "function_declaration" | "method_declaration" => {
                    file.functions.push(self.func_decl(child))
                }
                _ => {}
            }
        }
        file
    }

    fn imports(&self, decl: Node<'_>, out: &mut Vec<Import>) {
        for child in named_children(decl) {
            match child.kind() {
                "import_spec" => out.extend(self.import_spec(child)),
                "import_spec_list" => {
                    for spec in named_children(child) {
                        if spec.kind() == "import_spec" {
                            out.extend(self.import_spec(spec));
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn import_spec(&self, spec: Node<'_>) -> Option<Import> {
        let path = spec.child_by_field_name("path")?;
        Some(Import {
            alias: spec.child_by_field_name("name").map(|n| self.owned_text(n)),
            path: unquote(self.text(path)),
        })
    }

    fn type_specs(&self, decl: Node<'_>) -> Vec<TypeSpec> {
        named_children(decl)
            .into_iter()
            .filter_map(|spec| match spec.kind() {
                "type_spec" => self.type_spec(spec, false),
                "type_alias" => self.type_spec(spec, true),
                _ => None,
            })
            .collect()
    }

    fn type_spec(&self, spec: Node<'_>, alias: bool) -> Option<TypeSpec> {
        let name = spec.child_by_field_name("name")?;
        let ty = spec.child_by_field_name("type")?;
        Some(TypeSpec {
            name: self.owned_text(name),
            type_params: self.type_param_names(spec.child_by_field_name("type_parameters")),
            alias,
            ty: self.type_expr(ty),
            position: node_position(&name),
        })
    }

    fn type_param_names(&self, list: Option<Node<'_>>) -> Vec<String> {
        let Some(list) = list else {
            return Vec::new();
        };
        named_children(list)
            .into_iter()
            .filter(|decl| decl.kind() == "type_parameter_declaration")
            .flat_map(|decl| field_children(decl, "name"))
            .map(|name| self.owned_text(name))
            .collect()
    }

    fn func_decl(&self, node: Node<'_>) -> FuncDecl {
        let name = node.child_by_field_name("name");
        let body = node.child_by_field_name("body");
        let header_end = body.map_or(node.end_byte(), |b| b.start_byte());
        let header = self
            .source
            .get(node.start_byte()..header_end)
            .unwrap_or_default()
            .trim_end()
            .to_string();

        FuncDecl {
            name: name.map(|n| self.owned_text(n)).unwrap_or_default(),
            position: node_position(&name.unwrap_or(node)),
            header,
            receiver: node
                .child_by_field_name("receiver")
                .map(|r| self.field_list(r)),
            type_params: self.type_param_names(node.child_by_field_name("type_parameters")),
            params: node
                .child_by_field_name("parameters")
                .map(|p| self.field_list(p))
                .unwrap_or_default(),
            results: node
                .child_by_field_name("result")
                .map(|r| self.result_list(r))
                .unwrap_or_default(),
            body: body.map(|b| self.block(b)),
        }
    }

    /// A result is either a parenthesized list or a single bare type.
    fn result_list(&self, node: Node<'_>) -> FieldList {
        if node.kind() == "parameter_list" {
            self.field_list(node)
        } else {
            FieldList::new(vec![Field::anonymous(self.type_expr(node))])
        }
    }

    fn field_list(&self, list: Node<'_>) -> FieldList {
        let fields = named_children(list)
            .into_iter()
            .filter_map(|decl| {
                let variadic = decl.kind() == "variadic_parameter_declaration";
                if !variadic && decl.kind() != "parameter_declaration" {
                    return None;
                }
                let ty = decl.child_by_field_name("type")?;
                Some(Field {
                    names: field_children(decl, "name")
                        .into_iter()
                        .map(|n| self.owned_text(n))
                        .collect(),
                    ty: self.type_expr(ty),
                    variadic,
                })
            })
            .collect();
        FieldList::new(fields)
    }

    fn type_expr(&self, node: Node<'_>) -> TypeExpr {
        let other = || TypeExpr::Other(self.owned_text(node));
        match node.kind() {
            "type_identifier" | "identifier" => TypeExpr::name(self.text(node)),
            "qualified_type" => match (
                node.child_by_field_name("package"),
                node.child_by_field_name("name"),
            ) {
                (Some(package), Some(name)) => {
                    TypeExpr::qualified(self.text(package), self.text(name))
                }
                _ => other(),
            },
            "pointer_type" => named_children(node)
                .first()
                .map(|inner| TypeExpr::pointer(self.type_expr(*inner)))
                .unwrap_or_else(other),
            "slice_type" => node
                .child_by_field_name("element")
                .map(|elem| TypeExpr::slice(self.type_expr(elem)))
                .unwrap_or_else(other),
            "array_type" | "implicit_length_array_type" => node
                .child_by_field_name("element")
                .map(|elem| TypeExpr::Array(Box::new(self.type_expr(elem))))
                .unwrap_or_else(other),
            "map_type" => match (
                node.child_by_field_name("key"),
                node.child_by_field_name("value"),
            ) {
                (Some(key), Some(value)) => TypeExpr::map(self.type_expr(key), self.type_expr(value)),
                _ => other(),
            },
            "channel_type" => node
                .child_by_field_name("value")
                .map(|value| TypeExpr::Chan(Box::new(self.type_expr(value))))
                .unwrap_or_else(other),
            "struct_type" => TypeExpr::Struct(self.struct_fields(node)),
            "generic_type" => match node.child_by_field_name("type") {
                Some(base) => TypeExpr::Generic {
                    base: Box::new(self.type_expr(base)),
                    args: node
                        .child_by_field_name("type_arguments")
                        .map(|args| {
                            named_children(args)
                                .into_iter()
                                .map(|arg| self.type_elem(arg))
                                .collect()
                        })
                        .unwrap_or_default(),
                },
                None => other(),
            },
            "parenthesized_type" | "type_elem" | "type_constraint" => self.type_elem(node),
            "interface_type" => TypeExpr::Interface,
            "function_type" => TypeExpr::Func,
            _ => other(),
        }
    }

    /// Unions (`A | B`) have no single type; everything else unwraps.
    fn type_elem(&self, node: Node<'_>) -> TypeExpr {
        if !matches!(
            node.kind(),
            "type_elem" | "type_constraint" | "parenthesized_type"
        ) {
            return self.type_expr(node);
        }
        match named_children(node).as_slice() {
            [single] => self.type_expr(*single),
            _ => TypeExpr::Other(self.owned_text(node)),
        }
    }

    fn struct_fields(&self, node: Node<'_>) -> Vec<StructFieldDecl> {
        let Some(list) = named_children(node)
            .into_iter()
            .find(|child| child.kind() == "field_declaration_list")
        else {
            return Vec::new();
        };

        named_children(list)
            .into_iter()
            .filter(|decl| decl.kind() == "field_declaration")
            .filter_map(|decl| {
                let ty = decl.child_by_field_name("type")?;
                let names: Vec<String> = field_children(decl, "name")
                    .into_iter()
                    .map(|n| self.owned_text(n))
                    .collect();
                let embedded = names.is_empty();
                let mut ty = self.type_expr(ty);
                if embedded && has_token(decl, "*") {
                    ty = TypeExpr::pointer(ty);
                }
                Some(StructFieldDecl {
                    names,
                    ty,
                    embedded,
                })
            })
            .collect()
    }

    fn block(&self, node: Node<'_>) -> Block {
        let mut stmts = Vec::new();
        for child in named_children(node) {
            self.push_statement(child, &mut stmts);
        }
        Block::new(stmts)
    }

    fn push_statement(&self, node: Node<'_>, out: &mut Vec<Stmt>) {
        if node.kind() == "statement_list" {
            for child in named_children(node) {
                self.push_statement(child, out);
            }
        } else if let Some(stmt) = self.stmt(node) {
            out.push(stmt);
        }
    }

    fn boxed_stmt(&self, node: Option<Node<'_>>) -> Option<Box<Stmt>> {
        node.and_then(|n| self.stmt(n)).map(Box::new)
    }

    fn first_expr(&self, node: Node<'_>) -> Expr {
        named_children(node)
            .first()
            .map(|child| self.expr(*child))
            .unwrap_or(Expr::Other(Vec::new()))
    }

    fn field_expr(&self, node: Node<'_>, field: &str) -> Expr {
        node.child_by_field_name(field)
            .map(|child| self.expr(child))
            .unwrap_or(Expr::Other(Vec::new()))
    }

    fn field_exprs(&self, node: Node<'_>, field: &str) -> Vec<Expr> {
        node.child_by_field_name(field)
            .map(|child| self.expr_list(child))
            .unwrap_or_default()
    }

    fn stmt(&self, node: Node<'_>) -> Option<Stmt> {
        let stmt = match node.kind() {
            "comment" => return None,
            "expression_statement" => Stmt::Expr(self.first_expr(node)),
            "assignment_statement" => {
                let op = node
                    .child_by_field_name("operator")
                    .map(|op| self.text(op))
                    .unwrap_or("=");
                Stmt::Assign {
                    lhs: self.field_exprs(node, "left"),
                    op: if op == "=" {
                        AssignOp::Assign
                    } else {
                        AssignOp::Compound(op.to_string())
                    },
                    rhs: self.field_exprs(node, "right"),
                }
            }
            "short_var_declaration" => Stmt::Assign {
                lhs: self.field_exprs(node, "left"),
                op: AssignOp::Define,
                rhs: self.field_exprs(node, "right"),
            },
            "receive_statement" => {
                let rhs = vec![self.field_expr(node, "right")];
                match node.child_by_field_name("left") {
                    Some(left) => Stmt::Assign {
                        lhs: self.expr_list(left),
                        op: if has_token(node, ":=") {
                            AssignOp::Define
                        } else {
                            AssignOp::Assign
                        },
                        rhs,
                    },
                    None => Stmt::Expr(rhs.into_iter().next()?),
                }
            }
            "inc_statement" | "dec_statement" => Stmt::IncDec {
                target: self.first_expr(node),
                increment: node.kind() == "inc_statement",
            },
            "send_statement" => Stmt::Send {
                channel: self.field_expr(node, "channel"),
                value: self.field_expr(node, "value"),
            },
            "return_statement" => Stmt::Return(
                named_children(node)
                    .first()
                    .map(|list| self.expr_list(*list))
                    .unwrap_or_default(),
            ),
            "go_statement" => Stmt::Go(self.first_expr(node)),
            "defer_statement" => Stmt::Defer(self.first_expr(node)),
            "var_declaration" | "const_declaration" => Stmt::Decl(self.value_specs(node)),
            "type_declaration" => Stmt::TypeDecl(self.type_specs(node)),
            "block" => Stmt::Block(self.block(node)),
            "if_statement" => Stmt::If {
                init: self.boxed_stmt(node.child_by_field_name("initializer")),
                cond: self.field_expr(node, "condition"),
                then: node
                    .child_by_field_name("consequence")
                    .map(|b| self.block(b))
                    .unwrap_or_default(),
                otherwise: self.boxed_stmt(node.child_by_field_name("alternative")),
            },
            "for_statement" => self.for_stmt(node),
            "expression_switch_statement" => Stmt::Switch {
                init: self.boxed_stmt(node.child_by_field_name("initializer")),
                tag: node.child_by_field_name("value").map(|v| self.expr(v)),
                clauses: self.case_clauses(node),
            },
            "type_switch_statement" => Stmt::TypeSwitch {
                init: self.boxed_stmt(node.child_by_field_name("initializer")),
                binding: node
                    .child_by_field_name("alias")
                    .and_then(|alias| named_children(alias).first().map(|n| self.owned_text(*n))),
                subject: self.field_expr(node, "value"),
                clauses: self.case_clauses(node),
            },
            "select_statement" => Stmt::Select {
                clauses: self.case_clauses(node),
            },
            "labeled_statement" => {
                let label = node.child_by_field_name("label");
                Stmt::Labeled {
                    label: label.map(|l| self.owned_text(l)).unwrap_or_default(),
                    stmt: self.boxed_stmt(
                        named_children(node)
                            .into_iter()
                            .find(|child| Some(child.id()) != label.map(|l| l.id())),
                    ),
                }
            }
            "break_statement" | "continue_statement" | "goto_statement"
            | "fallthrough_statement" => Stmt::Branch(
                node.kind()
                    .trim_end_matches("_statement")
                    .to_string(),
            ),
            "empty_statement" => Stmt::Empty,
            _ => Stmt::Expr(self.expr(node)),
        };
        Some(stmt)
    }

    fn for_stmt(&self, node: Node<'_>) -> Stmt {
        let body_node = node.child_by_field_name("body");
        let body = body_node.map(|b| self.block(b)).unwrap_or_default();
        let header = named_children(node)
            .into_iter()
            .find(|child| Some(child.id()) != body_node.map(|b| b.id()));

        match header {
            Some(clause) if clause.kind() == "for_clause" => Stmt::For {
                init: self.boxed_stmt(clause.child_by_field_name("initializer")),
                cond: clause.child_by_field_name("condition").map(|c| self.expr(c)),
                post: self.boxed_stmt(clause.child_by_field_name("update")),
                body,
            },
            Some(clause) if clause.kind() == "range_clause" => Stmt::Range {
                lhs: self.field_exprs(clause, "left"),
                define: has_token(clause, ":="),
                expr: self.field_expr(clause, "right"),
                body,
            },
            Some(cond) => Stmt::For {
                init: None,
                cond: Some(self.expr(cond)),
                post: None,
                body,
            },
            None => Stmt::For {
                init: None,
                cond: None,
                post: None,
                body,
            },
        }
    }

    fn case_clauses(&self, switch: Node<'_>) -> Vec<CaseClause> {
        named_children(switch)
            .into_iter()
            .filter(|child| {
                matches!(
                    child.kind(),
                    "expression_case" | "type_case" | "communication_case" | "default_case"
                )
            })
            .map(|clause| self.case_clause(clause))
            .collect()
    }

    fn case_clause(&self, clause: Node<'_>) -> CaseClause {
        let mut case = CaseClause::default();
        let mut header_ids = Vec::new();

        if let Some(values) = clause.child_by_field_name("value") {
            header_ids.push(values.id());
            case.values = self.expr_list(values);
        }
        for ty in field_children(clause, "type") {
            header_ids.push(ty.id());
            case.types.push(self.type_expr(ty));
        }
        if let Some(comm) = clause.child_by_field_name("communication") {
            header_ids.push(comm.id());
            case.comm = self.stmt(comm).map(Box::new);
        }

        for child in named_children(clause) {
            if !header_ids.contains(&child.id()) {
                self.push_statement(child, &mut case.body);
            }
        }
        case
    }

    fn value_specs(&self, decl: Node<'_>) -> Vec<ValueSpec> {
        let mut specs = Vec::new();
        for child in named_children(decl) {
            match child.kind() {
                "var_spec" | "const_spec" => specs.push(self.value_spec(child)),
                "var_spec_list" => specs.extend(
                    named_children(child)
                        .into_iter()
                        .filter(|spec| spec.kind() == "var_spec")
                        .map(|spec| self.value_spec(spec)),
                ),
                _ => {}
            }
        }
        specs
    }

    fn value_spec(&self, spec: Node<'_>) -> ValueSpec {
        ValueSpec {
            names: field_children(spec, "name")
                .into_iter()
                .map(|n| self.owned_text(n))
                .collect(),
            ty: spec.child_by_field_name("type").map(|t| self.type_expr(t)),
            values: self.field_exprs(spec, "value"),
        }
    }

    fn expr_list(&self, node: Node<'_>) -> Vec<Expr> {
        if node.kind() == "expression_list" {
            named_children(node)
                .into_iter()
                .map(|child| self.expr(child))
                .collect()
        } else {
            vec![self.expr(node)]
        }
    }

    fn expr(&self, node: Node<'_>) -> Expr {
        let kind = node.kind();
        match kind {
            "identifier" | "field_identifier" | "package_identifier" => {
                Expr::Ident(self.owned_text(node))
            }
            "selector_expression" => Expr::Selector {
                operand: Box::new(self.field_expr(node, "operand")),
                field: node
                    .child_by_field_name("field")
                    .map(|f| self.owned_text(f))
                    .unwrap_or_default(),
            },
            "call_expression" => Expr::Call {
                func: Box::new(self.field_expr(node, "function")),
                args: node
                    .child_by_field_name("arguments")
                    .map(|args| {
                        named_children(args)
                            .into_iter()
                            .map(|arg| self.expr(arg))
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            "composite_literal" => Expr::Composite {
                ty: node.child_by_field_name("type").map(|t| self.type_expr(t)),
                elements: node
                    .child_by_field_name("body")
                    .map(|body| self.literal_elements(body))
                    .unwrap_or_default(),
            },
            "literal_value" => Expr::Composite {
                ty: None,
                elements: self.literal_elements(node),
            },
            "literal_element" | "variadic_argument" => self.first_expr(node),
            "parenthesized_expression" => Expr::Paren(Box::new(self.first_expr(node))),
            "unary_expression" => Expr::Unary {
                op: node
                    .child_by_field_name("operator")
                    .map(|op| self.owned_text(op))
                    .unwrap_or_default(),
                operand: Box::new(self.field_expr(node, "operand")),
            },
            "binary_expression" => Expr::Binary {
                op: node
                    .child_by_field_name("operator")
                    .map(|op| self.owned_text(op))
                    .unwrap_or_default(),
                lhs: Box::new(self.field_expr(node, "left")),
                rhs: Box::new(self.field_expr(node, "right")),
            },
            "index_expression" => Expr::Index {
                operand: Box::new(self.field_expr(node, "operand")),
                index: Box::new(self.field_expr(node, "index")),
            },
            "slice_expression" => Expr::Slice {
                operand: Box::new(self.field_expr(node, "operand")),
                bounds: ["start", "end", "capacity"]
                    .iter()
                    .filter_map(|field| node.child_by_field_name(field))
                    .map(|bound| self.expr(bound))
                    .collect(),
            },
            "type_assertion_expression" => Expr::TypeAssert {
                operand: Box::new(self.field_expr(node, "operand")),
                ty: node
                    .child_by_field_name("type")
                    .map(|t| self.type_expr(t))
                    .unwrap_or_else(|| TypeExpr::Other(String::new())),
            },
            "type_conversion_expression" => Expr::Call {
                func: Box::new(Expr::Type(
                    node.child_by_field_name("type")
                        .map(|t| self.type_expr(t))
                        .unwrap_or_else(|| TypeExpr::Other(String::new())),
                )),
                args: vec![self.field_expr(node, "operand")],
            },
            "type_instantiation_expression" => Expr::Type(
                node.child_by_field_name("type")
                    .map(|t| self.type_expr(t))
                    .unwrap_or_else(|| TypeExpr::Other(self.owned_text(node))),
            ),
            "func_literal" => Expr::FuncLit {
                params: node
                    .child_by_field_name("parameters")
                    .map(|p| self.field_list(p))
                    .unwrap_or_default(),
                results: node
                    .child_by_field_name("result")
                    .map(|r| self.result_list(r))
                    .unwrap_or_default(),
                body: node
                    .child_by_field_name("body")
                    .map(|b| self.block(b))
                    .unwrap_or_default(),
            },
            _ if LITERAL_KINDS.contains(&kind) => Expr::Lit(self.owned_text(node)),
            _ if TYPE_KINDS.contains(&kind) => Expr::Type(self.type_expr(node)),
            _ => Expr::Other(
                named_children(node)
                    .into_iter()
                    .map(|child| self.expr(child))
                    .collect(),
            ),
        }
    }

    fn literal_elements(&self, body: Node<'_>) -> Vec<Element> {
        named_children(body)
            .into_iter()
            .map(|element| {
                if element.kind() != "keyed_element" {
                    return Element::positional(self.expr(element));
                }
                let key = element.child_by_field_name("key");
                let value = element.child_by_field_name("value");
                match (key, value) {
                    (Some(key), Some(value)) => Element {
                        key: Some(self.expr(key)),
                        value: self.expr(value),
                    },
                    // Grammar revisions without key/value fields
                    _ => {
                        let parts = named_children(element);
                        Element {
                            key: parts.first().map(|k| self.expr(*k)),
                            value: parts
                                .get(1)
                                .map(|v| self.expr(*v))
                                .unwrap_or(Expr::Other(Vec::new())),
                        }
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::parser::parse_source;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn lower(source: &str) -> SourceFile {
        let ast = parse_source(source, Path::new("conv/conv.go")).unwrap();
        lower_source_file(&ast)
    }

    #[test]
    fn test_package_imports_and_types() {
        let file = lower(indoc! {r#"
            package conv

            import (
                "converters/model"
                db "converters/dbmodel"
            )

            type Target struct {
                Label, Price string
                *Base
                internal int `json:"-"`
            }

            type Alias = model.Sample
        "#});

        assert_eq!(file.package, "conv");
        assert_eq!(file.imports.len(), 2);
        assert_eq!(file.imports[0].local_name(), Some("model"));
        assert_eq!(file.imports[1].local_name(), Some("db"));

        assert_eq!(file.types.len(), 2);
        let TypeExpr::Struct(fields) = &file.types[0].ty else {
            panic!("expected struct type, got {:?}", file.types[0].ty);
        };
        assert_eq!(fields[0].names, vec!["Label", "Price"]);
        assert!(fields[1].embedded);
        assert_eq!(fields[1].ty, TypeExpr::pointer(TypeExpr::name("Base")));
        assert_eq!(fields[2].names, vec!["internal"]);

        assert!(file.types[1].alias);
        assert_eq!(file.types[1].ty, TypeExpr::qualified("model", "Sample"));
    }

    #[test]
    fn test_function_signature_grouping() {
        let file = lower(indoc! {r#"
            package conv

            func Convert(a, b Source, opts ...Option) (out *Target, err error) {
                return nil, nil
            }

            func Bare(s []*Source) map[string]Target { return nil }
        "#});

        let convert = &file.functions[0];
        assert_eq!(convert.name, "Convert");
        assert_eq!(convert.position.line, 3);
        assert_eq!(convert.params.arity(), 3);
        assert_eq!(convert.params.fields[0].names, vec!["a", "b"]);
        assert!(convert.params.fields[1].variadic);
        assert_eq!(convert.results.fields[0].names, vec!["out"]);
        assert_eq!(
            convert.results.fields[0].ty,
            TypeExpr::pointer(TypeExpr::name("Target"))
        );
        assert!(convert.header.starts_with("func Convert("));
        assert!(!convert.header.contains('{'));

        let bare = &file.functions[1];
        assert_eq!(
            bare.params.fields[0].ty,
            TypeExpr::slice(TypeExpr::pointer(TypeExpr::name("Source")))
        );
        assert_eq!(bare.results.fields.len(), 1);
        assert!(bare.results.fields[0].names.is_empty());
        assert_eq!(
            bare.results.fields[0].ty,
            TypeExpr::map(TypeExpr::name("string"), TypeExpr::name("Target"))
        );
    }

    #[test]
    fn test_method_receiver() {
        let file = lower(indoc! {r#"
            package conv

            func (c *Converter) Convert(s Source) Target { return Target{} }
        "#});
        let method = &file.functions[0];
        assert!(method.is_method());
        assert_eq!(method.name, "Convert");
    }

    #[test]
    fn test_body_selectors_assignments_and_literals() {
        let file = lower(indoc! {r#"
            package conv

            func Convert(s Source) *Target {
                _ = s.ID
                t := &Target{Label: s.Label, Price: s.Price}
                t.Currency += s.Currency
                return t
            }
        "#});

        let body = file.functions[0].body.as_ref().unwrap();
        assert_eq!(body.stmts.len(), 4);

        assert_eq!(
            body.stmts[0],
            Stmt::Assign {
                lhs: vec![Expr::ident("_")],
                op: AssignOp::Assign,
                rhs: vec![Expr::selector(Expr::ident("s"), "ID")],
            }
        );

        let Stmt::Assign { op, rhs, .. } = &body.stmts[1] else {
            panic!("expected define, got {:?}", body.stmts[1]);
        };
        assert_eq!(op, &AssignOp::Define);
        assert_eq!(
            rhs[0],
            Expr::address_of(Expr::Composite {
                ty: Some(TypeExpr::name("Target")),
                elements: vec![
                    Element::keyed("Label", Expr::selector(Expr::ident("s"), "Label")),
                    Element::keyed("Price", Expr::selector(Expr::ident("s"), "Price")),
                ],
            })
        );

        let Stmt::Assign { lhs, op, .. } = &body.stmts[2] else {
            panic!("expected compound assignment, got {:?}", body.stmts[2]);
        };
        assert_eq!(op, &AssignOp::Compound("+=".to_string()));
        assert_eq!(lhs[0], Expr::selector(Expr::ident("t"), "Currency"));

        assert_eq!(body.stmts[3], Stmt::Return(vec![Expr::ident("t")]));
    }

    #[test]
    fn test_control_flow_is_lowered() {
        let file = lower(indoc! {r#"
            package conv

            func Convert(in []Source) []Target {
                var out []Target
                for _, s := range in {
                    if s.Skip != nil {
                        continue
                    }
                    switch s.Kind {
                    case "a":
                        out = append(out, Target{Name: s.Name})
                    default:
                    }
                }
                return out
            }
        "#});

        let body = file.functions[0].body.as_ref().unwrap();
        assert!(matches!(body.stmts[0], Stmt::Decl(_)));
        let Stmt::Range { define, expr, body: loop_body, .. } = &body.stmts[1] else {
            panic!("expected range loop, got {:?}", body.stmts[1]);
        };
        assert!(define);
        assert_eq!(expr, &Expr::ident("in"));
        assert!(matches!(loop_body.stmts[0], Stmt::If { .. }));
        let Stmt::Switch { tag, clauses, .. } = &loop_body.stmts[1] else {
            panic!("expected switch, got {:?}", loop_body.stmts[1]);
        };
        assert_eq!(tag, &Some(Expr::selector(Expr::ident("s"), "Kind")));
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].body.len(), 1);
        assert!(clauses[1].body.is_empty());
    }

    #[test]
    fn test_positional_literal_has_no_keys() {
        let file = lower(indoc! {r#"
            package conv

            func Convert(s Source) *Target {
                return &Target{s.Label, s.Price}
            }
        "#});

        let body = file.functions[0].body.as_ref().unwrap();
        let Stmt::Return(values) = &body.stmts[0] else {
            panic!("expected return, got {:?}", body.stmts[0]);
        };
        let Expr::Unary { operand, .. } = &values[0] else {
            panic!("expected &T{{...}}, got {:?}", values[0]);
        };
        let Expr::Composite { elements, .. } = operand.as_ref() else {
            panic!("expected composite literal, got {operand:?}");
        };
        assert_eq!(elements.len(), 2);
        assert!(elements.iter().all(|element| element.key.is_none()));
    }
}
