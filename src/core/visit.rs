//! Read-only traversal of function bodies.
//!
//! Same shape as `syn::visit`: every `visit_*` method defaults to the free
//! function of the same name, which walks the node's children. Implementors
//! override the hooks they care about and call the free function to keep
//! descending.

use super::ast::{Block, CaseClause, Element, Expr, Stmt, ValueSpec};

pub trait Visit<'ast> {
    fn visit_block(&mut self, block: &'ast Block) {
        visit_block(self, block);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        visit_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        visit_expr(self, expr);
    }

    fn visit_case_clause(&mut self, clause: &'ast CaseClause) {
        visit_case_clause(self, clause);
    }

    fn visit_value_spec(&mut self, spec: &'ast ValueSpec) {
        visit_value_spec(self, spec);
    }

    fn visit_element(&mut self, element: &'ast Element) {
        visit_element(self, element);
    }
}

pub fn visit_block<'ast, V>(v: &mut V, block: &'ast Block)
where
    V: Visit<'ast> + ?Sized,
{
    for stmt in &block.stmts {
        v.visit_stmt(stmt);
    }
}

pub fn visit_stmt<'ast, V>(v: &mut V, stmt: &'ast Stmt)
where
    V: Visit<'ast> + ?Sized,
{
    match stmt {
        Stmt::Expr(expr) | Stmt::Go(expr) | Stmt::Defer(expr) => v.visit_expr(expr),
        Stmt::Assign { lhs, rhs, .. } => {
            for expr in lhs.iter().chain(rhs) {
                v.visit_expr(expr);
            }
        }
        Stmt::IncDec { target, .. } => v.visit_expr(target),
        Stmt::Send { channel, value } => {
            v.visit_expr(channel);
            v.visit_expr(value);
        }
        Stmt::Return(values) => {
            for expr in values {
                v.visit_expr(expr);
            }
        }
        Stmt::Decl(specs) => {
            for spec in specs {
                v.visit_value_spec(spec);
            }
        }
        Stmt::Block(block) => v.visit_block(block),
        Stmt::If {
            init,
            cond,
            then,
            otherwise,
        } => {
            if let Some(init) = init {
                v.visit_stmt(init);
            }
            v.visit_expr(cond);
            v.visit_block(then);
            if let Some(otherwise) = otherwise {
                v.visit_stmt(otherwise);
            }
        }
        Stmt::For {
            init,
            cond,
            post,
            body,
        } => {
            if let Some(init) = init {
                v.visit_stmt(init);
            }
            if let Some(cond) = cond {
                v.visit_expr(cond);
            }
            if let Some(post) = post {
                v.visit_stmt(post);
            }
            v.visit_block(body);
        }
        Stmt::Range { lhs, expr, body, .. } => {
            for target in lhs {
                v.visit_expr(target);
            }
            v.visit_expr(expr);
            v.visit_block(body);
        }
        Stmt::Switch { init, tag, clauses } => {
            if let Some(init) = init {
                v.visit_stmt(init);
            }
            if let Some(tag) = tag {
                v.visit_expr(tag);
            }
            for clause in clauses {
                v.visit_case_clause(clause);
            }
        }
        Stmt::TypeSwitch {
            init,
            subject,
            clauses,
            ..
        } => {
            if let Some(init) = init {
                v.visit_stmt(init);
            }
            v.visit_expr(subject);
            for clause in clauses {
                v.visit_case_clause(clause);
            }
        }
        Stmt::Select { clauses } => {
            for clause in clauses {
                v.visit_case_clause(clause);
            }
        }
        Stmt::Labeled { stmt, .. } => {
            if let Some(stmt) = stmt {
                v.visit_stmt(stmt);
            }
        }
        Stmt::TypeDecl(_) | Stmt::Branch(_) | Stmt::Empty => {}
    }
}

pub fn visit_expr<'ast, V>(v: &mut V, expr: &'ast Expr)
where
    V: Visit<'ast> + ?Sized,
{
    match expr {
        Expr::Selector { operand, .. } => v.visit_expr(operand),
        Expr::Call { func, args } => {
            v.visit_expr(func);
            for arg in args {
                v.visit_expr(arg);
            }
        }
        Expr::Composite { elements, .. } => {
            for element in elements {
                v.visit_element(element);
            }
        }
        Expr::Unary { operand, .. } | Expr::Paren(operand) => v.visit_expr(operand),
        Expr::TypeAssert { operand, .. } => v.visit_expr(operand),
        Expr::Binary { lhs, rhs, .. } => {
            v.visit_expr(lhs);
            v.visit_expr(rhs);
        }
        Expr::Index { operand, index } => {
            v.visit_expr(operand);
            v.visit_expr(index);
        }
        Expr::Slice { operand, bounds } => {
            v.visit_expr(operand);
            for bound in bounds {
                v.visit_expr(bound);
            }
        }
        Expr::FuncLit { body, .. } => v.visit_block(body),
        Expr::Other(children) => {
            for child in children {
                v.visit_expr(child);
            }
        }
        Expr::Ident(_) | Expr::Type(_) | Expr::Lit(_) => {}
    }
}

pub fn visit_case_clause<'ast, V>(v: &mut V, clause: &'ast CaseClause)
where
    V: Visit<'ast> + ?Sized,
{
    for value in &clause.values {
        v.visit_expr(value);
    }
    if let Some(comm) = &clause.comm {
        v.visit_stmt(comm);
    }
    for stmt in &clause.body {
        v.visit_stmt(stmt);
    }
}

pub fn visit_value_spec<'ast, V>(v: &mut V, spec: &'ast ValueSpec)
where
    V: Visit<'ast> + ?Sized,
{
    for value in &spec.values {
        v.visit_expr(value);
    }
}

pub fn visit_element<'ast, V>(v: &mut V, element: &'ast Element)
where
    V: Visit<'ast> + ?Sized,
{
    if let Some(key) = &element.key {
        v.visit_expr(key);
    }
    v.visit_expr(&element.value);
}
