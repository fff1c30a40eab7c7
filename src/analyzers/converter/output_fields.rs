//! Write-side usage collection for a converter's output record.
//!
//! A named result is written through `out.F = ...` (or a compound
//! assignment). An anonymous result is written through keyed composite
//! literals of the output type. Positional literals (`Target{a, b}`) record
//! nothing.

use super::usage::{selected_field, UsageLookup};
use crate::core::ast::{AssignOp, Expr, FuncDecl, Stmt, TypeExpr};
use crate::core::visit::{self, Visit};
use std::collections::HashSet;

/// Fields of the output value that `func` writes.
///
/// `out_var` is the named result, empty for an anonymous result; `type_name`
/// is the output record's declared name.
pub fn collect_output_fields(func: &FuncDecl, out_var: &str, type_name: &str) -> UsageLookup {
    let Some(body) = &func.body else {
        return UsageLookup::default();
    };

    let names = if out_var.is_empty() {
        let mut collector = KeyedLiteralCollector {
            type_name,
            names: HashSet::new(),
        };
        collector.visit_block(body);
        collector.names
    } else {
        let mut collector = FieldAssignCollector {
            var: out_var,
            names: HashSet::new(),
        };
        collector.visit_block(body);
        collector.names
    };
    names.into_iter().collect()
}

struct FieldAssignCollector<'a> {
    var: &'a str,
    names: HashSet<String>,
}

impl<'ast> Visit<'ast> for FieldAssignCollector<'_> {
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        if let Stmt::Assign {
            lhs,
            op: AssignOp::Assign | AssignOp::Compound(_),
            ..
        } = stmt
        {
            self.names.extend(
                lhs.iter()
                    .filter_map(|target| selected_field(target, self.var))
                    .map(str::to_string),
            );
        }
        visit::visit_stmt(self, stmt);
    }
}

struct KeyedLiteralCollector<'a> {
    type_name: &'a str,
    names: HashSet<String>,
}

impl KeyedLiteralCollector<'_> {
    fn constructs_output(&self, ty: &TypeExpr) -> bool {
        let base = match ty {
            TypeExpr::Pointer(inner) => inner.base_name(),
            other => other.base_name(),
        };
        base == Some(self.type_name)
    }
}

impl<'ast> Visit<'ast> for KeyedLiteralCollector<'_> {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        if let Expr::Composite {
            ty: Some(ty),
            elements,
        } = expr
        {
            if self.constructs_output(ty) {
                for element in elements {
                    if let Some(Expr::Ident(key)) = &element.key {
                        self.names.insert(key.clone());
                    }
                }
            }
        }
        visit::visit_expr(self, expr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::parse_go_file;
    use indoc::indoc;
    use std::path::Path;

    fn func(source: &str) -> FuncDecl {
        let file = parse_go_file(Path::new("conv/conv.go"), source).unwrap();
        file.functions.into_iter().next().unwrap()
    }

    #[test]
    fn test_named_result_assignments() {
        let f = func(indoc! {r#"
            package conv

            func Convert(s Source) (out *Target) {
                out = &Target{Ignored: s.Label}
                out.Label = s.Label
                if s.Price > 0 {
                    out.Price += s.Price
                }
                out.Count++
                _ = out.Currency
                other.Name = s.Name
                return out
            }
        "#});

        let written = collect_output_fields(&f, "out", "Target");
        assert!(written.look_up("Label"));
        assert!(written.look_up("Price"));
        assert!(!written.look_up("Ignored"), "literals do not count for named results");
        assert!(!written.look_up("Count"), "increments are not assignments");
        assert!(!written.look_up("Currency"), "reads are not writes");
        assert!(!written.look_up("Name"));
        assert_eq!(written.len(), 2);
    }

    #[test]
    fn test_anonymous_result_keyed_literals() {
        let f = func(indoc! {r#"
            package conv

            func Convert(s Source) *dbmodel.Target {
                if s.Empty == "" {
                    return &dbmodel.Target{Label: s.Label}
                }
                t := dbmodel.Target{Price: s.Price}
                _ = Other{Currency: s.Currency}
                return &t
            }
        "#});

        let written = collect_output_fields(&f, "", "Target");
        assert!(written.look_up("Label"));
        assert!(written.look_up("Price"));
        assert!(!written.look_up("Currency"), "literals of other types do not count");
    }

    #[test]
    fn test_positional_literals_record_nothing() {
        let f = func(indoc! {r#"
            package conv

            func Convert(s Source) *Target {
                return &Target{s.Label, s.Price}
            }
        "#});

        assert!(collect_output_fields(&f, "", "Target").is_empty());
    }

    #[test]
    fn test_nested_literals_inside_closures() {
        let f = func(indoc! {r#"
            package conv

            func Convert(s Source) Target {
                build := func() Target {
                    return Target{Label: s.Label}
                }
                return build()
            }
        "#});

        assert!(collect_output_fields(&f, "", "Target").look_up("Label"));
    }
}
