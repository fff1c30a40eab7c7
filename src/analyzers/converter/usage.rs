//! Read-side usage collection: which fields and methods of a variable a
//! function body touches.
//!
//! Purely syntactic. Every branch counts, reachable or not.

use crate::core::ast::{Block, Expr};
use crate::core::visit::{self, Visit};
use std::collections::HashSet;

/// Set of identifiers observed in a body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageLookup {
    names: HashSet<String>,
}

impl UsageLookup {
    pub fn look_up(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for UsageLookup {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// `var.X` anywhere in the body records `X`.
pub fn collect_used_fields(body: &Block, var: &str) -> UsageLookup {
    let mut collector = SelectorCollector {
        var,
        names: HashSet::new(),
    };
    collector.visit_block(body);
    UsageLookup {
        names: collector.names,
    }
}

/// `var.X(...)` anywhere in the body records `X`.
pub fn collect_used_methods(body: &Block, var: &str) -> UsageLookup {
    let mut collector = MethodCallCollector {
        var,
        names: HashSet::new(),
    };
    collector.visit_block(body);
    UsageLookup {
        names: collector.names,
    }
}

/// Field name of `expr` when it is exactly `var.<field>`.
pub(super) fn selected_field<'e>(expr: &'e Expr, var: &str) -> Option<&'e str> {
    match expr {
        Expr::Selector { operand, field } if operand.is_ident(var) => Some(field),
        _ => None,
    }
}

struct SelectorCollector<'a> {
    var: &'a str,
    names: HashSet<String>,
}

impl<'ast> Visit<'ast> for SelectorCollector<'_> {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        if let Some(field) = selected_field(expr, self.var) {
            self.names.insert(field.to_string());
        }
        visit::visit_expr(self, expr);
    }
}

struct MethodCallCollector<'a> {
    var: &'a str,
    names: HashSet<String>,
}

impl<'ast> Visit<'ast> for MethodCallCollector<'_> {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        if let Expr::Call { func, .. } = expr {
            if let Some(method) = selected_field(func, self.var) {
                self.names.insert(method.to_string());
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

    fn body(source: &str) -> Block {
        let file = parse_go_file(Path::new("conv/conv.go"), source).unwrap();
        file.functions
            .into_iter()
            .next()
            .and_then(|f| f.body)
            .unwrap()
    }

    #[test]
    fn test_fields_found_in_every_nesting() {
        let body = body(indoc! {r#"
            package conv

            func Convert(s Source) Target {
                if s.Active != nil {
                    return Target{}
                }
                for _, item := range s.Items {
                    go func() { log(item, s.Owner.Name) }()
                }
                switch {
                case s.Kind == "x":
                    defer release(s.Lock)
                }
                m := map[string]int{s.Key: 1}
                return Target{Name: strings.ToUpper(s.Name), Tags: s.Tags[:n]}
            }
        "#});

        let used = collect_used_fields(&body, "s");
        for field in ["Active", "Items", "Owner", "Kind", "Lock", "Key", "Name", "Tags"] {
            assert!(used.look_up(field), "expected {field} to be recorded");
        }
        assert!(!used.look_up("ToUpper"), "other operands must not count");
        assert_eq!(used.len(), 8);
    }

    #[test]
    fn test_other_variables_and_deeper_selectors_ignored() {
        let body = body(indoc! {r#"
            package conv

            func Convert(s Source) Target {
                other := s
                _ = other.Label
                _ = s2.Price
                _ = s.Owner.Name
                return Target{}
            }
        "#});

        let used = collect_used_fields(&body, "s");
        assert!(used.look_up("Owner"));
        assert!(!used.look_up("Name"));
        assert!(!used.look_up("Label"));
        assert!(!used.look_up("Price"));
    }

    #[test]
    fn test_method_calls() {
        let body = body(indoc! {r#"
            package conv

            func Convert(s Source) Target {
                f := s.GetPrice
                return Target{Label: s.GetLabel(), Price: f()}
            }
        "#});

        let methods = collect_used_methods(&body, "s");
        assert!(methods.look_up("GetLabel"));
        assert!(!methods.look_up("GetPrice"), "method values are not calls");
        assert_eq!(methods.len(), 1);

        let fields = collect_used_fields(&body, "s");
        assert!(fields.look_up("GetLabel"));
        assert!(fields.look_up("GetPrice"));
    }

    #[test]
    fn test_usage_lookup_from_iter() {
        let lookup: UsageLookup = ["A", "B"].into_iter().collect();
        assert!(lookup.look_up("A"));
        assert!(!lookup.look_up("C"));
        assert!(UsageLookup::default().is_empty());
    }
}
