//! Registry names a tree reads.
//!
//! A name counts when it is spelled as a bare identifier somewhere in the tree, is not shadowed by a local at that
//! point, and resolves against the registry. The result keeps first-occurrence order without duplicates.

use mvel_syntax::ast::{
    Block, CaseBody, CaseLabel, Expr, ForInit, LambdaBody, LocalDecl, Root, Spanned, Statement, SwitchBlock, Visitor,
    walk_expr, walk_local_decl, walk_statement,
};

use crate::config::TranslatorConfig;
use crate::registry::Registry;

pub(crate) fn referenced_names(root: &Root, registry: &Registry, config: &TranslatorConfig) -> Vec<String> {
    let mut collector = NameCollector {
        registry,
        iteration_variable: &config.iteration_variable,
        scopes: vec![Vec::new()],
        names: Vec::new(),
    };
    collector.visit_root(root);
    collector.names
}

struct NameCollector<'a> {
    registry: &'a Registry,
    iteration_variable: &'a str,
    scopes: Vec<Vec<String>>,
    names: Vec<String>,
}

impl NameCollector<'_> {
    fn declare(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.push(name.to_string());
        }
    }

    fn is_local(&self, name: &str) -> bool {
        self.scopes.iter().any(|scope| scope.iter().any(|n| n == name))
    }

    fn scoped(&mut self, names: &[&str], f: impl FnOnce(&mut Self)) {
        self.scopes.push(names.iter().map(|n| n.to_string()).collect());
        f(self);
        self.scopes.pop();
    }

    fn record(&mut self, name: &str) {
        if self.is_local(name) || self.registry.resolve_root(name).is_none() {
            return;
        }
        if !self.names.iter().any(|n| n == name) {
            self.names.push(name.to_string());
        }
    }
}

impl Visitor for NameCollector<'_> {
    fn visit_block(&mut self, block: &Block) {
        self.scoped(&[], |v| {
            for stmt in &block.statements {
                v.visit_statement(stmt);
            }
        });
    }

    fn visit_local_decl(&mut self, decl: &LocalDecl) {
        walk_local_decl(self, decl);
        for d in &decl.declarators {
            self.declare(&d.name);
        }
    }

    fn visit_statement(&mut self, stmt: &Spanned<Statement>) {
        match &stmt.node {
            Statement::For(s) if matches!(s.init, ForInit::Decl(_)) => {
                self.scoped(&[], |v| walk_statement(v, stmt));
            }
            Statement::ForEach(s) => {
                self.visit_expr(&s.iterable);
                self.scoped(&[s.name.as_str()], |v| v.visit_statement(&s.body));
            }
            Statement::Try(s) => {
                self.visit_block(&s.body);
                for clause in &s.catches {
                    self.scoped(&[clause.name.as_str()], |v| v.visit_block(&clause.body));
                }
                if let Some(finally) = &s.finally {
                    self.visit_block(finally);
                }
            }
            _ => walk_statement(self, stmt),
        }
    }

    fn visit_switch(&mut self, switch: &SwitchBlock) {
        self.visit_expr(&switch.selector);
        for case in &switch.cases {
            let bindings: Vec<&str> = case
                .node
                .labels
                .iter()
                .filter_map(|label| match label {
                    CaseLabel::Pattern { binding, .. } => Some(binding.as_str()),
                    _ => None,
                })
                .collect();
            self.scoped(&bindings, |v| {
                for label in &case.node.labels {
                    if let CaseLabel::Expr(e) = label {
                        v.visit_expr(e);
                    }
                }
                if let Some(guard) = &case.node.guard {
                    v.visit_expr(guard);
                }
                match &case.node.body {
                    CaseBody::Statements(stmts) => stmts.iter().for_each(|s| v.visit_statement(s)),
                    CaseBody::Expr(e) | CaseBody::Throw(e) => v.visit_expr(e),
                    CaseBody::Block(block) => v.visit_block(block),
                }
            });
        }
    }

    fn visit_expr(&mut self, expr: &Spanned<Expr>) {
        match &expr.node {
            Expr::Ident(name) => self.record(name),
            // A bare callee names a function, not a value.
            Expr::Call(callee, args) if matches!(callee.node, Expr::Ident(_)) => {
                args.iter().for_each(|a| self.visit_expr(a));
            }
            Expr::Lambda(lambda) => {
                let params: Vec<&str> = lambda.params.iter().map(String::as_str).collect();
                self.scoped(&params, |v| match &lambda.body {
                    LambdaBody::Expr(body) => v.visit_expr(body),
                    LambdaBody::Block(block) => v.visit_block(block),
                });
            }
            Expr::Projection(collection, body) | Expr::Selection(collection, body) => {
                self.visit_expr(collection);
                let it = self.iteration_variable;
                self.scoped(&[it], |v| v.visit_expr(body));
            }
            Expr::TypeTest(test) => {
                self.visit_expr(&test.expr);
                if let Some(binding) = &test.binding {
                    self.declare(binding);
                }
            }
            _ => walk_expr(self, expr),
        }
    }
}

#[cfg(test)]
mod tests {
    use mvel_syntax::ast::ParseMode;
    use mvel_syntax::parser::parse_source;

    use super::referenced_names;
    use crate::config::TranslatorConfig;
    use crate::translator::tests::person_registry;

    fn names(source: &str, mode: ParseMode) -> Vec<String> {
        let root = parse_source(source, mode).unwrap();
        referenced_names(&root, &person_registry(), &TranslatorConfig::default())
    }

    #[test]
    fn test_first_occurrence_order_without_duplicates() {
        assert_eq!(names("total + p.salary + total", ParseMode::Expression), ["total", "p"]);
    }

    #[test]
    fn test_unbound_names_are_ignored() {
        assert_eq!(names("x + y.name", ParseMode::Expression), Vec::<String>::new());
    }

    #[test]
    fn test_locals_shadow_registry_names() {
        assert_eq!(names("int count = 1; count + total;", ParseMode::Program), ["total"]);
        assert_eq!(names("count + 1; int count = 2;", ParseMode::Program), ["count"]);
        assert_eq!(names("for (var p : list) { p.name; }", ParseMode::Program), ["list"]);
    }

    #[test]
    fn test_lambda_params_and_iteration_variable_are_local() {
        assert_eq!(names("list.{item * count}", ParseMode::Expression), ["list", "count"]);
        assert_eq!(names("list.stream().map(p -> p.age)", ParseMode::Expression), ["list"]);
    }

    #[test]
    fn test_callee_is_not_a_reference() {
        assert_eq!(names("p(total)", ParseMode::Expression), ["total"]);
    }

    #[test]
    fn test_scope_ends_with_block() {
        assert_eq!(names("{ int p = 1; } p.age;", ParseMode::Program), ["p"]);
    }
}
