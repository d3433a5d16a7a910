//! Collection queries, mutation and predicate blocks, and coercion.
//!
//! ## Notes
//! - Projection and selection bind the configured iteration variable; inside their bodies (and inside predicate
//!   blocks) an unbound lower-case name reads a property of the current element, and `$` is the element itself.
//! - A mutation block in expression position becomes a setter chain on the subject. As a statement on a simple
//!   subject it becomes one statement per entry, so setters need not return the receiver.

use mvel_core::lang::conventions;
use mvel_syntax::ast::{BinaryOp, Expr, MutationEntry, Spanned};

use super::context::Context;

impl<'a> Context<'a> {
    /// `c.{e}` → `c.stream().map(item -> e).collect(...)`
    pub(crate) fn projection(&self, collection: &Spanned<Expr>, body: &Spanned<Expr>) -> String {
        self.pipeline(collection, body, "map")
    }

    /// `c.?(e)` → `c.stream().filter(item -> e).collect(...)`
    pub(crate) fn selection(&self, collection: &Spanned<Expr>, body: &Spanned<Expr>) -> String {
        self.pipeline(collection, body, "filter")
    }

    fn pipeline(&self, collection: &Spanned<Expr>, body: &Spanned<Expr>, step: &str) -> String {
        let it = self.config.iteration_variable.as_str();
        let element = self.static_type(collection).and_then(|t| t.element_type());
        let scope = self.with_local(it, element).with_subject(it);
        format!(
            "{}.stream().{step}({it} -> {}).collect(Collectors.toList())",
            self.receiver(collection),
            scope.expr(body)
        )
    }

    /// `e#T`: a parse call for text converted to a number, else a cast.
    pub(crate) fn coercion(&self, inner: &Spanned<Expr>, type_name: &str) -> String {
        let text = self.expr(inner);
        let target = self.registry.qualify_type(type_name).unwrap_or(type_name);
        let simple = conventions::simple_name(target);

        if self.is_textual(inner) && !matches!(simple, "String" | "CharSequence" | "Object") {
            if let Some(parse) = conventions::boxed_type(simple).and_then(|b| b.parse_method) {
                return format!("{parse}({text})");
            }
            if conventions::is_arbitrary_precision(simple) {
                return format!("new {simple}({text})");
            }
        }
        if !self.registry.is_type_name(type_name) && conventions::boxed_type(simple).is_none() {
            tracing::debug!(rule = "coercion", target = type_name, branch = "cast", "target is not a registered type");
        }
        format!("(({target}) {text})")
    }

    /// `obj{ f = v, m(x) }` → `(obj.setF(v).m(x))`
    pub(crate) fn mutation_chain(&self, subject: &Spanned<Expr>, entries: &[MutationEntry]) -> String {
        if entries.is_empty() {
            return self.expr(subject);
        }
        format!("({})", self.setter_chain(subject, entries))
    }

    fn setter_chain(&self, subject: &Spanned<Expr>, entries: &[MutationEntry]) -> String {
        let mut out = self.receiver(subject);
        for entry in entries {
            match entry {
                MutationEntry::Assign { field, value } => {
                    if self.is_public_member(subject, field) {
                        tracing::debug!(
                            rule = "assignment",
                            field = field.as_str(),
                            branch = "mutator",
                            "public field in a setter chain is written through its mutator"
                        );
                    }
                    out.push_str(&format!(
                        ".{}({})",
                        conventions::mutator_name(field),
                        self.mutation_value(subject, field, value)
                    ));
                }
                MutationEntry::Expr(e) => {
                    out.push('.');
                    out.push_str(&self.mutation_step(subject, e));
                }
            }
        }
        out
    }

    /// A mutation block used as a statement: one statement per entry on a simple subject, else a single setter
    /// chain statement.
    pub(crate) fn mutation_statements(&self, subject: &Spanned<Expr>, entries: &[MutationEntry]) -> Vec<String> {
        if !is_stable_subject(subject) {
            return vec![format!("{};", self.setter_chain(subject, entries))];
        }
        let object = self.receiver(subject);
        entries
            .iter()
            .map(|entry| match entry {
                MutationEntry::Assign { field, value } if self.is_public_member(subject, field) => {
                    format!("{object}.{field} = {};", self.expr(value))
                }
                MutationEntry::Assign { field, value } => format!(
                    "{object}.{}({});",
                    conventions::mutator_name(field),
                    self.mutation_value(subject, field, value)
                ),
                MutationEntry::Expr(e) => format!("{object}.{};", self.mutation_step(subject, e)),
            })
            .collect()
    }

    fn mutation_value(&self, subject: &Spanned<Expr>, field: &str, value: &Spanned<Expr>) -> String {
        let field_type = self
            .static_type(subject)
            .and_then(|t| self.registry.member_type(&t, field).cloned());
        self.coerce_value(value, field_type.as_ref())
    }

    /// The part of an expression entry applied to the subject: `m(x)` or the entry itself.
    fn mutation_step(&self, subject: &Spanned<Expr>, e: &Spanned<Expr>) -> String {
        match &e.node {
            Expr::Call(callee, args) => match &callee.node {
                Expr::Ident(name) => format!("{name}({})", self.expr_list(args)),
                _ => self.expr(e),
            },
            Expr::MethodCall(recv, name, args) if recv.node == subject.node => {
                format!("{name}({})", self.expr_list(args))
            }
            _ => self.expr(e),
        }
    }

    /// `obj[t1, t2]` → `(t1 && t2)` with bare names read from `obj`.
    pub(crate) fn predicate_block(&self, subject: &Spanned<Expr>, tests: &[Spanned<Expr>]) -> String {
        if tests.is_empty() {
            return "true".to_string();
        }
        let scope = self.with_subject(self.receiver(subject));
        let parts: Vec<String> = tests
            .iter()
            .map(|t| {
                let text = scope.expr(t);
                if binds_looser_than_and(&t.node) { format!("({text})") } else { text }
            })
            .collect();
        format!("({})", parts.join(" && "))
    }
}

/// A subject that can be repeated without re-running side effects.
fn is_stable_subject(e: &Spanned<Expr>) -> bool {
    match &e.node {
        Expr::Ident(_) | Expr::This => true,
        Expr::Field(recv, _) | Expr::Paren(recv) => is_stable_subject(recv),
        _ => false,
    }
}

fn binds_looser_than_and(e: &Expr) -> bool {
    matches!(
        e,
        Expr::Binary(_, BinaryOp::Or, _) | Expr::Ternary(..) | Expr::Assign(..) | Expr::Lambda(_)
    )
}

#[cfg(test)]
mod tests {
    use crate::registry::{Declaration, Registry, TypeDescriptor};
    use crate::translator::tests::{expr, person_registry, program};

    #[test]
    fn test_projection_and_selection() {
        let registry = person_registry();
        assert_eq!(
            expr("list.{item * 2}", &registry),
            "list.stream().map(item -> item * 2).collect(Collectors.toList())"
        );
        assert_eq!(
            expr("list.?(item > 5)", &registry),
            "list.stream().filter(item -> item > 5).collect(Collectors.toList())"
        );
    }

    #[test]
    fn test_dollar_is_the_current_element() {
        let registry = person_registry();
        assert_eq!(
            expr("list.?($ > 5)", &registry),
            "list.stream().filter(item -> item > 5).collect(Collectors.toList())"
        );
    }

    #[test]
    fn test_projection_reads_element_properties() {
        let registry = person_registry();
        assert_eq!(
            expr("people.{name}", &registry),
            "people.stream().map(item -> item.getName()).collect(Collectors.toList())"
        );
        assert_eq!(
            expr("p.getAddresses().?(city == \"Rome\")", &registry),
            "p.getAddresses().stream().filter(item -> item.getCity() == \"Rome\").collect(Collectors.toList())"
        );
    }

    #[test]
    fn test_mutation_block_chain() {
        let registry = person_registry();
        assert_eq!(
            expr("p{ name = \"Bob\", age = 30 }", &registry),
            "(p.setName(\"Bob\").setAge(30))"
        );
        assert_eq!(expr("p{ salary = 10 }", &registry), "(p.setSalary(new BigDecimal(\"10\")))");
        assert_eq!(expr("p{ name = \"x\", addAddress(a) }", &registry), "(p.setName(\"x\").addAddress(a))");
        assert_eq!(expr("p{}", &registry), "p");
    }

    #[test]
    fn test_mutation_block_statement() {
        let registry = person_registry();
        assert_eq!(
            program("p{ name = \"Bob\", age = 30 };", &registry),
            "p.setName(\"Bob\");\np.setAge(30);"
        );
        assert_eq!(program("foo{ nickName = \"x\" };", &registry), "foo.nickName = \"x\";");
        assert_eq!(
            program("new Person(){ name = \"x\" };", &registry),
            "new org.mvel3.Person().setName(\"x\");"
        );
    }

    #[test]
    fn test_predicate_block() {
        let registry = person_registry();
        assert_eq!(
            expr("p[age > 18, name == \"Bob\"]", &registry),
            "(p.getAge() > 18 && p.getName() == \"Bob\")"
        );
        assert_eq!(expr("p[a || b, c > 1]", &registry), "((p.getA() || p.getB()) && p.getC() > 1)");
        assert_eq!(expr("p[count > 1]", &registry), "(count > 1)");
        assert_eq!(expr("p[]", &registry), "true");
    }

    #[test]
    fn test_coercion() {
        let registry = Registry::build([Declaration::new("s", TypeDescriptor::new("String"))])
            .unwrap()
            .with_type_names(["org.mvel3.Person"]);
        assert_eq!(expr("s#Integer", &registry), "Integer.parseInt(s)");
        assert_eq!(expr("\"1.5\"#BigDecimal", &registry), "new BigDecimal(\"1.5\")");
        assert_eq!(expr("o#Person", &registry), "((org.mvel3.Person) o)");
        assert_eq!(expr("o#\"java.util.List\"", &registry), "((java.util.List) o)");
        assert_eq!(expr("(o#Person).name", &registry), "((org.mvel3.Person) o).getName()");
    }
}
