//! Expression dispatch, literals, collections, and object creation.

use mvel_core::lang::conventions;
use mvel_syntax::ast::{Creator, Expr, Lambda, LambdaBody, Literal, MapEntry, Spanned, TypeRef};

use super::context::Context;

/// `Map.of` accepts at most this many key/value pairs.
const MAP_OF_MAX_PAIRS: usize = 10;

impl<'a> Context<'a> {
    /// Translate one expression. Exhaustive over every expression kind.
    pub(crate) fn expr(&self, e: &Spanned<Expr>) -> String {
        match &e.node {
            Expr::Literal(lit) => literal(lit),
            Expr::Ident(name) => self.ident(name),
            Expr::This => "this".to_string(),
            Expr::Super => "super".to_string(),
            Expr::SuperField(name) => format!("super.{name}"),
            Expr::New(creator) => self.creator(creator),
            Expr::List(items) => format!("List.of({})", self.expr_list(items)),
            Expr::Map(entries) => self.map_literal(entries),
            Expr::ArrayInit(items) => format!("{{{}}}", self.expr_list(items)),
            Expr::Empty => "java.util.Collections.emptyList()".to_string(),
            Expr::Nil | Expr::Undefined => "null".to_string(),
            Expr::Paren(inner) => {
                if is_self_parenthesized(&inner.node) {
                    self.expr(inner)
                } else {
                    format!("({})", self.expr(inner))
                }
            }

            Expr::Field(recv, name) => self.field_access(recv, name),
            Expr::Index(recv, index) => self.index_access(recv, index),
            Expr::SafeField(..) | Expr::SafeIndex(..) | Expr::SafeMethodCall(..) => self.guarded_access(e),
            Expr::Call(callee, args) => match (&callee.node, &self.subject) {
                (Expr::Ident(name), Some(subject)) if self.is_subject_property(name) => {
                    format!("{subject}.{name}({})", self.expr_list(args))
                }
                (Expr::Ident(name), _) => format!("{name}({})", self.expr_list(args)),
                _ => format!("{}({})", self.expr(callee), self.expr_list(args)),
            },
            Expr::MethodCall(recv, name, args) => {
                format!("{}.{name}({})", self.receiver(recv), self.expr_list(args))
            }
            Expr::MethodRef(target, name) => format!("{}::{name}", self.expr(target)),

            Expr::Postfix(..) | Expr::Prefix(..) => self.increment(e),
            Expr::Unary(op, operand) => self.unary(*op, operand),
            Expr::Binary(lhs, op, rhs) => self.binary(lhs, *op, rhs),
            Expr::TypeTest(test) => {
                let binding = test.binding.as_deref().map(|b| format!(" {b}")).unwrap_or_default();
                format!("{} instanceof {}{binding}", self.expr(&test.expr), self.type_ref(&test.ty))
            }
            Expr::Cast(ty, operand) => format!("({}) {}", self.type_ref(ty), self.expr(operand)),
            Expr::Ternary(cond, then, otherwise) => {
                format!("{} ? {} : {}", self.expr(cond), self.expr(then), self.expr(otherwise))
            }
            Expr::Assign(target, op, value) => self.assignment(target, *op, value),

            Expr::Projection(collection, body) => self.projection(collection, body),
            Expr::Selection(collection, body) => self.selection(collection, body),
            Expr::IsDef(inner) => format!("({} != null)", self.expr(inner)),
            Expr::RegexMatch(text, pattern) => {
                format!("{}.matcher({}).matches()", self.receiver(pattern), self.expr(text))
            }
            Expr::Coercion(inner, target) => self.coercion(inner, target.type_name()),
            Expr::MutationBlock(subject, entries) => self.mutation_chain(subject, entries),
            Expr::PredicateBlock(subject, tests) => self.predicate_block(subject, tests),

            Expr::Lambda(lambda) => self.lambda(lambda),
            Expr::Switch(switch) => self.switch_expression(switch),
        }
    }

    /// Comma-separated translations.
    pub(crate) fn expr_list(&self, items: &[Spanned<Expr>]) -> String {
        items.iter().map(|e| self.expr(e)).collect::<Vec<_>>().join(", ")
    }

    /// Translation of `e` as the receiver of a member access, parenthesized unless it is a primary.
    pub(crate) fn receiver(&self, e: &Spanned<Expr>) -> String {
        let text = self.expr(e);
        if is_primary(&e.node) { text } else { format!("({text})") }
    }

    /// Right operand spliced after an infix operator, grouped unless it binds at least as tightly.
    pub(crate) fn operand(&self, e: &Spanned<Expr>) -> String {
        let text = self.expr(e);
        let tight = matches!(e.node, Expr::Unary(..) | Expr::Cast(..));
        if tight || is_primary(&e.node) { text } else { format!("({text})") }
    }

    /// A bare name. Inside a predicate block, unbound lower-case names are properties of the subject.
    fn ident(&self, name: &str) -> String {
        if let Some(subject) = &self.subject {
            if name == "$" {
                return subject.clone();
            }
            if self.is_subject_property(name) {
                return format!("{subject}.{}()", conventions::accessor_name(name));
            }
        }
        name.to_string()
    }

    pub(crate) fn is_subject_property(&self, name: &str) -> bool {
        name.starts_with(|c: char| c.is_ascii_lowercase())
            && !self.is_local(name)
            && self.registry.resolve_root(name).is_none()
            && !self.registry.is_type_name(name)
            && !self.policy.is_namespace_segment(name)
    }

    /// A type as written in source, with a bare name expanded to its registered qualified spelling.
    pub(crate) fn type_ref(&self, ty: &TypeRef) -> String {
        match self.registry.qualify_type(&ty.name) {
            Some(qualified) => TypeRef {
                name: qualified.to_string(),
                ..ty.clone()
            }
            .to_string(),
            None => ty.to_string(),
        }
    }

    fn creator(&self, creator: &Creator) -> String {
        match creator {
            Creator::Class { ty, args } => format!("new {}({})", self.type_ref(ty), self.expr_list(args)),
            Creator::Array { ty, sizes, extra_dims } => {
                let sized: String = sizes.iter().map(|s| format!("[{}]", self.expr(s))).collect();
                format!("new {}{sized}{}", self.type_ref(ty), "[]".repeat(*extra_dims))
            }
            Creator::ArrayInit { ty, elements } => {
                format!("new {}{{{}}}", self.type_ref(ty), self.expr_list(elements))
            }
        }
    }

    /// `Map.of(k, v, ...)`; larger literals use `Map.ofEntries`. Identifier keys are quoted.
    fn map_literal(&self, entries: &[MapEntry]) -> String {
        let pairs: Vec<(String, String)> = entries
            .iter()
            .map(|entry| {
                let key = match &entry.key.node {
                    Expr::Ident(name) => format!("\"{name}\""),
                    _ => self.expr(&entry.key),
                };
                (key, self.expr(&entry.value))
            })
            .collect();
        if pairs.len() <= MAP_OF_MAX_PAIRS {
            let flat: Vec<String> = pairs.into_iter().map(|(k, v)| format!("{k}, {v}")).collect();
            format!("Map.of({})", flat.join(", "))
        } else {
            let flat: Vec<String> = pairs.into_iter().map(|(k, v)| format!("Map.entry({k}, {v})")).collect();
            format!("Map.ofEntries({})", flat.join(", "))
        }
    }

    fn lambda(&self, lambda: &Lambda) -> String {
        let params = if lambda.parenthesized || lambda.params.len() != 1 {
            format!("({})", lambda.params.join(", "))
        } else {
            lambda.params.join(", ")
        };
        let scope = self.with_locals(lambda.params.iter().map(|p| (p.clone(), None)));
        let body = match &lambda.body {
            LambdaBody::Expr(body) => scope.expr(body),
            LambdaBody::Block(block) => scope.block(block),
        };
        format!("{params} -> {body}")
    }
}

/// Translate a literal, keeping its source spelling.
pub(crate) fn literal(lit: &Literal) -> String {
    match lit {
        Literal::Int(s) | Literal::Float(s) => s.clone(),
        Literal::Char(s) => format!("'{s}'"),
        Literal::String(s) => format!("\"{s}\""),
        Literal::TextBlock(s) => format!("\"\"\"{s}\"\"\""),
        Literal::Bool(b) => b.to_string(),
        Literal::Null => "null".to_string(),
        Literal::Regex(pattern) => {
            let escaped = pattern.replace('\\', "\\\\").replace('"', "\\\"");
            format!("java.util.regex.Pattern.compile(\"{escaped}\")")
        }
        Literal::Unit { value, unit } => match unit.as_str() {
            "B" => format!("new {}(\"{value}\")", conventions::BIG_DECIMAL),
            "I" => format!("new {}(\"{value}\")", conventions::BIG_INTEGER),
            _ => {
                tracing::debug!(rule = "unit_literal", unit = %unit, "unknown unit, keeping the numeric value");
                value.clone()
            }
        },
    }
}

/// Nodes whose translation already carries its own outer parentheses.
fn is_self_parenthesized(e: &Expr) -> bool {
    matches!(
        e,
        Expr::IsDef(_)
            | Expr::Coercion(..)
            | Expr::SafeField(..)
            | Expr::SafeIndex(..)
            | Expr::SafeMethodCall(..)
            | Expr::MutationBlock(..)
            | Expr::PredicateBlock(..)
            | Expr::Paren(_)
    )
}

/// Nodes that translate to a primary (safe to follow with `.member`).
pub(crate) fn is_primary(e: &Expr) -> bool {
    matches!(
        e,
        Expr::Literal(_)
            | Expr::Ident(_)
            | Expr::This
            | Expr::Super
            | Expr::SuperField(_)
            | Expr::New(_)
            | Expr::List(_)
            | Expr::Map(_)
            | Expr::Empty
            | Expr::Paren(_)
            | Expr::Field(..)
            | Expr::Index(..)
            | Expr::Call(..)
            | Expr::MethodCall(..)
            | Expr::Projection(..)
            | Expr::Selection(..)
            | Expr::RegexMatch(..)
    ) || is_self_parenthesized(e)
}

#[cfg(test)]
mod tests {
    use crate::registry::Registry;
    use crate::translator::tests::{expr, person_registry};

    #[test]
    fn test_literals_round_trip() {
        let registry = Registry::new();
        assert_eq!(expr("42", &registry), "42");
        assert_eq!(expr("0x1F", &registry), "0x1F");
        assert_eq!(expr("10L", &registry), "10L");
        assert_eq!(expr("3.14", &registry), "3.14");
        assert_eq!(expr("true", &registry), "true");
        assert_eq!(expr("null", &registry), "null");
        assert_eq!(expr(r#""a\"b""#, &registry), r#""a\"b""#);
        assert_eq!(expr("'c'", &registry), "'c'");
        assert_eq!(expr("'Honda'", &registry), "\"Honda\"");
    }

    #[test]
    fn test_unit_and_regex_literals() {
        let registry = Registry::new();
        assert_eq!(expr("10B", &registry), "new BigDecimal(\"10\")");
        assert_eq!(expr("7I", &registry), "new BigInteger(\"7\")");
        assert_eq!(expr("5pounds", &registry), "5");
        assert_eq!(expr(r"~/\d+/", &registry), r#"java.util.regex.Pattern.compile("\\d+")"#);
    }

    #[test]
    fn test_collections() {
        let registry = Registry::new();
        assert_eq!(expr("[1, 2, 3]", &registry), "List.of(1, 2, 3)");
        assert_eq!(expr("[]", &registry), "List.of()");
        assert_eq!(expr("[:]", &registry), "Map.of()");
        assert_eq!(expr("[\"a\": 1, b: 2]", &registry), "Map.of(\"a\", 1, \"b\", 2)");
        assert_eq!(expr("{}", &registry), "Map.of()");
    }

    #[test]
    fn test_large_map_uses_entries() {
        let registry = Registry::new();
        let source = format!("[{}]", (0..11).map(|i| format!("{i}: {i}")).collect::<Vec<_>>().join(", "));
        let out = expr(&source, &registry);
        assert!(out.starts_with("Map.ofEntries(Map.entry(0, 0), "), "{out}");
    }

    #[test]
    fn test_sentinels_and_isdef() {
        let registry = Registry::new();
        assert_eq!(expr("empty", &registry), "java.util.Collections.emptyList()");
        assert_eq!(expr("nil", &registry), "null");
        assert_eq!(expr("undefined", &registry), "null");
        assert_eq!(expr("isdef(x)", &registry), "(x != null)");
        assert_eq!(expr("(isdef(x))", &registry), "(x != null)");
    }

    #[test]
    fn test_object_creation() {
        let registry = Registry::new().with_type_names(["org.mvel3.Person"]);
        assert_eq!(expr("new Person(\"a\", 1)", &registry), "new org.mvel3.Person(\"a\", 1)");
        assert_eq!(expr("new ArrayList<>()", &registry), "new ArrayList<>()");
        assert_eq!(expr("new int[3][]", &registry), "new int[3][]");
        assert_eq!(expr("new int[] {1, 2}", &registry), "new int[]{1, 2}");
    }

    #[test]
    fn test_lambdas_and_method_refs() {
        let registry = Registry::new();
        assert_eq!(expr("x -> x * 2", &registry), "x -> x * 2");
        assert_eq!(expr("(a, b) -> a + b", &registry), "(a, b) -> a + b");
        assert_eq!(expr("String::valueOf", &registry), "String::valueOf");
        assert_eq!(expr("ArrayList::new", &registry), "ArrayList::new");
    }

    #[test]
    fn test_type_test_and_cast() {
        let registry = person_registry();
        assert_eq!(expr("p instanceof Person", &registry), "p instanceof org.mvel3.Person");
        assert_eq!(expr("o instanceof String s", &registry), "o instanceof String s");
        assert_eq!(expr("(int) 1.5", &registry), "(int) 1.5");
    }

    #[test]
    fn test_ternary_and_precedence() {
        let registry = Registry::new();
        assert_eq!(expr("1 + 2 * 3", &registry), "1 + 2 * 3");
        assert_eq!(expr("(1 + 2) * 3", &registry), "(1 + 2) * 3");
        assert_eq!(expr("a ? b : c ? d : e", &registry), "a ? b : c ? d : e");
    }
}
