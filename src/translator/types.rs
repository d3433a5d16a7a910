//! Best-effort static types of expressions, read from locals and the registry.

use mvel_core::lang::conventions;
use mvel_syntax::ast::{Creator, Expr, Literal, Spanned, TypeRef};

use super::context::Context;
use crate::registry::TypeDescriptor;

impl<'a> Context<'a> {
    /// Declared type of `expr`, if locals, literals or the registry say so.
    pub(crate) fn static_type(&self, expr: &Spanned<Expr>) -> Option<TypeDescriptor> {
        match &expr.node {
            Expr::Ident(name) => {
                if self.is_local(name) {
                    return self.local_type(name).cloned();
                }
                self.registry.resolve_root(name).map(|d| d.ty.clone())
            }
            Expr::Field(recv, field) | Expr::SafeField(recv, field) => {
                let owner = self.static_type(recv)?;
                self.registry.member_type(&owner, field).cloned()
            }
            Expr::MethodCall(recv, name, args) | Expr::SafeMethodCall(recv, name, args) => {
                let owner = self.static_type(recv)?;
                self.registry
                    .type_info(&owner)?
                    .method(name, args.len())?
                    .returns
                    .clone()
            }
            Expr::Index(recv, _) | Expr::SafeIndex(recv, _) => self.static_type(recv)?.element_type(),
            Expr::Literal(lit) => literal_type(lit),
            Expr::New(creator) => Some(match creator.as_ref() {
                Creator::Class { ty, .. } | Creator::ArrayInit { ty, .. } => descriptor_of(ty),
                Creator::Array { ty, sizes, extra_dims } => {
                    let mut desc = descriptor_of(ty);
                    desc.name.push_str(&"[]".repeat(sizes.len() + extra_dims));
                    desc
                }
            }),
            Expr::Cast(ty, _) => Some(descriptor_of(ty)),
            Expr::Coercion(_, target) => Some(TypeDescriptor::new(target.type_name())),
            Expr::Paren(inner) | Expr::Assign(inner, _, _) => self.static_type(inner),
            Expr::Ternary(_, then, otherwise) => self.static_type(then).or_else(|| self.static_type(otherwise)),
            Expr::Binary(lhs, op, rhs) if op.is_arithmetic() => {
                let lt = self.static_type(lhs);
                let rt = self.static_type(rhs);
                let textual = |t: &Option<TypeDescriptor>| t.as_ref().is_some_and(TypeDescriptor::is_textual);
                if textual(&lt) || textual(&rt) {
                    return Some(TypeDescriptor::new(conventions::STRING));
                }
                let precise = |t: &Option<TypeDescriptor>| t.as_ref().is_some_and(TypeDescriptor::is_arbitrary_precision);
                if precise(&rt) && !precise(&lt) {
                    return rt;
                }
                lt.or(rt)
            }
            Expr::Binary(_, op, _) if op.is_boolean() => Some(TypeDescriptor::new("boolean")),
            Expr::IsDef(_) | Expr::TypeTest(_) | Expr::RegexMatch(..) | Expr::PredicateBlock(..) => {
                Some(TypeDescriptor::new("boolean"))
            }
            _ => None,
        }
    }

    /// Whether `expr` is statically a `BigDecimal` or `BigInteger`.
    pub(crate) fn is_arbitrary_precision(&self, expr: &Spanned<Expr>) -> bool {
        self.static_type(expr)
            .is_some_and(|t| t.is_arbitrary_precision())
    }

    pub(crate) fn is_textual(&self, expr: &Spanned<Expr>) -> bool {
        self.static_type(expr).is_some_and(|t| t.is_textual())
    }
}

/// Type of a literal, from its spelling.
pub(crate) fn literal_type(lit: &Literal) -> Option<TypeDescriptor> {
    let name = match lit {
        Literal::Int(s) if s.ends_with(['L', 'l']) => "long",
        Literal::Int(_) => "int",
        Literal::Float(s) if s.ends_with(['f', 'F']) => "float",
        Literal::Float(_) => "double",
        Literal::Char(_) => "char",
        Literal::String(_) | Literal::TextBlock(_) => conventions::STRING,
        Literal::Bool(_) => "boolean",
        Literal::Regex(_) => "java.util.regex.Pattern",
        Literal::Unit { unit, .. } => match unit.as_str() {
            "B" => conventions::BIG_DECIMAL,
            "I" => conventions::BIG_INTEGER,
            _ => return None,
        },
        Literal::Null => return None,
    };
    Some(TypeDescriptor::new(name))
}

/// Descriptor for a type as written in source.
pub(crate) fn descriptor_of(ty: &TypeRef) -> TypeDescriptor {
    let name = format!("{}{}", ty.name, "[]".repeat(ty.dims));
    match &ty.args {
        Some(args) if !args.is_empty() => {
            let generics = args.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
            TypeDescriptor::new(name).with_generics(generics)
        }
        _ => TypeDescriptor::new(name),
    }
}

#[cfg(test)]
mod tests {
    use mvel_syntax::ast::{ParseMode, Root};
    use mvel_syntax::parser::parse_source;

    use crate::config::TranslatorConfig;
    use crate::translator::context::{Context, Session};
    use crate::translator::policy::ConventionPolicy;
    use crate::translator::tests::person_registry;

    fn type_of(source: &str) -> Option<String> {
        let registry = person_registry();
        let config = TranslatorConfig::default();
        let session = Session::new();
        let ctx = Context::new(&registry, &config, &ConventionPolicy, &session);
        let Root::Expression(expr) = parse_source(source, ParseMode::Expression).unwrap() else {
            unreachable!()
        };
        ctx.static_type(&expr).map(|t| t.to_string())
    }

    #[test]
    fn test_types_from_registry() {
        assert_eq!(type_of("p").as_deref(), Some("org.mvel3.Person"));
        assert_eq!(type_of("$p").as_deref(), Some("org.mvel3.Person"));
        assert_eq!(type_of("p.salary").as_deref(), Some("java.math.BigDecimal"));
        assert_eq!(type_of("p.address.city").as_deref(), Some("String"));
        assert_eq!(type_of("p.getAddresses()").as_deref(), Some("java.util.List<Address>"));
        assert_eq!(type_of("list[0]").as_deref(), Some("Integer"));
        assert_eq!(type_of("q.salary"), None);
    }

    #[test]
    fn test_types_from_literals_and_operators() {
        assert_eq!(type_of("10L").as_deref(), Some("long"));
        assert_eq!(type_of("1.5f").as_deref(), Some("float"));
        assert_eq!(type_of("10B").as_deref(), Some("BigDecimal"));
        assert_eq!(type_of("count + total").as_deref(), Some("java.math.BigDecimal"));
        assert_eq!(type_of("\"a\" + count").as_deref(), Some("String"));
        assert_eq!(type_of("count > 1").as_deref(), Some("boolean"));
        assert_eq!(type_of("(String) count").as_deref(), Some("String"));
        assert_eq!(type_of("new int[3][]").as_deref(), Some("int[][]"));
    }
}
