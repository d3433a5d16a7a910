//! Member, index, and guarded access.
//!
//! ## Notes
//! - Property reads resolve by priority: well-known zero-argument methods, static fields, package segments, public
//!   fields, upper-case (type-qualified) names, and finally the accessor convention.
//! - Guarded access over a receiver that is itself guarded is not expressible as a single conditional; it is emitted
//!   behind the configured unresolved marker.

use mvel_core::lang::conventions;
use mvel_syntax::ast::{Expr, Spanned};

use super::context::Context;

/// How a property read is spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MemberRead {
    /// `o.size()`
    Call,
    /// `o.field`
    Direct,
    /// `o.getField()`
    Accessor,
}

/// Collection shape of an indexed receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    Array,
    Map,
    List,
}

impl<'a> Context<'a> {
    pub(crate) fn field_access(&self, recv: &Spanned<Expr>, field: &str) -> String {
        format!("{}.{}", self.receiver(recv), self.member(recv, field))
    }

    /// The member part of `recv.field`: `size()`, `nickName`, or `getName()`.
    pub(crate) fn member(&self, recv: &Spanned<Expr>, field: &str) -> String {
        match self.member_read(recv, field) {
            MemberRead::Call => format!("{field}()"),
            MemberRead::Direct => field.to_string(),
            MemberRead::Accessor => format!("{}()", conventions::accessor_name(field)),
        }
    }

    pub(crate) fn member_read(&self, recv: &Spanned<Expr>, field: &str) -> MemberRead {
        let owner = self.static_type(recv);
        let info = owner.as_ref().and_then(|t| self.registry.type_info(t));
        let declared = info.and_then(|i| i.field(field));

        if self.policy.is_zero_arg_method(field) || info.is_some_and(|i| i.method(field, 0).is_some()) {
            return MemberRead::Call;
        }
        if self.policy.is_static_field(field) || declared.is_some_and(|f| f.is_static) {
            return MemberRead::Direct;
        }
        if self.policy.is_namespace_segment(field) {
            return MemberRead::Direct;
        }
        if declared.is_some_and(|f| f.is_public) {
            return MemberRead::Direct;
        }
        if declared.is_none() && self.policy.looks_public_field(field) {
            tracing::debug!(rule = "field_access", field, branch = "public_field", "public by naming convention");
            return MemberRead::Direct;
        }
        if field.starts_with(|c: char| c.is_ascii_uppercase()) || self.is_type_receiver(recv) {
            return MemberRead::Direct;
        }
        if info.is_none() {
            tracing::debug!(rule = "field_access", field, branch = "accessor", "no type information for receiver");
        }
        MemberRead::Accessor
    }

    /// Whether `field` of `recv` is read and written directly.
    pub(crate) fn is_public_member(&self, recv: &Spanned<Expr>, field: &str) -> bool {
        let declared = self
            .static_type(recv)
            .and_then(|t| self.registry.type_info(&t).and_then(|i| i.field(field).cloned()));
        match declared {
            Some(f) => f.is_public,
            None => self.policy.looks_public_field(field),
        }
    }

    /// A bare receiver that names a type rather than a value (`Person.count`).
    fn is_type_receiver(&self, recv: &Spanned<Expr>) -> bool {
        match &recv.node {
            Expr::Ident(name) => {
                !self.is_local(name) && self.registry.resolve_root(name).is_none() && self.registry.is_type_name(name)
            }
            _ => false,
        }
    }

    pub(crate) fn index_access(&self, recv: &Spanned<Expr>, index: &Spanned<Expr>) -> String {
        let receiver = self.receiver(recv);
        format!("{receiver}{}", self.index_suffix(recv, &receiver, index))
    }

    /// `[i]` for arrays, `.get(i)` otherwise.
    fn index_suffix(&self, recv: &Spanned<Expr>, receiver: &str, index: &Spanned<Expr>) -> String {
        match self.shape(recv, receiver) {
            Shape::Array => format!("[{}]", self.expr(index)),
            Shape::Map | Shape::List => format!(".get({})", self.expr(index)),
        }
    }

    /// Shape of an indexed receiver: declared type first, then the policy.
    pub(crate) fn shape(&self, recv: &Spanned<Expr>, receiver: &str) -> Shape {
        if let Some(ty) = self.static_type(recv) {
            return if ty.is_array() {
                Shape::Array
            } else if ty.is_map() {
                Shape::Map
            } else {
                Shape::List
            };
        }
        let shape = if self.policy.looks_array_like(receiver) {
            Shape::Array
        } else if self.policy.looks_map_like(receiver) {
            Shape::Map
        } else {
            Shape::List
        };
        tracing::debug!(rule = "index_access", receiver, branch = ?shape, "no type information for receiver");
        shape
    }

    /// `a?.b`, `a?[i]`, `a?.m(x)`.
    pub(crate) fn guarded_access(&self, e: &Spanned<Expr>) -> String {
        let (recv, access) = match &e.node {
            Expr::SafeField(recv, field) => (recv, format!(".{}", self.member(recv, field))),
            Expr::SafeMethodCall(recv, name, args) => (recv, format!(".{name}({})", self.expr_list(args))),
            Expr::SafeIndex(recv, index) => {
                let receiver = self.receiver(recv);
                (recv, self.index_suffix(recv, &receiver, index))
            }
            _ => return self.expr(e),
        };
        let receiver = self.receiver(recv);

        if has_guard(recv) {
            self.record_unresolved("nested safe navigation", e.span);
            return format!(
                "{} ({receiver} != null ? {receiver}{access} : null)",
                self.config.unresolved_marker
            );
        }
        if has_call(recv) {
            let temp = self.next_temp();
            return format!("java.util.Optional.ofNullable({receiver}).map({temp} -> {temp}{access}).orElse(null)");
        }
        format!("({receiver} != null ? {receiver}{access} : null)")
    }
}

/// Whether the receiver chain of an access already contains a guarded step.
fn has_guard(e: &Spanned<Expr>) -> bool {
    match &e.node {
        Expr::SafeField(..) | Expr::SafeIndex(..) | Expr::SafeMethodCall(..) => true,
        Expr::Field(recv, _) | Expr::Index(recv, _) | Expr::MethodCall(recv, _, _) | Expr::Paren(recv) => has_guard(recv),
        _ => false,
    }
}

/// Whether evaluating the receiver chain calls something (and so must not be evaluated twice).
fn has_call(e: &Spanned<Expr>) -> bool {
    match &e.node {
        Expr::MethodCall(..) | Expr::Call(..) | Expr::New(_) => true,
        Expr::Field(recv, _) | Expr::Index(recv, _) | Expr::Paren(recv) => has_call(recv),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use mvel_syntax::ast::ParseMode;
    use mvel_syntax::parser::parse_source;

    use crate::registry::{Declaration, Registry, TypeDescriptor, TypeInfo};
    use crate::translator::tests::{expr, person_registry};
    use crate::translator::{Translator, translate};

    #[test]
    fn test_field_access_priority() {
        let registry = person_registry();
        assert_eq!(expr("list.size", &registry), "list.size()");
        assert_eq!(expr("Integer.MAX_VALUE", &registry), "Integer.MAX_VALUE");
        assert_eq!(expr("java.util.List", &registry), "java.util.List");
        assert_eq!(expr("foo.nickName", &registry), "foo.nickName");
        assert_eq!(expr("Outer.Inner", &registry), "Outer.Inner");
        assert_eq!(expr("foo.name", &registry), "foo.getName()");
        assert_eq!(expr("p.address.city", &registry), "p.getAddress().getCity()");
    }

    #[test]
    fn test_registry_public_and_static_fields() {
        let registry = Registry::build([Declaration::new("c", TypeDescriptor::new("Counter"))])
            .unwrap()
            .with_type(
                TypeInfo::new("Counter")
                    .with_public_field("total", TypeDescriptor::new("int"))
                    .with_static_field("instances", TypeDescriptor::new("int"))
                    .with_method("value", 0, Some(TypeDescriptor::new("int"))),
            );
        assert_eq!(expr("c.total", &registry), "c.total");
        assert_eq!(expr("c.instances", &registry), "c.instances");
        assert_eq!(expr("c.value", &registry), "c.value()");
        assert_eq!(expr("Counter.instances", &registry), "Counter.instances");
    }

    #[test]
    fn test_index_access_by_type_and_policy() {
        let registry = Registry::build([
            Declaration::new("values", TypeDescriptor::new("int[]")),
            Declaration::new("prices", TypeDescriptor::new("Map").with_generics("String, Integer")),
        ])
        .unwrap();
        assert_eq!(expr("values[1]", &registry), "values[1]");
        assert_eq!(expr("prices[\"a\"]", &registry), "prices.get(\"a\")");
        assert_eq!(expr("x[0]", &registry), "x[0]");
        assert_eq!(expr("names[0]", &registry), "names.get(0)");
        assert_eq!(expr("x[0][1]", &registry), "x[0][1]");
    }

    #[test]
    fn test_guarded_single_hop() {
        let registry = person_registry();
        assert_eq!(expr("obj?.field", &registry), "(obj != null ? obj.getField() : null)");
        assert_eq!(expr("obj?.size()", &registry), "(obj != null ? obj.size() : null)");
        assert_eq!(expr("names?[0]", &registry), "(names != null ? names.get(0) : null)");
        assert_eq!(expr("(obj?.field)", &registry), "(obj != null ? obj.getField() : null)");
    }

    #[test]
    fn test_guarded_receiver_with_call_uses_temp() {
        let registry = person_registry();
        assert_eq!(
            expr("p.getAddresses()?.size", &registry),
            "java.util.Optional.ofNullable(p.getAddresses()).map(__t0 -> __t0.size()).orElse(null)"
        );
    }

    #[test]
    fn test_nested_guard_is_marked_unresolved() {
        let registry = person_registry();
        let root = parse_source("a?.b?.c", ParseMode::Expression).unwrap();
        let unit = translate(&root, &registry);
        assert!(unit.body.starts_with("/* unresolved: nested safe navigation */ "), "{}", unit.body);
        assert!(!unit.is_complete());
        assert_eq!(unit.unresolved.len(), 1);
        assert_eq!(unit.unresolved[0].construct, "nested safe navigation");
    }

    #[test]
    fn test_public_field_guess_depends_on_policy() {
        let registry = Registry::new();
        let root = parse_source("p.nickName", ParseMode::Expression).unwrap();
        assert_eq!(translate(&root, &registry).body, "p.nickName");
        let strict = Translator::new(&registry).with_policy(crate::translator::policy::RegistryOnlyPolicy);
        assert_eq!(strict.translate(&root).body, "p.getNickName()");
    }
}
