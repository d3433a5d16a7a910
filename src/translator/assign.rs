//! Assignment targets and type-directed value coercion.

use mvel_core::lang::conventions;
use mvel_syntax::ast::{AssignOp, BinaryOp, Expr, Literal, Spanned};

use super::access::Shape;
use super::context::Context;
use crate::registry::TypeDescriptor;

impl<'a> Context<'a> {
    pub(crate) fn assignment(&self, target: &Spanned<Expr>, op: AssignOp, value: &Spanned<Expr>) -> String {
        match &target.node {
            Expr::Field(recv, field) | Expr::SafeField(recv, field) => self.field_assignment(recv, field, op, value),
            Expr::Index(recv, index) | Expr::SafeIndex(recv, index) => self.index_assignment(recv, index, op, value),
            Expr::Ident(name) => self.variable_assignment(name, target, op, value),
            _ => self.compound(&self.expr(target), op, self.expr(value)),
        }
    }

    /// `o.f = v` → `o.setF(v)`; `o.f += v` → `o.setF(o.getF() + v)`; public fields are written directly.
    fn field_assignment(&self, recv: &Spanned<Expr>, field: &str, op: AssignOp, value: &Spanned<Expr>) -> String {
        let receiver = self.receiver(recv);
        let field_type = self
            .static_type(recv)
            .and_then(|owner| self.registry.member_type(&owner, field).cloned());
        if self.is_public_member(recv, field) {
            let slot = format!("{receiver}.{field}");
            return self.assign_in_place(&slot, field_type.as_ref(), op, value);
        }

        if field_type.is_none() {
            tracing::debug!(rule = "assignment", field, branch = "mutator", "no type information for receiver");
        }
        let setter = conventions::mutator_name(field);
        let Some(bin) = op.binary_op() else {
            return format!("{receiver}.{setter}({})", self.coerce_value(value, field_type.as_ref()));
        };

        let current = format!("{receiver}.{}()", conventions::accessor_name(field));
        let combined = self.combine(&current, field_type.as_ref(), bin, value);
        format!("{receiver}.{setter}({combined})")
    }

    /// `a[i] = v`, `m.put(k, v)`, or `l.set(i, v)`, by receiver shape.
    fn index_assignment(&self, recv: &Spanned<Expr>, index: &Spanned<Expr>, op: AssignOp, value: &Spanned<Expr>) -> String {
        let receiver = self.receiver(recv);
        let key = self.expr(index);
        let shape = self.shape(recv, &receiver);
        let element = self.element_type(recv, &receiver);

        match (shape, op.binary_op()) {
            (Shape::Array, _) => {
                let slot = format!("{receiver}[{key}]");
                self.assign_in_place(&slot, element.as_ref(), op, value)
            }
            (Shape::Map, None) => format!("{receiver}.put({key}, {})", self.coerce_value(value, element.as_ref())),
            (Shape::List, None) => format!("{receiver}.set({key}, {})", self.coerce_value(value, element.as_ref())),
            (shape, Some(bin)) => {
                let current = format!("{receiver}.get({key})");
                let combined = self.combine(&current, element.as_ref(), bin, value);
                let method = if shape == Shape::Map { "put" } else { "set" };
                format!("{receiver}.{method}({key}, {combined})")
            }
        }
    }

    /// `x op v`, optionally written back into the context map for bound variables.
    fn variable_assignment(&self, name: &str, target: &Spanned<Expr>, op: AssignOp, value: &Spanned<Expr>) -> String {
        let declared = self.static_type(target);
        let assignment = self.assign_in_place(name, declared.as_ref(), op, value);
        let bound = !self.is_local(name) && self.registry.resolve_root(name).is_some();
        if self.config.context_writeback && bound {
            return format!("{}.put(\"{name}\", {assignment})", self.config.context_name);
        }
        assignment
    }

    /// Assignment to a directly writable slot (variable, public field, array element).
    fn assign_in_place(&self, slot: &str, stored: Option<&TypeDescriptor>, op: AssignOp, value: &Spanned<Expr>) -> String {
        match op.binary_op() {
            None => format!("{slot} = {}", self.coerce_value(value, stored)),
            Some(bin) if stored.is_some_and(TypeDescriptor::is_arbitrary_precision) => {
                format!("{slot} = {}", self.combine(slot, stored, bin, value))
            }
            Some(_) => self.compound(slot, op, self.expr(value)),
        }
    }

    /// Java's own compound operator; `**=` has none and expands through `Math.pow`.
    fn compound(&self, slot: &str, op: AssignOp, value: String) -> String {
        match op {
            AssignOp::Pow => format!("{slot} = Math.pow({slot}, {value})"),
            _ => format!("{slot} {op} {value}"),
        }
    }

    /// `current op value`, as a method call when the stored type is arbitrary-precision.
    fn combine(&self, current: &str, stored: Option<&TypeDescriptor>, op: BinaryOp, value: &Spanned<Expr>) -> String {
        let precise = stored.filter(|ty| ty.is_arbitrary_precision()).map(|ty| {
            if ty.simple_name() == conventions::BIG_INTEGER {
                conventions::BIG_INTEGER
            } else {
                conventions::BIG_DECIMAL
            }
        });
        match (precise, op) {
            (Some(_), BinaryOp::Pow) => format!("{current}.pow({})", self.expr(value)),
            (Some(kind), _) => self.precise_op(current, op, &self.promoted(value, kind), kind),
            (None, BinaryOp::Pow) => format!("Math.pow({current}, {})", self.expr(value)),
            (None, _) => format!("{current} {op} {}", self.operand(value)),
        }
    }

    /// Element type of an indexed receiver: declared, else guessed from its name.
    fn element_type(&self, recv: &Spanned<Expr>, receiver: &str) -> Option<TypeDescriptor> {
        if let Some(ty) = self.static_type(recv) {
            return ty.element_type();
        }
        self.policy
            .array_element_type(receiver)
            .map(TypeDescriptor::new)
    }

    /// Translate `value` for a slot of type `target`, converting literals and arbitrary-precision values.
    pub(crate) fn coerce_value(&self, value: &Spanned<Expr>, target: Option<&TypeDescriptor>) -> String {
        let text = self.expr(value);
        let Some(target) = target else {
            return text;
        };
        let literal = match &value.node {
            Expr::Literal(lit) => Some(lit),
            _ => None,
        };
        let simple = target.simple_name();

        if simple == conventions::BIG_DECIMAL && !target.is_array() {
            return match literal {
                Some(Literal::Int(s) | Literal::Float(s)) => {
                    let digits = s.trim_end_matches(['L', 'l', 'd', 'D', 'f', 'F']);
                    format!("new {}(\"{digits}\")", conventions::BIG_DECIMAL)
                }
                Some(Literal::String(_)) => format!("new {}({text})", conventions::BIG_DECIMAL),
                _ if self.is_plain_number(value) => format!("{}.valueOf({text})", conventions::BIG_DECIMAL),
                _ => text,
            };
        }
        if simple == conventions::BIG_INTEGER && !target.is_array() {
            return match literal {
                Some(Literal::Int(s)) => {
                    let digits = s.trim_end_matches(['L', 'l']);
                    format!("new {}(\"{digits}\")", conventions::BIG_INTEGER)
                }
                Some(Literal::String(_)) => format!("new {}({text})", conventions::BIG_INTEGER),
                _ => text,
            };
        }
        if let (Some(Literal::String(_)), Some(boxed)) = (literal, conventions::boxed_type(simple)) {
            if let Some(parse) = boxed.parse_method {
                return format!("{parse}({text})");
            }
        }
        if target.is_textual() && self.is_arbitrary_precision(value) {
            return format!("java.util.Objects.toString({text}, null)");
        }
        text
    }

    /// A primitive or boxed numeric value other than `char`/`boolean`.
    fn is_plain_number(&self, value: &Spanned<Expr>) -> bool {
        self.static_type(value)
            .and_then(|t| conventions::boxed_type(t.simple_name()))
            .is_some_and(|b| !matches!(b.primitive, "char" | "boolean"))
    }
}

#[cfg(test)]
mod tests {
    use mvel_syntax::ast::ParseMode;
    use mvel_syntax::parser::parse_source;

    use crate::config::TranslatorConfig;
    use crate::registry::{Declaration, Registry, TypeDescriptor};
    use crate::translator::Translator;
    use crate::translator::tests::{expr, person_registry, program};

    #[test]
    fn test_field_assignment_uses_mutator() {
        let registry = person_registry();
        assert_eq!(expr("p.name = \"Bob\"", &registry), "p.setName(\"Bob\")");
        assert_eq!(expr("p.age += 10", &registry), "p.setAge(p.getAge() + 10)");
        assert_eq!(expr("foo.nickName = \"x\"", &registry), "foo.nickName = \"x\"");
        assert_eq!(expr("q.other = 1", &registry), "q.setOther(1)");
    }

    #[test]
    fn test_field_assignment_coerces_by_declared_type() {
        let registry = person_registry();
        assert_eq!(expr("p.salary = 100", &registry), "p.setSalary(new BigDecimal(\"100\"))");
        assert_eq!(expr("p.salary = 10L", &registry), "p.setSalary(new BigDecimal(\"10\"))");
        assert_eq!(expr("p.salary = \"1.5\"", &registry), "p.setSalary(new BigDecimal(\"1.5\"))");
        assert_eq!(expr("p.salary = count", &registry), "p.setSalary(BigDecimal.valueOf(count))");
        assert_eq!(expr("p.age = \"42\"", &registry), "p.setAge(Integer.parseInt(\"42\"))");
        assert_eq!(
            expr("p.name = total", &registry),
            "p.setName(java.util.Objects.toString(total, null))"
        );
    }

    #[test]
    fn test_compound_assignment_on_big_decimal_field() {
        let registry = person_registry();
        assert_eq!(
            expr("p.salary += 10", &registry),
            "p.setSalary(p.getSalary().add(new BigDecimal(\"10\"), java.math.MathContext.DECIMAL128))"
        );
    }

    #[test]
    fn test_variable_assignment() {
        let registry = person_registry();
        assert_eq!(expr("x += 10", &registry), "x += 10");
        assert_eq!(expr("count = 3", &registry), "count = 3");
        assert_eq!(expr("total = 5", &registry), "total = new BigDecimal(\"5\")");
        assert_eq!(expr("a = b = 1", &registry), "a = b = 1");
    }

    #[test]
    fn test_compound_assignment_on_big_decimal_variable() {
        let registry = person_registry();
        assert_eq!(
            expr("total += 1", &registry),
            "total = total.add(new BigDecimal(\"1\"), java.math.MathContext.DECIMAL128)"
        );
        assert_eq!(
            expr("total -= count", &registry),
            "total = total.subtract(BigDecimal.valueOf(count), java.math.MathContext.DECIMAL128)"
        );
        assert_eq!(expr("total **= 2", &registry), "total = total.pow(2)");
    }

    #[test]
    fn test_compound_value_keeps_its_grouping() {
        let registry = person_registry();
        assert_eq!(expr("p.age -= a - b", &registry), "p.setAge(p.getAge() - (a - b))");
        assert_eq!(expr("p.age *= a + b", &registry), "p.setAge(p.getAge() * (a + b))");
        assert_eq!(expr("p.age += c ? 1 : 2", &registry), "p.setAge(p.getAge() + (c ? 1 : 2))");
        assert_eq!(expr("p.age += -a", &registry), "p.setAge(p.getAge() + -a)");
        assert_eq!(expr("m[\"k\"] *= a + b", &registry), "m.put(\"k\", m.get(\"k\") * (a + b))");
        assert_eq!(expr("list[0] -= a - b", &registry), "list.set(0, list.get(0) - (a - b))");
        assert_eq!(
            expr("p.salary -= a - b", &registry),
            "p.setSalary(p.getSalary().subtract(BigDecimal.valueOf(a - b), java.math.MathContext.DECIMAL128))"
        );
    }

    #[test]
    fn test_power_assignment_expands() {
        let registry = person_registry();
        assert_eq!(expr("x **= 2", &registry), "x = Math.pow(x, 2)");
        assert_eq!(expr("p.age **= 2", &registry), "p.setAge(Math.pow(p.getAge(), 2))");
        assert_eq!(expr("foo.nickName **= 2", &registry), "foo.nickName = Math.pow(foo.nickName, 2)");
    }

    #[test]
    fn test_context_writeback() {
        let registry = person_registry();
        let root = parse_source("count += 1; int y = 0; y += 1;", ParseMode::Program).unwrap();
        let translator =
            Translator::new(&registry).with_config(TranslatorConfig::new().with_context_writeback(true));
        assert_eq!(
            translator.translate(&root).body,
            "context.put(\"count\", count += 1);\nint y = 0;\ny += 1;"
        );
    }

    #[test]
    fn test_index_assignment_by_shape() {
        let registry = Registry::build([
            Declaration::new("values", TypeDescriptor::new("java.math.BigDecimal[]")),
            Declaration::new("prices", TypeDescriptor::new("Map").with_generics("String, Integer")),
            Declaration::new("names", TypeDescriptor::new("List").with_generics("String")),
        ])
        .unwrap();
        assert_eq!(expr("values[0] = 5", &registry), "values[0] = new BigDecimal(\"5\")");
        assert_eq!(expr("prices[\"a\"] = 1", &registry), "prices.put(\"a\", 1)");
        assert_eq!(expr("names[0] = \"x\"", &registry), "names.set(0, \"x\")");
        assert_eq!(expr("prices[\"a\"] += 1", &registry), "prices.put(\"a\", prices.get(\"a\") + 1)");
        assert_eq!(expr("names[0] += \"!\"", &registry), "names.set(0, names.get(0) + \"!\")");
        assert_eq!(
            expr("values[0] *= 2", &registry),
            "values[0] = values[0].multiply(new BigDecimal(\"2\"), java.math.MathContext.DECIMAL128)"
        );
    }

    #[test]
    fn test_index_assignment_by_policy() {
        let registry = Registry::new();
        assert_eq!(expr("x[0] = \"5\"", &registry), "x[0] = Integer.parseInt(\"5\")");
        assert_eq!(expr("m[\"k\"] = 1", &registry), "m.put(\"k\", 1)");
        assert_eq!(expr("list[0] = 1", &registry), "list.set(0, 1)");
    }

    #[test]
    fn test_assignment_statements() {
        let registry = person_registry();
        assert_eq!(program("p.age = 1; p.age -= 2;", &registry), "p.setAge(1);\np.setAge(p.getAge() - 2);");
    }
}
