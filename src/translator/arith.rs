//! Operators: binary, unary, increments, and arbitrary-precision arithmetic.

use mvel_core::lang::conventions;
use mvel_syntax::ast::{BinaryOp, Expr, IncDec, Literal, Spanned, UnaryOp};

use super::context::Context;

impl<'a> Context<'a> {
    pub(crate) fn binary(&self, lhs: &Spanned<Expr>, op: BinaryOp, rhs: &Spanned<Expr>) -> String {
        match op {
            BinaryOp::Pow => format!("Math.pow({}, {})", self.expr(lhs), self.expr(rhs)),
            BinaryOp::StrSim => format!("StringUtils.strsim({}, {})", self.expr(lhs), self.expr(rhs)),
            BinaryOp::SoundsLike => format!("StringUtils.soundslike({}, {})", self.expr(lhs), self.expr(rhs)),
            BinaryOp::Contains => format!("{}.contains({})", self.receiver(lhs), self.expr(rhs)),
            BinaryOp::In => format!("{}.contains({})", self.receiver(rhs), self.expr(lhs)),
            _ if op.is_arithmetic() => self.arithmetic(lhs, op, rhs),
            _ if op.is_relational() && (self.is_arbitrary_precision(lhs) || self.is_arbitrary_precision(rhs)) => {
                let kind = self.precise_kind(lhs, rhs);
                format!(
                    "{}.compareTo({}) {op} 0",
                    self.promoted_receiver(lhs, kind),
                    self.promoted(rhs, kind)
                )
            }
            _ => format!("{} {op} {}", self.expr(lhs), self.expr(rhs)),
        }
    }

    /// `+ - * / %`, rewritten to method calls when an operand is arbitrary-precision.
    pub(crate) fn arithmetic(&self, lhs: &Spanned<Expr>, op: BinaryOp, rhs: &Spanned<Expr>) -> String {
        let precise = self.is_arbitrary_precision(lhs) || self.is_arbitrary_precision(rhs);
        let concatenation = op == BinaryOp::Add && (self.is_textual(lhs) || self.is_textual(rhs));
        if precise && !concatenation {
            let kind = self.precise_kind(lhs, rhs);
            let left = self.promoted_receiver(lhs, kind);
            let right = self.promoted(rhs, kind);
            return self.precise_op(&left, op, &right, kind);
        }

        let mut left = self.expr(lhs);
        let mut right = self.expr(rhs);
        if matches!(op, BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem) {
            if self.needs_parse(lhs, &left, rhs) {
                left = format!("Integer.parseInt({left})");
            }
            if self.needs_parse(rhs, &right, lhs) {
                right = format!("Integer.parseInt({right})");
            }
        }
        format!("{left} {op} {right}")
    }

    /// `left.add(right, CONTEXT)`; integer arithmetic takes no rounding context.
    pub(crate) fn precise_op(&self, left: &str, op: BinaryOp, right: &str, kind: &str) -> String {
        let Some(method) = conventions::arbitrary_precision_method(&op.to_string()) else {
            return format!("{left} {op} {right}");
        };
        if kind == conventions::BIG_INTEGER {
            format!("{left}.{method}({right})")
        } else {
            format!("{left}.{method}({right}, {})", self.config.decimal_context)
        }
    }

    /// `BigDecimal` or `BigInteger`, whichever operand's declared type names first.
    pub(crate) fn precise_kind(&self, lhs: &Spanned<Expr>, rhs: &Spanned<Expr>) -> &'static str {
        let kind = [lhs, rhs]
            .into_iter()
            .filter_map(|e| self.static_type(e))
            .find(|t| t.is_arbitrary_precision());
        match kind {
            Some(t) if t.simple_name() == conventions::BIG_INTEGER => conventions::BIG_INTEGER,
            _ => conventions::BIG_DECIMAL,
        }
    }

    /// `operand` as an arbitrary-precision value of `kind`.
    pub(crate) fn promoted(&self, operand: &Spanned<Expr>, kind: &str) -> String {
        if self.is_arbitrary_precision(operand) {
            return self.expr(operand);
        }
        promote_text(&self.expr(operand), kind)
    }

    fn promoted_receiver(&self, operand: &Spanned<Expr>, kind: &str) -> String {
        if self.is_arbitrary_precision(operand) {
            return self.receiver(operand);
        }
        promote_text(&self.expr(operand), kind)
    }

    /// A textual operand multiplied by a non-textual one is parsed first.
    fn needs_parse(&self, operand: &Spanned<Expr>, text: &str, other: &Spanned<Expr>) -> bool {
        if matches!(other.node, Expr::Literal(Literal::String(_))) {
            return false;
        }
        match self.static_type(operand) {
            Some(ty) => ty.is_textual() && !self.is_textual(other),
            None => {
                let simple = matches!(operand.node, Expr::Ident(_) | Expr::Field(..));
                let guess = simple && self.policy.looks_textual_operand(text);
                if guess {
                    tracing::debug!(rule = "coercion", operand = text, branch = "parse_int", "textual by naming convention");
                }
                guess
            }
        }
    }

    pub(crate) fn unary(&self, op: UnaryOp, operand: &Spanned<Expr>) -> String {
        if self.is_arbitrary_precision(operand) {
            match op {
                UnaryOp::Neg => return format!("{}.negate()", self.receiver(operand)),
                UnaryOp::Plus => return self.expr(operand),
                _ => {}
            }
        }
        let text = self.expr(operand);
        let doubled = match op {
            UnaryOp::Neg => text.starts_with('-'),
            UnaryOp::Plus => text.starts_with('+'),
            _ => false,
        };
        if doubled { format!("{op} {text}") } else { format!("{op}{text}") }
    }

    /// `x++`, `--x`; on a property read through accessors, the setter is called with the stepped value.
    ///
    /// Arbitrary-precision targets step by `ONE` and evaluate to the stepped value in both positions.
    pub(crate) fn increment(&self, e: &Spanned<Expr>) -> String {
        let (target, step, prefix) = match &e.node {
            Expr::Postfix(target, step) => (target, *step, false),
            Expr::Prefix(step, target) => (target, *step, true),
            _ => return self.expr(e),
        };
        let precise = self
            .static_type(target)
            .filter(|t| t.is_arbitrary_precision())
            .map(|t| {
                if t.simple_name() == conventions::BIG_INTEGER {
                    conventions::BIG_INTEGER
                } else {
                    conventions::BIG_DECIMAL
                }
            });
        let stepped = |current: &str| match (precise, step) {
            (Some(kind), IncDec::Inc) => format!("{current}.add({kind}.ONE)"),
            (Some(kind), IncDec::Dec) => format!("{current}.subtract({kind}.ONE)"),
            (None, IncDec::Inc) => format!("{current} + 1"),
            (None, IncDec::Dec) => format!("{current} - 1"),
        };

        if let Expr::Field(recv, field) = &target.node {
            if !self.is_public_member(recv, field) {
                let receiver = self.receiver(recv);
                let current = format!("{receiver}.{}()", conventions::accessor_name(field));
                return format!("{receiver}.{}({})", conventions::mutator_name(field), stepped(&current));
            }
        }
        let text = self.expr(target);
        if precise.is_some() {
            return format!("{text} = {}", stepped(&text));
        }
        if prefix { format!("{step}{text}") } else { format!("{text}{step}") }
    }
}

/// Promote translated text: digit-only literals via the string constructor, anything else via `valueOf`.
fn promote_text(text: &str, kind: &str) -> String {
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        format!("new {kind}(\"{text}\")")
    } else {
        format!("{kind}.valueOf({text})")
    }
}

#[cfg(test)]
mod tests {
    use crate::registry::{Declaration, Registry, TypeDescriptor};
    use crate::translator::tests::{expr, person_registry};

    #[test]
    fn test_power_and_plain_operators() {
        let registry = Registry::new();
        assert_eq!(expr("2 ** 3", &registry), "Math.pow(2, 3)");
        assert_eq!(expr("a && b || !c", &registry), "a && b || !c");
        assert_eq!(expr("a & b ^ c | d", &registry), "a & b ^ c | d");
        assert_eq!(expr("- -a", &registry), "- -a");
        assert_eq!(expr("-a", &registry), "-a");
    }

    #[test]
    fn test_big_decimal_arithmetic() {
        let registry = person_registry();
        assert_eq!(
            expr("total + 10", &registry),
            "total.add(new BigDecimal(\"10\"), java.math.MathContext.DECIMAL128)"
        );
        assert_eq!(
            expr("count * p.salary", &registry),
            "BigDecimal.valueOf(count).multiply(p.getSalary(), java.math.MathContext.DECIMAL128)"
        );
        assert_eq!(
            expr("10B - total", &registry),
            "new BigDecimal(\"10\").subtract(total, java.math.MathContext.DECIMAL128)"
        );
    }

    #[test]
    fn test_big_integer_arithmetic_has_no_context() {
        let registry = Registry::build([Declaration::new("n", TypeDescriptor::new("java.math.BigInteger"))]).unwrap();
        assert_eq!(expr("n % 7", &registry), "n.remainder(new BigInteger(\"7\"))");
    }

    #[test]
    fn test_big_decimal_comparison() {
        let registry = person_registry();
        assert_eq!(expr("p.salary > 1000", &registry), "p.getSalary().compareTo(new BigDecimal(\"1000\")) > 0");
        assert_eq!(expr("total <= p.salary", &registry), "total.compareTo(p.getSalary()) <= 0");
    }

    #[test]
    fn test_string_concatenation_is_not_rewritten() {
        let registry = person_registry();
        assert_eq!(expr("\"total: \" + total", &registry), "\"total: \" + total");
    }

    #[test]
    fn test_textual_operand_is_parsed() {
        let registry = Registry::build([Declaration::new("s", TypeDescriptor::new("String"))]).unwrap();
        assert_eq!(expr("s * 2", &registry), "Integer.parseInt(s) * 2");
        assert_eq!(expr("10 * y", &registry), "10 * Integer.parseInt(y)");
        assert_eq!(expr("x * z", &registry), "x * z");
    }

    #[test]
    fn test_similarity_and_membership() {
        let registry = Registry::new();
        assert_eq!(expr("a strsim b", &registry), "StringUtils.strsim(a, b)");
        assert_eq!(expr("a soundslike b", &registry), "StringUtils.soundslike(a, b)");
        assert_eq!(expr("names contains \"x\"", &registry), "names.contains(\"x\")");
        assert_eq!(expr("\"x\" in names", &registry), "names.contains(\"x\")");
        assert_eq!(expr("x in [1, 2]", &registry), "List.of(1, 2).contains(x)");
    }

    #[test]
    fn test_increments() {
        let registry = person_registry();
        assert_eq!(expr("i++", &registry), "i++");
        assert_eq!(expr("--i", &registry), "--i");
        assert_eq!(expr("p.age++", &registry), "p.setAge(p.getAge() + 1)");
        assert_eq!(expr("foo.nickName++", &registry), "foo.nickName++");
    }

    #[test]
    fn test_big_decimal_negation_and_increments() {
        let registry = person_registry();
        assert_eq!(expr("-total", &registry), "total.negate()");
        assert_eq!(expr("-p.salary", &registry), "p.getSalary().negate()");
        assert_eq!(expr("+total", &registry), "total");
        assert_eq!(expr("p.salary++", &registry), "p.setSalary(p.getSalary().add(BigDecimal.ONE))");
        assert_eq!(expr("--p.salary", &registry), "p.setSalary(p.getSalary().subtract(BigDecimal.ONE))");
        assert_eq!(expr("total++", &registry), "total = total.add(BigDecimal.ONE)");

        let registry = Registry::build([Declaration::new("n", TypeDescriptor::new("java.math.BigInteger"))]).unwrap();
        assert_eq!(expr("--n", &registry), "n = n.subtract(BigInteger.ONE)");
    }
}
