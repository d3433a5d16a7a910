//! Inline snapshot tests for statement-level translation
//!
//! Multi-line output (blocks, switch, try, evaluator classes) is easier to review as a snapshot than as an escaped
//! string literal.
//!
//! Run with: `cargo test --test snapshot_tests`
//! Review changes: `cargo insta review`

use mvel::evaluator::EvaluatorSource;
use mvel::registry::{Declaration, Registry, TypeDescriptor, TypeInfo};
use mvel::syntax::ast::ParseMode;
use mvel::transpile;

fn registry() -> Registry {
    Registry::build([
        Declaration::new("p", TypeDescriptor::new("org.mvel3.Person")),
        Declaration::new("people", TypeDescriptor::new("java.util.List").with_generics("org.mvel3.Person")),
        Declaration::new("list", TypeDescriptor::new("java.util.List").with_generics("java.math.BigDecimal")),
        Declaration::new("total", TypeDescriptor::new("java.math.BigDecimal")),
        Declaration::new("n", TypeDescriptor::new("int")),
    ])
    .expect("declarations are unique")
    .with_type(
        TypeInfo::new("org.mvel3.Person")
            .with_field("salary", TypeDescriptor::new("java.math.BigDecimal"))
            .with_field("name", TypeDescriptor::new("String"))
            .with_field("age", TypeDescriptor::new("int")),
    )
}

fn program(source: &str) -> String {
    transpile(source, ParseMode::Program, &registry())
        .unwrap_or_else(|e| panic!("{source}: {e}"))
        .body
}

#[test]
fn test_loop_with_mutation_block() {
    let out = program(
        r#"
for (Person p : people) {
    if (p.age > 18 && p.name != null) {
        p{ salary = 100 };
    } else {
        continue;
    }
}
"#,
    );
    insta::assert_snapshot!(out, @r#"
for (org.mvel3.Person p : people) {
    if (p.getAge() > 18 && p.getName() != null) {
        p.setSalary(new BigDecimal("100"));
    } else {
        continue;
    }
}
"#);
}

#[test]
fn test_switch_expression_in_declaration() {
    let out = program(
        r#"
String label = switch (p.age) {
    case 0 -> "newborn";
    case 1, 2, 3 -> {
        log(p);
        "toddler";
    }
    default -> "other";
};
"#,
    );
    insta::assert_snapshot!(out, @r#"
String label = switch (p.getAge()) {
    case 0 -> "newborn";
    case 1, 2, 3 -> {
        log(p);
        yield "toddler";
    }
    default -> "other";
};
"#);
}

#[test]
fn test_labelled_loop_with_try() {
    let out = program(
        r#"
int sum = 0;
outer:
while (sum < 100) {
    try {
        sum += compute(sum);
    } catch (ArithmeticException e) {
        break outer;
    } finally {
        sum++;
    }
}
"#,
    );
    insta::assert_snapshot!(out, @r#"
int sum = 0;
outer: while (sum < 100) {
    try {
        sum += compute(sum);
    } catch (ArithmeticException e) {
        break outer;
    } finally {
        sum++;
    }
}
"#);
}

#[test]
fn test_lambda_block_body() {
    let out = program("list.forEach(x -> { total = total.add(x); });");
    insta::assert_snapshot!(out, @r#"
list.forEach(x -> {
    total = total.add(x);
});
"#);
}

#[test]
fn test_evaluator_class_for_program() {
    let registry = registry();
    let unit = transpile("if (n > 0) { return n * 2; } return 0;", ParseMode::Program, &registry).unwrap();
    let class = EvaluatorSource::new("Twice").render(&unit, &registry);
    insta::assert_snapshot!(class, @r#"
package org.mvel3.generated;

import java.math.BigDecimal;
import java.math.BigInteger;
import java.util.List;
import java.util.Map;
import java.util.stream.Collectors;
import org.mvel3.util.StringUtils;

public class Twice implements org.mvel3.Evaluator<Map<String, Object>, Void, Object> {

    public Object eval(Map<String, Object> context) {
        int n = (int) context.get("n");
        if (n > 0) {
            return n * 2;
        }
        return 0;
    }
}
"#);
}
