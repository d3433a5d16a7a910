//! Evaluator contract and evaluator class assembly.
//!
//! Compiling generated text into something callable is a host concern. This module defines the shape of that
//! exchange: [`EvaluatorSource`] wraps a [`TranslatedUnit`] in a complete class, [`HostCompiler`] is the service
//! that compiles it, and [`Evaluator`] is what the service hands back.
//!
//! ## Notes
//! - Each [`Evaluator`] entry point defaults to [`EvaluatorError::NotImplemented`], so an evaluator only implements
//!   the arities it supports and the rest fail when called, not when the evaluator is built.
//! - A body that does not compile surfaces as [`EvaluatorError::HostCompile`] carrying the host's diagnostics.
//!
//! ## Examples
//! ```rust
//! use mvel::evaluator::EvaluatorSource;
//! use mvel::registry::{Declaration, Registry, TypeDescriptor};
//! use mvel::syntax::ast::ParseMode;
//!
//! let registry = Registry::build([Declaration::new("n", TypeDescriptor::new("int"))]).unwrap();
//! let unit = mvel::transpile("n + 1", ParseMode::Expression, &registry).unwrap();
//! let source = EvaluatorSource::new("AddOne").render(&unit, &registry);
//! assert!(source.contains("int n = (int) context.get(\"n\");"));
//! assert!(source.contains("return n + 1;"));
//! ```

use miette::Diagnostic;
use mvel_syntax::ast::ParseMode;
use thiserror::Error;

use crate::registry::{Declaration, Registry, TypeDescriptor};
use crate::unit::TranslatedUnit;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum EvaluatorError {
    /// The host rejected the generated source.
    #[error("generated source does not compile: {message}")]
    #[diagnostic(code(mvel::host_compile))]
    HostCompile { message: String, diagnostics: Vec<String> },

    /// The evaluator does not support this entry point.
    #[error("evaluator does not implement `{operation}`")]
    #[diagnostic(code(mvel::not_implemented))]
    NotImplemented { operation: &'static str },
}

impl EvaluatorError {
    pub fn host_compile(message: impl Into<String>) -> Self {
        Self::HostCompile {
            message: message.into(),
            diagnostics: Vec::new(),
        }
    }
}

// ============================================================================
// Contract
// ============================================================================

/// A compiled expression: `C` is the context (usually a name → value map), `R` the root object, `O` the result.
pub trait Evaluator<C, R, O> {
    fn eval(&self, _context: &C) -> Result<O, EvaluatorError> {
        Err(EvaluatorError::NotImplemented { operation: "eval" })
    }

    fn eval_with_root(&self, _context: &C, _root: &R) -> Result<O, EvaluatorError> {
        Err(EvaluatorError::NotImplemented {
            operation: "eval_with_root",
        })
    }

    fn eval_root(&self, _root: &R) -> Result<O, EvaluatorError> {
        Err(EvaluatorError::NotImplemented { operation: "eval_root" })
    }
}

/// What a host needs to compile one evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest<'a> {
    pub function_name: &'a str,
    /// Full class text from [`EvaluatorSource::render`].
    pub source: String,
    /// The translated body alone.
    pub body: &'a str,
    pub return_type: &'a TypeDescriptor,
    pub imports: &'a [String],
    /// Declarations for the names the body references, in reference order.
    pub declarations: Vec<&'a Declaration>,
}

/// The downstream compile-and-load service.
pub trait HostCompiler {
    type Output;

    fn compile(&self, request: &CompileRequest<'_>) -> Result<Self::Output, EvaluatorError>;
}

// ============================================================================
// Class assembly
// ============================================================================

const DEFAULT_IMPORTS: &[&str] = &[
    "java.math.BigDecimal",
    "java.math.BigInteger",
    "java.util.List",
    "java.util.Map",
    "java.util.stream.Collectors",
    "org.mvel3.util.StringUtils",
];

/// Builder for the class text around a translated body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatorSource {
    package: String,
    class_name: String,
    imports: Vec<String>,
    interface: String,
    context_type: String,
    root_type: String,
    return_type: TypeDescriptor,
    context_name: String,
    indent_width: usize,
}

impl EvaluatorSource {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            package: "org.mvel3.generated".to_string(),
            class_name: class_name.into(),
            imports: DEFAULT_IMPORTS.iter().map(|s| s.to_string()).collect(),
            interface: "org.mvel3.Evaluator".to_string(),
            context_type: "Map<String, Object>".to_string(),
            root_type: "Void".to_string(),
            return_type: TypeDescriptor::new("Object"),
            context_name: "context".to_string(),
            indent_width: 4,
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    pub fn with_import(mut self, import: impl Into<String>) -> Self {
        let import = import.into();
        if !self.imports.contains(&import) {
            self.imports.push(import);
        }
        self
    }

    pub fn with_return_type(mut self, ty: TypeDescriptor) -> Self {
        self.return_type = ty;
        self
    }

    pub fn with_root_type(mut self, ty: impl Into<String>) -> Self {
        self.root_type = ty.into();
        self
    }

    /// Must match `TranslatorConfig::context_name` when write-back is enabled.
    pub fn with_context_name(mut self, name: impl Into<String>) -> Self {
        self.context_name = name.into();
        self
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Render the complete class. Every referenced name becomes a local read from the context map; an expression
    /// body is returned, a program body is emitted as written.
    #[tracing::instrument(skip_all, fields(class = %self.class_name, referenced = unit.referenced_names.len()))]
    pub fn render(&self, unit: &TranslatedUnit, registry: &Registry) -> String {
        let pad = " ".repeat(self.indent_width);
        let body_pad = pad.repeat(2);
        let ret = self.return_type.to_string();

        let mut out = format!("package {};\n\n", self.package);
        for import in &self.imports {
            out.push_str(&format!("import {import};\n"));
        }
        out.push('\n');
        out.push_str(&format!(
            "public class {} implements {}<{}, {}, {ret}> {{\n\n",
            self.class_name, self.interface, self.context_type, self.root_type
        ));
        out.push_str(&format!(
            "{pad}public {ret} eval({} {}) {{\n",
            self.context_type, self.context_name
        ));

        for name in &unit.referenced_names {
            let Some(decl) = registry.resolve_root(name) else {
                tracing::debug!(name = name.as_str(), "referenced name has no declaration");
                continue;
            };
            out.push_str(&format!(
                "{body_pad}{ty} {name} = ({ty}) {}.get(\"{}\");\n",
                self.context_name,
                decl.name,
                ty = decl.ty
            ));
        }

        match unit.mode {
            ParseMode::Expression => out.push_str(&format!("{body_pad}return {};\n", unit.body)),
            ParseMode::Program => {
                for line in unit.body.lines() {
                    if line.is_empty() {
                        out.push('\n');
                    } else {
                        out.push_str(&format!("{body_pad}{line}\n"));
                    }
                }
            }
        }

        out.push_str(&format!("{pad}}}\n}}\n"));
        out
    }

    /// Everything a [`HostCompiler`] needs for `unit`.
    pub fn request<'a>(&'a self, unit: &'a TranslatedUnit, registry: &'a Registry) -> CompileRequest<'a> {
        CompileRequest {
            function_name: &self.class_name,
            source: self.render(unit, registry),
            body: &unit.body,
            return_type: &self.return_type,
            imports: &self.imports,
            declarations: unit
                .referenced_names
                .iter()
                .filter_map(|name| registry.resolve_root(name))
                .collect(),
        }
    }

    /// Render `unit` and hand it to `host`.
    pub fn compile<H: HostCompiler>(
        &self,
        host: &H,
        unit: &TranslatedUnit,
        registry: &Registry,
    ) -> Result<H::Output, EvaluatorError> {
        if !unit.is_complete() {
            tracing::warn!(
                class = %self.class_name,
                unresolved = unit.unresolved.len(),
                "compiling a body with unresolved constructs"
            );
        }
        host.compile(&self.request(unit, registry))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::transpile;

    struct Doubler;

    impl Evaluator<HashMap<String, i64>, (), i64> for Doubler {
        fn eval(&self, context: &HashMap<String, i64>) -> Result<i64, EvaluatorError> {
            Ok(context.get("n").copied().unwrap_or_default() * 2)
        }
    }

    /// Accepts any source whose body has no unresolved marker.
    struct StrictHost;

    impl HostCompiler for StrictHost {
        type Output = Doubler;

        fn compile(&self, request: &CompileRequest<'_>) -> Result<Doubler, EvaluatorError> {
            if request.body.contains("/* unresolved") {
                return Err(EvaluatorError::HostCompile {
                    message: format!("{}: illegal start of expression", request.function_name),
                    diagnostics: vec!["line 1: illegal start of expression".to_string()],
                });
            }
            Ok(Doubler)
        }
    }

    fn registry() -> Registry {
        Registry::build([
            Declaration::new("n", TypeDescriptor::new("int")),
            Declaration::new("a", TypeDescriptor::new("org.mvel3.Person")),
        ])
        .unwrap()
    }

    #[test]
    fn test_unimplemented_arities_fail_at_call_time() {
        let evaluator = Doubler;
        let context = HashMap::from([("n".to_string(), 21)]);
        assert_eq!(evaluator.eval(&context), Ok(42));
        assert_eq!(
            evaluator.eval_root(&()),
            Err(EvaluatorError::NotImplemented { operation: "eval_root" })
        );
        assert_eq!(
            evaluator.eval_with_root(&context, &()).unwrap_err().to_string(),
            "evaluator does not implement `eval_with_root`"
        );
    }

    #[test]
    fn test_render_expression_class() {
        let registry = registry();
        let unit = transpile("n * 2", ParseMode::Expression, &registry).unwrap();
        let source = EvaluatorSource::new("Doubler")
            .with_return_type(TypeDescriptor::new("Integer"))
            .render(&unit, &registry);
        let expected = "\
package org.mvel3.generated;

import java.math.BigDecimal;
import java.math.BigInteger;
import java.util.List;
import java.util.Map;
import java.util.stream.Collectors;
import org.mvel3.util.StringUtils;

public class Doubler implements org.mvel3.Evaluator<Map<String, Object>, Void, Integer> {

    public Integer eval(Map<String, Object> context) {
        int n = (int) context.get(\"n\");
        return n * 2;
    }
}
";
        assert_eq!(source, expected);
    }

    #[test]
    fn test_render_program_body_is_indented() {
        let registry = registry();
        let unit = transpile("n += 1; return n;", ParseMode::Program, &registry).unwrap();
        let source = EvaluatorSource::new("Inc").render(&unit, &registry);
        assert!(source.contains("        n += 1;\n        return n;\n    }\n}\n"));
    }

    #[test]
    fn test_request_carries_declarations_in_reference_order() {
        let registry = registry();
        let unit = transpile("a.age + n", ParseMode::Expression, &registry).unwrap();
        let builder = EvaluatorSource::new("Sum").with_import("java.util.Optional");
        let request = builder.request(&unit, &registry);
        let names: Vec<&str> = request.declarations.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["a", "n"]);
        assert_eq!(request.body, "a.getAge() + n");
        assert!(request.imports.iter().any(|i| i == "java.util.Optional"));
    }

    #[test]
    fn test_host_compile_error_surfaces() {
        let registry = registry();
        let ok = transpile("n", ParseMode::Expression, &registry).unwrap();
        assert!(EvaluatorSource::new("Ok").compile(&StrictHost, &ok, &registry).is_ok());

        let nested = transpile("a?.b?.c", ParseMode::Expression, &registry).unwrap();
        assert!(!nested.is_complete());
        let err = EvaluatorSource::new("Bad")
            .compile(&StrictHost, &nested, &registry)
            .err()
            .unwrap();
        assert!(matches!(err, EvaluatorError::HostCompile { ref diagnostics, .. } if diagnostics.len() == 1));
    }
}
