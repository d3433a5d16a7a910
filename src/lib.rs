#![forbid(unsafe_code)]
//! MVEL expression language front end.
//!
//! Parses MVEL expressions and statement blocks and translates them, against a registry of declared names and
//! types, into Java source text. Compiling that text is left to a host (see [`evaluator`]).
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. Malformed input is a
//!   [`syntax::diagnostics::SyntaxError`], never a panic; translation of a valid tree is total.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Generated code**: The translator emits Java text that may itself throw at run time (e.g. `Integer.parseInt`).
//!   That is the target program's behaviour, not a panic in this crate.
//!
//! - **True invariants**: Registry metadata lookups that can only miss on a programming error use
//!   `.expect("... info missing")`.
//!
//! ## Examples
//! ```rust
//! use mvel::registry::{Declaration, Registry, TypeDescriptor};
//! use mvel::syntax::ast::ParseMode;
//!
//! let registry = Registry::build([
//!     Declaration::new("total", TypeDescriptor::new("java.math.BigDecimal")),
//! ])
//! .unwrap();
//!
//! let unit = mvel::transpile("total * 2", ParseMode::Expression, &registry).unwrap();
//! assert_eq!(unit.body, "total.multiply(new BigDecimal(\"2\"), java.math.MathContext.DECIMAL128)");
//! assert_eq!(unit.referenced_names, ["total"]);
//! ```

pub mod config;
pub mod error;
pub mod evaluator;
pub mod registry;
pub mod translator;
pub mod unit;

pub use mvel_syntax as syntax;

pub use config::TranslatorConfig;
pub use error::TranspileError;
pub use evaluator::{Evaluator, EvaluatorError, EvaluatorSource, HostCompiler};
pub use registry::{Declaration, Registry, RegistryError, TypeDescriptor, TypeInfo};
pub use syntax::ast::ParseMode;
pub use syntax::diagnostics::SyntaxError;
pub use translator::{Translator, translate};
pub use unit::{TranslatedUnit, Unresolved};

/// Parse `source` in `mode` and translate it against `registry` with the default configuration.
#[tracing::instrument(skip_all, fields(len = source.len(), mode = ?mode))]
pub fn transpile(source: &str, mode: ParseMode, registry: &Registry) -> Result<TranslatedUnit, TranspileError> {
    let root = syntax::parser::parse_source(source, mode)?;
    Ok(translate(&root, registry))
}
