//! Translate a parsed MVEL tree into Java source text.
//!
//! This module defines [`Translator`] and wires together the focused submodules that implement one rewrite rule per
//! node kind. `mod.rs` only owns the entry point; every rule is an `impl Context` block in its own submodule.
//!
//! ## Notes
//! - Translation is total over syntactically valid trees. When the registry lacks the type information a rule needs,
//!   the rule falls back to its default branch and emits a `tracing::debug!` event naming the rule.
//! - The one construct that cannot be expressed (a guarded access whose receiver is itself guarded) is emitted behind
//!   [`TranslatorConfig::unresolved_marker`] and recorded on [`TranslatedUnit::unresolved`].
//! - A [`Translator`] holds no per-call state and can be shared across threads; each call to
//!   [`Translator::translate`] owns its own temporary-name counter.
//!
//! ## See also
//! - [`policy`]: name-based guesses used when the registry is silent
//! - [`expr`]: expression dispatch, literals, collections
//! - [`access`]: member, index, and guarded access
//! - [`arith`]: binary and unary operators, arbitrary-precision arithmetic
//! - [`assign`]: assignment targets and value coercion
//! - [`blocks`]: projection, selection, mutation and predicate blocks, coercion
//! - [`stmt`]: statements and blocks
//! - [`switch`]: switch statements and expressions
//! - [`names`]: referenced-name collection

mod access;
mod arith;
mod assign;
mod blocks;
mod context;
mod expr;
mod names;
pub mod policy;
mod stmt;
mod switch;
mod types;

use mvel_syntax::ast::Root;

use self::context::{Context, Session};
use self::policy::{ConventionPolicy, DisambiguationPolicy};
use crate::config::TranslatorConfig;
use crate::registry::Registry;
use crate::unit::TranslatedUnit;

/// Rewrites a parsed tree against one registry.
///
/// ## Examples
///
/// ```rust
/// use mvel::registry::{Declaration, Registry, TypeDescriptor};
/// use mvel::syntax::ast::ParseMode;
/// use mvel::syntax::parser::parse_source;
/// use mvel::translator::Translator;
///
/// let registry = Registry::build([Declaration::new("p", TypeDescriptor::new("Person"))]).unwrap();
/// let root = parse_source("p.age > 18", ParseMode::Expression).unwrap();
///
/// let unit = Translator::new(&registry).translate(&root);
/// assert_eq!(unit.body, "p.getAge() > 18");
/// assert_eq!(unit.referenced_names, ["p"]);
/// ```
#[derive(Debug)]
pub struct Translator<'r> {
    registry: &'r Registry,
    config: TranslatorConfig,
    policy: Box<dyn DisambiguationPolicy>,
}

impl<'r> Translator<'r> {
    /// A translator with the default configuration and [`ConventionPolicy`].
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            config: TranslatorConfig::default(),
            policy: Box::new(ConventionPolicy),
        }
    }

    pub fn with_config(mut self, config: TranslatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the disambiguation policy.
    pub fn with_policy(mut self, policy: impl DisambiguationPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Translate one parsed unit.
    ///
    /// The result depends only on `root`, the registry, the configuration and the policy: translating the same tree
    /// twice yields byte-identical output.
    #[tracing::instrument(skip_all, fields(mode = ?root.mode(), declarations = self.registry.len()))]
    pub fn translate(&self, root: &Root) -> TranslatedUnit {
        let session = Session::new();
        let body = {
            let ctx = Context::new(self.registry, &self.config, self.policy.as_ref(), &session);
            match root {
                Root::Expression(expr) => ctx.expr(expr),
                Root::Program(program) => ctx.program(&program.statements),
            }
        };
        let referenced_names = names::referenced_names(root, self.registry, &self.config);
        let unresolved = session.into_unresolved();
        tracing::debug!(
            body_len = body.len(),
            referenced = referenced_names.len(),
            unresolved = unresolved.len(),
            "translated unit"
        );
        TranslatedUnit {
            body,
            referenced_names,
            unresolved,
            mode: root.mode(),
        }
    }
}

/// Translate `root` with the default configuration and policy.
pub fn translate(root: &Root, registry: &Registry) -> TranslatedUnit {
    Translator::new(registry).translate(root)
}
