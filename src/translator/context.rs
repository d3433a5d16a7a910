//! Translation context threaded through every rewrite rule.
//!
//! A [`Context`] is a cheap value: entering a nested block or binding a local produces a new context rather than
//! mutating the current one. The only counters that must survive across sibling calls (temporary names, unresolved
//! notes) live on a [`Session`] owned by exactly one top-level translation.

use std::cell::{Cell, RefCell};

use mvel_syntax::ast::{Ident, Span};

use super::policy::DisambiguationPolicy;
use crate::config::TranslatorConfig;
use crate::registry::{Registry, TypeDescriptor};
use crate::unit::Unresolved;

/// Per-translation state: temporary-name counter and unresolved notes.
#[derive(Debug, Default)]
pub(crate) struct Session {
    temps: Cell<usize>,
    unresolved: RefCell<Vec<Unresolved>>,
}

impl Session {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn into_unresolved(self) -> Vec<Unresolved> {
        self.unresolved.into_inner()
    }
}

/// A name bound inside the translated body, shadowing any registry entry of the same name.
#[derive(Debug, Clone)]
pub(crate) struct Local {
    pub name: Ident,
    pub ty: Option<TypeDescriptor>,
}

#[derive(Clone)]
pub(crate) struct Context<'a> {
    pub registry: &'a Registry,
    pub config: &'a TranslatorConfig,
    pub policy: &'a dyn DisambiguationPolicy,
    session: &'a Session,
    /// Current block nesting (indent level).
    pub depth: usize,
    locals: Vec<Local>,
    /// Translated subject of the enclosing predicate block, if any.
    pub subject: Option<String>,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        registry: &'a Registry,
        config: &'a TranslatorConfig,
        policy: &'a dyn DisambiguationPolicy,
        session: &'a Session,
    ) -> Self {
        Self {
            registry,
            config,
            policy,
            session,
            depth: 0,
            locals: Vec::new(),
            subject: None,
        }
    }

    /// One block level deeper.
    pub(crate) fn nested(&self) -> Self {
        let mut ctx = self.clone();
        ctx.depth += 1;
        ctx
    }

    pub(crate) fn with_local(&self, name: impl Into<Ident>, ty: Option<TypeDescriptor>) -> Self {
        let mut ctx = self.clone();
        ctx.locals.push(Local { name: name.into(), ty });
        ctx
    }

    pub(crate) fn with_locals<I>(&self, locals: I) -> Self
    where
        I: IntoIterator<Item = (Ident, Option<TypeDescriptor>)>,
    {
        let mut ctx = self.clone();
        ctx.locals
            .extend(locals.into_iter().map(|(name, ty)| Local { name, ty }));
        ctx
    }

    pub(crate) fn with_subject(&self, subject: impl Into<String>) -> Self {
        let mut ctx = self.clone();
        ctx.subject = Some(subject.into());
        ctx
    }

    pub(crate) fn indent(&self) -> String {
        " ".repeat(self.depth * self.config.indent_width)
    }

    pub(crate) fn is_local(&self, name: &str) -> bool {
        self.locals.iter().any(|l| l.name == name)
    }

    /// Declared type of the innermost local named `name`.
    pub(crate) fn local_type(&self, name: &str) -> Option<&TypeDescriptor> {
        self.locals
            .iter()
            .rev()
            .find(|l| l.name == name)
            .and_then(|l| l.ty.as_ref())
    }

    /// A fresh temporary name (`__t0`, `__t1`, ...), unique within this translation.
    pub(crate) fn next_temp(&self) -> String {
        let n = self.session.temps.get();
        self.session.temps.set(n + 1);
        format!("__t{n}")
    }

    pub(crate) fn record_unresolved(&self, construct: &'static str, span: Span) {
        tracing::warn!(construct, start = span.start, end = span.end, "unresolved construct left behind a marker");
        self.session
            .unresolved
            .borrow_mut()
            .push(Unresolved { construct, span });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::policy::ConventionPolicy;

    #[test]
    fn test_nested_and_locals_do_not_leak() {
        let registry = Registry::new();
        let config = TranslatorConfig::default();
        let session = Session::new();
        let root = Context::new(&registry, &config, &ConventionPolicy, &session);

        let inner = root.nested().with_local("i", Some(TypeDescriptor::new("int")));
        assert_eq!(inner.indent(), "    ");
        assert!(inner.is_local("i"));
        assert_eq!(inner.local_type("i").map(|t| t.name.as_str()), Some("int"));

        assert_eq!(root.indent(), "");
        assert!(!root.is_local("i"));
    }

    #[test]
    fn test_temps_are_shared_across_siblings() {
        let registry = Registry::new();
        let config = TranslatorConfig::default();
        let session = Session::new();
        let root = Context::new(&registry, &config, &ConventionPolicy, &session);

        assert_eq!(root.nested().next_temp(), "__t0");
        assert_eq!(root.nested().next_temp(), "__t1");
        assert_eq!(root.next_temp(), "__t2");
    }

    #[test]
    fn test_unresolved_notes_are_collected() {
        let registry = Registry::new();
        let config = TranslatorConfig::default();
        let session = Session::new();
        {
            let ctx = Context::new(&registry, &config, &ConventionPolicy, &session);
            ctx.record_unresolved("nested safe navigation", Span::new(0, 7));
        }
        let notes = session.into_unresolved();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].construct, "nested safe navigation");
    }
}
