//! Translation output.

use mvel_syntax::ast::{ParseMode, Span};

/// A construct the translator could not express, left in the output behind a marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    /// Short description of the construct, e.g. `"nested safe navigation"`.
    pub construct: &'static str,
    pub span: Span,
}

/// Generated source text plus the bound names it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedUnit {
    /// Target source for the body of one evaluation function.
    pub body: String,
    /// Registry-bound names the body reads or writes, deduplicated, in first-occurrence order.
    pub referenced_names: Vec<String>,
    /// Markers left in `body`; empty when the translation is complete.
    pub unresolved: Vec<Unresolved>,
    /// Whether `body` is a single expression or a statement sequence.
    pub mode: ParseMode,
}

impl TranslatedUnit {
    /// `true` if no unresolved marker was emitted.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}
