//! Translator configuration
//!
//! Output layout and the well-known names the generated code relies on.

use mvel_core::lang::conventions;

/// Translation configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorConfig {
    /// Number of spaces per indentation level inside blocks
    pub indent_width: usize,
    /// Text placed between top-level statements
    pub statement_separator: String,
    /// Lambda parameter bound inside projections and selections
    pub iteration_variable: String,
    /// Rounding context passed to decimal arithmetic
    pub decimal_context: String,
    /// Name of the context map in the generated evaluator
    pub context_name: String,
    /// Also write compound assignments to bound variables back into the context map
    pub context_writeback: bool,
    /// Placeholder emitted in front of constructs the translator cannot express
    pub unresolved_marker: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            statement_separator: "\n".to_string(),
            iteration_variable: conventions::ITERATION_VARIABLE.to_string(),
            decimal_context: conventions::DECIMAL_CONTEXT.to_string(),
            context_name: "context".to_string(),
            context_writeback: false,
            unresolved_marker: "/* unresolved: nested safe navigation */".to_string(),
        }
    }
}

impl TranslatorConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn with_statement_separator(mut self, separator: impl Into<String>) -> Self {
        self.statement_separator = separator.into();
        self
    }

    pub fn with_iteration_variable(mut self, name: impl Into<String>) -> Self {
        self.iteration_variable = name.into();
        self
    }

    pub fn with_decimal_context(mut self, context: impl Into<String>) -> Self {
        self.decimal_context = context.into();
        self
    }

    pub fn with_context_name(mut self, name: impl Into<String>) -> Self {
        self.context_name = name.into();
        self
    }

    /// Enable `context.put(...)` write-back for assignments to bound variables
    pub fn with_context_writeback(mut self, enabled: bool) -> Self {
        self.context_writeback = enabled;
        self
    }

    pub fn with_unresolved_marker(mut self, marker: impl Into<String>) -> Self {
        self.unresolved_marker = marker.into();
        self
    }
}
