//! Errors for the source-to-source pipeline.

use miette::Diagnostic;
use mvel_syntax::diagnostics::SyntaxError;
use thiserror::Error;

/// Failure of [`crate::transpile`]. Translation itself cannot fail, so only front-end errors appear here.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum TranspileError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),
}

impl TranspileError {
    /// The underlying syntax error.
    pub fn syntax(&self) -> &SyntaxError {
        match self {
            Self::Syntax(err) => err,
        }
    }
}

#[cfg(test)]
mod tests {
    use mvel_syntax::ast::ParseMode;

    use crate::registry::Registry;
    use crate::transpile;

    #[test]
    fn test_syntax_error_passes_through() {
        let err = transpile("a +", ParseMode::Expression, &Registry::new()).unwrap_err();
        let syntax = err.syntax();
        assert_eq!(syntax.line, 1);
        assert_eq!(err.to_string(), syntax.to_string());
    }
}
