//! Diagnostics for the MVEL syntax frontend.
//!
//! Lexing and parsing are fail-fast: the first problem becomes a [`SyntaxError`] that carries the byte span, the
//! 1-based line/column, and the grammar rule that was being matched.
//!
//! ## Notes
//! - [`SyntaxError`] implements [`miette::Diagnostic`]. Once [`SyntaxError::with_source`] has attached the input text,
//!   a host can render it with `miette`'s graphical reporter.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::ast::Span;

/// A parse-time error with location information.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("syntax error at {line}:{column} in {rule}: {message}")]
#[diagnostic(code(mvel::syntax))]
pub struct SyntaxError {
    pub message: String,
    /// Grammar rule being matched when the error occurred (e.g. `"statement"`, `"switch case"`).
    pub rule: &'static str,
    pub span: Span,
    pub line: usize,
    pub column: usize,
    pub hints: Vec<String>,
    #[source_code]
    pub source_code: String,
    #[label("here")]
    pub location: SourceSpan,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, rule: &'static str, span: Span, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            rule,
            span,
            line,
            column,
            hints: Vec::new(),
            source_code: String::new(),
            location: to_source_span(span),
        }
    }

    /// Build an error for a span, computing line/column from `source`.
    pub fn at_offset(message: impl Into<String>, rule: &'static str, span: Span, source: &str) -> Self {
        let (line, column, _) = get_line_info(source, span.start);
        Self::new(message, rule, span, line, column).with_source(source)
    }

    /// Attach the input text so the diagnostic can render a snippet.
    pub fn with_source(mut self, source: &str) -> Self {
        self.source_code = source.to_string();
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

fn to_source_span(span: Span) -> SourceSpan {
    (span.start, span.end.saturating_sub(span.start)).into()
}

/// Return the 1-based line and column of `offset`, plus the text of that line.
pub fn get_line_info(source: &str, offset: usize) -> (usize, usize, &str) {
    let offset = offset.min(source.len());
    let mut line_num = 1;
    let mut line_start = 0;

    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line_num += 1;
            line_start = i + 1;
        }
    }

    let line_end = source[line_start..]
        .find('\n')
        .map(|i| line_start + i)
        .unwrap_or(source.len());

    let line_text = &source[line_start..line_end];
    let col_num = offset - line_start + 1;

    (line_num, col_num, line_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_line_info() {
        let source = "a = 1;\nb = a +;\n";
        assert_eq!(get_line_info(source, 0), (1, 1, "a = 1;"));
        assert_eq!(get_line_info(source, 14), (2, 8, "b = a +;"));
    }

    #[test]
    fn test_display_names_rule_and_position() {
        let err = SyntaxError::new("expected ')'", "call arguments", Span::new(3, 4), 1, 4);
        assert_eq!(err.to_string(), "syntax error at 1:4 in call arguments: expected ')'");
    }

    #[test]
    fn test_at_offset_attaches_source() {
        let err = SyntaxError::at_offset("boom", "expression", Span::new(7, 8), "x = 1;\ny");
        assert_eq!((err.line, err.column), (2, 1));
        assert_eq!(err.source_code, "x = 1;\ny");
        assert_eq!(err.location, SourceSpan::from((7, 1)));
    }
}
