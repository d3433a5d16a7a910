//! Token types for the MVEL lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words (including word operators like `contains`)
//! - `Operator(OperatorId)` for symbol operators
//! - `Punctuation(PunctuationId)` for punctuation tokens
//!
//! ## Notes
//! - Literal tokens keep their source spelling; nothing is parsed into host numbers.
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use crate::ast::Span;
use mvel_core::lang::keywords::{self, KeywordId};
use mvel_core::lang::operators::OperatorId;
use mvel_core::lang::punctuation::PunctuationId;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    Ident(String),
    /// Integer spelling, including any radix prefix, underscores, and `L` suffix.
    Int(String),
    /// Floating-point spelling, including any `f`/`d` suffix.
    Float(String),
    /// Raw text between single quotes.
    Char(String),
    /// Raw text between double quotes, ready to re-emit inside `"..."`.
    String(String),
    /// Raw text between `"""` delimiters.
    TextBlock(String),
    /// Raw pattern text between `~/` and `/`.
    Regex(String),
    /// Number with a trailing unit tag (`10B`, `5pounds`).
    Unit { value: String, unit: String },

    // ========== Special ==========
    Eof,
}

/// A token with its kind, source text, and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
    /// 1-based line of the first character.
    pub line: usize,
    /// 1-based column (in bytes) of the first character.
    pub column: usize,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            line,
            column,
        }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
