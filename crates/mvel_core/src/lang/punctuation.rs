//! Punctuation vocabulary.
//!
//! This module defines the canonical set of non-operator punctuation tokens used by the lexer/parser: delimiters,
//! separators, access/path markers, and arrows.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - This module is vocabulary only (spellings + metadata). It does not tokenize source text.
//! - `?.` is punctuation (an access marker), while `?` alone is the ternary marker.
//!
//! ## Examples
//! ```rust
//! use mvel_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("?."), Some(PunctuationId::QuestionDot));
//! assert_eq!(punctuation::as_str(PunctuationId::Arrow), "->");
//! ```

use super::registry::{Example, Origin, Since, Stability};

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets and braces.
    Delimiter,
    /// Separators like `,`, `;` and `:`.
    Separator,
    /// Access/path markers like `.`, `?.` and `::`.
    Access,
    /// Arrow markers like `->`.
    Arrow,
    /// Misc markers like `?`.
    Marker,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    // Separators / markers
    Comma,
    Semicolon,
    Colon,
    Question,

    // Access / path
    Dot,
    QuestionDot,
    ColonColon,

    // Structural arrows
    Arrow,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
    pub origin: Origin,
    pub since: Since,
    pub stability: Stability,
    pub examples: &'static [Example],
}

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    info(PunctuationId::Comma, ",", PunctuationCategory::Separator, Origin::Java),
    info(PunctuationId::Semicolon, ";", PunctuationCategory::Separator, Origin::Java),
    info(PunctuationId::Colon, ":", PunctuationCategory::Separator, Origin::Java),
    info(PunctuationId::Question, "?", PunctuationCategory::Marker, Origin::Java),
    info(PunctuationId::Dot, ".", PunctuationCategory::Access, Origin::Java),
    info(PunctuationId::QuestionDot, "?.", PunctuationCategory::Access, Origin::Mvel),
    info(PunctuationId::ColonColon, "::", PunctuationCategory::Access, Origin::Java),
    info(PunctuationId::Arrow, "->", PunctuationCategory::Arrow, Origin::Java),
    info(PunctuationId::LParen, "(", PunctuationCategory::Delimiter, Origin::Java),
    info(PunctuationId::RParen, ")", PunctuationCategory::Delimiter, Origin::Java),
    info(PunctuationId::LBracket, "[", PunctuationCategory::Delimiter, Origin::Java),
    info(PunctuationId::RBracket, "]", PunctuationCategory::Delimiter, Origin::Java),
    info(PunctuationId::LBrace, "{", PunctuationCategory::Delimiter, Origin::Java),
    info(PunctuationId::RBrace, "}", PunctuationCategory::Delimiter, Origin::Java),
];

/// Return the canonical spelling for a punctuation token.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a punctuation token.
pub fn category(id: PunctuationId) -> PunctuationCategory {
    info_for(id).category
}

/// Return the full metadata entry for a punctuation token.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION
        .iter()
        .find(|p| p.id == id)
        .expect("punctuation info missing")
}

/// Resolve a punctuation spelling to its identifier.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

const fn info(
    id: PunctuationId,
    canonical: &'static str,
    category: PunctuationCategory,
    origin: Origin,
) -> PunctuationInfo {
    PunctuationInfo {
        id,
        canonical,
        category,
        origin,
        since: Since(3, 0),
        stability: Stability::Stable,
        examples: &[],
    }
}
