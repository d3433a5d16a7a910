//! Define the reserved keyword vocabulary for MVEL.
//!
//! This module is the single source of truth for reserved words: a stable identifier ([`KeywordId`]) plus a const
//! metadata table ([`KEYWORDS`]) that records canonical spellings, categories, and provenance.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Some reserved words are also “word operators” (e.g. `contains`, `strsim`). If you need operator
//!   precedence/fixity, use [`crate::lang::operators`].
//! - Contextual words (`var`, `when`) and primitive type names are deliberately **not** reserved; the parser
//!   recognizes them by position.
//!
//! ## Examples
//! ```rust
//! use mvel_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("soundslike"), Some(KeywordId::SoundsLike));
//! assert_eq!(keywords::as_str(KeywordId::InstanceOf), "instanceof");
//! assert_eq!(keywords::from_str("var"), None);
//! ```
//!
//! ## See also
//! - [`crate::lang::operators`] for operator precedence/fixity metadata.

use super::registry::{Example, Origin, Since, Stability};

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Control flow / statements
    If,
    Else,
    For,
    While,
    Do,
    Switch,
    Case,
    Default,
    Break,
    Continue,
    Return,
    Throw,
    Try,
    Catch,
    Finally,
    Yield,

    // Declarations / construction
    Final,
    New,

    // Receivers
    This,
    Super,

    // Literals
    True,
    False,
    Null,

    // Word operators
    InstanceOf,
    Is,
    Contains,
    In,
    StrSim,
    SoundsLike,
    IsDef,

    // Sentinels
    Empty,
    Nil,
    Undefined,
}

/// High-level grouping for documentation and tooling.
///
/// ## Notes
/// - Categories are metadata only; they do not enforce parsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    ControlFlow,
    Declaration,
    Receiver,
    Literal,
    Operator,
    Sentinel,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub origin: Origin,
    pub since: Since,
    pub stability: Stability,
    pub examples: &'static [Example],
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Control flow / statements
    info(KeywordId::If, "if", KeywordCategory::ControlFlow, Origin::Java),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow, Origin::Java),
    info(KeywordId::For, "for", KeywordCategory::ControlFlow, Origin::Java),
    info(KeywordId::While, "while", KeywordCategory::ControlFlow, Origin::Java),
    info(KeywordId::Do, "do", KeywordCategory::ControlFlow, Origin::Java),
    info(KeywordId::Switch, "switch", KeywordCategory::ControlFlow, Origin::Java),
    info(KeywordId::Case, "case", KeywordCategory::ControlFlow, Origin::Java),
    info(KeywordId::Default, "default", KeywordCategory::ControlFlow, Origin::Java),
    info(KeywordId::Break, "break", KeywordCategory::ControlFlow, Origin::Java),
    info(KeywordId::Continue, "continue", KeywordCategory::ControlFlow, Origin::Java),
    info(KeywordId::Return, "return", KeywordCategory::ControlFlow, Origin::Java),
    info(KeywordId::Throw, "throw", KeywordCategory::ControlFlow, Origin::Java),
    info(KeywordId::Try, "try", KeywordCategory::ControlFlow, Origin::Java),
    info(KeywordId::Catch, "catch", KeywordCategory::ControlFlow, Origin::Java),
    info(KeywordId::Finally, "finally", KeywordCategory::ControlFlow, Origin::Java),
    info(KeywordId::Yield, "yield", KeywordCategory::ControlFlow, Origin::Java),
    // Declarations / construction
    info(KeywordId::Final, "final", KeywordCategory::Declaration, Origin::Java),
    info(KeywordId::New, "new", KeywordCategory::Declaration, Origin::Java),
    // Receivers
    info(KeywordId::This, "this", KeywordCategory::Receiver, Origin::Java),
    info(KeywordId::Super, "super", KeywordCategory::Receiver, Origin::Java),
    // Literals
    info(KeywordId::True, "true", KeywordCategory::Literal, Origin::Java),
    info(KeywordId::False, "false", KeywordCategory::Literal, Origin::Java),
    info(KeywordId::Null, "null", KeywordCategory::Literal, Origin::Java),
    // Word operators
    info(KeywordId::InstanceOf, "instanceof", KeywordCategory::Operator, Origin::Java),
    info(KeywordId::Is, "is", KeywordCategory::Operator, Origin::Mvel),
    info(KeywordId::Contains, "contains", KeywordCategory::Operator, Origin::Mvel),
    info(KeywordId::In, "in", KeywordCategory::Operator, Origin::Mvel),
    info(KeywordId::StrSim, "strsim", KeywordCategory::Operator, Origin::Mvel),
    info(KeywordId::SoundsLike, "soundslike", KeywordCategory::Operator, Origin::Mvel),
    info(KeywordId::IsDef, "isdef", KeywordCategory::Operator, Origin::Mvel),
    // Sentinels
    info(KeywordId::Empty, "empty", KeywordCategory::Sentinel, Origin::Mvel),
    info(KeywordId::Nil, "nil", KeywordCategory::Sentinel, Origin::Mvel),
    info(KeywordId::Undefined, "undefined", KeywordCategory::Sentinel, Origin::Mvel),
];

/// Canonical spelling.
///
/// ## Parameters
/// - `id`: Keyword identifier.
///
/// ## Returns
/// - The canonical spelling for the keyword.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category metadata.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Parameters
/// - `s`: Candidate keyword spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling matches this registry.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory, origin: Origin) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        origin,
        since: Since(3, 0),
        stability: Stability::Stable,
        examples: &[],
    }
}
