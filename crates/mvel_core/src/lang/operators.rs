//! Operator vocabulary.
//!
//! This module defines the canonical operator set (symbol operators like `+` and word operators like `contains`)
//! along with basic metadata such as precedence, associativity, and fixity.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Some operators are spelled using reserved words (e.g. `"strsim"`). Those entries have
//!   [`OperatorInfo::is_keyword_spelling`] set to `true`, and the lexer produces keyword tokens for them.
//! - `precedence` encodes the parser's ladder: postfix binds tightest, then prefix unary, power, multiplicative,
//!   additive, relational, type-test, equality, similarity, membership, the bitwise trio, logical and/or, and
//!   finally assignment.
//! - `-` and `+` are listed once as infix operators; the parser also accepts them in prefix position.
//!
//! ## Examples
//! ```rust
//! use mvel_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("**"), Some(OperatorId::StarStar));
//! assert!(operators::info_for(OperatorId::Star).precedence > operators::info_for(OperatorId::Plus).precedence);
//! ```

use super::registry::{Example, Origin, Since, Stability};

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
    None,
}

/// Define where an operator sits relative to its operand(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
    Postfix,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,

    // Increment / decrement
    PlusPlus,
    MinusMinus,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical / bitwise
    AndAnd,
    OrOr,
    Bang,
    Tilde,
    Amp,
    Pipe,
    Caret,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    StarStarEq,

    // Coercion
    Hash,

    // Word operators
    InstanceOf,
    Is,
    StrSim,
    SoundsLike,
    Contains,
    In,
}

/// Metadata for an operator.
///
/// ## Notes
/// - `precedence` is a relative ordering where higher binds tighter. The absolute scale is an implementation detail,
///   but must be consistent across the parser.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
    pub fixity: Fixity,
    pub is_keyword_spelling: bool,
    pub origin: Origin,
    pub since: Since,
    pub stability: Stability,
    pub examples: &'static [Example],
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Postfix
    op(OperatorId::PlusPlus, "++", 150, Associativity::Left, Fixity::Postfix, false, Origin::Java),
    op(OperatorId::MinusMinus, "--", 150, Associativity::Left, Fixity::Postfix, false, Origin::Java),
    op(OperatorId::Hash, "#", 150, Associativity::Left, Fixity::Postfix, false, Origin::Mvel),
    // Prefix
    op(OperatorId::Bang, "!", 140, Associativity::Right, Fixity::Prefix, false, Origin::Java),
    op(OperatorId::Tilde, "~", 140, Associativity::Right, Fixity::Prefix, false, Origin::Java),
    // Power
    op(OperatorId::StarStar, "**", 130, Associativity::Left, Fixity::Infix, false, Origin::Mvel),
    // Multiplicative
    op(OperatorId::Star, "*", 120, Associativity::Left, Fixity::Infix, false, Origin::Java),
    op(OperatorId::Slash, "/", 120, Associativity::Left, Fixity::Infix, false, Origin::Java),
    op(OperatorId::Percent, "%", 120, Associativity::Left, Fixity::Infix, false, Origin::Java),
    // Additive
    op(OperatorId::Plus, "+", 110, Associativity::Left, Fixity::Infix, false, Origin::Java),
    op(OperatorId::Minus, "-", 110, Associativity::Left, Fixity::Infix, false, Origin::Java),
    // Relational
    op(OperatorId::Lt, "<", 100, Associativity::Left, Fixity::Infix, false, Origin::Java),
    op(OperatorId::LtEq, "<=", 100, Associativity::Left, Fixity::Infix, false, Origin::Java),
    op(OperatorId::Gt, ">", 100, Associativity::Left, Fixity::Infix, false, Origin::Java),
    op(OperatorId::GtEq, ">=", 100, Associativity::Left, Fixity::Infix, false, Origin::Java),
    // Type test
    op(OperatorId::InstanceOf, "instanceof", 90, Associativity::Left, Fixity::Infix, true, Origin::Java),
    op(OperatorId::Is, "is", 90, Associativity::Left, Fixity::Infix, true, Origin::Mvel),
    // Equality
    op(OperatorId::EqEq, "==", 80, Associativity::Left, Fixity::Infix, false, Origin::Java),
    op(OperatorId::NotEq, "!=", 80, Associativity::Left, Fixity::Infix, false, Origin::Java),
    // Similarity
    op(OperatorId::StrSim, "strsim", 70, Associativity::Left, Fixity::Infix, true, Origin::Mvel),
    op(OperatorId::SoundsLike, "soundslike", 70, Associativity::Left, Fixity::Infix, true, Origin::Mvel),
    // Membership
    op(OperatorId::Contains, "contains", 60, Associativity::Left, Fixity::Infix, true, Origin::Mvel),
    op(OperatorId::In, "in", 60, Associativity::Left, Fixity::Infix, true, Origin::Mvel),
    // Bitwise
    op(OperatorId::Amp, "&", 50, Associativity::Left, Fixity::Infix, false, Origin::Java),
    op(OperatorId::Caret, "^", 45, Associativity::Left, Fixity::Infix, false, Origin::Java),
    op(OperatorId::Pipe, "|", 40, Associativity::Left, Fixity::Infix, false, Origin::Java),
    // Logical
    op(OperatorId::AndAnd, "&&", 30, Associativity::Left, Fixity::Infix, false, Origin::Java),
    op(OperatorId::OrOr, "||", 20, Associativity::Left, Fixity::Infix, false, Origin::Java),
    // Assignment
    op(OperatorId::Eq, "=", 10, Associativity::Right, Fixity::Infix, false, Origin::Java),
    op(OperatorId::PlusEq, "+=", 10, Associativity::Right, Fixity::Infix, false, Origin::Java),
    op(OperatorId::MinusEq, "-=", 10, Associativity::Right, Fixity::Infix, false, Origin::Java),
    op(OperatorId::StarEq, "*=", 10, Associativity::Right, Fixity::Infix, false, Origin::Java),
    op(OperatorId::SlashEq, "/=", 10, Associativity::Right, Fixity::Infix, false, Origin::Java),
    op(OperatorId::PercentEq, "%=", 10, Associativity::Right, Fixity::Infix, false, Origin::Java),
    op(OperatorId::StarStarEq, "**=", 10, Associativity::Right, Fixity::Infix, false, Origin::Mvel),
];

/// Return the full metadata entry for an operator.
///
/// ## Parameters
/// - `id`: Operator identifier.
///
/// ## Returns
/// - The associated [`OperatorInfo`] from [`OPERATORS`].
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Return the spelling for an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Resolve an operator spelling to its identifier.
///
/// ## Parameters
/// - `spelling`: Candidate operator token (symbol or word operator).
///
/// ## Returns
/// - `Some(OperatorId)` if the spelling exists in [`OPERATORS`].
/// - `None` otherwise.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

/// Check whether an operator is a (simple or compound) assignment.
pub fn is_assignment(id: OperatorId) -> bool {
    matches!(
        id,
        OperatorId::Eq
            | OperatorId::PlusEq
            | OperatorId::MinusEq
            | OperatorId::StarEq
            | OperatorId::SlashEq
            | OperatorId::PercentEq
            | OperatorId::StarStarEq
    )
}

// --- helpers -----------------------------------------------------------------

const fn op(
    id: OperatorId,
    spelling: &'static str,
    precedence: u8,
    associativity: Associativity,
    fixity: Fixity,
    is_keyword_spelling: bool,
    origin: Origin,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        precedence,
        associativity,
        fixity,
        is_keyword_spelling,
        origin,
        since: Since(3, 0),
        stability: Stability::Stable,
        examples: &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prec(id: OperatorId) -> u8 {
        info_for(id).precedence
    }

    #[test]
    fn test_ladder_is_strictly_ordered() {
        let ladder = [
            OperatorId::StarStar,
            OperatorId::Star,
            OperatorId::Plus,
            OperatorId::Lt,
            OperatorId::InstanceOf,
            OperatorId::EqEq,
            OperatorId::StrSim,
            OperatorId::Contains,
            OperatorId::Amp,
            OperatorId::Caret,
            OperatorId::Pipe,
            OperatorId::AndAnd,
            OperatorId::OrOr,
            OperatorId::Eq,
        ];
        for pair in ladder.windows(2) {
            assert!(prec(pair[0]) > prec(pair[1]), "{:?} should bind tighter than {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_assignment_is_right_associative() {
        for o in OPERATORS.iter().filter(|o| is_assignment(o.id)) {
            assert_eq!(o.associativity, Associativity::Right);
        }
        assert!(!is_assignment(OperatorId::EqEq));
    }

    #[test]
    fn test_word_operators_are_flagged() {
        assert!(info_for(OperatorId::SoundsLike).is_keyword_spelling);
        assert!(!info_for(OperatorId::Caret).is_keyword_spelling);
        assert_eq!(from_str("soundslike"), Some(OperatorId::SoundsLike));
        assert_eq!(as_str(OperatorId::PercentEq), "%=");
    }
}
