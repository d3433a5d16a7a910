//! Shareable metadata for `mvel_core::lang` registries.
//!
//! The `mvel_core::lang` module is a set of **registry-first** vocabularies: keywords, operators, and punctuation.
//! This submodule provides the small, dependency-free metadata types reused across all of them.
//!
//! ## Notes
//! - These types are `Copy` so registries can live in `const` tables.
//! - Metadata is meant for tooling/docs/diagnostics; enforcement of syntax rules still lives in the lexer/parser.
//!
//! ## See also
//! - [`crate::lang::keywords`]
//! - [`crate::lang::operators`]
//! - [`crate::lang::punctuation`]

/// Identify where a vocabulary item comes from.
///
/// MVEL is a superset of the Java expression and statement syntax. Items inherited from the host language are
/// [`Origin::Java`]; the navigation, collection-query, and mutation extensions are [`Origin::Mvel`].
///
/// ## Examples
/// ```rust
/// use mvel_core::lang::registry::Origin;
///
/// assert_ne!(Origin::Java, Origin::Mvel);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Java,
    Mvel,
}

/// Identify the MVEL language version a vocabulary item is available since.
///
/// ## Examples
/// ```rust
/// use mvel_core::lang::registry::Since;
///
/// let since = Since(3, 0);
/// assert_eq!(since.to_string(), "3.0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Since(pub u8, pub u8);

impl std::fmt::Display for Since {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.0, self.1)
    }
}

/// Describe the lifecycle status of a language vocabulary item.
///
/// ## Notes
/// - This is intended for docs/tooling (e.g. to warn on deprecated spellings), not for feature-gating by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Draft,
    Deprecated,
}

/// Represent a small example snippet for documentation.
///
/// ## Notes
/// - `code` is the example body, in MVEL syntax.
/// - `note` is an optional short explanation (one or two sentences).
///
/// ## Examples
/// ```rust
/// use mvel_core::lang::registry::Example;
///
/// let ex = Example {
///     code: "names contains \"bob\"",
///     note: Some("Membership test."),
/// };
/// assert!(ex.code.contains("contains"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Example {
    pub code: &'static str,
    pub note: Option<&'static str>,
}
