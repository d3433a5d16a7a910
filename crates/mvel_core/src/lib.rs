//! Provide the canonical language vocabulary and naming conventions for the MVEL front end.
//!
//! This crate is intentionally small and dependency-free. It contains the registries that both the syntax crate
//! (lexing and parsing) and the translator consult, so that spellings and well-known names live in one place.
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global state, and no AST types.
//! - Current scope: keywords, operators, punctuation, and the naming conventions the translator uses to
//!   disambiguate property reads, method calls, and type paths.

pub mod lang;
