//! MVEL language vocabulary registries.
//!
//! This module is the “front door” for language-level vocabulary: reserved keywords, operators, punctuation, and the
//! well-known names the translator relies on.
//!
//! The design goal is to avoid stringly-typed checks scattered across the lexer, parser, and translator. Instead,
//! callers work with **stable IDs** (e.g. `KeywordId`, `OperatorId`) and look up spellings/metadata via registry
//! tables.
//!
//! ## Notes
//! - Registries are **pure**: no AST types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings and metadata for shared use (diagnostics,
//!   precedence checks, guardrail tests).
//!
//! ## Examples
//! ```rust
//! use mvel_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("isdef"), Some(KeywordId::IsDef));
//! assert_eq!(keywords::as_str(KeywordId::IsDef), "isdef");
//! ```

pub mod conventions;
pub mod keywords;
pub mod operators;
pub mod punctuation;
pub mod registry;
