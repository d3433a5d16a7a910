//! Syntax frontend for the MVEL expression language: lexer, parser, AST, diagnostics.
//!
//! The crate turns source text into a tree and nothing more. Translation to target source lives in the `mvel`
//! crate, which consumes the AST defined here.
//!
//! ## Notes
//! - Parsing is fail-fast. The first problem is returned as a [`diagnostics::SyntaxError`] with a line, column,
//!   and the grammar rule being matched.
//! - Vocabulary identity (keywords/operators/punctuation) comes from `mvel_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use mvel_syntax::ast::ParseMode;
//! use mvel_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("person.age > 18").unwrap();
//! let root = parser::parse(&tokens, ParseMode::Expression).unwrap();
//! assert_eq!(root.mode(), ParseMode::Expression);
//! ```
//!
//! ## See also
//! - `mvel_core::lang` for registry-backed language vocabulary.

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;
