//! Parser for the MVEL expression language
//!
//! Converts a token stream into an AST rooted at either a bare expression or a statement sequence.
//!
//! ## Examples
//!
//! ```rust
//! use mvel_syntax::ast::{ParseMode, Root};
//! use mvel_syntax::parser;
//!
//! let root = parser::parse_source("1 + 2 * 3", ParseMode::Expression).unwrap();
//! assert!(matches!(root, Root::Expression(_)));
//!
//! let err = parser::parse_source("a +", ParseMode::Expression).unwrap_err();
//! assert_eq!((err.line, err.column), (1, 4));
//! ```

use crate::ast::*;
use crate::diagnostics::SyntaxError;
use crate::lexer::{self, Token, TokenKind};
use mvel_core::lang::keywords::KeywordId;
use mvel_core::lang::operators::OperatorId;
use mvel_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/types.rs");
include!("parser/stmts.rs");
include!("parser/switch.rs");
include!("parser/expr.rs");
include!("parser/postfix.rs");
include!("parser/primary.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
