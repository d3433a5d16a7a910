//! Lexer for the MVEL expression language
//!
//! Handles tokenization including:
//! - Keywords and word operators (if, switch, contains, strsim, isdef, etc.)
//! - Identifiers (Unicode letters and digits, `_` and `$`)
//! - Literals (int, float, char, string, text block, regex, unit)
//! - Operators and punctuation (`?.`, `::`, `->`, `#`, etc.)
//! - `//` line comments and `/* */` block comments
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - String, char, text block, and regex scanning
//! - `numbers` - Numeric and unit literal scanning

mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::Span;
use crate::diagnostics::SyntaxError;
use mvel_core::lang::operators::OperatorId;
use mvel_core::lang::punctuation::PunctuationId;

/// Rule name reported for lexical errors.
const RULE: &str = "token";

// ============================================================================
// LEXER STATE
// ============================================================================

/// Lexer for MVEL source text.
///
/// Converts source text into a stream of tokens. Lexing is fail-fast: the first malformed token aborts with a
/// [`SyntaxError`].
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    line: usize,
    line_start: usize,
    /// Line/column of the token currently being scanned.
    token_line: usize,
    token_column: usize,
    /// Bracket depth, used to reject unmatched closers early
    bracket_depth: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            line: 1,
            line_start: 0,
            token_line: 1,
            token_column: 1,
            bracket_depth: 0,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source text.
    ///
    /// ## Returns
    /// - The token stream, which always ends with an `Eof` token.
    ///
    /// ## Errors
    /// - The first lexical error encountered.
    pub fn tokenize(mut self) -> Result<Vec<Token>, SyntaxError> {
        loop {
            self.skip_trivia()?;
            if self.is_at_end() {
                break;
            }
            self.scan_token()?;
        }

        self.mark_token_start();
        self.tokens.push(Token::new(
            TokenKind::Eof,
            "",
            Span::new(self.current_pos, self.current_pos),
            self.token_line,
            self.token_column,
        ));
        Ok(self.tokens)
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        self.peek_nth(1)
    }

    /// Look `n` characters past the current one without consuming anything.
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.source[self.current_pos..].chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.line_start = self.current_pos;
            }
            Some(c)
        } else {
            None
        }
    }

    fn mark_token_start(&mut self) {
        self.token_line = self.line;
        self.token_column = self.current_pos - self.line_start + 1;
    }

    fn error(&self, message: impl Into<String>, start: usize) -> SyntaxError {
        SyntaxError::new(
            message,
            RULE,
            Span::new(start, self.current_pos.max(start + 1)),
            self.token_line,
            self.token_column,
        )
    }

    // ========================================================================
    // Whitespace and comments
    // ========================================================================

    fn skip_trivia(&mut self) -> Result<(), SyntaxError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_next() == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                Some('/') if self.peek_next() == Some('*') => {
                    self.mark_token_start();
                    let start = self.current_pos;
                    self.advance();
                    self.advance();
                    loop {
                        match self.advance() {
                            Some('*') if self.peek() == Some('/') => {
                                self.advance();
                                break;
                            }
                            Some(_) => {}
                            None => return Err(self.error("Unterminated block comment", start)),
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) -> Result<(), SyntaxError> {
        self.mark_token_start();
        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return Ok(());
        };

        match c {
            // Operators and punctuation
            '+' => self.operator(
                start,
                OperatorId::Plus,
                &[('+', OperatorId::PlusPlus), ('=', OperatorId::PlusEq)],
            ),
            '-' => {
                if self.match_char('>') {
                    self.add_punct(PunctuationId::Arrow, start);
                } else {
                    self.operator(
                        start,
                        OperatorId::Minus,
                        &[('-', OperatorId::MinusMinus), ('=', OperatorId::MinusEq)],
                    );
                }
            }
            '*' => {
                if self.match_char('*') {
                    if self.match_char('=') {
                        self.add_op(OperatorId::StarStarEq, start);
                    } else {
                        self.add_op(OperatorId::StarStar, start);
                    }
                } else {
                    self.operator(start, OperatorId::Star, &[('=', OperatorId::StarEq)]);
                }
            }
            '/' => self.operator(start, OperatorId::Slash, &[('=', OperatorId::SlashEq)]),
            '%' => self.operator(start, OperatorId::Percent, &[('=', OperatorId::PercentEq)]),
            '=' => self.operator(start, OperatorId::Eq, &[('=', OperatorId::EqEq)]),
            '!' => self.operator(start, OperatorId::Bang, &[('=', OperatorId::NotEq)]),
            '<' => self.operator(start, OperatorId::Lt, &[('=', OperatorId::LtEq)]),
            '>' => self.operator(start, OperatorId::Gt, &[('=', OperatorId::GtEq)]),
            '&' => self.operator(start, OperatorId::Amp, &[('&', OperatorId::AndAnd)]),
            '|' => self.operator(start, OperatorId::Pipe, &[('|', OperatorId::OrOr)]),
            '^' => self.add_op(OperatorId::Caret, start),
            '#' => self.add_op(OperatorId::Hash, start),
            '~' => {
                if self.peek() == Some('/') {
                    self.advance();
                    self.scan_regex(start)?;
                } else {
                    self.add_op(OperatorId::Tilde, start);
                }
            }
            '?' => {
                if self.match_char('.') {
                    self.add_punct(PunctuationId::QuestionDot, start);
                } else {
                    self.add_punct(PunctuationId::Question, start);
                }
            }
            ':' => {
                if self.match_char(':') {
                    self.add_punct(PunctuationId::ColonColon, start);
                } else {
                    self.add_punct(PunctuationId::Colon, start);
                }
            }
            ',' => self.add_punct(PunctuationId::Comma, start),
            ';' => self.add_punct(PunctuationId::Semicolon, start),
            '(' => self.open_bracket(PunctuationId::LParen, start),
            ')' => self.close_bracket(PunctuationId::RParen, start)?,
            '[' => self.open_bracket(PunctuationId::LBracket, start),
            ']' => self.close_bracket(PunctuationId::RBracket, start)?,
            '{' => self.open_bracket(PunctuationId::LBrace, start),
            '}' => self.close_bracket(PunctuationId::RBrace, start)?,
            '.' => {
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_number(start, c)?;
                } else {
                    self.add_punct(PunctuationId::Dot, start);
                }
            }

            // Strings and characters
            '"' => {
                if self.peek() == Some('"') && self.peek_next() == Some('"') {
                    self.advance();
                    self.advance();
                    self.scan_text_block(start)?;
                } else {
                    self.scan_string(start)?;
                }
            }
            '\'' => self.scan_single_quoted(start)?,

            // Numbers
            '0'..='9' => self.scan_number(start, c)?,

            // Identifiers and keywords
            _ if is_ident_start(c) => self.scan_identifier(start),

            _ => return Err(self.error(format!("Unexpected character '{}'", c), start)),
        }
        Ok(())
    }

    // ========================================================================
    // Operator helpers
    // ========================================================================

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        let text = &self.source[start..self.current_pos];
        self.tokens.push(Token::new(
            kind,
            text,
            Span::new(start, self.current_pos),
            self.token_line,
            self.token_column,
        ));
    }

    fn add_op(&mut self, id: OperatorId, start: usize) {
        self.add_token(TokenKind::Operator(id), start);
    }

    fn add_punct(&mut self, id: PunctuationId, start: usize) {
        self.add_token(TokenKind::Punctuation(id), start);
    }

    /// Try to match compound operator, fallback to simple.
    fn operator(&mut self, start: usize, simple: OperatorId, compounds: &[(char, OperatorId)]) {
        for (c, id) in compounds {
            if self.match_char(*c) {
                self.add_op(*id, start);
                return;
            }
        }
        self.add_op(simple, start);
    }

    fn open_bracket(&mut self, kind: PunctuationId, start: usize) {
        self.bracket_depth += 1;
        self.add_punct(kind, start);
    }

    /// Emit a closing bracket token, rejecting a closer with no opener.
    fn close_bracket(&mut self, kind: PunctuationId, start: usize) -> Result<(), SyntaxError> {
        if self.bracket_depth == 0 {
            return Err(self.error("Unmatched closing bracket", start));
        }
        self.bracket_depth -= 1;
        self.add_punct(kind, start);
        Ok(())
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start..self.current_pos];

        if let Some(id) = keyword_id(spelling) {
            self.add_token(TokenKind::Keyword(id), start);
        } else {
            let spelling = spelling.to_string();
            self.add_token(TokenKind::Ident(spelling), start);
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (any letter, plus `_` and `$`).
fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

/// Check if a character can continue an identifier.
fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()` that also attaches the source text to any error.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, SyntaxError> {
    Lexer::new(source).tokenize().map_err(|e| e.with_source(source))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mvel_core::lang::keywords::KeywordId;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_punctuation_registry_parity() {
        use mvel_core::lang::punctuation::{self, PunctuationId};

        for p in punctuation::PUNCTUATION {
            let source = match p.id {
                // Closing delimiters error when unmatched; use a matching pair.
                PunctuationId::LParen | PunctuationId::RParen => "()",
                PunctuationId::LBracket | PunctuationId::RBracket => "[]",
                PunctuationId::LBrace | PunctuationId::RBrace => "{}",
                _ => p.canonical,
            };
            let tokens = lex(source).unwrap_or_else(|e| panic!("lex({:?}) failed: {}", source, e));
            assert!(
                tokens.iter().any(|t| t.kind.is_punctuation(p.id)),
                "expected {:?} in {:?}",
                p.id,
                tokens
            );
        }
    }

    #[test]
    fn test_keyword_registry_parity() {
        use mvel_core::lang::keywords;

        for k in keywords::KEYWORDS {
            let tokens = lex(k.canonical).unwrap_or_else(|e| panic!("lex({:?}) failed: {}", k.canonical, e));
            assert_eq!(tokens.len(), 2, "expected token + EOF for keyword {:?}", k.id);
            assert!(tokens[0].kind.is_keyword(k.id));
        }
    }

    #[test]
    fn test_operator_registry_parity() {
        use mvel_core::lang::keywords;
        use mvel_core::lang::operators;

        for o in operators::OPERATORS {
            let tokens = lex(o.spelling).unwrap_or_else(|e| panic!("lex({:?}) failed: {}", o.spelling, e));
            assert_eq!(tokens.len(), 2, "expected token + EOF for operator {:?}", o.spelling);
            if o.is_keyword_spelling {
                // Word operators are lexed as keywords.
                let kw = keywords::from_str(o.spelling).expect("word operator is a keyword");
                assert!(tokens[0].kind.is_keyword(kw));
            } else {
                assert!(tokens[0].kind.is_operator(o.id), "{:?}", tokens[0]);
            }
        }
    }

    #[test]
    fn test_keywords_and_contextual_words() {
        let k = kinds("switch case var when isdef");
        assert_eq!(k[0], TokenKind::Keyword(KeywordId::Switch));
        assert_eq!(k[1], TokenKind::Keyword(KeywordId::Case));
        assert_eq!(k[2], TokenKind::Ident("var".to_string()));
        assert_eq!(k[3], TokenKind::Ident("when".to_string()));
        assert_eq!(k[4], TokenKind::Keyword(KeywordId::IsDef));
    }

    #[test]
    fn test_navigation_operators() {
        let k = kinds("a?.b::c -> d.?(e) f#G");
        assert_eq!(k[1], TokenKind::Punctuation(PunctuationId::QuestionDot));
        assert_eq!(k[3], TokenKind::Punctuation(PunctuationId::ColonColon));
        assert_eq!(k[5], TokenKind::Punctuation(PunctuationId::Arrow));
        assert_eq!(k[7], TokenKind::Punctuation(PunctuationId::Dot));
        assert_eq!(k[8], TokenKind::Punctuation(PunctuationId::Question));
        assert_eq!(k[13], TokenKind::Operator(OperatorId::Hash));
    }

    #[test]
    fn test_compound_operators() {
        let k = kinds("a++ += ** *= && || != <= -- -=");
        assert_eq!(k[1], TokenKind::Operator(OperatorId::PlusPlus));
        assert_eq!(k[2], TokenKind::Operator(OperatorId::PlusEq));
        assert_eq!(k[3], TokenKind::Operator(OperatorId::StarStar));
        assert_eq!(k[4], TokenKind::Operator(OperatorId::StarEq));
        assert_eq!(k[5], TokenKind::Operator(OperatorId::AndAnd));
        assert_eq!(k[6], TokenKind::Operator(OperatorId::OrOr));
        assert_eq!(k[7], TokenKind::Operator(OperatorId::NotEq));
        assert_eq!(k[8], TokenKind::Operator(OperatorId::LtEq));
        assert_eq!(k[9], TokenKind::Operator(OperatorId::MinusMinus));
        assert_eq!(k[10], TokenKind::Operator(OperatorId::MinusEq));
    }

    #[test]
    fn test_unicode_identifiers() {
        let tokens = lex("ñ + straße").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Ident("ñ".to_string()));
        assert_eq!(tokens[2].kind, TokenKind::Ident("straße".to_string()));
    }

    #[test]
    fn test_power_assignment_is_one_token() {
        let k = kinds("x **= 2 ** 3");
        assert_eq!(k[1], TokenKind::Operator(OperatorId::StarStarEq));
        assert_eq!(k[3], TokenKind::Operator(OperatorId::StarStar));
    }

    #[test]
    fn test_comments_are_skipped() {
        let k = kinds("a // trailing\n/* block\n comment */ b");
        assert_eq!(k.len(), 3);
        assert_eq!(k[1], TokenKind::Ident("b".to_string()));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = lex("a /* never closed").unwrap_err();
        assert!(err.message.contains("Unterminated block comment"));
        assert_eq!((err.line, err.column), (1, 3));
    }

    #[test]
    fn test_dollar_identifiers() {
        let k = kinds("$p.name");
        assert_eq!(k[0], TokenKind::Ident("$p".to_string()));
    }

    #[test]
    fn test_line_and_column_tracking() {
        let tokens = lex("a\n  bb = 1").unwrap();
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (2, 3));
        assert_eq!(tokens[1].text, "bb");
        assert_eq!((tokens[3].line, tokens[3].column), (2, 8));
    }

    #[test]
    fn test_unexpected_character() {
        let err = lex("a @ b").unwrap_err();
        assert!(err.message.contains("Unexpected character '@'"));
        assert_eq!(err.column, 3);
        assert_eq!(err.source_code, "a @ b");
    }

    #[test]
    fn test_unmatched_closing_bracket() {
        for source in [")", "]", "}"] {
            let err = lex(source).unwrap_err();
            assert!(err.message.contains("Unmatched closing bracket"));
        }
        assert!(lex("(x)").is_ok());
    }

    #[test]
    fn test_tilde_is_complement_unless_followed_by_slash() {
        let k = kinds("~x");
        assert_eq!(k[0], TokenKind::Operator(OperatorId::Tilde));
        let k = kinds("s ~ ~/a.*b/");
        assert_eq!(k[1], TokenKind::Operator(OperatorId::Tilde));
        assert_eq!(k[2], TokenKind::Regex("a.*b".to_string()));
    }
}
