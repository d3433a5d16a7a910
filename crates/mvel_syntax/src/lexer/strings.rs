//! String scanning for the MVEL lexer
//!
//! Handles double-quoted strings, single-quoted char/string literals, `"""` text blocks, and `~/.../` regex
//! literals. Escape sequences are validated for termination only and kept verbatim in the token payload.

use super::Lexer;
use super::tokens::TokenKind;
use crate::diagnostics::SyntaxError;

impl<'a> Lexer<'a> {
    /// Scan the body of a `"..."` literal. Called after the opening quote.
    pub(super) fn scan_string(&mut self, start: usize) -> Result<(), SyntaxError> {
        let body = self.scan_quoted_body(start, '"', "string")?;
        self.add_token(TokenKind::String(body), start);
        Ok(())
    }

    /// Scan a `'...'` literal. One character (or one escape) is a char literal; anything else is a string.
    ///
    /// ## Notes
    /// - String payloads are normalized for re-emission inside double quotes: `\'` becomes `'` and a bare `"`
    ///   becomes `\"`.
    pub(super) fn scan_single_quoted(&mut self, start: usize) -> Result<(), SyntaxError> {
        let body = self.scan_quoted_body(start, '\'', "character")?;
        if is_single_char(&body) {
            self.add_token(TokenKind::Char(body), start);
        } else {
            self.add_token(TokenKind::String(requote(&body)), start);
        }
        Ok(())
    }

    /// Scan a `"""` text block. Called after the opening delimiter.
    pub(super) fn scan_text_block(&mut self, start: usize) -> Result<(), SyntaxError> {
        let body_start = self.current_pos;
        loop {
            match self.advance() {
                Some('\\') => {
                    self.advance();
                }
                Some('"') if self.peek() == Some('"') && self.peek_next() == Some('"') => {
                    let body = self.source[body_start..self.current_pos - 1].to_string();
                    self.advance();
                    self.advance();
                    self.add_token(TokenKind::TextBlock(body), start);
                    return Ok(());
                }
                Some(_) => {}
                None => return Err(self.error("Unterminated text block", start)),
            }
        }
    }

    /// Scan a `~/pattern/` regex literal. Called after `~/`.
    pub(super) fn scan_regex(&mut self, start: usize) -> Result<(), SyntaxError> {
        let body = self.scan_quoted_body(start, '/', "regex")?;
        self.add_token(TokenKind::Regex(body), start);
        Ok(())
    }

    /// Consume up to (and including) the closing `quote`, returning the raw text in between.
    fn scan_quoted_body(&mut self, start: usize, quote: char, what: &str) -> Result<String, SyntaxError> {
        let body_start = self.current_pos;
        loop {
            match self.advance() {
                Some('\\') => {
                    if self.advance().is_none() {
                        break;
                    }
                }
                Some(c) if c == quote => {
                    let body_end = self.current_pos - quote.len_utf8();
                    return Ok(self.source[body_start..body_end].to_string());
                }
                Some('\n') | None => break,
                Some(_) => {}
            }
        }
        Err(self.error(format!("Unterminated {} literal", what), start))
    }
}

/// One character or a single escape sequence (`\n`, `\'`, `A`).
fn is_single_char(body: &str) -> bool {
    let mut chars = body.chars();
    match (chars.next(), chars.next()) {
        (Some(_), None) => true,
        (Some('\\'), Some('u')) => body.len() == 6 && body[2..].chars().all(|c| c.is_ascii_hexdigit()),
        (Some('\\'), Some(_)) => chars.next().is_none(),
        _ => false,
    }
}

fn requote(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('\'') => out.push('\''),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            },
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use crate::lexer::{TokenKind, lex};

    fn first(source: &str) -> TokenKind {
        lex(source).unwrap().remove(0).kind
    }

    #[test]
    fn test_strings_keep_escapes() {
        assert_eq!(first(r#""hello""#), TokenKind::String("hello".to_string()));
        assert_eq!(first(r#""a\"b\n""#), TokenKind::String(r#"a\"b\n"#.to_string()));
    }

    #[test]
    fn test_single_quoted_char_or_string() {
        assert_eq!(first("'a'"), TokenKind::Char("a".to_string()));
        assert_eq!(first(r"'\n'"), TokenKind::Char(r"\n".to_string()));
        assert_eq!(first(r"'A'"), TokenKind::Char(r"A".to_string()));
        assert_eq!(first("'Honda'"), TokenKind::String("Honda".to_string()));
        assert_eq!(first(r#"'say "hi"'"#), TokenKind::String(r#"say \"hi\""#.to_string()));
        assert_eq!(first(r"'it\'s'"), TokenKind::String("it's".to_string()));
    }

    #[test]
    fn test_text_block() {
        let source = "\"\"\"\nline one\nline \"two\"\n\"\"\"";
        assert_eq!(
            first(source),
            TokenKind::TextBlock("\nline one\nline \"two\"\n".to_string())
        );
    }

    #[test]
    fn test_empty_string_is_not_a_text_block() {
        let tokens = lex(r#""" + x"#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String(String::new()));
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn test_regex_literal() {
        assert_eq!(first(r"~/\d+\/x/"), TokenKind::Regex(r"\d+\/x".to_string()));
    }

    #[test]
    fn test_unterminated_string() {
        let err = lex("\"abc\nd\"").unwrap_err();
        assert!(err.message.contains("Unterminated string literal"));
        let err = lex("\"\"\"abc").unwrap_err();
        assert!(err.message.contains("Unterminated text block"));
    }
}
