//! Number scanning for the MVEL lexer
//!
//! Handles integer, floating-point, and unit literals. Spellings are kept verbatim (radix prefix, underscores,
//! suffixes) because translation reproduces them as written.

use super::Lexer;
use super::tokens::TokenKind;
use super::is_ident_continue;
use crate::diagnostics::SyntaxError;

impl<'a> Lexer<'a> {
    pub(super) fn scan_number(&mut self, start: usize, first: char) -> Result<(), SyntaxError> {
        if first == '0' && matches!(self.peek(), Some('x' | 'X')) {
            self.advance();
            if self.hex_float_ahead() {
                return self.scan_hex_float(start);
            }
            return self.scan_radix(start, |c| c.is_ascii_hexdigit(), "hexadecimal");
        }
        if first == '0' && matches!(self.peek(), Some('b' | 'B')) && matches!(self.peek_next(), Some('0' | '1')) {
            self.advance();
            return self.scan_radix(start, |c| c == '0' || c == '1', "binary");
        }

        let mut is_float = first == '.';
        self.eat_digits();

        // Fraction: only when a digit follows, so `list.size` and `1.toString` stay member access
        if !is_float && self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance();
            self.eat_digits();
        }

        // Exponent: `e` must be followed by a digit (optionally signed), otherwise it starts a unit tag
        if matches!(self.peek(), Some('e' | 'E')) {
            let signed = matches!(self.peek_next(), Some('+' | '-'));
            let digit_at = if signed { 2 } else { 1 };
            if self.peek_nth(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                self.advance();
                if signed {
                    self.advance();
                }
                self.eat_digits();
            }
        }

        let value_end = self.current_pos;
        let suffix = self.peek_word();
        match suffix.as_str() {
            "" => {}
            "L" | "l" if !is_float => {
                self.advance();
            }
            "f" | "F" | "d" | "D" => {
                is_float = true;
                self.advance();
            }
            _ => {
                for _ in suffix.chars() {
                    self.advance();
                }
                let value = self.source[start..value_end].to_string();
                self.add_token(TokenKind::Unit { value, unit: suffix }, start);
                return Ok(());
            }
        }

        let spelling = self.source[start..self.current_pos].to_string();
        if is_float {
            self.add_token(TokenKind::Float(spelling), start);
        } else {
            self.add_token(TokenKind::Int(spelling), start);
        }
        Ok(())
    }

    fn scan_radix(&mut self, start: usize, is_digit: fn(char) -> bool, radix: &str) -> Result<(), SyntaxError> {
        let digits_start = self.current_pos;
        while let Some(c) = self.peek() {
            if is_digit(c) || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
        if self.current_pos == digits_start {
            return Err(self.error(format!("Invalid {} literal: missing digits", radix), start));
        }
        if matches!(self.peek(), Some('L' | 'l')) {
            self.advance();
        }
        if self.peek().is_some_and(is_ident_continue) {
            return Err(self.error(format!("Invalid {} literal", radix), start));
        }
        let spelling = self.source[start..self.current_pos].to_string();
        self.add_token(TokenKind::Int(spelling), start);
        Ok(())
    }

    /// After `0x`: hex digits with an optional `.` fraction, then a binary exponent `p[+-]digits`.
    fn hex_float_ahead(&self) -> bool {
        let rest = &self.source[self.current_pos..];
        let mantissa_len = rest
            .find(|c: char| !(c.is_ascii_hexdigit() || c == '_' || c == '.'))
            .unwrap_or(rest.len());
        let mantissa = &rest[..mantissa_len];
        let Some(exponent) = rest[mantissa_len..].strip_prefix(['p', 'P']) else {
            return false;
        };
        let exponent = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
        mantissa.matches('.').count() <= 1
            && mantissa.chars().any(|c| c.is_ascii_hexdigit())
            && exponent.starts_with(|c: char| c.is_ascii_digit())
    }

    fn scan_hex_float(&mut self, start: usize) -> Result<(), SyntaxError> {
        while self.peek().is_some_and(|c| c.is_ascii_hexdigit() || c == '_' || c == '.') {
            self.advance();
        }
        // exponent marker and sign, checked by `hex_float_ahead`
        self.advance();
        if matches!(self.peek(), Some('+' | '-')) {
            self.advance();
        }
        self.eat_digits();
        if matches!(self.peek(), Some('f' | 'F' | 'd' | 'D')) {
            self.advance();
        }
        if self.peek().is_some_and(is_ident_continue) {
            return Err(self.error("Invalid hexadecimal floating-point literal".to_string(), start));
        }
        let spelling = self.source[start..self.current_pos].to_string();
        self.add_token(TokenKind::Float(spelling), start);
        Ok(())
    }

    fn eat_digits(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// The identifier-like run starting at the current position (not consumed).
    fn peek_word(&self) -> String {
        self.source[self.current_pos..]
            .chars()
            .take_while(|c| is_ident_continue(*c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::{TokenKind, lex};

    fn first(source: &str) -> TokenKind {
        lex(source).unwrap().remove(0).kind
    }

    #[test]
    fn test_integers_keep_spelling() {
        assert_eq!(first("42"), TokenKind::Int("42".to_string()));
        assert_eq!(first("1_000_000"), TokenKind::Int("1_000_000".to_string()));
        assert_eq!(first("0x1F"), TokenKind::Int("0x1F".to_string()));
        assert_eq!(first("0b1010"), TokenKind::Int("0b1010".to_string()));
        assert_eq!(first("10L"), TokenKind::Int("10L".to_string()));
    }

    #[test]
    fn test_floats() {
        assert_eq!(first("3.14"), TokenKind::Float("3.14".to_string()));
        assert_eq!(first("1e10"), TokenKind::Float("1e10".to_string()));
        assert_eq!(first("2.5e-3"), TokenKind::Float("2.5e-3".to_string()));
        assert_eq!(first("1.5f"), TokenKind::Float("1.5f".to_string()));
        assert_eq!(first("10d"), TokenKind::Float("10d".to_string()));
        assert_eq!(first(".5"), TokenKind::Float(".5".to_string()));
    }

    #[test]
    fn test_hex_floats() {
        assert_eq!(first("0x1.8p3"), TokenKind::Float("0x1.8p3".to_string()));
        assert_eq!(first("0x1.0p-3"), TokenKind::Float("0x1.0p-3".to_string()));
        assert_eq!(first("0X1P+2f"), TokenKind::Float("0X1P+2f".to_string()));
        assert_eq!(first("0x.8p1"), TokenKind::Float("0x.8p1".to_string()));

        // no binary exponent: plain hex integer followed by member access
        let tokens = lex("0x1.foo").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Int("0x1".to_string()));
        assert_eq!(tokens[1].text, ".");
    }

    #[test]
    fn test_unit_literals() {
        assert_eq!(
            first("10B"),
            TokenKind::Unit {
                value: "10".to_string(),
                unit: "B".to_string()
            }
        );
        assert_eq!(
            first("5pounds"),
            TokenKind::Unit {
                value: "5".to_string(),
                unit: "pounds".to_string()
            }
        );
        assert_eq!(
            first("2.5days"),
            TokenKind::Unit {
                value: "2.5".to_string(),
                unit: "days".to_string()
            }
        );
    }

    #[test]
    fn test_member_access_after_integer_is_not_a_fraction() {
        let tokens = lex("1.toString()").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Int("1".to_string()));
        assert_eq!(tokens[1].text, ".");
    }

    #[test]
    fn test_invalid_hex_literal() {
        let err = lex("0x").unwrap_err();
        assert!(err.message.contains("hexadecimal"));
    }
}
