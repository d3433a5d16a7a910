/// Token-stream helpers.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`)
/// - Matching / expecting keywords, operators, and punctuation
/// - Error construction and rule tracking
/// - Backtracking for the few speculative productions (casts, local declarations, lambdas)
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &'a Token {
        self.peek_at(0)
    }

    /// Return the token after the current token without consuming it.
    fn peek_next(&self) -> &'a Token {
        self.peek_at(1)
    }

    /// Return the token `n` positions ahead, clamped to `Eof`.
    fn peek_at(&self, n: usize) -> &'a Token {
        let tokens: &'a [Token] = self.tokens;
        tokens.get(self.pos + n).unwrap_or(&tokens[tokens.len() - 1])
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Return the most recently consumed token.
    fn previous(&self) -> &'a Token {
        let tokens: &'a [Token] = self.tokens;
        &tokens[self.pos.saturating_sub(1)]
    }

    /// Return `true` if the current token is the given keyword.
    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    /// Return `true` if the current token is the given punctuation.
    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    /// Return `true` if the current token is the given operator.
    fn check_op(&self, id: OperatorId) -> bool {
        self.peek().kind.is_operator(id)
    }

    /// Return `true` if the current token is the contextual word `word`.
    fn check_contextual(&self, word: &str) -> bool {
        self.peek().kind.ident() == Some(word)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, id: KeywordId, msg: &str) -> Result<&'a Token, SyntaxError> {
        if self.check_keyword(id) {
            Ok(self.advance())
        } else {
            Err(self.error_here(msg))
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, msg: &str) -> Result<&'a Token, SyntaxError> {
        if self.check_punct(id) {
            Ok(self.advance())
        } else {
            Err(self.error_here(msg))
        }
    }

    /// Span of the current token.
    fn current_span(&self) -> Span {
        self.peek().span
    }

    /// Span from `start` to the end of the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        Span::new(start.start, self.previous().span.end.max(start.end))
    }

    // ========================================================================
    // Errors and rules
    // ========================================================================

    /// Build an error pointing at the current token.
    fn error_here(&self, msg: &str) -> SyntaxError {
        let token = self.peek();
        SyntaxError::new(
            format!("{}, found {}", msg, describe(token)),
            self.rule,
            token.span,
            token.line,
            token.column,
        )
    }

    /// Build an error pointing at an already-parsed node.
    fn error_at(&self, msg: &str, span: Span) -> SyntaxError {
        let token = self
            .tokens
            .iter()
            .find(|t| t.span.start >= span.start)
            .unwrap_or_else(|| self.peek());
        SyntaxError::new(msg, self.rule, span, token.line, token.column)
    }

    /// Run `f` with `rule` as the reported grammar rule.
    ///
    /// ## Notes
    /// - On error the inner rule is kept, so the error names the innermost production that failed.
    fn with_rule<T>(
        &mut self,
        rule: &'static str,
        f: impl FnOnce(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<T, SyntaxError> {
        let outer = std::mem::replace(&mut self.rule, rule);
        let result = f(self);
        if result.is_ok() {
            self.rule = outer;
        }
        result
    }

    // ========================================================================
    // Backtracking
    // ========================================================================

    /// Try `f`; on failure, rewind to where we started and return `None`.
    fn speculate<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, SyntaxError>) -> Option<T> {
        let saved = (self.pos, self.rule);
        match f(self) {
            Ok(value) => Some(value),
            Err(_) => {
                (self.pos, self.rule) = saved;
                None
            }
        }
    }

    /// Evaluate a lookahead predicate without consuming anything.
    fn lookahead(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        let saved = (self.pos, self.rule);
        let result = f(self);
        (self.pos, self.rule) = saved;
        result
    }
}

/// Human-readable description of a token for error messages.
fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::Eof => "end of input".to_string(),
        _ => format!("'{}'", token.text),
    }
}
