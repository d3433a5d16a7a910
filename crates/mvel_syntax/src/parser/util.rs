/// Small shared productions: names and comma-separated lists.
impl<'a> Parser<'a> {
    // ========================================================================
    // Utilities
    // ========================================================================

    fn identifier(&mut self) -> Result<Ident, SyntaxError> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name.clone())
            }
            _ => Err(self.error_here("Expected identifier")),
        }
    }

    /// A member name after `.` or `?.`. Reserved words are allowed here (`map.contains(k)`, `x.in`).
    fn member_name(&mut self) -> Result<Ident, SyntaxError> {
        let token = self.peek();
        match &token.kind {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name.clone())
            }
            TokenKind::Keyword(_) => {
                self.advance();
                Ok(token.text.clone())
            }
            _ => Err(self.error_here("Expected member name")),
        }
    }

    /// `( expr, expr, ... )`
    fn call_args(&mut self) -> Result<Vec<Spanned<Expr>>, SyntaxError> {
        self.with_rule("call arguments", |p| {
            p.expect_punct(PunctuationId::LParen, "Expected '('")?;
            let mut args = Vec::new();
            if p.match_punct(PunctuationId::RParen) {
                return Ok(args);
            }
            let outer = std::mem::replace(&mut p.no_lambda, false);
            loop {
                args.push(p.expression()?);
                if !p.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
            p.no_lambda = outer;
            p.expect_punct(PunctuationId::RParen, "Expected ')' after arguments")?;
            Ok(args)
        })
    }

    /// `expr, expr, ...` without delimiters (for-loop init and update).
    fn expression_list(&mut self) -> Result<Vec<Spanned<Expr>>, SyntaxError> {
        let mut exprs = vec![self.expression()?];
        while self.match_punct(PunctuationId::Comma) {
            exprs.push(self.expression()?);
        }
        Ok(exprs)
    }
}
