/// Primary expressions: literals, names, object creation, inline collections, lambdas, and switch expressions.
impl<'a> Parser<'a> {
    // ========================================================================
    // Primary
    // ========================================================================

    fn primary(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let start = self.current_span();
        let token = self.peek();

        if let Some(literal) = literal_of(&token.kind) {
            self.advance();
            return Ok(Spanned::new(Expr::Literal(literal), start));
        }

        let expr = match &token.kind {
            TokenKind::Ident(name) => {
                if !self.no_lambda && self.peek_next().kind.is_punctuation(PunctuationId::Arrow) {
                    self.advance();
                    self.advance();
                    let body = self.lambda_body()?;
                    Expr::Lambda(Lambda {
                        params: vec![name.clone()],
                        parenthesized: false,
                        body,
                    })
                } else {
                    self.advance();
                    Expr::Ident(name.clone())
                }
            }
            TokenKind::Keyword(KeywordId::This) => {
                self.advance();
                Expr::This
            }
            TokenKind::Keyword(KeywordId::Super) => {
                self.advance();
                let is_field = self.check_punct(PunctuationId::Dot)
                    && matches!(self.peek_at(1).kind, TokenKind::Ident(_))
                    && !self.peek_at(2).kind.is_punctuation(PunctuationId::LParen);
                if is_field {
                    self.advance();
                    Expr::SuperField(self.identifier()?)
                } else {
                    Expr::Super
                }
            }
            TokenKind::Keyword(KeywordId::New) => {
                self.advance();
                Expr::New(Box::new(self.creator()?))
            }
            TokenKind::Keyword(KeywordId::Switch) => {
                self.advance();
                Expr::Switch(self.switch_block()?)
            }
            TokenKind::Keyword(KeywordId::IsDef) => {
                self.advance();
                let operand = if self.match_punct(PunctuationId::LParen) {
                    let inner = self.expression()?;
                    self.expect_punct(PunctuationId::RParen, "Expected ')' after isdef operand")?;
                    inner
                } else {
                    self.postfix()?
                };
                Expr::IsDef(Box::new(operand))
            }
            TokenKind::Keyword(KeywordId::Empty) => {
                self.advance();
                Expr::Empty
            }
            TokenKind::Keyword(KeywordId::Nil) => {
                self.advance();
                Expr::Nil
            }
            TokenKind::Keyword(KeywordId::Undefined) => {
                self.advance();
                Expr::Undefined
            }
            TokenKind::Punctuation(PunctuationId::LBracket) => self.inline_collection()?,
            TokenKind::Punctuation(PunctuationId::LBrace) => self.brace_literal()?,
            TokenKind::Punctuation(PunctuationId::LParen) => {
                if !self.no_lambda && self.lookahead(Self::is_lambda_head) {
                    self.parenthesized_lambda()?
                } else {
                    self.advance();
                    let inner = self.expression()?;
                    self.expect_punct(PunctuationId::RParen, "Expected ')' to close parenthesized expression")?;
                    Expr::Paren(Box::new(inner))
                }
            }
            _ => return Err(self.error_here("Expected expression")),
        };

        Ok(Spanned::new(expr, self.span_from(start)))
    }

    // ========================================================================
    // Object creation
    // ========================================================================

    /// `new Type(args)`, `new Type[n][m][]`, or `new Type[]{...}`. The `new` keyword has been consumed.
    fn creator(&mut self) -> Result<Creator, SyntaxError> {
        self.with_rule("object creation", |p| {
            let mut ty = p.type_ref_base()?;

            if p.check_punct(PunctuationId::LParen) {
                let args = p.call_args()?;
                return Ok(Creator::Class { ty, args });
            }

            if !p.check_punct(PunctuationId::LBracket) {
                return Err(p.error_here("Expected '(' or '[' after type in object creation"));
            }

            if p.peek_next().kind.is_punctuation(PunctuationId::RBracket) {
                ty.dims = p.dims();
                let elements = p.array_initializer()?;
                return Ok(Creator::ArrayInit { ty, elements });
            }

            let mut sizes = Vec::new();
            while p.check_punct(PunctuationId::LBracket) && !p.peek_next().kind.is_punctuation(PunctuationId::RBracket) {
                p.advance();
                sizes.push(p.expression()?);
                p.expect_punct(PunctuationId::RBracket, "Expected ']' after array size")?;
            }
            let extra_dims = p.dims();
            Ok(Creator::Array { ty, sizes, extra_dims })
        })
    }

    // ========================================================================
    // Inline collections
    // ========================================================================

    /// `[a, b]` list, `[k: v, ...]` map, or `[:]` empty map.
    fn inline_collection(&mut self) -> Result<Expr, SyntaxError> {
        self.with_rule("inline collection", |p| {
            p.expect_punct(PunctuationId::LBracket, "Expected '['")?;

            if p.check_punct(PunctuationId::Colon) && p.peek_next().kind.is_punctuation(PunctuationId::RBracket) {
                p.advance();
                p.advance();
                return Ok(Expr::Map(Vec::new()));
            }
            if p.match_punct(PunctuationId::RBracket) {
                return Ok(Expr::List(Vec::new()));
            }

            let first = p.expression()?;
            if p.match_punct(PunctuationId::Colon) {
                let entries = p.map_entries(first, PunctuationId::RBracket)?;
                return Ok(Expr::Map(entries));
            }

            let mut elements = vec![first];
            while p.match_punct(PunctuationId::Comma) {
                elements.push(p.expression()?);
            }
            p.expect_punct(PunctuationId::RBracket, "Expected ']' to close list")?;
            Ok(Expr::List(elements))
        })
    }

    /// `{}` empty map, `{k: v, ...}` map, or `{a, b}` array initializer.
    fn brace_literal(&mut self) -> Result<Expr, SyntaxError> {
        self.with_rule("inline collection", |p| {
            p.expect_punct(PunctuationId::LBrace, "Expected '{'")?;
            if p.match_punct(PunctuationId::RBrace) {
                return Ok(Expr::Map(Vec::new()));
            }

            let first = p.expression()?;
            if p.match_punct(PunctuationId::Colon) {
                let entries = p.map_entries(first, PunctuationId::RBrace)?;
                return Ok(Expr::Map(entries));
            }

            let mut elements = vec![first];
            while p.match_punct(PunctuationId::Comma) {
                elements.push(p.expression()?);
            }
            p.expect_punct(PunctuationId::RBrace, "Expected '}' to close array initializer")?;
            Ok(Expr::ArrayInit(elements))
        })
    }

    /// Remaining `key: value` pairs after the first key and its `:` have been consumed.
    fn map_entries(&mut self, first_key: Spanned<Expr>, close: PunctuationId) -> Result<Vec<MapEntry>, SyntaxError> {
        let value = self.expression()?;
        let mut entries = vec![MapEntry { key: first_key, value }];
        while self.match_punct(PunctuationId::Comma) {
            let key = self.expression()?;
            self.expect_punct(PunctuationId::Colon, "Expected ':' between map key and value")?;
            let value = self.expression()?;
            entries.push(MapEntry { key, value });
        }
        self.expect_punct(close, "Expected end of map literal")?;
        Ok(entries)
    }

    // ========================================================================
    // Lambdas
    // ========================================================================

    /// `()` or `(a, b, ...)` followed by `->`.
    fn is_lambda_head(&mut self) -> bool {
        if !self.match_punct(PunctuationId::LParen) {
            return false;
        }
        if !self.match_punct(PunctuationId::RParen) {
            loop {
                if self.identifier().is_err() {
                    return false;
                }
                if self.match_punct(PunctuationId::RParen) {
                    break;
                }
                if !self.match_punct(PunctuationId::Comma) {
                    return false;
                }
            }
        }
        self.check_punct(PunctuationId::Arrow)
    }

    fn parenthesized_lambda(&mut self) -> Result<Expr, SyntaxError> {
        self.with_rule("lambda", |p| {
            p.expect_punct(PunctuationId::LParen, "Expected '('")?;
            let mut params = Vec::new();
            if !p.match_punct(PunctuationId::RParen) {
                loop {
                    params.push(p.identifier()?);
                    if p.match_punct(PunctuationId::RParen) {
                        break;
                    }
                    p.expect_punct(PunctuationId::Comma, "Expected ',' or ')' in lambda parameters")?;
                }
            }
            p.expect_punct(PunctuationId::Arrow, "Expected '->' after lambda parameters")?;
            let body = p.lambda_body()?;
            Ok(Expr::Lambda(Lambda {
                params,
                parenthesized: true,
                body,
            }))
        })
    }

    fn lambda_body(&mut self) -> Result<LambdaBody, SyntaxError> {
        if self.check_punct(PunctuationId::LBrace) {
            Ok(LambdaBody::Block(self.block()?))
        } else {
            Ok(LambdaBody::Expr(Box::new(self.expression()?)))
        }
    }
}

/// Map a literal token (or literal keyword) to its AST literal.
fn literal_of(kind: &TokenKind) -> Option<Literal> {
    let literal = match kind {
        TokenKind::Int(s) => Literal::Int(s.clone()),
        TokenKind::Float(s) => Literal::Float(s.clone()),
        TokenKind::Char(s) => Literal::Char(s.clone()),
        TokenKind::String(s) => Literal::String(s.clone()),
        TokenKind::TextBlock(s) => Literal::TextBlock(s.clone()),
        TokenKind::Regex(s) => Literal::Regex(s.clone()),
        TokenKind::Unit { value, unit } => Literal::Unit {
            value: value.clone(),
            unit: unit.clone(),
        },
        TokenKind::Keyword(KeywordId::True) => Literal::Bool(true),
        TokenKind::Keyword(KeywordId::False) => Literal::Bool(false),
        TokenKind::Keyword(KeywordId::Null) => Literal::Null,
        _ => return None,
    };
    Some(literal)
}
