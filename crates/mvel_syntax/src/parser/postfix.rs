/// Postfix forms.
///
/// Member access, calls, indexing, and the MVEL postfix extensions are applied left to right on the expression
/// built so far:
///
/// | Syntax            | Node                      |
/// |-------------------|---------------------------|
/// | `a.b` / `a.b(x)`  | field / method call       |
/// | `a?.b` / `a?.b(x)`| guarded field / call      |
/// | `a[i]` / `a?[i]`  | index / guarded index     |
/// | `a[t1, t2]`       | predicate block           |
/// | `a{ f = v }`      | mutation block            |
/// | `c.{e}` / `c.?(e)`| projection / selection    |
/// | `e#T`             | coercion                  |
/// | `s ~ r`           | regex match               |
/// | `a::b`            | method reference          |
/// | `a++` / `a--`     | postfix increment         |
impl<'a> Parser<'a> {
    // ========================================================================
    // Postfix
    // ========================================================================

    fn postfix(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let mut expr = self.primary()?;

        loop {
            let start = expr.span;
            let kind = &self.peek().kind;
            expr = match kind {
                TokenKind::Punctuation(PunctuationId::Dot) => {
                    self.advance();
                    if self.check_punct(PunctuationId::LBrace) {
                        self.projection(expr)?
                    } else if self.check_punct(PunctuationId::Question)
                        && self.peek_next().kind.is_punctuation(PunctuationId::LParen)
                    {
                        self.selection(expr)?
                    } else {
                        let name = self.member_name()?;
                        if self.check_punct(PunctuationId::LParen) {
                            let args = self.call_args()?;
                            Expr::MethodCall(Box::new(expr), name, args)
                        } else {
                            Expr::Field(Box::new(expr), name)
                        }
                    }
                }
                TokenKind::Punctuation(PunctuationId::QuestionDot) => {
                    self.advance();
                    let name = self.member_name()?;
                    if self.check_punct(PunctuationId::LParen) {
                        let args = self.call_args()?;
                        Expr::SafeMethodCall(Box::new(expr), name, args)
                    } else {
                        Expr::SafeField(Box::new(expr), name)
                    }
                }
                TokenKind::Punctuation(PunctuationId::Question)
                    if self.peek_next().kind.is_punctuation(PunctuationId::LBracket)
                        && self.peek().is_adjacent_to(self.peek_next()) =>
                {
                    self.advance();
                    self.advance();
                    let index = self.expression()?;
                    self.expect_punct(PunctuationId::RBracket, "Expected ']' after guarded index")?;
                    Expr::SafeIndex(Box::new(expr), Box::new(index))
                }
                TokenKind::Punctuation(PunctuationId::LBracket) => self.bracket_suffix(expr)?,
                TokenKind::Punctuation(PunctuationId::LParen) => {
                    let args = self.call_args()?;
                    Expr::Call(Box::new(expr), args)
                }
                TokenKind::Punctuation(PunctuationId::LBrace) if accepts_mutation_block(&expr.node) => {
                    self.mutation_block(expr)?
                }
                TokenKind::Punctuation(PunctuationId::ColonColon) => {
                    self.advance();
                    let name = if self.match_keyword(KeywordId::New) {
                        "new".to_string()
                    } else {
                        self.identifier()?
                    };
                    Expr::MethodRef(Box::new(expr), name)
                }
                TokenKind::Operator(OperatorId::Hash) => {
                    self.advance();
                    let target = self.with_rule("coercion", |p| match &p.peek().kind {
                        TokenKind::Ident(name) => {
                            p.advance();
                            Ok(CoercionTarget::Type(name.clone()))
                        }
                        TokenKind::String(name) => {
                            p.advance();
                            Ok(CoercionTarget::Quoted(name.clone()))
                        }
                        _ => Err(p.error_here("Expected type name after '#'")),
                    })?;
                    Expr::Coercion(Box::new(expr), target)
                }
                TokenKind::Operator(OperatorId::Tilde) => {
                    self.advance();
                    let pattern = self.unary()?;
                    Expr::RegexMatch(Box::new(expr), Box::new(pattern))
                }
                TokenKind::Operator(OperatorId::PlusPlus) => {
                    self.advance();
                    Expr::Postfix(Box::new(expr), IncDec::Inc)
                }
                TokenKind::Operator(OperatorId::MinusMinus) => {
                    self.advance();
                    Expr::Postfix(Box::new(expr), IncDec::Dec)
                }
                _ => break,
            }
            .into_spanned(self.span_from(start));
        }

        Ok(expr)
    }

    /// `.{ expr }`; the leading `.` has been consumed.
    fn projection(&mut self, collection: Spanned<Expr>) -> Result<Expr, SyntaxError> {
        self.with_rule("projection", |p| {
            p.expect_punct(PunctuationId::LBrace, "Expected '{'")?;
            let body = p.expression()?;
            p.expect_punct(PunctuationId::RBrace, "Expected '}' to close projection")?;
            Ok(Expr::Projection(Box::new(collection), Box::new(body)))
        })
    }

    /// `.?( expr )`; the leading `.` has been consumed.
    fn selection(&mut self, collection: Spanned<Expr>) -> Result<Expr, SyntaxError> {
        self.with_rule("selection", |p| {
            p.expect_punct(PunctuationId::Question, "Expected '?'")?;
            p.expect_punct(PunctuationId::LParen, "Expected '('")?;
            let body = p.expression()?;
            p.expect_punct(PunctuationId::RParen, "Expected ')' to close selection")?;
            Ok(Expr::Selection(Box::new(collection), Box::new(body)))
        })
    }

    /// `[ ... ]` after an expression: an index, or a predicate block.
    ///
    /// ## Notes
    /// - `a[]` and `a[t1, t2, ...]` are always predicate blocks.
    /// - `a[t]` is a predicate block when `t` is itself a test (comparison, logical, type-test, membership, regex,
    ///   negation, `isdef`, or a nested predicate block); otherwise it is an index.
    fn bracket_suffix(&mut self, subject: Spanned<Expr>) -> Result<Expr, SyntaxError> {
        self.with_rule("predicate block", |p| {
            p.expect_punct(PunctuationId::LBracket, "Expected '['")?;
            if p.match_punct(PunctuationId::RBracket) {
                return Ok(Expr::PredicateBlock(Box::new(subject), Vec::new()));
            }

            let first = p.expression()?;
            if p.match_punct(PunctuationId::RBracket) {
                return Ok(if is_test(&first.node) {
                    Expr::PredicateBlock(Box::new(subject), vec![first])
                } else {
                    Expr::Index(Box::new(subject), Box::new(first))
                });
            }

            let mut tests = vec![first];
            while p.match_punct(PunctuationId::Comma) {
                tests.push(p.expression()?);
            }
            p.expect_punct(PunctuationId::RBracket, "Expected ']' to close predicate block")?;
            Ok(Expr::PredicateBlock(Box::new(subject), tests))
        })
    }

    /// `{ field = value, expr, ... }` applied to `subject`.
    fn mutation_block(&mut self, subject: Spanned<Expr>) -> Result<Expr, SyntaxError> {
        self.with_rule("mutation block", |p| {
            p.expect_punct(PunctuationId::LBrace, "Expected '{'")?;
            let mut entries = Vec::new();
            if !p.match_punct(PunctuationId::RBrace) {
                loop {
                    entries.push(p.mutation_entry()?);
                    if p.match_punct(PunctuationId::RBrace) {
                        break;
                    }
                    p.expect_punct(PunctuationId::Comma, "Expected ',' or '}' in mutation block")?;
                    if p.check_punct(PunctuationId::RBrace) {
                        return Err(p.error_here("Trailing comma in mutation block"));
                    }
                }
            }
            Ok(Expr::MutationBlock(Box::new(subject), entries))
        })
    }

    fn mutation_entry(&mut self) -> Result<MutationEntry, SyntaxError> {
        if let TokenKind::Ident(field) = &self.peek().kind {
            if self.peek_next().kind.is_operator(OperatorId::Eq) {
                self.advance();
                self.advance();
                let value = self.expression()?;
                return Ok(MutationEntry::Assign {
                    field: field.clone(),
                    value,
                });
            }
        }
        Ok(MutationEntry::Expr(self.expression()?))
    }
}

impl Expr {
    fn into_spanned(self, span: Span) -> Spanned<Expr> {
        Spanned::new(self, span)
    }
}

/// Whether a single bracketed element reads as a boolean test rather than an index.
fn is_test(expr: &Expr) -> bool {
    match expr {
        Expr::Binary(_, op, _) => op.is_boolean(),
        Expr::TypeTest(_)
        | Expr::RegexMatch(..)
        | Expr::IsDef(_)
        | Expr::PredicateBlock(..)
        | Expr::Unary(UnaryOp::Not, _) => true,
        _ => false,
    }
}

/// Subjects a `{ ... }` mutation block may follow.
fn accepts_mutation_block(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Ident(_)
            | Expr::This
            | Expr::Field(..)
            | Expr::SafeField(..)
            | Expr::Index(..)
            | Expr::MethodCall(..)
            | Expr::Call(..)
            | Expr::New(_)
            | Expr::Paren(_)
            | Expr::Coercion(..)
    )
}
