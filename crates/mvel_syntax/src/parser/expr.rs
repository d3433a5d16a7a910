/// Expression parsing: the binary/unary precedence ladder.
///
/// From loosest to tightest: assignment, ternary, `||`, `&&`, `|`, `^`, `&`, membership (`contains`, `in`),
/// similarity (`strsim`, `soundslike`), equality, type-test (`instanceof`, `is`), relational, additive,
/// multiplicative, power, prefix unary, postfix.
impl<'a> Parser<'a> {
    // ========================================================================
    // Expressions
    // ========================================================================

    fn expression(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        self.assignment()
    }

    /// Right-associative assignment.
    fn assignment(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let target = self.ternary()?;

        let op = match self.peek().operator_id() {
            Some(OperatorId::Eq) => AssignOp::Assign,
            Some(OperatorId::PlusEq) => AssignOp::Add,
            Some(OperatorId::MinusEq) => AssignOp::Sub,
            Some(OperatorId::StarEq) => AssignOp::Mul,
            Some(OperatorId::SlashEq) => AssignOp::Div,
            Some(OperatorId::PercentEq) => AssignOp::Rem,
            Some(OperatorId::StarStarEq) => AssignOp::Pow,
            _ => return Ok(target),
        };
        if !is_assignable(&target.node) {
            return Err(self.error_at("Invalid assignment target", target.span));
        }
        self.advance();

        let value = self.assignment()?;
        let span = target.span.merge(value.span);
        Ok(Spanned::new(Expr::Assign(Box::new(target), op, Box::new(value)), span))
    }

    /// Right-associative `cond ? a : b`.
    fn ternary(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let condition = self.logical_or()?;
        if !self.check_punct(PunctuationId::Question) {
            return Ok(condition);
        }
        self.advance();
        let then_branch = self.ternary()?;
        self.expect_punct(PunctuationId::Colon, "Expected ':' in conditional expression")?;
        let else_branch = self.ternary()?;
        let span = condition.span.merge(else_branch.span);
        Ok(Spanned::new(
            Expr::Ternary(Box::new(condition), Box::new(then_branch), Box::new(else_branch)),
            span,
        ))
    }

    fn logical_or(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        self.binary_level(Self::logical_and, |k| match k {
            TokenKind::Operator(OperatorId::OrOr) => Some(BinaryOp::Or),
            _ => None,
        })
    }

    fn logical_and(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        self.binary_level(Self::bit_or, |k| match k {
            TokenKind::Operator(OperatorId::AndAnd) => Some(BinaryOp::And),
            _ => None,
        })
    }

    fn bit_or(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        self.binary_level(Self::bit_xor, |k| match k {
            TokenKind::Operator(OperatorId::Pipe) => Some(BinaryOp::BitOr),
            _ => None,
        })
    }

    fn bit_xor(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        self.binary_level(Self::bit_and, |k| match k {
            TokenKind::Operator(OperatorId::Caret) => Some(BinaryOp::BitXor),
            _ => None,
        })
    }

    fn bit_and(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        self.binary_level(Self::membership, |k| match k {
            TokenKind::Operator(OperatorId::Amp) => Some(BinaryOp::BitAnd),
            _ => None,
        })
    }

    fn membership(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        self.binary_level(Self::similarity, |k| match k {
            TokenKind::Keyword(KeywordId::Contains) => Some(BinaryOp::Contains),
            TokenKind::Keyword(KeywordId::In) => Some(BinaryOp::In),
            _ => None,
        })
    }

    fn similarity(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        self.binary_level(Self::equality, |k| match k {
            TokenKind::Keyword(KeywordId::StrSim) => Some(BinaryOp::StrSim),
            TokenKind::Keyword(KeywordId::SoundsLike) => Some(BinaryOp::SoundsLike),
            _ => None,
        })
    }

    fn equality(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        self.binary_level(Self::type_test, |k| match k {
            TokenKind::Operator(OperatorId::EqEq) => Some(BinaryOp::Eq),
            TokenKind::Operator(OperatorId::NotEq) => Some(BinaryOp::NotEq),
            _ => None,
        })
    }

    /// `expr instanceof Type [binding]`, with `is` accepted as a synonym.
    fn type_test(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let mut left = self.relational()?;
        while self.match_keyword(KeywordId::InstanceOf) || self.match_keyword(KeywordId::Is) {
            let ty = self.type_ref()?;
            let binding = match &self.peek().kind {
                TokenKind::Ident(name) => {
                    self.advance();
                    Some(name.clone())
                }
                _ => None,
            };
            let span = self.span_from(left.span);
            left = Spanned::new(
                Expr::TypeTest(TypeTest {
                    expr: Box::new(left),
                    ty,
                    binding,
                }),
                span,
            );
        }
        Ok(left)
    }

    fn relational(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        self.binary_level(Self::additive, |k| match k {
            TokenKind::Operator(OperatorId::Lt) => Some(BinaryOp::Lt),
            TokenKind::Operator(OperatorId::LtEq) => Some(BinaryOp::LtEq),
            TokenKind::Operator(OperatorId::Gt) => Some(BinaryOp::Gt),
            TokenKind::Operator(OperatorId::GtEq) => Some(BinaryOp::GtEq),
            _ => None,
        })
    }

    fn additive(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        self.binary_level(Self::multiplicative, |k| match k {
            TokenKind::Operator(OperatorId::Plus) => Some(BinaryOp::Add),
            TokenKind::Operator(OperatorId::Minus) => Some(BinaryOp::Sub),
            _ => None,
        })
    }

    fn multiplicative(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        self.binary_level(Self::power, |k| match k {
            TokenKind::Operator(OperatorId::Star) => Some(BinaryOp::Mul),
            TokenKind::Operator(OperatorId::Slash) => Some(BinaryOp::Div),
            TokenKind::Operator(OperatorId::Percent) => Some(BinaryOp::Rem),
            _ => None,
        })
    }

    fn power(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        self.binary_level(Self::unary, |k| match k {
            TokenKind::Operator(OperatorId::StarStar) => Some(BinaryOp::Pow),
            _ => None,
        })
    }

    /// Parse one left-associative level: `next (op next)*`.
    fn binary_level(
        &mut self,
        next: fn(&mut Self) -> Result<Spanned<Expr>, SyntaxError>,
        op_for: fn(&TokenKind) -> Option<BinaryOp>,
    ) -> Result<Spanned<Expr>, SyntaxError> {
        let mut left = next(self)?;
        while let Some(op) = op_for(&self.peek().kind) {
            self.advance();
            let right = next(self)?;
            let span = left.span.merge(right.span);
            left = Spanned::new(Expr::Binary(Box::new(left), op, Box::new(right)), span);
        }
        Ok(left)
    }

    /// Prefix operators and casts.
    fn unary(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let start = self.current_span();
        let prefix = match self.peek().operator_id() {
            Some(OperatorId::Bang) => Some(UnaryOp::Not),
            Some(OperatorId::Minus) => Some(UnaryOp::Neg),
            Some(OperatorId::Plus) => Some(UnaryOp::Plus),
            Some(OperatorId::Tilde) => Some(UnaryOp::BitNot),
            _ => None,
        };
        if let Some(op) = prefix {
            self.advance();
            let operand = self.unary()?;
            let span = start.merge(operand.span);
            return Ok(Spanned::new(Expr::Unary(op, Box::new(operand)), span));
        }

        let step = match self.peek().operator_id() {
            Some(OperatorId::PlusPlus) => Some(IncDec::Inc),
            Some(OperatorId::MinusMinus) => Some(IncDec::Dec),
            _ => None,
        };
        if let Some(step) = step {
            self.advance();
            let operand = self.unary()?;
            let span = start.merge(operand.span);
            return Ok(Spanned::new(Expr::Prefix(step, Box::new(operand)), span));
        }

        if self.check_punct(PunctuationId::LParen) {
            if let Some(ty) = self.speculate(Self::cast_prefix) {
                let operand = self.unary()?;
                let span = start.merge(operand.span);
                return Ok(Spanned::new(Expr::Cast(ty, Box::new(operand)), span));
            }
        }

        self.postfix()
    }

    /// Parse `(Type)` when it is followed by something a cast can apply to.
    fn cast_prefix(&mut self) -> Result<TypeRef, SyntaxError> {
        self.expect_punct(PunctuationId::LParen, "Expected '('")?;
        let ty = self.type_ref()?;
        self.expect_punct(PunctuationId::RParen, "Expected ')'")?;

        let next = &self.peek().kind;
        let castable = if is_primitive_type(&ty) {
            starts_operand(next) || matches!(next, TokenKind::Operator(OperatorId::Minus | OperatorId::Plus))
        } else {
            starts_operand(next)
        };
        if castable {
            Ok(ty)
        } else {
            Err(self.error_here("Not a cast"))
        }
    }
}

/// Tokens that can begin the operand of a cast (excluding ambiguous infix operators).
fn starts_operand(kind: &TokenKind) -> bool {
    match kind {
        TokenKind::Ident(_)
        | TokenKind::Int(_)
        | TokenKind::Float(_)
        | TokenKind::Char(_)
        | TokenKind::String(_)
        | TokenKind::TextBlock(_)
        | TokenKind::Unit { .. } => true,
        TokenKind::Keyword(k) => matches!(
            k,
            KeywordId::This
                | KeywordId::Super
                | KeywordId::New
                | KeywordId::True
                | KeywordId::False
                | KeywordId::Null
                | KeywordId::Switch
        ),
        TokenKind::Punctuation(PunctuationId::LParen) => true,
        TokenKind::Operator(OperatorId::Bang | OperatorId::Tilde) => true,
        _ => false,
    }
}

/// Nodes that may appear on the left of `=`.
fn is_assignable(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Ident(_) | Expr::Field(..) | Expr::SafeField(..) | Expr::Index(..) | Expr::SuperField(_)
    )
}
