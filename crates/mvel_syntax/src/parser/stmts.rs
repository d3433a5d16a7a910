/// Statement parsing.
///
/// Statement grammar mirrors ordinary block-structured imperative syntax: blocks, conditionals, loops, exception
/// handling, labels, local declarations, and switch statements.
impl<'a> Parser<'a> {
    // ========================================================================
    // Statements
    // ========================================================================

    fn statement(&mut self) -> Result<Spanned<Statement>, SyntaxError> {
        self.with_rule("statement", |p| {
            let start = p.current_span();
            let kind = &p.peek().kind;
            let stmt = match kind {
                TokenKind::Punctuation(PunctuationId::LBrace) => Statement::Block(p.block()?),
                TokenKind::Punctuation(PunctuationId::Semicolon) => {
                    p.advance();
                    Statement::Empty
                }
                TokenKind::Keyword(KeywordId::If) => p.if_statement()?,
                TokenKind::Keyword(KeywordId::While) => p.while_statement()?,
                TokenKind::Keyword(KeywordId::Do) => p.do_while_statement()?,
                TokenKind::Keyword(KeywordId::For) => p.for_statement()?,
                TokenKind::Keyword(KeywordId::Try) => p.try_statement()?,
                TokenKind::Keyword(KeywordId::Switch) => {
                    p.advance();
                    Statement::Switch(p.switch_block()?)
                }
                TokenKind::Keyword(KeywordId::Return) => {
                    p.advance();
                    let value = if p.check_punct(PunctuationId::Semicolon) {
                        None
                    } else {
                        Some(p.expression()?)
                    };
                    p.end_statement()?;
                    Statement::Return(value)
                }
                TokenKind::Keyword(KeywordId::Throw) => {
                    p.advance();
                    let value = p.expression()?;
                    p.end_statement()?;
                    Statement::Throw(value)
                }
                TokenKind::Keyword(KeywordId::Yield) => {
                    p.advance();
                    let value = p.expression()?;
                    p.end_statement()?;
                    Statement::Yield(value)
                }
                TokenKind::Keyword(KeywordId::Break) => {
                    p.advance();
                    let label = p.optional_label();
                    p.end_statement()?;
                    Statement::Break(label)
                }
                TokenKind::Keyword(KeywordId::Continue) => {
                    p.advance();
                    let label = p.optional_label();
                    p.end_statement()?;
                    Statement::Continue(label)
                }
                TokenKind::Ident(name) if p.peek_next().kind.is_punctuation(PunctuationId::Colon) => {
                    p.advance();
                    p.advance();
                    let body = p.statement()?;
                    Statement::Labeled(name.clone(), Box::new(body))
                }
                _ if p.check_keyword(KeywordId::Final) || p.looks_like_local_decl() => {
                    let decl = p.local_decl()?;
                    p.end_statement()?;
                    Statement::LocalDecl(decl)
                }
                _ => {
                    let expr = p.expression()?;
                    p.end_statement()?;
                    Statement::Expr(expr)
                }
            };
            Ok(Spanned::new(stmt, p.span_from(start)))
        })
    }

    /// Expect `;`. The final statement of the input may omit it.
    fn end_statement(&mut self) -> Result<(), SyntaxError> {
        if self.match_punct(PunctuationId::Semicolon) || self.is_at_end() {
            Ok(())
        } else {
            Err(self.error_here("Expected ';' after statement"))
        }
    }

    fn optional_label(&mut self) -> Option<Ident> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                self.advance();
                Some(name.clone())
            }
            _ => None,
        }
    }

    fn block(&mut self) -> Result<Block, SyntaxError> {
        self.with_rule("block", |p| {
            p.expect_punct(PunctuationId::LBrace, "Expected '{'")?;
            let mut statements = Vec::new();
            while !p.check_punct(PunctuationId::RBrace) {
                if p.is_at_end() {
                    return Err(p.error_here("Expected '}' to close block"));
                }
                statements.push(p.statement()?);
            }
            p.advance();
            Ok(Block { statements })
        })
    }

    /// `( expr )` as used by `if`, `while`, `switch`.
    fn paren_condition(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        self.expect_punct(PunctuationId::LParen, "Expected '('")?;
        let condition = self.expression()?;
        self.expect_punct(PunctuationId::RParen, "Expected ')'")?;
        Ok(condition)
    }

    fn if_statement(&mut self) -> Result<Statement, SyntaxError> {
        self.with_rule("if statement", |p| {
            p.expect_keyword(KeywordId::If, "Expected 'if'")?;
            let condition = p.paren_condition()?;
            let then_branch = Box::new(p.statement()?);
            let else_branch = if p.match_keyword(KeywordId::Else) {
                Some(Box::new(p.statement()?))
            } else {
                None
            };
            Ok(Statement::If(IfStmt {
                condition,
                then_branch,
                else_branch,
            }))
        })
    }

    fn while_statement(&mut self) -> Result<Statement, SyntaxError> {
        self.with_rule("while statement", |p| {
            p.expect_keyword(KeywordId::While, "Expected 'while'")?;
            let condition = p.paren_condition()?;
            let body = Box::new(p.statement()?);
            Ok(Statement::While(WhileStmt { condition, body }))
        })
    }

    fn do_while_statement(&mut self) -> Result<Statement, SyntaxError> {
        self.with_rule("do statement", |p| {
            p.expect_keyword(KeywordId::Do, "Expected 'do'")?;
            let body = Box::new(p.statement()?);
            p.expect_keyword(KeywordId::While, "Expected 'while' after do body")?;
            let condition = p.paren_condition()?;
            p.end_statement()?;
            Ok(Statement::DoWhile(DoWhileStmt { body, condition }))
        })
    }

    fn for_statement(&mut self) -> Result<Statement, SyntaxError> {
        self.with_rule("for statement", |p| {
            p.expect_keyword(KeywordId::For, "Expected 'for'")?;
            p.expect_punct(PunctuationId::LParen, "Expected '(' after 'for'")?;

            let init = if p.check_punct(PunctuationId::Semicolon) {
                ForInit::None
            } else if p.check_keyword(KeywordId::Final) || p.looks_like_local_decl() {
                let is_final = p.match_keyword(KeywordId::Final);
                let ty = p.type_ref()?;
                let name = p.identifier()?;
                if p.match_punct(PunctuationId::Colon) {
                    let iterable = p.expression()?;
                    p.expect_punct(PunctuationId::RParen, "Expected ')' after for-each iterable")?;
                    let body = Box::new(p.statement()?);
                    return Ok(Statement::ForEach(ForEachStmt {
                        is_final,
                        ty,
                        name,
                        iterable,
                        body,
                    }));
                }
                ForInit::Decl(p.local_decl_rest(is_final, ty, name)?)
            } else {
                ForInit::Exprs(p.expression_list()?)
            };
            p.expect_punct(PunctuationId::Semicolon, "Expected ';' after for initializer")?;

            let condition = if p.check_punct(PunctuationId::Semicolon) {
                None
            } else {
                Some(p.expression()?)
            };
            p.expect_punct(PunctuationId::Semicolon, "Expected ';' after for condition")?;

            let update = if p.check_punct(PunctuationId::RParen) {
                Vec::new()
            } else {
                p.expression_list()?
            };
            p.expect_punct(PunctuationId::RParen, "Expected ')' after for update")?;

            let body = Box::new(p.statement()?);
            Ok(Statement::For(ForStmt {
                init,
                condition,
                update,
                body,
            }))
        })
    }

    fn try_statement(&mut self) -> Result<Statement, SyntaxError> {
        self.with_rule("try statement", |p| {
            p.expect_keyword(KeywordId::Try, "Expected 'try'")?;
            let body = p.block()?;

            let mut catches = Vec::new();
            while p.match_keyword(KeywordId::Catch) {
                p.expect_punct(PunctuationId::LParen, "Expected '(' after 'catch'")?;
                p.match_keyword(KeywordId::Final);
                let mut types = vec![p.type_ref()?];
                while p.match_op(OperatorId::Pipe) {
                    types.push(p.type_ref()?);
                }
                let name = p.identifier()?;
                p.expect_punct(PunctuationId::RParen, "Expected ')' after catch parameter")?;
                let body = p.block()?;
                catches.push(CatchClause { types, name, body });
            }

            let finally = if p.match_keyword(KeywordId::Finally) {
                Some(p.block()?)
            } else {
                None
            };

            if catches.is_empty() && finally.is_none() {
                return Err(p.error_here("Expected 'catch' or 'finally' after try block"));
            }
            Ok(Statement::Try(TryStmt { body, catches, finally }))
        })
    }

    fn local_decl(&mut self) -> Result<LocalDecl, SyntaxError> {
        self.with_rule("local declaration", |p| {
            let is_final = p.match_keyword(KeywordId::Final);
            let ty = p.type_ref()?;
            let name = p.identifier()?;
            p.local_decl_rest(is_final, ty, name)
        })
    }

    /// Parse declarators after the first name has been consumed.
    fn local_decl_rest(&mut self, is_final: bool, ty: TypeRef, first: Ident) -> Result<LocalDecl, SyntaxError> {
        let mut declarators = vec![self.declarator_rest(first)?];
        while self.match_punct(PunctuationId::Comma) {
            let name = self.identifier()?;
            declarators.push(self.declarator_rest(name)?);
        }
        if ty.is_var() && declarators.iter().any(|d| d.init.is_none()) {
            return Err(self.error_here("'var' declarations require an initializer"));
        }
        Ok(LocalDecl {
            is_final,
            ty,
            declarators,
        })
    }

    fn declarator_rest(&mut self, name: Ident) -> Result<Declarator, SyntaxError> {
        let dims = self.dims();
        let init = if self.match_op(OperatorId::Eq) {
            Some(self.variable_initializer()?)
        } else {
            None
        };
        Ok(Declarator { name, dims, init })
    }

    /// An initializer: an expression, or a braced array initializer.
    fn variable_initializer(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        if self.check_punct(PunctuationId::LBrace) {
            let start = self.current_span();
            let elements = self.array_initializer()?;
            return Ok(Spanned::new(Expr::ArrayInit(elements), self.span_from(start)));
        }
        self.expression()
    }

    /// `{ a, b, {c} }`, trailing comma allowed.
    fn array_initializer(&mut self) -> Result<Vec<Spanned<Expr>>, SyntaxError> {
        self.with_rule("array initializer", |p| {
            p.expect_punct(PunctuationId::LBrace, "Expected '{'")?;
            let mut elements = Vec::new();
            while !p.check_punct(PunctuationId::RBrace) {
                elements.push(p.variable_initializer()?);
                if !p.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
            p.expect_punct(PunctuationId::RBrace, "Expected '}' to close array initializer")?;
            Ok(elements)
        })
    }
}
