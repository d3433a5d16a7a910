/// Switch parsing (shared by switch statements and switch expressions).
///
/// Both the colon form (`case A: ... break;`) and the arrow form (`case A -> expr;`) are accepted; a single switch
/// must use one form throughout.
impl<'a> Parser<'a> {
    // ========================================================================
    // Switch
    // ========================================================================

    /// Parse `(selector) { cases }`. The `switch` keyword has already been consumed.
    fn switch_block(&mut self) -> Result<SwitchBlock, SyntaxError> {
        self.with_rule("switch", |p| {
            let selector = Box::new(p.paren_condition()?);
            p.expect_punct(PunctuationId::LBrace, "Expected '{' after switch selector")?;

            let mut style = None;
            let mut cases = Vec::new();
            while !p.match_punct(PunctuationId::RBrace) {
                if p.is_at_end() {
                    return Err(p.error_here("Expected '}' to close switch"));
                }
                let start = p.current_span();
                let (case, case_style) = p.switch_case()?;
                match style {
                    None => style = Some(case_style),
                    Some(s) if s != case_style => {
                        return Err(p.error_at(
                            "Cannot mix ':' and '->' cases in one switch",
                            p.span_from(start),
                        ));
                    }
                    Some(_) => {}
                }
                cases.push(Spanned::new(case, p.span_from(start)));
            }

            Ok(SwitchBlock {
                selector,
                style: style.unwrap_or(SwitchStyle::Arrow),
                cases,
            })
        })
    }

    fn switch_case(&mut self) -> Result<(SwitchCase, SwitchStyle), SyntaxError> {
        self.with_rule("switch case", |p| {
            let labels = p.case_labels()?;

            let outer = std::mem::replace(&mut p.no_lambda, true);
            let guard = if p.check_contextual("when") {
                p.advance();
                Some(p.expression()?)
            } else {
                None
            };
            p.no_lambda = outer;

            if p.match_punct(PunctuationId::Arrow) {
                let body = if p.check_punct(PunctuationId::LBrace) {
                    CaseBody::Block(p.block()?)
                } else if p.match_keyword(KeywordId::Throw) {
                    let value = p.expression()?;
                    p.expect_punct(PunctuationId::Semicolon, "Expected ';' after throw")?;
                    CaseBody::Throw(value)
                } else {
                    let value = p.expression()?;
                    p.expect_punct(PunctuationId::Semicolon, "Expected ';' after case expression")?;
                    CaseBody::Expr(value)
                };
                return Ok((SwitchCase { labels, guard, body }, SwitchStyle::Arrow));
            }

            p.expect_punct(PunctuationId::Colon, "Expected ':' or '->' after case label")?;
            let mut statements = Vec::new();
            while !(p.check_keyword(KeywordId::Case)
                || p.check_keyword(KeywordId::Default)
                || p.check_punct(PunctuationId::RBrace)
                || p.is_at_end())
            {
                statements.push(p.statement()?);
            }
            Ok((
                SwitchCase {
                    labels,
                    guard,
                    body: CaseBody::Statements(statements),
                },
                SwitchStyle::Colon,
            ))
        })
    }

    /// `case A, B` | `case String s` | `case null, default` | `default`
    fn case_labels(&mut self) -> Result<Vec<CaseLabel>, SyntaxError> {
        if self.match_keyword(KeywordId::Default) {
            return Ok(vec![CaseLabel::Default]);
        }
        self.expect_keyword(KeywordId::Case, "Expected 'case' or 'default'")?;

        let outer = std::mem::replace(&mut self.no_lambda, true);
        let mut labels = Vec::new();
        loop {
            labels.push(self.case_label()?);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.no_lambda = outer;
        Ok(labels)
    }

    fn case_label(&mut self) -> Result<CaseLabel, SyntaxError> {
        if self.match_keyword(KeywordId::Default) {
            return Ok(CaseLabel::Default);
        }
        let pattern = self.speculate(|p| {
            let ty = p.type_ref()?;
            let binding = p.identifier()?;
            Ok(CaseLabel::Pattern { ty, binding })
        });
        match pattern {
            Some(label) => Ok(label),
            None => Ok(CaseLabel::Expr(self.ternary()?)),
        }
    }
}
