/// Type reference parsing.
///
/// Types appear in local declarations, casts, `instanceof`, `catch` clauses, switch patterns, and object creation.
impl<'a> Parser<'a> {
    // ========================================================================
    // Types
    // ========================================================================

    /// Parse `Name(.Name)*(<args>)?([])*`.
    fn type_ref(&mut self) -> Result<TypeRef, SyntaxError> {
        let mut ty = self.type_ref_base()?;
        ty.dims = self.dims();
        Ok(ty)
    }

    /// Parse a type without trailing `[]` pairs (used by `new`, where brackets carry sizes).
    fn type_ref_base(&mut self) -> Result<TypeRef, SyntaxError> {
        self.with_rule("type", |p| {
            let mut name = p.identifier()?;
            while p.check_punct(PunctuationId::Dot) && matches!(p.peek_next().kind, TokenKind::Ident(_)) {
                p.advance();
                name.push('.');
                name.push_str(&p.identifier()?);
            }

            let args = if p.match_op(OperatorId::Lt) {
                let mut args = Vec::new();
                if !p.check_op(OperatorId::Gt) {
                    loop {
                        args.push(p.type_argument()?);
                        if !p.match_punct(PunctuationId::Comma) {
                            break;
                        }
                    }
                }
                if !p.match_op(OperatorId::Gt) {
                    return Err(p.error_here("Expected '>' to close type arguments"));
                }
                Some(args)
            } else {
                None
            };

            Ok(TypeRef { name, args, dims: 0 })
        })
    }

    /// A type argument: a type, or the `?` wildcard.
    fn type_argument(&mut self) -> Result<TypeRef, SyntaxError> {
        if self.match_punct(PunctuationId::Question) {
            return Ok(TypeRef::simple("?"));
        }
        self.type_ref()
    }

    /// Count `[]` pairs.
    fn dims(&mut self) -> usize {
        let mut dims = 0;
        while self.check_punct(PunctuationId::LBracket) && self.peek_next().kind.is_punctuation(PunctuationId::RBracket)
        {
            self.advance();
            self.advance();
            dims += 1;
        }
        dims
    }

    /// Return `true` if the upcoming tokens read as `Type name`, i.e. the start of a local declaration.
    fn looks_like_local_decl(&mut self) -> bool {
        self.lookahead(|p| {
            p.match_keyword(KeywordId::Final);
            p.type_ref().is_ok() && matches!(p.peek().kind, TokenKind::Ident(_))
        })
    }
}

/// Primitive type names of the host language.
const PRIMITIVE_TYPES: &[&str] = &["boolean", "byte", "char", "short", "int", "long", "float", "double"];

fn is_primitive_type(ty: &TypeRef) -> bool {
    ty.args.is_none() && PRIMITIVE_TYPES.contains(&ty.name.as_str())
}
