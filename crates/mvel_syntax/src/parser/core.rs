/// Parser core types and entrypoints.
///
/// This chunk defines the [`Parser`] type and its two top-level productions.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.
/// - Parsing is fail-fast: the first mismatch returns a [`SyntaxError`] and nothing is recovered.

/// Parser state.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// Grammar rule reported in errors.
    rule: &'static str,
    /// Set while parsing `case` labels and guards, where `->` ends the label instead of starting a lambda.
    no_lambda: bool,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `mvel_syntax::lexer`; must end with `Eof`.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            rule: "expression",
            no_lambda: false,
        }
    }

    /// Parse the token stream with the requested top-level production.
    pub fn parse(self, mode: ParseMode) -> Result<Root, SyntaxError> {
        match mode {
            ParseMode::Expression => self.parse_expression().map(Root::Expression),
            ParseMode::Program => self.parse_program().map(Root::Program),
        }
    }

    /// Parse a single expression that must span the whole input (an optional trailing `;` is allowed).
    pub fn parse_expression(mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let expr = self.expression()?;
        self.match_punct(PunctuationId::Semicolon);
        if !self.is_at_end() {
            return Err(self.error_here("Expected end of expression"));
        }
        Ok(expr)
    }

    /// Parse a statement sequence up to end of input.
    pub fn parse_program(mut self) -> Result<Program, SyntaxError> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.statement()?);
        }
        Ok(Program { statements })
    }
}
