// ============================================================================
// Public API
// ============================================================================

/// Parse a token stream with the requested top-level production.
///
/// ## Parameters
/// - `tokens`: Output of [`lexer::lex`]; must end with an `Eof` token.
/// - `mode`: Whether the input is a single expression or a statement sequence.
///
/// ## Errors
/// - The first [`SyntaxError`] encountered. There is no recovery.
#[tracing::instrument(skip_all, fields(token_count = tokens.len(), mode = ?mode))]
pub fn parse(tokens: &[Token], mode: ParseMode) -> Result<Root, SyntaxError> {
    match tokens.last() {
        Some(last) if matches!(last.kind, TokenKind::Eof) => Parser::new(tokens).parse(mode),
        _ => Err(SyntaxError::new(
            "Token stream must end with end of input",
            "input",
            Span::default(),
            1,
            1,
        )),
    }
}

/// Lex and parse `source` in one step.
///
/// ## Errors
/// - Lexer or parser [`SyntaxError`], with the source text attached for rendering.
pub fn parse_source(source: &str, mode: ParseMode) -> Result<Root, SyntaxError> {
    let tokens = lexer::lex(source)?;
    parse(&tokens, mode).map_err(|e| e.with_source(source))
}
