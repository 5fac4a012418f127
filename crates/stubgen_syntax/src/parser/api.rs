/// Parse a token stream into a [`SyntaxTree`].
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `stubgen_syntax::lexer`.
///
/// ## Errors
/// Returns `Err(Vec<SyntaxError>)` if parsing fails.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<SyntaxTree, Vec<SyntaxError>> {
    Parser::new(tokens).parse()
}
