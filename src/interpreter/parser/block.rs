use crate::{
    ast::Expr,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, TokenStream},
            statement::parse_statement,
        },
    },
    util::stack::ensure_sufficient_stack,
};

/// Parses a block delimited by braces.
///
/// A block consists of zero or more statements. Parsing continues until the
/// closing `}` token is encountered.
///
/// Grammar: `block := "{" statement* "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the opening brace.
///
/// # Returns
/// An `Expr::Block` containing all parsed statements.
///
/// # Errors
/// - `UnexpectedToken` if the stream does not start with `{`.
/// - `UnexpectedEndOfInput` if the closing `}` is missing.
pub fn parse_block(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let line = tokens.expect(&Token::LBrace)?.line;
    let mut statements = Vec::new();

    loop {
        if tokens.eat(&Token::RBrace) {
            break;
        }
        if tokens.is_at_end() {
            return Err(tokens.unexpected("'}'"));
        }
        statements.push(ensure_sufficient_stack(|| parse_statement(tokens))?);
    }

    Ok(Expr::Block { statements, line })
}
