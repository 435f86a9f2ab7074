use std::rc::Rc;

use crate::{
    ast::{Expr, FunctionDef},
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_block,
            core::{ParseResult, TokenStream},
        },
    },
};

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by array literals, object literals, call argument
/// lists and parameter lists. It repeatedly calls `parse_item` to parse one
/// element, expecting either a comma, to continue the list, or the closing
/// token, to end it. An immediately encountered closing token produces an
/// empty list. The opening delimiter must already be consumed.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, if a token other than
/// `,` or `closing` follows an item, or if the input ends first.
pub(in crate::interpreter::parser) fn parse_comma_separated<T>(
    tokens: &mut TokenStream<'_>,
    parse_item: impl Fn(&mut TokenStream<'_>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>> {
    let mut items = Vec::new();
    if tokens.eat(closing) {
        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        if tokens.eat(&Token::Comma) {
            continue;
        }
        if tokens.eat(closing) {
            break;
        }
        return Err(tokens.unexpected(format!("',' or {closing}")));
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier or the input
/// ends.
pub(in crate::interpreter::parser) fn parse_identifier(tokens: &mut TokenStream<'_>)
                                                       -> ParseResult<String> {
    if let Some(Token::Identifier(name)) = tokens.peek() {
        tokens.advance();
        Ok(name.clone())
    } else {
        Err(tokens.unexpected("identifier"))
    }
}

/// Parses the remainder of a function after the `function` keyword.
///
/// Both the statement form `function name(a, b) { ... }` and the expression
/// form `function (a, b) { ... }` share this routine; `allow_anonymous`
/// decides whether the name may be omitted.
///
/// Grammar: `function_rest := ID? "(" params ")" block`
///
/// # Parameters
/// - `tokens`: Token stream positioned after `function`.
/// - `line`: Line number of the `function` keyword.
/// - `allow_anonymous`: Whether a missing name is accepted.
///
/// # Returns
/// An `Expr::FunctionDecl` node.
pub(in crate::interpreter::parser) fn parse_function_rest(tokens: &mut TokenStream<'_>,
                                                          line: usize,
                                                          allow_anonymous: bool)
                                                          -> ParseResult<Expr> {
    let name = match tokens.peek() {
        Some(Token::Identifier(_)) => Some(parse_identifier(tokens)?),
        _ if allow_anonymous => None,
        _ => return Err(tokens.unexpected("function name")),
    };

    tokens.expect(&Token::LParen)?;
    let params = parse_comma_separated(tokens, parse_identifier, &Token::RParen)?;
    let body = parse_block(tokens)?;

    Ok(Expr::FunctionDecl(Rc::new(FunctionDef { name,
                                                params,
                                                body: Rc::new(body),
                                                line })))
}
