use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, TokenStream, parse_expression},
            utils::{parse_comma_separated, parse_function_rest},
        },
    },
    util::stack::ensure_sufficient_stack,
};

/// Parses a unary expression.
///
/// The only prefix operator is `-`. It has no node of its own: `-x` is
/// parsed as `0 - x`, so it follows the same numeric rules as subtraction.
///
/// The rule is: `unary := "-" unary | primary`
pub fn parse_unary(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    if tokens.peek() == Some(&Token::Minus) {
        let line = tokens.position().line;
        tokens.advance();
        let operand = ensure_sufficient_stack(|| parse_unary(tokens))?;
        return Ok(Expr::BinaryOp { left: Box::new(Expr::NumberLiteral { value: 0.0, line }),
                                   op: BinaryOperator::Sub,
                                   right: Box::new(operand),
                                   line });
    }

    parse_primary(tokens)
}

/// Parses a primary expression.
///
/// Primary expressions are the atoms of the grammar:
/// - number and string literals
/// - array literals `[a, b]`
/// - object literals `{ key: value }`
/// - function expressions `function (a) { ... }`
/// - identifiers and calls `name(args)`
/// - parenthesized expressions
///
/// # Errors
/// Returns `UnexpectedToken` or `UnexpectedEndOfInput` when none of the forms
/// above starts at the cursor.
pub fn parse_primary(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let line = tokens.position().line;

    match tokens.peek() {
        Some(Token::Number(value)) => {
            let value = *value;
            tokens.advance();
            Ok(Expr::NumberLiteral { value, line })
        },
        Some(Token::Str(value)) => {
            tokens.advance();
            Ok(Expr::StringLiteral { value: value.clone(),
                                     line })
        },
        Some(Token::LBracket) => {
            tokens.advance();
            let elements = parse_comma_separated(tokens, parse_expression, &Token::RBracket)?;
            Ok(Expr::ArrayLiteral { elements, line })
        },
        Some(Token::LBrace) => {
            tokens.advance();
            let entries = parse_comma_separated(tokens, parse_object_entry, &Token::RBrace)?;
            Ok(Expr::ObjectLiteral { entries, line })
        },
        Some(Token::Function) => {
            tokens.advance();
            parse_function_rest(tokens, line, true)
        },
        Some(Token::Identifier(name)) => {
            tokens.advance();
            if tokens.eat(&Token::LParen) {
                let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
                Ok(Expr::Call { callee: name.clone(),
                                arguments,
                                line })
            } else {
                Ok(Expr::Identifier { name: name.clone(),
                                      line })
            }
        },
        Some(Token::LParen) => {
            tokens.advance();
            let expr = parse_expression(tokens)?;
            tokens.expect(&Token::RParen)?;
            Ok(expr)
        },
        _ => Err(tokens.unexpected("expression")),
    }
}

/// Parses one `key: value` pair of an object literal. Keys are bare
/// identifiers or string literals.
fn parse_object_entry(tokens: &mut TokenStream<'_>) -> ParseResult<(String, Expr)> {
    let key = match tokens.peek() {
        Some(Token::Identifier(key) | Token::Str(key)) => key.clone(),
        _ => return Err(tokens.unexpected("object key")),
    };
    tokens.advance();
    tokens.expect(&Token::Colon)?;
    let value = parse_expression(tokens)?;
    Ok((key, value))
}
