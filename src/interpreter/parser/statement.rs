use crate::{
    ast::Expr,
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_block,
            core::{ParseResult, TokenStream, parse_expression},
            utils::{parse_function_rest, parse_identifier},
        },
    },
    util::stack::ensure_sufficient_stack,
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a variable declaration `var x = e;`
/// - a function declaration `function f(a) { ... }`
/// - an `if` with an optional `else` or `else if` chain
/// - a `while` loop
/// - an assignment `x = e;`
/// - an expression followed by `;`
///
/// The keyword (or the identifier and `=` pair) at the cursor selects the
/// form. Anything else is parsed as an expression statement.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the start of a statement.
///
/// # Returns
/// The parsed statement as an [`Expr`] node.
///
/// # Errors
/// Returns a `ParseError` on any malformed statement, including a missing
/// trailing `;`.
pub fn parse_statement(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let line = tokens.position().line;

    match (tokens.peek(), tokens.peek_nth(1)) {
        (Some(Token::Var), _) => parse_variable_declaration(tokens, line),
        (Some(Token::Function), Some(Token::Identifier(_))) => {
            tokens.advance();
            parse_function_rest(tokens, line, false)
        },
        (Some(Token::If), _) => parse_if(tokens),
        (Some(Token::While), _) => parse_while(tokens, line),
        (Some(Token::Identifier(_)), Some(Token::Equals)) => parse_assignment(tokens, line),
        _ => {
            let expr = parse_expression(tokens)?;
            tokens.expect(&Token::Semicolon)?;
            Ok(expr)
        },
    }
}

/// Parses `var NAME = EXPR;`.
fn parse_variable_declaration(tokens: &mut TokenStream<'_>, line: usize) -> ParseResult<Expr> {
    tokens.expect(&Token::Var)?;
    let name = parse_identifier(tokens)?;
    tokens.expect(&Token::Equals)?;
    let value = parse_expression(tokens)?;
    tokens.expect(&Token::Semicolon)?;

    Ok(Expr::VarDecl { name,
                       value: Box::new(value),
                       line })
}

/// Parses `NAME = EXPR;`.
fn parse_assignment(tokens: &mut TokenStream<'_>, line: usize) -> ParseResult<Expr> {
    let name = parse_identifier(tokens)?;
    tokens.expect(&Token::Equals)?;
    let value = parse_expression(tokens)?;
    tokens.expect(&Token::Semicolon)?;

    Ok(Expr::Assignment { name,
                          value: Box::new(value),
                          line })
}

/// Parses an `if` statement.
///
/// `else if` is sugar: the trailing `if` becomes the only statement of a
/// synthesized else block, so the evaluator only ever sees block branches.
///
/// Grammar: `if := "if" "(" expr ")" block ("else" (block | if))?`
fn parse_if(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let line = tokens.expect(&Token::If)?.line;
    let condition = parse_condition(tokens)?;
    let then_branch = parse_block(tokens)?;

    let else_branch = if tokens.eat(&Token::Else) {
        if tokens.peek() == Some(&Token::If) {
            let nested_line = tokens.position().line;
            let nested = ensure_sufficient_stack(|| parse_if(tokens))?;
            Some(Box::new(Expr::Block { statements: vec![nested],
                                        line:       nested_line }))
        } else {
            Some(Box::new(parse_block(tokens)?))
        }
    } else {
        None
    };

    Ok(Expr::If { condition: Box::new(condition),
                  then_branch: Box::new(then_branch),
                  else_branch,
                  line })
}

/// Parses `while (EXPR) { ... }`.
fn parse_while(tokens: &mut TokenStream<'_>, line: usize) -> ParseResult<Expr> {
    tokens.expect(&Token::While)?;
    let condition = parse_condition(tokens)?;
    let body = parse_block(tokens)?;

    Ok(Expr::While { condition: Box::new(condition),
                     body: Box::new(body),
                     line })
}

/// Parses a parenthesized condition.
fn parse_condition(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    tokens.expect(&Token::LParen)?;
    let condition = parse_expression(tokens)?;
    tokens.expect(&Token::RParen)?;
    Ok(condition)
}
