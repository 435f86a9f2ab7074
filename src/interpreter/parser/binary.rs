use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, TokenStream},
            unary::parse_unary,
        },
    },
};

/// Parses a comparison expression.
///
/// Comparisons do not chain: at most one `>`, `<` or `==` joins two additive
/// operands, so `a < b < c` leaves the second `<` for the caller to reject.
///
/// The rule is: `comparison := additive (("<" | ">" | "==") additive)?`
pub fn parse_comparison(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let left = parse_additive(tokens)?;

    if let Some(token) = tokens.peek()
       && let Some(op) = token_to_binary_operator(token)
       && is_comparison_op(op)
    {
        let line = tokens.position().line;
        tokens.advance();
        let right = parse_additive(tokens)?;
        return Ok(Expr::BinaryOp { left: Box::new(left),
                                   op,
                                   right: Box::new(right),
                                   line });
    }

    Ok(left)
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_left_associative(tokens, parse_multiplicative, |op| {
        matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
    })
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators `*` and `/`.
///
/// The rule is: `multiplicative := unary (("*" | "/") unary)*`
pub fn parse_multiplicative(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_left_associative(tokens, parse_unary, |op| {
        matches!(op, BinaryOperator::Mul | BinaryOperator::Div)
    })
}

/// Folds `operand (op operand)*` into a left-leaning `BinaryOp` tree for
/// every operator accepted by `accepts`.
fn parse_left_associative(tokens: &mut TokenStream<'_>,
                          operand: fn(&mut TokenStream<'_>) -> ParseResult<Expr>,
                          accepts: fn(BinaryOperator) -> bool)
                          -> ParseResult<Expr> {
    let mut left = operand(tokens)?;
    while let Some(token) = tokens.peek()
          && let Some(op) = token_to_binary_operator(token)
          && accepts(op)
    {
        let line = tokens.position().line;
        tokens.advance();
        let right = operand(tokens)?;
        left = Expr::BinaryOp { left: Box::new(left),
                                op,
                                right: Box::new(right),
                                line };
    }
    Ok(left)
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `None` for all tokens that are not binary operators. Note that a
/// single `=` is assignment, not an operator.
///
/// # Example
/// ```
/// use ripple::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::EqualEqual), Some(BinaryOperator::Equal));
/// assert_eq!(token_to_binary_operator(&Token::Equals), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        _ => None,
    }
}

const fn is_comparison_op(op: BinaryOperator) -> bool {
    matches!(op, BinaryOperator::Less | BinaryOperator::Greater | BinaryOperator::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::{lexer::tokenize, parser::core::TokenStream};
    use crate::error::Position;

    fn parse(source: &str) -> Expr {
        let tokens = tokenize(source).unwrap();
        let mut stream = TokenStream::new(&tokens, Position::default());
        let expr = parse_comparison(&mut stream).unwrap();
        assert!(stream.is_at_end(), "trailing tokens in {source:?}");
        expr
    }

    fn op_of(expr: &Expr) -> BinaryOperator {
        match expr {
            Expr::BinaryOp { op, .. } => *op,
            other => panic!("expected a binary operation, found {other:?}"),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expr = parse("1 + 2 * 3");
        assert_eq!(op_of(&expr), BinaryOperator::Add);
        let Expr::BinaryOp { right, .. } = &expr else { unreachable!() };
        assert_eq!(op_of(&right), BinaryOperator::Mul);
    }

    #[test]
    fn subtraction_is_left_associative() {
        let expr = parse("8 - 4 - 2");
        let Expr::BinaryOp { left, right, .. } = &expr else { unreachable!() };
        assert_eq!(op_of(&left), BinaryOperator::Sub);
        assert!(matches!(**right, Expr::NumberLiteral { value, .. } if value == 2.0));
    }

    #[test]
    fn comparison_is_the_loosest_tier() {
        let expr = parse("a + 1 == b * 2");
        assert_eq!(op_of(&expr), BinaryOperator::Equal);
    }

    #[test]
    fn comparisons_do_not_chain() {
        let tokens = tokenize("1 < 2 < 3").unwrap();
        let mut stream = TokenStream::new(&tokens, Position::default());
        parse_comparison(&mut stream).unwrap();
        assert_eq!(stream.peek(), Some(&Token::Less));
    }
}
