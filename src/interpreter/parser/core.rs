use crate::{
    ast::Expr,
    error::{ParseError, Position},
    interpreter::{
        lexer::{Token, end_position, tokenize},
        parser::{binary::parse_comparison, statement::parse_statement},
    },
    util::stack::ensure_sufficient_stack,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// A cursor over the positioned tokens of one source text.
///
/// Besides plain lookahead it knows where the input ends, so that running out
/// of tokens can be reported at a real position.
pub struct TokenStream<'a> {
    tokens: &'a [(Token, Position)],
    pos:    usize,
    end:    Position,
}

impl<'a> TokenStream<'a> {
    /// Creates a cursor positioned at the first token.
    #[must_use]
    pub const fn new(tokens: &'a [(Token, Position)], end: Position) -> Self {
        Self { tokens,
               pos: 0,
               end }
    }

    /// Returns the next token without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&'a Token> {
        self.peek_nth(0)
    }

    /// Returns the token `n` places ahead of the cursor (0 is the next one).
    #[must_use]
    pub fn peek_nth(&self, n: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + n).map(|(token, _)| token)
    }

    /// Consumes and returns the next token with its position.
    pub fn advance(&mut self) -> Option<&'a (Token, Position)> {
        let item = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(item)
    }

    /// Position of the next token, or of the end of input.
    #[must_use]
    pub fn position(&self) -> Position {
        self.tokens
            .get(self.pos)
            .map_or(self.end, |(_, position)| *position)
    }

    /// Returns `true` when every token has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Consumes the next token if it equals `token`.
    pub fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes `token` or fails with an error naming it.
    ///
    /// # Returns
    /// The position of the consumed token.
    pub fn expect(&mut self, token: &Token) -> ParseResult<Position> {
        let position = self.position();
        if self.eat(token) {
            Ok(position)
        } else {
            Err(self.unexpected(token.to_string()))
        }
    }

    /// Builds the error for finding something other than `expected` at the
    /// cursor. Does not consume anything.
    #[must_use]
    pub fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        let expected = expected.into();
        match self.tokens.get(self.pos) {
            Some((token, position)) => ParseError::UnexpectedToken { expected,
                                                                     found: token.to_string(),
                                                                     position: *position },
            None => ParseError::UnexpectedEndOfInput { expected,
                                                       position: self.end },
        }
    }
}

/// Lexes and parses a complete program.
///
/// The result is the ordered list of top-level statements. Parsing stops at
/// the first error, which carries the line and column it was detected at.
///
/// # Errors
/// Any lexing or parsing failure.
///
/// # Example
/// ```
/// use ripple::{ast::Expr, interpreter::parser::core::parse_program};
///
/// let program = parse_program("var x = 1; print(x);").unwrap();
/// assert_eq!(program.len(), 2);
/// assert!(matches!(program[0], Expr::VarDecl { .. }));
///
/// let err = parse_program("var = 1;").unwrap_err();
/// assert_eq!(err.position().column, 5);
/// ```
pub fn parse_program(source: &str) -> ParseResult<Vec<Expr>> {
    let tokens = tokenize(source)?;
    let mut stream = TokenStream::new(&tokens, end_position(source));
    let mut statements = Vec::new();

    while !stream.is_at_end() {
        statements.push(parse_statement(&mut stream)?);
    }

    Ok(statements)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, comparison, and recursively descends through the
/// precedence hierarchy.
///
/// Every nested expression (grouping, array elements, call arguments) comes
/// back through here, so this is where the stack is grown when needed.
///
/// Grammar: `expression := comparison`
pub fn parse_expression(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    ensure_sufficient_stack(|| parse_comparison(tokens))
}
