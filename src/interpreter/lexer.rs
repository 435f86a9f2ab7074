use logos::Logos;

use crate::error::{ParseError, Position};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    /// Numeric literal tokens with at most one decimal point, such as `42`,
    /// `3.14` or `2.`.
    #[regex(r"[0-9]+(\.[0-9]*)?", parse_number)]
    Number(f64),
    /// String literal tokens. The quotes are stripped; there are no escapes.
    #[regex(r#""[^"]*""#, parse_string)]
    Str(String),
    /// `var`
    #[token("var")]
    Var,
    /// `function`
    #[token("function")]
    Function,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// Identifier tokens; variable or function names such as `x` or `add`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `:`
    #[token(":")]
    Colon,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `=`
    #[token("=")]
    Equals,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// Spaces, tabs, feeds and line breaks.
    #[regex(r"[ \t\f\r\n]+", logos::skip)]
    Ignored,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "number {n}"),
            Self::Str(s) => write!(f, "string \"{s}\""),
            Self::Identifier(name) => write!(f, "identifier '{name}'"),
            Self::Var => write!(f, "'var'"),
            Self::Function => write!(f, "'function'"),
            Self::If => write!(f, "'if'"),
            Self::Else => write!(f, "'else'"),
            Self::While => write!(f, "'while'"),
            Self::Plus => write!(f, "'+'"),
            Self::Minus => write!(f, "'-'"),
            Self::Star => write!(f, "'*'"),
            Self::Slash => write!(f, "'/'"),
            Self::LParen => write!(f, "'('"),
            Self::RParen => write!(f, "')'"),
            Self::LBrace => write!(f, "'{{'"),
            Self::RBrace => write!(f, "'}}'"),
            Self::LBracket => write!(f, "'['"),
            Self::RBracket => write!(f, "']'"),
            Self::Comma => write!(f, "','"),
            Self::Semicolon => write!(f, "';'"),
            Self::Colon => write!(f, "':'"),
            Self::EqualEqual => write!(f, "'=='"),
            Self::Equals => write!(f, "'='"),
            Self::Less => write!(f, "'<'"),
            Self::Greater => write!(f, "'>'"),
            Self::Comment | Self::Ignored => write!(f, "whitespace"),
        }
    }
}

/// Splits `source` into tokens, each paired with the position it starts at.
///
/// Comments and whitespace are dropped. Lexing stops at the first character
/// that begins no token.
///
/// # Errors
/// - `UnterminatedString` if a `"` is never closed.
/// - `UnexpectedCharacter` for any other unrecognised input.
///
/// # Example
/// ```
/// use ripple::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("var x = 1;").unwrap();
/// assert_eq!(tokens[0].0, Token::Var);
/// assert_eq!(tokens[3].0, Token::Number(1.0));
/// assert_eq!(tokens[3].1.column, 9);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, Position)>, ParseError> {
    let lines = LineIndex::new(source);
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let position = lines.position(source, lexer.span().start);
        match token {
            Ok(tok) => tokens.push((tok, position)),
            Err(()) if lexer.slice().starts_with('"') => {
                return Err(ParseError::UnterminatedString { position });
            },
            Err(()) => {
                return Err(ParseError::UnexpectedCharacter { found: lexer.slice().to_string(),
                                                             position });
            },
        }
    }

    Ok(tokens)
}

/// Returns the position just past the last character of `source`.
///
/// Used to locate "unexpected end of input" errors.
#[must_use]
pub fn end_position(source: &str) -> Position {
    LineIndex::new(source).position(source, source.len())
}

/// Byte offsets at which each line of the source begins.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let starts = std::iter::once(0).chain(source.match_indices('\n').map(|(i, _)| i + 1))
                                       .collect();
        Self { starts }
    }

    fn position(&self, source: &str, offset: usize) -> Position {
        let line = self.starts.partition_point(|&start| start <= offset);
        let line_start = self.starts[line - 1];
        let column = source[line_start..offset].chars().count() + 1;
        Position::new(line, column)
    }
}

/// Parses a numeric literal from the current token slice.
///
/// # Returns
/// - `Some(f64)`: The parsed value.
/// - `None`: If the slice is not a valid float.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Strips the surrounding quotes from a string literal.
fn parse_string(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap()
                        .into_iter()
                        .map(|(token, _)| token)
                        .collect()
    }

    #[test]
    fn keywords_are_not_identifiers() {
        assert_eq!(kinds("var variable while whiled"),
                   vec![Token::Var,
                        Token::Identifier("variable".into()),
                        Token::While,
                        Token::Identifier("whiled".into())]);
    }

    #[test]
    fn equals_and_double_equals() {
        assert_eq!(kinds("a = b == c"),
                   vec![Token::Identifier("a".into()),
                        Token::Equals,
                        Token::Identifier("b".into()),
                        Token::EqualEqual,
                        Token::Identifier("c".into())]);
    }

    #[test]
    fn numbers_take_one_decimal_point() {
        assert_eq!(kinds("12 3.25 7."),
                   vec![Token::Number(12.0), Token::Number(3.25), Token::Number(7.0)]);
        assert!(tokenize("1.2.3").is_err());
    }

    #[test]
    fn strings_have_no_escapes() {
        assert_eq!(kinds(r#""a\n" "b""#),
                   vec![Token::Str(r"a\n".into()), Token::Str("b".into())]);
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(kinds("1 // one\n2"), vec![Token::Number(1.0), Token::Number(2.0)]);
    }

    #[test]
    fn positions_track_lines_and_columns() {
        let tokens = tokenize("var a = 1;\n  print(a);").unwrap();
        let (token, position) = &tokens[5];
        assert_eq!(token, &Token::Identifier("print".into()));
        assert_eq!(*position, Position::new(2, 3));
    }

    #[test]
    fn unterminated_string_is_reported() {
        let err = tokenize("var s = \"open;").unwrap_err();
        assert_eq!(err, ParseError::UnterminatedString { position: Position::new(1, 9) });
    }

    #[test]
    fn unknown_character_is_reported() {
        let err = tokenize("a # b").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedCharacter { ref found, position }
                              if found == "#" && position == Position::new(1, 3)));
    }
}
