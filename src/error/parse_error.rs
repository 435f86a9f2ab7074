use std::fmt;

/// A 1-based location in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// The source line.
    pub line:   usize,
    /// The column, counted in characters.
    pub column: usize,
}

impl Position {
    /// Creates a position from a line and column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// The lexer met a character that starts no token.
    #[error("Error on {position}: Unexpected character '{found}'.")]
    UnexpectedCharacter {
        /// The offending text.
        found:    String,
        /// Where it was found.
        position: Position,
    },
    /// A string literal was opened but never closed.
    #[error("Error on {position}: Unterminated string literal.")]
    UnterminatedString {
        /// Position of the opening quote.
        position: Position,
    },
    /// Found a token other than the one the grammar requires here.
    #[error("Error on {position}: Expected {expected}, found {found}.")]
    UnexpectedToken {
        /// Description of what the parser was looking for.
        expected: String,
        /// The token actually encountered.
        found:    String,
        /// Where the token starts.
        position: Position,
    },
    /// Reached the end of input while a construct was still open.
    #[error("Error on {position}: Expected {expected}, found end of input.")]
    UnexpectedEndOfInput {
        /// Description of what the parser was looking for.
        expected: String,
        /// The end-of-input position.
        position: Position,
    },
}

impl ParseError {
    /// Returns where the error was detected.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnexpectedCharacter { position, .. }
            | Self::UnterminatedString { position }
            | Self::UnexpectedToken { position, .. }
            | Self::UnexpectedEndOfInput { position, .. } => *position,
        }
    }
}
