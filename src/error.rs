/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Every parse error carries the line and column where it was detected.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, including
/// the name, invocation and type errors of the language.
pub mod runtime_error;

pub use parse_error::{ParseError, Position};
pub use runtime_error::RuntimeError;

/// Any failure reported by [`crate::Context::run`].
///
/// A run either fails before evaluation starts (a [`ParseError`]) or part way
/// through it (a [`RuntimeError`]). In the latter case side effects committed
/// before the failure stay visible.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source text could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluation or a deferred task failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
