/// Token cursor, shared result type and the program entry point.
///
/// Contains [`core::parse_program`], which lexes and parses a whole source
/// text, and the expression entry point used by every other parser module.
pub mod core;

/// Prefix negation and primary expressions.
///
/// Handles literals, identifiers, calls, grouping and function expressions.
pub mod unary;

/// Binary operator parsing.
///
/// Implements the comparison, additive and multiplicative precedence tiers.
pub mod binary;

/// Block parsing.
///
/// Parses brace-delimited statement sequences used by `if`, `while` and
/// function bodies.
pub mod block;

/// Shared parsing helpers.
///
/// Comma-separated lists, identifiers and parameter lists.
pub mod utils;

/// Statement parsing.
///
/// Recognises the keyword-prefixed statement forms, assignments and
/// expression statements.
pub mod statement;
