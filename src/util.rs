/// Numeric helpers.
///
/// Renders numbers the way the language prints them and converts script
/// delays into [`std::time::Duration`] values without panicking on NaN,
/// negative or out-of-range input.
pub mod num;

/// Stack growth for deeply recursive code.
///
/// The parser and evaluator recurse once per nesting level. Wrapping those
/// recursions in [`stack::ensure_sufficient_stack`] keeps deeply nested but
/// legal programs from overflowing the native stack.
pub mod stack;

/// Tracing subscriber setup for the command-line binary.
pub mod logging;
