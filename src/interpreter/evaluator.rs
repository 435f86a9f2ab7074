/// Core evaluation logic and context management.
///
/// Contains [`core::Context`], its builder, the single `eval` dispatch over
/// every AST node, and the entry points that run programs and drain the
/// task queue.
pub mod core;

/// Binary operator evaluation logic.
///
/// Handles arithmetic, string concatenation and comparisons.
pub mod binary;

/// Function evaluation.
///
/// Handles calls to user-defined and native functions, the call depth
/// limit, and the built-in `print` and `setTimeout` natives.
pub mod function;

/// Evaluation of the remaining node kinds.
///
/// Literals, blocks, declarations, assignment and control flow.
pub mod utils;
