//! # ripple
//!
//! ripple is a tree-walking interpreter for a small dynamically typed
//! scripting language. Scripts have closures, lists and maps, and can defer
//! work with `setTimeout`; deferred tasks run from a time-ordered queue once
//! the synchronous part of the script has finished.
//!
//! ```
//! use ripple::{Context, OutputBuffer};
//!
//! let output = OutputBuffer::new();
//! let context = Context::builder().output(output.clone()).build();
//!
//! context.run(
//!     r#"
//!     var x = 10;
//!     function add(a) { x + a; }
//!     setTimeout(function () { print("late"); }, 0);
//!     print("x = " + add(5));
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(output.contents(), "x = 15\nlate\n");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` enum and related types that represent the
/// syntactic structure of source code as a tree. The AST is built by the parser
/// and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines one node type covering statements and expressions.
/// - Attaches source lines to every node for error reporting.
/// - Shares function definitions between the tree and function values.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// or evaluating code. Parse errors carry a line and column; runtime errors
/// carry the line of the node that failed.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches positions and detailed messages for context.
/// - Joins both phases into one [`error::Error`] for callers of
///   [`Context::run`].
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, values, scopes and
/// the task scheduler to provide a complete runtime for scripts.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
/// - Runs deferred tasks after the synchronous program.
pub mod interpreter;
/// General utilities shared across the interpreter.
///
/// # Responsibilities
/// - Render numbers and convert script delays to durations.
/// - Grow the native stack for deeply nested code.
/// - Set up logging for the binary.
pub mod util;

pub use crate::{
    error::Error,
    interpreter::{
        environment::Environment,
        evaluator::{
            core::{Context, ContextBuilder, DEFAULT_MAX_CALL_DEPTH},
            function::print::OutputBuffer,
        },
        parser::core::parse_program,
        scheduler::clock::{Clock, ManualClock, SystemClock},
        value::core::Value,
    },
};

/// Runs a complete script with default settings.
///
/// The script is parsed, executed and its queued tasks are drained, with
/// `print` writing to stdout. When `print_result` is set, the value of the
/// last top-level statement is printed afterwards unless it is `null`.
///
/// # Errors
/// Returns an error if parsing fails or if a runtime error occurs, either
/// in the script itself or in a deferred task.
///
/// # Examples
/// ```
/// use ripple::run_script;
///
/// // A program that defines and uses a variable.
/// let source = "var result = 2 + 2; print(result);";
/// assert!(run_script(source, false).is_ok());
///
/// // Reading a variable that was never declared fails.
/// let source = "var y = x + 1;";
/// assert!(run_script(source, false).is_err());
/// ```
pub fn run_script(source: &str, print_result: bool) -> Result<(), Error> {
    run_script_with(&Context::new(), source, print_result)
}

/// Like [`run_script`], but on a caller-provided context.
///
/// The result is written to the context's output sink, the same one the
/// script's `print` calls use.
pub fn run_script_with(context: &Context, source: &str, print_result: bool) -> Result<(), Error> {
    let value = context.run(source)?;

    if print_result && !matches!(value, Value::Null) {
        context.write_line(&value)?;
    }

    Ok(())
}
