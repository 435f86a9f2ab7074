/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the tree produced by the parser, resolves names
/// through the environment chain, performs arithmetic and comparisons,
/// invokes user and native functions, and drains the task queue once the
/// synchronous part of a program has finished.
///
/// # Responsibilities
/// - Evaluates every AST node to exactly one value.
/// - Creates the frames used by calls, branches and loop iterations.
/// - Reports name, invocation and type errors with their source line.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// corresponding to a number, string, identifier, keyword, operator or
/// delimiter, and each tagged with the line and column it starts at.
///
/// # Responsibilities
/// - Converts the input character stream into positioned tokens.
/// - Skips whitespace and `//` comments.
/// - Reports unexpected characters and unterminated strings.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// A recursive-descent parser over the token stream. Statements and
/// expressions share one node type; operator precedence is handled by one
/// function per tier.
///
/// # Responsibilities
/// - Converts tokens into [`crate::ast::Expr`] nodes.
/// - Validates the grammar, reporting the first error with its position.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements rendering, truthiness and `==` semantics.
/// - Defines user and native function values.
pub mod value;
/// Lexical scopes.
///
/// A chain of reference-counted frames. Function values and queued tasks
/// keep the frames they close over alive.
pub mod environment;
/// Deferred execution.
///
/// A priority queue of tasks ordered by due time, drained after the
/// synchronous program has run. Time is read from a pluggable clock.
pub mod scheduler;
