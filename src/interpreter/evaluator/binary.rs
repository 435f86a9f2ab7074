/// Operator dispatch.
pub mod core;

/// `+`, `-`, `*` and `/`.
pub mod arithmetic;

/// `<`, `>` and `==`.
pub mod comparison;
