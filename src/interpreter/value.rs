/// The dynamic value type.
///
/// Defines [`core::Value`] together with its text rendering, truthiness and
/// equality rules.
pub mod core;

/// Callable values.
///
/// User functions carry their definition and the environment they close
/// over. Native functions wrap a host closure.
pub mod function;
