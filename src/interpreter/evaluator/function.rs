/// Call evaluation for user and native functions.
pub mod core;

/// The `print` native and the output sinks it writes to.
///
/// Values are written using their `Display` rendering, separated by single
/// spaces and terminated by a newline.
pub mod print;

/// The `setTimeout` native.
///
/// Queues a function on the scheduler to run after a delay in milliseconds.
pub mod timeout;
