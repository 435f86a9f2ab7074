/// The task queue and the loop that drains it.
pub mod core;

/// Time sources for the scheduler.
///
/// [`clock::SystemClock`] follows the wall clock; [`clock::ManualClock`]
/// keeps virtual time that only moves when a task is waited for.
pub mod clock;
