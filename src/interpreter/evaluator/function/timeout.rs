use crate::{
    interpreter::{
        scheduler::core::Scheduler,
        value::{core::Value, function::NativeFunction},
    },
    util::num::millis_to_duration,
};

/// Creates the `setTimeout` native bound to `scheduler`.
///
/// `setTimeout(fn, delayMs)` queues `fn` to be called with no arguments once
/// `delayMs` milliseconds have passed on the scheduler's clock. The delay is
/// clamped to zero when it is negative, NaN, missing or not a number. If
/// `fn` is not a user-defined function nothing is queued. Either way the
/// call returns `Null` without waiting.
///
/// # Example
/// ```
/// use std::rc::Rc;
///
/// use ripple::{
///     ManualClock,
///     interpreter::{
///         evaluator::function::timeout::set_timeout, scheduler::core::Scheduler,
///         value::core::Value,
///     },
/// };
///
/// let scheduler = Scheduler::new(Rc::new(ManualClock::new()));
/// let native = set_timeout(scheduler.clone());
///
/// // Not a function, so nothing is queued.
/// assert_eq!(native.call(&[Value::Number(1.0)]).unwrap(), Value::Null);
/// assert_eq!(scheduler.pending(), 0);
/// ```
#[must_use]
pub fn set_timeout(scheduler: Scheduler) -> NativeFunction {
    NativeFunction::new("setTimeout", move |args| {
        let Some(Value::Function(callback)) = args.first() else {
            tracing::debug!("setTimeout called without a function; ignored");
            return Ok(Value::Null);
        };

        let delay = match args.get(1) {
            Some(Value::Number(millis)) => millis_to_duration(*millis),
            _ => millis_to_duration(0.0),
        };

        scheduler.schedule(callback.clone(), delay);
        Ok(Value::Null)
    })
}
