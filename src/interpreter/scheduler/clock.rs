use std::{
    cell::Cell,
    time::{Duration, Instant},
};

/// A monotonic time source the scheduler can also wait on.
///
/// Times are offsets from the clock's own origin, not wall-clock instants.
pub trait Clock {
    /// Current time since the clock's origin.
    fn now(&self) -> Duration;

    /// Blocks until [`Clock::now`] is at least `deadline`. Returns at once if
    /// the deadline has already passed.
    fn sleep_until(&self, deadline: Duration);
}

/// Real time, measured from when the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep_until(&self, deadline: Duration) {
        let now = self.now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
    }
}

/// Virtual time for tests and simulations.
///
/// Time only moves through [`ManualClock::advance`] or when the scheduler
/// waits for a task, in which case it jumps straight to the task's due time.
///
/// # Example
/// ```
/// use std::time::Duration;
///
/// use ripple::interpreter::scheduler::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// clock.sleep_until(Duration::from_millis(30));
/// clock.advance(Duration::from_millis(5));
///
/// assert_eq!(clock.now(), Duration::from_millis(35));
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    /// Creates a clock reading zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep_until(&self, deadline: Duration) {
        if deadline > self.now.get() {
            self.now.set(deadline);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_never_goes_backwards() {
        let clock = ManualClock::new();
        clock.sleep_until(Duration::from_millis(10));
        clock.sleep_until(Duration::from_millis(4));
        assert_eq!(clock.now(), Duration::from_millis(10));
    }

    #[test]
    fn system_clock_sleeps_until_deadline() {
        let clock = SystemClock::new();
        let deadline = clock.now() + Duration::from_millis(5);
        clock.sleep_until(deadline);
        assert!(clock.now() >= deadline);
    }
}
