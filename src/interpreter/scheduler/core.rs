use std::{
    cell::RefCell,
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
    fmt,
    rc::Rc,
    time::Duration,
};

use crate::interpreter::{scheduler::clock::Clock, value::function::Function};

/// A deferred call created by `setTimeout`.
///
/// Tasks are ordered by due time, then by the order they were scheduled in,
/// so callbacks due at the same moment fire first-in first-out.
pub struct Task {
    /// Earliest time the task may fire.
    pub due:      Duration,
    /// Scheduling order, unique per scheduler.
    pub seq:      u64,
    /// The function to call with no arguments.
    pub callback: Rc<Function>,
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
         .field("due", &self.due)
         .field("seq", &self.seq)
         .field("callback", &self.callback.name())
         .finish()
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Task {}

impl PartialOrd for Task {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Task {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

#[derive(Default)]
struct Queue {
    heap:     BinaryHeap<Reverse<Task>>,
    next_seq: u64,
}

/// A time-ordered queue of pending tasks.
///
/// The scheduler is a cheap handle: clones share the same queue and clock.
/// `setTimeout` holds one clone and the evaluation context another.
#[derive(Clone)]
pub struct Scheduler {
    queue: Rc<RefCell<Queue>>,
    clock: Rc<dyn Clock>,
}

impl Scheduler {
    /// Creates an empty scheduler reading time from `clock`.
    #[must_use]
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self { queue: Rc::new(RefCell::new(Queue::default())),
               clock }
    }

    /// Current time according to the scheduler's clock.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Queues `callback` to run once `delay` has elapsed.
    ///
    /// # Returns
    /// The sequence number assigned to the task.
    pub fn schedule(&self, callback: Rc<Function>, delay: Duration) -> u64 {
        let due = self.now().saturating_add(delay);
        let mut queue = self.queue.borrow_mut();
        let seq = queue.next_seq;
        queue.next_seq += 1;

        tracing::debug!(callback = callback.name(), seq, ?due, "task scheduled");
        queue.heap.push(Reverse(Task { due, seq, callback }));
        seq
    }

    /// Number of tasks waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().heap.len()
    }

    /// Removes the earliest task, waiting on the clock until it is due.
    ///
    /// Returns `None` once the queue is empty.
    pub fn next_due(&self) -> Option<Task> {
        let Reverse(task) = self.queue.borrow_mut().heap.pop()?;
        let now = self.now();
        if task.due > now {
            tracing::trace!(wait = ?(task.due - now), "waiting for next task");
            self.clock.sleep_until(task.due);
        }
        Some(task)
    }

    /// Fires tasks in order until the queue is empty.
    ///
    /// `fire` may schedule further tasks; they are picked up by the same run.
    /// The first error stops the loop and is returned. Tasks still queued at
    /// that point remain queued.
    ///
    /// # Returns
    /// The number of tasks fired.
    pub fn run_until_idle<E>(&self, mut fire: impl FnMut(Task) -> Result<(), E>) -> Result<usize, E> {
        let mut fired = 0;
        while let Some(task) = self.next_due() {
            tracing::debug!(callback = task.callback.name(), seq = task.seq, due = ?task.due,
                            "task fired");
            fired += 1;
            fire(task)?;
        }
        Ok(fired)
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
         .field("pending", &self.pending())
         .field("now", &self.now())
         .finish_non_exhaustive()
    }
}
