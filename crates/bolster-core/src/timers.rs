//! Cooperative timer queue for deferred invocation
//!
//! Single-threaded stand-in for a host timer facility: callbacks are
//! queued with a deadline in a min-heap and fired when the caller drives
//! the clock forward with [`Timers::advance`] or [`Timers::tick`]. There
//! is no timer thread; "elapsed time" is whatever the facility clock says,
//! which also makes time-dependent wrappers deterministic to test.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::error::Result;

/// Handle for a scheduled callback, usable to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

type TimerCallback = Box<dyn FnOnce() -> Result<()>>;

/// Entry in the timer heap
struct TimerEntry {
    /// When to fire this callback
    deadline: Instant,
    /// Schedule order, breaks deadline ties first-come-first-fired
    order: u64,
    id: TimerId,
    callback: TimerCallback,
}

// Reverse ordering for min-heap (earliest deadline first)
impl Ord for TimerEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for TimerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TimerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.order == other.order
    }
}

impl Eq for TimerEntry {}

struct TimerState {
    now: Instant,
    next_id: u64,
    queue: BinaryHeap<TimerEntry>,
    cancelled: HashSet<TimerId>,
}

/// Shared handle to a cooperative timer queue
#[derive(Clone)]
pub struct Timers {
    inner: Rc<RefCell<TimerState>>,
}

impl Timers {
    /// Create a timer queue whose clock starts at the current instant
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(TimerState {
                now: Instant::now(),
                next_id: 0,
                queue: BinaryHeap::new(),
                cancelled: HashSet::new(),
            })),
        }
    }

    /// The facility clock's current reading
    pub fn now(&self) -> Instant {
        self.inner.borrow().now
    }

    /// Schedule a callback to fire once `delay` has elapsed on the
    /// facility clock
    pub fn schedule(&self, delay: Duration, callback: impl FnOnce() -> Result<()> + 'static) -> TimerId {
        let mut state = self.inner.borrow_mut();
        let id = TimerId(state.next_id);
        state.next_id += 1;
        let deadline = state.now + delay;
        let order = id.0;
        state.queue.push(TimerEntry {
            deadline,
            order,
            id,
            callback: Box::new(callback),
        });
        id
    }

    /// Cancel a pending callback. Returns whether anything was pending
    /// under this id.
    pub fn cancel(&self, id: TimerId) -> bool {
        let mut state = self.inner.borrow_mut();
        let pending = state.queue.iter().any(|e| e.id == id) && !state.cancelled.contains(&id);
        if pending {
            state.cancelled.insert(id);
        }
        pending
    }

    /// The number of callbacks still pending
    pub fn pending(&self) -> usize {
        let state = self.inner.borrow();
        state
            .queue
            .iter()
            .filter(|e| !state.cancelled.contains(&e.id))
            .count()
    }

    /// Move the clock forward by `by`, firing every callback whose
    /// deadline is reached, in deadline order.
    ///
    /// A callback error stops the run: the clock rests at the failing
    /// callback's deadline and later callbacks stay queued.
    pub fn advance(&self, by: Duration) -> Result<()> {
        let target = self.inner.borrow().now + by;
        self.advance_to(target)
    }

    /// Advance the clock to the real current instant
    pub fn tick(&self) -> Result<()> {
        let real = Instant::now();
        if real > self.now() {
            self.advance_to(real)?;
        }
        Ok(())
    }

    fn advance_to(&self, target: Instant) -> Result<()> {
        // Fire one entry per borrow so callbacks can schedule and cancel.
        while let Some(entry) = self.pop_due(target) {
            (entry.callback)()?;
        }
        let mut state = self.inner.borrow_mut();
        if target > state.now {
            state.now = target;
        }
        Ok(())
    }

    fn pop_due(&self, target: Instant) -> Option<TimerEntry> {
        let mut state = self.inner.borrow_mut();
        loop {
            match state.queue.peek() {
                Some(next) if next.deadline <= target => {}
                _ => return None,
            }
            let entry = state.queue.pop()?;
            if state.cancelled.remove(&entry.id) {
                continue;
            }
            if entry.deadline > state.now {
                state.now = entry.deadline;
            }
            return Some(entry);
        }
    }
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}
