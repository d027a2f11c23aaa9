//! Delayed tasks driven by an explicit clock.
//!
//! The "thinking" pause before a reply, the late reveal of suggestions and the
//! mini-game round advance are all entries in a [`Timers`] queue. The frame
//! loop drains whatever is due each tick, so tests can swap in a
//! [`ManualClock`] and step time forward deterministically.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of "now" for the frame loop
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to; clones share the same time
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Handle returned by [`Timers::schedule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug)]
struct Pending<T> {
    id: TaskId,
    due: Instant,
    payload: T,
}

/// Queue of payloads waiting for their deadline
#[derive(Debug)]
pub struct Timers<T> {
    pending: Vec<Pending<T>>,
    next_id: u64,
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timers<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 0,
        }
    }

    /// Fire `payload` once `delay` has passed since `now`
    pub fn schedule(&mut self, now: Instant, delay: Duration, payload: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let due = now + delay;

        // Keep sorted by deadline; equal deadlines stay in scheduling order
        let pos = self
            .pending
            .iter()
            .position(|p| p.due > due)
            .unwrap_or(self.pending.len());
        self.pending.insert(pos, Pending { id, due, payload });

        tracing::debug!(task = id.0, delay_ms = delay.as_millis() as u64, "Scheduled task");
        id
    }

    /// Drop a task before it fires; false if it already fired or never existed
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.pending.iter().position(|p| p.id == id) {
            Some(pos) => {
                self.pending.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Remove and return every payload whose deadline is at or before `now`
    pub fn drain_due(&mut self, now: Instant) -> Vec<T> {
        let split = self
            .pending
            .iter()
            .position(|p| p.due > now)
            .unwrap_or(self.pending.len());
        self.pending.drain(..split).map(|p| p.payload).collect()
    }

    /// Earliest pending deadline, if any
    #[cfg(test)]
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.first().map(|p| p.due)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
