//! `TimerQueue` — one-shot deferred work keyed by due time.
//!
//! Timers cannot be cancelled.  A task scheduled for a time the session never
//! reaches is simply never run.
//!
//! `BTreeMap` keeps due times ordered; tasks due at the same instant run in
//! the order they were scheduled.

use std::collections::{BTreeMap, VecDeque};

use hunt_core::Millis;

/// Deferred work the session runs when its due time is reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimerTask {
    /// Hide whatever message is on screen.
    HideMessage,
    /// Show the "all treasures found" message with the final score.
    AnnounceVictory,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    inner: BTreeMap<Millis, VecDeque<TimerTask>>,
    /// Cached total task count for O(1) `len()`.
    total: usize,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to run at `due`.
    pub fn push(&mut self, due: Millis, task: TimerTask) {
        self.inner.entry(due).or_default().push_back(task);
        self.total += 1;
    }

    /// Remove and return the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<(Millis, TimerTask)> {
        let mut entry = self.inner.first_entry()?;
        let due = *entry.key();
        if due > now {
            return None;
        }
        let task = entry.get_mut().pop_front()?;
        if entry.get().is_empty() {
            entry.remove();
        }
        self.total -= 1;
        Some((due, task))
    }

    /// The earliest due time, or `None` if nothing is scheduled.
    pub fn next_due(&self) -> Option<Millis> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
