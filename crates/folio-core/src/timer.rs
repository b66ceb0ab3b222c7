//! Cancellable deadline queue.
//!
//! State machines schedule deferred work here instead of blocking. The owner
//! drains due entries on each tick and can cancel everything that has not
//! fired yet. Entries with equal deadlines fire in scheduling order.

use std::collections::BTreeMap;

use crate::env::Timestamp;

/// Handle for a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Deadline-ordered queue of pending timers.
#[derive(Debug, Clone)]
pub struct TimerQueue<I, K> {
    entries: BTreeMap<(I, TimerId), K>,
    next_id: u64,
}

impl<I: Timestamp, K> Default for TimerQueue<I, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Timestamp, K> TimerQueue<I, K> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self { entries: BTreeMap::new(), next_id: 0 }
    }

    /// Schedule `payload` to fire at `deadline`.
    pub fn schedule(&mut self, deadline: I, payload: K) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.insert((deadline, id), payload);
        id
    }

    /// Cancel a single timer. Returns its payload if it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> Option<K> {
        let key = self.entries.keys().find(|(_, entry_id)| *entry_id == id).copied()?;
        self.entries.remove(&key)
    }

    /// Cancel every pending timer. Returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.entries.len();
        self.entries.clear();
        cancelled
    }

    /// Remove and return the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: I) -> Option<(I, K)> {
        let first = self.entries.first_key_value().map(|(key, _)| *key)?;
        if first.0 > now {
            return None;
        }
        self.entries.remove(&first).map(|payload| (first.0, payload))
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<I> {
        self.entries.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no timers are pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    #[test]
    fn fires_in_deadline_order() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(t0 + Duration::from_millis(30), "c");
        queue.schedule(t0 + Duration::from_millis(10), "a");
        queue.schedule(t0 + Duration::from_millis(20), "b");

        let now = t0 + Duration::from_millis(25);
        assert_eq!(queue.pop_due(now).map(|(_, p)| p), Some("a"));
        assert_eq!(queue.pop_due(now).map(|(_, p)| p), Some("b"));
        assert_eq!(queue.pop_due(now), None);
        assert_eq!(queue.next_deadline(), Some(t0 + Duration::from_millis(30)));
    }

    #[test]
    fn equal_deadlines_fire_in_scheduling_order() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(t0, 1);
        queue.schedule(t0, 2);

        assert_eq!(queue.pop_due(t0).map(|(_, p)| p), Some(1));
        assert_eq!(queue.pop_due(t0).map(|(_, p)| p), Some(2));
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new();
        let keep = queue.schedule(t0, "keep");
        let discard = queue.schedule(t0, "discard");

        assert_eq!(queue.cancel(discard), Some("discard"));
        assert_eq!(queue.cancel(discard), None);
        assert_eq!(queue.len(), 1);

        assert_eq!(queue.cancel_all(), 1);
        assert!(queue.pop_due(t0 + Duration::from_secs(1)).is_none());
        assert_eq!(queue.cancel(keep), None);
    }
}
