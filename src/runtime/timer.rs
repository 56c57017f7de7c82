//! Cancellable single-shot timers for a cooperative event loop.
//!
//! Nothing here sleeps or spawns. The owner asks for the next deadline,
//! waits however it likes, then drains whatever has come due. Repeating work
//! re-arms itself from inside its own task, so a late task can never overlap
//! or pile up behind a fixed-rate interval.

use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashSet},
    time::{Duration, Instant},
};

/// Identifies one armed timer for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

struct Entry<T> {
    deadline: Instant,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    // Reversed so the max-heap yields the earliest deadline, then the
    // earliest armed on ties.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

pub struct TimerQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    /// Sequence numbers armed and neither fired nor cancelled
    live: HashSet<u64>,
    next_seq: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: HashSet::new(),
            next_seq: 0,
        }
    }

    /// Arm `task` to come due `delay` after `now`.
    pub fn after(&mut self, now: Instant, delay: Duration, task: T) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            deadline: now + delay,
            seq,
            task,
        });
        self.live.insert(seq);
        TimerHandle(seq)
    }

    /// Returns false if the timer already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.live.remove(&handle.0)
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.live.contains(&handle.0)
    }

    /// Pop the earliest task whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<T> {
        while let Some(top) = self.heap.peek() {
            if top.deadline > now {
                return None;
            }
            let entry = self.heap.pop()?;
            if self.live.remove(&entry.seq) {
                return Some(entry.task);
            }
        }
        None
    }

    /// Earliest deadline of a live timer.
    pub fn next_deadline(&mut self) -> Option<Instant> {
        while let Some(top) = self.heap.peek() {
            if self.live.contains(&top.seq) {
                return Some(top.deadline);
            }
            self.heap.pop();
        }
        None
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fires_in_deadline_order() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        timers.after(t0, ms(30), "c");
        timers.after(t0, ms(10), "a");
        timers.after(t0, ms(20), "b");

        assert_eq!(timers.pop_due(t0 + ms(5)), None);
        assert_eq!(timers.next_deadline(), Some(t0 + ms(10)));

        let fired: Vec<_> = std::iter::from_fn(|| timers.pop_due(t0 + ms(30))).collect();
        assert_eq!(fired, vec!["a", "b", "c"]);
        assert!(timers.is_empty());
    }

    #[test]
    fn ties_fire_in_arming_order() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        for i in 0..5 {
            timers.after(t0, Duration::ZERO, i);
        }
        let fired: Vec<_> = std::iter::from_fn(|| timers.pop_due(t0)).collect();
        assert_eq!(fired, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let first = timers.after(t0, ms(10), 1);
        timers.after(t0, ms(20), 2);

        assert!(timers.is_pending(first));
        assert!(timers.cancel(first));
        assert!(!timers.cancel(first));
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.next_deadline(), Some(t0 + ms(20)));
        assert_eq!(timers.pop_due(t0 + ms(100)), Some(2));
        assert_eq!(timers.pop_due(t0 + ms(100)), None);
    }

    #[test]
    fn fired_handle_cannot_be_cancelled() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let handle = timers.after(t0, Duration::ZERO, ());
        assert_eq!(timers.pop_due(t0), Some(()));
        assert!(!timers.cancel(handle));
        assert_eq!(timers.next_deadline(), None);
    }
}
