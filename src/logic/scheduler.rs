// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Fire-once deferred tasks polled from the UI thread.
//!
//! Simulated latencies never block: a task is parked with its deadline and
//! handed back by [`Scheduler::take_due`] once the clock passes it. Each task
//! carries a [`CancellationToken`]; cancelled tasks are dropped silently.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Shared flag that suppresses every task scheduled with it.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Tokens compare by identity: clones of one token are equal, fresh tokens are not.
impl PartialEq for CancellationToken {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for CancellationToken {}

struct Pending<T> {
    due: Instant,
    seq: u64,
    token: CancellationToken,
    task: T,
}

/// Queue of deferred tasks ordered by deadline, then by insertion.
pub struct Scheduler<T> {
    pending: Vec<Pending<T>>,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<T> Scheduler<T> {
    /// Park `task` until `now + delay`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, token: CancellationToken, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            due: now + delay,
            seq,
            token,
            task,
        });
    }

    /// Remove and return every task whose deadline has passed, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<T> {
        let (mut due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|p| p.due <= now || p.token.is_cancelled());
        self.pending = rest;

        due.sort_by_key(|p| (p.due, p.seq));
        due.into_iter()
            .filter(|p| !p.token.is_cancelled())
            .map(|p| p.task)
            .collect()
    }

    /// Earliest deadline among live tasks, used to schedule the next repaint.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending
            .iter()
            .filter(|p| !p.token.is_cancelled())
            .map(|p| p.due)
            .min()
    }

    /// Number of live tasks.
    pub fn len(&self) -> usize {
        self.pending
            .iter()
            .filter(|p| !p.token.is_cancelled())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn tasks_fire_only_after_deadline() {
        let start = Instant::now();
        let mut scheduler = Scheduler::default();
        scheduler.schedule(start, ms(100), CancellationToken::new(), "a");

        assert!(scheduler.take_due(start + ms(99)).is_empty());
        assert_eq!(scheduler.take_due(start + ms(100)), vec!["a"]);
        assert!(scheduler.take_due(start + ms(500)).is_empty(), "fires once");
        assert!(scheduler.is_empty());
    }

    #[test]
    fn due_tasks_come_back_in_deadline_order() {
        let start = Instant::now();
        let mut scheduler = Scheduler::default();
        scheduler.schedule(start, ms(300), CancellationToken::new(), 3);
        scheduler.schedule(start, ms(100), CancellationToken::new(), 1);
        scheduler.schedule(start, ms(100), CancellationToken::new(), 2);

        assert_eq!(scheduler.next_deadline(), Some(start + ms(100)));
        assert_eq!(scheduler.take_due(start + ms(1000)), vec![1, 2, 3]);
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let start = Instant::now();
        let token = CancellationToken::new();
        let mut scheduler = Scheduler::default();
        scheduler.schedule(start, ms(10), token.clone(), "cancelled");
        scheduler.schedule(start, ms(20), CancellationToken::new(), "kept");

        token.cancel();

        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.next_deadline(), Some(start + ms(20)));
        assert_eq!(scheduler.take_due(start + ms(50)), vec!["kept"]);
    }

    #[test]
    fn tokens_compare_by_identity() {
        let token = CancellationToken::new();

        assert_eq!(token, token.clone());
        assert_ne!(token, CancellationToken::new());
    }
}
