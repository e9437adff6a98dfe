//! Deferred callback scheduling in simulation time.
//!
//! A [`Scheduler`] owns one-shot actions together with the simulation time that
//! must elapse before they fire. It is advanced once per tick by the elapsed
//! delta and hands back every action whose delay ran out, in arrival order.
//!
//! Actions are plain data: the scheduler never runs code itself. The owner
//! interprets each fired action (see `world::Deferred`) and is responsible for
//! checking that whatever the action refers to still exists.
//!
//! The [`PendingGauge`] mirrors the pending count into an atomic so another
//! thread (e.g. a map-reload worker) can wait for the scheduler to drain
//! without touching the simulation state.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Identifies an armed timer, usable for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerId(pub u64);

/// Thread-safe view of how many deferred actions are still outstanding.
///
/// Counts timers that have not fired yet plus actions that fired during the
/// current tick but have not been applied (see [`Scheduler::settle`]).
#[derive(Clone, Debug, Default)]
pub struct PendingGauge(Arc<AtomicUsize>);

impl PendingGauge {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }

    pub fn is_drained(&self) -> bool {
        self.get() == 0
    }

    fn publish(&self, count: usize) {
        self.0.store(count, Ordering::Release);
    }
}

#[derive(Debug)]
struct Timer<A> {
    id: TimerId,
    remaining: f32,
    action: A,
}

/// One-shot timer queue advanced by simulation time.
#[derive(Debug)]
pub struct Scheduler<A> {
    timers: Vec<Timer<A>>,
    next_id: u64,
    in_flight: usize,
    gauge: PendingGauge,
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 0,
            in_flight: 0,
            gauge: PendingGauge::default(),
        }
    }

    /// Arms `action` to fire once at least `delay` seconds of simulation time
    /// have elapsed. Negative or non-finite delays fire on the next advance.
    pub fn run_after(&mut self, action: A, delay: f32) -> TimerId {
        let remaining = if delay.is_finite() && delay > 0.0 {
            delay
        } else {
            0.0
        };

        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            remaining,
            action,
        });
        self.publish();
        id
    }

    /// Advances every pending timer by `delta` and returns the actions that
    /// became due, in the order they were armed.
    ///
    /// Returned actions stay counted by the [`PendingGauge`] until
    /// [`Scheduler::settle`] is called.
    pub fn advance(&mut self, delta: f32) -> Vec<A> {
        let mut due = Vec::new();
        let mut kept = Vec::with_capacity(self.timers.len());

        for mut timer in self.timers.drain(..) {
            timer.remaining -= delta;
            if timer.remaining <= 0.0 {
                due.push(timer.action);
            } else {
                kept.push(timer);
            }
        }

        self.timers = kept;
        self.in_flight += due.len();
        self.publish();
        due
    }

    /// Marks every action returned by previous `advance` calls as applied.
    pub fn settle(&mut self) {
        self.in_flight = 0;
        self.publish();
    }

    /// Disarms a timer that has not fired yet. Returns `false` if it already
    /// fired or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.id != id);
        let removed = self.timers.len() != before;
        if removed {
            self.publish();
        }
        removed
    }

    /// Number of timers that have not fired yet.
    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }

    /// Remaining delay of the timer with `id`, if it is still pending.
    pub fn remaining(&self, id: TimerId) -> Option<f32> {
        self.timers
            .iter()
            .find(|timer| timer.id == id)
            .map(|timer| timer.remaining)
    }

    /// Iterates over pending actions in arrival order.
    pub fn pending(&self) -> impl Iterator<Item = &A> {
        self.timers.iter().map(|timer| &timer.action)
    }

    pub fn gauge(&self) -> PendingGauge {
        self.gauge.clone()
    }

    fn publish(&self) {
        self.gauge.publish(self.timers.len() + self.in_flight);
    }
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_delay() {
        let mut scheduler = Scheduler::new();
        scheduler.run_after("clear", 0.5);

        assert!(scheduler.advance(0.25).is_empty());
        assert_eq!(scheduler.advance(0.25), vec!["clear"]);
        assert!(scheduler.advance(1.0).is_empty());
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn due_actions_keep_arrival_order() {
        let mut scheduler = Scheduler::new();
        scheduler.run_after(1, 0.5);
        scheduler.run_after(2, 0.25);
        scheduler.run_after(3, 0.5);

        assert_eq!(scheduler.advance(0.5), vec![1, 2, 3]);
    }

    #[test]
    fn non_positive_delay_fires_on_next_advance() {
        let mut scheduler = Scheduler::new();
        scheduler.run_after('a', -1.0);
        scheduler.run_after('b', f32::NAN);

        assert_eq!(scheduler.advance(0.0), vec!['a', 'b']);
    }

    #[test]
    fn cancel_disarms_pending_timer() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.run_after("dodge", 0.25);

        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(scheduler.advance(1.0).is_empty());
    }

    #[test]
    fn gauge_counts_fired_actions_until_settled() {
        let mut scheduler = Scheduler::new();
        let gauge = scheduler.gauge();
        scheduler.run_after((), 0.25);
        scheduler.run_after((), 0.75);
        assert_eq!(gauge.get(), 2);

        let fired = scheduler.advance(0.5);
        assert_eq!(fired.len(), 1);
        assert_eq!(scheduler.pending_count(), 1);
        assert_eq!(gauge.get(), 2);

        scheduler.settle();
        assert_eq!(gauge.get(), 1);

        scheduler.advance(0.5);
        scheduler.settle();
        assert!(gauge.is_drained());
    }

    #[test]
    fn remaining_reports_pending_delay() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.run_after((), 1.0);
        scheduler.advance(0.25);

        assert_eq!(scheduler.remaining(id), Some(0.75));
        scheduler.advance(0.75);
        assert_eq!(scheduler.remaining(id), None);
    }
}
