//! Periodic timers provided by the host.
//!
//! Controllers hold a [`TimerHandle`] and cancel through it; the host drives
//! an [`IntervalScheduler`] and dispatches whatever it reports as due.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Cancellation side of a registered timer. Dropping it cancels the timer.
#[derive(Debug)]
pub struct TimerHandle {
    id: TimerId,
    active: Arc<AtomicBool>,
}

impl TimerHandle {
    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Stops the timer. Safe to call more than once.
    pub fn cancel(&self) {
        if self.active.swap(false, Ordering::SeqCst) {
            log::debug!("Cancelled countdown timer {:?}", self.id);
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

pub trait Scheduler {
    /// Registers a timer that fires every `period` until cancelled.
    fn every(&mut self, period: Duration) -> TimerHandle;
}

#[derive(Debug)]
struct IntervalEntry {
    id: TimerId,
    period: Duration,
    next_due: Instant,
    active: Arc<AtomicBool>,
}

/// Deterministic scheduler the host polls with its own notion of "now".
#[derive(Debug)]
pub struct IntervalScheduler {
    entries: Vec<IntervalEntry>,
    next_id: u64,
    origin: Instant,
}

impl Default for IntervalScheduler {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl IntervalScheduler {
    pub fn new(origin: Instant) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            origin,
        }
    }

    /// Moves the reference point used for newly registered timers.
    pub fn set_origin(&mut self, origin: Instant) {
        self.origin = origin;
    }

    /// Ids of timers whose deadline is at or before `now`, in id order.
    ///
    /// A timer is reported at most once per call even if several periods
    /// elapsed; missed periods are skipped rather than replayed.
    pub fn due(&mut self, now: Instant) -> Vec<TimerId> {
        self.prune();
        let mut fired = Vec::new();
        for entry in &mut self.entries {
            if entry.next_due <= now {
                fired.push(entry.id);
                entry.next_due += periods_until_after(entry.period, now - entry.next_due);
            }
        }
        fired.sort();
        fired
    }

    pub fn next_deadline(&mut self) -> Option<Instant> {
        self.prune();
        self.entries.iter().map(|entry| entry.next_due).min()
    }

    pub fn active_count(&mut self) -> usize {
        self.prune();
        self.entries.len()
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.id == id && entry.active.load(Ordering::SeqCst))
    }

    fn prune(&mut self) {
        self.entries
            .retain(|entry| entry.active.load(Ordering::SeqCst));
    }
}

/// Smallest whole number of periods that moves a deadline `late` in the past
/// strictly beyond now.
fn periods_until_after(period: Duration, late: Duration) -> Duration {
    let steps = late.as_nanos() / period.as_nanos() + 1;
    let steps = u32::try_from(steps).unwrap_or(u32::MAX);
    period.saturating_mul(steps)
}

impl Scheduler for IntervalScheduler {
    fn every(&mut self, period: Duration) -> TimerHandle {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let active = Arc::new(AtomicBool::new(true));
        // `due` divides by the period
        let period = period.max(Duration::from_millis(1));
        self.entries.push(IntervalEntry {
            id,
            period,
            next_due: self.origin + period,
            active: Arc::clone(&active),
        });
        log::debug!("Registered countdown timer {:?} every {:?}", id, period);
        TimerHandle { id, active }
    }
}
