//! Loop counters and their point-in-time report.
//!
//! The loop thread bumps shared atomic counters with relaxed ordering; the host
//! reads them as a [`LoopMetrics`] value at any time.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters collected by a running simulation loop.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoopMetrics {
    /// Loop iterations executed.
    pub iterations: u64,
    /// Steps applied, by timer or `StepOnce`.
    pub steps: u64,
    /// Successful redraw requests.
    pub redraws: u64,
    /// Redraw requests that returned an error.
    pub redraw_failures: u64,
    /// Redraw requests that panicked.
    pub redraw_panics: u64,
    /// Input events taken off the channel.
    pub inputs_processed: u64,
    /// Input events rejected because the channel was full.
    pub inputs_rejected: u64,
    /// Staged edits applied to the grid.
    pub edits_applied: u64,
    /// Snapshots pushed to the ring.
    pub snapshots_published: u64,
    /// Wall-clock time of the most recent step, in microseconds.
    pub last_step_us: u64,
    /// Alive cells after the most recent step.
    pub last_live: u64,
}

impl LoopMetrics {
    /// Redraw requests that did not succeed, for any reason.
    pub fn failed_redraws(&self) -> u64 {
        self.redraw_failures + self.redraw_panics
    }
}

#[derive(Debug, Default)]
pub(crate) struct LoopCounters {
    pub iterations: AtomicU64,
    pub steps: AtomicU64,
    pub redraws: AtomicU64,
    pub redraw_failures: AtomicU64,
    pub redraw_panics: AtomicU64,
    pub inputs_processed: AtomicU64,
    pub inputs_rejected: AtomicU64,
    pub edits_applied: AtomicU64,
    pub snapshots_published: AtomicU64,
    pub last_step_us: AtomicU64,
    pub last_live: AtomicU64,
}

impl LoopCounters {
    pub fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add(counter: &AtomicU64, n: u64) {
        counter.fetch_add(n, Ordering::Relaxed);
    }

    pub fn set(counter: &AtomicU64, value: u64) {
        counter.store(value, Ordering::Relaxed);
    }

    pub fn report(&self) -> LoopMetrics {
        let get = |c: &AtomicU64| c.load(Ordering::Relaxed);
        LoopMetrics {
            iterations: get(&self.iterations),
            steps: get(&self.steps),
            redraws: get(&self.redraws),
            redraw_failures: get(&self.redraw_failures),
            redraw_panics: get(&self.redraw_panics),
            inputs_processed: get(&self.inputs_processed),
            inputs_rejected: get(&self.inputs_rejected),
            edits_applied: get(&self.edits_applied),
            snapshots_published: get(&self.snapshots_published),
            last_step_us: get(&self.last_step_us),
            last_live: get(&self.last_live),
        }
    }
}
