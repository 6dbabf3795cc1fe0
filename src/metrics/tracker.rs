//! Counter accumulator with snapshot history

use std::cell::{Cell, RefCell};

use super::{CostSink, CounterSet, MetricSnapshot};

/// Tracks cost counters during a measurement run.
///
/// Counters live in `Cell`s so the tracker can be shared by reference with the
/// structure being measured. The tracker is `!Sync`.
#[derive(Debug, Default)]
pub struct PerformanceTracker {
    comparisons: Cell<u64>,
    swaps: Cell<u64>,
    array_accesses: Cell<u64>,
    memory_allocations: Cell<u64>,

    /// Append-only; survives `reset`
    history: RefCell<Vec<MetricSnapshot>>,
}

impl PerformanceTracker {
    /// Create tracker with zeroed counters and empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current counters under `operation` without resetting them.
    pub fn snapshot(&self, operation: impl Into<String>, input_size: usize) {
        let snapshot = MetricSnapshot {
            operation: operation.into(),
            input_size,
            counters: self.counters(),
        };
        tracing::trace!(
            operation = %snapshot.operation,
            input_size,
            comparisons = snapshot.counters.comparisons,
            swaps = snapshot.counters.swaps,
            "metrics snapshot"
        );
        self.history.borrow_mut().push(snapshot);
    }

    /// Zero all four counters. Snapshot history is untouched.
    pub fn reset(&self) {
        self.comparisons.set(0);
        self.swaps.set(0);
        self.array_accesses.set(0);
        self.memory_allocations.set(0);
    }

    /// Drop all recorded snapshots.
    pub fn clear_history(&self) {
        self.history.borrow_mut().clear();
    }

    /// Copy of the snapshot history in recording order.
    pub fn history(&self) -> Vec<MetricSnapshot> {
        self.history.borrow().clone()
    }

    /// Number of snapshots recorded so far
    pub fn snapshot_count(&self) -> usize {
        self.history.borrow().len()
    }

    /// Current counter values
    pub fn counters(&self) -> CounterSet {
        CounterSet {
            comparisons: self.comparisons.get(),
            swaps: self.swaps.get(),
            array_accesses: self.array_accesses.get(),
            memory_allocations: self.memory_allocations.get(),
        }
    }

    /// Comparisons since the last reset
    pub fn comparisons(&self) -> u64 {
        self.comparisons.get()
    }

    /// Swaps since the last reset
    pub fn swaps(&self) -> u64 {
        self.swaps.get()
    }

    /// Array accesses since the last reset
    pub fn array_accesses(&self) -> u64 {
        self.array_accesses.get()
    }

    /// Bytes allocated since the last reset
    pub fn memory_allocations(&self) -> u64 {
        self.memory_allocations.get()
    }

    pub(super) fn with_history<R>(&self, f: impl FnOnce(&[MetricSnapshot]) -> R) -> R {
        f(self.history.borrow().as_slice())
    }
}

fn bump(cell: &Cell<u64>, count: u64) {
    cell.set(cell.get() + count);
}

impl CostSink for PerformanceTracker {
    fn record_comparison(&self, count: u64) {
        bump(&self.comparisons, count);
    }

    fn record_swap(&self, count: u64) {
        bump(&self.swaps, count);
    }

    fn record_array_access(&self, count: u64) {
        bump(&self.array_accesses, count);
    }

    fn record_memory_allocation(&self, bytes: u64) {
        bump(&self.memory_allocations, bytes);
    }
}
