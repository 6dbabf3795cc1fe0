//! Operation cost accounting
//!
//! The heap reports every structural step through [`CostSink`]. The sink knows
//! nothing about heap semantics; it only adds up four counters.

mod export;
mod tracker;

use std::path::PathBuf;

use thiserror::Error;

pub use export::CSV_HEADER;
pub use tracker::PerformanceTracker;

/// Counter-reporting capability held by instrumented data structures.
///
/// All methods take `&self` so a structure can hold a shared reference while
/// the owner of the sink keeps resetting and snapshotting it between phases.
/// Counts are additive only.
pub trait CostSink {
    /// Add `count` element comparisons.
    fn record_comparison(&self, count: u64);
    /// Add `count` element exchanges.
    fn record_swap(&self, count: u64);
    /// Add `count` reads or writes of buffer slots.
    fn record_array_access(&self, count: u64);
    /// Add an allocation event of `bytes` bytes.
    fn record_memory_allocation(&self, bytes: u64);
}

impl<S: CostSink + ?Sized> CostSink for &S {
    fn record_comparison(&self, count: u64) {
        (**self).record_comparison(count)
    }

    fn record_swap(&self, count: u64) {
        (**self).record_swap(count)
    }

    fn record_array_access(&self, count: u64) {
        (**self).record_array_access(count)
    }

    fn record_memory_allocation(&self, bytes: u64) {
        (**self).record_memory_allocation(bytes)
    }
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl CostSink for NoopSink {
    #[inline]
    fn record_comparison(&self, _count: u64) {}
    #[inline]
    fn record_swap(&self, _count: u64) {}
    #[inline]
    fn record_array_access(&self, _count: u64) {}
    #[inline]
    fn record_memory_allocation(&self, _bytes: u64) {}
}

/// Current values of the four cost counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CounterSet {
    /// Element comparisons
    pub comparisons: u64,
    /// Element exchanges
    pub swaps: u64,
    /// Buffer slot reads and writes
    pub array_accesses: u64,
    /// Bytes reported by allocation events
    pub memory_allocations: u64,
}

/// Labelled point-in-time copy of the counters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricSnapshot {
    /// Operation label, written unquoted in the CSV export
    pub operation: String,
    /// Input size tag
    pub input_size: usize,
    /// Counter values when the snapshot was taken
    pub counters: CounterSet,
}

impl MetricSnapshot {
    /// Render as one CSV row (no trailing newline).
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{}",
            self.operation,
            self.input_size,
            self.counters.comparisons,
            self.counters.swaps,
            self.counters.array_accesses,
            self.counters.memory_allocations
        )
    }
}

/// Errors surfaced while exporting snapshot history.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Destination could not be created or written. History is left intact.
    #[error("failed to write metrics to {}: {source}", path.display())]
    Io {
        /// Export destination
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Snapshot label cannot be written as a bare CSV token.
    #[error("snapshot label {0:?} contains a comma or line break")]
    InvalidLabel(String),
}
