//! # Instrumented max-heap for empirical algorithm analysis
//!
//! An array-backed binary max-heap over `i64` whose every structural step is
//! reported to a cost sink, so callers can measure exact comparison, swap,
//! access and allocation counts per operation.
//!
//! ## Components
//!
//! 1. **Instrumentation sink** ([`metrics`]): four additive counters plus a
//!    history of labelled snapshots, exportable as CSV
//! 2. **Max-heap engine** ([`heap`]): sift-up, sift-down, bottom-up build,
//!    doubling growth; holds a shared reference to its sink
//! 3. **Benchmark driver** ([`bench`]): seeded inputs, timed phases, one
//!    snapshot per phase
//!
//! ## Usage Example
//!
//! ```
//! use heapmetrics::{MaxHeap, PerformanceTracker};
//!
//! let tracker = PerformanceTracker::new();
//! let mut heap = MaxHeap::from_slice(&[3, 1, 4, 1, 5, 9, 2, 6], &tracker);
//! tracker.snapshot("build_heap", 8);
//!
//! tracker.reset();
//! assert_eq!(heap.extract_max(), Ok(9));
//! assert!(heap.is_valid_max_heap());
//! tracker.snapshot("extract_max", 8);
//!
//! let csv = tracker.to_csv_string().unwrap();
//! assert_eq!(csv.lines().count(), 3);
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod bench;   // Phased benchmark driver
pub mod heap;    // Instrumented max-heap
pub mod metrics; // Cost counters and CSV export

// Re-exports for convenience
pub use bench::{BenchmarkConfig, BenchmarkError, BenchmarkReport, Phase, PhaseResult};
pub use heap::{HeapError, MaxHeap, WORD_SIZE};
pub use metrics::{
    CostSink, CounterSet, MetricSnapshot, MetricsError, NoopSink, PerformanceTracker, CSV_HEADER,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_size_is_eight_bytes() {
        assert_eq!(WORD_SIZE, 8);
    }

    #[test]
    fn tracker_isolates_phases() {
        let tracker = PerformanceTracker::new();
        let mut heap = MaxHeap::with_capacity(4, &tracker);
        heap.insert(1);
        tracker.snapshot("insert", 1);

        tracker.reset();
        heap.extract_max().unwrap();
        tracker.snapshot("extract", 1);

        let history = tracker.history();
        assert_eq!(history[0].counters.memory_allocations, 32);
        assert_eq!(history[1].counters.memory_allocations, 0);
        assert_eq!(history[1].counters.swaps, 1);
    }
}
