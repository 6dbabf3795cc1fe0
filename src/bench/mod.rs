//! Phased benchmark driver
//!
//! For each input size: build a heap from a seeded random array, insert the
//! same values one at a time into an empty heap, then drain the first heap.
//! The tracker is reset before each phase and snapshotted after it, so every
//! snapshot isolates the cost of one phase.

mod config;

use std::fmt;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::heap::{HeapError, MaxHeap};
use crate::metrics::{CounterSet, PerformanceTracker};

pub use config::{
    BenchmarkConfig, DEFAULT_MAX_VALUE, DEFAULT_OUTPUT, DEFAULT_SEED, DEFAULT_SIZES,
};

/// Errors surfaced by the driver.
#[derive(Debug, Error)]
pub enum BenchmarkError {
    /// Configuration rejected before any phase ran
    #[error("invalid benchmark configuration: {0}")]
    InvalidConfig(String),

    /// Heap operation failed mid-phase
    #[error(transparent)]
    Heap(#[from] HeapError),
}

/// Measured phase, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// `from_slice` over the random array
    BuildHeap,
    /// `insert` of every value into a heap sized for the input
    SequentialInsert,
    /// `extract_max` until the built heap is empty
    ExtractAll,
}

impl Phase {
    /// All phases in the order the driver runs them
    pub const ALL: [Phase; 3] = [Phase::BuildHeap, Phase::SequentialInsert, Phase::ExtractAll];

    /// Snapshot label written to the CSV
    pub fn label(self) -> &'static str {
        match self {
            Phase::BuildHeap => "build_heap",
            Phase::SequentialInsert => "sequential_insert",
            Phase::ExtractAll => "extract_all",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Phase::BuildHeap => "Build heap",
            Phase::SequentialInsert => "Sequential insert",
            Phase::ExtractAll => "Extract all",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one timed phase
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseResult {
    /// Which phase ran
    pub phase: Phase,
    /// Number of input values
    pub input_size: usize,
    /// Wall-clock time of the phase
    pub elapsed: Duration,
    /// Heap property held afterwards (for the drain: all `n` values came out
    /// in non-increasing order)
    pub valid: bool,
    /// Counter values snapshotted after the phase
    pub counters: CounterSet,
}

impl fmt::Display for PhaseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ns, Valid: {}",
            self.phase.title(),
            self.elapsed.as_nanos(),
            self.valid
        )
    }
}

/// All phase results of a run, in execution order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkReport {
    /// One entry per (size, phase)
    pub results: Vec<PhaseResult>,
}

impl BenchmarkReport {
    /// `true` when every phase left a valid heap
    pub fn all_valid(&self) -> bool {
        self.results.iter().all(|r| r.valid)
    }

    /// Results measured for `input_size`
    pub fn for_size(&self, input_size: usize) -> impl Iterator<Item = &PhaseResult> {
        self.results
            .iter()
            .filter(move |r| r.input_size == input_size)
    }
}

/// Generate `n` values uniformly from `[0, max_value)`.
///
/// Fails with [`BenchmarkError::InvalidConfig`] when the range is empty.
pub fn generate_input<R: Rng + ?Sized>(
    n: usize,
    max_value: i64,
    rng: &mut R,
) -> Result<Vec<i64>, BenchmarkError> {
    if max_value <= 0 {
        return Err(BenchmarkError::InvalidConfig(format!(
            "max value must be positive, got {max_value}"
        )));
    }
    Ok((0..n).map(|_| rng.gen_range(0..max_value)).collect())
}

/// Run the three phases for one input size.
///
/// The configuration is validated first; nothing is snapshotted on error.
pub fn run_size(
    n: usize,
    config: &BenchmarkConfig,
    tracker: &PerformanceTracker,
) -> Result<Vec<PhaseResult>, BenchmarkError> {
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let input = generate_input(n, config.max_value, &mut rng)?;
    let mut results = Vec::with_capacity(Phase::ALL.len());

    tracker.reset();
    let start = Instant::now();
    let mut built = MaxHeap::from_slice(&input, tracker);
    let elapsed = start.elapsed();
    results.push(finish(tracker, Phase::BuildHeap, n, elapsed, built.is_valid_max_heap()));

    tracker.reset();
    let start = Instant::now();
    let mut inserted = MaxHeap::with_capacity(n, tracker);
    for &value in &input {
        inserted.insert(value);
    }
    let elapsed = start.elapsed();
    results.push(finish(
        tracker,
        Phase::SequentialInsert,
        n,
        elapsed,
        inserted.is_valid_max_heap(),
    ));

    tracker.reset();
    let mut drained = Vec::with_capacity(n);
    let start = Instant::now();
    while !built.is_empty() {
        drained.push(built.extract_max()?);
    }
    let elapsed = start.elapsed();
    results.push(finish(
        tracker,
        Phase::ExtractAll,
        n,
        elapsed,
        is_complete_drain(&drained, n),
    ));

    Ok(results)
}

/// Run every configured size in order.
pub fn run(
    config: &BenchmarkConfig,
    tracker: &PerformanceTracker,
) -> Result<BenchmarkReport, BenchmarkError> {
    config.validate()?;

    let mut report = BenchmarkReport::default();
    for &n in &config.sizes {
        tracing::info!(input_size = n, "benchmarking heap operations");
        report.results.extend(run_size(n, config, tracker)?);
    }
    Ok(report)
}

/// All `n` values came out, largest first.
fn is_complete_drain(drained: &[i64], n: usize) -> bool {
    drained.len() == n && drained.windows(2).all(|pair| pair[0] >= pair[1])
}

fn finish(
    tracker: &PerformanceTracker,
    phase: Phase,
    input_size: usize,
    elapsed: Duration,
    valid: bool,
) -> PhaseResult {
    tracker.snapshot(phase.label(), input_size);
    let result = PhaseResult {
        phase,
        input_size,
        elapsed,
        valid,
        counters: tracker.counters(),
    };
    tracing::debug!(
        phase = %phase,
        input_size,
        elapsed_ns = elapsed.as_nanos() as u64,
        valid,
        "phase complete"
    );
    if !valid {
        tracing::warn!(phase = %phase, input_size, "heap invariant violated");
    }
    result
}
