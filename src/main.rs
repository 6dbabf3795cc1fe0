use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use heapmetrics::bench::{self, BenchmarkConfig, DEFAULT_MAX_VALUE, DEFAULT_OUTPUT, DEFAULT_SEED};
use heapmetrics::PerformanceTracker;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "heapmetrics",
    about = "Benchmark an instrumented max-heap and export per-phase operation counts"
)]
struct Cli {
    /// Input sizes to measure (comma separated).
    #[arg(long, value_delimiter = ',', default_values_t = bench::DEFAULT_SIZES)]
    sizes: Vec<usize>,
    /// Seed for the random input arrays.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Exclusive upper bound of generated values.
    #[arg(long, default_value_t = DEFAULT_MAX_VALUE)]
    max_value: i64,
    /// CSV destination.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Skip writing the CSV.
    #[arg(long)]
    no_export: bool,
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = BenchmarkConfig {
        sizes: cli.sizes,
        seed: cli.seed,
        max_value: cli.max_value,
        output: cli.output,
    };
    let tracker = PerformanceTracker::new();
    let report = bench::run(&config, &tracker).context("benchmark failed")?;

    println!("MaxHeap Benchmark Runner");
    println!("========================\n");
    for &n in &config.sizes {
        println!("Testing with n = {n}");
        for result in report.for_size(n) {
            println!("  {result}");
        }
        println!();
    }
    if !report.all_valid() {
        tracing::warn!("at least one phase left an invalid heap");
    }

    if !cli.no_export {
        // Export failure is reported but does not fail the run.
        match tracker.export_csv(&config.output) {
            Ok(()) => println!("Metrics exported to {}", config.output.display()),
            Err(err) => {
                tracing::error!(error = %err, "metrics export failed");
                eprintln!("Error exporting metrics: {err}");
            }
        }
    }

    let fingerprint = tracker
        .fingerprint()
        .context("failed to fingerprint metrics")?;
    println!("Metrics fingerprint: {fingerprint}");

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
