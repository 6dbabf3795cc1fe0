//! Benchmark run parameters

use std::path::PathBuf;

use super::BenchmarkError;

/// Input sizes measured when none are given.
pub const DEFAULT_SIZES: [usize; 4] = [100, 1_000, 10_000, 100_000];
/// Seed used for every input array.
pub const DEFAULT_SEED: u64 = 42;
/// Exclusive upper bound of generated values.
pub const DEFAULT_MAX_VALUE: i64 = 10_000;
/// Where the CSV lands when no path is given.
pub const DEFAULT_OUTPUT: &str = "performance-plots/maxheap_metrics.csv";

/// Configuration for a benchmark run
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkConfig {
    /// Input sizes, measured in order
    pub sizes: Vec<usize>,

    /// RNG seed; each size gets a fresh generator with this seed
    pub seed: u64,

    /// Values are drawn uniformly from `[0, max_value)`
    pub max_value: i64,

    /// CSV destination
    pub output: PathBuf,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            seed: DEFAULT_SEED,
            max_value: DEFAULT_MAX_VALUE,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl BenchmarkConfig {
    /// Default configuration measuring `sizes`
    pub fn with_sizes(sizes: Vec<usize>) -> Self {
        Self {
            sizes,
            ..Self::default()
        }
    }

    /// Reject configurations the driver cannot run.
    pub fn validate(&self) -> Result<(), BenchmarkError> {
        if self.sizes.is_empty() {
            return Err(BenchmarkError::InvalidConfig(
                "at least one input size is required".to_string(),
            ));
        }
        if self.max_value <= 0 {
            return Err(BenchmarkError::InvalidConfig(format!(
                "max value must be positive, got {}",
                self.max_value
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_run() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.sizes, vec![100, 1_000, 10_000, 100_000]);
        assert_eq!(config.seed, 42);
        assert_eq!(config.max_value, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_sizes_rejected() {
        let config = BenchmarkConfig::with_sizes(Vec::new());
        assert!(matches!(
            config.validate(),
            Err(BenchmarkError::InvalidConfig(_))
        ));
    }

    #[test]
    fn non_positive_max_value_rejected() {
        let config = BenchmarkConfig {
            max_value: 0,
            ..BenchmarkConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
