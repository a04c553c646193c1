//! Shape Benchmark Harness
//!
//! Runs one algorithm over every configured input shape. Each shape is
//! generated from a single seeded RNG, checked once against the standard
//! library's ordering, then timed over several fresh copies.
//!
//! Verification is independent per shape and runs on the rayon pool. Timing
//! stays sequential so measurements do not compete for cores.

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::algorithm::Algorithm;
use crate::error::SortError;
use crate::inputs::{to_unit_interval, InputShape};
use crate::report::{BenchmarkReport, BenchmarkResult};

/// Default number of elements per array
pub const DEFAULT_ARRAY_SIZE: usize = 5000;
/// Default number of timed runs per shape
pub const DEFAULT_RUNS: usize = 7;
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkConfig {
    pub size: usize,
    pub runs: usize,
    pub seed: u64,
    pub shapes: Vec<InputShape>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            size: DEFAULT_ARRAY_SIZE,
            runs: DEFAULT_RUNS,
            seed: DEFAULT_SEED,
            shapes: InputShape::ALL.to_vec(),
        }
    }
}

/// Result of checking one sort against the reference ordering.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Verified,
    /// The sort finished but its output differs from the reference.
    Mismatch,
    /// The algorithm refused the input.
    Rejected(SortError),
}

impl Outcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, Outcome::Verified)
    }
}

/// Generate every configured shape, in order, from one RNG seeded with
/// `config.seed`. Bucket sort receives the shapes mapped into `[0, 1)`.
pub fn prepare_inputs(algorithm: Algorithm, config: &BenchmarkConfig) -> Vec<(InputShape, Vec<f64>)> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    config
        .shapes
        .iter()
        .map(|&shape| {
            let values = shape.generate(config.size, &mut rng);
            let values = if algorithm.requires_unit_interval() {
                to_unit_interval(&values)
            } else {
                values
            };
            (shape, values)
        })
        .collect()
}

/// Sort a copy of `input` and compare it with `sort_by(total_cmp)`.
pub fn verify(algorithm: Algorithm, input: &[f64]) -> Outcome {
    let mut actual = input.to_vec();
    if let Err(e) = algorithm.sort(&mut actual) {
        return Outcome::Rejected(e);
    }

    let mut expected = input.to_vec();
    expected.sort_by(|a, b| a.total_cmp(b));
    if actual == expected {
        Outcome::Verified
    } else {
        Outcome::Mismatch
    }
}

/// Mean wall-clock time in milliseconds over `runs` sorts of fresh copies.
///
/// At least one run is always made.
pub fn time_sort(algorithm: Algorithm, input: &[f64], runs: usize) -> Result<f64, SortError> {
    let runs = runs.max(1);
    let mut total = Duration::ZERO;

    for _ in 0..runs {
        let mut data = input.to_vec();
        let start = Instant::now();
        algorithm.sort(&mut data)?;
        total += start.elapsed();
    }

    Ok(total.as_secs_f64() * 1000.0 / runs as f64)
}

/// Benchmark one algorithm over every configured shape.
pub fn run(algorithm: Algorithm, config: &BenchmarkConfig) -> BenchmarkReport {
    info!(
        "Benchmarking {} on {} shapes (n = {}, runs = {}, seed = {})",
        algorithm.title(),
        config.shapes.len(),
        config.size,
        config.runs,
        config.seed
    );

    let inputs = prepare_inputs(algorithm, config);
    let outcomes: Vec<Outcome> = inputs
        .par_iter()
        .map(|(_, values)| verify(algorithm, values))
        .collect();

    let description = format!("{} across {} input shapes", algorithm.title(), inputs.len());
    let mut report = BenchmarkReport::new(&description, config.size, config.runs, config.seed);

    for ((shape, values), outcome) in inputs.iter().zip(outcomes) {
        let mut result = BenchmarkResult {
            algorithm: algorithm.name().to_string(),
            shape: shape.label().to_string(),
            note: shape.note(algorithm).to_string(),
            array_size: values.len(),
            time_ms: 0.0,
            verified: outcome.is_verified(),
            error: None,
        };

        match outcome {
            Outcome::Rejected(e) => {
                warn!("{} rejected '{}': {}", algorithm.title(), shape, e);
                result.error = Some(e.to_string());
            }
            outcome => {
                if outcome == Outcome::Mismatch {
                    warn!("{} produced wrong output on '{}'", algorithm.title(), shape);
                }
                match time_sort(algorithm, values, config.runs) {
                    Ok(ms) => {
                        debug!("{} on '{}': {:.3} ms", algorithm.name(), shape, ms);
                        result.time_ms = ms;
                    }
                    Err(e) => result.error = Some(e.to_string()),
                }
            }
        }

        report.add_result(result);
    }

    report
}

/// Benchmark several algorithms into one combined report.
pub fn run_all(algorithms: &[Algorithm], config: &BenchmarkConfig) -> BenchmarkReport {
    let mut reports = algorithms.iter().map(|&algorithm| run(algorithm, config));
    let mut report = reports
        .next()
        .unwrap_or_else(|| BenchmarkReport::new("", config.size, config.runs, config.seed));
    for other in reports {
        report.merge(other);
    }

    if algorithms.len() > 1 {
        report.description = format!(
            "{} algorithms across {} input shapes",
            algorithms.len(),
            config.shapes.len()
        );
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidInput;

    fn small_config() -> BenchmarkConfig {
        BenchmarkConfig {
            size: 300,
            runs: 2,
            ..BenchmarkConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.size, 5000);
        assert_eq!(config.runs, 7);
        assert_eq!(config.seed, 42);
        assert_eq!(config.shapes.len(), 10);
    }

    #[test]
    fn test_inputs_are_reproducible() {
        let config = small_config();
        let first = prepare_inputs(Algorithm::Quick, &config);
        let second = prepare_inputs(Algorithm::Quick, &config);
        assert_eq!(first, second);

        let other = prepare_inputs(Algorithm::Quick, &BenchmarkConfig { seed: 7, ..config });
        assert_ne!(first[0].1, other[0].1);
    }

    #[test]
    fn test_bucket_inputs_are_mapped() {
        for (_, values) in prepare_inputs(Algorithm::Bucket, &small_config()) {
            assert!(values.iter().all(|v| (0.0..1.0).contains(v)));
        }
    }

    #[test]
    fn test_verify_outcomes() {
        assert_eq!(verify(Algorithm::Merge, &[3.0, 1.0, 2.0]), Outcome::Verified);
        assert_eq!(
            verify(Algorithm::Bucket, &[3.0, 1.0]),
            Outcome::Rejected(SortError::InvalidInput(InvalidInput::OutOfRange {
                index: 0,
                value: 3.0
            }))
        );
    }

    #[test]
    fn test_time_sort_is_non_negative() {
        let input: Vec<f64> = (0..100).rev().map(|v| v as f64).collect();
        let ms = time_sort(Algorithm::Heap, &input, 0).unwrap();
        assert!(ms >= 0.0);
    }

    #[test]
    fn test_run_covers_every_shape() {
        for algorithm in Algorithm::ALL {
            let report = run(algorithm, &small_config());
            assert_eq!(report.results.len(), 10);
            for result in &report.results {
                assert_eq!(result.algorithm, algorithm.name());
                assert!(result.verified, "{} on {}", algorithm, result.shape);
                assert!(result.error.is_none());
                assert_eq!(result.array_size, 300);
            }
        }
    }

    #[test]
    fn test_run_all_combines_reports() {
        let config = BenchmarkConfig {
            shapes: vec![InputShape::Sorted, InputShape::RandomFloats],
            ..small_config()
        };
        let report = run_all(&[Algorithm::Quick, Algorithm::Bucket], &config);
        assert_eq!(report.algorithms(), vec!["quick", "bucket"]);
        assert_eq!(report.results.len(), 4);
        assert_eq!(report.description, "2 algorithms across 2 input shapes");
    }
}
