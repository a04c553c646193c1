//! Algorithm selection shared by the benchmark harness, the recorder and the CLI.

use std::fmt;
use std::str::FromStr;

use crate::error::SortError;
use crate::steps::{self, Recording};
use crate::{bucket_sort, heap_sort, merge_sort, quick_sort};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bucket,
    Heap,
    Merge,
    Quick,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bucket,
        Algorithm::Heap,
        Algorithm::Merge,
        Algorithm::Quick,
    ];

    /// Short lowercase name, as accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bucket => "bucket",
            Algorithm::Heap => "heap",
            Algorithm::Merge => "merge",
            Algorithm::Quick => "quick",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Algorithm::Bucket => "BucketSort",
            Algorithm::Heap => "HeapSort",
            Algorithm::Merge => "MergeSort",
            Algorithm::Quick => "QuickSort",
        }
    }

    /// Whether equal elements keep their input order.
    pub fn is_stable(self) -> bool {
        matches!(self, Algorithm::Bucket | Algorithm::Merge)
    }

    /// Only bucket sort restricts its input domain, to `[0, 1)`.
    pub fn requires_unit_interval(self) -> bool {
        self == Algorithm::Bucket
    }

    /// Sort `data` in place with this algorithm.
    pub fn sort(self, data: &mut [f64]) -> Result<(), SortError> {
        match self {
            Algorithm::Bucket => bucket_sort::sort(data),
            Algorithm::Heap => heap_sort::sort(data),
            Algorithm::Merge => merge_sort::sort(data),
            Algorithm::Quick => quick_sort::sort(data),
        }
    }

    /// Record every step of sorting a copy of `data`.
    pub fn record(self, data: &[f64]) -> Result<Recording<f64>, SortError> {
        steps::record(data, self)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let name = lower
            .strip_suffix("_sort")
            .or_else(|| lower.strip_suffix("-sort"))
            .or_else(|| lower.strip_suffix("sort"))
            .unwrap_or(&lower);

        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == name)
            .ok_or_else(|| SortError::UnknownAlgorithm(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("quick".parse::<Algorithm>().unwrap(), Algorithm::Quick);
        assert_eq!("HeapSort".parse::<Algorithm>().unwrap(), Algorithm::Heap);
        assert_eq!("merge-sort".parse::<Algorithm>().unwrap(), Algorithm::Merge);
        assert_eq!("bucket_sort".parse::<Algorithm>().unwrap(), Algorithm::Bucket);
        assert_eq!(
            "shell".parse::<Algorithm>().unwrap_err(),
            SortError::UnknownAlgorithm("shell".to_string())
        );
    }

    #[test]
    fn test_name_roundtrip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn test_dispatch_sorts() {
        for algorithm in Algorithm::ALL {
            let mut data = vec![0.9, 0.1, 0.5, 0.3];
            algorithm.sort(&mut data).unwrap();
            assert_eq!(data, vec![0.1, 0.3, 0.5, 0.9], "{algorithm}");
        }
    }

    #[test]
    fn test_only_bucket_rejects_large_values() {
        for algorithm in Algorithm::ALL {
            let mut data = vec![5.0, 3.0, 8.0, 4.0, 2.0];
            let result = algorithm.sort(&mut data);
            assert_eq!(result.is_err(), algorithm.requires_unit_interval());
        }
    }
}
