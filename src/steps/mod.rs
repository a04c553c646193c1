//! Step Recording
//!
//! Each recorder replays one of the sort engines on a private working copy and
//! appends a [`Step`] for every decision it makes: comparisons, swaps, pivot
//! choices, bucket assignments. A renderer consumes the resulting
//! [`Recording`] in order and never has to run the algorithm itself.
//!
//! Every element keeps an [`Identity`] (its index in the original input) for
//! the whole run, so a consumer can follow "this value" across swaps rather
//! than "whatever sits in slot k right now".
//!
//! Replaying the mutation-bearing steps of a recording through a
//! [`ReplayState`] reproduces the engine's sorted output exactly.

pub mod bucket;
pub mod heap;
pub mod merge;
pub mod quick;

mod identity;
mod replay;

use std::fmt;

use log::debug;

use crate::algorithm::Algorithm;
use crate::error::SortError;

pub use bucket::BucketStep;
pub use heap::{HeapPhase, HeapStep};
pub use identity::{Identity, IdentityMap, Tracked};
pub use merge::{MergeStep, Run};
pub use quick::QuickStep;
pub use replay::{Frame, Replay, ReplayState};

/// One logged decision or mutation of an instrumented sort run.
#[derive(Debug, Clone, PartialEq)]
pub enum Step<T> {
    Quick(QuickStep<T>),
    Merge(MergeStep<T>),
    Heap(HeapStep<T>),
    Bucket(BucketStep<T>),
    /// Emitted alone for inputs of zero or one element.
    AlreadySorted { len: usize },
    /// Last step of every recording with more than one element.
    Done,
}

impl<T> Step<T> {
    /// Snake-case tag of the step kind, e.g. `pivot_selected` or `gather`.
    pub fn kind(&self) -> &'static str {
        match self {
            Step::Quick(step) => step.kind(),
            Step::Merge(step) => step.kind(),
            Step::Heap(step) => step.kind(),
            Step::Bucket(step) => step.kind(),
            Step::AlreadySorted { .. } => "already_sorted",
            Step::Done => "done",
        }
    }

    /// True when the step records an element comparison.
    pub fn is_comparison(&self) -> bool {
        match self {
            Step::Quick(step) => step.is_comparison(),
            Step::Merge(step) => step.is_comparison(),
            Step::Heap(step) => step.is_comparison(),
            Step::Bucket(step) => step.is_comparison(),
            Step::AlreadySorted { .. } | Step::Done => false,
        }
    }

    /// True when [`Step::apply`] changes the replay state.
    pub fn is_mutation(&self) -> bool {
        match self {
            Step::Quick(step) => step.is_mutation(),
            Step::Merge(step) => step.is_mutation(),
            Step::Heap(step) => step.is_mutation(),
            Step::Bucket(step) => step.is_mutation(),
            Step::AlreadySorted { .. } | Step::Done => false,
        }
    }

    /// Apply this step's mutation, if any, to a replay in progress.
    pub fn apply(&self, state: &mut ReplayState) {
        match self {
            Step::Quick(step) => step.apply(state),
            Step::Merge(step) => step.apply(state),
            Step::Heap(step) => step.apply(state),
            Step::Bucket(step) => step.apply(state),
            Step::AlreadySorted { .. } | Step::Done => {}
        }
    }
}

impl<T: fmt::Display> fmt::Display for Step<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Quick(step) => write!(f, "{step}"),
            Step::Merge(step) => write!(f, "{step}"),
            Step::Heap(step) => write!(f, "{step}"),
            Step::Bucket(step) => write!(f, "{step}"),
            Step::AlreadySorted { len: 0 } => write!(f, "Empty input, nothing to sort"),
            Step::AlreadySorted { .. } => write!(f, "Single element is already sorted"),
            Step::Done => write!(f, "Array sorted"),
        }
    }
}

/// The full, ordered step log of one sort run together with its input.
#[derive(Debug, Clone, PartialEq)]
pub struct Recording<T> {
    algorithm: Algorithm,
    original: Vec<T>,
    steps: Vec<Step<T>>,
}

impl<T> Recording<T> {
    pub(crate) fn new(algorithm: Algorithm, original: Vec<T>, steps: Vec<Step<T>>) -> Self {
        debug!(
            "recorded {} steps for {} on {} elements",
            steps.len(),
            algorithm,
            original.len()
        );
        Recording {
            algorithm,
            original,
            steps,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The input as it was before sorting; identities index into this.
    pub fn original(&self) -> &[T] {
        &self.original
    }

    pub fn steps(&self) -> &[Step<T>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step<T>> {
        self.steps.iter()
    }

    /// Number of comparison steps.
    pub fn comparisons(&self) -> usize {
        self.steps.iter().filter(|s| s.is_comparison()).count()
    }

    /// Number of steps that move an element.
    pub fn mutations(&self) -> usize {
        self.steps.iter().filter(|s| s.is_mutation()).count()
    }

    /// Value an identity stood for in the original input.
    pub fn value_of(&self, identity: Identity) -> &T {
        &self.original[identity.index()]
    }
}

impl<T: Clone> Recording<T> {
    /// Apply every step to a copy of the input and return the result.
    pub fn replay(&self) -> Vec<T> {
        let mut state = ReplayState::new(self.original.len());
        for step in &self.steps {
            step.apply(&mut state);
        }
        state.values(&self.original)
    }

    /// Sequence state after each step, in order.
    pub fn frames(&self) -> Replay<'_, T> {
        Replay::new(&self.original, &self.steps)
    }
}

impl<T> IntoIterator for Recording<T> {
    type Item = Step<T>;
    type IntoIter = std::vec::IntoIter<Step<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Recording<T> {
    type Item = &'a Step<T>;
    type IntoIter = std::slice::Iter<'a, Step<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Record `data` being sorted by `algorithm`.
///
/// Fails with the same error [`Algorithm::sort`] would return for `data`.
pub fn record(data: &[f64], algorithm: Algorithm) -> Result<Recording<f64>, SortError> {
    match algorithm {
        Algorithm::Bucket => bucket::record(data),
        Algorithm::Heap => heap::record(data),
        Algorithm::Merge => merge::record(data),
        Algorithm::Quick => quick::record(data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALUES: [f64; 10] = [0.78, 0.17, 0.39, 0.26, 0.72, 0.94, 0.21, 0.12, 0.23, 0.68];

    #[test]
    fn test_record_replays_to_engine_output() {
        for algorithm in Algorithm::ALL {
            let mut expected = VALUES.to_vec();
            algorithm.sort(&mut expected).unwrap();

            let recording = record(&VALUES, algorithm).unwrap();
            assert_eq!(recording.algorithm(), algorithm);
            assert_eq!(recording.original(), &VALUES[..]);
            assert_eq!(recording.replay(), expected, "{algorithm}");
            assert_eq!(recording.steps().last(), Some(&Step::Done));
        }
    }

    #[test]
    fn test_record_singleton_is_minimal() {
        for algorithm in Algorithm::ALL {
            let recording = record(&[0.5], algorithm).unwrap();
            assert_eq!(recording.steps(), &[Step::AlreadySorted { len: 1 }]);
            assert_eq!(recording.comparisons(), 0);
            assert_eq!(recording.replay(), vec![0.5]);
        }
    }

    #[test]
    fn test_record_empty() {
        for algorithm in Algorithm::ALL {
            let recording = record(&[], algorithm).unwrap();
            assert_eq!(recording.len(), 1);
            assert_eq!(recording.steps()[0].kind(), "already_sorted");
            assert!(recording.replay().is_empty());
        }
    }

    #[test]
    fn test_record_surfaces_engine_errors() {
        for algorithm in Algorithm::ALL {
            let data = [0.4, f64::NAN];
            let mut copy = data.to_vec();
            let engine_err = algorithm.sort(&mut copy).unwrap_err();
            assert_eq!(record(&data, algorithm).unwrap_err(), engine_err);
        }

        let err = record(&[0.4, 2.0], Algorithm::Bucket).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(record(&[0.4, 2.0], Algorithm::Quick).is_ok());
    }

    #[test]
    fn test_frames_end_sorted() {
        for algorithm in Algorithm::ALL {
            let recording = record(&VALUES, algorithm).unwrap();
            let frames: Vec<_> = recording.frames().collect();
            assert_eq!(frames.len(), recording.len());
            assert_eq!(frames.last().unwrap().values, recording.replay());
        }
    }

    #[test]
    fn test_counts_and_narration() {
        let recording = record(&VALUES, Algorithm::Quick).unwrap();
        assert!(recording.comparisons() > 0);
        assert!(recording.mutations() > 0);
        assert!(recording.mutations() < recording.len());
        assert_eq!(recording.steps().last().unwrap().to_string(), "Array sorted");

        let owned: Vec<Step<f64>> = recording.clone().into_iter().collect();
        assert_eq!(owned.len(), recording.len());
    }
}
