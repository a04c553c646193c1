//! Mergesort step recorder.
//!
//! Splits are logged top-down in the order the recursion visits them; merges
//! are logged element by element, post-order.

use std::fmt;

use super::{Identity, Recording, ReplayState, Step, Tracked};
use crate::algorithm::Algorithm;
use crate::error::{ensure_comparable, SortError};

/// Which run of a merge an element was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Run {
    Left,
    Right,
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Run::Left => write!(f, "left"),
            Run::Right => write!(f, "right"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MergeStep<T> {
    /// `[low, high]` is divided into `[low, mid]` and `[mid + 1, high]`.
    Split { low: usize, mid: usize, high: usize },
    /// One element is written to `position` during a merge.
    ///
    /// `against` is the head of the other run it beat, or `None` once the
    /// other run is exhausted and the rest is copied over.
    Take {
        position: usize,
        run: Run,
        identity: Identity,
        value: T,
        against: Option<(Identity, T)>,
    },
    /// `[low, high]` is now sorted.
    MergeComplete { low: usize, high: usize },
}

impl<T> MergeStep<T> {
    pub fn kind(&self) -> &'static str {
        match self {
            MergeStep::Split { .. } => "split",
            MergeStep::Take { .. } => "merge_step",
            MergeStep::MergeComplete { .. } => "merge_complete",
        }
    }

    pub fn is_comparison(&self) -> bool {
        matches!(self, MergeStep::Take { against: Some(_), .. })
    }

    pub fn is_mutation(&self) -> bool {
        matches!(self, MergeStep::Take { .. })
    }

    pub fn apply(&self, state: &mut ReplayState) {
        if let MergeStep::Take {
            position, identity, ..
        } = self
        {
            state.place(*position, *identity);
        }
    }
}

impl<T: fmt::Display> fmt::Display for MergeStep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeStep::Split { low, mid, high } => {
                write!(f, "Split [{low}, {high}] into [{low}, {mid}] and [{}, {high}]", mid + 1)
            }
            MergeStep::Take {
                position,
                run,
                value,
                against: Some((_, other)),
                ..
            } => write!(f, "Take {value} from {run} run over {other} -> index {position}"),
            MergeStep::Take {
                position,
                run,
                value,
                against: None,
                ..
            } => write!(f, "Copy remaining {value} from {run} run -> index {position}"),
            MergeStep::MergeComplete { low, high } => write!(f, "Merged [{low}, {high}]"),
        }
    }
}

/// Record a top-down mergesort of `data`.
pub fn record<T: PartialOrd + Clone>(data: &[T]) -> Result<Recording<T>, SortError> {
    ensure_comparable(data)?;

    if data.len() <= 1 {
        let steps = vec![Step::AlreadySorted { len: data.len() }];
        return Ok(Recording::new(Algorithm::Merge, data.to_vec(), steps));
    }

    let mut recorder = MergeRecorder {
        work: Tracked::new(data),
        steps: Vec::new(),
    };
    recorder.sort_range(0, data.len() - 1);
    recorder.steps.push(Step::Done);

    Ok(Recording::new(Algorithm::Merge, data.to_vec(), recorder.steps))
}

struct MergeRecorder<T> {
    work: Tracked<T>,
    steps: Vec<Step<T>>,
}

impl<T: PartialOrd + Clone> MergeRecorder<T> {
    fn push(&mut self, step: MergeStep<T>) {
        self.steps.push(Step::Merge(step));
    }

    fn sort_range(&mut self, low: usize, high: usize) {
        if low >= high {
            return;
        }

        let mid = low + (high - low) / 2;
        self.push(MergeStep::Split { low, mid, high });
        self.sort_range(low, mid);
        self.sort_range(mid + 1, high);
        self.merge(low, mid, high);
    }

    fn merge(&mut self, low: usize, mid: usize, high: usize) {
        let left: Vec<(Identity, T)> = (low..=mid).map(|p| self.work.entry(p)).collect();
        let right: Vec<(Identity, T)> = (mid + 1..=high).map(|p| self.work.entry(p)).collect();

        let (mut i, mut j, mut k) = (0, 0, low);
        while i < left.len() && j < right.len() {
            let (run, taken, other) = if left[i].1 <= right[j].1 {
                i += 1;
                (Run::Left, &left[i - 1], &right[j])
            } else {
                j += 1;
                (Run::Right, &right[j - 1], &left[i])
            };
            let (identity, value) = taken.clone();
            self.take(k, run, identity, value, Some(other.clone()));
            k += 1;
        }

        let rest = left[i..]
            .iter()
            .map(|e| (Run::Left, e))
            .chain(right[j..].iter().map(|e| (Run::Right, e)));
        for (run, (identity, value)) in rest {
            self.take(k, run, *identity, value.clone(), None);
            k += 1;
        }

        self.push(MergeStep::MergeComplete { low, high });
    }

    fn take(&mut self, position: usize, run: Run, identity: Identity, value: T, against: Option<(Identity, T)>) {
        self.work.place(position, identity, value.clone());
        self.push(MergeStep::Take {
            position,
            run,
            identity,
            value,
            against,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_order_and_midpoints() {
        let recording = record(&[4, 3, 2, 1, 0]).unwrap();
        let splits: Vec<(usize, usize, usize)> = recording
            .iter()
            .filter_map(|s| match s {
                Step::Merge(MergeStep::Split { low, mid, high }) => Some((*low, *mid, *high)),
                _ => None,
            })
            .collect();
        assert_eq!(splits, vec![(0, 2, 4), (0, 1, 2), (0, 0, 1), (3, 3, 4)]);
    }

    #[test]
    fn test_ties_take_from_left_run() {
        let recording = record(&[1, 1]).unwrap();
        match &recording.steps()[1] {
            Step::Merge(MergeStep::Take {
                run, identity, against, ..
            }) => {
                assert_eq!(*run, Run::Left);
                assert_eq!(*identity, Identity::new(0));
                assert_eq!(*against, Some((Identity::new(1), 1)));
            }
            other => panic!("unexpected step {other:?}"),
        }
    }

    #[test]
    fn test_equal_values_keep_identity_order() {
        let data = [2, 1, 2, 1, 2, 1];
        let recording = record(&data).unwrap();

        let mut state = ReplayState::new(data.len());
        for step in &recording {
            step.apply(&mut state);
        }
        let order: Vec<usize> = state.sequence().iter().map(|id| id.index()).collect();
        assert_eq!(order, vec![1, 3, 5, 0, 2, 4]);
    }

    #[test]
    fn test_each_merge_writes_its_whole_range() {
        let recording = record(&[8, 6, 7, 5, 3, 0, 9]).unwrap();
        let takes = recording
            .iter()
            .filter(|s| matches!(s, Step::Merge(MergeStep::Take { .. })))
            .count();
        let written: usize = recording
            .iter()
            .filter_map(|s| match s {
                Step::Merge(MergeStep::MergeComplete { low, high }) => Some(high - low + 1),
                _ => None,
            })
            .sum();
        assert_eq!(takes, written);
        assert_eq!(recording.replay(), vec![0, 3, 5, 6, 7, 8, 9]);
    }
}
