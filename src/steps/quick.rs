//! Quicksort step recorder.
//!
//! Mirrors [`crate::quick_sort`] step for step: Lomuto partition, last element
//! as pivot, left range recursed before the right one.

use std::fmt;

use super::{Identity, Recording, ReplayState, Step, Tracked};
use crate::algorithm::Algorithm;
use crate::error::{ensure_comparable, SortError};

#[derive(Debug, Clone, PartialEq)]
pub enum QuickStep<T> {
    /// The last element of `[low, high]` becomes the pivot.
    PivotSelected {
        low: usize,
        high: usize,
        identity: Identity,
        pivot: T,
    },
    /// `value` at `position` was tested against the pivot.
    Compare {
        position: usize,
        identity: Identity,
        value: T,
        pivot: T,
        less: bool,
    },
    /// Elements at `a` and `b` traded places; `values` are from before the swap.
    Swap {
        a: usize,
        b: usize,
        identities: (Identity, Identity),
        values: (T, T),
    },
    /// The element at `position` will not move again.
    PositionFinalized {
        position: usize,
        identity: Identity,
        value: T,
    },
}

impl<T> QuickStep<T> {
    pub fn kind(&self) -> &'static str {
        match self {
            QuickStep::PivotSelected { .. } => "pivot_selected",
            QuickStep::Compare { .. } => "compare",
            QuickStep::Swap { .. } => "swap",
            QuickStep::PositionFinalized { .. } => "position_finalized",
        }
    }

    pub fn is_comparison(&self) -> bool {
        matches!(self, QuickStep::Compare { .. })
    }

    pub fn is_mutation(&self) -> bool {
        matches!(self, QuickStep::Swap { .. })
    }

    pub fn apply(&self, state: &mut ReplayState) {
        if let QuickStep::Swap { a, b, .. } = self {
            state.swap(*a, *b);
        }
    }
}

impl<T: fmt::Display> fmt::Display for QuickStep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuickStep::PivotSelected {
                low, high, pivot, ..
            } => write!(f, "Pivot = {pivot} (index {high}, range [{low}, {high}])"),
            QuickStep::Compare {
                value, pivot, less, ..
            } => write!(f, "Is {value} < pivot {pivot}? {}", if *less { "yes" } else { "no" }),
            QuickStep::Swap {
                a, b, values: (x, y), ..
            } => write!(f, "Swap {x} (index {a}) <-> {y} (index {b})"),
            QuickStep::PositionFinalized {
                position, value, ..
            } => write!(f, "{value} is in its final position {position}"),
        }
    }
}

/// Record a Lomuto quicksort of `data`.
pub fn record<T: PartialOrd + Clone>(data: &[T]) -> Result<Recording<T>, SortError> {
    ensure_comparable(data)?;

    if data.len() <= 1 {
        let steps = vec![Step::AlreadySorted { len: data.len() }];
        return Ok(Recording::new(Algorithm::Quick, data.to_vec(), steps));
    }

    let mut recorder = QuickRecorder {
        work: Tracked::new(data),
        steps: Vec::new(),
    };
    recorder.sort_range(0, data.len() - 1);
    recorder.steps.push(Step::Done);

    Ok(Recording::new(Algorithm::Quick, data.to_vec(), recorder.steps))
}

struct QuickRecorder<T> {
    work: Tracked<T>,
    steps: Vec<Step<T>>,
}

impl<T: PartialOrd + Clone> QuickRecorder<T> {
    fn push(&mut self, step: QuickStep<T>) {
        self.steps.push(Step::Quick(step));
    }

    fn sort_range(&mut self, low: usize, high: usize) {
        if low == high {
            self.finalize(low);
            return;
        }

        let pivot_pos = self.partition(low, high);
        if pivot_pos > low {
            self.sort_range(low, pivot_pos - 1);
        }
        if pivot_pos < high {
            self.sort_range(pivot_pos + 1, high);
        }
    }

    fn partition(&mut self, low: usize, high: usize) -> usize {
        let (pivot_id, pivot) = self.work.entry(high);
        self.push(QuickStep::PivotSelected {
            low,
            high,
            identity: pivot_id,
            pivot: pivot.clone(),
        });

        let mut boundary = low;
        for j in low..high {
            let (identity, value) = self.work.entry(j);
            let less = value < pivot;
            self.push(QuickStep::Compare {
                position: j,
                identity,
                value,
                pivot: pivot.clone(),
                less,
            });
            if less {
                if boundary != j {
                    self.swap(boundary, j);
                }
                boundary += 1;
            }
        }

        if boundary != high {
            self.swap(boundary, high);
        }
        self.finalize(boundary);
        boundary
    }

    fn swap(&mut self, a: usize, b: usize) {
        let (id_a, value_a) = self.work.entry(a);
        let (id_b, value_b) = self.work.entry(b);
        self.push(QuickStep::Swap {
            a,
            b,
            identities: (id_a, id_b),
            values: (value_a, value_b),
        });
        self.work.swap(a, b);
    }

    fn finalize(&mut self, position: usize) {
        let (identity, value) = self.work.entry(position);
        self.push(QuickStep::PositionFinalized {
            position,
            identity,
            value,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quick_sort;

    fn quick_steps<T: Clone>(recording: &Recording<T>) -> Vec<QuickStep<T>> {
        recording
            .iter()
            .filter_map(|s| match s {
                Step::Quick(q) => Some(q.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_first_pivot_is_last_element() {
        let recording = record(&[5, 3, 8, 4, 2]).unwrap();
        match &recording.steps()[0] {
            Step::Quick(QuickStep::PivotSelected {
                low,
                high,
                identity,
                pivot,
            }) => {
                assert_eq!((*low, *high), (0, 4));
                assert_eq!(*pivot, 2);
                assert_eq!(*identity, Identity::new(4));
            }
            other => panic!("unexpected first step {other:?}"),
        }
        assert_eq!(recording.replay(), vec![2, 3, 4, 5, 8]);
    }

    #[test]
    fn test_every_position_finalized_once() {
        let data = [9, 1, 8, 2, 7, 3, 6, 4, 5, 5];
        let recording = record(&data).unwrap();

        let mut finalized: Vec<usize> = quick_steps(&recording)
            .iter()
            .filter_map(|s| match s {
                QuickStep::PositionFinalized { position, .. } => Some(*position),
                _ => None,
            })
            .collect();
        finalized.sort();
        assert_eq!(finalized, (0..data.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_swap_identities_match_values() {
        let data = [40, 10, 30, 20];
        let recording = record(&data).unwrap();
        for step in quick_steps(&recording) {
            if let QuickStep::Swap {
                identities: (ia, ib),
                values: (va, vb),
                ..
            } = step
            {
                assert_eq!(*recording.value_of(ia), va);
                assert_eq!(*recording.value_of(ib), vb);
            }
        }
    }

    #[test]
    fn test_sorted_input_makes_quadratic_comparisons() {
        let data: Vec<u32> = (0..50).collect();
        let recording = record(&data).unwrap();
        assert_eq!(recording.comparisons(), 50 * 49 / 2);
        assert_eq!(recording.mutations(), 0);
    }

    #[test]
    fn test_replay_matches_engine() {
        let data = vec![3, 3, 1, 9, 0, 3, 7, 7, 2];
        let mut expected = data.clone();
        quick_sort::sort(&mut expected).unwrap();
        assert_eq!(record(&data).unwrap().replay(), expected);
    }

    #[test]
    fn test_narration() {
        let recording = record(&[5, 3, 8, 4, 2]).unwrap();
        assert_eq!(
            recording.steps()[0].to_string(),
            "Pivot = 2 (index 4, range [0, 4])"
        );
        assert_eq!(recording.steps()[1].to_string(), "Is 5 < pivot 2? no");
    }
}
