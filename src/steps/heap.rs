//! Heapsort step recorder.

use std::fmt;

use super::{Identity, Recording, ReplayState, Step, Tracked};
use crate::algorithm::Algorithm;
use crate::error::{ensure_comparable, SortError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapPhase {
    /// Bottom-up max-heap construction.
    Build,
    /// Repeatedly moving the root behind the shrinking heap.
    Extract,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HeapStep<T> {
    Phase(HeapPhase),
    /// `node` was checked against its children inside the first `heap_size`
    /// elements; `largest` is the winner and `value` its value.
    CompareChildren {
        heap_size: usize,
        node: usize,
        left: Option<usize>,
        right: Option<usize>,
        largest: usize,
        value: T,
    },
    /// Parent and child traded places; `values` are from before the swap.
    Swap {
        a: usize,
        b: usize,
        identities: (Identity, Identity),
        values: (T, T),
    },
    /// The subtree rooted at `node` is a valid max-heap.
    SubtreeSatisfied { heap_size: usize, node: usize },
    /// The root (maximum) was swapped into its final `position`.
    ExtractMax {
        position: usize,
        identity: Identity,
        value: T,
    },
}

impl<T> HeapStep<T> {
    pub fn kind(&self) -> &'static str {
        match self {
            HeapStep::Phase(_) => "phase",
            HeapStep::CompareChildren { .. } => "compare_children",
            HeapStep::Swap { .. } => "swap",
            HeapStep::SubtreeSatisfied { .. } => "subtree_satisfied",
            HeapStep::ExtractMax { .. } => "extract_max",
        }
    }

    /// Leaf checks compare nothing and do not count.
    pub fn is_comparison(&self) -> bool {
        matches!(self, HeapStep::CompareChildren { left: Some(_), .. })
    }

    pub fn is_mutation(&self) -> bool {
        matches!(self, HeapStep::Swap { .. } | HeapStep::ExtractMax { .. })
    }

    pub fn apply(&self, state: &mut ReplayState) {
        match self {
            HeapStep::Swap { a, b, .. } => state.swap(*a, *b),
            HeapStep::ExtractMax { position, .. } => state.swap(0, *position),
            _ => {}
        }
    }
}

impl<T: fmt::Display> fmt::Display for HeapStep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapStep::Phase(HeapPhase::Build) => write!(f, "Phase 1: build max-heap (bottom-up)"),
            HeapStep::Phase(HeapPhase::Extract) => write!(f, "Phase 2: extract elements one by one"),
            HeapStep::CompareChildren {
                node,
                largest,
                value,
                ..
            } => write!(f, "Heapify node {node}: largest is node {largest} (value {value})"),
            HeapStep::Swap {
                values: (x, y), ..
            } => write!(f, "Swap {x} <-> {y}"),
            HeapStep::SubtreeSatisfied { node, .. } => {
                write!(f, "Node {node} satisfies the heap property")
            }
            HeapStep::ExtractMax {
                position, value, ..
            } => write!(f, "Move max {value} to sorted position {position}"),
        }
    }
}

/// Record a heapsort of `data`.
pub fn record<T: PartialOrd + Clone>(data: &[T]) -> Result<Recording<T>, SortError> {
    ensure_comparable(data)?;

    let n = data.len();
    if n <= 1 {
        let steps = vec![Step::AlreadySorted { len: n }];
        return Ok(Recording::new(Algorithm::Heap, data.to_vec(), steps));
    }

    let mut recorder = HeapRecorder {
        work: Tracked::new(data),
        steps: Vec::new(),
    };

    recorder.push(HeapStep::Phase(HeapPhase::Build));
    for node in (0..n / 2).rev() {
        recorder.sift_down(n, node);
    }

    recorder.push(HeapStep::Phase(HeapPhase::Extract));
    for end in (1..n).rev() {
        recorder.extract(end);
        if end > 1 {
            recorder.sift_down(end, 0);
        }
    }
    recorder.steps.push(Step::Done);

    Ok(Recording::new(Algorithm::Heap, data.to_vec(), recorder.steps))
}

struct HeapRecorder<T> {
    work: Tracked<T>,
    steps: Vec<Step<T>>,
}

impl<T: PartialOrd + Clone> HeapRecorder<T> {
    fn push(&mut self, step: HeapStep<T>) {
        self.steps.push(Step::Heap(step));
    }

    fn sift_down(&mut self, heap_size: usize, mut node: usize) {
        loop {
            let left = Some(2 * node + 1).filter(|&l| l < heap_size);
            let right = Some(2 * node + 2).filter(|&r| r < heap_size);

            let mut largest = node;
            for child in left.into_iter().chain(right) {
                if self.work.value(child) > self.work.value(largest) {
                    largest = child;
                }
            }

            self.push(HeapStep::CompareChildren {
                heap_size,
                node,
                left,
                right,
                largest,
                value: self.work.value(largest).clone(),
            });

            if largest == node {
                self.push(HeapStep::SubtreeSatisfied { heap_size, node });
                return;
            }

            let (id_a, value_a) = self.work.entry(node);
            let (id_b, value_b) = self.work.entry(largest);
            self.push(HeapStep::Swap {
                a: node,
                b: largest,
                identities: (id_a, id_b),
                values: (value_a, value_b),
            });
            self.work.swap(node, largest);
            node = largest;
        }
    }

    fn extract(&mut self, position: usize) {
        let (identity, value) = self.work.entry(0);
        self.push(HeapStep::ExtractMax {
            position,
            identity,
            value,
        });
        self.work.swap(0, position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap_sort;

    #[test]
    fn test_phases_in_order() {
        let recording = record(&[3, 1, 2]).unwrap();
        let phases: Vec<HeapPhase> = recording
            .iter()
            .filter_map(|s| match s {
                Step::Heap(HeapStep::Phase(p)) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(phases, vec![HeapPhase::Build, HeapPhase::Extract]);
        assert_eq!(recording.steps()[0].kind(), "phase");
    }

    #[test]
    fn test_extractions_visit_every_tail_position() {
        let data = [6, 2, 9, 4, 1, 8, 3];
        let recording = record(&data).unwrap();
        let positions: Vec<usize> = recording
            .iter()
            .filter_map(|s| match s {
                Step::Heap(HeapStep::ExtractMax { position, .. }) => Some(*position),
                _ => None,
            })
            .collect();
        assert_eq!(positions, vec![6, 5, 4, 3, 2, 1]);

        let extracted: Vec<i32> = recording
            .iter()
            .filter_map(|s| match s {
                Step::Heap(HeapStep::ExtractMax { value, .. }) => Some(*value),
                _ => None,
            })
            .collect();
        assert_eq!(extracted, vec![9, 8, 6, 4, 3, 2]);
    }

    #[test]
    fn test_constant_input_never_swaps() {
        let recording = record(&[7; 9]).unwrap();
        assert!(!recording
            .iter()
            .any(|s| matches!(s, Step::Heap(HeapStep::Swap { .. }))));
    }

    #[test]
    fn test_replay_matches_engine() {
        let data = vec![5, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5];
        let mut expected = data.clone();
        heap_sort::sort(&mut expected).unwrap();
        assert_eq!(record(&data).unwrap().replay(), expected);
    }
}
