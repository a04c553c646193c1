use super::{Identity, Step};

/// Identity-level state rebuilt by applying steps one after another.
///
/// `sequence` mirrors the array being sorted. Bucket sort also needs the
/// contents of each bucket, which live in `buckets` until they are gathered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayState {
    sequence: Vec<Identity>,
    buckets: Vec<Vec<Identity>>,
}

impl ReplayState {
    pub fn new(len: usize) -> Self {
        ReplayState {
            sequence: (0..len).map(Identity::new).collect(),
            buckets: Vec::new(),
        }
    }

    pub fn sequence(&self) -> &[Identity] {
        &self.sequence
    }

    /// Contents of `bucket`, empty if nothing was assigned to it yet.
    pub fn bucket(&self, bucket: usize) -> &[Identity] {
        self.buckets.get(bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.sequence.swap(a, b);
    }

    pub fn place(&mut self, position: usize, identity: Identity) {
        self.sequence[position] = identity;
    }

    pub fn push_to_bucket(&mut self, bucket: usize, identity: Identity) {
        if self.buckets.len() <= bucket {
            self.buckets.resize_with(bucket + 1, Vec::new);
        }
        self.buckets[bucket].push(identity);
    }

    pub fn shift_in_bucket(&mut self, bucket: usize, from: usize, to: usize) {
        let slots = &mut self.buckets[bucket];
        slots[to] = slots[from];
    }

    pub fn place_in_bucket(&mut self, bucket: usize, slot: usize, identity: Identity) {
        self.buckets[bucket][slot] = identity;
    }

    /// Values of the original input in current sequence order.
    pub fn values<T: Clone>(&self, original: &[T]) -> Vec<T> {
        self.sequence
            .iter()
            .map(|id| original[id.index()].clone())
            .collect()
    }
}

/// The sequence as it stands right after `step` was applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a, T> {
    pub step: &'a Step<T>,
    pub values: Vec<T>,
}

/// One-shot, forward-only iterator of [`Frame`]s over a recording.
pub struct Replay<'a, T> {
    original: &'a [T],
    steps: std::slice::Iter<'a, Step<T>>,
    state: ReplayState,
}

impl<'a, T: Clone> Replay<'a, T> {
    pub(crate) fn new(original: &'a [T], steps: &'a [Step<T>]) -> Self {
        Replay {
            original,
            steps: steps.iter(),
            state: ReplayState::new(original.len()),
        }
    }

    pub fn state(&self) -> &ReplayState {
        &self.state
    }
}

impl<'a, T: Clone> Iterator for Replay<'a, T> {
    type Item = Frame<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let step = self.steps.next()?;
        step.apply(&mut self.state);
        Some(Frame {
            step,
            values: self.state.values(self.original),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.steps.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_buckets() {
        let mut state = ReplayState::new(3);
        state.push_to_bucket(2, Identity::new(0));
        state.push_to_bucket(2, Identity::new(1));
        assert!(state.bucket(0).is_empty());
        assert!(state.bucket(9).is_empty());

        state.shift_in_bucket(2, 0, 1);
        state.place_in_bucket(2, 0, Identity::new(1));
        assert_eq!(state.bucket(2), &[Identity::new(1), Identity::new(0)]);
    }

    #[test]
    fn test_state_values_follow_identities() {
        let mut state = ReplayState::new(3);
        state.swap(0, 2);
        state.place(1, Identity::new(0));
        assert_eq!(state.values(&['a', 'b', 'c']), vec!['c', 'a', 'a']);
    }
}
