//! Bucket sort step recorder.
//!
//! Buckets hold identities rather than values, so every shift inside a bucket
//! and every gather back into the array names the element it moves.

use std::fmt;

use super::{Identity, Recording, ReplayState, Step};
use crate::algorithm::Algorithm;
use crate::bucket_sort::bucket_index;
use crate::error::{ensure_unit_interval, SortError};

#[derive(Debug, Clone, PartialEq)]
pub enum BucketStep<T> {
    AssignToBucket {
        identity: Identity,
        value: T,
        bucket: usize,
    },
    /// The element at `slot` was compared with the key being inserted;
    /// `shifts` is true when it is greater and has to move right.
    InsertionCompare {
        bucket: usize,
        slot: usize,
        identity: Identity,
        value: T,
        key: Identity,
        key_value: T,
        shifts: bool,
    },
    InsertionShift {
        bucket: usize,
        from: usize,
        to: usize,
        identity: Identity,
    },
    InsertionPlace {
        bucket: usize,
        slot: usize,
        identity: Identity,
    },
    /// `bucket[slot]` is copied back to `destination` in the array.
    Gather {
        bucket: usize,
        slot: usize,
        destination: usize,
        identity: Identity,
        value: T,
    },
}

impl<T> BucketStep<T> {
    pub fn kind(&self) -> &'static str {
        match self {
            BucketStep::AssignToBucket { .. } => "assign_to_bucket",
            BucketStep::InsertionCompare { .. } => "insertion_compare",
            BucketStep::InsertionShift { .. } => "insertion_shift",
            BucketStep::InsertionPlace { .. } => "insertion_place",
            BucketStep::Gather { .. } => "gather",
        }
    }

    pub fn is_comparison(&self) -> bool {
        matches!(self, BucketStep::InsertionCompare { .. })
    }

    pub fn is_mutation(&self) -> bool {
        !self.is_comparison()
    }

    pub fn apply(&self, state: &mut ReplayState) {
        match *self {
            BucketStep::AssignToBucket {
                identity, bucket, ..
            } => state.push_to_bucket(bucket, identity),
            BucketStep::InsertionShift {
                bucket, from, to, ..
            } => state.shift_in_bucket(bucket, from, to),
            BucketStep::InsertionPlace {
                bucket,
                slot,
                identity,
            } => state.place_in_bucket(bucket, slot, identity),
            BucketStep::Gather {
                destination,
                identity,
                ..
            } => state.place(destination, identity),
            BucketStep::InsertionCompare { .. } => {}
        }
    }
}

impl<T: fmt::Display> fmt::Display for BucketStep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketStep::AssignToBucket { value, bucket, .. } => {
                write!(f, "{value} -> bucket {bucket}")
            }
            BucketStep::InsertionCompare {
                value,
                key_value,
                shifts: true,
                ..
            } => write!(f, "{value} > {key_value}, shift right"),
            BucketStep::InsertionCompare {
                value,
                key_value,
                shifts: false,
                ..
            } => write!(f, "{value} <= {key_value}, stop"),
            BucketStep::InsertionShift {
                bucket, from, to, ..
            } => write!(f, "Bucket {bucket}: shift slot {from} -> {to}"),
            BucketStep::InsertionPlace { bucket, slot, .. } => {
                write!(f, "Bucket {bucket}: place key at slot {slot}")
            }
            BucketStep::Gather {
                bucket,
                slot,
                destination,
                value,
                ..
            } => write!(f, "Bucket {bucket}[{slot}] ({value}) -> position {destination}"),
        }
    }
}

/// Record a bucket sort of `data`. Every value must lie in `[0, 1)`.
pub fn record(data: &[f64]) -> Result<Recording<f64>, SortError> {
    ensure_unit_interval(data)?;

    let n = data.len();
    if n <= 1 {
        let steps = vec![Step::AlreadySorted { len: n }];
        return Ok(Recording::new(Algorithm::Bucket, data.to_vec(), steps));
    }

    let mut steps = Vec::new();
    let mut buckets: Vec<Vec<Identity>> = vec![Vec::new(); n];

    for (index, &value) in data.iter().enumerate() {
        let identity = Identity::new(index);
        let bucket = bucket_index(value, n);
        steps.push(Step::Bucket(BucketStep::AssignToBucket {
            identity,
            value,
            bucket,
        }));
        buckets[bucket].push(identity);
    }

    for (bucket, slots) in buckets.iter_mut().enumerate() {
        insertion_sort(data, bucket, slots, &mut steps);
    }

    let mut destination = 0;
    for (bucket, slots) in buckets.iter().enumerate() {
        for (slot, &identity) in slots.iter().enumerate() {
            steps.push(Step::Bucket(BucketStep::Gather {
                bucket,
                slot,
                destination,
                identity,
                value: data[identity.index()],
            }));
            destination += 1;
        }
    }
    steps.push(Step::Done);

    Ok(Recording::new(Algorithm::Bucket, data.to_vec(), steps))
}

fn insertion_sort(data: &[f64], bucket: usize, slots: &mut [Identity], steps: &mut Vec<Step<f64>>) {
    for i in 1..slots.len() {
        let key = slots[i];
        let key_value = data[key.index()];
        let mut j = i;

        while j > 0 {
            let identity = slots[j - 1];
            let value = data[identity.index()];
            let shifts = value > key_value;
            steps.push(Step::Bucket(BucketStep::InsertionCompare {
                bucket,
                slot: j - 1,
                identity,
                value,
                key,
                key_value,
                shifts,
            }));
            if !shifts {
                break;
            }

            slots[j] = identity;
            steps.push(Step::Bucket(BucketStep::InsertionShift {
                bucket,
                from: j - 1,
                to: j,
                identity,
            }));
            j -= 1;
        }

        slots[j] = key;
        steps.push(Step::Bucket(BucketStep::InsertionPlace {
            bucket,
            slot: j,
            identity: key,
        }));
    }
}
