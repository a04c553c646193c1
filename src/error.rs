//! Error types shared by the sort engines, the step recorder and the CLI.

use thiserror::Error;

/// Why an input sequence cannot be sorted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    /// Bucket sort only accepts values in `[0, 1)`.
    #[error("value {value} at index {index} is outside [0, 1)")]
    OutOfRange { index: usize, value: f64 },

    /// The element does not compare equal to itself (NaN and friends).
    #[error("value at index {index} is not comparable")]
    Incomparable { index: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SortError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("unknown algorithm '{0}' (expected bucket, heap, merge or quick)")]
    UnknownAlgorithm(String),

    #[error("unknown input shape '{0}'")]
    UnknownShape(String),
}

impl SortError {
    /// True for precondition violations on the sequence itself.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, SortError::InvalidInput(_))
    }
}

/// Reject any element that is not comparable with itself.
///
/// Runs before an engine touches the slice so a failed sort leaves the
/// caller's data as it was.
pub fn ensure_comparable<T: PartialOrd>(data: &[T]) -> Result<(), SortError> {
    match data.iter().position(|v| v.partial_cmp(v).is_none()) {
        Some(index) => Err(InvalidInput::Incomparable { index }.into()),
        None => Ok(()),
    }
}

/// Reject anything bucket sort cannot place: NaN, negatives, and `>= 1.0`.
pub fn ensure_unit_interval(data: &[f64]) -> Result<(), SortError> {
    ensure_comparable(data)?;
    match data.iter().position(|v| !(0.0..1.0).contains(v)) {
        Some(index) => Err(InvalidInput::OutOfRange {
            index,
            value: data[index],
        }
        .into()),
        None => Ok(()),
    }
}
