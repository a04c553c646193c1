//! Quicksort Implementation
//!
//! Textbook recursive quicksort using the Lomuto partition scheme with the
//! last element of each sub-range as pivot.
//!
//! Complexity: O(n log n) on average, O(n²) when every pivot lands at an end of
//! its range. Already sorted, reverse sorted and constant inputs all hit that
//! worst case. This is kept on purpose: the benchmark shapes exist to show it.

use crate::error::{ensure_comparable, SortError};

/// Sort a slice in-place using Lomuto quicksort.
///
/// Fails with `InvalidInput` before touching the slice if any element is not
/// comparable with itself.
///
/// # Arguments
/// * `data` - The slice to sort in-place
pub fn sort<T: PartialOrd>(data: &mut [T]) -> Result<(), SortError> {
    ensure_comparable(data)?;
    sort_range(data);
    Ok(())
}

/// Recurse into the smaller side and loop on the larger one, so stack depth
/// stays logarithmic even when the comparison count is quadratic.
fn sort_range<T: PartialOrd>(mut data: &mut [T]) {
    // low >= high: zero or one element
    while data.len() > 1 {
        let pivot_pos = partition(data);
        let (left, right) = data.split_at_mut(pivot_pos);
        let right = &mut right[1..];
        if left.len() < right.len() {
            sort_range(left);
            data = right;
        } else {
            sort_range(right);
            data = left;
        }
    }
}

/// Partition around the last element and return the pivot's final index.
///
/// Elements strictly less than the pivot end up left of the returned index.
pub(crate) fn partition<T: PartialOrd>(data: &mut [T]) -> usize {
    let high = data.len() - 1;
    let mut boundary = 0;

    for j in 0..high {
        if data[j] < data[high] {
            data.swap(boundary, j);
            boundary += 1;
        }
    }

    data.swap(boundary, high);
    boundary
}

/// Check if a slice is sorted in ascending order.
#[inline]
pub fn is_sorted<T: PartialOrd>(data: &[T]) -> bool {
    data.windows(2).all(|w| w[0] <= w[1])
}
