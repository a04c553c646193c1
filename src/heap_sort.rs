//! Heapsort Implementation
//!
//! Classic two-phase heapsort on an implicit binary max-heap:
//!
//! 1. **Build**: sift down every internal node from `n / 2 - 1` to `0`.
//! 2. **Extract**: swap the root with the last element of the heap region,
//!    shrink the region by one and sift the new root down.
//!
//! Complexity: O(n log n) for every input shape, O(1) auxiliary memory.
//! Not stable.

use crate::error::{ensure_comparable, SortError};

/// Sort a slice in-place using heapsort.
///
/// # Arguments
/// * `data` - The slice to sort in-place
pub fn sort<T: PartialOrd>(data: &mut [T]) -> Result<(), SortError> {
    ensure_comparable(data)?;

    let n = data.len();
    for node in (0..n / 2).rev() {
        sift_down(data, n, node);
    }

    for end in (1..n).rev() {
        data.swap(0, end);
        sift_down(data, end, 0);
    }
    Ok(())
}

/// Restore the max-heap property for the subtree rooted at `node`, looking
/// only at the first `heap_size` elements.
pub(crate) fn sift_down<T: PartialOrd>(data: &mut [T], heap_size: usize, mut node: usize) {
    loop {
        let largest = largest_of_family(data, heap_size, node);
        if largest == node {
            return;
        }
        data.swap(node, largest);
        node = largest;
    }
}

/// Index of the largest among `node` and its children inside the heap.
///
/// Ties keep the parent, so equal children never trigger a swap.
#[inline]
pub(crate) fn largest_of_family<T: PartialOrd>(data: &[T], heap_size: usize, node: usize) -> usize {
    let left = 2 * node + 1;
    let right = 2 * node + 2;

    let mut largest = node;
    if left < heap_size && data[left] > data[largest] {
        largest = left;
    }
    if right < heap_size && data[right] > data[largest] {
        largest = right;
    }
    largest
}

/// Check if a slice is sorted in ascending order.
#[inline]
pub fn is_sorted<T: PartialOrd>(data: &[T]) -> bool {
    data.windows(2).all(|w| w[0] <= w[1])
}
