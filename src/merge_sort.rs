//! Mergesort Implementation
//!
//! Top-down recursive mergesort. Each range `[low, high]` is split at the
//! floored midpoint, both halves are sorted, then merged through copies of the
//! two runs.
//!
//! The merge takes from the left run whenever `left <= right`. Taking from the
//! left on ties is what makes this sort stable.
//!
//! Complexity: O(n log n) for every input shape, O(n) auxiliary memory.

use crate::error::{ensure_comparable, SortError};

/// Sort a slice in-place using stable top-down mergesort.
///
/// # Arguments
/// * `data` - The slice to sort in-place
pub fn sort<T: PartialOrd + Clone>(data: &mut [T]) -> Result<(), SortError> {
    ensure_comparable(data)?;
    if data.len() > 1 {
        sort_range(data, 0, data.len() - 1);
    }
    Ok(())
}

fn sort_range<T: PartialOrd + Clone>(data: &mut [T], low: usize, high: usize) {
    if low >= high {
        return;
    }

    let mid = low + (high - low) / 2;
    sort_range(data, low, mid);
    sort_range(data, mid + 1, high);
    merge(data, low, mid, high);
}

/// Merge the sorted runs `[low, mid]` and `[mid + 1, high]`.
fn merge<T: PartialOrd + Clone>(data: &mut [T], low: usize, mid: usize, high: usize) {
    let left = data[low..=mid].to_vec();
    let right = data[mid + 1..=high].to_vec();

    let (mut i, mut j, mut k) = (0, 0, low);
    while i < left.len() && j < right.len() {
        if left[i] <= right[j] {
            data[k] = left[i].clone();
            i += 1;
        } else {
            data[k] = right[j].clone();
            j += 1;
        }
        k += 1;
    }

    for value in left[i..].iter().chain(&right[j..]) {
        data[k] = value.clone();
        k += 1;
    }
}

/// Check if a slice is sorted in ascending order.
#[inline]
pub fn is_sorted<T: PartialOrd>(data: &[T]) -> bool {
    data.windows(2).all(|w| w[0] <= w[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    /// Compares on `key` only so equal keys keep their tag order visible.
    #[derive(Debug, Clone)]
    struct Tagged {
        key: u8,
        tag: usize,
    }

    impl PartialEq for Tagged {
        fn eq(&self, other: &Self) -> bool {
            self.key == other.key
        }
    }

    impl PartialOrd for Tagged {
        fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
            self.key.partial_cmp(&other.key)
        }
    }

    #[test]
    fn test_sort_empty() {
        let mut data: Vec<u32> = vec![];
        sort(&mut data).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_sort_single() {
        let mut data = vec![7u32];
        sort(&mut data).unwrap();
        assert_eq!(data, vec![7]);
    }

    #[test]
    fn test_sort_two() {
        let mut data = vec![2, 1];
        sort(&mut data).unwrap();
        assert_eq!(data, vec![1, 2]);
    }

    #[test]
    fn test_sort_random() {
        let mut rng = rand::thread_rng();
        let mut data: Vec<u32> = (0..5000).map(|_| rng.gen_range(0..100)).collect();
        let mut expected = data.clone();
        expected.sort();

        sort(&mut data).unwrap();
        assert_eq!(data, expected);
    }

    #[test]
    fn test_sort_is_stable() {
        let keys = [3u8, 1, 3, 2, 1, 3, 2, 1];
        let mut data: Vec<Tagged> = keys
            .iter()
            .enumerate()
            .map(|(tag, &key)| Tagged { key, tag })
            .collect();

        sort(&mut data).unwrap();

        let tags: Vec<usize> = data.iter().map(|t| t.tag).collect();
        assert_eq!(tags, vec![1, 4, 7, 3, 6, 0, 2, 5]);
    }

    #[test]
    fn test_sort_floats() {
        let mut data = vec![0.5, -1.25, 3.0, 0.0, -0.0];
        sort(&mut data).unwrap();
        assert!(is_sorted(&data));
    }

    #[test]
    fn test_sort_rejects_nan() {
        let mut data = vec![f64::NAN];
        assert!(sort(&mut data).is_err());
    }
}
