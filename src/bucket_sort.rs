//! Bucket Sort Implementation
//!
//! Bucket sort for `f64` values in `[0, 1)`. The range is cut into `n`
//! equal-width buckets, each bucket is insertion-sorted on its own, and the
//! buckets are concatenated back in index order.
//!
//! Complexity: O(n) on average for uniformly distributed input. When every
//! value collides into the same bucket the insertion sort makes it O(n²).

use crate::error::{ensure_unit_interval, SortError};

/// Bucket index for `value` among `buckets` equal-width buckets.
///
/// Clamped to the last bucket so rounding can never produce `buckets`.
#[inline]
pub fn bucket_index(value: f64, buckets: usize) -> usize {
    ((buckets as f64 * value) as usize).min(buckets - 1)
}

/// Sort a slice in-place using bucket sort.
///
/// Fails with `InvalidInput` if any value is NaN or outside `[0, 1)`; the
/// slice is left untouched in that case.
///
/// # Arguments
/// * `data` - The slice to sort in-place
pub fn sort(data: &mut [f64]) -> Result<(), SortError> {
    ensure_unit_interval(data)?;

    let n = data.len();
    if n <= 1 {
        return Ok(());
    }

    let mut buckets: Vec<Vec<f64>> = vec![Vec::new(); n];
    for &value in data.iter() {
        buckets[bucket_index(value, n)].push(value);
    }

    for bucket in buckets.iter_mut() {
        insertion_sort(bucket);
    }

    for (slot, value) in data.iter_mut().zip(buckets.into_iter().flatten()) {
        *slot = value;
    }
    Ok(())
}

/// Shift-based insertion sort used inside each bucket.
pub(crate) fn insertion_sort<T: PartialOrd + Clone>(bucket: &mut [T]) {
    for i in 1..bucket.len() {
        let key = bucket[i].clone();
        let mut j = i;
        while j > 0 && bucket[j - 1] > key {
            bucket[j] = bucket[j - 1].clone();
            j -= 1;
        }
        bucket[j] = key;
    }
}

/// Check if a slice is sorted in ascending order.
#[inline]
pub fn is_sorted(data: &[f64]) -> bool {
    data.windows(2).all(|w| w[0] <= w[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidInput;
    use rand::Rng;

    #[test]
    fn test_sort_empty() {
        let mut data: Vec<f64> = vec![];
        sort(&mut data).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_sort_single() {
        let mut data = vec![0.5];
        sort(&mut data).unwrap();
        assert_eq!(data, vec![0.5]);
    }

    #[test]
    fn test_sort_ten_values() {
        let mut data = vec![0.78, 0.17, 0.39, 0.26, 0.72, 0.94, 0.21, 0.12, 0.23, 0.68];
        sort(&mut data).unwrap();
        assert_eq!(
            data,
            vec![0.12, 0.17, 0.21, 0.23, 0.26, 0.39, 0.68, 0.72, 0.78, 0.94]
        );
    }

    #[test]
    fn test_bucket_index_in_range() {
        let mut rng = rand::thread_rng();
        for n in 1..64 {
            for _ in 0..100 {
                let v: f64 = rng.gen();
                assert!(bucket_index(v, n) < n);
            }
            assert_eq!(bucket_index(0.0, n), 0);
            assert_eq!(bucket_index(1.0 - f64::EPSILON, n), n - 1);
        }
    }

    #[test]
    fn test_all_values_in_one_bucket() {
        let mut data = vec![0.109, 0.105, 0.101, 0.108, 0.102, 0.1, 0.107, 0.103, 0.104, 0.106];
        sort(&mut data).unwrap();
        assert!(is_sorted(&data));
        assert_eq!(data[0], 0.1);
    }

    #[test]
    fn test_sort_random() {
        let mut rng = rand::thread_rng();
        let mut data: Vec<f64> = (0..5000).map(|_| rng.gen()).collect();
        let mut expected = data.clone();
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());

        sort(&mut data).unwrap();
        assert_eq!(data, expected);
    }

    #[test]
    fn test_sort_rejects_out_of_range() {
        let mut data = vec![0.3, 1.0, 0.1];
        let err = sort(&mut data).unwrap_err();
        assert_eq!(
            err,
            SortError::InvalidInput(InvalidInput::OutOfRange { index: 1, value: 1.0 })
        );
        assert_eq!(data, vec![0.3, 1.0, 0.1]);
    }

    #[test]
    fn test_insertion_sort() {
        let mut data = vec![4, 1, 3, 1, 2];
        insertion_sort(&mut data);
        assert_eq!(data, vec![1, 1, 2, 3, 4]);
    }
}
