//! Benchmark Input Shapes
//!
//! The ten array shapes every benchmark run uses, ordered roughly from easy to
//! hard for quicksort. Generators take the RNG as an argument, so a run is
//! reproduced by reusing its seed.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::algorithm::Algorithm;
use crate::error::SortError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputShape {
    RandomIntegers,
    Sorted,
    ReverseSorted,
    AllIdentical,
    TwoDistinctValues,
    NearlySorted,
    PipeOrgan,
    ManyDuplicates,
    RotatedSorted,
    RandomFloats,
}

impl InputShape {
    pub const ALL: [InputShape; 10] = [
        InputShape::RandomIntegers,
        InputShape::Sorted,
        InputShape::ReverseSorted,
        InputShape::AllIdentical,
        InputShape::TwoDistinctValues,
        InputShape::NearlySorted,
        InputShape::PipeOrgan,
        InputShape::ManyDuplicates,
        InputShape::RotatedSorted,
        InputShape::RandomFloats,
    ];

    /// Command-line name of the shape.
    pub fn slug(self) -> &'static str {
        match self {
            InputShape::RandomIntegers => "random",
            InputShape::Sorted => "sorted",
            InputShape::ReverseSorted => "reverse",
            InputShape::AllIdentical => "identical",
            InputShape::TwoDistinctValues => "two-values",
            InputShape::NearlySorted => "nearly-sorted",
            InputShape::PipeOrgan => "pipe-organ",
            InputShape::ManyDuplicates => "duplicates",
            InputShape::RotatedSorted => "rotated",
            InputShape::RandomFloats => "floats",
        }
    }

    /// Numbered, human-readable label used in report tables.
    pub fn label(self) -> &'static str {
        match self {
            InputShape::RandomIntegers => "1. Random integers",
            InputShape::Sorted => "2. Already sorted",
            InputShape::ReverseSorted => "3. Reverse sorted",
            InputShape::AllIdentical => "4. All identical",
            InputShape::TwoDistinctValues => "5. Two distinct values",
            InputShape::NearlySorted => "6. Nearly sorted (1% swaps)",
            InputShape::PipeOrgan => "7. Pipe-organ (mountain)",
            InputShape::ManyDuplicates => "8. Random with many duplicates",
            InputShape::RotatedSorted => "9. Rotated sorted array",
            InputShape::RandomFloats => "10. Random floats [0, 1)",
        }
    }

    /// Expected difficulty of this shape for `algorithm`.
    pub fn note(self, algorithm: Algorithm) -> &'static str {
        use InputShape::*;

        match (algorithm, self) {
            (Algorithm::Quick, RandomIntegers) => "Easy: pivot lands near middle on average",
            (Algorithm::Quick, Sorted) => "Hard: pivot always smallest, O(n^2) depth",
            (Algorithm::Quick, ReverseSorted) => "Hard: pivot always largest, O(n^2) depth",
            (Algorithm::Quick, AllIdentical) => "Hard: every partition is maximally unbalanced",
            (Algorithm::Quick, TwoDistinctValues) => "Hard: large runs of equal elements",
            (Algorithm::Quick, NearlySorted) => "Medium: mostly ordered with a few disruptions",
            (Algorithm::Quick, PipeOrgan) => "Medium: sorted up then sorted down",
            (Algorithm::Quick, ManyDuplicates) => "Medium-hard: only 10 distinct values",
            (Algorithm::Quick, RotatedSorted) => "Medium: sorted array shifted by n/3",
            (Algorithm::Quick, RandomFloats) => "Easy-medium: uniform values, good pivots",

            (Algorithm::Heap, RandomIntegers) => "Medium: heap jumps around memory randomly",
            (Algorithm::Heap, Sorted) => "Medium: build-heap phase does extra work",
            (Algorithm::Heap, ReverseSorted) => "Easy: input is already a max-heap",
            (Algorithm::Heap, AllIdentical) => "Easy: every heapify returns immediately",
            (Algorithm::Heap, TwoDistinctValues) => "Easy: very few swaps needed in heapify",
            (Algorithm::Heap, NearlySorted) => "Medium: heap must fix a mostly-sorted input",
            (Algorithm::Heap, PipeOrgan) => "Medium: descending half is already heap-like",
            (Algorithm::Heap, ManyDuplicates) => "Easy: heapify short-circuits on equal values",
            (Algorithm::Heap, RotatedSorted) => "Medium: similar to sorted, cache unfriendly",
            (Algorithm::Heap, RandomFloats) => "Medium: same as random integers in practice",

            (Algorithm::Merge, RandomIntegers) => "Easy: splits are balanced on average",
            (Algorithm::Merge, Sorted) => "Easy: merge step barely does any work",
            (Algorithm::Merge, ReverseSorted) => "Easy: still O(n log n), no worst case here",
            (Algorithm::Merge, AllIdentical) => "Easy: left element always wins the merge",
            (Algorithm::Merge, TwoDistinctValues) => "Easy: merges are fast with only 2 values",
            (Algorithm::Merge, NearlySorted) => "Easy: very few inversions to resolve",
            (Algorithm::Merge, PipeOrgan) => "Medium: merge of two sorted halves is clean",
            (Algorithm::Merge, ManyDuplicates) => "Easy: duplicates don't hurt merging",
            (Algorithm::Merge, RotatedSorted) => "Easy: still O(n log n) regardless of order",
            (Algorithm::Merge, RandomFloats) => "Easy: uniform distribution, typical case",

            (Algorithm::Bucket, RandomIntegers) => "Easy: values spread across buckets",
            (Algorithm::Bucket, Sorted) => "Easy: one value per bucket",
            (Algorithm::Bucket, ReverseSorted) => "Easy: one value per bucket",
            (Algorithm::Bucket, AllIdentical) => "Hard: every value collides, O(n^2)",
            (Algorithm::Bucket, TwoDistinctValues) => "Hard: two crowded buckets",
            (Algorithm::Bucket, NearlySorted) => "Easy: one value per bucket",
            (Algorithm::Bucket, PipeOrgan) => "Easy: at most two values per bucket",
            (Algorithm::Bucket, ManyDuplicates) => "Hard: ten crowded buckets",
            (Algorithm::Bucket, RotatedSorted) => "Easy: one value per bucket",
            (Algorithm::Bucket, RandomFloats) => "Easy: the uniform case bucket sort assumes",
        }
    }

    /// Generate `n` values of this shape.
    pub fn generate<R: Rng>(self, n: usize, rng: &mut R) -> Vec<f64> {
        match self {
            InputShape::RandomIntegers => {
                (0..n).map(|_| rng.gen_range(0..=100_000u32) as f64).collect()
            }
            InputShape::Sorted => (0..n).map(|v| v as f64).collect(),
            InputShape::ReverseSorted => (1..=n).rev().map(|v| v as f64).collect(),
            InputShape::AllIdentical => vec![42.0; n],
            InputShape::TwoDistinctValues => {
                (0..n).map(|_| if rng.gen_bool(0.5) { 1.0 } else { 0.0 }).collect()
            }
            InputShape::NearlySorted => {
                let mut values: Vec<f64> = (0..n).map(|v| v as f64).collect();
                if n > 0 {
                    for _ in 0..n / 100 {
                        let i = rng.gen_range(0..n);
                        let j = rng.gen_range(0..n);
                        values.swap(i, j);
                    }
                }
                values
            }
            InputShape::PipeOrgan => {
                let half = n / 2;
                (0..half)
                    .chain((1..=n - half).rev())
                    .map(|v| v as f64)
                    .collect()
            }
            InputShape::ManyDuplicates => (0..n).map(|_| rng.gen_range(0..=9u32) as f64).collect(),
            InputShape::RotatedSorted => {
                let mut values: Vec<f64> = (0..n).map(|v| v as f64).collect();
                values.rotate_left(n / 3);
                values
            }
            InputShape::RandomFloats => (0..n).map(|_| rng.gen::<f64>()).collect(),
        }
    }
}

impl fmt::Display for InputShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InputShape {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        InputShape::ALL
            .into_iter()
            .find(|shape| shape.slug() == wanted)
            .ok_or_else(|| SortError::UnknownShape(s.to_string()))
    }
}

/// Map finite values into `[0, 1)` so bucket sort can accept them.
///
/// Input already inside `[0, 1)` is returned unchanged. Otherwise each value
/// becomes `(v - min) / (max - min + 1)`, which keeps the order and the
/// duplicate structure of the shape.
pub fn to_unit_interval(values: &[f64]) -> Vec<f64> {
    if values.iter().all(|v| (0.0..1.0).contains(v)) {
        return values.to_vec();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min + 1.0;
    values.iter().map(|v| (v - min) / span).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_every_shape_has_requested_length() {
        let mut rng = StdRng::seed_from_u64(42);
        for shape in InputShape::ALL {
            assert_eq!(shape.generate(1001, &mut rng).len(), 1001, "{shape}");
            assert!(shape.generate(0, &mut rng).is_empty());
        }
    }

    #[test]
    fn test_deterministic_shapes() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(InputShape::Sorted.generate(4, &mut rng), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(
            InputShape::ReverseSorted.generate(4, &mut rng),
            vec![4.0, 3.0, 2.0, 1.0]
        );
        assert_eq!(
            InputShape::PipeOrgan.generate(6, &mut rng),
            vec![0.0, 1.0, 2.0, 3.0, 2.0, 1.0]
        );
        assert_eq!(
            InputShape::RotatedSorted.generate(6, &mut rng),
            vec![2.0, 3.0, 4.0, 5.0, 0.0, 1.0]
        );
        assert_eq!(InputShape::AllIdentical.generate(3, &mut rng), vec![42.0; 3]);
    }

    #[test]
    fn test_same_seed_same_values() {
        for shape in InputShape::ALL {
            let a = shape.generate(200, &mut StdRng::seed_from_u64(7));
            let b = shape.generate(200, &mut StdRng::seed_from_u64(7));
            assert_eq!(a, b, "{shape}");
        }
    }

    #[test]
    fn test_nearly_sorted_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut values = InputShape::NearlySorted.generate(5000, &mut rng);
        let displaced = values
            .iter()
            .enumerate()
            .filter(|&(i, &v)| i as f64 != v)
            .count();
        assert!(displaced <= 2 * 50);

        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(values, (0..5000).map(|v| v as f64).collect::<Vec<_>>());
    }

    #[test]
    fn test_value_domains() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(InputShape::TwoDistinctValues
            .generate(500, &mut rng)
            .iter()
            .all(|&v| v == 0.0 || v == 1.0));
        assert!(InputShape::ManyDuplicates
            .generate(500, &mut rng)
            .iter()
            .all(|&v| (0.0..=9.0).contains(&v) && v.fract() == 0.0));
        assert!(InputShape::RandomFloats
            .generate(500, &mut rng)
            .iter()
            .all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn test_to_unit_interval() {
        let mapped = to_unit_interval(&[42.0, 42.0]);
        assert_eq!(mapped, vec![0.0, 0.0]);

        let mapped = to_unit_interval(&[3.0, 0.0, 1.0]);
        assert_eq!(mapped, vec![0.75, 0.0, 0.25]);

        let floats = vec![0.5, 0.25];
        assert_eq!(to_unit_interval(&floats), floats);
        assert!(to_unit_interval(&[]).is_empty());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("pipe_organ".parse::<InputShape>().unwrap(), InputShape::PipeOrgan);
        for shape in InputShape::ALL {
            assert_eq!(shape.slug().parse::<InputShape>().unwrap(), shape);
        }
        assert!("zigzag".parse::<InputShape>().is_err());
    }
}
