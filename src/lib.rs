//! Classic Sorting
//!
//! Textbook bucket sort, heapsort, mergesort and quicksort, with:
//!
//! - **Step recording**: every comparison and move of a sort run, tagged with
//!   the identity of the element involved, replayable to the sorted output.
//! - **Shape benchmarks**: each algorithm timed on ten input shapes chosen to
//!   expose its best and worst cases.
//! - **Reports**: Links Notation, Markdown and terminal tables.

pub mod algorithm;
pub mod benchmark;
pub mod bucket_sort;
pub mod error;
pub mod heap_sort;
pub mod inputs;
pub mod merge_sort;
pub mod quick_sort;
pub mod report;
pub mod steps;

pub use algorithm::Algorithm;
pub use error::{InvalidInput, SortError};
pub use inputs::InputShape;
pub use steps::{record, Identity, Recording, Step};
