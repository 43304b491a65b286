//! Generic algorithms.
//!
//! Every algorithm has a plain version ordering elements with [`Ord`] and a `_by` version
//! taking an `is_less` predicate, which must be a strict weak order. Passing ranges that break
//! an algorithm's precondition (an unsorted input to a merge, a non-heap to `pop_heap`) gives
//! an unspecified, but memory-safe, result.
//!
//! Slices are the random-access ranges of the sort, heap and in-place merge algorithms.
//! Searching and rotation accept any sequence of the [`iter`](crate::iter) tiers; merging and
//! set operations consume input ranges, i.e. iterators.

pub mod base;
pub mod heap;
pub mod merge;
pub mod rotate;
pub mod search;
pub mod set;
pub mod sort;

pub use base::{
    is_sorted, is_sorted_by, lexicographical_compare, lexicographical_compare_by, max, max_by,
    median, median_by, min, min_by,
};
pub use heap::{
    is_heap, is_heap_by, make_heap, make_heap_by, pop_heap, pop_heap_by, push_heap, push_heap_by,
    sort_heap, sort_heap_by,
};
pub use merge::{
    inplace_merge, inplace_merge_by, inplace_merge_in, merge, merge_by, merge_without_buffer,
    Merge,
};
pub use rotate::{reverse, rotate};
pub use search::{
    binary_search, binary_search_by, equal_range, equal_range_by, lower_bound, lower_bound_by,
    upper_bound, upper_bound_by,
};
pub use set::{
    includes, includes_by, set_difference, set_difference_by, set_intersection,
    set_intersection_by, set_symmetric_difference, set_symmetric_difference_by, set_union,
    set_union_by,
};
pub use sort::{insertion_sort, insertion_sort_by, partial_sort, partial_sort_by, sort, sort_by};
