//! Introsort and its building blocks.
//!
//! [`sort`] partitions around median-of-three pivots until every segment is at most
//! [`SMALL_SECTION`] long, then finishes the whole slice with one insertion sort pass. When
//! partitioning goes `2 * log2(n)` levels deep, the remaining segment is heapsorted instead.

use super::{
    base::median_index,
    heap::{adjust_heap, make_heap_inner, sort_heap_inner},
};

/// Segments at most this long are left for the final insertion sort.
pub const SMALL_SECTION: usize = 128;

/// Sorts `v` in ascending order. The sort is not stable.
///
/// # Example
/// ```
/// let mut v = [5, 3, 8, 1, 9, 2, 7, 4, 6, 0];
/// algopool::algo::sort(&mut v);
/// assert_eq!(v, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
/// ```
#[inline]
pub fn sort<T: Ord>(v: &mut [T]) {
    sort_by(v, T::lt)
}

pub fn sort_by<T, F>(v: &mut [T], mut is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if len < 2 {
        return;
    }
    intro_loop(v, 2 * len.ilog2() as usize, &mut is_less);
    final_insertion_sort(v, &mut is_less);
}

/// Puts the `middle` smallest elements of `v`, sorted, in `v[..middle]`. The order of the
/// rest is unspecified.
#[inline]
pub fn partial_sort<T: Ord>(v: &mut [T], middle: usize) {
    partial_sort_by(v, middle, T::lt)
}

pub fn partial_sort_by<T, F>(v: &mut [T], middle: usize, mut is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    partial_sort_inner(v, middle, &mut is_less)
}

/// Stable quadratic sort, fastest on short or almost sorted slices.
#[inline]
pub fn insertion_sort<T: Ord>(v: &mut [T]) {
    insertion_sort_by(v, T::lt)
}

pub fn insertion_sort_by<T, F>(v: &mut [T], mut is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    insertion_sort_inner(v, &mut is_less)
}

fn intro_loop<T, F>(mut v: &mut [T], mut depth_limit: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    while v.len() > SMALL_SECTION {
        if depth_limit == 0 {
            let len = v.len();
            partial_sort_inner(v, len, is_less);
            return;
        }
        depth_limit -= 1;
        let cut = partition_at_median(v, is_less);
        let (left, right) = v.split_at_mut(cut);
        intro_loop(right, depth_limit, is_less);
        v = left;
    }
}

/// Partitions `v` around the median of its first, middle and last elements.
///
/// Returns `cut` such that no element of `v[..cut]` is greater than the pivot and no element
/// of `v[cut..]` is less than it. Both sides are non-empty.
fn partition_at_median<T, F>(v: &mut [T], is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    let pivot = median_index(v, 0, len / 2, len - 1, is_less);
    v.swap(0, pivot);
    let (pivot, rest) = v.split_at_mut(1);
    1 + unguarded_partition(rest, &pivot[0], is_less)
}

/// Hoare partition of `v` around `pivot`.
///
/// `v` must hold an element not less than `pivot` and one not greater than it; these stop the
/// inner scans without bounds checks against each other.
fn unguarded_partition<T, F>(v: &mut [T], pivot: &T, is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let mut first = 0;
    let mut last = v.len();
    loop {
        while is_less(&v[first], pivot) {
            first += 1;
        }
        last -= 1;
        while is_less(pivot, &v[last]) {
            last -= 1;
        }
        if first >= last {
            return first;
        }
        v.swap(first, last);
        first += 1;
    }
}

fn final_insertion_sort<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    if v.len() > SMALL_SECTION {
        insertion_sort_inner(&mut v[..SMALL_SECTION], is_less);
        // the smallest element is already in front, so inserts need no lower bound check
        for i in SMALL_SECTION..v.len() {
            unguarded_linear_insert(v, i, is_less);
        }
    } else {
        insertion_sort_inner(v, is_less);
    }
}

fn insertion_sort_inner<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    for i in 1..v.len() {
        if is_less(&v[i], &v[0]) {
            v[..=i].rotate_right(1);
        } else {
            unguarded_linear_insert(v, i, is_less);
        }
    }
}

/// Sinks `v[i]` into the sorted `v[..i]`. Some element before `i` must not be greater
/// than `v[i]`.
fn unguarded_linear_insert<T, F>(v: &mut [T], mut i: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    while is_less(&v[i], &v[i - 1]) {
        v.swap(i, i - 1);
        i -= 1;
    }
}

fn partial_sort_inner<T, F>(v: &mut [T], middle: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let middle = middle.min(v.len());
    if middle == 0 {
        return;
    }
    let (heap, rest) = v.split_at_mut(middle);
    make_heap_inner(heap, is_less);
    for candidate in rest.iter_mut() {
        if is_less(candidate, &heap[0]) {
            core::mem::swap(candidate, &mut heap[0]);
            adjust_heap(heap, 0, is_less);
        }
    }
    sort_heap_inner(heap, is_less);
}
