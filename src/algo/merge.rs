//! Merging of sorted ranges.
//!
//! [`merge`] lazily interleaves two sorted input ranges. [`inplace_merge`] merges two adjacent
//! sorted runs of a slice: with a scratch buffer holding the shorter run it does a single
//! linear pass, with a smaller buffer it splits the problem and rotates with the buffer's
//! help, and without any buffer it falls back to [`merge_without_buffer`], which only swaps.
//! All variants are stable: on ties the element from the first range comes first.

use super::{rotate::rotate, search};
use crate::{
    buffer::TempBuffer,
    iter::{self, ForwardSeq},
};
use allocator_api2::alloc::{Allocator, Global};
use core::{
    fmt,
    iter::{FusedIterator, Peekable},
    mem, ptr,
};

/// Iterator over the merge of two sorted ranges, returned by [`merge`] and [`merge_by`].
pub struct Merge<I: Iterator, J: Iterator<Item = I::Item>, F> {
    a: Peekable<I>,
    b: Peekable<J>,
    is_less: F,
}

impl<I, J, F> fmt::Debug for Merge<I, J, F>
where
    I: Iterator + fmt::Debug,
    J: Iterator<Item = I::Item> + fmt::Debug,
    I::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Merge")
            .field("a", &self.a)
            .field("b", &self.b)
            .finish_non_exhaustive()
    }
}

impl<I, J, F> Iterator for Merge<I, J, F>
where
    I: Iterator,
    J: Iterator<Item = I::Item>,
    F: FnMut(&I::Item, &I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        match (self.a.peek(), self.b.peek()) {
            (Some(x), Some(y)) => {
                if (self.is_less)(y, x) {
                    self.b.next()
                } else {
                    self.a.next()
                }
            }
            (Some(_), None) => self.a.next(),
            (None, _) => self.b.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (a_low, a_high) = self.a.size_hint();
        let (b_low, b_high) = self.b.size_hint();
        let high = match (a_high, b_high) {
            (Some(a), Some(b)) => a.checked_add(b),
            _ => None,
        };
        (a_low.saturating_add(b_low), high)
    }
}

impl<I, J, F> FusedIterator for Merge<I, J, F>
where
    I: FusedIterator,
    J: FusedIterator<Item = I::Item>,
    F: FnMut(&I::Item, &I::Item) -> bool,
{
}

/// Merges two sorted ranges.
///
/// # Example
/// ```
/// let merged: Vec<_> = algopool::algo::merge([1, 3, 5, 7], [2, 4, 6, 8]).collect();
/// assert_eq!(merged, [1, 2, 3, 4, 5, 6, 7, 8]);
/// ```
#[inline]
pub fn merge<I, J>(a: I, b: J) -> Merge<I::IntoIter, J::IntoIter, fn(&I::Item, &I::Item) -> bool>
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    I::Item: Ord,
{
    merge_by(a, b, <I::Item as PartialOrd>::lt as fn(&I::Item, &I::Item) -> bool)
}

#[inline]
pub fn merge_by<I, J, F>(a: I, b: J, is_less: F) -> Merge<I::IntoIter, J::IntoIter, F>
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    F: FnMut(&I::Item, &I::Item) -> bool,
{
    Merge {
        a: a.into_iter().peekable(),
        b: b.into_iter().peekable(),
        is_less,
    }
}

/// Merges the sorted runs `v[..mid]` and `v[mid..]` into one sorted slice, using a scratch
/// buffer from the global allocator when one is available.
///
/// # Example
/// ```
/// let mut v = [1, 3, 5, 7, 2, 4, 6, 8];
/// algopool::algo::inplace_merge(&mut v, 4);
/// assert_eq!(v, [1, 2, 3, 4, 5, 6, 7, 8]);
/// ```
#[inline]
pub fn inplace_merge<T: Ord>(v: &mut [T], mid: usize) {
    inplace_merge_by(v, mid, T::lt)
}

#[inline]
pub fn inplace_merge_by<T, F>(v: &mut [T], mid: usize, is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    inplace_merge_in(v, mid, is_less, Global)
}

/// [`inplace_merge_by`] taking its scratch buffer from `alloc`.
///
/// A buffer for the shorter run is requested; if `alloc` refuses, smaller buffers are tried,
/// and with no buffer at all the merge runs in place in `O(n log n)` swaps.
pub fn inplace_merge_in<T, F, A>(v: &mut [T], mid: usize, mut is_less: F, alloc: A)
where
    F: FnMut(&T, &T) -> bool,
    A: Allocator,
{
    let len = v.len();
    if mid == 0 || mid >= len {
        return;
    }
    let (len1, len2) = (mid, len - mid);

    if mem::size_of::<T>() != 0 {
        let mut buf = TempBuffer::<T, A>::new_in(len1.min(len2), alloc);
        if !buf.is_empty() {
            let cap = buf.capacity();
            merge_adaptive(v, mid, buf.as_mut_ptr(), cap, &mut is_less);
            return;
        }
    }
    merge_runs_without_buffer(v, 0, mid, len, len1, len2, &mut is_less);
}

/// Merges the sorted runs `[first, middle)` and `[middle, last)` of `seq` without extra memory.
///
/// Splits the longer run in half, finds the matching cut of the other run by binary search,
/// rotates the two inner parts past each other and recurses on both sides.
pub fn merge_without_buffer<S, F>(
    seq: &mut S,
    first: S::Pos,
    middle: S::Pos,
    last: S::Pos,
    mut is_less: F,
) where
    S: ForwardSeq + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> bool,
{
    let len1 = iter::distance(seq, first, middle);
    let len2 = iter::distance(seq, middle, last);
    merge_runs_without_buffer(seq, first, middle, last, len1, len2, &mut is_less)
}

fn merge_runs_without_buffer<S, F>(
    seq: &mut S,
    first: S::Pos,
    middle: S::Pos,
    last: S::Pos,
    len1: usize,
    len2: usize,
    is_less: &mut F,
) where
    S: ForwardSeq + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> bool,
{
    if len1 == 0 || len2 == 0 {
        return;
    }
    if len1 + len2 == 2 {
        if is_less(seq.at(middle), seq.at(first)) {
            seq.swap_at(first, middle);
        }
        return;
    }

    let (first_cut, second_cut, len11, len22);
    if len1 > len2 {
        len11 = len1 / 2;
        first_cut = iter::advance(seq, first, len11);
        second_cut = search::lower_bound_by(seq, middle, last, seq.at(first_cut), &mut *is_less);
        len22 = iter::distance(seq, middle, second_cut);
    } else {
        len22 = len2 / 2;
        second_cut = iter::advance(seq, middle, len22);
        first_cut = search::upper_bound_by(seq, first, middle, seq.at(second_cut), &mut *is_less);
        len11 = iter::distance(seq, first, first_cut);
    }

    let new_middle = rotate(seq, first_cut, middle, second_cut);
    merge_runs_without_buffer(seq, first, first_cut, new_middle, len11, len22, is_less);
    merge_runs_without_buffer(
        seq,
        new_middle,
        second_cut,
        last,
        len1 - len11,
        len2 - len22,
        is_less,
    );
}

/// Merges `v[..mid]` and `v[mid..]` with the help of `cap` uninitialized slots at `buf`.
fn merge_adaptive<T, F>(v: &mut [T], mid: usize, buf: *mut T, cap: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if mid == 0 || mid == len {
        return;
    }
    let (len1, len2) = (mid, len - mid);

    if len1 <= len2 && len1 <= cap {
        // SAFETY: the buffer has room for the left run.
        unsafe { merge_lo(v, mid, buf, is_less) };
        return;
    }
    if len2 <= cap {
        // SAFETY: the buffer has room for the right run.
        unsafe { merge_hi(v, mid, buf, is_less) };
        return;
    }

    let (first_cut, second_cut);
    if len1 > len2 {
        first_cut = len1 / 2;
        second_cut = search::lower_bound_by(&*v, mid, len, &v[first_cut], &mut *is_less);
    } else {
        second_cut = mid + len2 / 2;
        first_cut = search::upper_bound_by(&*v, 0, mid, &v[second_cut], &mut *is_less);
    }
    let rotated = &mut v[first_cut..second_cut];
    let new_mid = first_cut + rotate_adaptive(rotated, mid - first_cut, buf, cap);

    let (left, right) = v.split_at_mut(new_mid);
    merge_adaptive(left, first_cut, buf, cap, is_less);
    merge_adaptive(right, second_cut - new_mid, buf, cap, is_less);
}

/// Rotates `v` left by `mid`, moving the shorter side through the buffer when it fits.
/// Returns the new position of `v[0]`.
fn rotate_adaptive<T>(v: &mut [T], mid: usize, buf: *mut T, cap: usize) -> usize {
    let (len1, len2) = (mid, v.len() - mid);
    let p = v.as_mut_ptr();
    if len1 > len2 && len2 <= cap {
        // SAFETY: `p` is valid for `len1 + len2` values and `buf` for `len2`. No user code runs
        // while the right side is parked in the buffer.
        unsafe {
            ptr::copy_nonoverlapping(p.add(mid), buf, len2);
            ptr::copy(p, p.add(len2), len1);
            ptr::copy_nonoverlapping(buf, p, len2);
        }
        len2
    } else if len1 <= cap {
        // SAFETY: as above, with the left side parked.
        unsafe {
            ptr::copy_nonoverlapping(p, buf, len1);
            ptr::copy(p.add(mid), p, len2);
            ptr::copy_nonoverlapping(buf, p.add(len2), len1);
        }
        len2
    } else {
        let len = v.len();
        rotate(v, 0, mid, len)
    }
}

/// Moves the left run into the buffer and merges front to back.
///
/// # Safety
/// `buf` must be valid for writes of `mid` values and must not overlap `v`.
unsafe fn merge_lo<T, F>(v: &mut [T], mid: usize, buf: *mut T, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let v_ptr = v.as_mut_ptr();
    let right_end = v_ptr.add(v.len());
    ptr::copy_nonoverlapping(v_ptr, buf, mid);

    // if `is_less` panics, the hole puts the rest of the buffer back into the gap
    let mut hole = MergeHole {
        start: buf,
        end: buf.add(mid),
        dest: v_ptr,
    };
    let mut right = v_ptr.add(mid);
    while hole.start < hole.end && right < right_end {
        let src = if is_less(&*right, &*hole.start) {
            let src = right;
            right = right.add(1);
            src
        } else {
            let src = hole.start;
            hole.start = hole.start.add(1);
            src
        };
        ptr::copy_nonoverlapping(src, hole.dest, 1);
        hole.dest = hole.dest.add(1);
    }
}

/// Moves the right run into the buffer and merges back to front.
///
/// # Safety
/// `buf` must be valid for writes of `v.len() - mid` values and must not overlap `v`.
unsafe fn merge_hi<T, F>(v: &mut [T], mid: usize, buf: *mut T, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    let v_ptr = v.as_mut_ptr();
    ptr::copy_nonoverlapping(v_ptr.add(mid), buf, len - mid);

    let mut hole = MergeHole {
        start: buf,
        end: buf.add(len - mid),
        dest: v_ptr.add(mid),
    };
    let mut left = v_ptr.add(mid);
    let mut out = v_ptr.add(len);
    while v_ptr < left && hole.start < hole.end {
        out = out.sub(1);
        // ties keep the right element behind the left one
        let src = if is_less(&*hole.end.sub(1), &*left.sub(1)) {
            left = left.sub(1);
            left
        } else {
            hole.end = hole.end.sub(1);
            hole.end
        };
        ptr::copy_nonoverlapping(src, out, 1);
        hole.dest = left;
    }
}

/// Buffered values `[start, end)` waiting to be copied to `dest` when dropped.
struct MergeHole<T> {
    start: *mut T,
    end: *mut T,
    dest: *mut T,
}

impl<T> Drop for MergeHole<T> {
    fn drop(&mut self) {
        // SAFETY: `T` is not zero-sized and `[start, end)` lies within one buffer; the caller
        // keeps exactly that many slots open at `dest`.
        unsafe {
            let len = self.end.offset_from(self.start) as usize;
            ptr::copy_nonoverlapping(self.start, self.dest, len);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{alloc::Failing, iter::ForwardView, AllocatorExt as _};
    use std::{string::String, vec::Vec};

    fn pseudo_random(len: usize, seed: u64, modulo: u64) -> Vec<u64> {
        let mut x = seed;
        (0..len)
            .map(|_| {
                x ^= x << 13;
                x ^= x >> 7;
                x ^= x << 17;
                x % modulo
            })
            .collect()
    }

    fn two_runs(len1: usize, len2: usize, seed: u64) -> Vec<u64> {
        let mut left = pseudo_random(len1, seed, 100);
        let mut right = pseudo_random(len2, seed + 1, 100);
        left.sort();
        right.sort();
        left.extend(right);
        left
    }

    #[test]
    fn merge_interleaves_sorted_ranges() {
        let merged: Vec<_> = merge([1, 3, 5, 7], [2, 4, 6, 8]).collect();
        assert_eq!(merged, [1, 2, 3, 4, 5, 6, 7, 8]);

        let merged: Vec<_> = merge(Vec::new(), [2, 4]).collect();
        assert_eq!(merged, [2, 4]);
        assert_eq!(merge([1, 2], [3]).size_hint(), (3, Some(3)));
    }

    #[test]
    fn merge_takes_ties_from_the_first_range() {
        let a = [(1, 'a'), (2, 'a')];
        let b = [(1, 'b'), (2, 'b')];
        let merged: Vec<_> = merge_by(a, b, |x, y| x.0 < y.0).collect();
        assert_eq!(merged, [(1, 'a'), (1, 'b'), (2, 'a'), (2, 'b')]);
    }

    #[test]
    fn inplace_merge_with_and_without_a_buffer() {
        let mut v = [1, 3, 5, 7, 2, 4, 6, 8];
        inplace_merge(&mut v, 4);
        assert_eq!(v, [1, 2, 3, 4, 5, 6, 7, 8]);

        let mut v = [1, 3, 5, 7, 2, 4, 6, 8];
        inplace_merge_in(&mut v, 4, |a, b| a < b, Failing);
        assert_eq!(v, [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn merge_is_stable_on_every_path() {
        let input = [(1, 0), (3, 1), (3, 2), (5, 3), (1, 4), (3, 5), (4, 6)];
        let expected = [(1, 0), (1, 4), (3, 1), (3, 2), (3, 5), (4, 6), (5, 3)];
        let by_key = |a: &(i32, i32), b: &(i32, i32)| a.0 < b.0;

        let mut v = input;
        inplace_merge_by(&mut v, 4, by_key);
        assert_eq!(v, expected);

        let mut v = input;
        inplace_merge_in(&mut v, 4, by_key, Failing);
        assert_eq!(v, expected);

        let mut v = input;
        inplace_merge_in(&mut v, 4, by_key, Global.budgeted(8));
        assert_eq!(v, expected);
    }

    #[test]
    fn small_buffer_splits_and_rotates() {
        for (len1, len2) in [(200, 200), (300, 40), (40, 300), (1, 500), (500, 1)] {
            let mut v = two_runs(len1, len2, 7);
            let mut expected = v.clone();
            expected.sort();

            let budget = Global.budgeted(8 * 16);
            inplace_merge_in(&mut v, len1, |a, b| a < b, &budget);
            assert_eq!(v, expected, "{len1} + {len2}");
            assert_eq!(budget.remaining(), 8 * 16);
        }
    }

    #[test]
    fn all_paths_agree_with_sorting() {
        for (len1, len2) in [(1, 1), (2, 9), (9, 2), (64, 64), (100, 37)] {
            let runs = two_runs(len1, len2, len1 as u64 * 31 + len2 as u64);
            let mut expected = runs.clone();
            expected.sort();

            let mut v = runs.clone();
            inplace_merge(&mut v, len1);
            assert_eq!(v, expected);

            let mut v = runs.clone();
            inplace_merge_in(&mut v, len1, |a, b| a < b, Failing);
            assert_eq!(v, expected);

            let mut v = runs;
            let mut fwd = ForwardView::new(&mut v);
            merge_without_buffer(&mut fwd, 0, len1, len1 + len2, |a, b| a < b);
            assert_eq!(v, expected);
        }
    }

    #[test]
    fn owned_values_survive_buffered_merges() {
        let mut v: Vec<String> = ["b", "d", "f", "a", "c", "e", "g"]
            .iter()
            .map(|s| String::from(*s))
            .collect();
        inplace_merge(&mut v, 3);
        assert_eq!(v, ["a", "b", "c", "d", "e", "f", "g"]);
    }

    #[test]
    fn degenerate_splits_are_no_ops() {
        let mut v = [3, 1, 2];
        inplace_merge(&mut v, 0);
        inplace_merge(&mut v, 3);
        assert_eq!(v, [3, 1, 2]);

        let mut units = [(), (), ()];
        inplace_merge(&mut units, 1);
    }

    #[test]
    fn rotate_adaptive_moves_the_shorter_side() {
        let mut buf = TempBuffer::<u32>::new(2);
        let cap = buf.capacity();

        let mut v = [1, 2, 3, 4, 5];
        assert_eq!(rotate_adaptive(&mut v, 3, buf.as_mut_ptr(), cap), 2);
        assert_eq!(v, [4, 5, 1, 2, 3]);

        let mut v = [1, 2, 3, 4, 5];
        assert_eq!(rotate_adaptive(&mut v, 2, buf.as_mut_ptr(), cap), 3);
        assert_eq!(v, [3, 4, 5, 1, 2]);

        // neither side fits
        let mut v = [1, 2, 3, 4, 5, 6];
        assert_eq!(rotate_adaptive(&mut v, 3, buf.as_mut_ptr(), cap), 3);
        assert_eq!(v, [4, 5, 6, 1, 2, 3]);
    }
}
