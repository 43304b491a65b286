//! Binary searches over sorted ranges.
//!
//! The searches halve `[first, last)` through [`iter::advance`], so they take a logarithmic
//! number of comparisons on every tier but only logarithmic time on random-access sequences.

use crate::iter::{self, ForwardSeq};

/// First position in `[first, last)` whose element is not less than `value`.
///
/// # Example
/// ```
/// let v = [1, 2, 4, 4, 4, 7];
/// assert_eq!(algopool::algo::lower_bound(&v[..], 0, v.len(), &4), 2);
/// assert_eq!(algopool::algo::lower_bound(&v[..], 0, v.len(), &9), 6);
/// ```
#[inline]
pub fn lower_bound<S>(seq: &S, first: S::Pos, last: S::Pos, value: &S::Item) -> S::Pos
where
    S: ForwardSeq + ?Sized,
    S::Item: Ord,
{
    lower_bound_by(seq, first, last, value, <S::Item as PartialOrd>::lt)
}

pub fn lower_bound_by<S, F>(
    seq: &S,
    mut first: S::Pos,
    last: S::Pos,
    value: &S::Item,
    mut is_less: F,
) -> S::Pos
where
    S: ForwardSeq + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> bool,
{
    let mut len = iter::distance(seq, first, last);
    while len > 0 {
        let half = len / 2;
        let middle = iter::advance(seq, first, half);
        if is_less(seq.at(middle), value) {
            first = seq.succ(middle);
            len -= half + 1;
        } else {
            len = half;
        }
    }
    first
}

/// First position in `[first, last)` whose element is greater than `value`.
#[inline]
pub fn upper_bound<S>(seq: &S, first: S::Pos, last: S::Pos, value: &S::Item) -> S::Pos
where
    S: ForwardSeq + ?Sized,
    S::Item: Ord,
{
    upper_bound_by(seq, first, last, value, <S::Item as PartialOrd>::lt)
}

pub fn upper_bound_by<S, F>(
    seq: &S,
    mut first: S::Pos,
    last: S::Pos,
    value: &S::Item,
    mut is_less: F,
) -> S::Pos
where
    S: ForwardSeq + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> bool,
{
    let mut len = iter::distance(seq, first, last);
    while len > 0 {
        let half = len / 2;
        let middle = iter::advance(seq, first, half);
        if is_less(value, seq.at(middle)) {
            len = half;
        } else {
            first = seq.succ(middle);
            len -= half + 1;
        }
    }
    first
}

/// The subrange of elements equivalent to `value`, as `(lower_bound, upper_bound)`.
#[inline]
pub fn equal_range<S>(seq: &S, first: S::Pos, last: S::Pos, value: &S::Item) -> (S::Pos, S::Pos)
where
    S: ForwardSeq + ?Sized,
    S::Item: Ord,
{
    equal_range_by(seq, first, last, value, <S::Item as PartialOrd>::lt)
}

pub fn equal_range_by<S, F>(
    seq: &S,
    mut first: S::Pos,
    last: S::Pos,
    value: &S::Item,
    mut is_less: F,
) -> (S::Pos, S::Pos)
where
    S: ForwardSeq + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> bool,
{
    let mut len = iter::distance(seq, first, last);
    while len > 0 {
        let half = len / 2;
        let middle = iter::advance(seq, first, half);
        if is_less(seq.at(middle), value) {
            first = seq.succ(middle);
            len -= half + 1;
        } else if is_less(value, seq.at(middle)) {
            len = half;
        } else {
            // both bounds are now on either side of `middle`
            let end = iter::advance(seq, first, len);
            let lower = lower_bound_by(seq, first, middle, value, &mut is_less);
            let upper = upper_bound_by(seq, seq.succ(middle), end, value, &mut is_less);
            return (lower, upper);
        }
    }
    (first, first)
}

/// Returns `true` if `[first, last)` holds an element equivalent to `value`.
#[inline]
pub fn binary_search<S>(seq: &S, first: S::Pos, last: S::Pos, value: &S::Item) -> bool
where
    S: ForwardSeq + ?Sized,
    S::Item: Ord,
{
    binary_search_by(seq, first, last, value, <S::Item as PartialOrd>::lt)
}

pub fn binary_search_by<S, F>(
    seq: &S,
    first: S::Pos,
    last: S::Pos,
    value: &S::Item,
    mut is_less: F,
) -> bool
where
    S: ForwardSeq + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> bool,
{
    let pos = lower_bound_by(seq, first, last, value, &mut is_less);
    pos != last && !is_less(value, seq.at(pos))
}
