//! Set operations on sorted input ranges.
//!
//! Each operation lazily walks both ranges once. Equivalent elements are matched one to one,
//! so a value present `m` times in the first range and `n` times in the second appears
//! `max(m, n)` times in the union, `min(m, n)` times in the intersection, `m - n` times in the
//! difference and `|m - n|` times in the symmetric difference. Whenever an element of both
//! ranges is kept, the one from the first range is yielded.

use core::iter;

/// Elements present in either range.
///
/// # Example
/// ```
/// let union: Vec<_> = algopool::algo::set_union([1, 2, 2, 5], [2, 3, 5, 8]).collect();
/// assert_eq!(union, [1, 2, 2, 3, 5, 8]);
/// ```
#[inline]
pub fn set_union<I, J>(a: I, b: J) -> impl Iterator<Item = I::Item>
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    I::Item: Ord,
{
    set_union_by(a, b, |x, y| x < y)
}

pub fn set_union_by<I, J, F>(a: I, b: J, mut is_less: F) -> impl Iterator<Item = I::Item>
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    F: FnMut(&I::Item, &I::Item) -> bool,
{
    let mut a = a.into_iter().peekable();
    let mut b = b.into_iter().peekable();
    iter::from_fn(move || match (a.peek(), b.peek()) {
        (Some(x), Some(y)) => {
            if is_less(x, y) {
                a.next()
            } else if is_less(y, x) {
                b.next()
            } else {
                b.next();
                a.next()
            }
        }
        (Some(_), None) => a.next(),
        (None, _) => b.next(),
    })
}

/// Elements present in both ranges.
#[inline]
pub fn set_intersection<I, J>(a: I, b: J) -> impl Iterator<Item = I::Item>
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    I::Item: Ord,
{
    set_intersection_by(a, b, |x, y| x < y)
}

pub fn set_intersection_by<I, J, F>(a: I, b: J, mut is_less: F) -> impl Iterator<Item = I::Item>
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    F: FnMut(&I::Item, &I::Item) -> bool,
{
    let mut a = a.into_iter().peekable();
    let mut b = b.into_iter().peekable();
    iter::from_fn(move || loop {
        let (x, y) = (a.peek()?, b.peek()?);
        if is_less(x, y) {
            a.next();
        } else if is_less(y, x) {
            b.next();
        } else {
            b.next();
            return a.next();
        }
    })
}

/// Elements of the first range missing from the second.
#[inline]
pub fn set_difference<I, J>(a: I, b: J) -> impl Iterator<Item = I::Item>
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    I::Item: Ord,
{
    set_difference_by(a, b, |x, y| x < y)
}

pub fn set_difference_by<I, J, F>(a: I, b: J, mut is_less: F) -> impl Iterator<Item = I::Item>
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    F: FnMut(&I::Item, &I::Item) -> bool,
{
    let mut a = a.into_iter().peekable();
    let mut b = b.into_iter().peekable();
    iter::from_fn(move || loop {
        let x = a.peek()?;
        let Some(y) = b.peek() else {
            return a.next();
        };
        if is_less(x, y) {
            return a.next();
        } else if is_less(y, x) {
            b.next();
        } else {
            a.next();
            b.next();
        }
    })
}

/// Elements present in exactly one of the ranges.
#[inline]
pub fn set_symmetric_difference<I, J>(a: I, b: J) -> impl Iterator<Item = I::Item>
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    I::Item: Ord,
{
    set_symmetric_difference_by(a, b, |x, y| x < y)
}

pub fn set_symmetric_difference_by<I, J, F>(
    a: I,
    b: J,
    mut is_less: F,
) -> impl Iterator<Item = I::Item>
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    F: FnMut(&I::Item, &I::Item) -> bool,
{
    let mut a = a.into_iter().peekable();
    let mut b = b.into_iter().peekable();
    iter::from_fn(move || loop {
        match (a.peek(), b.peek()) {
            (Some(x), Some(y)) => {
                if is_less(x, y) {
                    return a.next();
                } else if is_less(y, x) {
                    return b.next();
                }
                a.next();
                b.next();
            }
            (Some(_), None) => return a.next(),
            (None, _) => return b.next(),
        }
    })
}

/// Returns `true` if every element of `b` has its own equivalent in `a`.
#[inline]
pub fn includes<I, J>(a: I, b: J) -> bool
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    I::Item: Ord,
{
    includes_by(a, b, |x, y| x < y)
}

pub fn includes_by<I, J, F>(a: I, b: J, mut is_less: F) -> bool
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    F: FnMut(&I::Item, &I::Item) -> bool,
{
    let mut a = a.into_iter();
    'needles: for y in b {
        for x in a.by_ref() {
            if is_less(&y, &x) {
                return false;
            }
            if !is_less(&x, &y) {
                continue 'needles;
            }
        }
        return false;
    }
    true
}
