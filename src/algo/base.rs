//! Comparisons of a few values.

/// The larger of two values; `a` when they are equivalent.
#[inline]
pub fn max<'a, T: Ord>(a: &'a T, b: &'a T) -> &'a T {
    max_by(a, b, T::lt)
}

#[inline]
pub fn max_by<'a, T, F>(a: &'a T, b: &'a T, mut is_less: F) -> &'a T
where
    F: FnMut(&T, &T) -> bool,
{
    if is_less(a, b) {
        b
    } else {
        a
    }
}

/// The smaller of two values; `a` when they are equivalent.
#[inline]
pub fn min<'a, T: Ord>(a: &'a T, b: &'a T) -> &'a T {
    min_by(a, b, T::lt)
}

#[inline]
pub fn min_by<'a, T, F>(a: &'a T, b: &'a T, mut is_less: F) -> &'a T
where
    F: FnMut(&T, &T) -> bool,
{
    if is_less(b, a) {
        b
    } else {
        a
    }
}

/// The median of three values.
#[inline]
pub fn median<'a, T: Ord>(a: &'a T, b: &'a T, c: &'a T) -> &'a T {
    median_by(a, b, c, T::lt)
}

pub fn median_by<'a, T, F>(a: &'a T, b: &'a T, c: &'a T, mut is_less: F) -> &'a T
where
    F: FnMut(&T, &T) -> bool,
{
    let trio = [a, b, c];
    trio[median_index(&trio, 0, 1, 2, &mut |x: &&T, y: &&T| is_less(x, y))]
}

/// Index of the median of `v[a]`, `v[b]` and `v[c]`.
///
/// Equivalent values resolve the same way every time: the result is `b` when all three are
/// equivalent.
pub(crate) fn median_index<T, F>(v: &[T], a: usize, b: usize, c: usize, is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    if is_less(&v[a], &v[b]) {
        if is_less(&v[b], &v[c]) {
            b
        } else if is_less(&v[a], &v[c]) {
            c
        } else {
            a
        }
    } else if is_less(&v[a], &v[c]) {
        a
    } else if is_less(&v[b], &v[c]) {
        c
    } else {
        b
    }
}

/// Returns `true` if no element is less than the one before it.
pub fn is_sorted<I>(iter: I) -> bool
where
    I: IntoIterator,
    I::Item: Ord,
{
    is_sorted_by(iter, |a, b| a < b)
}

pub fn is_sorted_by<I, F>(iter: I, mut is_less: F) -> bool
where
    I: IntoIterator,
    F: FnMut(&I::Item, &I::Item) -> bool,
{
    let mut iter = iter.into_iter();
    let Some(mut prev) = iter.next() else {
        return true;
    };
    for next in iter {
        if is_less(&next, &prev) {
            return false;
        }
        prev = next;
    }
    true
}

/// Lexicographic "less than": the first unequal pair decides, and a proper prefix is less
/// than the longer range.
pub fn lexicographical_compare<I, J>(a: I, b: J) -> bool
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    I::Item: Ord,
{
    lexicographical_compare_by(a, b, |x, y| x < y)
}

pub fn lexicographical_compare_by<I, J, F>(a: I, b: J, mut is_less: F) -> bool
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    F: FnMut(&I::Item, &I::Item) -> bool,
{
    let mut a = a.into_iter();
    let mut b = b.into_iter();
    loop {
        match (a.next(), b.next()) {
            (Some(x), Some(y)) => {
                if is_less(&x, &y) {
                    return true;
                }
                if is_less(&y, &x) {
                    return false;
                }
            }
            (None, Some(_)) => return true,
            (_, None) => return false,
        }
    }
}
