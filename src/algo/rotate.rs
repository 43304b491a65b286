//! Rotation and reversal of a range.
//!
//! [`rotate`] picks a strategy by the sequence's tier: block swaps for forward sequences,
//! three reversals for bidirectional ones and cycle following for random-access ones. Every
//! strategy returns the new position of the element that was at `first`.

use crate::iter::{self, BidirectionalSeq, Dispatch, ForwardSeq, RandomAccessSeq};

/// Exchanges `[first, middle)` and `[middle, last)` in place and returns the position the
/// element at `first` moved to.
///
/// # Example
/// ```
/// let mut v = [1, 2, 3, 4, 5];
/// let pos = algopool::algo::rotate(&mut v[..], 0, 2, 5);
/// assert_eq!(v, [3, 4, 5, 1, 2]);
/// assert_eq!(pos, 3);
/// ```
#[inline]
pub fn rotate<S>(seq: &mut S, first: S::Pos, middle: S::Pos, last: S::Pos) -> S::Pos
where
    S: ForwardSeq + ?Sized,
{
    <S::Category as Dispatch<S>>::rotate(seq, first, middle, last)
}

/// Rotation by repeated block swaps. Steps positions forward only.
pub fn rotate_forward<S>(
    seq: &mut S,
    mut first: S::Pos,
    mut middle: S::Pos,
    last: S::Pos,
) -> S::Pos
where
    S: ForwardSeq + ?Sized,
{
    if first == middle {
        return last;
    }
    if middle == last {
        return first;
    }

    let mut next = middle;
    loop {
        seq.swap_at(first, next);
        first = seq.succ(first);
        next = seq.succ(next);
        if first == middle {
            middle = next;
        }
        if next == last {
            break;
        }
    }
    let result = first;

    // the left block may still be split in two; keep swapping the remainder into place
    next = middle;
    while next != last {
        seq.swap_at(first, next);
        first = seq.succ(first);
        next = seq.succ(next);
        if first == middle {
            middle = next;
        } else if next == last {
            next = middle;
        }
    }
    result
}

/// Rotation by reversing both halves and then the whole range.
pub fn rotate_bidirectional<S>(
    seq: &mut S,
    mut first: S::Pos,
    middle: S::Pos,
    mut last: S::Pos,
) -> S::Pos
where
    S: BidirectionalSeq + ?Sized,
{
    if first == middle {
        return last;
    }
    if middle == last {
        return first;
    }

    reverse(seq, first, middle);
    reverse(seq, middle, last);

    // reverse the whole range from both ends until one end reaches `middle`, so the
    // unfinished part tells where the old first element ended up
    while first != middle && middle != last {
        last = seq.pred(last);
        seq.swap_at(first, last);
        first = seq.succ(first);
    }
    if first == middle {
        reverse(seq, middle, last);
        last
    } else {
        reverse(seq, first, middle);
        first
    }
}

/// Rotation by following the `gcd(n, k)` permutation cycles of a left shift by `k`. Every
/// element is moved exactly once, through [`RandomAccessSeq::shift_cycle`].
pub fn rotate_random_access<S>(
    seq: &mut S,
    first: S::Pos,
    middle: S::Pos,
    last: S::Pos,
) -> S::Pos
where
    S: RandomAccessSeq + ?Sized,
{
    if first == middle {
        return last;
    }
    if middle == last {
        return first;
    }

    let n = iter::distance(seq, first, last);
    let k = iter::distance(seq, first, middle);
    for start in 0..gcd(n, k) {
        seq.shift_cycle(first, n, k, start);
    }
    seq.jump(first, (n - k) as isize)
}

/// Reverses `[first, last)` in place.
pub fn reverse<S>(seq: &mut S, mut first: S::Pos, mut last: S::Pos)
where
    S: BidirectionalSeq + ?Sized,
{
    loop {
        if first == last {
            return;
        }
        last = seq.pred(last);
        if first == last {
            return;
        }
        seq.swap_at(first, last);
        first = seq.succ(first);
    }
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
