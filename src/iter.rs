//! Range capability tiers.
//!
//! A range is a pair of positions into a sequence. What an algorithm may do with the positions
//! depends on the sequence's tier:
//!
//! - **input**: single pass, read once. Any [`IntoIterator`] is an input range.
//! - **forward**: multi-pass, positions can be copied, compared and stepped forward
//!   ([`ForwardSeq`]).
//! - **bidirectional**: positions can also step backward ([`BidirectionalSeq`]).
//! - **random access**: positions jump any distance in constant time ([`RandomAccessSeq`]).
//!   Slices are random access.
//!
//! Every sequence names its tier through [`ForwardSeq::Category`]. The tag's [`Dispatch`]
//! implementation picks the best strategy for [`advance`], [`distance`] and
//! [`rotate`](crate::algo::rotate) at compile time.

use crate::algo::rotate::{rotate_bidirectional, rotate_forward, rotate_random_access};
use core::{fmt, ptr};

/// Capability tier of a range, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Input,
    Forward,
    Bidirectional,
    RandomAccess,
}

/// Type-level tier.
pub trait Category {
    const TIER: Tier;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InputTag;
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardTag;
#[derive(Debug, Clone, Copy, Default)]
pub struct BidirectionalTag;
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAccessTag;

impl Category for InputTag {
    const TIER: Tier = Tier::Input;
}

impl Category for ForwardTag {
    const TIER: Tier = Tier::Forward;
}

impl Category for BidirectionalTag {
    const TIER: Tier = Tier::Bidirectional;
}

impl Category for RandomAccessTag {
    const TIER: Tier = Tier::RandomAccess;
}

/// A multi-pass sequence addressed by positions.
///
/// `end()` is one past the last element and must never be dereferenced.
pub trait ForwardSeq {
    type Item;
    type Pos: Copy + Eq + fmt::Debug;
    type Category: Category + Dispatch<Self>;

    fn begin(&self) -> Self::Pos;
    fn end(&self) -> Self::Pos;
    /// Position following `pos`.
    fn succ(&self, pos: Self::Pos) -> Self::Pos;
    /// Element at `pos`.
    fn at(&self, pos: Self::Pos) -> &Self::Item;
    /// Exchanges the elements at `a` and `b`.
    fn swap_at(&mut self, a: Self::Pos, b: Self::Pos);
}

pub trait BidirectionalSeq: ForwardSeq {
    /// Position preceding `pos`.
    fn pred(&self, pos: Self::Pos) -> Self::Pos;
}

pub trait RandomAccessSeq: BidirectionalSeq {
    /// Position `n` steps away from `pos`.
    fn jump(&self, pos: Self::Pos, n: isize) -> Self::Pos;
    /// Signed number of steps from `from` to `to`.
    fn span(&self, from: Self::Pos, to: Self::Pos) -> isize;
    /// Shifts one permutation cycle of the `len` elements starting at `first` back by `step`.
    ///
    /// The cycle visits the offsets `start`, `start + step`, `start + 2 * step` and so on,
    /// modulo `len`, until it comes back to `start`. The element at each offset moves to the
    /// previous offset of the cycle and the element at `start` moves to the last one, so every
    /// element of the cycle is moved exactly once.
    ///
    /// # Panics
    /// If `start >= len`, `step > len` or the `len` positions do not fit in the sequence.
    fn shift_cycle(&mut self, first: Self::Pos, len: usize, step: usize, start: usize);
}

/// Tier-specific strategies, selected through [`ForwardSeq::Category`].
pub trait Dispatch<S: ForwardSeq + ?Sized> {
    fn advance(seq: &S, pos: S::Pos, n: usize) -> S::Pos;
    fn distance(seq: &S, first: S::Pos, last: S::Pos) -> usize;
    fn rotate(seq: &mut S, first: S::Pos, middle: S::Pos, last: S::Pos) -> S::Pos;
}

fn step_forward<S: ForwardSeq + ?Sized>(seq: &S, mut pos: S::Pos, n: usize) -> S::Pos {
    for _ in 0..n {
        pos = seq.succ(pos);
    }
    pos
}

fn count_steps<S: ForwardSeq + ?Sized>(seq: &S, mut first: S::Pos, last: S::Pos) -> usize {
    let mut n = 0;
    while first != last {
        first = seq.succ(first);
        n += 1;
    }
    n
}

impl<S: ForwardSeq + ?Sized> Dispatch<S> for ForwardTag {
    #[inline]
    fn advance(seq: &S, pos: S::Pos, n: usize) -> S::Pos {
        step_forward(seq, pos, n)
    }

    #[inline]
    fn distance(seq: &S, first: S::Pos, last: S::Pos) -> usize {
        count_steps(seq, first, last)
    }

    #[inline]
    fn rotate(seq: &mut S, first: S::Pos, middle: S::Pos, last: S::Pos) -> S::Pos {
        rotate_forward(seq, first, middle, last)
    }
}

impl<S: BidirectionalSeq + ?Sized> Dispatch<S> for BidirectionalTag {
    #[inline]
    fn advance(seq: &S, pos: S::Pos, n: usize) -> S::Pos {
        step_forward(seq, pos, n)
    }

    #[inline]
    fn distance(seq: &S, first: S::Pos, last: S::Pos) -> usize {
        count_steps(seq, first, last)
    }

    #[inline]
    fn rotate(seq: &mut S, first: S::Pos, middle: S::Pos, last: S::Pos) -> S::Pos {
        rotate_bidirectional(seq, first, middle, last)
    }
}

impl<S: RandomAccessSeq + ?Sized> Dispatch<S> for RandomAccessTag {
    #[inline]
    fn advance(seq: &S, pos: S::Pos, n: usize) -> S::Pos {
        seq.jump(pos, n as isize)
    }

    #[inline]
    fn distance(seq: &S, first: S::Pos, last: S::Pos) -> usize {
        seq.span(first, last) as usize
    }

    #[inline]
    fn rotate(seq: &mut S, first: S::Pos, middle: S::Pos, last: S::Pos) -> S::Pos {
        rotate_random_access(seq, first, middle, last)
    }
}

/// Tier of a sequence.
#[inline]
pub fn tier<S: ForwardSeq + ?Sized>(_seq: &S) -> Tier {
    <S::Category as Category>::TIER
}

/// Position `n` steps after `pos`. Constant time on random-access sequences, linear otherwise.
#[inline]
pub fn advance<S: ForwardSeq + ?Sized>(seq: &S, pos: S::Pos, n: usize) -> S::Pos {
    <S::Category as Dispatch<S>>::advance(seq, pos, n)
}

/// Number of steps from `first` to `last`, which must be reachable from `first`.
#[inline]
pub fn distance<S: ForwardSeq + ?Sized>(seq: &S, first: S::Pos, last: S::Pos) -> usize {
    <S::Category as Dispatch<S>>::distance(seq, first, last)
}

impl<T> ForwardSeq for [T] {
    type Item = T;
    type Pos = usize;
    type Category = RandomAccessTag;

    #[inline]
    fn begin(&self) -> usize {
        0
    }

    #[inline]
    fn end(&self) -> usize {
        self.len()
    }

    #[inline]
    fn succ(&self, pos: usize) -> usize {
        pos + 1
    }

    #[inline]
    fn at(&self, pos: usize) -> &T {
        &self[pos]
    }

    #[inline]
    fn swap_at(&mut self, a: usize, b: usize) {
        self.swap(a, b)
    }
}

impl<T> BidirectionalSeq for [T] {
    #[inline]
    fn pred(&self, pos: usize) -> usize {
        pos - 1
    }
}

impl<T> RandomAccessSeq for [T] {
    #[inline]
    fn jump(&self, pos: usize, n: isize) -> usize {
        pos.wrapping_add_signed(n)
    }

    #[inline]
    fn span(&self, from: usize, to: usize) -> isize {
        to as isize - from as isize
    }

    fn shift_cycle(&mut self, first: usize, len: usize, step: usize, start: usize) {
        assert!(first <= self.len() && len <= self.len() - first);
        assert!(
            start < len && step <= len,
            "cycle of step {step} from {start} in {len}"
        );
        // SAFETY: every offset visited is below `len`, so it stays inside the slice. Offsets
        // of one cycle are distinct and nothing in the loop can panic, so the lifted element
        // is written back exactly once and no element is duplicated.
        unsafe {
            let base = self.as_mut_ptr().add(first);
            let lifted = ptr::read(base.add(start));
            let mut hole = start;
            loop {
                let mut next = hole + step;
                if next >= len {
                    next -= len;
                }
                if next == start {
                    break;
                }
                ptr::copy_nonoverlapping(base.add(next), base.add(hole), 1);
                hole = next;
            }
            ptr::write(base.add(hole), lifted);
        }
    }
}

/// A slice seen as a forward-only sequence.
#[derive(Debug)]
pub struct ForwardView<'a, T>(&'a mut [T]);

impl<'a, T> ForwardView<'a, T> {
    pub fn new(slice: &'a mut [T]) -> Self {
        Self(slice)
    }

    pub fn into_inner(self) -> &'a mut [T] {
        self.0
    }
}

impl<T> ForwardSeq for ForwardView<'_, T> {
    type Item = T;
    type Pos = usize;
    type Category = ForwardTag;

    fn begin(&self) -> usize {
        0
    }

    fn end(&self) -> usize {
        self.0.len()
    }

    fn succ(&self, pos: usize) -> usize {
        debug_assert!(pos < self.0.len(), "stepped past the end");
        pos + 1
    }

    fn at(&self, pos: usize) -> &T {
        &self.0[pos]
    }

    fn swap_at(&mut self, a: usize, b: usize) {
        self.0.swap(a, b)
    }
}

/// A slice seen as a bidirectional sequence.
#[derive(Debug)]
pub struct BidirectionalView<'a, T>(&'a mut [T]);

impl<'a, T> BidirectionalView<'a, T> {
    pub fn new(slice: &'a mut [T]) -> Self {
        Self(slice)
    }

    pub fn into_inner(self) -> &'a mut [T] {
        self.0
    }
}

impl<T> ForwardSeq for BidirectionalView<'_, T> {
    type Item = T;
    type Pos = usize;
    type Category = BidirectionalTag;

    fn begin(&self) -> usize {
        0
    }

    fn end(&self) -> usize {
        self.0.len()
    }

    fn succ(&self, pos: usize) -> usize {
        debug_assert!(pos < self.0.len(), "stepped past the end");
        pos + 1
    }

    fn at(&self, pos: usize) -> &T {
        &self.0[pos]
    }

    fn swap_at(&mut self, a: usize, b: usize) {
        self.0.swap(a, b)
    }
}

impl<T> BidirectionalSeq for BidirectionalView<'_, T> {
    fn pred(&self, pos: usize) -> usize {
        debug_assert!(pos > 0, "stepped before the beginning");
        pos - 1
    }
}
