//! Binary max-heap over a slice.
//!
//! The root lives at index 0 and the children of `i` at `2i + 1` and `2i + 2`. A slice is a
//! heap when no element is less than one of its children.

/// Pushes `v[len - 1]` onto the heap `v[..len - 1]`.
#[inline]
pub fn push_heap<T: Ord>(v: &mut [T]) {
    push_heap_by(v, T::lt)
}

pub fn push_heap_by<T, F>(v: &mut [T], mut is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    if v.len() > 1 {
        sift_up(v, 0, v.len() - 1, &mut is_less);
    }
}

/// Moves the maximum of the heap `v` to `v[len - 1]` and turns `v[..len - 1]` back into a heap.
#[inline]
pub fn pop_heap<T: Ord>(v: &mut [T]) {
    pop_heap_by(v, T::lt)
}

pub fn pop_heap_by<T, F>(v: &mut [T], mut is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    pop_heap_inner(v, &mut is_less)
}

/// Rearranges `v` into a heap in linear time.
#[inline]
pub fn make_heap<T: Ord>(v: &mut [T]) {
    make_heap_by(v, T::lt)
}

pub fn make_heap_by<T, F>(v: &mut [T], mut is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    make_heap_inner(v, &mut is_less)
}

/// Turns the heap `v` into an ascending sequence.
#[inline]
pub fn sort_heap<T: Ord>(v: &mut [T]) {
    sort_heap_by(v, T::lt)
}

pub fn sort_heap_by<T, F>(v: &mut [T], mut is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    sort_heap_inner(v, &mut is_less)
}

/// Returns `true` if `v` is a heap.
#[inline]
pub fn is_heap<T: Ord>(v: &[T]) -> bool {
    is_heap_by(v, T::lt)
}

pub fn is_heap_by<T, F>(v: &[T], mut is_less: F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    (1..v.len()).all(|child| !is_less(&v[(child - 1) / 2], &v[child]))
}

pub(crate) fn make_heap_inner<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if len < 2 {
        return;
    }
    for hole in (0..=(len - 2) / 2).rev() {
        adjust_heap(v, hole, is_less);
    }
}

pub(crate) fn pop_heap_inner<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if len < 2 {
        return;
    }
    v.swap(0, len - 1);
    adjust_heap(&mut v[..len - 1], 0, is_less);
}

pub(crate) fn sort_heap_inner<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    for end in (2..=v.len()).rev() {
        pop_heap_inner(&mut v[..end], is_less);
    }
}

/// Moves the value at `hole` up while its parent is less than it, stopping at `top`.
fn sift_up<T, F>(v: &mut [T], top: usize, mut hole: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    while hole > top {
        let parent = (hole - 1) / 2;
        if !is_less(&v[parent], &v[hole]) {
            break;
        }
        v.swap(parent, hole);
        hole = parent;
    }
}

/// Restores the heap property of the subtree rooted at `top`, whose children are heaps.
///
/// The value first sinks all the way to a leaf along the larger children, then rises back to
/// its place. This takes about half the comparisons of stopping on the way down.
pub(crate) fn adjust_heap<T, F>(v: &mut [T], top: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    let mut hole = top;
    let mut child = 2 * hole + 2;
    while child < len {
        // the right child, unless it is smaller than the left one
        if is_less(&v[child], &v[child - 1]) {
            child -= 1;
        }
        v.swap(hole, child);
        hole = child;
        child = 2 * child + 2;
    }
    if child == len {
        v.swap(hole, child - 1);
        hole = child - 1;
    }
    sift_up(v, top, hole, is_less);
}
