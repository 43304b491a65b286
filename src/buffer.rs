//! Scratch storage for buffer-adaptive algorithms.

use allocator_api2::alloc::{Allocator, Global};
use core::{alloc::Layout, marker::PhantomData, mem, ptr::NonNull};
use log::debug;

/// Uninitialized room for up to [`capacity`](TempBuffer::capacity) values of `T`.
///
/// Getting a buffer never fails: when the allocator refuses the requested length, the request
/// is halved until it succeeds or reaches zero. Callers treat a short or empty buffer as a
/// hint to fall back to slower in-place algorithms.
///
/// The buffer never owns values: whatever is moved into it must be moved back out before it
/// is dropped.
pub struct TempBuffer<T, A: Allocator = Global> {
    ptr: NonNull<T>,
    capacity: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

impl<T> TempBuffer<T> {
    /// Gets a buffer from the global allocator.
    pub fn new(requested: usize) -> Self {
        Self::new_in(requested, Global)
    }
}

impl<T, A: Allocator> TempBuffer<T, A> {
    /// Gets a buffer of at most `requested` values from `alloc`.
    pub fn new_in(requested: usize, alloc: A) -> Self {
        let max = isize::MAX as usize / mem::size_of::<T>().max(1);
        let mut len = requested.min(max);
        while len > 0 {
            let block = Layout::array::<T>(len)
                .ok()
                .and_then(|layout| alloc.allocate(layout).ok());
            if let Some(block) = block {
                if len < requested {
                    debug!("temporary buffer shrunk from {requested} to {len} elements");
                }
                return Self {
                    ptr: block.cast(),
                    capacity: len,
                    alloc,
                    _marker: PhantomData,
                };
            }
            len /= 2;
        }
        if requested > 0 {
            debug!("no temporary buffer available for {requested} elements");
        }
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Number of values the buffer has room for.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.capacity == 0
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }
}

impl<T, A: Allocator> Drop for TempBuffer<T, A> {
    fn drop(&mut self) {
        if self.capacity == 0 {
            return;
        }
        // SAFETY: this layout was accepted by `Layout::array` when the buffer was allocated.
        unsafe {
            let layout = Layout::array::<T>(self.capacity).unwrap_unchecked();
            self.alloc.deallocate(self.ptr.cast(), layout);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{alloc::Failing, AllocatorExt as _};

    #[test]
    fn buffer_gets_the_requested_length() {
        let buf = TempBuffer::<u64>::new(100);
        assert_eq!(buf.capacity(), 100);
    }

    #[test]
    fn refused_request_is_halved() {
        let alloc = Global.budgeted(8 * 30);
        let buf = TempBuffer::<u64, _>::new_in(100, &alloc);
        // 100 and 50 do not fit, 25 does
        assert_eq!(buf.capacity(), 25);
        drop(buf);
        assert_eq!(alloc.remaining(), 8 * 30);
    }

    #[test]
    fn failing_allocator_gives_an_empty_buffer() {
        let buf = TempBuffer::<u64, _>::new_in(100, Failing);
        assert!(buf.is_empty());
    }

    #[test]
    fn zero_request_does_not_allocate() {
        let alloc = Global.counted();
        let buf = TempBuffer::<u64, _>::new_in(0, &alloc);
        assert!(buf.is_empty());
        assert_eq!(alloc.allocations(), 0);
    }
}
