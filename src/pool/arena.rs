//! Unallocated pool memory.

use core::{alloc::Layout, ptr::NonNull};

/// A chunk obtained from the backing allocator. Returned to it when the pool is dropped.
#[derive(Debug)]
pub(crate) struct Chunk {
    pub(crate) ptr: NonNull<u8>,
    pub(crate) layout: Layout,
}

impl Chunk {
    pub(crate) fn contains(&self, ptr: NonNull<u8>, len: usize) -> bool {
        let start = self.ptr.as_ptr() as usize;
        let end = start.saturating_add(self.layout.size());
        let alloc_start = ptr.as_ptr() as usize;
        let alloc_end = alloc_start.saturating_add(len);
        start <= alloc_start && end >= alloc_end
    }
}

/// The leftover `[start, start + len)` region blocks are carved from.
///
/// The region always lies inside a single chunk, or inside a free block that was scavenged
/// as emergency space.
#[derive(Debug)]
pub(crate) struct Arena {
    start: NonNull<u8>,
    len: usize,
}

impl Arena {
    pub(crate) const fn empty() -> Self {
        Self {
            start: NonNull::dangling(),
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Replaces the region. Whatever was left of the old one must have been salvaged already.
    pub(crate) fn reset(&mut self, start: NonNull<u8>, len: usize) {
        debug_assert_eq!(self.len, 0, "arena leftovers would leak");
        self.start = start;
        self.len = len;
    }

    /// Slices `bytes` off the front of the region.
    ///
    /// # Panics
    /// Panics if the region is shorter than `bytes`.
    pub(crate) fn take(&mut self, bytes: usize) -> NonNull<u8> {
        assert!(bytes <= self.len, "arena overrun");
        let block = self.start;
        // SAFETY: `bytes <= len`, so the new start stays within (or one past) the region.
        self.start = unsafe { self.start.add(bytes) };
        self.len -= bytes;
        block
    }
}
