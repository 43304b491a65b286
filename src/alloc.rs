//! Basic allocators.

use crate::ArenaAllocator;
use allocator_api2::alloc::{AllocError, Allocator};
use core::{alloc::Layout, ptr::NonNull};

/// Allocator that always fails allocation.
///
/// Deallocation is a no-op. Backing a [`Pool`](crate::Pool) with it, or handing it to
/// [`inplace_merge_in`](crate::algo::inplace_merge_in), exercises the out-of-memory and
/// no-buffer paths.
#[derive(Debug, Default, Clone, Copy)]
pub struct Failing;

unsafe impl Allocator for Failing {
    #[inline]
    fn allocate(&self, _layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        Err(AllocError)
    }

    #[inline]
    unsafe fn deallocate(&self, _ptr: NonNull<u8>, _layout: Layout) {}
}

impl ArenaAllocator for Failing {
    #[inline]
    fn contains(&self, _ptr: NonNull<u8>, _layout: Layout) -> bool {
        false
    }
}

/// Re-export of [`bumpalo::Bump`](https://docs.rs/bumpalo/latest/bumpalo/struct.Bump.html).
#[cfg(feature = "bumpalo")]
pub use bumpalo::Bump;

#[cfg(feature = "bumpalo")]
impl ArenaAllocator for &Bump {
    fn contains(&self, ptr: NonNull<u8>, layout: Layout) -> bool {
        unsafe {
            self.iter_allocated_chunks_raw()
                .any(|(chunk_ptr, chunk_size)| {
                    let chunk_start = chunk_ptr as usize;
                    let chunk_end = chunk_start.saturating_add(chunk_size);
                    let alloc_start = ptr.as_ptr() as usize;
                    let alloc_end = alloc_start.saturating_add(layout.size());
                    chunk_start <= alloc_start && chunk_end >= alloc_end
                })
        }
    }
}
