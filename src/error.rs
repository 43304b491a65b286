//! Allocation errors.

use allocator_api2::alloc::AllocError;
use thiserror::Error;

/// The error returned when the pool cannot satisfy a request.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// The backing allocator refused a new chunk and no free block of a large enough size
    /// class was left to serve as emergency arena space.
    #[error("out of memory: could not obtain {requested} bytes from the backing allocator")]
    OutOfMemory { requested: usize },

    /// The byte count cannot be described by a valid [`Layout`](core::alloc::Layout).
    #[error("allocation of {size} bytes overflows the address space")]
    SizeOverflow { size: usize },
}

impl From<PoolError> for AllocError {
    #[inline]
    fn from(_: PoolError) -> Self {
        AllocError
    }
}
