//! Pool allocator and generic algorithms library.
//!
//! `algopool` has two halves:
//! - [`Pool`], a segregated free-list allocator for small objects with fixed size classes,
//!   chunked arena growth and direct fallback to a backing allocator for large requests;
//! - [`algo`], generic algorithms over ranges: introsort, binary heaps, buffer-adaptive
//!   in-place merge and rotation, binary search and set operations. Algorithms pick the
//!   fastest variant the range supports through the capability tiers in [`iter`].
//!
//! This crate depends on [`allocator-api2`](https://crates.io/crates/allocator-api2), a polyfill
//! for the unstable [`allocator_api`](https://doc.rust-lang.org/unstable-book/library-features/allocator-api.html) feature,
//! so a [`Pool`] can back any `allocator_api2` container.
//!
//! # Usage
//! ```
//! use algopool::{algo, prelude::*, Pool};
//! use allocator_api2::vec::Vec;
//!
//! let pool = Pool::new();
//! let mut v = Vec::new_in(&pool);
//! v.extend([5, 3, 8, 1, 9, 2, 7, 4, 6, 0]);
//! algo::sort(&mut v);
//! assert_eq!(v[..], [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
//! ```
//!
//! # Feature flags
//! - `bumpalo` lets a [`bumpalo::Bump`] back a pool and report ownership of its memory.
#![cfg_attr(not(test), no_std)]

use allocator_api2::alloc::Allocator;
use combinator::{Budget, Counting};
use core::{alloc::Layout, ptr::NonNull};

#[cfg(feature = "bumpalo")]
pub use bumpalo;

pub mod algo;
pub mod alloc;
pub mod buffer;
pub mod combinator;
pub mod error;
pub mod iter;
pub mod pool;

pub use error::PoolError;
pub use pool::{Pool, PoolConfig, PoolStats, SizeClass};

/// Prelude exports all the allocator-related traits.
pub mod prelude {
    pub use crate::{AllocatorExt as _, ArenaAllocator as _};
    pub use allocator_api2::alloc::Allocator as _;
}

/// Allocator that uses region-based memory management.
pub trait ArenaAllocator: Allocator {
    /// Returns `true` if the allocation specified by `ptr` and `layout` is within the allocator's arena.
    fn contains(&self, ptr: NonNull<u8>, layout: Layout) -> bool;
}

impl<A> ArenaAllocator for &A
where
    A: ArenaAllocator,
{
    #[inline]
    fn contains(&self, ptr: NonNull<u8>, layout: Layout) -> bool {
        (*self).contains(ptr, layout)
    }
}

/// Extension trait for [`Allocator`] trait that wraps an allocator in a pool or an
/// instrumenting combinator.
pub trait AllocatorExt: Sized {
    /// Puts a free-list [`Pool`] in front of the allocator, which then only supplies chunks and
    /// large objects.
    ///
    /// # Example
    /// ```
    /// use algopool::prelude::*;
    /// use allocator_api2::alloc::Global;
    ///
    /// let pool = Global.counted().pooled();
    /// let a = pool.allocate_bytes(48).unwrap();
    /// let b = pool.allocate_bytes(48).unwrap();
    /// // one chunk served both blocks
    /// assert_eq!(pool.backing().allocations(), 1);
    /// # unsafe { pool.deallocate_bytes(a, 48); pool.deallocate_bytes(b, 48) };
    /// ```
    fn pooled(self) -> Pool<Self>
    where
        Self: Allocator,
    {
        Pool::new_in(self)
    }

    /// Counts the allocations, deallocations and live bytes passing through the allocator.
    fn counted(self) -> Counting<Self> {
        Counting::new(self)
    }

    /// Caps the number of bytes that can be live in the allocator at any time.
    ///
    /// # Example
    /// ```
    /// use algopool::prelude::*;
    /// use allocator_api2::alloc::Global;
    /// use std::alloc::Layout;
    ///
    /// let alloc = Global.budgeted(64);
    /// let layout = Layout::from_size_align(48, 8).unwrap();
    /// let ptr = alloc.allocate(layout).unwrap();
    /// assert!(alloc.allocate(layout).is_err());
    /// unsafe { alloc.deallocate(ptr.cast(), layout) };
    /// assert!(alloc.allocate(layout).is_ok());
    /// ```
    fn budgeted(self, bytes: usize) -> Budget<Self> {
        Budget::new(self, bytes)
    }
}

impl<A: Allocator> AllocatorExt for A {}
