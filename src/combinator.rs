//! Allocator combinators.

use crate::ArenaAllocator;
use allocator_api2::alloc::{AllocError, Allocator};
use core::{alloc::Layout, cell::Cell, ptr::NonNull};

/// Counts what passes through the inner allocator.
#[derive(Debug, Default)]
pub struct Counting<A> {
    inner: A,
    allocations: Cell<usize>,
    deallocations: Cell<usize>,
    live_bytes: Cell<usize>,
}

impl<A> Counting<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            allocations: Cell::new(0),
            deallocations: Cell::new(0),
            live_bytes: Cell::new(0),
        }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Successful allocations so far.
    pub fn allocations(&self) -> usize {
        self.allocations.get()
    }

    pub fn deallocations(&self) -> usize {
        self.deallocations.get()
    }

    /// Bytes allocated and not yet deallocated, as described by the layouts.
    pub fn live_bytes(&self) -> usize {
        self.live_bytes.get()
    }
}

unsafe impl<A> Allocator for Counting<A>
where
    A: Allocator,
{
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        let block = self.inner.allocate(layout)?;
        self.allocations.set(self.allocations.get() + 1);
        self.live_bytes.set(self.live_bytes.get() + layout.size());
        Ok(block)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.deallocations.set(self.deallocations.get() + 1);
        self.live_bytes.set(self.live_bytes.get() - layout.size());
        self.inner.deallocate(ptr, layout)
    }
}

impl<A> ArenaAllocator for Counting<A>
where
    A: ArenaAllocator,
{
    fn contains(&self, ptr: NonNull<u8>, layout: Layout) -> bool {
        self.inner.contains(ptr, layout)
    }
}

/// Refuses any allocation that would push the live bytes of the inner allocator past a limit.
#[derive(Debug)]
pub struct Budget<A> {
    inner: A,
    remaining: Cell<usize>,
}

impl<A> Budget<A> {
    pub fn new(inner: A, bytes: usize) -> Self {
        Self {
            inner,
            remaining: Cell::new(bytes),
        }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Bytes that can still be allocated.
    pub fn remaining(&self) -> usize {
        self.remaining.get()
    }
}

unsafe impl<A> Allocator for Budget<A>
where
    A: Allocator,
{
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        let remaining = self.remaining.get();
        if layout.size() > remaining {
            return Err(AllocError);
        }
        let block = self.inner.allocate(layout)?;
        self.remaining.set(remaining - layout.size());
        Ok(block)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.remaining.set(self.remaining.get() + layout.size());
        self.inner.deallocate(ptr, layout)
    }
}

impl<A> ArenaAllocator for Budget<A>
where
    A: ArenaAllocator,
{
    fn contains(&self, ptr: NonNull<u8>, layout: Layout) -> bool {
        self.inner.contains(ptr, layout)
    }
}
