//! Segregated free-list pool allocator.
//!
//! Small requests (up to [`MAX_SMALL_BYTES`]) are rounded up to one of [`CLASS_COUNT`] size
//! classes and served from that class's free list. An empty list is refilled with a batch of
//! blocks carved from the arena, a leftover region of the last chunk obtained from the backing
//! allocator. Bigger requests bypass the pool entirely.

mod arena;
mod size_class;

pub use size_class::{
    granularity, round_up, SizeClass, CLASS_COUNT, MAX_SMALL_BYTES, MIN_ALIGN, REFILL_BLOCKS,
};

use crate::{error::PoolError, ArenaAllocator};
use allocator_api2::{
    alloc::{AllocError, Allocator, Global},
    vec::Vec,
};
use arena::{Arena, Chunk};
use core::{alloc::Layout, cell::RefCell, ptr::NonNull};
use log::{debug, error, trace, warn};

/// Alignment of chunks requested from the backing allocator.
const CHUNK_ALIGN: usize = 16;

/// Tunables of a [`Pool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Blocks carved per refill of an empty free list.
    pub refill_blocks: usize,
    /// Every new chunk is padded by `heap_size >> growth_shift` bytes, so chunks grow with
    /// the total amount of memory the pool has ever requested.
    pub growth_shift: u32,
}

impl Default for PoolConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl PoolConfig {
    #[inline]
    pub const fn new() -> Self {
        Self {
            refill_blocks: REFILL_BLOCKS,
            growth_shift: 4,
        }
    }

    /// Sets the refill batch size. A batch holds at least one block.
    #[inline]
    pub const fn with_refill_blocks(mut self, blocks: usize) -> Self {
        self.refill_blocks = if blocks == 0 { 1 } else { blocks };
        self
    }

    #[inline]
    pub const fn with_growth_shift(mut self, shift: u32) -> Self {
        self.growth_shift = shift;
        self
    }
}

/// Counters describing what a [`Pool`] has done so far.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Chunks obtained from the backing allocator.
    pub chunks: usize,
    /// Total bytes ever requested for chunks.
    pub heap_size: usize,
    /// Number of times an empty free list was refilled.
    pub refills: usize,
    /// Requests that bypassed the pool.
    pub large_allocations: usize,
    /// Free blocks reused as arena space after the backing allocator failed.
    pub scavenged: usize,
}

#[derive(Debug)]
struct State {
    arena: Arena,
    free_lists: [Vec<NonNull<u8>>; CLASS_COUNT],
    /// Blocks of each class carved so far, free or handed out.
    carved: [usize; CLASS_COUNT],
    chunks: Vec<Chunk>,
    stats: PoolStats,
}

/// Fixed-size-class memory pool.
///
/// The pool is an explicit context object: every allocation goes through a `&Pool`, and all
/// of its memory goes back to the backing allocator when it is dropped. It is neither `Send`
/// nor `Sync`; share it across threads only behind your own lock.
///
/// Free lists and chunk records are kept in the global allocator, not in `backing`. Every
/// free list reserves a slot for each block of its class when the block is carved, so
/// returning a block never allocates.
///
/// # Example
/// ```
/// use algopool::prelude::*;
/// use algopool::Pool;
///
/// let pool = Pool::new();
/// let a = pool.allocate_bytes(24).unwrap();
/// unsafe { pool.deallocate_bytes(a, 24) };
///
/// // freed blocks are handed out again, most recent first
/// let b = pool.allocate_bytes(20).unwrap();
/// assert_eq!(a, b);
///
/// let mut v = allocator_api2::vec::Vec::new_in(&pool);
/// v.extend([3, 1, 2]);
/// assert_eq!(v.len(), 3);
/// ```
#[derive(Debug)]
pub struct Pool<A: Allocator = Global> {
    backing: A,
    config: PoolConfig,
    state: RefCell<State>,
}

impl Pool<Global> {
    /// Creates an empty pool backed by the global allocator.
    #[inline]
    pub fn new() -> Self {
        Self::new_in(Global)
    }
}

impl Default for Pool<Global> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Allocator> Pool<A> {
    /// Creates an empty pool that takes its chunks from `backing`.
    ///
    /// No memory is requested until the first allocation.
    #[inline]
    pub fn new_in(backing: A) -> Self {
        Self::with_config_in(PoolConfig::default(), backing)
    }

    pub fn with_config_in(config: PoolConfig, backing: A) -> Self {
        Self {
            backing,
            config: config.with_refill_blocks(config.refill_blocks),
            state: RefCell::new(State::new()),
        }
    }

    #[inline]
    pub fn config(&self) -> PoolConfig {
        self.config
    }

    /// The allocator chunks and large objects come from.
    #[inline]
    pub fn backing(&self) -> &A {
        &self.backing
    }

    #[inline]
    pub fn stats(&self) -> PoolStats {
        self.state.borrow().stats
    }

    /// Number of blocks currently waiting in the free list of `class`.
    pub fn free_count(&self, class: SizeClass) -> usize {
        self.state.borrow().free_lists[class.index()].len()
    }

    /// Bytes left in the arena.
    pub fn arena_len(&self) -> usize {
        self.state.borrow().arena.len()
    }

    /// Allocates at least `bytes` uninitialized bytes, aligned to [`MIN_ALIGN`].
    ///
    /// Requests up to [`MAX_SMALL_BYTES`] are rounded up to their size class; zero-byte
    /// requests get a block of the smallest class.
    pub fn allocate_bytes(&self, bytes: usize) -> Result<NonNull<u8>, PoolError> {
        let Some(class) = SizeClass::for_size(bytes) else {
            return self.allocate_large(bytes);
        };
        let mut state = self.state.borrow_mut();
        let block = match state.free_lists[class.index()].pop() {
            Some(block) => block,
            None => state.refill(class, &self.backing, &self.config)?,
        };
        trace!("allocated {} bytes at {:p} (class {})", bytes, block, class.index());
        Ok(block)
    }

    /// Returns a block to the pool.
    ///
    /// # Safety
    /// `ptr` must have been returned by [`allocate_bytes`](Pool::allocate_bytes) or
    /// [`reallocate_bytes`](Pool::reallocate_bytes) of this pool for a request that rounds to
    /// the same size class as `bytes` (or exactly `bytes`, above [`MAX_SMALL_BYTES`]), and must
    /// not be used afterwards.
    pub unsafe fn deallocate_bytes(&self, ptr: NonNull<u8>, bytes: usize) {
        match SizeClass::for_size(bytes) {
            Some(class) => {
                debug_assert!(
                    self.contains(
                        ptr,
                        Layout::from_size_align_unchecked(class.block_size(), MIN_ALIGN)
                    ),
                    "block {ptr:p} does not belong to this pool"
                );
                trace!("freed {} bytes at {:p} (class {})", bytes, ptr, class.index());
                self.state.borrow_mut().free_lists[class.index()].push(ptr);
            }
            None => {
                trace!("returning large block {:p} of {} bytes", ptr, bytes);
                self.backing
                    .deallocate(ptr, Layout::from_size_align_unchecked(bytes, MIN_ALIGN));
            }
        }
    }

    /// Moves an allocation of `old` bytes into one of `new` bytes.
    ///
    /// If both sizes fall in the same size class the block is returned as is. Otherwise a new
    /// block is allocated, the first `min(old, new)` bytes are copied and the old block is
    /// released. On failure the old block is left untouched.
    ///
    /// # Safety
    /// Same requirements on `ptr` and `old` as [`deallocate_bytes`](Pool::deallocate_bytes).
    pub unsafe fn reallocate_bytes(
        &self,
        ptr: NonNull<u8>,
        old: usize,
        new: usize,
    ) -> Result<NonNull<u8>, PoolError> {
        let old_class = SizeClass::for_size(old);
        if old_class.is_some() && old_class == SizeClass::for_size(new) {
            return Ok(ptr);
        }
        let fresh = self.allocate_bytes(new)?;
        core::ptr::copy_nonoverlapping(ptr.as_ptr(), fresh.as_ptr(), old.min(new));
        self.deallocate_bytes(ptr, old);
        Ok(fresh)
    }

    fn allocate_large(&self, bytes: usize) -> Result<NonNull<u8>, PoolError> {
        let layout = Layout::from_size_align(bytes, MIN_ALIGN)
            .map_err(|_| PoolError::SizeOverflow { size: bytes })?;
        let block = self.backing.allocate(layout).map_err(|_| {
            error!("backing allocator refused a large block of {bytes} bytes");
            PoolError::OutOfMemory { requested: bytes }
        })?;
        self.state.borrow_mut().stats.large_allocations += 1;
        trace!("bypassed pool for {} bytes at {:p}", bytes, block.cast::<u8>());
        Ok(block.cast())
    }
}

impl State {
    fn new() -> Self {
        Self {
            arena: Arena::empty(),
            free_lists: core::array::from_fn(|_| Vec::new()),
            carved: [0; CLASS_COUNT],
            chunks: Vec::new(),
            stats: PoolStats::default(),
        }
    }

    /// Carves a batch for `class`, keeps all but the first block in its free list and hands
    /// the first one out.
    fn refill<A: Allocator>(
        &mut self,
        class: SizeClass,
        backing: &A,
        config: &PoolConfig,
    ) -> Result<NonNull<u8>, PoolError> {
        let size = class.block_size();
        if !self.reserve_free_slots(class, config.refill_blocks) {
            error!(
                "no room to track {} more blocks of class {}",
                config.refill_blocks,
                class.index()
            );
            return Err(PoolError::OutOfMemory {
                requested: config.refill_blocks * core::mem::size_of::<NonNull<u8>>(),
            });
        }
        let (start, count) = self.chunk_alloc(class, config.refill_blocks, backing, config)?;
        self.carved[class.index()] += count;
        self.stats.refills += 1;
        debug!(
            "refilled class {} ({} bytes) with {} blocks",
            class.index(),
            size,
            count
        );
        let list = &mut self.free_lists[class.index()];
        // pushed back to front so the lowest address is popped first
        for i in (1..count).rev() {
            // SAFETY: `chunk_alloc` returned `count * size` contiguous bytes.
            list.push(unsafe { start.add(i * size) });
        }
        Ok(start)
    }

    /// Takes up to `wanted` blocks of `class` from the arena, growing it when needed.
    ///
    /// Returns the start of the batch and the number of blocks in it (at least one).
    fn chunk_alloc<A: Allocator>(
        &mut self,
        class: SizeClass,
        wanted: usize,
        backing: &A,
        config: &PoolConfig,
    ) -> Result<(NonNull<u8>, usize), PoolError> {
        let size = class.block_size();
        let need = size
            .checked_mul(wanted)
            .ok_or(PoolError::SizeOverflow { size })?;
        loop {
            let left = self.arena.len();
            if left >= need {
                return Ok((self.arena.take(need), wanted));
            }
            if left >= size {
                let count = left / size;
                return Ok((self.arena.take(count * size), count));
            }

            self.salvage_leftovers();
            let growth = round_up(self.stats.heap_size >> config.growth_shift);
            let request = need
                .checked_mul(2)
                .and_then(|bytes| bytes.checked_add(growth))
                .ok_or(PoolError::SizeOverflow { size: need })?;
            let chunk = Layout::from_size_align(request, CHUNK_ALIGN)
                .ok()
                .and_then(|layout| Some((backing.allocate(layout).ok()?, layout)));

            match chunk {
                Some((ptr, layout)) => {
                    debug!(
                        "got a chunk of {} bytes from the backing allocator (heap size {})",
                        request,
                        self.stats.heap_size + request
                    );
                    let ptr = ptr.cast::<u8>();
                    self.stats.heap_size += request;
                    self.stats.chunks += 1;
                    self.chunks.push(Chunk { ptr, layout });
                    self.arena.reset(ptr, request);
                }
                None => match self.scavenge(class) {
                    Some((block, len)) => {
                        warn!(
                            "backing allocator refused {} bytes, reusing a free {}-byte block",
                            request, len
                        );
                        self.arena.reset(block, len);
                    }
                    None => {
                        error!(
                            "backing allocator refused {} bytes and no free block is left",
                            request
                        );
                        return Err(PoolError::OutOfMemory { requested: request });
                    }
                },
            }
        }
    }

    /// Makes sure the free list of `class` can hold every carved block plus `extra` more
    /// without reallocating.
    fn reserve_free_slots(&mut self, class: SizeClass, extra: usize) -> bool {
        let wanted = self.carved[class.index()] + extra;
        let list = &mut self.free_lists[class.index()];
        list.try_reserve(wanted.saturating_sub(list.len())).is_ok()
    }

    /// Donates whatever is left in the arena to the free lists, largest fitting class first.
    fn salvage_leftovers(&mut self) {
        while let Some(class) = SizeClass::largest_within(self.arena.len()) {
            if !self.reserve_free_slots(class, 1) {
                warn!("dropping {} leftover bytes", self.arena.len());
                return;
            }
            let block = self.arena.take(class.block_size());
            self.carved[class.index()] += 1;
            debug!(
                "salvaged {} leftover bytes into class {}",
                class.block_size(),
                class.index()
            );
            self.free_lists[class.index()].push(block);
        }
    }

    /// Pops a free block of `from` or any larger class to serve as emergency arena space.
    fn scavenge(&mut self, from: SizeClass) -> Option<(NonNull<u8>, usize)> {
        for class in from.and_larger() {
            if let Some(block) = self.free_lists[class.index()].pop() {
                self.carved[class.index()] -= 1;
                self.stats.scavenged += 1;
                return Some((block, class.block_size()));
            }
        }
        None
    }
}

unsafe impl<A: Allocator> Allocator for Pool<A> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        if layout.align() > MIN_ALIGN {
            return self.backing.allocate(layout);
        }
        let ptr = self.allocate_bytes(layout.size())?;
        let len = SizeClass::for_size(layout.size()).map_or(layout.size(), SizeClass::block_size);
        Ok(NonNull::slice_from_raw_parts(ptr, len))
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.align() > MIN_ALIGN {
            self.backing.deallocate(ptr, layout)
        } else {
            self.deallocate_bytes(ptr, layout.size())
        }
    }
}

impl<A: Allocator> ArenaAllocator for Pool<A> {
    fn contains(&self, ptr: NonNull<u8>, layout: Layout) -> bool {
        self.state
            .borrow()
            .chunks
            .iter()
            .any(|chunk| chunk.contains(ptr, layout.size()))
    }
}

impl<A: Allocator> Drop for Pool<A> {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        while let Some(chunk) = state.chunks.pop() {
            // SAFETY: every chunk was allocated from `backing` with exactly this layout.
            unsafe { self.backing.deallocate(chunk.ptr, chunk.layout) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{alloc::Failing, AllocatorExt as _};
    use std::vec::Vec as StdVec;

    fn class(bytes: usize) -> SizeClass {
        SizeClass::for_size(bytes).unwrap()
    }

    #[test]
    fn first_allocation_refills_the_class() {
        let pool = Pool::new();
        pool.allocate_bytes(8).unwrap();

        let stats = pool.stats();
        assert_eq!(stats.chunks, 1);
        assert_eq!(stats.heap_size, 2 * 8 * REFILL_BLOCKS);
        assert_eq!(stats.refills, 1);
        assert_eq!(pool.free_count(class(8)), REFILL_BLOCKS - 1);
        assert_eq!(pool.arena_len(), 8 * REFILL_BLOCKS);
    }

    #[test]
    fn short_arena_yields_a_smaller_batch() {
        let pool = Pool::new();
        pool.allocate_bytes(8).unwrap();
        // 160 bytes left, a full batch of 16-byte blocks needs 320
        pool.allocate_bytes(16).unwrap();

        assert_eq!(pool.stats().chunks, 1);
        assert_eq!(pool.free_count(class(16)), 9);
        assert_eq!(pool.arena_len(), 0);
    }

    #[test]
    fn chunk_size_grows_with_heap_size() {
        let pool = Pool::new();
        for _ in 0..=REFILL_BLOCKS {
            pool.allocate_bytes(8).unwrap();
        }
        pool.allocate_bytes(16).unwrap();
        // second chunk: 2 * 320 + round_up(320 / 16)
        pool.allocate_bytes(16).unwrap();
        pool.allocate_bytes(16).unwrap();
        let first = 2 * 8 * REFILL_BLOCKS;
        let stats = pool.stats();
        assert_eq!(stats.chunks, 2);
        assert_eq!(stats.heap_size, first + 2 * 16 * REFILL_BLOCKS + round_up(first >> 4));
    }

    #[test]
    fn leftovers_are_salvaged_into_exact_classes() {
        let pool = Pool::new();
        pool.allocate_bytes(8).unwrap();
        assert_eq!(pool.arena_len(), 160);

        pool.allocate_bytes(200).unwrap();
        assert_eq!(pool.free_count(class(160)), 1);
        assert_eq!(pool.free_count(class(200)), REFILL_BLOCKS - 1);
        let request = 2 * 208 * REFILL_BLOCKS + round_up(320 >> 4);
        assert_eq!(pool.arena_len(), request - 208 * REFILL_BLOCKS);
    }

    #[test]
    fn freed_block_is_reused_immediately() {
        let pool = Pool::new();
        let a = pool.allocate_bytes(40).unwrap();
        unsafe { pool.deallocate_bytes(a, 40) };
        let b = pool.allocate_bytes(33).unwrap();
        assert_eq!(a, b);
        assert_eq!(pool.stats().refills, 1);
    }

    #[test]
    fn live_blocks_never_alias() {
        let pool = Pool::new();
        let mut live = StdVec::new();
        for bytes in (1..=MAX_SMALL_BYTES).step_by(37) {
            let ptr = pool.allocate_bytes(bytes).unwrap();
            unsafe { ptr.as_ptr().write_bytes(bytes as u8, bytes) };
            live.push((ptr.as_ptr() as usize, bytes));
        }
        live.sort_unstable();
        for pair in live.windows(2) {
            let (start, bytes) = pair[0];
            assert!(start + class(bytes).block_size() <= pair[1].0);
        }
        for (start, bytes) in live {
            let block = unsafe { core::slice::from_raw_parts(start as *const u8, bytes) };
            assert!(block.iter().all(|&b| b == bytes as u8));
        }
    }

    #[test]
    fn large_objects_bypass_the_free_lists() {
        let pool = Pool::new_in(Global.counted());
        let ptr = pool.allocate_bytes(5000).unwrap();
        assert_eq!(pool.backing().allocations(), 1);
        unsafe { pool.deallocate_bytes(ptr, 5000) };
        assert_eq!(pool.backing().deallocations(), 1);

        let stats = pool.stats();
        assert_eq!(stats.chunks, 0);
        assert_eq!(stats.large_allocations, 1);
        assert!(SizeClass::MIN.and_larger().all(|c| pool.free_count(c) == 0));
    }

    #[test]
    fn over_aligned_layouts_bypass_the_free_lists() {
        let pool = Pool::new_in(Global.counted());
        let layout = Layout::from_size_align(64, 64).unwrap();
        let ptr = pool.allocate(layout).unwrap().cast::<u8>();
        assert_eq!(ptr.as_ptr() as usize % 64, 0);
        assert_eq!(pool.stats().chunks, 0);
        unsafe { pool.deallocate(ptr, layout) };
        assert_eq!(pool.backing().deallocations(), 1);
    }

    #[test]
    fn failing_backing_allocator_reports_out_of_memory() {
        let pool = Pool::new_in(Failing);
        assert_eq!(
            pool.allocate_bytes(8),
            Err(PoolError::OutOfMemory {
                requested: 2 * 8 * REFILL_BLOCKS
            })
        );
        assert_eq!(
            pool.allocate_bytes(5000),
            Err(PoolError::OutOfMemory { requested: 5000 })
        );
    }

    #[test]
    fn exhausted_backing_allocator_scavenges_larger_classes() {
        let first_chunk = 2 * MAX_SMALL_BYTES * REFILL_BLOCKS;
        let pool = Pool::new_in(Global.budgeted(first_chunk));

        let mut live = StdVec::new();
        for _ in 0..2 * REFILL_BLOCKS {
            live.push(pool.allocate_bytes(MAX_SMALL_BYTES).unwrap());
        }
        assert_eq!(pool.stats().chunks, 1);
        assert_eq!(pool.arena_len(), 0);

        let spare = live.pop().unwrap();
        unsafe { pool.deallocate_bytes(spare, MAX_SMALL_BYTES) };
        assert_eq!(pool.free_count(SizeClass::MAX), 1);

        let small = pool.allocate_bytes(8).unwrap();
        assert_eq!(small, spare);
        assert_eq!(pool.stats().scavenged, 1);
        assert_eq!(pool.free_count(SizeClass::MAX), 0);
        assert_eq!(pool.free_count(class(8)), REFILL_BLOCKS - 1);
        assert_eq!(pool.arena_len(), MAX_SMALL_BYTES - 8 * REFILL_BLOCKS);

        let growth = round_up(first_chunk >> 4);
        assert_eq!(
            pool.allocate_bytes(MAX_SMALL_BYTES),
            Err(PoolError::OutOfMemory {
                requested: first_chunk + growth
            })
        );
        // the arena leftovers were salvaged before giving up
        assert_eq!(pool.free_count(class(3840)), 1);
        assert_eq!(pool.free_count(class(96)), 1);
        assert!(pool.allocate_bytes(3800).is_ok());
    }

    #[test]
    fn refill_batch_is_configurable() {
        let pool = Pool::with_config_in(PoolConfig::new().with_refill_blocks(4), Global);
        pool.allocate_bytes(64).unwrap();
        assert_eq!(pool.free_count(class(64)), 3);
        assert_eq!(pool.stats().heap_size, 2 * 64 * 4);

        let config = PoolConfig::new().with_refill_blocks(0);
        assert_eq!(config.refill_blocks, 1);
    }

    #[test]
    fn reallocate_within_a_class_keeps_the_block() {
        let pool = Pool::new();
        let ptr = pool.allocate_bytes(100).unwrap();
        let same = unsafe { pool.reallocate_bytes(ptr, 100, 104) }.unwrap();
        assert_eq!(ptr, same);
    }

    #[test]
    fn reallocate_across_classes_copies_the_prefix() {
        let pool = Pool::new();
        let ptr = pool.allocate_bytes(16).unwrap();
        unsafe {
            for i in 0..16 {
                ptr.as_ptr().add(i).write(i as u8);
            }
            let grown = pool.reallocate_bytes(ptr, 16, 6000).unwrap();
            let bytes = core::slice::from_raw_parts(grown.as_ptr(), 16);
            assert!(bytes.iter().enumerate().all(|(i, &b)| b == i as u8));
            pool.deallocate_bytes(grown, 6000);
        }
        assert_eq!(pool.free_count(class(16)), REFILL_BLOCKS);
    }

    #[test]
    fn zero_sized_requests_get_the_smallest_class() {
        let pool = Pool::new();
        let ptr = pool.allocate_bytes(0).unwrap();
        assert_eq!(pool.free_count(SizeClass::MIN), REFILL_BLOCKS - 1);
        unsafe { pool.deallocate_bytes(ptr, 0) };
        assert_eq!(pool.free_count(SizeClass::MIN), REFILL_BLOCKS);
    }

    #[test]
    fn returning_blocks_never_grows_the_free_lists() {
        let pool = Pool::with_config_in(PoolConfig::new().with_refill_blocks(3), Global);
        let capacity = || pool.state.borrow().free_lists[class(48).index()].capacity();

        let mut live = StdVec::new();
        for _ in 0..10 {
            live.push(pool.allocate_bytes(48).unwrap());
        }
        // four refills of three blocks, two of them still free
        assert_eq!(pool.state.borrow().carved[class(48).index()], 12);
        let reserved = capacity();
        assert!(reserved >= 12);

        for ptr in live {
            unsafe { pool.deallocate_bytes(ptr, 48) };
        }
        assert_eq!(pool.free_count(class(48)), 12);
        assert_eq!(capacity(), reserved);
    }

    #[test]
    fn pool_knows_its_chunks() {
        let pool = Pool::new();
        let layout = Layout::new::<u64>();
        let ptr = pool.allocate(layout).unwrap().cast::<u8>();
        assert!(pool.contains(ptr, layout));

        let outside = 0u64;
        assert!(!pool.contains(NonNull::from(&outside).cast(), layout));
    }

    #[test]
    fn dropping_the_pool_returns_every_chunk() {
        let backing = Global.counted();
        {
            let pool = Pool::new_in(&backing);
            for bytes in [8, 300, 3000] {
                pool.allocate_bytes(bytes).unwrap();
            }
            assert_eq!(backing.allocations(), pool.stats().chunks);
        }
        assert_eq!(backing.allocations(), backing.deallocations());
        assert_eq!(backing.live_bytes(), 0);
    }

    #[test]
    fn vec_in_pool_grows_through_classes() {
        use allocator_api2::vec::Vec;

        let pool = Pool::new();
        let mut v: Vec<u32, _> = Vec::new_in(&pool);
        for i in 0..2000 {
            v.push(i);
        }
        assert_eq!(v.iter().copied().sum::<u32>(), (0..2000).sum());
        assert!(pool.stats().large_allocations > 0);
        assert!(pool.stats().refills > 1);
    }
}
