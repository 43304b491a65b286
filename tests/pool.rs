use algopool::{prelude::*, Pool, PoolConfig, PoolError, SizeClass};
use allocator_api2::{
    alloc::{Allocator, Global},
    boxed::Box,
    vec::Vec,
};
use std::{alloc::Layout, ptr::NonNull};

fn pseudo_random(len: usize, seed: u64, modulo: u64) -> std::vec::Vec<u64> {
    let mut x = seed;
    (0..len)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x % modulo
        })
        .collect()
}

#[test]
fn containers_live_in_the_pool() {
    let pool = Pool::new();
    let mut v: Vec<u32, _> = Vec::new_in(&pool);
    v.extend(0..16);
    let first = NonNull::new(v.as_mut_ptr().cast::<u8>()).unwrap();
    assert!(pool.contains(first, Layout::array::<u32>(v.capacity()).unwrap()));

    let b = Box::new_in(7u64, &pool);
    assert_eq!(*b, 7);
    assert!(pool.stats().chunks >= 1);
}

#[test]
fn growing_vec_walks_up_the_classes_and_out_of_the_pool() {
    let backing = Global.counted();
    {
        let pool = Pool::new_in(&backing);
        let mut v: Vec<u64, _> = Vec::new_in(&pool);
        for i in 0..2000 {
            v.push(i);
        }
        assert_eq!(v.iter().sum::<u64>(), 1999 * 2000 / 2);

        // 2000 * 8 bytes is above the largest class
        assert!(pool.stats().large_allocations >= 1);
        assert!(backing.live_bytes() > 0);
    }
    assert_eq!(backing.live_bytes(), 0, "dropping the pool returns every chunk");
    assert_eq!(backing.allocations(), backing.deallocations());
}

#[test]
fn free_lists_hand_out_the_latest_block_first() {
    let pool = Pool::new();
    let a = pool.allocate_bytes(40).unwrap();
    let b = pool.allocate_bytes(40).unwrap();
    unsafe {
        pool.deallocate_bytes(a, 40);
        pool.deallocate_bytes(b, 40);
    }
    assert_eq!(pool.allocate_bytes(33).unwrap(), b);
    assert_eq!(pool.allocate_bytes(40).unwrap(), a);
}

#[test]
fn live_blocks_never_overlap() {
    let pool = Pool::new();
    let sizes = pseudo_random(600, 42, 5000);
    let mut blocks = std::vec::Vec::new();
    for (i, &size) in sizes.iter().enumerate() {
        let size = size as usize;
        let ptr = pool.allocate_bytes(size).unwrap();
        unsafe { ptr.as_ptr().write_bytes(i as u8, size) };
        blocks.push((ptr, size, i as u8));

        // free every third block to mix reuse into the picture
        if i % 3 == 2 {
            let (ptr, size, _) = blocks.swap_remove(i / 3 % blocks.len());
            unsafe { pool.deallocate_bytes(ptr, size) };
        }
    }

    for &(ptr, size, fill) in &blocks {
        let bytes = unsafe { std::slice::from_raw_parts(ptr.as_ptr(), size) };
        assert!(bytes.iter().all(|&b| b == fill), "block {ptr:p} was overwritten");
    }

    let mut ranges: std::vec::Vec<_> = blocks
        .iter()
        .map(|&(ptr, size, _)| (ptr.as_ptr() as usize, size.max(1)))
        .collect();
    ranges.sort();
    for pair in ranges.windows(2) {
        assert!(pair[0].0 + pair[0].1 <= pair[1].0);
    }

    for (ptr, size, _) in blocks {
        unsafe { pool.deallocate_bytes(ptr, size) };
    }
}

#[test]
fn exhausted_budget_ends_in_out_of_memory() {
    let pool = Pool::new_in(Global.budgeted(4096));
    let mut blocks = std::vec::Vec::new();
    let err = loop {
        match pool.allocate_bytes(64) {
            Ok(ptr) => blocks.push(ptr),
            Err(err) => break err,
        }
        assert!(blocks.len() < 4096, "budget never ran out");
    };
    assert!(matches!(err, PoolError::OutOfMemory { .. }), "{err}");
    assert!(!blocks.is_empty());

    // a freed block is immediately usable again
    let last = blocks[blocks.len() - 1];
    unsafe { pool.deallocate_bytes(last, 64) };
    assert_eq!(pool.allocate_bytes(64).unwrap(), last);
}

#[test]
fn failing_backing_allocator_reports_out_of_memory() {
    let pool = Pool::new_in(algopool::alloc::Failing);
    assert!(matches!(
        pool.allocate_bytes(8),
        Err(PoolError::OutOfMemory { .. })
    ));
    assert!(pool.allocate(Layout::new::<u64>()).is_err());
    assert_eq!(pool.stats().chunks, 0);
}

#[test]
fn configured_batches_size_the_refill() {
    let pool = Pool::with_config_in(PoolConfig::new().with_refill_blocks(5), Global);
    pool.allocate_bytes(100).unwrap();
    let class = SizeClass::for_size(100).unwrap();
    assert_eq!(class.block_size(), 104);
    assert_eq!(pool.free_count(class), 4);
}

#[test]
fn realloc_through_the_allocator_trait_keeps_contents() {
    let pool = Pool::new();
    let mut v: Vec<u8, _> = Vec::with_capacity_in(4, &pool);
    v.extend_from_slice(b"pool");
    v.extend_from_slice(&[b'!'; 300]);
    assert_eq!(&v[..4], b"pool");
    v.shrink_to_fit();
    assert_eq!(v.len(), 304);
    assert_eq!(&v[..5], b"pool!");
}
