use algopool::{algo, prelude::*, Pool, SizeClass};
use allocator_api2::{alloc::Global, vec::Vec};

fn main() {
    let backing = Global.counted();
    let pool = Pool::new_in(&backing);

    let mut v: Vec<i32, _> = Vec::new_in(&pool);
    v.extend([5, 3, 8, 1, 9, 2, 7, 4, 6, 0]);
    algo::sort(&mut v);
    assert_eq!(v[..], [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);

    // two sorted runs, merged with a scratch buffer taken from the same pool
    let mut runs: Vec<u32, _> = Vec::new_in(&pool);
    runs.extend((0..64).map(|i| i * 2));
    runs.extend((0..64).map(|i| i * 2 + 1));
    algo::inplace_merge_in(&mut runs, 64, |a, b| a < b, &pool);
    assert!(algo::is_sorted(runs.iter()));

    let stats = pool.stats();
    println!(
        "{} chunks ({} bytes) from the backing allocator, {} refills, {} large blocks",
        stats.chunks, stats.heap_size, stats.refills, stats.large_allocations
    );
    let class = SizeClass::for_size(runs.capacity() * 4).unwrap_or(SizeClass::MAX);
    println!(
        "{} free blocks of {} bytes, {} bytes left in the arena",
        pool.free_count(class),
        class.block_size(),
        pool.arena_len()
    );

    drop(runs);
    drop(v);
    drop(pool);
    assert_eq!(backing.live_bytes(), 0);
}
