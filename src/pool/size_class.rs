//! Size classes of the pool.
//!
//! Requests of up to [`MAX_SMALL_BYTES`] are rounded up to one of [`CLASS_COUNT`] buckets.
//! The granularity doubles every time the request size doubles past 128 bytes:
//!
//! | request range | granularity | classes |
//! |---------------|-------------|---------|
//! | 1 ..= 128     | 8           | 16      |
//! | 129 ..= 256   | 16          | 8       |
//! | 257 ..= 512   | 32          | 8       |
//! | 513 ..= 1024  | 64          | 8       |
//! | 1025 ..= 2048 | 128         | 8       |
//! | 2049 ..= 4096 | 256         | 8       |

/// Largest request served from the free lists; anything bigger goes to the backing allocator.
pub const MAX_SMALL_BYTES: usize = 4096;

/// Number of free lists.
pub const CLASS_COUNT: usize = 56;

/// Alignment guaranteed for every pooled block.
pub const MIN_ALIGN: usize = 8;

/// Number of blocks requested from the arena when a free list runs dry.
pub const REFILL_BLOCKS: usize = 20;

/// Upper bound and granularity of each band, paired with the first class index in the band.
const BANDS: [(usize, usize, usize); 6] = [
    (128, 8, 0),
    (256, 16, 16),
    (512, 32, 24),
    (1024, 64, 32),
    (2048, 128, 40),
    (4096, 256, 48),
];

/// Rounding granularity for a request of `bytes`.
///
/// Requests above [`MAX_SMALL_BYTES`] use the coarsest granularity, which is what the pool
/// uses to round its growth term.
#[inline]
pub const fn granularity(bytes: usize) -> usize {
    if bytes <= 512 {
        if bytes <= 128 {
            8
        } else if bytes <= 256 {
            16
        } else {
            32
        }
    } else if bytes <= 1024 {
        64
    } else if bytes <= 2048 {
        128
    } else {
        256
    }
}

/// Rounds `bytes` up to a multiple of its granularity.
#[inline]
pub const fn round_up(bytes: usize) -> usize {
    let align = granularity(bytes);
    (bytes + align - 1) & !(align - 1)
}

/// A free-list bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SizeClass(u8);

impl SizeClass {
    /// The smallest class.
    pub const MIN: SizeClass = SizeClass(0);
    /// The largest class, holding blocks of [`MAX_SMALL_BYTES`].
    pub const MAX: SizeClass = SizeClass(CLASS_COUNT as u8 - 1);

    /// Returns the class serving a request of `bytes`, or `None` if the request is too big
    /// to be pooled. Zero-byte requests are served by the smallest class.
    pub const fn for_size(bytes: usize) -> Option<SizeClass> {
        if bytes > MAX_SMALL_BYTES {
            return None;
        }
        let bytes = if bytes == 0 { 1 } else { bytes };
        let mut band = 0;
        let mut lower = 0;
        while band < BANDS.len() {
            let (upper, step, first) = BANDS[band];
            if bytes <= upper {
                let index = first + (bytes - lower + step - 1) / step - 1;
                return Some(SizeClass(index as u8));
            }
            lower = upper;
            band += 1;
        }
        None
    }

    /// Returns the class with the given free-list index.
    pub const fn from_index(index: usize) -> Option<SizeClass> {
        if index < CLASS_COUNT {
            Some(SizeClass(index as u8))
        } else {
            None
        }
    }

    /// Index of this class in the free-list table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Exact size of every block in this class.
    pub const fn block_size(self) -> usize {
        let index = self.0 as usize;
        let mut band = 0;
        let mut lower = 0;
        while band < BANDS.len() {
            let (upper, step, first) = BANDS[band];
            let count = (upper - lower) / step;
            if index < first + count {
                return lower + (index - first + 1) * step;
            }
            lower = upper;
            band += 1;
        }
        MAX_SMALL_BYTES
    }

    /// The largest class whose blocks are no bigger than `bytes`.
    pub const fn largest_within(bytes: usize) -> Option<SizeClass> {
        if bytes < MIN_ALIGN {
            return None;
        }
        if bytes >= MAX_SMALL_BYTES {
            return Some(SizeClass::MAX);
        }
        let class = match SizeClass::for_size(bytes) {
            Some(class) => class,
            None => return None,
        };
        if class.block_size() == bytes || class.0 == 0 {
            Some(class)
        } else {
            Some(SizeClass(class.0 - 1))
        }
    }

    /// Iterates over this class and every larger one.
    pub fn and_larger(self) -> impl Iterator<Item = SizeClass> {
        (self.index()..CLASS_COUNT).map(|index| SizeClass(index as u8))
    }
}
