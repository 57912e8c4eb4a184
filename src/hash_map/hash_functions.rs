//! Polynomial string hashing for the probe table
//!
//! The hash is computed over the UTF-16 code units of a key's string form
//! with 32-bit two's-complement wrapping arithmetic, so bucket placement
//! (and therefore probe statistics) is reproducible across runs and
//! platforms.
//!
//! ```rust
//! use wordzip::hash_map::poly23_bucket;
//!
//! assert_eq!(poly23_bucket("a", 10), 8);
//! assert_eq!(poly23_bucket("hello world", 10), 7);
//! ```

use std::fmt;

/// Multiplier of the polynomial accumulation (also the length modulus)
pub const POLY_HASH_MULTIPLIER: i32 = 23;

/// Largest capacity the bucket reduction supports
pub const MAX_BUCKETS: usize = i32::MAX as usize;

/// Streaming polynomial hasher fed through `fmt::Write`
///
/// Lets the table hash any key's `Display` form without building the
/// string first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Poly23Hasher {
    hash: i32,
    units: i32,
}

impl Poly23Hasher {
    /// Create an empty hasher
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one string fragment
    #[inline]
    pub fn update(&mut self, fragment: &str) {
        for unit in fragment.encode_utf16() {
            self.hash = self
                .hash
                .wrapping_mul(POLY_HASH_MULTIPLIER)
                .wrapping_add(i32::from(unit));
            self.units = self.units.wrapping_add(1);
        }
    }

    /// Finish with the length term and return the raw hash
    #[inline]
    pub fn finish(&self) -> i32 {
        self.hash.wrapping_add(self.units % POLY_HASH_MULTIPLIER)
    }

    /// Reduce the raw hash to a bucket in `0..capacity`
    ///
    /// Truncating remainder followed by sign correction. `capacity` must
    /// be in `1..=MAX_BUCKETS`; `ProbeTable` enforces this at construction.
    #[inline]
    pub fn bucket(&self, capacity: usize) -> usize {
        debug_assert!(capacity > 0 && capacity <= MAX_BUCKETS);
        (self.finish() % capacity as i32).unsigned_abs() as usize
    }
}

impl fmt::Write for Poly23Hasher {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.update(s);
        Ok(())
    }
}

/// Raw polynomial hash of `key` before bucket reduction
///
/// `h = h * 23 + unit` for each UTF-16 code unit, then `h += len % 23`
/// where `len` counts code units. May be negative.
#[inline]
pub fn poly23_raw(key: &str) -> i32 {
    let mut hasher = Poly23Hasher::new();
    hasher.update(key);
    hasher.finish()
}

/// Bucket index of `key` in a table of `capacity` slots
#[inline]
pub fn poly23_bucket(key: &str, capacity: usize) -> usize {
    let mut hasher = Poly23Hasher::new();
    hasher.update(key);
    hasher.bucket(capacity)
}
