//! Fixed-capacity hash tables
//!
//! This module provides the open-addressing table that backs token
//! frequency counting and token-to-code lookup:
//! - `ProbeTable`: fixed-capacity map with linear probing, insertion-ordered
//!   iteration and probe statistics
//! - `Poly23Hasher`: reproducible polynomial hash over a key's string form

mod hash_functions;
mod probe_table;

pub use hash_functions::{
    poly23_bucket, poly23_raw, Poly23Hasher, MAX_BUCKETS, POLY_HASH_MULTIPLIER,
};
pub use probe_table::{Iter, ProbeStats, ProbeTable};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_exports() {
        let table = ProbeTable::<String, usize>::with_capacity(8).unwrap();
        assert_eq!(table.capacity(), 8);
        assert!(table.is_empty());

        assert!(poly23_bucket("token", 8) < 8);
        assert_eq!(POLY_HASH_MULTIPLIER, 23);
    }
}
