//! Classical bloom filter, kept as an accuracy baseline
//!
//! Each probe is an independent 64-bit hash over the whole bit array, so probes scatter across
//! memory. Useful for checking how much accuracy the cache-line local filter gives up.

use crate::error::{FilterError, Result};

use alloc::vec;
use alloc::vec::Vec;
use tracing::trace;
use xxhash_rust::xxh3::xxh3_64_with_seed;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceBloom {
    words: Vec<u64>,
    bit_count: usize,
    probes_per_entry: u32,
}

impl ReferenceBloom {
    pub fn new(bit_count: usize, probes_per_entry: u32) -> Result<ReferenceBloom> {
        if bit_count == 0 {
            return Err(FilterError::NoBits);
        }
        if probes_per_entry == 0 {
            return Err(FilterError::NoProbes);
        }
        trace!(bit_count, probes_per_entry, "created reference filter");
        Ok(ReferenceBloom {
            words: vec![0; bit_count.div_ceil(64)],
            bit_count,
            probes_per_entry,
        })
    }

    /// Bit positions for `key`, one independent hash per probe
    fn positions(
        key: &[u8],
        bit_count: usize,
        probes_per_entry: u32,
    ) -> impl Iterator<Item = usize> + '_ {
        (0..probes_per_entry)
            .map(move |probe| (xxh3_64_with_seed(key, probe as u64) % bit_count as u64) as usize)
    }

    pub fn insert(&mut self, key: &[u8]) {
        for position in Self::positions(key, self.bit_count, self.probes_per_entry) {
            self.words[position / 64] |= 1 << (position % 64);
        }
    }

    pub fn query(&self, key: &[u8]) -> bool {
        Self::positions(key, self.bit_count, self.probes_per_entry)
            .all(|position| self.words[position / 64] & (1 << (position % 64)) != 0)
    }

    pub fn reset(&mut self) {
        self.words.fill(0);
    }
}

/* -------------------- Unit Tests -------------------- */
