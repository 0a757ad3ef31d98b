//! # Membership Filter
//!
//! A bloom filter whose probes for any one key stay inside a single 64-byte slot, so each insert or
//! query touches exactly one cache line. The price is a slightly higher false positive rate than a
//! classical bloom filter of the same size, because keys crowd into slots unevenly.
//!
//! The filter has no internal synchronization. `insert` and `reset` take `&mut self`, so sharing one
//! filter between writers needs an outer lock; any number of threads may `query` through `&self`.

use crate::error::{FilterError, Result};
use crate::hash::{alternate_seed, Seed};
use crate::params::{recommend, Params};
use crate::probe::ProbeSequence;
use crate::slab::AlignedSlab;

use tracing::debug;

/// A cache-line local bloom filter
///
/// ### Notes
///
/// - The slot count and probe count are fixed at construction; there is no resizing or removal
/// - The alternate seed is the primary seed with its first byte inverted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastBloom {
    slab: AlignedSlab,
    probes_per_entry: u32,
    seed: Seed,
    alternate_seed: Seed,
}

impl FastBloom {
    /// Create an empty filter with `slot_count` 512-bit slots
    pub fn new(slot_count: usize, probes_per_entry: u32, seed: Seed) -> Result<FastBloom> {
        if probes_per_entry == 0 {
            return Err(FilterError::NoProbes);
        }
        let slab = AlignedSlab::allocate(slot_count)?;
        debug!(slot_count, probes_per_entry, "created filter");
        Ok(FastBloom {
            slab,
            probes_per_entry,
            seed,
            alternate_seed: alternate_seed(&seed),
        })
    }

    /// Create an empty filter from advisor output
    pub fn from_params(params: &Params, seed: Seed) -> Result<FastBloom> {
        FastBloom::new(params.slot_count, params.probes_per_entry, seed)
    }

    /// Size a filter for `entry_count` keys at roughly `false_positive_ratio`
    pub fn with_false_positive_ratio(
        false_positive_ratio: f64,
        entry_count: usize,
        seed: Seed,
    ) -> Result<FastBloom> {
        let params = recommend(false_positive_ratio, entry_count)?;
        FastBloom::from_params(&params, seed)
    }

    pub fn slot_count(&self) -> usize {
        self.slab.slot_count()
    }

    pub fn probes_per_entry(&self) -> u32 {
        self.probes_per_entry
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// How many bytes of bit storage this filter holds
    pub fn estimate_size(&self) -> usize {
        self.slab.size_in_bytes()
    }

    /// Number of bits currently set
    pub fn count_ones(&self) -> usize {
        self.slab.count_ones()
    }

    /// True when nothing has been inserted since construction or the last reset
    pub fn is_empty(&self) -> bool {
        self.count_ones() == 0
    }

    /// The probe positions used for `key`
    pub fn probes<'a>(&self, key: &'a [u8]) -> ProbeSequence<'a> {
        ProbeSequence::new(
            key,
            self.slab.slot_count(),
            &self.seed,
            &self.alternate_seed,
            self.probes_per_entry,
        )
    }

    /// Add a key to the filter
    pub fn insert(&mut self, key: &[u8]) {
        for probe in self.probes(key) {
            self.slab.set(probe);
        }
    }

    /// Add a key, returning true if every one of its bits was already set
    ///
    /// A true result means the key may already have been present (or is a false positive).
    pub fn check_and_insert(&mut self, key: &[u8]) -> bool {
        let mut present = true;
        for probe in self.probes(key) {
            present &= self.slab.test_and_set(probe);
        }
        present
    }

    /// Check whether a key may be in the filter
    ///
    /// Stops at the first clear bit. Never returns false for a key inserted since the last reset.
    pub fn query(&self, key: &[u8]) -> bool {
        self.probes(key).all(|probe| self.slab.test(probe))
    }

    /// Clear every bit, returning to the freshly constructed state
    pub fn reset(&mut self) {
        self.slab.reset();
    }
}

/* -------------------- Unit Tests -------------------- */
