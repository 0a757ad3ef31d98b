//! # Aligned Bit Slab
//!
//! Bit storage split into 512-bit slots, one per cache line. Every slot starts on a 64-byte
//! boundary: the slot type itself carries `align(64)`, so the allocator hands back cache-line
//! aligned memory and no leading words ever need to be trimmed.

use crate::error::{FilterError, Result};
use crate::probe::Probe;

use alloc::vec;
use alloc::vec::Vec;
use tracing::debug;

/// Bytes per slot, matching a 64-byte cache line
pub const SLOT_BYTES: usize = 64;
/// Bits per slot
pub const SLOT_BITS: usize = SLOT_BYTES * 8;
/// 64-bit words per slot
pub const SLOT_WORDS: usize = SLOT_BYTES / 8;
/// The largest slot count whose storage still fits in one allocation
const MAX_SLOTS: usize = isize::MAX as usize / SLOT_BYTES;

/// One cache line worth of filter bits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(C, align(64))]
struct Slot([u64; SLOT_WORDS]);

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AlignedSlab {
    slots: Vec<Slot>,
}

impl AlignedSlab {
    /// Allocate `slot_count` zeroed slots
    ///
    /// Panics if the allocation is not cache-line aligned. That can only happen with a broken
    /// allocator and is not something the caller can recover from.
    pub fn allocate(slot_count: usize) -> Result<AlignedSlab> {
        if slot_count == 0 {
            return Err(FilterError::NoSlots);
        }
        if slot_count > MAX_SLOTS {
            return Err(FilterError::TooManySlots(slot_count));
        }
        let slots = vec![Slot::default(); slot_count];
        let base = slots.as_ptr() as usize;
        assert_eq!(base % 8, 0, "slab storage is not word aligned");
        assert_eq!(base % SLOT_BYTES, 0, "slab storage is not cache-line aligned");
        debug!(slot_count, bytes = slot_count * SLOT_BYTES, "allocated bit slab");
        Ok(AlignedSlab { slots })
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Bytes of bit storage
    pub fn size_in_bytes(&self) -> usize {
        self.slots.len() * SLOT_BYTES
    }

    /// Clear every bit
    pub fn reset(&mut self) {
        self.slots.fill(Slot::default());
    }

    #[inline]
    pub fn set(&mut self, probe: Probe) {
        self.slots[probe.slot].0[probe.word()] |= probe.mask();
    }

    #[inline]
    pub fn test(&self, probe: Probe) -> bool {
        self.slots[probe.slot].0[probe.word()] & probe.mask() != 0
    }

    /// Set the probed bit, returning whether it was already set
    #[inline]
    pub fn test_and_set(&mut self, probe: Probe) -> bool {
        let word = &mut self.slots[probe.slot].0[probe.word()];
        let was_set = *word & probe.mask() != 0;
        *word |= probe.mask();
        was_set
    }

    /// Number of set bits across the whole slab
    pub fn count_ones(&self) -> usize {
        self.slots
            .iter()
            .flat_map(|slot| slot.0.iter())
            .map(|word| word.count_ones() as usize)
            .sum()
    }

    #[cfg(test)]
    fn base_address(&self) -> usize {
        self.slots.as_ptr() as usize
    }
}

/* -------------------- Unit Tests -------------------- */
