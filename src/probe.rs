//! # Probe Sequence Generator
//!
//! Turns a key into `probes_per_entry` bit positions that all land in one slot, spending as few
//! 128-bit hashes as possible.
//!
//! The first digest's `low` half picks the bit of the first probe (its lowest 9 bits) and the slot
//! (the remaining bits). Later probes peel 9 bits at a time off `high`. Once probe 8 has used its
//! bits, the key is rehashed under the alternate seed, which refills both halves. Once probe 15 has
//! used its bits, the untouched `low` half of that second digest becomes the new `high`. Two hashes
//! therefore cover roughly 22 probes. Past that the shifted-out `high` degrades towards zero, which
//! stays well defined but concentrates probes at the start of the slot.

use crate::hash::{hash_seeded, HashPair, Seed};
use crate::slab::{SLOT_BITS, SLOT_WORDS};

/// Probe count after which the key is rehashed with the alternate seed
const REHASH_AFTER: u32 = 8;
/// Probe count after which the spare `low` half is recycled into `high`
const RECYCLE_LOW_AFTER: u32 = 15;

/// A single bit position: a slot plus the bit offset inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Probe {
    /// Slot index, in `[0, slot_count)`
    pub slot: usize,
    /// Bit offset inside the slot, in `[0, 512)`
    pub bit: u16,
}

impl Probe {
    /// Word index inside the slot, in `[0, 8)`
    #[inline]
    pub fn word(&self) -> usize {
        self.bit as usize / 64
    }

    /// Bit index inside the word, in `[0, 64)`
    #[inline]
    pub fn bit_in_word(&self) -> u32 {
        self.bit as u32 % 64
    }

    #[inline]
    pub(crate) fn mask(&self) -> u64 {
        1u64 << self.bit_in_word()
    }
}

#[inline]
fn bit_offset(value: u64) -> u16 {
    (value % SLOT_BITS as u64) as u16
}

/// Lazily generated probe positions for one key
///
/// The sequence is a pure function of the key, slot count, both seeds and the probe count.
#[derive(Debug, Clone)]
pub struct ProbeSequence<'a> {
    key: &'a [u8],
    alternate_seed: Seed,
    slot: usize,
    hash: HashPair,
    emitted: u32,
    total: u32,
}

impl<'a> ProbeSequence<'a> {
    pub(crate) fn new(
        key: &'a [u8],
        slot_count: usize,
        seed: &Seed,
        alternate_seed: &Seed,
        probes_per_entry: u32,
    ) -> ProbeSequence<'a> {
        debug_assert!(slot_count > 0 && probes_per_entry > 0);
        let hash = hash_seeded(seed, key);
        let slot = ((hash.low / SLOT_BITS as u64) % slot_count as u64) as usize;
        ProbeSequence {
            key,
            alternate_seed: *alternate_seed,
            slot,
            hash,
            emitted: 0,
            total: probes_per_entry,
        }
    }

    /// The slot every probe of this key lands in
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Refill `high` once probe number `emitted` has consumed its bits
    fn refresh(&mut self, emitted: u32) {
        match emitted {
            REHASH_AFTER => self.hash = hash_seeded(&self.alternate_seed, self.key),
            RECYCLE_LOW_AFTER => self.hash.high = self.hash.low,
            _ => self.hash.high /= SLOT_BITS as u64,
        }
    }
}

impl Iterator for ProbeSequence<'_> {
    type Item = Probe;

    fn next(&mut self) -> Option<Probe> {
        if self.emitted == self.total {
            return None;
        }
        let bit = if self.emitted == 0 {
            bit_offset(self.hash.low)
        } else {
            let bit = bit_offset(self.hash.high);
            let count = self.emitted + 1;
            // Nothing reads the refreshed state after the last probe
            if count < self.total {
                self.refresh(count);
            }
            bit
        };
        self.emitted += 1;
        debug_assert!((bit as usize) / 64 < SLOT_WORDS);
        Some(Probe {
            slot: self.slot,
            bit,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total - self.emitted) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProbeSequence<'_> {}

/* -------------------- Unit Tests -------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::alternate_seed;
    use alloc::vec::Vec;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    const SEED: Seed = [3, 1, 4, 1, 5, 9, 2, 6];

    fn probes(key: &[u8], slot_count: usize, k: u32) -> Vec<Probe> {
        ProbeSequence::new(key, slot_count, &SEED, &alternate_seed(&SEED), k).collect()
    }

    fn bits(key: &[u8], slot_count: usize, k: u32) -> Vec<u16> {
        probes(key, slot_count, k).iter().map(|p| p.bit).collect()
    }

    #[test]
    fn emits_exactly_k_probes() {
        for k in [1, 2, 7, 8, 9, 15, 16, 22, 30] {
            let seq = ProbeSequence::new(b"key", 10, &SEED, &alternate_seed(&SEED), k);
            assert_eq!(seq.len(), k as usize);
            assert_eq!(seq.count(), k as usize);
        }
    }

    #[test]
    fn first_probe_comes_from_low_half() {
        let slot_count = 37;
        let first = hash_seeded(&SEED, b"first");
        let p = probes(b"first", slot_count, 1);
        assert_eq!(p[0].bit as u64, first.low % 512);
        assert_eq!(p[0].slot as u64, (first.low / 512) % slot_count as u64);
    }

    // Walk the bit consumption by hand: high of the first digest for probes 2..=8, high of the
    // alternate digest for 9..=15, then the alternate digest's low half
    #[test]
    fn bit_recycling_schedule() {
        let key = b"recycled";
        let first = hash_seeded(&SEED, key);
        let second = hash_seeded(&alternate_seed(&SEED), key);
        let got = bits(key, 5, 22);

        let mut expected = Vec::new();
        expected.push((first.low % 512) as u16);
        for i in 0..7u32 {
            expected.push(((first.high >> (9 * i)) % 512) as u16);
        }
        for i in 0..7u32 {
            expected.push(((second.high >> (9 * i)) % 512) as u16);
        }
        for i in 0..7u32 {
            expected.push(((second.low >> (9 * i)) % 512) as u16);
        }
        assert_eq!(got, expected);
    }

    #[test]
    fn shorter_sequence_is_a_prefix() {
        let long = bits(b"prefix", 64, 20);
        for k in 1..20 {
            assert_eq!(bits(b"prefix", 64, k)[..], long[..k as usize]);
        }
    }

    #[test]
    fn probes_share_one_slot() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..1000 {
            let mut key = [0u8; 32];
            rng.fill_bytes(&mut key);
            let seq = ProbeSequence::new(&key, 1009, &SEED, &alternate_seed(&SEED), 16);
            let slot = seq.slot();
            for probe in seq {
                assert_eq!(probe.slot, slot);
                assert!(probe.slot < 1009);
                assert!(probe.bit < 512);
                assert!(probe.word() < 8);
                assert!(probe.bit_in_word() < 64);
            }
        }
    }

    #[test]
    fn deterministic_sequence() {
        assert_eq!(probes(b"same", 100, 12), probes(b"same", 100, 12));
        assert_ne!(bits(b"same", 100, 12), bits(b"other", 100, 12));
    }

    #[test]
    fn probe_mask_addresses_word_bit() {
        let probe = Probe { slot: 0, bit: 130 };
        assert_eq!(probe.word(), 2);
        assert_eq!(probe.bit_in_word(), 2);
        assert_eq!(probe.mask(), 0b100);
    }
}
