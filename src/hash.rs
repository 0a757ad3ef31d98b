//! Seeded hashing for probe generation

use xxhash_rust::xxh3::Xxh3;

/// Width of a filter seed in bytes
pub const SEED_LEN: usize = 8;

pub type Seed = [u8; SEED_LEN];

/// The two 64-bit halves of a 128-bit digest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashPair {
    pub low: u64,
    pub high: u64,
}

/// XXH3-128 over `seed ++ key`
///
/// Streaming the seed and key separately yields the same digest as hashing the concatenated
/// buffer, without allocating one per call.
pub fn hash_seeded(seed: &Seed, key: &[u8]) -> HashPair {
    let mut hasher = Xxh3::new();
    hasher.update(seed);
    hasher.update(key);
    let digest = hasher.digest128();
    HashPair {
        low: digest as u64,
        high: (digest >> 64) as u64,
    }
}

/// Derive the second seed by inverting the lowest byte, so it always differs from `seed`
pub fn alternate_seed(seed: &Seed) -> Seed {
    let mut alternate = *seed;
    alternate[0] = !alternate[0];
    alternate
}

/* -------------------- Unit Tests -------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use xxhash_rust::xxh3::xxh3_128;

    #[test]
    fn seeded_hash_matches_concatenation() {
        let seed = [7u8, 1, 2, 3, 4, 5, 6, 9];
        let key = b"cache line";
        let mut joined = seed.to_vec();
        joined.extend_from_slice(key);
        let expected = xxh3_128(&joined);
        let pair = hash_seeded(&seed, key);
        assert_eq!(pair.low, expected as u64);
        assert_eq!(pair.high, (expected >> 64) as u64);
    }

    #[test]
    fn seed_changes_digest() {
        let seed = [0u8; SEED_LEN];
        let a = hash_seeded(&seed, b"cat");
        let b = hash_seeded(&alternate_seed(&seed), b"cat");
        assert_ne!(a, b);
    }

    #[test]
    fn alternate_seed_flips_first_byte_only() {
        let seed = [0x0f, 1, 2, 3, 4, 5, 6, 7];
        let alternate = alternate_seed(&seed);
        assert_eq!(alternate[0], 0xf0);
        assert_eq!(alternate[1..], seed[1..]);
        assert_eq!(alternate_seed(&alternate), seed);
    }
}
