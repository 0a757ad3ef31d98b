//! # Cache-line local Bloom Filter
//!
//! A Bloom Filter answers "have I seen this thing before?" with no false negatives and a tunable
//! rate of false positives. A classical filter scatters its probes across the whole bit array, so a
//! lookup can cost one cache miss per probe. This crate confines every probe for a key to one
//! 64-byte slot, which bounds each insert or query to a single cache line.
//!
//! Probe offsets are carved 9 bits at a time out of a 128-bit XXH3 digest, so up to ~22 probes cost
//! only two hash computations.
//!
//! ```
//! use fast_bloom::{recommend, FastBloom};
//!
//! let params = recommend(0.01, 10_000)?;
//! let mut filter = FastBloom::from_params(&params, [0; 8])?;
//! filter.insert(b"hello");
//! assert!(filter.query(b"hello"));
//! # Ok::<(), fast_bloom::FilterError>(())
//! ```

extern crate alloc;

mod error;
mod filter;
mod hash;
mod params;
mod probe;
mod reference;
mod slab;

pub use error::FilterError;
pub use error::Result;
pub use filter::FastBloom;
pub use hash::Seed;
pub use params::recommend;
pub use params::Params;
pub use probe::Probe;
pub use probe::ProbeSequence;
pub use reference::ReferenceBloom;
pub use slab::SLOT_BITS;
pub use slab::SLOT_BYTES;
