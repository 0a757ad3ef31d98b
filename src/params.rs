//! # Parameter Advisor
//!
//! Maps a target false positive ratio to construction parameters. Confining every key to 512 bits
//! shifts the optimum away from the classical `k = ln 2 * m / n`, so the table below comes from
//! simulation rather than a closed form.

use crate::error::{FilterError, Result};
use crate::slab::SLOT_BITS;

use tracing::debug;

/// One row of the tuning table
#[derive(Debug, Clone, Copy)]
struct Breakpoint {
    /// Targets strictly above this ratio are served by this row
    ratio: f64,
    bits_per_entry: usize,
    probes_per_entry: u32,
}

const fn row(ratio: f64, bits_per_entry: usize, probes_per_entry: u32) -> Breakpoint {
    Breakpoint {
        ratio,
        bits_per_entry,
        probes_per_entry,
    }
}

/// Measured breakpoints, loosest first
static BREAKPOINTS: [Breakpoint; 29] = [
    row(0.023220, 8, 6),
    row(0.014895, 9, 7),
    row(0.009646, 10, 8),
    row(0.006303, 11, 8),
    row(0.004118, 12, 9),
    row(0.002753, 13, 9),
    row(0.001856, 14, 10),
    row(0.001236, 15, 10),
    row(0.000841, 16, 10),
    row(0.000575, 17, 11),
    row(0.000377, 18, 11),
    row(0.000271, 19, 12),
    row(0.000206, 20, 13),
    row(0.000134, 21, 13),
    row(0.000108, 22, 13),
    row(0.000068, 23, 13),
    row(0.000050, 24, 13),
    row(0.000037, 25, 13),
    row(0.000024, 26, 13),
    row(0.000020, 27, 14),
    row(0.000014, 28, 15),
    row(0.000011, 29, 15),
    row(0.000009, 30, 15),
    row(0.000007, 31, 15),
    row(0.000005, 32, 15),
    row(0.000004, 33, 15),
    row(0.000003, 34, 15),
    row(0.000002, 35, 15),
    row(0.000001, 36, 16),
];

/// Filter construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Params {
    pub slot_count: usize,
    pub probes_per_entry: u32,
    pub bits_per_entry: usize,
}

/// Recommend a slot count and probe count for `entry_count` keys at `false_positive_ratio`
///
/// Targets tighter than the last breakpoint get the last (most conservative) row instead of an
/// extrapolation.
pub fn recommend(false_positive_ratio: f64, entry_count: usize) -> Result<Params> {
    // Written so NaN fails too
    if !(false_positive_ratio > 0.0 && false_positive_ratio < 1.0) {
        return Err(FilterError::FalsePositiveRatioOutOfRange(false_positive_ratio));
    }
    if entry_count == 0 {
        return Err(FilterError::NoEntries);
    }
    let breakpoint = BREAKPOINTS
        .iter()
        .find(|b| false_positive_ratio > b.ratio)
        .unwrap_or(&BREAKPOINTS[BREAKPOINTS.len() - 1]);
    let slot_count = breakpoint
        .bits_per_entry
        .checked_mul(entry_count)
        .ok_or(FilterError::TooManyEntries(entry_count))?
        .div_ceil(SLOT_BITS);
    debug!(
        false_positive_ratio,
        entry_count,
        slot_count,
        bits_per_entry = breakpoint.bits_per_entry,
        probes_per_entry = breakpoint.probes_per_entry,
        "recommended filter parameters"
    );
    Ok(Params {
        slot_count,
        probes_per_entry: breakpoint.probes_per_entry,
        bits_per_entry: breakpoint.bits_per_entry,
    })
}

/* -------------------- Unit Tests -------------------- */
