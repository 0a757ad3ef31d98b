//! Errors reported while building a filter or picking its parameters

use thiserror::Error;

/// Possible errors for the filter and the parameter advisor
#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    /// No whole cache-line slot would be left to store bits in
    #[error("filter needs at least one slot")]
    NoSlots,
    /// Requested slab is larger than a single allocation can address
    #[error("{0} slots exceed the addressable allocation size")]
    TooManySlots(usize),
    /// Every key needs at least one probe
    #[error("probes per entry must be at least 1")]
    NoProbes,
    /// Target ratio must lie strictly between 0 and 1
    #[error("false positive ratio {0} is outside (0, 1)")]
    FalsePositiveRatioOutOfRange(f64),
    /// Sizing a filter for zero entries is meaningless
    #[error("entry count must be at least 1")]
    NoEntries,
    /// Total bits for this many entries does not fit in `usize`
    #[error("{0} entries need more bits than can be addressed")]
    TooManyEntries(usize),
    /// The classical filter needs at least one bit to hash into
    #[error("filter needs at least one bit of storage")]
    NoBits,
}

pub type Result<T> = core::result::Result<T, FilterError>;
