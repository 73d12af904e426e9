//! Error types for monotonic binning.
//!
//! Every failure is detected at the point of violation and returned as a
//! typed error. Binning is deterministic, so none of these are retryable.

use thiserror::Error;

/// Errors that can occur while binning a feature against a binary label.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BinningError {
    /// Feature and label vectors differ in length.
    #[error("feature has {x} values but label has {y}")]
    LengthMismatch {
        /// Length of the feature vector
        x: usize,
        /// Length of the label vector
        y: usize,
    },

    /// A label value other than 0 or 1 was found.
    #[error("label must be binary (0/1), found {value} at row {index}")]
    NonBinaryLabel {
        /// Zero-based row of the offending label
        index: usize,
        /// The label value
        value: u8,
    },

    /// The feature has no non-missing observations.
    #[error("feature has no non-missing observations")]
    EmptyInput,

    /// The label has no 0s or no 1s, so WoE and IV are undefined.
    #[error("label has no variation ({bads} bads, {goods} goods)")]
    DegenerateLabel {
        /// Count of y = 1 over the whole sample
        bads: usize,
        /// Count of y = 0 over the whole sample
        goods: usize,
    },

    /// Fewer than two distinct non-missing values; no cut point can exist.
    #[error("need at least 2 distinct non-missing values, found {distinct}")]
    InsufficientDistinctValues {
        /// Number of distinct non-missing values
        distinct: usize,
    },

    /// None of the candidate cut sets gives a strictly monotonic,
    /// non-degenerate bad rate.
    #[error("no monotonic partition among {candidates} candidate cut sets")]
    NoMonotonicPartition {
        /// Number of distinct candidates that were evaluated
        candidates: usize,
    },

    /// A bin to be scored has no bads or no goods.
    #[error("bin {bin} has no bads or no goods; WoE is undefined")]
    DegenerateBin {
        /// Index of the offending bin
        bin: usize,
    },

    /// A WoE lookup landed in a bin the result table does not contain.
    #[error("bin {bin} is not present in the binning table")]
    UnknownBin {
        /// Index produced by the partitioner
        bin: usize,
    },
}

/// Result alias for binning operations.
pub type Result<T> = std::result::Result<T, BinningError>;
