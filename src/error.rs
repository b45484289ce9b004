//! Crate-level error types.
//!
//! [`CandlemillError`] unifies every failure source (aggregation
//! consistency checks, row decoding, file I/O) behind a single enum so
//! callers can match on the variant they care about while still using the
//! `?` operator for easy propagation.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CandlemillError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum CandlemillError {
    /// Candles in an upscale input do not all share one period.
    #[error("non constant period")]
    NonConstantPeriod,

    /// The target period is not an exact multiple of the source period.
    #[error("invalid upscale period")]
    InvalidUpscalePeriod,

    /// The two merge inputs are built from different periods.
    #[error("merging periods mismatch")]
    MergingPeriodsMismatch,

    /// One merge input carries two candles at the same time.
    #[error("duplicated candle at {time}")]
    DuplicatedCandle { time: u64 },

    /// The merge inputs disagree on the candle at a shared time.
    #[error("mismatched candles at {time}")]
    MismatchedCandles { time: u64 },

    /// A candle row could not be decoded.
    #[error("invalid candle fields")]
    InvalidCandleFields,

    /// A trade row could not be decoded.
    #[error("invalid trade fields")]
    InvalidTradeFields,

    /// Reading or writing a file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
