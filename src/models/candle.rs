//! OHLC candlestick model.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A single OHLC candlestick bar over a fixed time bucket.
///
/// `time` is the period-aligned start of the bucket in epoch seconds and
/// `period` its width in seconds. Equality compares every field; ordering
/// considers `time` alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Period-aligned bucket start, epoch seconds.
    pub time: u64,
    /// Bucket width in seconds.
    pub period: u32,
    /// Number of trades aggregated into this candle.
    pub count: u64,
    pub volume: f64,
    /// Volume-weighted average price over the bucket.
    pub vwap_price: f64,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,
}

impl PartialOrd for Candle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.time.cmp(&other.time))
    }
}
