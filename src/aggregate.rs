//! Upscaling and merging of candle and trade sequences.
//!
//! Every entry point is a pure function: sequences in, a freshly
//! allocated sequence out. A failure aborts the whole call; no partial
//! output escapes.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{CandlemillError, Result};
use crate::models::{Candle, Trade};
use crate::period::UpscalePeriod;

/// Verifies that every candle shares the period of the first one.
fn check_constant_period(candles: &[Candle]) -> Result<()> {
    let Some(first) = candles.first() else {
        return Ok(());
    };
    if candles.iter().any(|candle| candle.period != first.period) {
        return Err(CandlemillError::NonConstantPeriod);
    }
    Ok(())
}

/// Consolidates fixed-period candles into the coarser `target` period.
///
/// The target duration must be an exact multiple of the source period; a
/// multiple of one yields an element-wise copy. Source candles are
/// grouped into consecutive blocks of `target / source` members and a
/// trailing partial block is silently dropped. Within a block the result
/// sums counts and volumes, weights the vwap by turnover, takes the first
/// open and last close, and tracks the extreme high and low. Result times
/// are floored to a multiple of the target period.
///
/// # Errors
///
/// Returns [`CandlemillError::NonConstantPeriod`] when the source candles
/// disagree on their period, and
/// [`CandlemillError::InvalidUpscalePeriod`] when the target duration is
/// not a multiple of it.
pub fn upscale_candles(source: &[Candle], target: UpscalePeriod) -> Result<Vec<Candle>> {
    if source.is_empty() {
        return Ok(Vec::new());
    }
    check_constant_period(source)?;
    let period = source[0].period;
    let target_seconds = target.seconds();
    if target_seconds % period != 0 {
        return Err(CandlemillError::InvalidUpscalePeriod);
    }
    if target_seconds == period {
        return Ok(source.to_vec());
    }

    let block = (target_seconds / period) as usize;
    let span = u64::from(target_seconds);
    let mut result = Vec::with_capacity(source.len() / block);
    for chunk in source.chunks_exact(block) {
        let first = &chunk[0];
        let mut count = first.count;
        let mut volume = first.volume;
        let mut turnover = first.vwap_price * first.volume;
        let mut high_price = first.high_price;
        let mut low_price = first.low_price;
        for candle in &chunk[1..] {
            count += candle.count;
            volume += candle.volume;
            turnover += candle.volume * candle.vwap_price;
            if candle.high_price > high_price {
                high_price = candle.high_price;
            }
            if candle.low_price < low_price {
                low_price = candle.low_price;
            }
        }
        result.push(Candle {
            time: first.time / span * span,
            period: target_seconds,
            count,
            volume,
            vwap_price: turnover / volume,
            open_price: first.open_price,
            high_price,
            low_price,
            close_price: chunk[block - 1].close_price,
        });
    }
    debug!(
        source = source.len(),
        result = result.len(),
        target = target.as_str(),
        "upscaled candles"
    );
    Ok(result)
}

/// Builds `target`-period candles from trades sorted ascending by time.
///
/// The ascending order is a precondition this function does not verify.
/// A candle covers one period-aligned bucket; a trade at or past the end
/// of the current bucket closes the running candle and opens a new one at
/// the trade's own bucket, so gaps produce no empty candles. The final
/// candle is always flushed.
pub fn upscale_trades(trades: &[Trade], target: UpscalePeriod) -> Result<Vec<Candle>> {
    let Some(first) = trades.first() else {
        return Ok(Vec::new());
    };
    let period = target.seconds();
    let span = u64::from(period);
    let mut result = Vec::new();
    let mut candle = open_candle(first, period, span);
    let mut turnover = first.amount * first.price;
    for trade in &trades[1..] {
        if trade.time >= candle.time + span {
            candle.vwap_price = turnover / candle.volume;
            result.push(candle);
            candle = open_candle(trade, period, span);
            turnover = trade.amount * trade.price;
        } else {
            candle.count += 1;
            candle.volume += trade.amount;
            turnover += trade.price * trade.amount;
            // A price that raises the high is never retested as a low;
            // with strict comparisons both cannot hold at once.
            if trade.price > candle.high_price {
                candle.high_price = trade.price;
            } else if trade.price < candle.low_price {
                candle.low_price = trade.price;
            }
            candle.close_price = trade.price;
        }
    }
    candle.vwap_price = turnover / candle.volume;
    result.push(candle);
    debug!(
        trades = trades.len(),
        candles = result.len(),
        target = target.as_str(),
        "upscaled trades"
    );
    Ok(result)
}

/// Starts a fresh candle at the trade's period-aligned bucket.
fn open_candle(trade: &Trade, period: u32, span: u64) -> Candle {
    Candle {
        time: trade.time / span * span,
        period,
        count: 1,
        volume: trade.amount,
        vwap_price: 0.0,
        open_price: trade.price,
        high_price: trade.price,
        low_price: trade.price,
        close_price: trade.price,
    }
}

/// Unions two candle sequences keyed by time.
///
/// Candles present in both inputs must match field for field; equal
/// duplicates collapse into one. The output is sorted ascending by time
/// regardless of the map's iteration order.
///
/// # Errors
///
/// Returns [`CandlemillError::MergingPeriodsMismatch`] when the inputs'
/// first candles disagree on period,
/// [`CandlemillError::DuplicatedCandle`] when `x` repeats a time
/// internally, and [`CandlemillError::MismatchedCandles`] when the inputs
/// disagree at a shared time.
pub fn merge(x: &[Candle], y: &[Candle]) -> Result<Vec<Candle>> {
    if let (Some(a), Some(b)) = (x.first(), y.first()) {
        if a.period != b.period {
            return Err(CandlemillError::MergingPeriodsMismatch);
        }
    }
    let mut indexed: FxHashMap<u64, &Candle> =
        FxHashMap::with_capacity_and_hasher(x.len() + y.len(), Default::default());
    for candle in x {
        if indexed.insert(candle.time, candle).is_some() {
            return Err(CandlemillError::DuplicatedCandle { time: candle.time });
        }
    }
    for candle in y {
        match indexed.entry(candle.time) {
            Entry::Occupied(occupied) => {
                if **occupied.get() != *candle {
                    return Err(CandlemillError::MismatchedCandles { time: candle.time });
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(candle);
            }
        }
    }
    let mut merged: Vec<Candle> = indexed.into_values().copied().collect();
    merged.sort_by_key(|candle| candle.time);
    debug!(
        left = x.len(),
        right = y.len(),
        merged = merged.len(),
        "merged candles"
    );
    Ok(merged)
}
