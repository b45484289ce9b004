//! Reading and writing candle and trade files.
//!
//! Candle files carry a single header line followed by one record per
//! candle; trade files have no header and order their fields
//! `time, price, amount` on disk. Any row that fails to decode aborts the
//! whole read with no partial result.

use std::path::Path;

use tracing::debug;

use crate::error::{CandlemillError, Result};
use crate::models::{Candle, Trade};
use crate::table::{Reader, Row, Writer};

/// Column names of the candle file header line.
const CANDLE_COLUMNS: [&str; 9] = [
    "time",
    "period",
    "trades",
    "volume",
    "vwap_price",
    "open_price",
    "high_price",
    "low_price",
    "close_price",
];

/// Rough bytes per formatted candle line, for buffer pre-sizing.
const CANDLE_LINE_ESTIMATE: usize = 72;

/// Rough bytes per formatted trade line, for buffer pre-sizing.
const TRADE_LINE_ESTIMATE: usize = 32;

/// Loads a candle file, skipping its header line.
///
/// # Errors
///
/// Returns [`CandlemillError::InvalidCandleFields`] when any row fails to
/// decode and [`CandlemillError::Io`] when the file cannot be read.
pub fn read_candles(path: impl AsRef<Path>) -> Result<Vec<Candle>> {
    let path = path.as_ref();
    let reader = Reader::from_file(path)?;
    let mut candles = Vec::with_capacity(reader.text_size() / CANDLE_LINE_ESTIMATE + 1);
    let mut rows = reader.rows_after_header();
    while let Some(row) = rows.next_row() {
        let candle = decode_candle(row).ok_or(CandlemillError::InvalidCandleFields)?;
        candles.push(candle);
    }
    debug!(path = %path.display(), count = candles.len(), "read candles");
    Ok(candles)
}

/// Writes candles to a file, preceded by the header line.
///
/// # Errors
///
/// Returns [`CandlemillError::Io`] when the file cannot be written.
pub fn write_candles(path: impl AsRef<Path>, candles: &[Candle]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = Writer::new();
    writer.reserve((candles.len() + 1) * CANDLE_LINE_ESTIMATE);
    let mut header = writer.row();
    for column in CANDLE_COLUMNS {
        header = header.field(column);
    }
    header.end();
    for candle in candles {
        writer
            .row()
            .field(candle.time)
            .field(candle.period)
            .field(candle.count)
            .field(candle.volume)
            .field(candle.vwap_price)
            .field(candle.open_price)
            .field(candle.high_price)
            .field(candle.low_price)
            .field(candle.close_price)
            .end();
    }
    writer.to_file(path)?;
    debug!(path = %path.display(), count = candles.len(), "wrote candles");
    Ok(())
}

/// Loads a trade file; trade files have no header line.
///
/// # Errors
///
/// Returns [`CandlemillError::InvalidTradeFields`] when any row fails to
/// decode and [`CandlemillError::Io`] when the file cannot be read.
pub fn read_trades(path: impl AsRef<Path>) -> Result<Vec<Trade>> {
    let path = path.as_ref();
    let reader = Reader::from_file(path)?;
    let mut trades = Vec::with_capacity(reader.text_size() / TRADE_LINE_ESTIMATE + 1);
    let mut rows = reader.rows();
    while let Some(row) = rows.next_row() {
        let trade = decode_trade(row).ok_or(CandlemillError::InvalidTradeFields)?;
        trades.push(trade);
    }
    debug!(path = %path.display(), count = trades.len(), "read trades");
    Ok(trades)
}

/// Writes trades to a file, one headerless record per trade.
///
/// # Errors
///
/// Returns [`CandlemillError::Io`] when the file cannot be written.
pub fn write_trades(path: impl AsRef<Path>, trades: &[Trade]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = Writer::new();
    writer.reserve(trades.len() * TRADE_LINE_ESTIMATE);
    for trade in trades {
        writer
            .row()
            .field(trade.time)
            .field(trade.price)
            .field(trade.amount)
            .end();
    }
    writer.to_file(path)?;
    debug!(path = %path.display(), count = trades.len(), "wrote trades");
    Ok(())
}

fn decode_candle(row: &mut Row<'_>) -> Option<Candle> {
    Some(Candle {
        time: row.field()?,
        period: row.field()?,
        count: row.field()?,
        volume: row.field()?,
        vwap_price: row.field()?,
        open_price: row.field()?,
        high_price: row.field()?,
        low_price: row.field()?,
        close_price: row.last_field()?,
    })
}

fn decode_trade(row: &mut Row<'_>) -> Option<Trade> {
    let time = row.field()?;
    let price = row.field()?;
    let amount = row.last_field()?;
    Some(Trade { time, amount, price })
}
