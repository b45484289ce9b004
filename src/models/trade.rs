//! Executed trade model.

use serde::{Deserialize, Serialize};

/// A single executed trade.
///
/// Sequences fed into [`upscale_trades`](crate::upscale_trades) must be
/// sorted ascending by `time`; the type itself enforces no ordering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Execution time, epoch seconds.
    pub time: u64,
    /// Traded quantity in base units.
    pub amount: f64,
    pub price: f64,
}
