// Technical indicators module
pub mod atr;
pub mod ema;
pub mod rsi;
pub mod sma;
pub mod snapshot;

pub use atr::Atr;
pub use ema::Ema;
pub use rsi::Rsi;
pub use sma::rolling_mean;
pub use snapshot::{compute_indicators, IndicatorSnapshot, SeriesKind};

use serde_json::Value;
use shared::models::Candle;

// Common trait for all indicators
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this indicator instance
    /// Output is aligned 1:1 with `data`; `None` marks warm-up entries.
    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>>;
}

/// Wilder's smoothing step: `(previous * (n - 1) + current) / n`.
pub(crate) fn wilder_step(previous: f64, current: f64, period: usize) -> f64 {
    (previous * (period - 1) as f64 + current) / period as f64
}
