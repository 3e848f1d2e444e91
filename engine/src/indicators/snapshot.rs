//! Indicator snapshot for one candle series.
//!
//! Every series held here is aligned 1:1 with the candles it was computed from, and
//! index `i` only ever depends on candles `0..=i`. Consumers read the tail through
//! [`IndicatorSnapshot::latest`] instead of indexing, so short history surfaces as
//! [`ScanError::InsufficientHistory`] rather than a sentinel value.

use super::{Atr, Ema, IndicatorCalculator, Rsi};
use crate::error::{Result, ScanError};
use shared::models::Candle;

pub const FAST_EMA_PERIOD: usize = 9;
pub const SLOW_EMA_PERIOD: usize = 21;
pub const RSI_PERIOD: usize = 14;
pub const ATR_PERIOD: usize = 14;

/// Candles required before every indicator is defined at the last index.
pub const REQUIRED_HISTORY: usize = max_period() + 1;

const fn max_period() -> usize {
    let mut max = FAST_EMA_PERIOD;
    if SLOW_EMA_PERIOD > max {
        max = SLOW_EMA_PERIOD;
    }
    if RSI_PERIOD > max {
        max = RSI_PERIOD;
    }
    if ATR_PERIOD > max {
        max = ATR_PERIOD;
    }
    max
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Close,
    Volume,
    FastEma,
    SlowEma,
    Rsi,
    Atr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSnapshot {
    pub closes: Vec<Option<f64>>,
    pub volumes: Vec<Option<f64>>,
    pub fast_ema: Vec<Option<f64>>,
    pub slow_ema: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub atr: Vec<Option<f64>>,
}

impl IndicatorSnapshot {
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn series(&self, kind: SeriesKind) -> &[Option<f64>] {
        match kind {
            SeriesKind::Close => &self.closes,
            SeriesKind::Volume => &self.volumes,
            SeriesKind::FastEma => &self.fast_ema,
            SeriesKind::SlowEma => &self.slow_ema,
            SeriesKind::Rsi => &self.rsi,
            SeriesKind::Atr => &self.atr,
        }
    }

    /// The last `n` observations of `kind`, oldest first.
    pub fn latest(&self, kind: SeriesKind, n: usize) -> Result<Vec<f64>> {
        let series = self.series(kind);
        let defined = series.iter().rev().take_while(|v| v.is_some()).count();
        if n == 0 || defined < n {
            return Err(ScanError::InsufficientHistory {
                required: n,
                available: defined,
            });
        }
        Ok(series[series.len() - n..].iter().flatten().copied().collect())
    }

    pub fn last(&self, kind: SeriesKind) -> Result<f64> {
        Ok(self.latest(kind, 1)?[0])
    }
}

pub fn compute_indicators(candles: &[Candle]) -> Result<IndicatorSnapshot> {
    if candles.len() < REQUIRED_HISTORY {
        return Err(ScanError::InsufficientHistory {
            required: REQUIRED_HISTORY,
            available: candles.len(),
        });
    }

    let snapshot = IndicatorSnapshot {
        closes: candles.iter().map(|c| Some(c.close)).collect(),
        volumes: candles.iter().map(|c| Some(c.volume)).collect(),
        fast_ema: Ema::new(FAST_EMA_PERIOD).calculate(candles),
        slow_ema: Ema::new(SLOW_EMA_PERIOD).calculate(candles),
        rsi: Rsi::new(RSI_PERIOD).calculate(candles),
        atr: Atr::new(ATR_PERIOD).calculate(candles),
    };

    tracing::trace!(
        candles = candles.len(),
        fast_ema = ?snapshot.fast_ema.last(),
        slow_ema = ?snapshot.slow_ema.last(),
        rsi = ?snapshot.rsi.last(),
        atr = ?snapshot.atr.last(),
        "Computed indicator snapshot"
    );
    Ok(snapshot)
}
