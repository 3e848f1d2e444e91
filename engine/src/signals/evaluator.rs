//! Decision rules over the tail of an [`IndicatorSnapshot`].
//!
//! Two rule sets are supported and one must be picked explicitly through
//! configuration:
//!
//! * [`SignalPolicy::VolumeVolatility`]: EMA(9)/EMA(21) trend, loose RSI bounds
//!   (30/70), confirmed by a volume increase and a close-to-close move above 1%.
//! * [`SignalPolicy::RollingAverage`]: EMA trend, RSI midline (50), confirmed by
//!   volume and ATR both above their trailing 10-observation means.
//!
//! Evaluation is pure: same snapshot and policy, same answer.

use crate::error::{Result, ScanError};
use crate::indicators::snapshot::{ATR_PERIOD, REQUIRED_HISTORY};
use crate::indicators::{rolling_mean, IndicatorSnapshot, SeriesKind};
use serde::Deserialize;
use shared::models::{Direction, Signal};
use std::fmt;
use std::str::FromStr;

pub const CONFIRMATION_WINDOW: usize = 10;
pub const MIN_MOVE_FRACTION: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(try_from = "String")]
pub enum SignalPolicy {
    /// Trend with RSI inside 30/70, rising volume and a >1% close-to-close move.
    VolumeVolatility,
    /// Trend across the RSI midline, volume and ATR above their trailing means.
    #[default]
    RollingAverage,
}

impl FromStr for SignalPolicy {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "volume-volatility" => Ok(SignalPolicy::VolumeVolatility),
            "b" | "rolling-average" => Ok(SignalPolicy::RollingAverage),
            other => Err(ScanError::Config(format!("unknown signal policy '{}'", other))),
        }
    }
}

impl TryFrom<String> for SignalPolicy {
    type Error = ScanError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for SignalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalPolicy::VolumeVolatility => f.write_str("volume-volatility"),
            SignalPolicy::RollingAverage => f.write_str("rolling-average"),
        }
    }
}

impl SignalPolicy {
    /// Candles needed for every value the rule reads to be defined at the last index.
    pub fn required_history(&self) -> usize {
        match self {
            SignalPolicy::VolumeVolatility => REQUIRED_HISTORY,
            // ATR is first defined at index ATR_PERIOD and its mean needs a full window
            SignalPolicy::RollingAverage => REQUIRED_HISTORY.max(ATR_PERIOD + CONFIRMATION_WINDOW),
        }
    }
}

/// Trailing `CONFIRMATION_WINDOW` mean of `kind` at the last index.
fn trailing_mean(snapshot: &IndicatorSnapshot, kind: SeriesKind) -> Result<f64> {
    let series = snapshot.series(kind);
    rolling_mean(series, CONFIRMATION_WINDOW)
        .last()
        .copied()
        .flatten()
        .ok_or_else(|| ScanError::InsufficientHistory {
            required: CONFIRMATION_WINDOW,
            available: series.iter().rev().take_while(|v| v.is_some()).count(),
        })
}

/// Like [`evaluate`], but reports which value was missing instead of folding it into
/// `Direction::None`.
pub fn try_evaluate(snapshot: &IndicatorSnapshot, policy: SignalPolicy) -> Result<Direction> {
    let fast = snapshot.last(SeriesKind::FastEma)?;
    let slow = snapshot.last(SeriesKind::SlowEma)?;
    let rsi = snapshot.last(SeriesKind::Rsi)?;

    let trend_up = fast > slow;
    let trend_down = fast < slow;
    if !trend_up && !trend_down {
        return Ok(Direction::None);
    }

    let direction = match policy {
        SignalPolicy::VolumeVolatility => {
            let volumes = snapshot.latest(SeriesKind::Volume, 2)?;
            let closes = snapshot.latest(SeriesKind::Close, 2)?;
            let volume_rising = volumes[1] > volumes[0];
            let moved = (closes[1] - closes[0]).abs() > MIN_MOVE_FRACTION * closes[0];
            let confirmed = volume_rising && moved;

            if trend_up && rsi > 30.0 && confirmed {
                Direction::Long
            } else if trend_down && rsi < 70.0 && confirmed {
                Direction::Short
            } else {
                Direction::None
            }
        }
        SignalPolicy::RollingAverage => {
            let volume_mean = trailing_mean(snapshot, SeriesKind::Volume)?;
            let atr_mean = trailing_mean(snapshot, SeriesKind::Atr)?;
            let confirmed = snapshot.last(SeriesKind::Volume)? > volume_mean
                && snapshot.last(SeriesKind::Atr)? > atr_mean;

            if trend_up && rsi > 50.0 && confirmed {
                Direction::Long
            } else if trend_down && rsi < 50.0 && confirmed {
                Direction::Short
            } else {
                Direction::None
            }
        }
    };
    Ok(direction)
}

/// Classifies `symbol` from its snapshot. Undefined inputs yield `Direction::None`.
pub fn evaluate(symbol: &str, snapshot: &IndicatorSnapshot, policy: SignalPolicy) -> Signal {
    match try_evaluate(snapshot, policy) {
        Ok(direction) => Signal::new(symbol, direction),
        Err(_) => Signal::none(symbol),
    }
}
