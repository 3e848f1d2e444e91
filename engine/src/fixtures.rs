// Candle builders shared by the unit tests.
use chrono::{DateTime, Utc};
use shared::models::Candle;

const BASE_MILLIS: i64 = 1_700_000_000_000;
const STEP_MILLIS: i64 = 15 * 60 * 1_000;

fn at(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap()
}

pub fn candle(index: usize, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Candle {
    let open_millis = BASE_MILLIS + index as i64 * STEP_MILLIS;
    Candle {
        symbol: "TEST".to_string(),
        open_time: at(open_millis),
        open,
        high,
        low,
        close,
        volume,
        close_time: at(open_millis + STEP_MILLIS - 1),
    }
}

pub fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| candle(i, close, close, close, close, 0.0))
        .collect()
}

/// Closes compounding by `step` per candle (0.02 = +2%), with rising volume and a
/// widening high/low range so true range grows along the series.
pub fn trending_series(len: usize, step: f64) -> Vec<Candle> {
    (0..len)
        .map(|i| {
            let close = 100.0 * (1.0 + step).powi(i as i32);
            let open = close / (1.0 + step);
            let spread = 0.5 + i as f64 * 0.1;
            candle(i, open, close.max(open) + spread, close.min(open) - spread, close, 1_000.0 + i as f64 * 50.0)
        })
        .collect()
}

pub fn rising_series(len: usize) -> Vec<Candle> {
    trending_series(len, 0.02)
}

pub fn falling_series(len: usize) -> Vec<Candle> {
    trending_series(len, -0.02)
}

pub fn flat_series(len: usize) -> Vec<Candle> {
    (0..len).map(|i| candle(i, 42.0, 42.0, 42.0, 42.0, 500.0)).collect()
}
