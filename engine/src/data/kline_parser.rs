use crate::error::{Result, ScanError};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use shared::models::Candle;
use shared::utils::{parse_decimal, parse_millis};

// Kline rows are position-indexed:
// [openTime, open, high, low, close, volume, closeTime, ...exchange-specific trailing fields]
// Example row: [1700000000000,"36500.01","36620.5","36480.0","36601.2","152.33",1700000899999,"5573921.1"]
const KLINE_FIELDS: usize = 7;
const FIELD_NAMES: [&str; KLINE_FIELDS] = ["openTime", "open", "high", "low", "close", "volume", "closeTime"];

fn field<'a>(row: &'a [Value], idx: usize, row_idx: usize) -> Result<&'a Value> {
    row.get(idx).ok_or_else(|| {
        ScanError::Parse(format!("Missing '{}' field in kline row {}", FIELD_NAMES[idx], row_idx))
    })
}

fn decimal(row: &[Value], idx: usize, row_idx: usize) -> Result<f64> {
    parse_decimal(field(row, idx, row_idx)?)
        .map_err(|e| ScanError::Parse(format!("Error parsing '{}' in kline row {}: {}", FIELD_NAMES[idx], row_idx, e)))
}

fn timestamp(row: &[Value], idx: usize, row_idx: usize) -> Result<DateTime<Utc>> {
    let millis = parse_millis(field(row, idx, row_idx)?)
        .map_err(|e| ScanError::Parse(format!("Error parsing '{}' in kline row {}: {}", FIELD_NAMES[idx], row_idx, e)))?;
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        ScanError::Parse(format!("Out of range '{}' {} in kline row {}", FIELD_NAMES[idx], millis, row_idx))
    })
}

fn parse_row(symbol: &str, row: &[Value], row_idx: usize) -> Result<Candle> {
    if row.len() < KLINE_FIELDS {
        return Err(ScanError::Parse(format!(
            "Kline row {} has {} fields, expected at least {}",
            row_idx,
            row.len(),
            KLINE_FIELDS
        )));
    }
    Ok(Candle {
        symbol: symbol.to_string(),
        open_time: timestamp(row, 0, row_idx)?,
        open: decimal(row, 1, row_idx)?,
        high: decimal(row, 2, row_idx)?,
        low: decimal(row, 3, row_idx)?,
        close: decimal(row, 4, row_idx)?,
        volume: decimal(row, 5, row_idx)?,
        close_time: timestamp(row, 6, row_idx)?,
    })
}

/// Parses a klines response body into candles ordered oldest first.
///
/// At most `limit` candles are returned (the most recent ones). Duplicate open times
/// are rejected since the series must be strictly increasing.
pub fn parse_klines(symbol: &str, body: &str, limit: usize) -> Result<Vec<Candle>> {
    let rows: Vec<Vec<Value>> = serde_json::from_str(body)?;

    let mut candles = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| parse_row(symbol, row, idx))
        .collect::<Result<Vec<_>>>()?;

    candles.sort_by_key(|c| c.open_time);
    if let Some(pair) = candles.windows(2).find(|w| w[0].open_time == w[1].open_time) {
        return Err(ScanError::Parse(format!(
            "Duplicate kline open time {} for {}",
            pair[0].open_time, symbol
        )));
    }

    if candles.len() > limit {
        candles.drain(..candles.len() - limit);
    }
    Ok(candles)
}

#[derive(Debug, Deserialize)]
struct ExchangeInfo {
    symbols: Vec<SymbolInfo>,
}

#[derive(Debug, Deserialize)]
struct SymbolInfo {
    symbol: String,
    status: String,
}

pub const TRADING_STATUS: &str = "TRADING";

/// Extracts symbols whose status is `TRADING`, in response order.
pub fn parse_trading_symbols(body: &str) -> Result<Vec<String>> {
    let info: ExchangeInfo = serde_json::from_str(body)?;
    Ok(info
        .symbols
        .into_iter()
        .filter(|s| s.status == TRADING_STATUS)
        .map(|s| s.symbol)
        .collect())
}
