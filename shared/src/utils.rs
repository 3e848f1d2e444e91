// Helpers shared by the engine: exchange number parsing and alert text.
use crate::models::Direction;
use anyhow::{anyhow, Result};
use serde_json::Value;

/// Exchange REST payloads carry prices and volumes as decimal strings ("42000.51")
/// and timestamps as integers, but some endpoints send plain JSON numbers for both.
pub fn parse_decimal(value: &Value) -> Result<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(anyhow!("Failed to parse decimal '{}'", value)),
    }
}

pub fn parse_millis(value: &Value) -> Result<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| anyhow!("Failed to parse millisecond timestamp '{}'", value))
}

pub fn render_signal_message(symbol: &str, direction: Direction) -> String {
    match direction {
        Direction::Long => format!("🚀 Long Signal on {}", symbol),
        Direction::Short => format!("🔻 Short Signal on {}", symbol),
        Direction::None => String::new(),
    }
}
