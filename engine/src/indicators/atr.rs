// Average True Range (ATR) indicator implementation
use super::{wilder_step, IndicatorCalculator};
use serde_json::Value;
use shared::models::Candle;

pub struct Atr {
    name: String,
    period: usize,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("ATR({})", period),
            period,
        }
    }
}

/// True range per candle. The first candle has no previous close, so its range is high - low.
pub fn true_ranges(data: &[Candle]) -> Vec<f64> {
    data.iter()
        .enumerate()
        .map(|(i, candle)| {
            let spread = candle.high - candle.low;
            match i.checked_sub(1).map(|p| data[p].close) {
                Some(prev_close) => spread
                    .max((candle.high - prev_close).abs())
                    .max((candle.low - prev_close).abs()),
                None => spread,
            }
        })
        .collect()
}

impl IndicatorCalculator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>> {
        if self.period == 0 || data.len() <= self.period {
            return vec![None; data.len()];
        }

        let ranges = true_ranges(data);
        let mut results = vec![None; self.period];

        // Seed from the first `period` ranges that have a previous close.
        let mut atr = ranges[1..=self.period].iter().sum::<f64>() / self.period as f64;
        results.push(Some(atr));

        for &range in &ranges[self.period + 1..] {
            atr = wilder_step(atr, range, self.period);
            results.push(Some(atr));
        }
        results
    }
}
