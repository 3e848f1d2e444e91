// Relative Strength Index (RSI) indicator implementation
use super::{wilder_step, IndicatorCalculator};
use serde_json::Value;
use shared::models::Candle;

pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("RSI({})", period),
            period,
        }
    }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        // No losses: 100, unless there was no movement at all.
        return if avg_gain == 0.0 { 50.0 } else { 100.0 };
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

impl IndicatorCalculator for Rsi {
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

        let changes: Vec<f64> = data.windows(2).map(|w| w[1].close - w[0].close).collect();
        let gain = |change: f64| change.max(0.0);
        let loss = |change: f64| (-change).max(0.0);

        // RSI needs `period` changes, so the first value sits at index `period`.
        let mut results = vec![None; self.period];

        let seed = &changes[..self.period];
        let mut avg_gain = seed.iter().copied().map(gain).sum::<f64>() / self.period as f64;
        let mut avg_loss = seed.iter().copied().map(loss).sum::<f64>() / self.period as f64;
        results.push(Some(rsi_from_averages(avg_gain, avg_loss)));

        for &change in &changes[self.period..] {
            avg_gain = wilder_step(avg_gain, gain(change), self.period);
            avg_loss = wilder_step(avg_loss, loss(change), self.period);
            results.push(Some(rsi_from_averages(avg_gain, avg_loss)));
        }
        results
    }
}
