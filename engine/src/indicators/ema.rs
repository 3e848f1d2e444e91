// Exponential Moving Average (EMA) indicator implementation
use super::IndicatorCalculator;
use serde_json::Value;
use shared::models::Candle;

pub struct Ema {
    name: String,
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("EMA({})", period),
            period,
        }
    }
}

/// EMA over a plain price series, seeded with the SMA of the first `period` values.
pub fn ema_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 || values.len() < period {
        return vec![None; values.len()];
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut results = vec![None; period - 1];

    let seed: f64 = values[..period].iter().sum::<f64>() / period as f64;
    results.push(Some(seed));

    // alpha * value + (1 - alpha) * previous, arranged so a constant input stays exact
    let mut previous = seed;
    for value in &values[period..] {
        previous = (value - previous) * alpha + previous;
        results.push(Some(previous));
    }
    results
}

impl IndicatorCalculator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>> {
        let closes: Vec<f64> = data.iter().map(|c| c.close).collect();
        ema_series(&closes, self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::candles_from_closes;

    #[test]
    fn test_ema_calculation() {
        let candles = candles_from_closes(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let ema = Ema::new(3);
        let results = ema.calculate(&candles);
        // SMA seed (10+11+12)/3 = 11, alpha = 0.5
        // 13 -> 0.5*13 + 0.5*11 = 12, 14 -> 0.5*14 + 0.5*12 = 13
        assert_eq!(results, vec![None, None, Some(11.0), Some(12.0), Some(13.0)]);
    }

    #[test]
    fn test_ema_insufficient_data() {
        let candles = candles_from_closes(&[1.0, 2.0]);
        assert_eq!(Ema::new(3).calculate(&candles), vec![None, None]);
        assert_eq!(Ema::new(0).calculate(&candles), vec![None, None]);
    }

    #[test]
    fn test_ema_converges_to_constant_price() {
        let mut closes = vec![50.0; 5];
        closes.extend(std::iter::repeat(20.0).take(200));
        let results = ema_series(&closes, 9);
        let last = results.last().copied().flatten().unwrap();
        assert!((last - 20.0).abs() < 1e-9, "EMA did not converge: {}", last);

        let flat = ema_series(&[7.5; 30], 21);
        assert!(flat.iter().flatten().all(|v| (*v - 7.5).abs() < 1e-12));
    }

    #[test]
    fn test_ema_parameters() {
        let ema = Ema::new(21);
        assert_eq!(ema.name(), "EMA(21)");
        assert_eq!(ema.parameters()["period"], 21);
    }
}
