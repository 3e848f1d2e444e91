// Trailing simple moving average over an aligned indicator series.

/// Trailing mean over `window` entries, inclusive of the current one.
/// An output is `None` whenever any entry in its window is undefined.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|i| {
            let start = (i + 1).checked_sub(window)?;
            let slice = &values[start..=i];
            let sum = slice.iter().copied().sum::<Option<f64>>()?;
            Some(sum / window as f64)
        })
        .collect()
}
