/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Percent change from `baseline` to `value`, rounded to the nearest whole
/// percent. The caller guarantees a nonzero baseline.
pub fn percent_change(baseline: i64, value: i64) -> i64 {
    (((value - baseline) as f64 / baseline as f64) * 100.0).round() as i64
}

/// Rounds to the nearest integer, halves away from zero.
pub fn round_i64(value: f64) -> i64 {
    value.round() as i64
}
