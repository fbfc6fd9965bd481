//! Deviation of an observed value from its threshold

/// Percentage deviation of `value` from `threshold`
///
/// `((value - threshold) / threshold) * 100`, sign preserved. A zero threshold
/// yields `0.0`.
pub fn deviation_percent(value: i64, threshold: i64) -> f64 {
    if threshold == 0 {
        return 0.0;
    }
    // Widen before subtracting so extreme inputs cannot overflow
    let delta = value as f64 - threshold as f64;
    (delta / threshold as f64) * 100.0
}
