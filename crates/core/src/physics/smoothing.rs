//! Exponential smoothing of spot readings

/// Exponential moving average step
///
/// ```text
/// next_avg = α × sample + (1 − α) × previous
/// ```
///
/// `alpha` is clamped to [0, 1] (non-finite → 0): 0 freezes the average,
/// 1 tracks the raw sample exactly. A non-finite sample counts as 0, and a
/// non-finite previous value is replaced by the sample outright.
pub fn apply_ema(previous: f64, sample: f64, alpha: f64) -> f64 {
    let weight = if alpha.is_finite() {
        alpha.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let target = if sample.is_finite() { sample } else { 0.0 };

    if !previous.is_finite() {
        return target;
    }
    if weight <= 0.0 {
        return previous;
    }
    if weight >= 1.0 {
        return target;
    }
    weight * target + (1.0 - weight) * previous
}
