//! Wall-clock frame time to simulated hours

use crate::core_types::units::Hours;

/// Largest simulated step a single frame may take
pub const MAX_DELTA_HOURS: f64 = 6.0;

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Convert a frame's elapsed milliseconds to simulated hours
///
/// ```text
/// hours = delta_ms / 3.6e6 × base_time_acceleration
/// ```
///
/// # Arguments
/// * `delta_ms` - Real elapsed time; negative or non-finite gives 0
/// * `base_time_acceleration` - Simulated seconds per real second; must be finite and > 0
/// * `max_delta_hours` - Ceiling on the result
pub fn compute_clamped_delta_hours(
    delta_ms: f64,
    base_time_acceleration: f64,
    max_delta_hours: f64,
) -> Hours {
    if !delta_ms.is_finite() || delta_ms <= 0.0 {
        return Hours::ZERO;
    }
    if !base_time_acceleration.is_finite() || base_time_acceleration <= 0.0 {
        return Hours::ZERO;
    }

    let hours = delta_ms / MS_PER_HOUR * base_time_acceleration;
    let ceiling = if max_delta_hours.is_finite() {
        max_delta_hours.max(0.0)
    } else {
        MAX_DELTA_HOURS
    };
    Hours::new(hours.min(ceiling))
}
