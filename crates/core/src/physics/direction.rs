//! Angular geometry for swell direction matching
//!
//! Two weighting shapes are used and they are intentionally different:
//!
//! - [`directional_weight`] is a trapezoid over the circle: flat 1 inside a
//!   spot's preferred window, linear shoulders over [`WINDOW_FALLOFF_DEG`],
//!   then exactly 0. It answers "does this spot like swell from there?".
//! - [`directional_falloff`] is a Gaussian around a ring's heading. It never
//!   reaches 0, so off-axis directions still get a vanishing share of the
//!   ring's energy.
//!
//! # Angle conventions
//!
//! [`bearing_from_north`] is compass style: 0° = up (north), 90° = right
//! (east), with screen y growing downward. Storm motion in
//! `physics::storm_motion` uses the math convention (0° = +x) instead; the
//! scenario data is authored against both, so neither is converted here.

/// Width of the linear shoulder beyond a preferred window edge
pub const WINDOW_FALLOFF_DEG: f64 = 45.0;

/// Lower bound on the Gaussian half-width before conversion to sigma
const MIN_FALLOFF_HALF_WIDTH_DEG: f64 = 5.0;

/// Wrap an angle into [0, 360). Non-finite input maps to 0.
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Minimal circular distance between two angles, in [0, 180]
#[inline]
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let diff = (normalize_degrees(a) - normalize_degrees(b)).abs();
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// How well an incoming swell direction matches a preferred window
///
/// The window runs clockwise from `pref_min` to `pref_max` and may wrap
/// through 0° (e.g. 350° → 10°). Returns 1 within the window's half-width
/// of its center, falls linearly to 0 over the next 45°, and is 0 beyond.
///
/// # Arguments
/// * `bearing` - Direction the swell arrives from (degrees)
/// * `pref_min` - Window start (degrees)
/// * `pref_max` - Window end (degrees)
///
/// # Returns
/// Weight in [0, 1]
pub fn directional_weight(bearing: f64, pref_min: f64, pref_max: f64) -> f64 {
    let bearing = normalize_degrees(bearing);
    let min = normalize_degrees(pref_min);
    let max = normalize_degrees(pref_max);

    let (center, width) = if min <= max {
        ((min + max) / 2.0, max - min)
    } else {
        (((min + max + 360.0) / 2.0) % 360.0, 360.0 - min + max)
    };
    let half_width = width / 2.0;
    let distance = angular_difference(bearing, center);

    if distance <= half_width {
        1.0
    } else if distance <= half_width + WINDOW_FALLOFF_DEG {
        (1.0 - (distance - half_width) / WINDOW_FALLOFF_DEG).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Gaussian weighting of `angle` around `center`
///
/// ```text
/// σ = max(5, half_width) / √2
/// w = exp(−Δ² / (2σ²))
/// ```
///
/// where Δ is the minimal circular difference. Always in (0, 1] for finite
/// inputs; at Δ = `half_width` the weight is e⁻¹.
pub fn directional_falloff(angle: f64, center: f64, half_width: f64) -> f64 {
    let half_width = if half_width.is_finite() {
        half_width.max(MIN_FALLOFF_HALF_WIDTH_DEG)
    } else {
        MIN_FALLOFF_HALF_WIDTH_DEG
    };
    let sigma = half_width / std::f64::consts::SQRT_2;
    let diff = angular_difference(angle, center);
    (-(diff * diff) / (2.0 * sigma * sigma)).exp()
}

/// Compass bearing of a screen-space offset
///
/// 0° points up the screen (negative y), 90° points right.
pub fn bearing_from_north(dx: f64, dy: f64) -> f64 {
    normalize_degrees(dx.atan2(-dy).to_degrees())
}
