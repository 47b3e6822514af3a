//! Storm kinematics
//!
//! Storm speed is given in abstract units (1 unit ≈ [`STORM_REF_SPEED_KMH`])
//! and converted to normalized map displacement using the map scale
//! ([`MAX_RADIUS_KM`] per map unit).
//!
//! The heading here uses the math convention: 0° moves along +x (east),
//! 90° along +y, which on the screen is DOWN (south). This is not the compass
//! convention of `bearing_from_north`; scenario storm headings are authored
//! against this one.

use super::swell::MAX_RADIUS_KM;
use crate::core_types::storm::finite_or;
use crate::core_types::units::{Degrees, Hours};
use crate::core_types::Vec2;

/// km/h represented by one storm speed unit
pub const STORM_REF_SPEED_KMH: f64 = 40.0;

/// Displacement of a storm over one step, in map units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StormDelta {
    pub dx: f64,
    pub dy: f64,
}

impl StormDelta {
    /// As a map vector
    pub fn to_vec(self) -> Vec2 {
        Vec2::new(self.dx, self.dy)
    }
}

/// Map displacement for a storm moving at `speed_units` along `heading` for `dt_hours`
///
/// Negative or non-finite speed and time are treated as zero; a non-finite
/// heading is treated as 0°.
pub fn compute_storm_delta_units(speed_units: f64, heading: Degrees, dt_hours: Hours) -> StormDelta {
    let speed = finite_or(speed_units, 0.0).max(0.0);
    let hours = finite_or(*dt_hours, 0.0).max(0.0);

    let distance_km = speed * STORM_REF_SPEED_KMH * hours;
    let distance_units = distance_km / MAX_RADIUS_KM;
    let heading_rad = finite_or(*heading, 0.0).to_radians();

    StormDelta {
        dx: heading_rad.cos() * distance_units,
        dy: heading_rad.sin() * distance_units,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::bearing_from_north;
    use approx::assert_relative_eq;

    #[test]
    fn test_moves_expected_map_distance() {
        let speed_units = 0.5; // 20 km/h
        let dt = 5.0;
        let expected = speed_units * STORM_REF_SPEED_KMH * dt / MAX_RADIUS_KM;
        let delta = compute_storm_delta_units(speed_units, Degrees::new(0.0), Hours::new(dt));
        assert_relative_eq!(delta.dx, expected, epsilon = 1e-12);
        assert_relative_eq!(delta.dy, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_heading_ninety_moves_down_the_screen() {
        let delta = compute_storm_delta_units(1.0, Degrees::new(90.0), Hours::new(1.0));
        assert_relative_eq!(delta.dx, 0.0, epsilon = 1e-12);
        assert!(delta.dy > 0.0);
    }

    #[test]
    fn test_conventions_differ_from_compass_bearing() {
        // Heading 90° in motion space points down-screen, which the compass
        // bearing reads as 180° (south), not 90° (east).
        let delta = compute_storm_delta_units(1.0, Degrees::new(90.0), Hours::new(1.0));
        assert_relative_eq!(bearing_from_north(delta.dx, delta.dy), 180.0, epsilon = 1e-9);

        // Heading 0° in motion space is compass east.
        let delta = compute_storm_delta_units(1.0, Degrees::new(0.0), Hours::new(1.0));
        assert_relative_eq!(bearing_from_north(delta.dx, delta.dy), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_and_invalid_inputs_clamp_to_zero() {
        let zero = StormDelta::default();
        assert_eq!(
            compute_storm_delta_units(-1.0, Degrees::new(45.0), Hours::new(2.0)),
            zero
        );
        assert_eq!(
            compute_storm_delta_units(1.0, Degrees::new(45.0), Hours::new(-2.0)),
            zero
        );
        assert_eq!(
            compute_storm_delta_units(f64::NAN, Degrees::new(45.0), Hours::new(2.0)),
            zero
        );
        let delta = compute_storm_delta_units(1.0, Degrees::new(f64::NAN), Hours::new(1.0));
        assert!(delta.dx > 0.0);
    }
}
