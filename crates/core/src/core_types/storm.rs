//! Storm sources
//!
//! A storm is a point source on the normalized map that periodically emits
//! swell rings along its heading. Storms are plain data: the registry edits
//! them, kinematics moves them and the ring engine writes `last_emission`.

use super::units::{Degrees, Hours, Kilometers, Knots};
use super::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default heading for newly placed storms
pub const DEFAULT_STORM_HEADING_DEG: f64 = 300.0;
/// Default speed for newly placed storms (abstract speed units)
pub const DEFAULT_STORM_SPEED_UNITS: f64 = 0.6;
/// Default power for newly placed storms
pub const DEFAULT_STORM_POWER: f64 = 5.0;
/// Default sustained wind for newly placed storms
pub const DEFAULT_STORM_WIND_KTS: f64 = 40.0;
/// Default fetch radius for newly placed storms
pub const DEFAULT_STORM_RADIUS_KM: f64 = 400.0;
/// Upper bound of the storm power scale
pub const MAX_STORM_POWER: f64 = 10.0;

/// Stable identity of a storm within one registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StormId(pub u32);

impl fmt::Display for StormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "storm-{}", self.0)
    }
}

/// Storm source on the normalized map
///
/// # Fields
///
/// - `position`: map coordinates in [0, 1], y growing downward
/// - `heading`: travel direction in [0, 360)
/// - `speed_units`: abstract speed, 1 unit ≈ 40 km/h
/// - `power`: intensity on a [0, 10] scale
/// - `last_emission`: clock hour of the most recent ring, `None` until the first one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Storm {
    pub id: StormId,
    pub name: String,
    pub position: Vec2,
    pub heading: Degrees,
    pub speed_units: f64,
    pub power: f64,
    pub wind: Knots,
    pub radius: Kilometers,
    pub active: bool,
    pub last_emission: Option<Hours>,
}

impl Storm {
    /// Create a storm with the default placement parameters
    pub fn new(id: StormId, name: impl Into<String>, position: Vec2) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            heading: Degrees::new(DEFAULT_STORM_HEADING_DEG),
            speed_units: DEFAULT_STORM_SPEED_UNITS,
            power: DEFAULT_STORM_POWER,
            wind: Knots::new(DEFAULT_STORM_WIND_KTS),
            radius: Kilometers::new(DEFAULT_STORM_RADIUS_KM),
            active: true,
            last_emission: None,
        }
    }

    /// Copy with every numeric field forced into its valid range
    ///
    /// Non-finite values become zero (or the map centre for position) so the
    /// physics never sees NaN. The emission bookkeeping is kept as-is unless
    /// it is non-finite, in which case the storm is treated as never having
    /// emitted.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let position = Vec2::new(
            finite_or(self.position.x, 0.5).clamp(0.0, 1.0),
            finite_or(self.position.y, 0.5).clamp(0.0, 1.0),
        );
        Self {
            id: self.id,
            name: self.name.clone(),
            position,
            heading: self.heading.normalized(),
            speed_units: finite_or(self.speed_units, 0.0).max(0.0),
            power: finite_or(self.power, 0.0).clamp(0.0, MAX_STORM_POWER),
            wind: Knots::new(finite_or(*self.wind, 0.0).max(0.0)),
            radius: Kilometers::new(finite_or(*self.radius, 0.0).max(0.0)),
            active: self.active,
            last_emission: self.last_emission.filter(|h| h.is_finite()),
        }
    }
}

#[inline]
pub(crate) fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_storm_defaults() {
        let storm = Storm::new(StormId(1), "Storm 1", Vec2::new(0.3, 0.4));
        assert_eq!(*storm.heading, 300.0);
        assert_eq!(storm.power, 5.0);
        assert_eq!(*storm.wind, 40.0);
        assert_eq!(*storm.radius, 400.0);
        assert!(storm.active);
        assert!(storm.last_emission.is_none());
    }

    #[test]
    fn test_sanitized_clamps_and_zeroes() {
        let mut storm = Storm::new(StormId(2), "Bad", Vec2::new(f64::NAN, 1.7));
        storm.power = 42.0;
        storm.speed_units = -3.0;
        storm.wind = Knots::new(f64::INFINITY);
        storm.heading = Degrees::new(-45.0);
        storm.last_emission = Some(Hours::new(f64::NAN));

        let clean = storm.sanitized();
        assert_eq!(clean.position, Vec2::new(0.5, 1.0));
        assert_eq!(clean.power, 10.0);
        assert_eq!(clean.speed_units, 0.0);
        assert_eq!(*clean.wind, 0.0);
        assert_eq!(*clean.heading, 315.0);
        assert!(clean.last_emission.is_none());
    }

    #[test]
    fn test_storm_id_display() {
        assert_eq!(StormId(7).to_string(), "storm-7");
    }
}
