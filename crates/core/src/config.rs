//! Simulation configuration
//!
//! Every tunable scalar the physics reads lives in [`SimConfig`]. Fields are
//! private and only change through setters that validate the new value; a
//! rejected value leaves the last-known-good value in place, so NaN or an
//! out-of-range slider value can never reach the ring or sampling code.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Default simulated seconds per wall-clock second
pub const DEFAULT_BASE_TIME_ACCELERATION: f64 = 3600.0;
/// Default angular width of a ring's energy sector
pub const DEFAULT_RING_SECTOR_WIDTH_DEG: f64 = 120.0;
/// Default pixel band around a ring's radius counted as "reached"
pub const DEFAULT_RING_SAMPLE_TOLERANCE_PX: f64 = 40.0;
/// Default base propagation speed of a power-6 ring
pub const DEFAULT_RING_PROPAGATION_SPEED_KMH: f64 = 60.0;
/// Default exponential decay coefficient per km
pub const DEFAULT_RING_DECAY_RATE_PER_KM: f64 = 0.001;
/// Default energy below which a ring is retired
pub const DEFAULT_RING_MIN_ACTIVE_ENERGY: f64 = 0.05;
/// Default cap on a spot's summed energy
pub const DEFAULT_SPOT_ENERGY_CAP: f64 = 10.0;
/// Default EMA weight of the newest spot sample
pub const DEFAULT_SPOT_ENERGY_SMOOTHING_ALPHA: f64 = 0.25;

const SECTOR_WIDTH_RANGE: (f64, f64) = (10.0, 360.0);
const SAMPLE_TOLERANCE_RANGE: (f64, f64) = (5.0, 200.0);
const SMOOTHING_RANGE: (f64, f64) = (0.0, 1.0);

/// Errors produced when a configuration value is rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Value was NaN or infinite
    NonFinite { field: &'static str },
    /// Value was finite but outside the accepted range
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
    /// Config document could not be parsed
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonFinite { field } => write!(f, "{field} must be a finite number"),
            ConfigError::OutOfRange {
                field,
                value,
                expected,
            } => write!(f, "{field} must be {expected}, got {value}"),
            ConfigError::Parse(msg) => write!(f, "Failed to parse config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

fn validate_positive(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if value <= 0.0 {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            expected: "greater than 0",
        });
    }
    Ok(value)
}

fn validate_range(
    field: &'static str,
    value: f64,
    (min, max): (f64, f64),
    expected: &'static str,
) -> Result<f64, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            expected,
        });
    }
    Ok(value)
}

/// Tunable scalar parameters of the swell physics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimConfig {
    base_time_acceleration: f64,
    ring_sector_width_deg: f64,
    ring_sample_tolerance_px: f64,
    ring_propagation_speed_kmh: f64,
    ring_decay_rate_per_km: f64,
    ring_min_active_energy: f64,
    spot_energy_cap: f64,
    spot_energy_smoothing_alpha: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            base_time_acceleration: DEFAULT_BASE_TIME_ACCELERATION,
            ring_sector_width_deg: DEFAULT_RING_SECTOR_WIDTH_DEG,
            ring_sample_tolerance_px: DEFAULT_RING_SAMPLE_TOLERANCE_PX,
            ring_propagation_speed_kmh: DEFAULT_RING_PROPAGATION_SPEED_KMH,
            ring_decay_rate_per_km: DEFAULT_RING_DECAY_RATE_PER_KM,
            ring_min_active_energy: DEFAULT_RING_MIN_ACTIVE_ENERGY,
            spot_energy_cap: DEFAULT_SPOT_ENERGY_CAP,
            spot_energy_smoothing_alpha: DEFAULT_SPOT_ENERGY_SMOOTHING_ALPHA,
        }
    }
}

impl SimConfig {
    /// Simulated seconds per wall-clock second
    pub fn base_time_acceleration(&self) -> f64 {
        self.base_time_acceleration
    }

    /// Full angular width of the sector a ring's energy is concentrated in
    pub fn ring_sector_width_deg(&self) -> f64 {
        self.ring_sector_width_deg
    }

    /// Pixel band (on a 1000px-wide canvas) around a ring counted as reaching a spot
    pub fn ring_sample_tolerance_px(&self) -> f64 {
        self.ring_sample_tolerance_px
    }

    /// Base ring propagation speed before the power scaling
    pub fn ring_propagation_speed_kmh(&self) -> f64 {
        self.ring_propagation_speed_kmh
    }

    /// Decay coefficient copied into each new ring
    pub fn ring_decay_rate_per_km(&self) -> f64 {
        self.ring_decay_rate_per_km
    }

    /// Energy below which a ring is retired
    pub fn ring_min_active_energy(&self) -> f64 {
        self.ring_min_active_energy
    }

    /// Cap on the summed energy at one spot
    pub fn spot_energy_cap(&self) -> f64 {
        self.spot_energy_cap
    }

    /// EMA weight of the newest sample (0 = frozen, 1 = raw)
    pub fn spot_energy_smoothing_alpha(&self) -> f64 {
        self.spot_energy_smoothing_alpha
    }

    /// Set the time acceleration
    ///
    /// # Errors
    /// Rejects non-finite or non-positive values.
    pub fn set_base_time_acceleration(&mut self, value: f64) -> Result<(), ConfigError> {
        self.base_time_acceleration = validate_positive("base_time_acceleration", value)?;
        Ok(())
    }

    /// Set the ring sector width
    ///
    /// # Errors
    /// Rejects values outside [10, 360].
    pub fn set_ring_sector_width_deg(&mut self, value: f64) -> Result<(), ConfigError> {
        self.ring_sector_width_deg = validate_range(
            "ring_sector_width_deg",
            value,
            SECTOR_WIDTH_RANGE,
            "between 10 and 360 degrees",
        )?;
        Ok(())
    }

    /// Set the sampling tolerance
    ///
    /// # Errors
    /// Rejects values outside [5, 200].
    pub fn set_ring_sample_tolerance_px(&mut self, value: f64) -> Result<(), ConfigError> {
        self.ring_sample_tolerance_px = validate_range(
            "ring_sample_tolerance_px",
            value,
            SAMPLE_TOLERANCE_RANGE,
            "between 5 and 200 pixels",
        )?;
        Ok(())
    }

    /// Set the base propagation speed
    ///
    /// # Errors
    /// Rejects non-finite or non-positive values.
    pub fn set_ring_propagation_speed_kmh(&mut self, value: f64) -> Result<(), ConfigError> {
        self.ring_propagation_speed_kmh = validate_positive("ring_propagation_speed_kmh", value)?;
        Ok(())
    }

    /// Set the decay rate for rings emitted from now on
    ///
    /// # Errors
    /// Rejects non-finite or non-positive values.
    pub fn set_ring_decay_rate_per_km(&mut self, value: f64) -> Result<(), ConfigError> {
        self.ring_decay_rate_per_km = validate_positive("ring_decay_rate_per_km", value)?;
        Ok(())
    }

    /// Set the retirement energy threshold
    ///
    /// # Errors
    /// Rejects non-finite or non-positive values.
    pub fn set_ring_min_active_energy(&mut self, value: f64) -> Result<(), ConfigError> {
        self.ring_min_active_energy = validate_positive("ring_min_active_energy", value)?;
        Ok(())
    }

    /// Set the per-spot energy cap
    ///
    /// # Errors
    /// Rejects non-finite or non-positive values.
    pub fn set_spot_energy_cap(&mut self, value: f64) -> Result<(), ConfigError> {
        self.spot_energy_cap = validate_positive("spot_energy_cap", value)?;
        Ok(())
    }

    /// Set the smoothing factor
    ///
    /// # Errors
    /// Rejects values outside [0, 1].
    pub fn set_spot_energy_smoothing_alpha(&mut self, value: f64) -> Result<(), ConfigError> {
        self.spot_energy_smoothing_alpha = validate_range(
            "spot_energy_smoothing_alpha",
            value,
            SMOOTHING_RANGE,
            "between 0 and 1",
        )?;
        Ok(())
    }

    /// Restore every field to its default
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Build a config from a JSON document
    ///
    /// Unknown keys are ignored. Missing fields, fields that are not numbers
    /// and fields that fail validation fall back to their defaults; each
    /// rejected field is logged.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] when the document is not a JSON object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let file: SimConfigFile =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(Self::from_file(&file))
    }

    /// Serialize to pretty-printed JSON
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(file: &SimConfigFile) -> Self {
        let mut config = Self::default();
        apply_field(file.base_time_acceleration.as_ref(), |v| {
            config.set_base_time_acceleration(v)
        });
        apply_field(file.ring_sector_width_deg.as_ref(), |v| {
            config.set_ring_sector_width_deg(v)
        });
        apply_field(file.ring_sample_tolerance_px.as_ref(), |v| {
            config.set_ring_sample_tolerance_px(v)
        });
        apply_field(file.ring_propagation_speed_kmh.as_ref(), |v| {
            config.set_ring_propagation_speed_kmh(v)
        });
        apply_field(file.ring_decay_rate_per_km.as_ref(), |v| {
            config.set_ring_decay_rate_per_km(v)
        });
        apply_field(file.ring_min_active_energy.as_ref(), |v| {
            config.set_ring_min_active_energy(v)
        });
        apply_field(file.spot_energy_cap.as_ref(), |v| config.set_spot_energy_cap(v));
        apply_field(file.spot_energy_smoothing_alpha.as_ref(), |v| {
            config.set_spot_energy_smoothing_alpha(v)
        });
        config
    }
}

fn apply_field(
    raw: Option<&serde_json::Value>,
    mut set: impl FnMut(f64) -> Result<(), ConfigError>,
) {
    let Some(raw) = raw else {
        return;
    };
    match raw.as_f64() {
        Some(value) => {
            if let Err(e) = set(value) {
                warn!("Ignoring stored config value: {e}");
            }
        }
        None => warn!("Ignoring non-numeric stored config value: {raw}"),
    }
}

/// Lenient on-disk shape of [`SimConfig`]
///
/// Accepts both `snake_case` keys and the `camelCase` keys used by older settings files.
#[derive(Debug, Default, Deserialize)]
struct SimConfigFile {
    #[serde(default, alias = "baseTimeAcceleration")]
    base_time_acceleration: Option<serde_json::Value>,
    #[serde(default, alias = "ringSectorWidthDeg")]
    ring_sector_width_deg: Option<serde_json::Value>,
    #[serde(default, alias = "ringSampleTolerancePx")]
    ring_sample_tolerance_px: Option<serde_json::Value>,
    #[serde(default, alias = "ringPropagationSpeedKmH")]
    ring_propagation_speed_kmh: Option<serde_json::Value>,
    #[serde(default, alias = "ringDecayRatePerKm")]
    ring_decay_rate_per_km: Option<serde_json::Value>,
    #[serde(default, alias = "ringMinActiveEnergy")]
    ring_min_active_energy: Option<serde_json::Value>,
    #[serde(default, alias = "spotEnergyCap")]
    spot_energy_cap: Option<serde_json::Value>,
    #[serde(default, alias = "spotEnergySmoothingAlpha")]
    spot_energy_smoothing_alpha: Option<serde_json::Value>,
}
