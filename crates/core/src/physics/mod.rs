//! Swell physics
//!
//! Pure functions over rings, storms and spots. Nothing here owns simulation
//! state; [`crate::simulation`] drives these per tick.

pub(crate) mod direction;
pub(crate) mod energy_cache;
pub(crate) mod sampling;
pub(crate) mod smoothing;
pub(crate) mod storm_motion;
pub(crate) mod swell;

pub use direction::{
    angular_difference, bearing_from_north, directional_falloff, directional_weight,
    normalize_degrees, WINDOW_FALLOFF_DEG,
};
pub use energy_cache::{CacheStats, EnergyCache};
pub use sampling::{
    classify_height, sample_spot_energy, SampleDebug, MIN_DIRECTIONAL_WEIGHT,
    MIN_SAMPLE_RADIUS_KM, MIN_SECTOR_HALF_WIDTH_DEG, QUALITY_THRESHOLDS,
    REFERENCE_CANVAS_WIDTH_PX, SECTOR_WEIGHT_EPSILON,
};
pub use smoothing::apply_ema;
pub use storm_motion::{compute_storm_delta_units, StormDelta, STORM_REF_SPEED_KMH};
pub use swell::{
    advance_ring, compute_ring_energy, create_ring, enforce_ring_capacity, should_emit_ring,
    BASE_ENERGY_MULTIPLIER, EMISSION_INTERVAL_HOURS, MAX_ACTIVE_RINGS, MAX_RADIUS_KM,
    REFERENCE_RADIUS_KM, REFERENCE_WIND_KTS,
};
