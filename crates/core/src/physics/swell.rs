//! Ring emission, propagation and decay
//!
//! # Model
//!
//! A storm emits a ring every [`EMISSION_INTERVAL_HOURS`]. The ring expands
//! at a speed fixed at emission and its energy decays exponentially with the
//! distance travelled:
//!
//! ```text
//! speed  = base_speed × (0.4 + power / 10)
//! E0     = power × 2 × clamp(wind / 40 kt, 0.5, 3) × clamp(radius / 400 km, 0.5, 2)
//! E(r)   = E0 × exp(−decay × r)
//! ```
//!
//! The speed factor keeps rings between 0.4× and 1.4× of the configured base
//! speed across the [0, 10] power scale. The wind and size factors are
//! clamped so outlier storms cannot produce degenerate rings.
//!
//! A ring retires once its radius passes [`MAX_RADIUS_KM`] or its energy
//! drops below the configured minimum, whichever comes first.

use crate::config::SimConfig;
use crate::core_types::storm::{finite_or, MAX_STORM_POWER};
use crate::core_types::units::{Hours, Kilometers, KilometersPerHour};
use crate::core_types::{Ring, RingId, Storm};
use tracing::warn;

/// Simulated hours between consecutive rings from one storm
pub const EMISSION_INTERVAL_HOURS: f64 = 3.0;
/// Radius at which a ring leaves the map; also the km length of one map unit
pub const MAX_RADIUS_KM: f64 = 6000.0;
/// Hard ceiling on rings alive at once
pub const MAX_ACTIVE_RINGS: usize = 1000;
/// Energy per unit of storm power before wind and size scaling
pub const BASE_ENERGY_MULTIPLIER: f64 = 2.0;
/// Wind speed giving a wind factor of 1
pub const REFERENCE_WIND_KTS: f64 = 40.0;
/// Storm radius giving a size factor of 1
pub const REFERENCE_RADIUS_KM: f64 = 400.0;

const SPEED_FACTOR_FLOOR: f64 = 0.4;
const WIND_FACTOR_RANGE: (f64, f64) = (0.5, 3.0);
const SIZE_FACTOR_RANGE: (f64, f64) = (0.5, 2.0);

/// Build a new ring at the storm's current position and heading
///
/// The storm is sanitized first, so non-finite fields cannot leak into the
/// ring. `decay_rate` is copied from `config`; later config changes do not
/// affect rings already in flight.
///
/// # Arguments
/// * `storm` - Emitting storm
/// * `current_hours` - Clock time of emission
/// * `sequence` - Emission sequence number, unique per engine
/// * `config` - Current simulation config
pub fn create_ring(
    storm: &Storm,
    current_hours: Hours,
    sequence: u64,
    config: &SimConfig,
) -> Ring {
    let storm = storm.sanitized();
    let power = storm.power;

    let speed_factor = SPEED_FACTOR_FLOOR + power / MAX_STORM_POWER;
    let propagation_speed = config.ring_propagation_speed_kmh() * speed_factor;

    let wind_factor =
        (*storm.wind / REFERENCE_WIND_KTS).clamp(WIND_FACTOR_RANGE.0, WIND_FACTOR_RANGE.1);
    let size_factor =
        (*storm.radius / REFERENCE_RADIUS_KM).clamp(SIZE_FACTOR_RANGE.0, SIZE_FACTOR_RANGE.1);
    let base_energy = power * BASE_ENERGY_MULTIPLIER * wind_factor * size_factor;

    Ring {
        id: RingId {
            storm: storm.id,
            sequence,
        },
        storm_id: storm.id,
        emitted_at: Hours::new(finite_or(*current_hours, 0.0)),
        origin: storm.position,
        heading: storm.heading,
        radius: Kilometers::ZERO,
        propagation_speed: KilometersPerHour::new(propagation_speed),
        base_energy,
        decay_rate: config.ring_decay_rate_per_km(),
        active: true,
    }
}

/// Whether `storm` is due to emit at `current_hours`
///
/// Inactive storms never emit. An active storm with no recorded emission
/// emits immediately; otherwise it waits [`EMISSION_INTERVAL_HOURS`].
pub fn should_emit_ring(storm: &Storm, current_hours: Hours) -> bool {
    if !storm.active {
        return false;
    }
    match storm.last_emission {
        None => true,
        Some(last) => *current_hours - *last >= EMISSION_INTERVAL_HOURS,
    }
}

/// Energy carried by the ring at its current radius
///
/// `base_energy × exp(−decay_rate × radius)`; never negative.
pub fn compute_ring_energy(ring: &Ring) -> f64 {
    let decay = (-ring.decay_rate * *ring.radius).exp();
    (ring.base_energy * decay).max(0.0)
}

/// Grow a ring by `dt_hours` and retire it if it has run its course
///
/// Negative or non-finite `dt_hours` is treated as zero, so the radius never
/// shrinks. Inactive rings are left untouched.
///
/// # Returns
/// The ring's energy after the step
pub fn advance_ring(ring: &mut Ring, dt_hours: Hours, min_active_energy: f64) -> f64 {
    if !ring.active {
        return compute_ring_energy(ring);
    }

    let dt = Hours::new(finite_or(*dt_hours, 0.0).max(0.0));
    let step = ring.propagation_speed * dt;
    if step.is_finite() && *step > 0.0 {
        ring.radius += step;
    }

    let energy = compute_ring_energy(ring);
    if *ring.radius > MAX_RADIUS_KM || energy < min_active_energy {
        ring.active = false;
    }
    energy
}

/// Evict the weakest rings until at most `max_rings` remain
///
/// Rings are ordered by current energy, strongest first, then truncated.
/// Ties keep emission order.
///
/// # Returns
/// Number of rings evicted
pub fn enforce_ring_capacity(rings: &mut Vec<Ring>, max_rings: usize) -> usize {
    if rings.len() <= max_rings {
        return 0;
    }

    let mut ranked: Vec<(f64, Ring)> = rings
        .drain(..)
        .map(|ring| (compute_ring_energy(&ring), ring))
        .collect();
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

    let evicted = ranked.len() - max_rings;
    ranked.truncate(max_rings);
    rings.extend(ranked.into_iter().map(|(_, ring)| ring));

    warn!(
        "Ring capacity exceeded: evicted {} weakest rings, {} remain",
        evicted,
        rings.len()
    );
    evicted
}
