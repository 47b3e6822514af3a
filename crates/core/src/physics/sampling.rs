//! Spot energy sampling and surf classification
//!
//! A ring contributes to a spot when its wavefront lies within a pixel
//! tolerance band of the spot. The contribution is the ring's energy scaled
//! by two angular weights:
//!
//! 1. **Sector weight** - Gaussian falloff of the ring→spot bearing around
//!    the ring's heading (energy is concentrated where the storm was going)
//! 2. **Preferred weight** - how well the incoming direction (bearing + 180°)
//!    fits the spot's swell window, floored at [`MIN_DIRECTIONAL_WEIGHT`]
//!
//! # Resolution independence
//!
//! Distance, ring radius and tolerance are all scaled by the canvas
//! dimensions: distances by width/height, the tolerance by
//! `width / REFERENCE_CANVAS_WIDTH_PX`. Uniformly scaling the canvas
//! therefore scales both sides of the "reached" comparison by the same
//! factor and leaves the sampled energy unchanged.

use super::direction::{bearing_from_north, directional_falloff, directional_weight};
use super::energy_cache::EnergyCache;
use super::swell::MAX_RADIUS_KM;
use crate::config::SimConfig;
use crate::core_types::{CanvasSize, Ring, RingId, Spot, StormId, SwellQuality};

/// Rings younger than this radius are not sampled (near-origin artifacts)
pub const MIN_SAMPLE_RADIUS_KM: f64 = 50.0;
/// Floor on the preferred-direction weight once a ring is in sector and band
pub const MIN_DIRECTIONAL_WEIGHT: f64 = 0.15;
/// Floor on the half-width of a ring's energy sector
pub const MIN_SECTOR_HALF_WIDTH_DEG: f64 = 10.0;
/// Sector weights below this are treated as zero and the ring is skipped
pub const SECTOR_WEIGHT_EPSILON: f64 = 1e-4;
/// Canvas width the configured pixel tolerance is defined against
pub const REFERENCE_CANVAS_WIDTH_PX: f64 = 1000.0;

/// Lower bounds (inclusive) of the Fun, Solid and XL buckets
pub const QUALITY_THRESHOLDS: [f64; 3] = [1.0, 2.5, 4.0];

/// Attribution of the single largest contribution to a sample
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SampleDebug {
    pub top_ring: Option<RingId>,
    pub top_storm: Option<StormId>,
    pub top_contribution: f64,
    /// Rings that passed the radius, band and sector checks
    pub contributing_rings: usize,
}

impl SampleDebug {
    fn record(&mut self, ring: &Ring, contribution: f64) {
        self.contributing_rings += 1;
        if self.top_ring.is_none() || contribution > self.top_contribution {
            self.top_ring = Some(ring.id);
            self.top_storm = Some(ring.storm_id);
            self.top_contribution = contribution;
        }
    }
}

/// Total swell energy reaching `spot`, capped at the configured maximum
///
/// # Arguments
/// * `spot` - Observation point (only position and window are read)
/// * `rings` - Current ring set; inactive rings are skipped
/// * `canvas` - Pixel size the map is projected onto
/// * `config` - Sector width, tolerance and cap
/// * `cache` - This tick's energy cache
/// * `debug` - Receives the top contributor when provided
///
/// # Returns
/// Energy in [0, `spot_energy_cap`]; 0 for an invalid canvas
pub fn sample_spot_energy(
    spot: &Spot,
    rings: &[Ring],
    canvas: CanvasSize,
    config: &SimConfig,
    cache: &mut EnergyCache,
    mut debug: Option<&mut SampleDebug>,
) -> f64 {
    if !canvas.is_valid() {
        return 0.0;
    }

    let tolerance_px =
        config.ring_sample_tolerance_px() * canvas.width / REFERENCE_CANVAS_WIDTH_PX;
    let sector_half_width = (config.ring_sector_width_deg() / 2.0).max(MIN_SECTOR_HALF_WIDTH_DEG);

    let mut total = 0.0;
    for ring in rings {
        if !ring.is_active() || *ring.radius() < MIN_SAMPLE_RADIUS_KM {
            continue;
        }

        let dx_px = (spot.position.x - ring.origin.x) * canvas.width;
        let dy_px = (spot.position.y - ring.origin.y) * canvas.height;
        let distance_px = dx_px.hypot(dy_px);
        let radius_px = *ring.radius() / MAX_RADIUS_KM * canvas.width;
        if (distance_px - radius_px).abs() > tolerance_px {
            continue;
        }

        let bearing = bearing_from_north(dx_px, dy_px);
        let sector_weight = directional_falloff(bearing, *ring.heading, sector_half_width);
        if sector_weight < SECTOR_WEIGHT_EPSILON {
            continue;
        }

        let incoming = (bearing + 180.0) % 360.0;
        let preferred_weight = directional_weight(incoming, spot.window.min, spot.window.max)
            .max(MIN_DIRECTIONAL_WEIGHT);

        let contribution = cache.energy(ring) * sector_weight * preferred_weight;
        total += contribution;

        if let Some(debug) = debug.as_deref_mut() {
            debug.record(ring, contribution);
        }
    }

    total.min(config.spot_energy_cap())
}

/// Bucket an energy value into a surf quality
///
/// Lower bounds are inclusive: exactly 1.0 is Fun, exactly 2.5 is Solid,
/// exactly 4.0 is XL. Non-finite energy reads as Flat.
pub fn classify_height(energy: f64) -> SwellQuality {
    let [fun, solid, xl] = QUALITY_THRESHOLDS;
    if !energy.is_finite() || energy < fun {
        SwellQuality::Flat
    } else if energy < solid {
        SwellQuality::Fun
    } else if energy < xl {
        SwellQuality::Solid
    } else {
        SwellQuality::Xl
    }
}
