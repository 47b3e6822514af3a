//! Swell rings
//!
//! A ring is an expanding circular wavefront emitted by a storm. After
//! emission it is independent of its storm: the `storm_id` back-reference is
//! informational and the ring keeps propagating if the storm is deleted.

use super::storm::StormId;
use super::units::{Degrees, Hours, Kilometers, KilometersPerHour};
use super::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a ring: its storm plus the engine's monotonic emission sequence
///
/// The sequence never repeats within an engine, so identities stay unique
/// even when the clock is reset and a storm emits at the same hour again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RingId {
    pub storm: StormId,
    pub sequence: u64,
}

impl fmt::Display for RingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.storm, self.sequence)
    }
}

/// Expanding swell wavefront
///
/// `propagation_speed`, `base_energy` and `decay_rate` are fixed at creation.
/// `radius` only grows; once `active` is false the ring is never advanced again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub id: RingId,
    pub storm_id: StormId,
    pub emitted_at: Hours,
    pub origin: Vec2,
    pub heading: Degrees,
    pub(crate) radius: Kilometers,
    pub propagation_speed: KilometersPerHour,
    pub base_energy: f64,
    /// Exponential decay coefficient per kilometre travelled
    pub decay_rate: f64,
    pub(crate) active: bool,
}

impl Ring {
    /// Current radius
    pub fn radius(&self) -> Kilometers {
        self.radius
    }

    /// Whether the ring is still propagating
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Place the wavefront at `radius` without running the decay checks.
    ///
    /// Only moves outward; a smaller radius is ignored.
    pub fn expand_to(&mut self, radius: Kilometers) {
        if radius.is_finite() && radius > self.radius {
            self.radius = radius;
        }
    }
}
