//! Ring engine state
//!
//! Owns every ring in flight. Per tick the orchestrator calls, in order:
//! [`RingEngine::advance`] (grow and cull existing rings),
//! [`RingEngine::emit`] (new rings at radius 0) and
//! [`RingEngine::enforce_capacity`].

use super::storms::StormRegistry;
use crate::config::SimConfig;
use crate::core_types::units::Hours;
use crate::core_types::Ring;
use crate::physics::{advance_ring, create_ring, enforce_ring_capacity, should_emit_ring};
use tracing::debug;

/// Ring list plus emission bookkeeping
#[derive(Debug, Clone)]
pub struct RingEngine {
    rings: Vec<Ring>,
    next_sequence: u64,
    last_update_hours: Hours,
    max_rings: usize,
}

impl Default for RingEngine {
    fn default() -> Self {
        Self::new(crate::physics::MAX_ACTIVE_RINGS)
    }
}

impl RingEngine {
    pub fn new(max_rings: usize) -> Self {
        Self {
            rings: Vec::new(),
            next_sequence: 0,
            last_update_hours: Hours::ZERO,
            max_rings,
        }
    }

    /// Grow every ring by the time since the last update and drop retired ones
    ///
    /// Going backwards in time grows nothing; the baseline still moves to `now`.
    ///
    /// # Returns
    /// Number of rings culled
    pub fn advance(&mut self, now: Hours, config: &SimConfig) -> usize {
        let elapsed = Hours::new((*now - *self.last_update_hours).max(0.0));
        self.last_update_hours = now;

        let min_energy = config.ring_min_active_energy();
        for ring in &mut self.rings {
            advance_ring(ring, elapsed, min_energy);
        }

        let before = self.rings.len();
        self.rings.retain(Ring::is_active);
        before - self.rings.len()
    }

    /// Emit a ring from every storm that is due
    ///
    /// Writes `last_emission = now` back into each emitting storm. New rings
    /// start at radius 0 and are not advanced this tick.
    ///
    /// # Returns
    /// Number of rings emitted
    pub fn emit(&mut self, storms: &mut StormRegistry, now: Hours, config: &SimConfig) -> usize {
        let mut emitted = 0;
        for storm in storms.as_mut_slice() {
            if !should_emit_ring(storm, now) {
                continue;
            }
            let ring = create_ring(storm, now, self.next_sequence, config);
            self.next_sequence += 1;
            debug!(
                "{} emitted ring {} at t={:.2}h (E0={:.2}, {})",
                storm.id, ring.id, *now, ring.base_energy, ring.propagation_speed
            );
            storm.last_emission = Some(now);
            self.rings.push(ring);
            emitted += 1;
        }
        emitted
    }

    /// Evict the weakest rings above the capacity ceiling
    ///
    /// # Returns
    /// Number of rings evicted
    pub fn enforce_capacity(&mut self) -> usize {
        enforce_ring_capacity(&mut self.rings, self.max_rings)
    }

    /// Drop every ring; the sequence counter keeps counting
    pub fn clear(&mut self) {
        self.rings.clear();
    }

    /// Move the update baseline without advancing any ring
    pub fn rewind(&mut self, hours: Hours) {
        self.last_update_hours = hours;
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn last_update_hours(&self) -> Hours {
        self.last_update_hours
    }

    pub fn max_rings(&self) -> usize {
        self.max_rings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Vec2;
    use approx::assert_relative_eq;

    fn registry_with_storm() -> StormRegistry {
        let mut registry = StormRegistry::new();
        registry.add_storm_at(Vec2::new(0.3, 0.3));
        registry
    }

    #[test]
    fn test_emit_respects_interval() {
        let config = SimConfig::default();
        let mut storms = registry_with_storm();
        let mut engine = RingEngine::default();

        assert_eq!(engine.emit(&mut storms, Hours::ZERO, &config), 1);
        assert_eq!(engine.emit(&mut storms, Hours::new(2.0), &config), 0);
        assert_eq!(engine.emit(&mut storms, Hours::new(3.0), &config), 1);
        assert_eq!(engine.len(), 2);
        assert_eq!(
            storms.iter().next().and_then(|s| s.last_emission),
            Some(Hours::new(3.0))
        );
    }

    #[test]
    fn test_sequences_are_unique_across_clear() {
        let config = SimConfig::default();
        let mut storms = registry_with_storm();
        let mut engine = RingEngine::default();

        engine.emit(&mut storms, Hours::ZERO, &config);
        let first = engine.rings()[0].id;
        engine.clear();
        storms.clear_emission_history();
        engine.emit(&mut storms, Hours::ZERO, &config);
        assert_ne!(engine.rings()[0].id, first);
    }

    #[test]
    fn test_advance_uses_elapsed_since_last_update() {
        let config = SimConfig::default();
        let mut storms = registry_with_storm();
        let mut engine = RingEngine::default();
        engine.emit(&mut storms, Hours::ZERO, &config);
        let speed = *engine.rings()[0].propagation_speed;

        engine.advance(Hours::new(2.0), &config);
        engine.advance(Hours::new(5.0), &config);
        assert_relative_eq!(*engine.rings()[0].radius(), speed * 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_advance_backwards_grows_nothing() {
        let config = SimConfig::default();
        let mut storms = registry_with_storm();
        let mut engine = RingEngine::default();
        engine.emit(&mut storms, Hours::ZERO, &config);
        engine.advance(Hours::new(4.0), &config);
        let radius = engine.rings()[0].radius();

        engine.advance(Hours::new(1.0), &config);
        assert_eq!(engine.rings()[0].radius(), radius);
        assert_eq!(engine.last_update_hours(), Hours::new(1.0));
    }

    #[test]
    fn test_advance_culls_retired_rings() {
        let config = SimConfig::default();
        let mut storms = registry_with_storm();
        let mut engine = RingEngine::default();
        engine.emit(&mut storms, Hours::ZERO, &config);

        // Far past the map edge
        let culled = engine.advance(Hours::new(500.0), &config);
        assert_eq!(culled, 1);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_rewind_moves_baseline_only() {
        let config = SimConfig::default();
        let mut storms = registry_with_storm();
        let mut engine = RingEngine::default();
        engine.emit(&mut storms, Hours::ZERO, &config);

        engine.rewind(Hours::new(10.0));
        engine.advance(Hours::new(10.0), &config);
        assert_eq!(*engine.rings()[0].radius(), 0.0);
    }

    #[test]
    fn test_capacity_ceiling() {
        let config = SimConfig::default();
        let mut storms = StormRegistry::new();
        for i in 0..5u32 {
            storms.add_storm_at(Vec2::new(0.1 + 0.05 * f64::from(i), 0.3));
        }
        let mut engine = RingEngine::new(3);
        engine.emit(&mut storms, Hours::ZERO, &config);
        assert_eq!(engine.len(), 5);
        assert_eq!(engine.enforce_capacity(), 2);
        assert_eq!(engine.len(), 3);
    }
}
