//! Per-tick memo of ring energies
//!
//! Every spot samples every ring, so the same `exp()` would otherwise be
//! evaluated spots × rings times per tick. The cache is a side table keyed by
//! [`RingId`]; rings themselves carry no transient state.
//!
//! Lifecycle per tick: [`EnergyCache::invalidate`] once after the rings have
//! moved, then [`EnergyCache::energy`] lazily fills entries on first read.
//! Hit/miss counters survive invalidation and are cleared separately with
//! [`EnergyCache::reset_stats`].

use super::swell::compute_ring_energy;
use crate::core_types::{Ring, RingId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Hit/miss counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups served from the cache, 0 when there were none
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Ring energy memo scoped to one simulation tick
#[derive(Debug, Default)]
pub struct EnergyCache {
    values: FxHashMap<RingId, f64>,
    stats: CacheStats,
}

impl EnergyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every cached value; counters are kept
    pub fn invalidate(&mut self) {
        self.values.clear();
    }

    /// Energy of `ring`, computed on the first read after invalidation
    pub fn energy(&mut self, ring: &Ring) -> f64 {
        if let Some(&energy) = self.values.get(&ring.id) {
            self.stats.hits += 1;
            return energy;
        }
        self.stats.misses += 1;
        let energy = compute_ring_energy(ring);
        self.values.insert(ring.id, energy);
        energy
    }

    /// Current counters
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Zero the counters without touching cached values
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// Number of rings with a cached value
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::core_types::units::{Hours, Kilometers};
    use crate::core_types::{Storm, StormId, Vec2};
    use crate::physics::create_ring;

    fn ring(sequence: u64) -> Ring {
        let storm = Storm::new(StormId(3), "Cache", Vec2::new(0.5, 0.5));
        create_ring(&storm, Hours::ZERO, sequence, &SimConfig::default())
    }

    #[test]
    fn test_first_read_misses_then_hits() {
        let mut cache = EnergyCache::new();
        let ring = ring(0);

        let first = cache.energy(&ring);
        assert_eq!(cache.stats(), CacheStats { hits: 0, misses: 1 });

        for expected_hits in 1..=5 {
            let again = cache.energy(&ring);
            assert_eq!(again.to_bits(), first.to_bits());
            assert_eq!(cache.stats().hits, expected_hits);
            assert_eq!(cache.stats().misses, 1);
        }
    }

    #[test]
    fn test_cached_value_is_stale_until_invalidated() {
        let mut cache = EnergyCache::new();
        let mut ring = ring(0);
        let before = cache.energy(&ring);

        ring.expand_to(Kilometers::new(1000.0));
        assert_eq!(cache.energy(&ring), before);

        cache.invalidate();
        assert!(cache.is_empty());
        let after = cache.energy(&ring);
        assert!(after < before);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_rings_are_keyed_by_identity() {
        let mut cache = EnergyCache::new();
        cache.energy(&ring(0));
        cache.energy(&ring(1));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_reset_stats_keeps_values() {
        let mut cache = EnergyCache::new();
        let ring = ring(0);
        cache.energy(&ring);
        cache.energy(&ring);
        cache.reset_stats();
        assert_eq!(cache.stats(), CacheStats::default());
        assert_eq!(cache.len(), 1);

        cache.energy(&ring);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 0 });
    }

    #[test]
    fn test_hit_rate() {
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
        assert_eq!(CacheStats { hits: 3, misses: 1 }.hit_rate(), 0.75);
    }
}
