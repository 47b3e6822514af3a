//! Swell simulation integrating storms, rings and spots
//!
//! `SwellSimulation` owns all mutable state and runs one tick in a fixed
//! order:
//! 1. Clock: frame time → clamped simulated hours (only while playing)
//! 2. Storm kinematics: move every active storm along its heading
//! 3. Ring engine: advance and cull existing rings, emit new ones, trim capacity
//! 4. Energy cache: invalidate
//! 5. Spots: sample, smooth, classify, record the top contributor

pub mod clock;
pub mod rings;
pub mod storms;
pub mod time_step;

pub use clock::{SimClock, MIN_SPEED_MULTIPLIER};
pub use rings::RingEngine;
pub use storms::{is_over_land, StormRegistry, StormUpdate, MAX_STORM_NAME_CHARS};
pub use time_step::{compute_clamped_delta_hours, MAX_DELTA_HOURS};

use crate::config::SimConfig;
use crate::core_types::units::Hours;
use crate::core_types::{CanvasSize, Ring, Spot};
use crate::physics::{
    apply_ema, classify_height, compute_storm_delta_units, sample_spot_energy, CacheStats,
    EnergyCache, SampleDebug,
};
use crate::presets::{self, Scenario};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Summary of one tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TickReport {
    /// Clock time after the tick
    pub hours: Hours,
    /// Simulated time this tick covered
    pub delta_hours: Hours,
    pub emitted: usize,
    pub culled: usize,
    pub evicted: usize,
    pub active_rings: usize,
    /// Cache lookups made during this tick's sampling
    pub cache: CacheStats,
}

/// Swell propagation simulation
pub struct SwellSimulation {
    config: SimConfig,
    clock: SimClock,
    storms: StormRegistry,
    rings: RingEngine,
    cache: EnergyCache,
    spots: Vec<Spot>,
    active_scenario: Option<&'static str>,
}

impl SwellSimulation {
    /// Create a simulation over the default North Shore spots
    #[must_use]
    pub fn new(config: SimConfig) -> Self {
        Self::with_spots(config, presets::default_spots())
    }

    /// Create a simulation over a custom spot set
    #[must_use]
    pub fn with_spots(config: SimConfig, spots: Vec<Spot>) -> Self {
        info!(
            "Creating swell simulation: {} spots, ring ceiling {}, time acceleration {}x",
            spots.len(),
            crate::physics::MAX_ACTIVE_RINGS,
            config.base_time_acceleration()
        );
        Self {
            config,
            clock: SimClock::new(),
            storms: StormRegistry::new(),
            rings: RingEngine::default(),
            cache: EnergyCache::new(),
            spots,
            active_scenario: None,
        }
    }

    // ========================================================================
    // SCENARIO & RESET
    // ========================================================================

    /// Replace storms with a preset, clear rings and pause at its start hour
    ///
    /// # Returns
    /// The loaded scenario, or `None` (state untouched) for an unknown id
    pub fn load_scenario(&mut self, id: &str) -> Option<&'static Scenario> {
        let Some(scenario) = presets::scenario(id) else {
            warn!("Unknown scenario '{}', keeping current state", id);
            return None;
        };

        let start = Hours::new(scenario.initial_hours);
        self.storms.replace_storms(scenario.storms);
        self.rings.clear();
        self.rings.rewind(start);
        self.cache.invalidate();
        self.clock.pause();
        self.clock.set_hours(start);
        for spot in &mut self.spots {
            spot.reset_readings();
        }
        self.active_scenario = Some(scenario.id);

        info!(
            "Loaded scenario '{}' ({} storms) at t={:.1}h",
            scenario.name,
            self.storms.len(),
            scenario.initial_hours
        );
        Some(scenario)
    }

    /// Back to hour 0, paused, with no rings
    ///
    /// Storms stay where they are but forget their emission history, so they
    /// all emit again on the first tick.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.rings.clear();
        self.rings.rewind(Hours::ZERO);
        self.storms.clear_emission_history();
        self.cache.invalidate();
        for spot in &mut self.spots {
            spot.reset_readings();
        }
        info!("Simulation reset");
    }

    // ========================================================================
    // TICK
    // ========================================================================

    /// Run one rendered frame
    ///
    /// While paused nothing changes and an empty report is returned.
    /// Otherwise `delta_ms × multiplier` is converted to simulated hours,
    /// capped at [`MAX_DELTA_HOURS`], and applied through [`Self::step_hours`].
    ///
    /// # Arguments
    /// * `delta_ms` - Wall-clock time since the previous frame
    /// * `canvas` - Pixel size the map is drawn at
    pub fn advance_frame(&mut self, delta_ms: f64, canvas: CanvasSize) -> TickReport {
        if !self.clock.is_playing() {
            return self.idle_report();
        }

        let delta_hours = compute_clamped_delta_hours(
            delta_ms * self.clock.multiplier(),
            self.config.base_time_acceleration(),
            MAX_DELTA_HOURS,
        );
        self.step_hours(delta_hours, canvas)
    }

    /// Advance by a given simulated duration regardless of play state
    ///
    /// Negative or non-finite durations count as zero; the tick still runs so
    /// storms due to emit will emit and spots are resampled.
    pub fn step_hours(&mut self, delta_hours: Hours, canvas: CanvasSize) -> TickReport {
        let dt = if delta_hours.is_finite() {
            Hours::new((*delta_hours).max(0.0))
        } else {
            Hours::ZERO
        };
        let now = self.clock.hours() + dt;
        self.clock.set_hours(now);

        self.move_storms(dt);

        let culled = self.rings.advance(now, &self.config);
        let emitted = self.rings.emit(&mut self.storms, now, &self.config);
        let evicted = self.rings.enforce_capacity();

        self.cache.invalidate();
        let before = self.cache.stats();
        self.update_spots(canvas);
        let after = self.cache.stats();

        let report = TickReport {
            hours: now,
            delta_hours: dt,
            emitted,
            culled,
            evicted,
            active_rings: self.rings.len(),
            cache: CacheStats {
                hits: after.hits - before.hits,
                misses: after.misses - before.misses,
            },
        };

        debug!(
            "Tick: t={:.2}h, dt={:.3}h, rings={} (+{} -{} evicted {}), cache hit rate {:.2}",
            *report.hours,
            *report.delta_hours,
            report.active_rings,
            report.emitted,
            report.culled,
            report.evicted,
            report.cache.hit_rate()
        );
        report
    }

    fn idle_report(&self) -> TickReport {
        TickReport {
            hours: self.clock.hours(),
            active_rings: self.rings.len(),
            ..TickReport::default()
        }
    }

    /// Storm kinematics; positions stay inside the map
    fn move_storms(&mut self, dt: Hours) {
        if *dt <= 0.0 {
            return;
        }
        for storm in self.storms.as_mut_slice().iter_mut().filter(|storm| storm.active) {
            let delta = compute_storm_delta_units(storm.speed_units, storm.heading, dt);
            let next = storm.position + delta.to_vec();
            storm.position.x = next.x.clamp(0.0, 1.0);
            storm.position.y = next.y.clamp(0.0, 1.0);
        }
    }

    fn update_spots(&mut self, canvas: CanvasSize) {
        let alpha = self.config.spot_energy_smoothing_alpha();
        for spot in &mut self.spots {
            let mut debug = SampleDebug::default();
            let energy = sample_spot_energy(
                spot,
                self.rings.rings(),
                canvas,
                &self.config,
                &mut self.cache,
                Some(&mut debug),
            );

            spot.current_energy = energy;
            spot.smoothed_energy = apply_ema(spot.smoothed_energy, energy, alpha);
            spot.quality = classify_height(spot.smoothed_energy);
            spot.top_contributor = debug.top_storm;
            // Orphaned rings keep their storm id but the name is gone
            spot.top_contributor_name = debug
                .top_storm
                .and_then(|id| self.storms.get(id))
                .map(|storm| storm.name.clone());
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Mutable config; changes apply from the next tick and never to rings
    /// already in flight
    pub fn config_mut(&mut self) -> &mut SimConfig {
        &mut self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut SimClock {
        &mut self.clock
    }

    pub fn storms(&self) -> &StormRegistry {
        &self.storms
    }

    /// Storm edits; removing a storm leaves its rings propagating
    pub fn storms_mut(&mut self) -> &mut StormRegistry {
        &mut self.storms
    }

    pub fn rings(&self) -> &[Ring] {
        self.rings.rings()
    }

    pub fn spots(&self) -> &[Spot] {
        &self.spots
    }

    pub fn spot(&self, id: &str) -> Option<&Spot> {
        self.spots.iter().find(|spot| spot.id == id)
    }

    /// Lifetime cache counters
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn reset_cache_stats(&mut self) {
        self.cache.reset_stats();
    }

    /// Id of the last scenario loaded, if any
    pub fn active_scenario(&self) -> Option<&'static str> {
        self.active_scenario
    }
}

impl Default for SwellSimulation {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{SwellQuality, Vec2};
    use approx::assert_relative_eq;

    const CANVAS: CanvasSize = CanvasSize::new(1000.0, 600.0);

    #[test]
    fn test_paused_frame_changes_nothing() {
        let mut sim = SwellSimulation::default();
        sim.storms_mut().add_storm_at(Vec2::new(0.3, 0.3));

        let report = sim.advance_frame(16.0, CANVAS);
        assert_eq!(report.emitted, 0);
        assert_eq!(report.delta_hours, Hours::ZERO);
        assert!(sim.rings().is_empty());
        assert_eq!(sim.clock().hours(), Hours::ZERO);
    }

    #[test]
    fn test_first_tick_emits_at_radius_zero() {
        let mut sim = SwellSimulation::default();
        sim.storms_mut().add_storm_at(Vec2::new(0.3, 0.3));
        sim.clock_mut().play();

        let report = sim.advance_frame(16.0, CANVAS);
        assert_eq!(report.emitted, 1);
        assert_eq!(report.active_rings, 1);
        assert_eq!(*sim.rings()[0].radius(), 0.0);
    }

    #[test]
    fn test_frame_time_is_clamped() {
        let mut sim = SwellSimulation::default();
        sim.clock_mut().play();
        sim.clock_mut().set_multiplier(10.0);

        let report = sim.advance_frame(60_000.0, CANVAS);
        assert_eq!(*report.delta_hours, MAX_DELTA_HOURS);
        assert_eq!(*sim.clock().hours(), MAX_DELTA_HOURS);
    }

    #[test]
    fn test_multiplier_scales_frame_time() {
        let mut sim = SwellSimulation::default();
        sim.clock_mut().play();
        sim.clock_mut().set_multiplier(2.0);

        // 500 ms at 3600× is half an hour, doubled
        let report = sim.advance_frame(500.0, CANVAS);
        assert_relative_eq!(*report.delta_hours, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_storms_move_and_stay_on_map() {
        let mut sim = SwellSimulation::default();
        let id = sim.storms_mut().add_storm_at(Vec2::new(0.95, 0.3));
        sim.storms_mut().update_storm(
            id,
            StormUpdate {
                heading_deg: Some(0.0),
                speed_units: Some(10.0),
                ..StormUpdate::default()
            },
        );

        sim.step_hours(Hours::new(6.0), CANVAS);
        let position = sim.storms().get(id).map(|s| s.position);
        assert_eq!(position.map(|p| p.x), Some(1.0));
        assert_eq!(position.map(|p| p.y), Some(0.3));
    }

    #[test]
    fn test_removed_storm_rings_keep_propagating() {
        let mut sim = SwellSimulation::default();
        let id = sim.storms_mut().add_storm_at(Vec2::new(0.3, 0.3));
        sim.step_hours(Hours::ZERO, CANVAS);
        assert_eq!(sim.rings().len(), 1);

        sim.storms_mut().remove_storm(id);
        sim.step_hours(Hours::new(2.0), CANVAS);
        assert_eq!(sim.rings().len(), 1);
        assert_eq!(sim.rings()[0].storm_id, id);
        assert!(*sim.rings()[0].radius() > 0.0);
    }

    #[test]
    fn test_load_scenario_pauses_and_clears() {
        let mut sim = SwellSimulation::default();
        sim.storms_mut().add_storm_at(Vec2::new(0.3, 0.3));
        sim.clock_mut().play();
        sim.advance_frame(16.0, CANVAS);
        assert!(!sim.rings().is_empty());

        let loaded = sim.load_scenario("aleutian-low").map(|s| s.id);
        assert_eq!(loaded, Some("aleutian-low"));
        assert!(sim.rings().is_empty());
        assert!(!sim.clock().is_playing());
        assert_eq!(*sim.clock().hours(), 12.0);
        assert_eq!(sim.storms().len(), 2);
        assert_eq!(sim.active_scenario(), Some("aleutian-low"));

        // The baseline moved with the clock: first ring starts at radius 0
        sim.step_hours(Hours::ZERO, CANVAS);
        assert!(sim.rings().iter().all(|r| *r.radius() == 0.0));
    }

    #[test]
    fn test_unknown_scenario_keeps_state() {
        let mut sim = SwellSimulation::default();
        sim.storms_mut().add_storm_at(Vec2::new(0.3, 0.3));
        assert!(sim.load_scenario("nope").is_none());
        assert_eq!(sim.storms().len(), 1);
        assert_eq!(sim.active_scenario(), None);
    }

    #[test]
    fn test_reset_clears_rings_and_history() {
        let mut sim = SwellSimulation::default();
        sim.storms_mut().add_storm_at(Vec2::new(0.3, 0.3));
        sim.step_hours(Hours::new(1.0), CANVAS);
        sim.step_hours(Hours::new(1.0), CANVAS);

        sim.reset();
        assert!(sim.rings().is_empty());
        assert_eq!(sim.clock().hours(), Hours::ZERO);
        assert!(sim.storms().iter().all(|s| s.last_emission.is_none()));

        let report = sim.step_hours(Hours::ZERO, CANVAS);
        assert_eq!(report.emitted, 1);
    }

    #[test]
    fn test_spot_records_top_contributor() {
        // Stationary storm just up-screen of the spot, heading down at it
        let spot = Spot::new(
            "target",
            "Target",
            Vec2::new(0.5, 0.6),
            crate::core_types::DirectionWindow::new(350.0, 10.0),
        );
        let mut sim = SwellSimulation::with_spots(SimConfig::default(), vec![spot]);
        let id = sim.storms_mut().add_storm_at(Vec2::new(0.5, 0.5));
        sim.storms_mut().update_storm(
            id,
            StormUpdate {
                heading_deg: Some(180.0),
                speed_units: Some(0.0),
                power: Some(10.0),
                name: Some("Pusher".to_string()),
                ..StormUpdate::default()
            },
        );
        sim.config_mut()
            .set_spot_energy_smoothing_alpha(1.0)
            .expect("alpha in range");

        let canvas = CanvasSize::new(1000.0, 1000.0);
        sim.step_hours(Hours::ZERO, canvas);
        // 0.1 map units = 600 km; a power-10 ring runs at 84 km/h
        sim.step_hours(Hours::new(600.0 / 84.0), canvas);

        let spot = &sim.spots()[0];
        assert!(spot.current_energy > 0.0);
        assert_eq!(spot.smoothed_energy, spot.current_energy);
        assert_eq!(spot.top_contributor, Some(id));
        assert_eq!(spot.top_contributor_name.as_deref(), Some("Pusher"));
        assert_eq!(spot.quality, classify_height(spot.smoothed_energy));

        // Orphaned contributor keeps its id but loses its name
        sim.storms_mut().remove_storm(id);
        sim.step_hours(Hours::ZERO, canvas);
        let spot = &sim.spots()[0];
        assert_eq!(spot.top_contributor, Some(id));
        assert_eq!(spot.top_contributor_name, None);
        assert_ne!(spot.quality, SwellQuality::Flat);
    }

    #[test]
    fn test_cache_counts_hits_per_tick() {
        let mut sim = SwellSimulation::default();
        for x in [0.2, 0.3, 0.4] {
            sim.storms_mut().add_storm_at(Vec2::new(x, 0.3));
        }
        sim.step_hours(Hours::ZERO, CANVAS);
        let report = sim.step_hours(Hours::new(1.0), CANVAS);
        // No wavefront is near a spot yet, so nothing reaches the cache
        assert_eq!(report.active_rings, 3);
        assert_eq!(report.cache, CacheStats::default());
        assert_eq!(sim.cache_stats().misses, 0);
    }
}
