//! End-to-end tests of the simulation tick over the built-in scenarios

use swell_sim_core::physics::{classify_height, MAX_ACTIVE_RINGS};
use swell_sim_core::simulation::{is_over_land, MAX_DELTA_HOURS};
use swell_sim_core::{
    CanvasSize, Hours, SimConfig, StormUpdate, SwellQuality, SwellSimulation, Vec2, SCENARIOS,
};

const CANVAS: CanvasSize = CanvasSize::new(1280.0, 720.0);

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("swell_sim_core=debug")
        .try_init();
}

/// Step `hours` of simulated time in `step`-hour ticks
fn run(sim: &mut SwellSimulation, hours: f64, step: f64) {
    let ticks = (hours / step).round() as usize;
    for _ in 0..ticks {
        sim.step_hours(Hours::new(step), CANVAS);
    }
}

#[test]
fn test_every_scenario_loads_paused_at_its_start_hour() {
    init_logging();
    let mut sim = SwellSimulation::default();
    for scenario in SCENARIOS {
        sim.clock_mut().play();
        let loaded = sim.load_scenario(scenario.id).map(|s| s.id);
        assert_eq!(loaded, Some(scenario.id));
        assert!(!sim.clock().is_playing());
        assert_eq!(*sim.clock().hours(), scenario.initial_hours);
        assert!(sim.rings().is_empty());
        assert_eq!(sim.storms().len(), scenario.storms.len());
        assert!(sim
            .storms()
            .iter()
            .all(|s| !is_over_land(s.position.x, s.position.y)));
    }
}

#[test]
fn test_historic_major_builds_north_shore_swell() {
    init_logging();
    let mut sim = SwellSimulation::default();
    sim.load_scenario("historic-major");
    run(&mut sim, 72.0, 0.5);

    assert!(!sim.rings().is_empty());
    let peak = sim
        .spots()
        .iter()
        .map(|spot| spot.smoothed_energy)
        .fold(0.0, f64::max);
    assert!(peak > 0.0, "no swell reached any spot");

    for spot in sim.spots() {
        assert!(spot.current_energy >= 0.0);
        assert!(spot.current_energy <= sim.config().spot_energy_cap());
        assert_eq!(spot.quality, classify_height(spot.smoothed_energy));
    }
}

#[test]
fn test_emission_cadence() {
    init_logging();
    let mut sim = SwellSimulation::default();
    sim.storms_mut().add_storm_at(Vec2::new(0.2, 0.3));

    let mut emitted = 0;
    for _ in 0..12 {
        emitted += sim.step_hours(Hours::new(1.0), CANVAS).emitted;
    }
    // Hours 1, 4, 7 and 10
    assert_eq!(emitted, 4);
}

#[test]
fn test_ring_count_stays_under_ceiling() {
    init_logging();
    let mut config = SimConfig::default();
    // Near-lossless rings that outlive the emission cadence
    config.set_ring_decay_rate_per_km(1e-6).expect("decay in range");
    config.set_ring_propagation_speed_kmh(1.0).expect("speed in range");
    let mut sim = SwellSimulation::new(config);
    for i in 0..40u32 {
        let x = 0.05 + 0.02 * f64::from(i);
        sim.storms_mut().add_storm_at(Vec2::new(x.min(0.6), 0.2 + 0.01 * f64::from(i)));
    }

    let mut evicted = 0;
    for _ in 0..40 {
        let report = sim.step_hours(Hours::new(3.0), CANVAS);
        assert!(report.active_rings <= MAX_ACTIVE_RINGS);
        evicted += report.evicted;
    }
    assert!(evicted > 0);
    assert_eq!(sim.rings().len(), MAX_ACTIVE_RINGS);
}

#[test]
fn test_frames_respect_play_state_and_delta_ceiling() {
    init_logging();
    let mut sim = SwellSimulation::default();
    sim.load_scenario("central-west");

    let paused = sim.advance_frame(1000.0, CANVAS);
    assert_eq!(paused.delta_hours, Hours::ZERO);
    assert_eq!(*sim.clock().hours(), 6.0);

    sim.clock_mut().play();
    let stalled = sim.advance_frame(3_600_000.0, CANVAS);
    assert_eq!(*stalled.delta_hours, MAX_DELTA_HOURS);
    assert_eq!(*sim.clock().hours(), 6.0 + MAX_DELTA_HOURS);
}

#[test]
fn test_storm_edits_flow_into_new_rings_only() {
    init_logging();
    let mut sim = SwellSimulation::default();
    let id = sim.storms_mut().add_storm_at(Vec2::new(0.3, 0.3));
    sim.step_hours(Hours::ZERO, CANVAS);
    let first_energy = sim.rings()[0].base_energy;

    sim.storms_mut().update_storm(
        id,
        StormUpdate {
            power: Some(9.0),
            ..StormUpdate::default()
        },
    );
    sim.config_mut()
        .set_ring_decay_rate_per_km(0.002)
        .expect("decay in range");
    sim.step_hours(Hours::new(3.0), CANVAS);

    let rings = sim.rings();
    assert_eq!(rings.len(), 2);
    assert_eq!(rings[0].base_energy, first_energy);
    assert_eq!(rings[0].decay_rate, 0.001);
    assert!(rings[1].base_energy > first_energy);
    assert_eq!(rings[1].decay_rate, 0.002);
}

#[test]
fn test_reset_then_replay_is_deterministic() {
    init_logging();
    let mut sim = SwellSimulation::default();
    sim.load_scenario("aleutian-low");
    run(&mut sim, 48.0, 1.0);
    let rings_before: Vec<f64> = sim.rings().iter().map(|r| *r.radius()).collect();

    let mut replay = SwellSimulation::default();
    replay.load_scenario("aleutian-low");
    run(&mut replay, 48.0, 1.0);
    let rings_after: Vec<f64> = replay.rings().iter().map(|r| *r.radius()).collect();
    assert_eq!(rings_before, rings_after);

    sim.reset();
    assert!(sim.rings().is_empty());
    assert!(sim
        .spots()
        .iter()
        .all(|s| s.quality == SwellQuality::Flat && s.smoothed_energy == 0.0));
}
