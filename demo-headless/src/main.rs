use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::error::Error;
use std::process::ExitCode;
use swell_sim_core::{
    CanvasSize, SimConfig, StormUpdate, SwellSimulation, TickReport, Vec2, SCENARIOS,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Swell propagation demo: runs a scenario frame by frame and prints spot forecasts
#[derive(Parser, Debug)]
#[command(name = "swell-sim-demo")]
#[command(about = "North Pacific swell propagation demo", long_about = None)]
struct Args {
    /// Scenario to load
    #[arg(short, long, default_value = "historic-major")]
    scenario: String,

    /// List the built-in scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Simulated hours to run
    #[arg(long, default_value_t = 72.0)]
    hours: f64,

    /// Wall-clock milliseconds per frame
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,

    /// Simulated seconds per wall-clock second (overrides the config file)
    #[arg(short, long)]
    acceleration: Option<f64>,

    /// Clock speed multiplier
    #[arg(short, long, default_value_t = 1.0)]
    multiplier: f64,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 1280.0)]
    canvas_width: f64,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 720.0)]
    canvas_height: f64,

    /// JSON config file
    #[arg(short, long)]
    config: Option<String>,

    /// Simulated hours between spot reports
    #[arg(short, long, default_value_t = 6.0)]
    report_interval: f64,

    /// Extra storms placed at random open-ocean positions
    #[arg(long, default_value_t = 0)]
    random_storms: u32,

    /// Seed for random storms (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final state as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if args.list_scenarios {
        list_scenarios();
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn list_scenarios() {
    println!("=== Scenarios ===\n");
    for scenario in SCENARIOS {
        println!("{:<16} {} (starts at {:.0}h)", scenario.id, scenario.name, scenario.initial_hours);
        println!("{:<16} {}", "", scenario.description);
        for storm in scenario.storms {
            println!(
                "{:<16}   - {}: ({:.2}, {:.2}) heading {:.0}°, power {:.1}, wind {:.0} kt",
                "", storm.name, storm.x, storm.y, storm.heading_deg, storm.power, storm.wind_kts
            );
        }
        println!();
    }
}

fn load_config(args: &Args) -> Result<SimConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read config '{path}': {e}"))?;
            SimConfig::from_json(&text)?
        }
        None => SimConfig::default(),
    };
    if let Some(acceleration) = args.acceleration {
        config.set_base_time_acceleration(acceleration)?;
    }
    Ok(config)
}

fn add_random_storms(sim: &mut SwellSimulation, count: u32, seed: Option<u64>) {
    if count == 0 {
        return;
    }
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    info!("Placing {} random storms (seed {})", count, seed);
    let mut rng = StdRng::seed_from_u64(seed);

    for _ in 0..count {
        // Western half of the map, clear of the islands and the north strip
        let position = Vec2::new(rng.random_range(0.05..0.6), rng.random_range(0.1..0.6));
        let id = sim.storms_mut().add_storm_at(position);
        sim.storms_mut().update_storm(
            id,
            StormUpdate {
                heading_deg: Some(rng.random_range(60.0..180.0)),
                speed_units: Some(rng.random_range(0.1..0.8)),
                power: Some(rng.random_range(4.0..10.0)),
                wind_kts: Some(rng.random_range(30.0..90.0)),
                ..StormUpdate::default()
            },
        );
    }
}

fn print_spot_header() {
    println!("  Hours | Rings | Spot        | Energy | Smoothed | Quality | Top storm");
    println!("--------|-------|-------------|--------|----------|---------|----------");
}

fn print_spots(sim: &SwellSimulation, report: &TickReport) {
    for spot in sim.spots() {
        println!(
            "{:7.1} | {:5} | {:<11} | {:6.2} | {:8.2} | {:<7} | {}",
            *report.hours,
            report.active_rings,
            spot.name,
            spot.current_energy,
            spot.smoothed_energy,
            spot.quality,
            spot.top_contributor_name.as_deref().unwrap_or("-")
        );
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    println!("=== Swell Simulation Demo ===\n");

    let canvas = CanvasSize::new(args.canvas_width, args.canvas_height);
    if !canvas.is_valid() {
        return Err(format!(
            "canvas must be positive, got {}x{}",
            args.canvas_width, args.canvas_height
        )
        .into());
    }

    let config = load_config(args)?;
    let mut sim = SwellSimulation::new(config);
    let scenario = sim
        .load_scenario(&args.scenario)
        .ok_or_else(|| format!("unknown scenario '{}'", args.scenario))?;
    println!("Scenario: {} ({})", scenario.name, scenario.id);
    println!("{}\n", scenario.description);

    add_random_storms(&mut sim, args.random_storms, args.seed);
    for storm in sim.storms().iter() {
        println!(
            "Storm {:<20} at ({:.2}, {:.2}) heading {}, power {:.1}, wind {}",
            storm.name, storm.position.x, storm.position.y, storm.heading, storm.power, storm.wind
        );
    }
    println!();

    sim.clock_mut().set_multiplier(args.multiplier);
    sim.clock_mut().play();

    let start = *sim.clock().hours();
    let end = start + args.hours.max(0.0);
    let mut next_report = start;
    let mut frames = 0u64;
    let mut emitted = 0usize;
    let mut evicted = 0usize;

    print_spot_header();
    // First frame emits every storm's opening ring
    let mut report = sim.advance_frame(0.0, canvas);
    emitted += report.emitted;

    while *sim.clock().hours() < end {
        report = sim.advance_frame(args.frame_ms, canvas);
        frames += 1;
        emitted += report.emitted;
        evicted += report.evicted;

        if *report.delta_hours <= 0.0 {
            warn!("Frame advanced no simulated time; check --frame-ms and --acceleration");
            break;
        }
        if *report.hours >= next_report {
            print_spots(&sim, &report);
            next_report += args.report_interval.max(f64::EPSILON);
        }
    }

    let stats = sim.cache_stats();
    println!("\n=== Simulation Complete ===");
    println!("Simulated: {:.1}h in {} frames", *sim.clock().hours() - start, frames);
    println!("Rings emitted: {}, evicted: {}, active: {}", emitted, evicted, sim.rings().len());
    println!(
        "Energy cache: {} hits, {} misses ({:.1}% hit rate)",
        stats.hits,
        stats.misses,
        stats.hit_rate() * 100.0
    );
    for spot in sim.spots() {
        println!("  {:<11} {:>5} ({:.2})", spot.name, spot.quality, spot.smoothed_energy);
    }

    if args.json {
        let summary = serde_json::json!({
            "scenario": scenario.id,
            "hours": sim.clock().hours(),
            "spots": sim.spots(),
            "cache": stats,
            "last_tick": report,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
