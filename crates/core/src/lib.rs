//! Swell Simulation Core Library
//!
//! Storms on a normalized North Pacific map emit expanding swell rings.
//! Rings carry energy that decays with distance and is concentrated along the
//! storm's heading. Surf spots sample the rings passing over them, weight each
//! one by how well its arrival direction fits the spot's swell window, and
//! turn the smoothed total into a surf quality.
//!
//! ## Layout
//!
//! - [`physics`]: ring formulae, angular weighting, sampling, kinematics, smoothing
//! - [`simulation`]: clock, storm registry, ring engine and the per-tick orchestrator
//! - [`config`]: validated tunables
//! - [`presets`]: built-in scenarios and surf spots

// Core types and utilities
pub mod core_types;

pub mod config;
pub mod physics;
pub mod presets;
pub mod simulation;

// Re-export core types
pub use core_types::{
    CanvasSize, Degrees, DirectionWindow, Hours, Kilometers, KilometersPerHour, Knots, Ring,
    RingId, Spot, Storm, StormId, SwellQuality, Vec2,
};

pub use config::{ConfigError, SimConfig};
pub use presets::{default_spots, scenario, Scenario, StormPreset, SCENARIOS};
pub use simulation::{
    SimClock, StormRegistry, StormUpdate, SwellSimulation, TickReport, MAX_DELTA_HOURS,
};
