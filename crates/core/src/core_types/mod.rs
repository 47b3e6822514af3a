//! Core types and utilities

pub mod ring;
pub mod spot;
pub mod storm;
pub mod units;

pub use ring::{Ring, RingId};
pub use spot::{DirectionWindow, Spot, SwellQuality};
pub use storm::{Storm, StormId};
pub use units::*;

/// Position on the normalized map, both coordinates in [0, 1], y down
pub type Vec2 = nalgebra::Vector2<f64>;

/// Pixel dimensions of the surface the map is projected onto
///
/// Sampling tolerances are expressed in pixels, so the sampler needs the
/// canvas size to relate them to map distances.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions finite and strictly positive
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}
