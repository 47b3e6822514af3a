//! Observation points (surf spots)

use super::storm::StormId;
use super::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compass arc of incoming swell directions a spot responds to
///
/// `min` to `max` clockwise; `min > max` means the window wraps through north
/// (e.g. 350° → 10°).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionWindow {
    pub min: f64,
    pub max: f64,
}

impl DirectionWindow {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl fmt::Display for DirectionWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}°-{:.0}°", self.min, self.max)
    }
}

/// Qualitative surf size bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum SwellQuality {
    #[default]
    Flat,
    Fun,
    Solid,
    Xl,
}

impl SwellQuality {
    /// Human-facing label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Flat => "Flat",
            Self::Fun => "Fun",
            Self::Solid => "Solid",
            Self::Xl => "XL",
        }
    }
}

impl fmt::Display for SwellQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Observation point on the coast
///
/// Geometry (`position`, `window`) is static. The remaining fields are
/// derived and rewritten by the simulation every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    pub id: String,
    pub name: String,
    pub position: Vec2,
    pub window: DirectionWindow,
    pub current_energy: f64,
    pub smoothed_energy: f64,
    pub quality: SwellQuality,
    pub top_contributor: Option<StormId>,
    pub top_contributor_name: Option<String>,
}

impl Spot {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        position: Vec2,
        window: DirectionWindow,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
            window,
            current_energy: 0.0,
            smoothed_energy: 0.0,
            quality: SwellQuality::Flat,
            top_contributor: None,
            top_contributor_name: None,
        }
    }

    /// Clear derived fields back to a flat reading
    pub fn reset_readings(&mut self) {
        self.current_energy = 0.0;
        self.smoothed_energy = 0.0;
        self.quality = SwellQuality::Flat;
        self.top_contributor = None;
        self.top_contributor_name = None;
    }
}
