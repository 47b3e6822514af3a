//! Simulation clock

use crate::core_types::units::Hours;
use serde::{Deserialize, Serialize};

/// Smallest accepted speed multiplier
pub const MIN_SPEED_MULTIPLIER: f64 = 0.1;

/// Simulated time with play/pause and a user speed multiplier
///
/// The clock starts paused at hour 0 with a multiplier of 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimClock {
    hours: Hours,
    playing: bool,
    multiplier: f64,
}

impl Default for SimClock {
    fn default() -> Self {
        Self {
            hours: Hours::ZERO,
            playing: false,
            multiplier: 1.0,
        }
    }
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hours(&self) -> Hours {
        self.hours
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Move time forward by `delta × multiplier` while playing
    ///
    /// # Returns
    /// Simulated hours actually applied (0 when paused or for invalid input)
    pub fn advance(&mut self, delta: Hours) -> Hours {
        if !self.playing || !delta.is_finite() || *delta <= 0.0 {
            return Hours::ZERO;
        }
        let applied = delta * self.multiplier;
        self.hours += applied;
        applied
    }

    /// Set the speed multiplier, clamped to at least [`MIN_SPEED_MULTIPLIER`]
    ///
    /// Non-finite values are ignored.
    pub fn set_multiplier(&mut self, multiplier: f64) {
        if multiplier.is_finite() {
            self.multiplier = multiplier.max(MIN_SPEED_MULTIPLIER);
        }
    }

    /// Jump to an absolute hour; negative or non-finite values are ignored
    pub fn set_hours(&mut self, hours: Hours) {
        if hours.is_finite() && *hours >= 0.0 {
            self.hours = hours;
        }
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Flip play/pause, returning the new state
    pub fn toggle_play(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    /// Back to hour 0, paused; the multiplier is kept
    pub fn reset(&mut self) {
        self.hours = Hours::ZERO;
        self.playing = false;
    }
}
