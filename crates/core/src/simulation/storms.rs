//! Storm registry
//!
//! Holds the storms on the map and applies user edits. Every edit goes
//! through validation here; the physics additionally sanitizes every storm it
//! reads.

use crate::core_types::storm::{finite_or, MAX_STORM_POWER};
use crate::core_types::units::{Degrees, Knots};
use crate::core_types::{Storm, StormId, Vec2};
use crate::presets::StormPreset;
use tracing::debug;

/// Longest accepted storm name, in characters
pub const MAX_STORM_NAME_CHARS: usize = 40;

/// Whether a map position is land where storms may not sit
///
/// Two exclusion zones: a box around the Hawaiian islands and a strip along
/// the top edge of the map.
pub fn is_over_land(x: f64, y: f64) -> bool {
    let near_islands = x > 0.65 && x < 0.85 && y > 0.65 && y < 0.9;
    let far_north = y < 0.05;
    near_islands || far_north
}

/// Partial edit of a storm; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StormUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub heading_deg: Option<f64>,
    pub speed_units: Option<f64>,
    pub power: Option<f64>,
    pub wind_kts: Option<f64>,
    pub name: Option<String>,
}

/// Ordered collection of storms with stable ids
#[derive(Debug, Clone)]
pub struct StormRegistry {
    storms: Vec<Storm>,
    next_id: u32,
    /// Numbering for default "Storm N" names
    name_counter: u32,
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Clamp to the map and move land positions to the map centre
fn placeable_position(x: f64, y: f64) -> Vec2 {
    let x = clamp_unit(finite_or(x, 0.5));
    let y = clamp_unit(finite_or(y, 0.5));
    if is_over_land(x, y) {
        Vec2::new(0.5, 0.5)
    } else {
        Vec2::new(x, y)
    }
}

impl Default for StormRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StormRegistry {
    pub fn new() -> Self {
        Self {
            storms: Vec::new(),
            next_id: 1,
            name_counter: 1,
        }
    }

    fn allocate_id(&mut self) -> StormId {
        let id = StormId(self.next_id);
        self.next_id += 1;
        id
    }

    fn default_name(&mut self) -> String {
        let name = format!("Storm {}", self.name_counter);
        self.name_counter += 1;
        name
    }

    /// Place a new storm with default parameters
    ///
    /// The position is clamped to the map; a position over land moves the
    /// storm to the map centre instead.
    pub fn add_storm_at(&mut self, position: Vec2) -> StormId {
        let id = self.allocate_id();
        let name = self.default_name();
        let storm = Storm::new(id, name, placeable_position(position.x, position.y));
        debug!(
            "Placed {} '{}' at ({:.3}, {:.3})",
            id, storm.name, storm.position.x, storm.position.y
        );
        self.storms.push(storm);
        id
    }

    /// Apply a partial edit
    ///
    /// Position is applied as a whole and only when the resulting point is
    /// not over land. Non-finite numbers are ignored, power is clamped to
    /// [0, 10], speed and wind to ≥ 0 and the heading is wrapped. A blank
    /// name is ignored and long names are cut to [`MAX_STORM_NAME_CHARS`].
    ///
    /// # Returns
    /// `false` if no storm has `id`
    pub fn update_storm(&mut self, id: StormId, update: StormUpdate) -> bool {
        let Some(storm) = self.storms.iter_mut().find(|storm| storm.id == id) else {
            return false;
        };

        let x = update.x.filter(|v| v.is_finite());
        let y = update.y.filter(|v| v.is_finite());
        if x.is_some() || y.is_some() {
            let next_x = x.map_or(storm.position.x, clamp_unit);
            let next_y = y.map_or(storm.position.y, clamp_unit);
            if is_over_land(next_x, next_y) {
                debug!("Ignored move of {} onto land at ({:.3}, {:.3})", id, next_x, next_y);
            } else {
                storm.position = Vec2::new(next_x, next_y);
            }
        }

        if let Some(heading) = update.heading_deg.filter(|v| v.is_finite()) {
            storm.heading = Degrees::new(heading).normalized();
        }
        if let Some(speed) = update.speed_units.filter(|v| v.is_finite()) {
            storm.speed_units = speed.max(0.0);
        }
        if let Some(power) = update.power.filter(|v| v.is_finite()) {
            storm.power = power.clamp(0.0, MAX_STORM_POWER);
        }
        if let Some(wind) = update.wind_kts.filter(|v| v.is_finite()) {
            storm.wind = Knots::new(wind.max(0.0));
        }
        if let Some(name) = update.name {
            let trimmed = name.trim();
            if !trimmed.is_empty() {
                storm.name = trimmed.chars().take(MAX_STORM_NAME_CHARS).collect();
            }
        }
        true
    }

    /// Remove a storm; its rings are not touched
    ///
    /// # Returns
    /// The removed storm, if it existed
    pub fn remove_storm(&mut self, id: StormId) -> Option<Storm> {
        let index = self.storms.iter().position(|storm| storm.id == id)?;
        Some(self.storms.remove(index))
    }

    /// Replace every storm with a scenario's presets
    ///
    /// Preset positions go through the same placement rules as hand-placed
    /// storms. Default names continue numbering after the preset count.
    pub fn replace_storms(&mut self, presets: &[StormPreset]) {
        self.storms.clear();
        for preset in presets {
            let id = self.allocate_id();
            let mut storm = Storm::new(id, preset.name, placeable_position(preset.x, preset.y));
            storm.heading = Degrees::new(finite_or(preset.heading_deg, storm.heading.value()))
                .normalized();
            storm.speed_units = finite_or(preset.speed_units, storm.speed_units).max(0.0);
            storm.power = finite_or(preset.power, storm.power).clamp(0.0, MAX_STORM_POWER);
            storm.wind = Knots::new(finite_or(preset.wind_kts, *storm.wind).max(0.0));
            self.storms.push(storm);
        }
        self.name_counter = u32::try_from(presets.len()).unwrap_or(u32::MAX - 1) + 1;
    }

    /// Remove every storm
    pub fn clear(&mut self) {
        self.storms.clear();
        self.name_counter = 1;
    }

    /// Forget every storm's last emission so all emit on the next tick
    pub fn clear_emission_history(&mut self) {
        for storm in &mut self.storms {
            storm.last_emission = None;
        }
    }

    pub fn get(&self, id: StormId) -> Option<&Storm> {
        self.storms.iter().find(|storm| storm.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Storm> {
        self.storms.iter()
    }

    /// Direct access for the tick (kinematics and emission bookkeeping)
    pub(crate) fn as_mut_slice(&mut self) -> &mut [Storm] {
        &mut self.storms
    }

    pub fn as_slice(&self) -> &[Storm] {
        &self.storms
    }

    pub fn len(&self) -> usize {
        self.storms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storms.is_empty()
    }
}

impl<'a> IntoIterator for &'a StormRegistry {
    type Item = &'a Storm;
    type IntoIter = std::slice::Iter<'a, Storm>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
