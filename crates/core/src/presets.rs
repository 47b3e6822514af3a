//! Built-in scenarios and surf spots
//!
//! Scenarios are static storm layouts over the North Pacific map; the spots
//! are the North Shore breaks the simulation forecasts for.

use crate::core_types::{DirectionWindow, Spot, Vec2};
use serde::Serialize;

/// Storm definition inside a scenario
///
/// Fields not listed here (radius, active flag) take the same defaults as a
/// storm placed by hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StormPreset {
    pub key: &'static str,
    pub name: &'static str,
    pub x: f64,
    pub y: f64,
    pub heading_deg: f64,
    pub speed_units: f64,
    pub power: f64,
    pub wind_kts: f64,
}

impl StormPreset {
    /// Map position of the storm
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Named starting layout of storms and clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scenario {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Clock hour the scenario starts at
    pub initial_hours: f64,
    pub storms: &'static [StormPreset],
}

pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        id: "historic-major",
        name: "Historic Major NPAC Low",
        description: "Deep low northwest of Hawaiʻi tracking east, sending long-period WNW swell.",
        initial_hours: 0.0,
        storms: &[
            StormPreset {
                key: "historic-core",
                name: "Historic Core",
                x: 0.55,
                y: 0.45,
                heading_deg: 135.0,
                speed_units: 0.4,
                power: 8.5,
                wind_kts: 70.0,
            },
            StormPreset {
                key: "historic-secondary",
                name: "Secondary Fetch",
                x: 0.62,
                y: 0.3,
                heading_deg: 170.0,
                speed_units: 0.2,
                power: 6.5,
                wind_kts: 55.0,
            },
        ],
    },
    Scenario {
        id: "central-west",
        name: "Central Pacific West Swell",
        description: "Compact storm west of Hawaiʻi driving west-to-east swell trains.",
        initial_hours: 6.0,
        storms: &[
            StormPreset {
                key: "central-driver",
                name: "Central Driver",
                x: 0.6,
                y: 0.7,
                heading_deg: 100.0,
                speed_units: 0.5,
                power: 7.0,
                wind_kts: 60.0,
            },
            StormPreset {
                key: "equatorial-helper",
                name: "Equatorial Helper",
                x: 0.68,
                y: 0.78,
                heading_deg: 80.0,
                speed_units: 0.3,
                power: 5.5,
                wind_kts: 45.0,
            },
        ],
    },
    Scenario {
        id: "aleutian-low",
        name: "Aleutian Hyper Low",
        description: "Large radius storm along the Aleutians producing northerly pulses.",
        initial_hours: 12.0,
        storms: &[
            StormPreset {
                key: "aleutian-arc",
                name: "Aleutian Arc",
                x: 0.35,
                y: 0.18,
                heading_deg: 140.0,
                speed_units: 0.35,
                power: 9.0,
                wind_kts: 80.0,
            },
            StormPreset {
                key: "bering-helper",
                name: "Bering Helper",
                x: 0.4,
                y: 0.25,
                heading_deg: 160.0,
                speed_units: 0.25,
                power: 6.0,
                wind_kts: 50.0,
            },
        ],
    },
];

/// Look up a scenario by id
pub fn scenario(id: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|scenario| scenario.id == id)
}

/// The North Shore spot set with flat readings
pub fn default_spots() -> Vec<Spot> {
    vec![
        Spot::new(
            "sunset",
            "Sunset",
            Vec2::new(0.76, 0.82),
            DirectionWindow::new(300.0, 320.0),
        ),
        Spot::new(
            "pipeline",
            "Pipeline",
            Vec2::new(0.79, 0.86),
            DirectionWindow::new(305.0, 330.0),
        ),
        Spot::new(
            "waimea",
            "Waimea",
            Vec2::new(0.73, 0.79),
            DirectionWindow::new(320.0, 340.0),
        ),
        Spot::new(
            "haleiwa",
            "Haleʻiwa",
            Vec2::new(0.7, 0.88),
            DirectionWindow::new(285.0, 310.0),
        ),
    ]
}
