//! Application configuration
//!
//! Loaded from a TOML file when one is given; every field has a default so
//! a missing file (or a partial one) runs the stock setup: 10 Hz control,
//! the built-in goal rectangle, and a small walled world.

use serde::{Deserialize, Serialize};
use std::path::Path;
use zigzag::prelude::*;

/// Axis-aligned wall slab in the world frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Wall {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }
}

/// Simulated environment parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub start_x: f64,
    pub start_y: f64,
    /// Initial heading, degrees
    pub start_heading: f64,
    pub robot_radius: f64,
    /// Scanner field of view, degrees, centered on the heading
    pub scan_fov: f64,
    pub range_max: f64,
    pub walls: Vec<Wall>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_x: 0.0,
            start_y: 0.0,
            start_heading: 0.0,
            robot_radius: 0.2,
            scan_fov: 57.0,
            range_max: 10.0,
            walls: default_walls(),
        }
    }
}

/// A bounded world with one partition to wander around
fn default_walls() -> Vec<Wall> {
    vec![
        // Outer boundary
        Wall::new(-6.75, -6.5, -11.75, 1.75),  // west
        Wall::new(1.5, 1.75, -11.75, 1.75),    // east
        Wall::new(-6.75, 1.75, -11.75, -11.5), // south
        Wall::new(-6.75, 1.75, 1.5, 1.75),     // north
        // Interior partition
        Wall::new(-2.5, -2.25, -11.5, -4.0),
    ]
}

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WanderConfig {
    /// Control loop rate, Hz
    pub rate_hz: f64,
    /// RNG seed for the turn decisions; None draws from entropy
    pub seed: Option<u64>,
    pub goal: GoalRegion,
    pub policy: WanderPolicy,
    pub sim: SimConfig,
}

impl Default for WanderConfig {
    fn default() -> Self {
        Self {
            rate_hz: 10.0,
            seed: None,
            goal: GoalRegion::new(-4.75, -3.25, -9.75, -8.25),
            policy: WanderPolicy::default(),
            sim: SimConfig::default(),
        }
    }
}

impl WanderConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> ZigzagResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| ZigzagError::Config(format!("{}: {}", path.display(), e)))
    }
}
