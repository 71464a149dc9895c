//! Field configuration
//!
//! The browser component always runs with `FieldConfig::default()`. The
//! native demo can override values from a JSON file.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::BackdropError;

/// RGBA color, channel values as in CSS `rgba()`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Alpha (0.0 - 1.0)
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// White at the given alpha
    pub const fn white(a: f32) -> Self {
        Self::new(255, 255, 255, a)
    }

    /// CSS color string, e.g. `rgba(255, 255, 255, 0.6)`
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Stroke style for an edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Rgba,
    pub width: f32,
}

impl LineStyle {
    pub const fn new(color: Rgba, width: f32) -> Self {
        Self { color, width }
    }
}

/// Particle field settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Particles per seeded population
    pub count: usize,
    /// Velocity scale (components land in `[-speed/2, speed/2]`)
    pub speed: f32,
    /// Smallest particle radius
    pub min_size: f32,
    /// Largest particle radius
    pub max_size: f32,
    /// Particle-to-particle edge threshold (exclusive)
    pub max_distance: f32,
    /// Particle fill
    pub particle_color: Rgba,
    /// Particle-to-particle edges
    pub line: LineStyle,
    /// Particle-to-pointer edges
    pub pointer_line: LineStyle,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            speed: PARTICLE_SPEED,
            min_size: PARTICLE_MIN_SIZE,
            max_size: PARTICLE_MAX_SIZE,
            max_distance: MAX_DISTANCE,
            particle_color: Rgba::white(PARTICLE_ALPHA),
            line: LineStyle::new(Rgba::white(LINE_ALPHA), LINE_WIDTH),
            pointer_line: LineStyle::new(Rgba::white(POINTER_LINE_ALPHA), POINTER_LINE_WIDTH),
        }
    }
}

impl FieldConfig {
    /// Particle-to-pointer edge threshold (exclusive)
    #[inline]
    pub fn pointer_distance(&self) -> f32 {
        self.max_distance / 2.0
    }

    /// Parse a config, missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, BackdropError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, BackdropError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded field config from {}", path.display());
        Ok(config)
    }
}
