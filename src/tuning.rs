//! Physics tuning constants
//!
//! Units are pixels per tick (velocities) and pixels per tick² (accelerations).
//! Loaded alongside the level so each level can feel different.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Per-level movement and collision constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Added to vertical velocity every tick (no terminal velocity)
    pub gravity: f32,
    /// Horizontal acceleration while a direction is held
    pub accel: f32,
    /// Horizontal speed cap
    pub max_speed: f32,
    /// Fraction of horizontal velocity lost per tick with no input (0-1)
    pub friction: f32,
    /// Upward velocity applied by a jump
    pub jump_strength: f32,
    /// Landing tolerance between the feet and a platform top (pixels)
    pub edge_slack: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            accel: 0.4,
            max_speed: 4.0,
            friction: 0.15,
            jump_strength: 11.0,
            edge_slack: 4.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would make the simulation meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("gravity", self.gravity),
            ("accel", self.accel),
            ("max_speed", self.max_speed),
            ("friction", self.friction),
            ("jump_strength", self.jump_strength),
            ("edge_slack", self.edge_slack),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::invalid(name, "must be finite"));
            }
            if value < 0.0 {
                return Err(ConfigError::invalid(name, "must not be negative"));
            }
        }
        if self.max_speed == 0.0 {
            return Err(ConfigError::invalid("max_speed", "must be positive"));
        }
        if self.friction > 1.0 {
            return Err(ConfigError::invalid("friction", "must be within 0..=1"));
        }
        Ok(())
    }
}
