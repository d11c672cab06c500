//! Level geometry in tile units
//!
//! Every rectangle is stored as `[x, y, w, h]` in tiles and scaled to pixels
//! on demand. Declaration order is preserved: collision resolution walks
//! platforms in the order they appear here.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_ROWS, TILE};
use crate::error::ConfigError;
use crate::sim::Rect;
use crate::tuning::Tuning;

/// Rectangle in tile units, serialized as `[x, y, w, h]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct TileRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl TileRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Scale to pixel space
    pub fn to_pixels(self, tile: f32) -> Rect {
        Rect::new(
            self.x as f32 * tile,
            self.y as f32 * tile,
            self.w as f32 * tile,
            self.h as f32 * tile,
        )
    }
}

impl From<[i32; 4]> for TileRect {
    fn from([x, y, w, h]: [i32; 4]) -> Self {
        Self { x, y, w, h }
    }
}

impl From<TileRect> for [i32; 4] {
    fn from(r: TileRect) -> Self {
        [r.x, r.y, r.w, r.h]
    }
}

/// Static level description: geometry plus the physics it is played with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Level {
    /// Tile edge length in pixels
    pub tile: f32,
    /// Visible field height in tiles; falling below it counts as a hazard
    pub rows: u32,
    /// Actor spawn in tiles
    pub spawn: [i32; 2],
    /// Solid platforms, resolved in declaration order
    pub platforms: Vec<TileRect>,
    pub cactus: Vec<TileRect>,
    pub water: Vec<TileRect>,
    pub goal: TileRect,
    pub tuning: Tuning,
}

impl Default for Level {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Level {
    /// The hardcoded level shipped with the game
    pub fn builtin() -> Self {
        let r = TileRect::new;
        Self {
            tile: TILE,
            rows: FIELD_ROWS,
            spawn: [2, 10],
            platforms: vec![
                // Ground strips (rows 15-16)
                r(0, 15, 8, 2),
                r(12, 15, 14, 2),
                r(30, 15, 10, 2),
                r(44, 15, 16, 2),
                // Bricks
                r(3, 12, 2, 1),
                r(14, 11, 2, 1),
                r(31, 11, 2, 1),
                // Staircase up to the goal
                r(48, 12, 2, 1),
                r(51, 9, 2, 1),
                r(54, 6, 4, 1),
            ],
            cactus: vec![r(19, 14, 1, 1), r(36, 14, 1, 1)],
            water: vec![r(8, 15, 4, 2), r(26, 16, 4, 1), r(40, 16, 4, 1)],
            goal: r(54, 3, 3, 3),
            tuning: Tuning::default(),
        }
    }

    /// Parse a level from JSON; missing fields fall back to the built-in level
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let level: Self = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Load a level from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let level = Self::from_json(&json)?;
        log::info!(
            "Loaded level from {}: {} platforms, {} hazards",
            path.display(),
            level.platforms.len(),
            level.cactus.len() + level.water.len()
        );
        Ok(level)
    }

    /// Check scale and rectangle sizes.
    ///
    /// Geometry outside the visible field is allowed; it simply never matters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tile.is_finite() || self.tile <= 0.0 {
            return Err(ConfigError::invalid("tile", "must be a positive number"));
        }
        if self.rows == 0 {
            return Err(ConfigError::invalid("rows", "must be positive"));
        }
        let groups = [
            ("platforms", self.platforms.as_slice()),
            ("cactus", self.cactus.as_slice()),
            ("water", self.water.as_slice()),
            ("goal", std::slice::from_ref(&self.goal)),
        ];
        for (name, rects) in groups {
            if let Some(i) = rects.iter().position(|r| r.w <= 0 || r.h <= 0) {
                return Err(ConfigError::invalid(
                    format!("{name}[{i}]"),
                    "width and height must be positive",
                ));
            }
        }
        self.tuning.validate()
    }

    /// Spawn point in pixels
    pub fn spawn_pos(&self) -> Vec2 {
        Vec2::new(self.spawn[0] as f32, self.spawn[1] as f32) * self.tile
    }

    /// Height of the visible field in pixels
    pub fn field_height(&self) -> f32 {
        self.rows as f32 * self.tile
    }

    pub fn platform_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.platforms.iter().map(|r| r.to_pixels(self.tile))
    }

    pub fn cactus_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.cactus.iter().map(|r| r.to_pixels(self.tile))
    }

    pub fn water_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.water.iter().map(|r| r.to_pixels(self.tile))
    }

    pub fn goal_rect(&self) -> Rect {
        self.goal.to_pixels(self.tile)
    }
}
