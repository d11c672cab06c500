//! Cat Platformer - simulation core for a tile-based side-scroller
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, session state)
//! - `level`: Level geometry in tile units, built-in level table
//! - `tuning`: Data-driven physics constants
//! - `error`: Config/level loading errors

pub mod error;
pub mod level;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use level::{Level, TileRect};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second (one tick per animation frame)
    pub const SIM_HZ: u32 = 60;

    /// Tile edge length in pixels
    pub const TILE: f32 = 32.0;
    /// Visible play-field height in tiles
    pub const FIELD_ROWS: u32 = 17;

    /// Countdown at the start of a run (seconds)
    pub const TIME_LIMIT_SECS: u32 = 400;

    /// Horizontal speed below which friction snaps velocity to zero
    pub const VX_SNAP_EPSILON: f32 = 0.05;

    /// Run animation
    pub const RUN_FRAMES: u8 = 4;
    pub const RUN_FRAME_HOLD_TICKS: u8 = 6;
    /// Horizontal speed above which the actor counts as running
    pub const RUN_SPEED_THRESHOLD: f32 = 0.2;
}
