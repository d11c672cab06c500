//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame tick, no wall-clock time
//! - Seeded RNG only (demo pilot)
//! - Platforms resolved in level declaration order
//! - No rendering, input polling or platform dependencies

pub mod collision;
pub mod demo;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{find_hazard, resolve_x, resolve_y, touches_goal};
pub use demo::DemoPilot;
pub use rect::Rect;
pub use state::{Actor, GamePhase, GameState, Hazard, Pose, TickOutcome};
pub use tick::{Direction, TickInput, step, tick};
