//! Actor and session state
//!
//! Everything the simulation mutates lives here; the level is read-only.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::level::Level;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, waiting for the start input
    Title,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
}

/// What ended the actor's run in a hazard reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hazard {
    /// Dropped below the visible field
    FellOut,
    Cactus,
    Water,
}

/// Result of one simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TickOutcome {
    #[default]
    None,
    /// Actor touched a hazard and was returned to spawn
    HazardReset(Hazard),
    /// Actor reached the goal and was returned to spawn
    GoalReached,
}

/// Sprite selection for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Idle,
    Run(u8),
    Jump,
}

/// The player-controlled cat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Feet rest on a platform; recomputed by every collision pass
    pub grounded: bool,
    /// Run animation frame (0..RUN_FRAMES)
    pub frame: u8,
    /// Ticks spent on the current run frame
    pub frame_ticks: u8,
}

impl Actor {
    /// Create an actor at rest, one tile in size
    pub fn new(pos: Vec2, tile: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: Vec2::splat(tile),
            grounded: false,
            frame: 0,
            frame_ticks: 0,
        }
    }

    pub fn spawn(level: &Level) -> Self {
        Self::new(level.spawn_pos(), level.tile)
    }

    /// Return to spawn. Animation counters are left alone.
    pub fn respawn(&mut self, spawn: Vec2) {
        self.pos = spawn;
        self.vel = Vec2::ZERO;
        self.grounded = false;
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Y coordinate of the foot line
    #[inline]
    pub fn feet(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Advance the run cycle after a step
    pub fn animate(&mut self) {
        if !self.grounded {
            self.frame_ticks = 0;
        } else if self.vel.x.abs() > RUN_SPEED_THRESHOLD {
            self.frame_ticks = self.frame_ticks.saturating_add(1);
            if self.frame_ticks > RUN_FRAME_HOLD_TICKS {
                self.frame = (self.frame + 1) % RUN_FRAMES;
                self.frame_ticks = 0;
            }
        } else {
            self.frame = 0;
        }
    }

    pub fn pose(&self) -> Pose {
        if !self.grounded {
            Pose::Jump
        } else if self.vel.x.abs() > RUN_SPEED_THRESHOLD {
            Pose::Run(self.frame)
        } else {
            Pose::Idle
        }
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub actor: Actor,
    pub phase: GamePhase,
    /// Seconds left on the countdown
    pub time_left: u32,
    /// Simulation tick counter (Playing ticks only)
    pub time_ticks: u64,
    /// Times the goal was reached this run
    pub clears: u32,
    /// Times a hazard sent the actor back to spawn this run
    pub resets: u32,
}

impl GameState {
    /// New session on the title screen
    pub fn new(level: &Level) -> Self {
        Self {
            actor: Actor::spawn(level),
            phase: GamePhase::Title,
            time_left: TIME_LIMIT_SECS,
            time_ticks: 0,
            clears: 0,
            resets: 0,
        }
    }

    /// Begin a fresh run (start button)
    pub fn start(&mut self, level: &Level) {
        self.actor.respawn(level.spawn_pos());
        self.phase = GamePhase::Playing;
        self.time_left = TIME_LIMIT_SECS;
        self.time_ticks = 0;
        self.clears = 0;
        self.resets = 0;
        log::info!("Run started, {}s on the clock", self.time_left);
    }
}
