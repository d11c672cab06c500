//! Fixed-rate simulation tick
//!
//! `step` is the pure motion and collision step for one actor. `tick` wraps
//! it with session bookkeeping (phase, countdown, counters, animation).

use serde::{Deserialize, Serialize};

use super::collision::{find_hazard, resolve_x, resolve_y, touches_goal};
use super::state::{Actor, GamePhase, GameState, TickOutcome};
use crate::consts::*;
use crate::level::Level;

/// Horizontal input direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    None,
    Right,
}

impl Direction {
    /// Combine held keys; holding both cancels out
    pub fn from_held(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, false) => Direction::Left,
            (false, true) => Direction::Right,
            _ => Direction::None,
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::None => 0.0,
            Direction::Right => 1.0,
        }
    }
}

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub direction: Direction,
    /// Jump trigger; ignored unless the actor is grounded
    pub jump: bool,
    /// Start button on the title screen
    pub start: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance one actor by one tick against a static level
pub fn step(actor: &mut Actor, input: &TickInput, level: &Level) -> TickOutcome {
    let tuning = &level.tuning;

    // Horizontal input before gravity and integration
    match input.direction {
        Direction::None => {
            actor.vel.x *= 1.0 - tuning.friction;
            if actor.vel.x.abs() < VX_SNAP_EPSILON {
                actor.vel.x = 0.0;
            }
        }
        dir => {
            actor.vel.x = (actor.vel.x + dir.sign() * tuning.accel)
                .clamp(-tuning.max_speed, tuning.max_speed);
        }
    }

    if input.jump && actor.grounded {
        actor.vel.y = -tuning.jump_strength;
        actor.grounded = false;
    }

    actor.vel.y += tuning.gravity;

    actor.pos.x += actor.vel.x;
    resolve_x(actor, level.platform_rects());
    actor.pos.y += actor.vel.y;
    resolve_y(actor, level.platform_rects(), tuning.edge_slack);

    let spawn = level.spawn_pos();
    let mut outcome = TickOutcome::None;

    if let Some(hazard) = find_hazard(actor, level) {
        log::debug!("Hazard {:?} at ({:.1}, {:.1}), respawning", hazard, actor.pos.x, actor.pos.y);
        actor.respawn(spawn);
        outcome = TickOutcome::HazardReset(hazard);
    }

    if touches_goal(actor, level) {
        log::debug!("Goal reached at ({:.1}, {:.1})", actor.pos.x, actor.pos.y);
        actor.respawn(spawn);
        outcome = TickOutcome::GoalReached;
    }

    outcome
}

/// Advance the session by one tick
pub fn tick(state: &mut GameState, input: &TickInput, level: &Level) -> TickOutcome {
    match state.phase {
        GamePhase::Title => {
            if !input.start {
                return TickOutcome::None;
            }
            state.start(level);
        }
        GamePhase::Playing if input.pause => {
            state.phase = GamePhase::Paused;
            log::info!("Paused");
            return TickOutcome::None;
        }
        GamePhase::Paused => {
            if !input.pause {
                return TickOutcome::None;
            }
            state.phase = GamePhase::Playing;
            log::info!("Resumed");
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;
    if state.time_ticks % SIM_HZ as u64 == 0 {
        state.time_left = state.time_left.saturating_sub(1);
    }

    let outcome = step(&mut state.actor, input, level);
    match outcome {
        TickOutcome::HazardReset(_) => state.resets += 1,
        TickOutcome::GoalReached => {
            state.clears += 1;
            log::info!("Level cleared with {}s left", state.time_left);
        }
        TickOutcome::None => {}
    }

    state.actor.animate();
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Hazard;
    use glam::Vec2;
    use proptest::prelude::*;

    fn spawn_state(level: &Level) -> Actor {
        Actor::spawn(level)
    }

    /// Actor standing on the first ground strip
    fn resting(level: &Level) -> Actor {
        let mut actor = Actor::new(Vec2::new(64.0, 448.0), level.tile);
        actor.grounded = true;
        actor
    }

    fn held(direction: Direction) -> TickInput {
        TickInput {
            direction,
            ..Default::default()
        }
    }

    #[test]
    fn test_rest_is_idempotent() {
        let level = Level::builtin();
        let mut actor = resting(&level);
        for _ in 0..500 {
            assert_eq!(step(&mut actor, &TickInput::default(), &level), TickOutcome::None);
            assert_eq!(actor.pos, Vec2::new(64.0, 448.0));
            assert_eq!(actor.vel, Vec2::ZERO);
            assert!(actor.grounded);
        }
    }

    #[test]
    fn test_spawn_falls_and_lands() {
        let level = Level::builtin();
        let mut actor = Actor::spawn(&level);
        let mut landed = false;
        for _ in 0..120 {
            step(&mut actor, &TickInput::default(), &level);
            if actor.grounded {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert_eq!(actor.feet(), 480.0);
        assert_eq!(actor.vel.y, 0.0);
    }

    #[test]
    fn test_landing_in_one_tick() {
        let level = Level::builtin();
        // Bottom at 475, falling at 9 px/tick onto the ground top at 480
        let mut actor = Actor::new(Vec2::new(64.0, 443.0), level.tile);
        actor.vel.y = 8.5;
        step(&mut actor, &TickInput::default(), &level);
        assert_eq!(actor.feet(), 480.0);
        assert_eq!(actor.vel.y, 0.0);
        assert!(actor.grounded);
    }

    #[test]
    fn test_edge_forgiveness_through_step() {
        let level = Level::builtin();
        let slack = level.tuning.edge_slack;
        let gravity = level.tuning.gravity;

        // After gravity and integration the feet sit slack-1 above the ground
        let y = 480.0 - 32.0 - (slack - 1.0) - gravity;
        let mut near = Actor::new(Vec2::new(64.0, y), level.tile);
        step(&mut near, &TickInput::default(), &level);
        assert!(near.grounded);
        assert_eq!(near.feet(), 480.0);

        let y = 480.0 - 32.0 - (slack + 1.0) - gravity;
        let mut far = Actor::new(Vec2::new(64.0, y), level.tile);
        step(&mut far, &TickInput::default(), &level);
        assert!(!far.grounded);
        assert_eq!(far.vel.y, gravity);
    }

    #[test]
    fn test_head_bump_under_brick() {
        let level = Level::builtin();
        // Brick (3,12,2,1) spans y 384..416; actor just below moving up
        let mut actor = Actor::new(Vec2::new(150.0, 420.0), level.tile);
        actor.vel.y = -8.0;
        step(&mut actor, &TickInput::default(), &level);
        assert_eq!(actor.pos.y, 416.0);
        assert_eq!(actor.vel.y, 0.0);
        assert!(!actor.grounded);
    }

    #[test]
    fn test_jump_requires_ground() {
        let level = Level::builtin();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };

        let mut actor = resting(&level);
        step(&mut actor, &jump, &level);
        assert!(!actor.grounded);
        assert_eq!(actor.vel.y, -level.tuning.jump_strength + level.tuning.gravity);

        // Mid-air: no second jump
        let vy = actor.vel.y;
        step(&mut actor, &jump, &level);
        assert_eq!(actor.vel.y, vy + level.tuning.gravity);
    }

    #[test]
    fn test_friction_snaps_to_zero() {
        let level = Level::builtin();
        let mut actor = resting(&level);
        actor.vel.x = level.tuning.max_speed;
        let mut ticks = 0;
        while actor.vel.x != 0.0 {
            step(&mut actor, &TickInput::default(), &level);
            assert!(actor.vel.x >= 0.0);
            ticks += 1;
            assert!(ticks < 200, "friction never settled");
        }
    }

    #[test]
    fn test_hazard_reset_into_water() {
        let level = Level::builtin();
        // Above the pool at tile (8,15,4,2) with enough downward speed to enter it
        let mut actor = Actor::new(Vec2::new(280.0, 440.0), level.tile);
        actor.vel.y = 50.0;
        let outcome = step(&mut actor, &TickInput::default(), &level);
        assert_eq!(outcome, TickOutcome::HazardReset(Hazard::Water));
        assert_eq!(actor, Actor::new(Vec2::new(64.0, 320.0), level.tile));
        assert_eq!(actor, spawn_state(&level));
    }

    #[test]
    fn test_goal_reached() {
        let level = Level::builtin();
        let mut actor = Actor::new(Vec2::new(1760.0, 128.0), level.tile);
        let outcome = step(&mut actor, &TickInput::default(), &level);
        assert_eq!(outcome, TickOutcome::GoalReached);
        assert_eq!(actor, spawn_state(&level));
    }

    #[test]
    fn test_goal_at_spawn_replaces_hazard_outcome() {
        // Spawn inside the goal: the hazard reset lands the actor in the goal,
        // which is checked afterwards and wins
        let level = Level {
            spawn: [54, 4],
            ..Level::builtin()
        };
        let mut actor = Actor::new(Vec2::new(280.0, 440.0), level.tile);
        actor.vel.y = 50.0;
        let outcome = step(&mut actor, &TickInput::default(), &level);
        assert_eq!(outcome, TickOutcome::GoalReached);
        assert_eq!(actor, Actor::new(Vec2::new(1728.0, 128.0), level.tile));
        assert_eq!(actor, spawn_state(&level));
    }

    #[test]
    fn test_fall_through_floor() {
        let level = Level::builtin();
        let mut actor = Actor::new(Vec2::new(900.0, level.field_height() + 1.0), level.tile);
        let outcome = step(&mut actor, &TickInput::default(), &level);
        assert_eq!(outcome, TickOutcome::HazardReset(Hazard::FellOut));
        assert_eq!(actor, spawn_state(&level));
    }

    #[test]
    fn test_empty_level_always_falls() {
        let level = Level {
            platforms: Vec::new(),
            ..Level::builtin()
        };
        let mut actor = Actor::spawn(&level);
        for _ in 0..20 {
            step(&mut actor, &TickInput::default(), &level);
            assert!(!actor.grounded);
        }
        assert!(actor.vel.y > 0.0);
    }

    #[test]
    fn test_walk_into_wall() {
        // Ground strip with a two-tile wall standing on it at x = 320
        let level = Level {
            platforms: vec![
                crate::TileRect::new(0, 15, 20, 2),
                crate::TileRect::new(10, 13, 1, 2),
            ],
            cactus: Vec::new(),
            water: Vec::new(),
            ..Level::builtin()
        };
        let mut actor = Actor::new(Vec2::new(280.0, 448.0), level.tile);
        actor.grounded = true;
        for _ in 0..60 {
            step(&mut actor, &held(Direction::Right), &level);
        }
        assert_eq!(actor.pos.x, 320.0 - 32.0);
        assert_eq!(actor.vel.x, 0.0);
        assert!(actor.grounded);
    }

    #[test]
    fn test_direction_from_held() {
        assert_eq!(Direction::from_held(true, false), Direction::Left);
        assert_eq!(Direction::from_held(false, true), Direction::Right);
        assert_eq!(Direction::from_held(true, true), Direction::None);
        assert_eq!(Direction::from_held(false, false), Direction::None);
    }

    #[test]
    fn test_session_waits_for_start() {
        let level = Level::builtin();
        let mut state = GameState::new(&level);
        tick(&mut state, &held(Direction::Right), &level);
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.actor.pos, level.spawn_pos());

        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start, &level);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_countdown() {
        let level = Level::builtin();
        let mut state = GameState::new(&level);
        state.start(&level);
        for _ in 0..SIM_HZ * 3 {
            tick(&mut state, &TickInput::default(), &level);
        }
        assert_eq!(state.time_left, TIME_LIMIT_SECS - 3);

        state.time_left = 0;
        for _ in 0..SIM_HZ {
            tick(&mut state, &TickInput::default(), &level);
        }
        assert_eq!(state.time_left, 0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let level = Level::builtin();
        let mut state = GameState::new(&level);
        state.start(&level);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &pause, &level);
        assert_eq!(state.phase, GamePhase::Paused);
        let frozen = state.actor.clone();
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), &level);
        }
        assert_eq!(state.actor, frozen);
        assert_eq!(state.time_ticks, 0);

        tick(&mut state, &pause, &level);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_session_counts_outcomes() {
        let level = Level::builtin();
        let mut state = GameState::new(&level);
        state.start(&level);

        state.actor.pos = Vec2::new(1760.0, 128.0);
        assert_eq!(tick(&mut state, &TickInput::default(), &level), TickOutcome::GoalReached);
        assert_eq!(state.clears, 1);

        state.actor.pos = Vec2::new(300.0, 600.0);
        assert!(matches!(
            tick(&mut state, &TickInput::default(), &level),
            TickOutcome::HazardReset(_)
        ));
        assert_eq!(state.resets, 1);
    }

    proptest! {
        #[test]
        fn prop_horizontal_speed_is_capped(
            ticks in 1usize..400,
            start_vx in -4.0f32..4.0,
            right in any::<bool>(),
        ) {
            let level = Level {
                platforms: Vec::new(),
                cactus: Vec::new(),
                water: Vec::new(),
                rows: 1_000_000,
                ..Level::builtin()
            };
            let mut actor = Actor::new(Vec2::ZERO, level.tile);
            actor.vel.x = start_vx;
            let input = held(if right { Direction::Right } else { Direction::Left });
            for _ in 0..ticks {
                step(&mut actor, &input, &level);
                prop_assert!(actor.vel.x.abs() <= level.tuning.max_speed);
            }
        }

        #[test]
        fn prop_rest_holds_anywhere_on_ground(x in 0.0f32..224.0) {
            let level = Level::builtin();
            let mut actor = Actor::new(Vec2::new(x, 448.0), level.tile);
            actor.grounded = true;
            for _ in 0..60 {
                step(&mut actor, &TickInput::default(), &level);
            }
            prop_assert_eq!(actor.pos, Vec2::new(x, 448.0));
            prop_assert!(actor.grounded);
        }
    }
}
