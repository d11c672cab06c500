//! Demo pilot - drives the cat without a player
//!
//! Runs right, jumping at the last moment before gaps and hazards and
//! climbing onto higher platforms it can reach. Takeoff points are derived
//! from the level tuning (rise time, top speed, air time), so retuned levels
//! still play. The occasional random hop happens only on stretches with no
//! hazard within a full jump. Seeded, so a given seed always plays the same run.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::rect::Rect;
use super::state::{Actor, GamePhase, GameState};
use super::tick::{Direction, TickInput};
use crate::level::Level;
use crate::tuning::Tuning;

/// Chance per grounded tick of jumping for no reason
const RANDOM_HOP_CHANCE: f64 = 0.02;
/// Extra height to clear over a hazard or onto a platform (pixels)
const HAZARD_CLEARANCE: f32 = 2.0;
const CLIMB_CLEARANCE: f32 = 4.0;
/// Platforms closer than this to the jump apex are not worth trying
const CLIMB_HEADROOM: f32 = 8.0;

pub struct DemoPilot {
    rng: Pcg32,
    /// Platform being jumped onto; set at takeoff, cleared on landing
    climb_target: Option<Rect>,
}

impl DemoPilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            climb_target: None,
        }
    }

    /// Choose the input for the next tick
    pub fn next_input(&mut self, state: &GameState, level: &Level) -> TickInput {
        if state.phase == GamePhase::Title {
            return TickInput {
                start: true,
                ..Default::default()
            };
        }

        let actor = &state.actor;
        let mut input = TickInput {
            direction: Direction::Right,
            ..Default::default()
        };

        if !actor.grounded {
            // Coast once above the platform being climbed so the landing
            // leaves room for the next step
            if let Some(target) = self.climb_target {
                if actor.feet() <= target.y && actor.rect().right() > target.x {
                    input.direction = Direction::None;
                }
            }
            return input;
        }
        self.climb_target = None;

        let tuning = &level.tuning;
        let takeoff = 2.0 * tuning.max_speed;
        let danger = distance_to_danger(actor, level);
        if danger <= takeoff {
            input.jump = true;
            return input;
        }

        if let Some(target) = find_climb(actor, level, takeoff) {
            self.climb_target = Some(target);
            input.jump = true;
            return input;
        }

        let span = jump_span(tuning);
        let body = actor.rect();
        let far = body.right() + span + 2.0 * level.tile;
        let open_run = danger > span
            && !level
                .cactus_rects()
                .chain(level.water_rects())
                .any(|r| r.x < far && r.right() > body.x);
        input.jump = open_run && self.rng.random_bool(RANDOM_HOP_CHANCE);

        input
    }
}

/// Ticks of rising needed to lift the feet by `height`, or `None` if the
/// jump apex falls short
fn rise_ticks(height: f32, tuning: &Tuning) -> Option<u32> {
    let mut vy = tuning.jump_strength;
    let mut risen = 0.0;
    let mut ticks = 0;
    while risen < height {
        vy -= tuning.gravity;
        if vy <= 0.0 {
            return None;
        }
        risen += vy;
        ticks += 1;
    }
    Some(ticks)
}

/// Horizontal distance covered by a full jump at top speed
fn jump_span(tuning: &Tuning) -> f32 {
    2.0 * tuning.jump_strength / tuning.gravity * tuning.max_speed
}

fn jump_height(tuning: &Tuning) -> f32 {
    tuning.jump_strength * tuning.jump_strength / (2.0 * tuning.gravity)
}

/// Right edge of the walkable surface under the actor, following platforms
/// that continue it at the same height
fn support_edge(actor: &Actor, level: &Level) -> Option<f32> {
    let feet = actor.feet();
    let body = actor.rect();
    let on_surface = |r: &Rect| (r.y - feet).abs() < 1.0;

    let mut edge = level
        .platform_rects()
        .filter(|r| on_surface(r) && body.overlaps_x(r))
        .map(|r| r.right())
        .reduce(f32::max)?;
    while let Some(next) = level
        .platform_rects()
        .filter(|r| on_surface(r) && r.x <= edge && edge < r.right())
        .map(|r| r.right())
        .reduce(f32::max)
    {
        edge = next;
    }
    Some(edge)
}

/// How far the actor can still run before it has to jump.
///
/// Gaps count from the end of the surface when nothing solid lies below it.
/// Hazards at or above foot level count from their near side, pulled closer
/// by the run-up needed to rise over them.
fn distance_to_danger(actor: &Actor, level: &Level) -> f32 {
    let tuning = &level.tuning;
    let body = actor.rect();
    let lead = body.right();
    let feet = actor.feet();
    let mut danger = f32::INFINITY;

    if let Some(edge) = support_edge(actor, level) {
        let landing_below = level
            .platform_rects()
            .any(|r| r.x <= edge && edge < r.right() && r.y >= feet - 1.0);
        if !landing_below {
            danger = edge - lead;
        }
    }

    for r in level.cactus_rects().chain(level.water_rects()) {
        if r.y <= feet + 1.0 && r.bottom() > body.y && r.right() > lead {
            let height = (feet - r.y).max(0.0);
            let rise = if height > 0.0 {
                rise_ticks(height + HAZARD_CLEARANCE, tuning).unwrap_or(0)
            } else {
                0
            };
            danger = danger.min((r.x - lead).max(0.0) - rise as f32 * tuning.max_speed);
        }
    }

    danger
}

/// First higher platform ahead whose takeoff window the actor is in
fn find_climb(actor: &Actor, level: &Level, window: f32) -> Option<Rect> {
    let tuning = &level.tuning;
    let lead = actor.rect().right();
    let feet = actor.feet();
    let reach = jump_height(tuning) - CLIMB_HEADROOM;

    level.platform_rects().find(|r| {
        let height = feet - r.y;
        if height <= 1.0 || height > reach || r.x < lead {
            return false;
        }
        let Some(ticks) = rise_ticks(height + CLIMB_CLEARANCE, tuning) else {
            return false;
        };
        let run_up = ticks as f32 * tuning.max_speed;
        let distance = r.x - lead;
        run_up <= distance && distance <= run_up + window
    })
}
