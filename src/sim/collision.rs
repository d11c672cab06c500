//! Axis-separated collision resolution against static rectangles
//!
//! Horizontal and vertical motion are resolved in two independent passes.
//! Each pass walks the platforms in declaration order and rewrites the actor
//! unconditionally on overlap, so with overlapping geometry the last platform
//! in the list wins.

use super::rect::Rect;
use super::state::{Actor, Hazard};
use crate::level::Level;

/// Resolve the horizontal pass after `x` has been advanced.
///
/// Clears `grounded`; only the vertical pass can set it again.
pub fn resolve_x(actor: &mut Actor, platforms: impl IntoIterator<Item = Rect>) {
    actor.grounded = false;
    for r in platforms {
        if actor.rect().overlaps(&r) {
            actor.pos.x = if actor.vel.x > 0.0 {
                r.x - actor.size.x
            } else {
                r.right()
            };
            actor.vel.x = 0.0;
        }
    }
}

/// Resolve the vertical pass after `y` has been advanced.
///
/// A falling overlap is a landing, anything else is a head bump. With no
/// overlap, a non-rising actor whose feet are within `edge_slack` of a
/// platform top (and horizontally over it) is snapped onto it.
pub fn resolve_y(actor: &mut Actor, platforms: impl IntoIterator<Item = Rect>, edge_slack: f32) {
    actor.grounded = false;
    for r in platforms {
        let body = actor.rect();
        if body.overlaps(&r) {
            if actor.vel.y > 0.0 {
                land(actor, &r);
            } else {
                actor.pos.y = r.bottom();
                actor.vel.y = 0.0;
            }
        } else if !actor.grounded
            && actor.vel.y >= 0.0
            && (actor.feet() - r.y).abs() < edge_slack
            && body.overlaps_x(&r)
        {
            land(actor, &r);
        }
    }
}

fn land(actor: &mut Actor, r: &Rect) {
    actor.pos.y = r.y - actor.size.y;
    actor.vel.y = 0.0;
    actor.grounded = true;
}

/// First hazard the actor is touching, checked as: off the field, cactus, water
pub fn find_hazard(actor: &Actor, level: &Level) -> Option<Hazard> {
    if actor.pos.y > level.field_height() {
        return Some(Hazard::FellOut);
    }
    let body = actor.rect();
    if level.cactus_rects().any(|r| body.overlaps(&r)) {
        return Some(Hazard::Cactus);
    }
    if level.water_rects().any(|r| body.overlaps(&r)) {
        return Some(Hazard::Water);
    }
    None
}

pub fn touches_goal(actor: &Actor, level: &Level) -> bool {
    actor.rect().overlaps(&level.goal_rect())
}
