//! Idle/demo mode - a simple bot that plays the game
//!
//! Heads for the nearest item, then the front door. Runs when chased, shoots
//! back when armed, ducks into cover when it can't.

use glam::Vec2;

use super::state::{GameState, GrannyState};
use super::tick::TickInput;
use crate::{bearing, direction};

/// Distance at which a chasing Granny is worth a dart
const FIRE_RANGE: f32 = 200.0;
/// Stay hidden while she is closer than this
const HIDE_CLEARANCE: f32 = 180.0;
/// Keep some stamina in reserve for a real chase
const SPRINT_RESERVE: f32 = 20.0;

/// Where the bot wants to go next
fn goal(state: &GameState) -> Vec2 {
    if state.is_exit_ready() {
        return state.level.exit_door.center();
    }
    let pos = state.player.body.pos;
    state
        .items
        .iter()
        .filter(|i| !i.collected)
        .min_by(|a, b| {
            a.pos
                .distance(pos)
                .partial_cmp(&b.pos.distance(pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|i| i.pos)
        .unwrap_or_else(|| state.level.exit_door.center())
}

/// Produce this tick's input for the bot
pub fn steer(state: &GameState) -> TickInput {
    let player = &state.player;
    let granny = &state.granny;
    let to_granny = player.body.distance_to(&granny.body);
    let chased = !granny.sleeping && granny.state == GrannyState::Chasing;
    let mut input = TickInput::default();

    if player.is_hiding {
        let threat = !granny.sleeping
            && (granny.state == GrannyState::Checking || to_granny < HIDE_CLEARANCE);
        input.peek = threat;
        if !threat {
            input.move_dir = direction(bearing(player.body.pos, goal(state)));
        }
        return input;
    }

    if chased && player.has_weapon && player.ammo > 0 && to_granny < FIRE_RANGE {
        // Turn to face her without closing much distance
        input.move_dir = direction(bearing(player.body.pos, granny.body.pos)) * 0.2;
        input.fire = true;
        return input;
    }

    if chased && state.hide_prompt {
        input.action = true;
        return input;
    }

    // Wobble the heading a little so the bot slides off walls
    let t = state.time_ticks as f32 * 0.01;
    let offset = t.sin() * 0.3 + (t * 0.7).sin() * 0.15;
    let angle = bearing(player.body.pos, goal(state)) + offset;
    input.move_dir = direction(angle);
    input.sprint = chased && player.stamina > SPRINT_RESERVE;
    input
}
