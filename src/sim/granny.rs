//! Granny's brain
//!
//! A finite-state machine driven by sight, noise and timers. Each awake tick:
//! pick a state by fixed priority, maybe start inspecting a hiding spot, then
//! either count down an inspection or walk toward the current target, and
//! finally check whether she has her hands on the player.
//!
//! Priority, first match wins:
//! 1. `Stunned` until the stun wears off
//! 2. `Chasing` when the player is in the open and within sight radius
//! 3. `Checking` until the inspection timer runs out
//! 4. `Searching` while a scent is remembered
//! 5. `Working` while a work session is pending
//! 6. `Wandering`

use rand::Rng;

use super::geometry;
use super::noise::fear_level;
use super::state::{GameEvent, GameState, GameStatus, GrannyState, Trap};
use crate::consts::*;
use crate::{bearing, direction};

/// What Granny can perceive this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Senses {
    /// Player is unhidden and inside the sight radius
    pub sees_player: bool,
    /// A noise position is remembered
    pub has_scent: bool,
}

/// Timer values the transition depends on (after this tick's stun countdown)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timers {
    pub stun: u32,
    pub check: u32,
    pub work: u32,
}

/// Choose the next state; pure and total over every state
pub fn select_state(current: GrannyState, timers: Timers, senses: Senses) -> GrannyState {
    match current {
        GrannyState::Stunned => {
            if timers.stun > 0 {
                GrannyState::Stunned
            } else {
                GrannyState::Wandering
            }
        }
        GrannyState::Checking if !senses.sees_player && timers.check > 0 => GrannyState::Checking,
        GrannyState::Wandering
        | GrannyState::Working
        | GrannyState::Chasing
        | GrannyState::Searching
        | GrannyState::Checking => {
            if senses.sees_player {
                GrannyState::Chasing
            } else if senses.has_scent {
                GrannyState::Searching
            } else if timers.work > 0 {
                GrannyState::Working
            } else {
                GrannyState::Wandering
            }
        }
    }
}

/// Run one awake tick of Granny's behaviour; does nothing while she sleeps
pub fn update(state: &mut GameState) {
    if state.granny.sleeping {
        return;
    }

    let dist = state.player.body.distance_to(&state.granny.body);
    state.fear_level = fear_level(state.player.body.pos, state.granny.body.pos);
    let senses = Senses {
        sees_player: !state.player.is_hiding && dist < state.settings.difficulty.sight_radius(),
        has_scent: state.noise.scent.is_some(),
    };

    think(state, senses);
    inspect_hiding_spots(state);

    match state.granny.state {
        GrannyState::Checking => {
            update_check(state);
            if state.status != GameStatus::Playing {
                return;
            }
        }
        s if s.is_mobile() => walk(state),
        _ => {}
    }

    check_capture(state);
}

/// Apply the priority table and the side effects of the chosen state
fn think(state: &mut GameState, senses: Senses) {
    let granny = &mut state.granny;
    if granny.state == GrannyState::Stunned {
        granny.stun_timer = granny.stun_timer.saturating_sub(1);
    }

    let prev = granny.state;
    let next = select_state(
        prev,
        Timers {
            stun: granny.stun_timer,
            check: granny.check_timer,
            work: granny.work_timer,
        },
        senses,
    );
    if next != prev {
        log::debug!("Granny {:?} -> {:?}", prev, next);
    }
    granny.state = next;

    if prev == GrannyState::Checking && next != GrannyState::Checking {
        granny.check_timer = 0;
        for f in &mut state.furniture {
            f.is_being_checked = false;
        }
    }

    match next {
        GrannyState::Chasing => {
            state.noise.scent = Some(state.player.body.pos);
        }
        GrannyState::Working => {
            granny.work_timer -= 1;
            if granny.work_timer % TRAP_DROP_INTERVAL == 0
                && state.rng.random_bool(TRAP_DROP_CHANCE) {
                let pos = granny.body.pos;
                state.traps.push(Trap {
                    pos,
                    active: true,
                    set_by_granny: true,
                });
                state.events.push(GameEvent::TrapDropped { pos });
                log::debug!("Granny set a trap at ({:.0}, {:.0})", pos.x, pos.y);
            }
        }
        GrannyState::Wandering
        | GrannyState::Searching
        | GrannyState::Checking
        | GrannyState::Stunned => {}
    }
}

/// Close to the scent, pick a nearby hiding spot to look inside or give up
fn inspect_hiding_spots(state: &mut GameState) {
    if state.granny.state != GrannyState::Searching {
        return;
    }
    let Some(scent) = state.noise.scent else {
        return;
    };
    let pos = state.granny.body.pos;
    let to_scent = pos.distance(scent);
    if to_scent >= SEARCH_INSPECT_RANGE {
        return;
    }

    let spot = state
        .furniture
        .iter()
        .position(|f| f.can_hide && f.center().distance(pos) < HIDING_SPOT_RANGE);
    if let Some(idx) = spot {
        if state.player.was_seen_hiding || state.rng.random_bool(RANDOM_CHECK_CHANCE) {
            state.granny.state = GrannyState::Checking;
            state.granny.check_timer = CHECK_TICKS;
            state.furniture[idx].is_being_checked = true;
            log::debug!("Granny checks hiding spot {}", idx);
            return;
        }
    }

    if to_scent < SEARCH_GIVE_UP_RANGE {
        state.noise.clear_scent();
    }
}

/// Count down an inspection; at the end, a hidden player within reach is caught
fn update_check(state: &mut GameState) {
    let granny = &mut state.granny;
    granny.check_timer = granny.check_timer.saturating_sub(1);
    if granny.check_timer > 0 {
        return;
    }

    granny.state = GrannyState::Wandering;
    for f in &mut state.furniture {
        f.is_being_checked = false;
    }
    state.player.was_seen_hiding = false;
    state.noise.clear_scent();

    let player = &state.player;
    if player.is_hiding && player.body.distance_to(&state.granny.body) < HIDING_SPOT_RANGE {
        log::info!("Granny found the player's hiding spot");
        state.capture();
    }
}

/// Head for the player, the scent or the next waypoint
fn walk(state: &mut GameState) {
    let chasing = state.granny.state == GrannyState::Chasing;
    let target = if chasing {
        state.player.body.pos
    } else {
        state
            .noise
            .scent
            .unwrap_or_else(|| state.level.waypoint(state.granny.target_node))
    };

    let granny = &mut state.granny;
    let base = if chasing {
        GRANNY_CHASE_SPEED
    } else {
        granny.body.speed
    };
    let speed = base * state.settings.difficulty.speed_multiplier();

    let to_target = target - granny.body.pos;
    if to_target.length() > 0.0 {
        let angle = bearing(granny.body.pos, target);
        // Don't overshoot a target closer than one step
        let step = if to_target.length() <= speed {
            to_target
        } else {
            direction(angle) * speed
        };
        let walls = &state.level.walls;
        let radius = granny.body.radius;
        granny.body.pos = geometry::slide(granny.body.pos, step, |p| {
            geometry::intersects(p, radius, walls)
        });
        granny.body.facing = angle;
    }

    if !chasing
        && state.noise.scent.is_none()
        && granny.body.pos.distance(target) < WAYPOINT_REACHED
    {
        let stops = state.level.routine.len().max(1);
        granny.target_node = (granny.target_node + 1) % stops;
        granny.work_timer = state.rng.random_range(WORK_MIN_TICKS..=WORK_MAX_TICKS);
        log::debug!(
            "Granny reached her stop, working for {} ticks",
            granny.work_timer
        );
    }
}

/// Whether the two bodies are close enough for a catch
pub fn within_grab(distance: f32, radius_sum: f32) -> bool {
    distance < radius_sum - CAPTURE_SLACK
}

fn check_capture(state: &mut GameState) {
    if state.player.is_hiding {
        return;
    }
    let dist = state.player.body.distance_to(&state.granny.body);
    if within_grab(dist, state.player.body.radius + state.granny.body.radius) {
        log::info!("Granny caught the player");
        state.capture();
    }
}
