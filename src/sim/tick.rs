//! Fixed timestep simulation tick
//!
//! Core game loop that advances the house deterministically, one 1/60 s step
//! at a time. Input flows through the player first; Granny then reacts to the
//! world the player left behind.

use glam::Vec2;

use super::state::{GameEvent, GameState, GameStatus};
use super::timers::DeferredAction;
use super::{autopilot, granny, hazards, player};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement stick, each axis in [-1, 1]
    pub move_dir: Vec2,
    /// Hold to sprint
    pub sprint: bool,
    /// Jump (held is fine, a jump only starts when the last one is done)
    pub jump: bool,
    /// Hide / use radio (one-shot, cleared once consumed)
    pub action: bool,
    /// Look out of a hiding spot while held
    pub peek: bool,
    /// Fire a dart (one-shot, cleared once consumed)
    pub fire: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
    /// Idle/demo mode - the autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &mut TickInput) {
    state.events.clear();

    if input.pause {
        input.pause = false;
        match state.status {
            GameStatus::Playing => {
                state.status = GameStatus::Paused;
                log::info!("Paused");
                return;
            }
            GameStatus::Paused => {
                state.status = GameStatus::Playing;
                log::info!("Resumed");
            }
            _ => {}
        }
    }

    // Only a live day or the capture cutscene moves time forward
    match state.status {
        GameStatus::Playing | GameStatus::Cutscene => {}
        GameStatus::Menu | GameStatus::Paused | GameStatus::Caught | GameStatus::Escaped => {
            return;
        }
    }

    state.time_ticks += 1;
    run_deferred(state);

    state.screen_shake = (state.screen_shake - 1.0).max(0.0);

    if state.status != GameStatus::Playing {
        return;
    }

    advance_clock(state);

    // Idle/demo mode - steer on the player's behalf
    if input.idle_mode {
        let steer = autopilot::steer(state);
        input.move_dir = steer.move_dir;
        input.sprint = steer.sprint;
        input.action = steer.action;
        input.fire = steer.fire;
        input.peek = steer.peek;
        input.jump = false;
    }

    state.noise.decay();
    player::update_hiding(state, input);
    player::update_interactions(state, input);
    input.action = false;
    hazards::update_traps(state);
    player::update_movement(state, input);
    player::fire(state, input);
    input.fire = false;
    hazards::update_projectiles(state);
    player::collect_items(state);

    granny::update(state);
    if state.status != GameStatus::Playing {
        return;
    }

    check_escape(state);
}

fn run_deferred(state: &mut GameState) {
    for action in state.deferred.take_due(state.time_ticks, state.run_id) {
        match action {
            DeferredAction::ClearDistraction { furniture } => {
                if let Some(f) = state.furniture.get_mut(furniture) {
                    f.is_distracting = false;
                }
            }
            DeferredAction::AdvanceDay => {
                if state.status == GameStatus::Cutscene {
                    state.advance_day();
                }
            }
        }
    }
}

fn advance_clock(state: &mut GameState) {
    state.clock_ticks += 1;
    if state.granny.sleeping && state.game_time() >= WAKE_MINUTES {
        state.granny.sleeping = false;
        state.events.push(GameEvent::GrannyWoke);
        log::info!("Granny woke up at {}", state.game_time_str());
    }
}

fn check_escape(state: &mut GameState) {
    if !state.is_exit_ready() {
        return;
    }
    let offset = state.player.body.pos - state.level.exit_door.center();
    if offset.x.abs() >= EXIT_REACH_X || offset.y.abs() >= EXIT_REACH_Y {
        return;
    }

    state.status = GameStatus::Escaped;
    state.score += ESCAPE_SCORE;
    state.events.push(GameEvent::Escaped { score: state.score });
    log::info!("Escaped on day {} with {} points", state.day, state.score);

    if state.score > state.high_score {
        state.high_score = state.score;
        state.events.push(GameEvent::NewHighScore { score: state.score });
        log::info!("New high score: {}", state.score);
    }
}
