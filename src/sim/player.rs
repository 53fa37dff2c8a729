//! Player controller
//!
//! Turns one tick of input into player movement, stamina, jumping, hiding,
//! radio use, item pickup and firing. Each step makes its own noise.

use glam::Vec2;

use super::geometry;
use super::noise::NoiseSource;
use super::state::{
    FurnitureKind, GameEvent, GameState, Granny, ItemKind, Projectile, player_blocked,
};
use super::tick::TickInput;
use super::timers::DeferredAction;
use crate::consts::*;
use crate::{angle_between, bearing, direction, heading};

/// Hide in a nearby hiding spot on `action`, and refresh the hide prompt
pub fn update_hiding(state: &mut GameState, input: &TickInput) {
    let pos = state.player.body.pos;
    let near = state
        .furniture
        .iter()
        .position(|f| f.can_hide && f.rect.within_margin(pos, HIDE_MARGIN));

    if let Some(idx) = near {
        if input.action && !state.player.is_hiding {
            let spot = state.furniture[idx].center();
            let seen = witnessed(&state.granny, spot);
            let player = &mut state.player;
            player.is_hiding = true;
            player.is_peeking = false;
            player.was_seen_hiding = seen;
            player.hide_from = player.body.pos;
            player.body.pos = spot;
            if seen {
                // She knows exactly where to look
                state.noise.scent = Some(spot);
            }
            state.events.push(GameEvent::Hid { seen });
            log::debug!("Player hid in spot {} (seen: {})", idx, seen);
        }
    }

    state.hide_prompt = near.is_some() && !state.player.is_hiding;
}

/// Whether Granny is looking when someone slips into a spot at `at`
pub fn witnessed(granny: &Granny, at: Vec2) -> bool {
    granny.is_alert()
        && granny.body.pos.distance(at) < HIDE_WITNESS_RANGE
        && angle_between(bearing(granny.body.pos, at), granny.body.facing) < HIDE_WITNESS_CONE
}

/// Switch on a nearby radio to lure Granny away
pub fn update_interactions(state: &mut GameState, input: &TickInput) {
    let pos = state.player.body.pos;
    let near = state
        .furniture
        .iter()
        .position(|f| f.kind == FurnitureKind::Radio && f.center().distance(pos) < INTERACT_RANGE);
    state.interact_prompt = near;

    let Some(idx) = near else { return };
    if !input.action {
        return;
    }
    let radio = &mut state.furniture[idx];
    radio.is_distracting = true;
    let at = radio.center();
    state.noise.emit(NoiseSource::Radio, at);
    state.schedule(
        DISTRACTION_TICKS,
        DeferredAction::ClearDistraction { furniture: idx },
    );
    state.events.push(GameEvent::RadioUsed { furniture: idx });
}

/// Walk, sprint, jump, or fidget in a hiding spot
pub fn update_movement(state: &mut GameState, input: &TickInput) {
    let stick = input.move_dir.clamp(Vec2::splat(-1.0), Vec2::ONE);

    if state.player.is_hiding {
        let player = &mut state.player;
        player.is_peeking = input.peek;
        if stick.x.abs() > UNHIDE_THRESHOLD || stick.y.abs() > UNHIDE_THRESHOLD {
            // Step back out to where the player slipped in
            player.is_hiding = false;
            player.is_peeking = false;
            player.body.pos = player.hide_from;
        }
        return;
    }

    if state.player.is_trapped() {
        return;
    }

    let moving = stick.x.abs() > MOVE_DEADZONE || stick.y.abs() > MOVE_DEADZONE;
    if moving {
        let sensitivity = state.settings.effective_sensitivity();
        let player = &mut state.player;
        player.walk_cycle += WALK_CYCLE_STEP;
        let speed = if input.sprint && player.stamina > 0.0 {
            PLAYER_SPRINT_SPEED
        } else {
            player.body.speed
        };
        if input.sprint {
            player.stamina = (player.stamina - SPRINT_DRAIN).max(0.0);
        } else {
            player.stamina = (player.stamina + WALK_REGEN).min(MAX_STAMINA);
        }

        let walls = &state.level.walls;
        let furniture = &state.furniture;
        let radius = player.body.radius;
        player.body.pos = geometry::slide(player.body.pos, stick * speed * sensitivity, |p| {
            player_blocked(walls, furniture, p, radius)
        });
        player.body.facing = heading(stick);

        if input.sprint {
            let at = state.player.body.pos;
            state.noise.emit(NoiseSource::Sprint, at);
        }
        disturb_furniture(state);
    } else {
        let player = &mut state.player;
        player.stamina = (player.stamina + IDLE_REGEN).min(MAX_STAMINA);
    }

    update_jump(state, input);
}

/// Creaky boards groan and vases shatter under the player's feet
fn disturb_furniture(state: &mut GameState) {
    let pos = state.player.body.pos;
    let mut broke = None;
    for (idx, f) in state.furniture.iter_mut().enumerate() {
        match f.kind {
            FurnitureKind::CreakyFloor if f.center().distance(pos) < CREAK_RANGE => {
                state.noise.emit(NoiseSource::CreakyFloor, pos);
            }
            FurnitureKind::Vase if !f.is_broken && f.center().distance(pos) < VASE_RANGE => {
                f.is_broken = true;
                state.noise.emit(NoiseSource::VaseBreak, pos);
                broke = Some(idx);
            }
            _ => {}
        }
    }
    if let Some(idx) = broke {
        state.shake(SHAKE_VASE);
        state.events.push(GameEvent::VaseBroken { furniture: idx });
    }
}

fn update_jump(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    if input.jump && !player.is_jumping && player.jump_cooldown == 0 {
        player.is_jumping = true;
        player.jump_cooldown = JUMP_DURATION_TICKS;
        let at = player.body.pos;
        state.noise.emit(NoiseSource::Jump, at);
    }

    let player = &mut state.player;
    if player.is_jumping {
        let elapsed = (JUMP_DURATION_TICKS - player.jump_cooldown) as f32 / JUMP_DURATION_TICKS as f32;
        player.jump_height = (elapsed * std::f32::consts::PI).sin() * JUMP_PEAK_HEIGHT;
        if player.jump_cooldown == 0 {
            player.is_jumping = false;
            player.jump_height = 0.0;
        }
    }
    if player.jump_cooldown > 0 {
        player.jump_cooldown -= 1;
    }
}

/// Fire a dart along the player's facing; returns true if a shot left the barrel
pub fn fire(state: &mut GameState, input: &TickInput) -> bool {
    let player = &mut state.player;
    if !input.fire || !player.has_weapon || player.ammo == 0 || player.is_hiding {
        return false;
    }
    player.ammo -= 1;
    let pos = player.body.pos;
    state.projectiles.push(Projectile {
        pos,
        vel: direction(player.body.facing) * PROJECTILE_SPEED,
        active: true,
    });
    state.noise.emit(NoiseSource::Gunshot, pos);
    state.events.push(GameEvent::ShotFired);
    log::debug!("Dart fired, {} left", state.player.ammo);
    true
}

/// Pick up anything within reach
pub fn collect_items(state: &mut GameState) {
    let pos = state.player.body.pos;
    for item in state.items.iter_mut().filter(|i| !i.collected) {
        if item.pos.distance(pos) >= PICKUP_RANGE {
            continue;
        }
        item.collected = true;
        match item.kind {
            ItemKind::Weapon => state.player.has_weapon = true,
            ItemKind::Ammo => state.player.ammo += 1,
            ItemKind::Key
            | ItemKind::Hammer
            | ItemKind::Fuse
            | ItemKind::Crowbar
            | ItemKind::Trap => state.inventory.push(item.id.clone()),
        }
        state.score += ITEM_SCORE;
        state.events.push(GameEvent::ItemCollected {
            id: item.id.clone(),
        });
        log::info!("Picked up {} ({} points)", item.name, state.score);
    }
}
