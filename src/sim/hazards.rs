//! Darts and floor traps

use super::noise::NoiseSource;
use super::state::{GameEvent, GameState, GrannyState, player_blocked};
use crate::consts::*;

/// Move darts, stopping them on walls, solid furniture or Granny
pub fn update_projectiles(state: &mut GameState) {
    let awake = !state.granny.sleeping;
    let target = state.granny.body.pos;
    let reach = state.granny.body.radius + PROJECTILE_HIT_SLACK;
    let mut hit = false;

    for dart in state.projectiles.iter_mut().filter(|p| p.active) {
        dart.pos += dart.vel;
        if player_blocked(&state.level.walls, &state.furniture, dart.pos, PROJECTILE_RADIUS)
            || state.level.out_of_bounds(dart.pos)
        {
            dart.active = false;
            continue;
        }
        if awake && dart.pos.distance(target) < reach {
            dart.active = false;
            hit = true;
        }
    }
    state.projectiles.retain(|p| p.active);

    if hit {
        stun_granny(state);
    }
}

fn stun_granny(state: &mut GameState) {
    let granny = &mut state.granny;
    granny.state = GrannyState::Stunned;
    granny.stun_timer = STUN_TICKS;
    granny.check_timer = 0;
    for f in &mut state.furniture {
        f.is_being_checked = false;
    }
    state.events.push(GameEvent::GrannyStunned);
    log::info!("Granny stunned for {} ticks", STUN_TICKS);
}

/// Spring traps under the player, or keep a trapped player stuck and noisy
pub fn update_traps(state: &mut GameState) {
    if state.player.trap_timer > 0 {
        state.player.trap_timer -= 1;
        state.noise.raise(TRAP_NOISE_FLOOR);
        return;
    }

    let pos = state.player.body.pos;
    let mut sprung = false;
    for trap in state.traps.iter_mut().filter(|t| t.active) {
        if trap.pos.distance(pos) >= TRAP_RANGE {
            continue;
        }
        trap.active = false;
        sprung = true;
        state.events.push(GameEvent::TrapTriggered { pos: trap.pos });
        log::info!("Stepped in a trap at ({:.0}, {:.0})", trap.pos.x, trap.pos.y);
    }
    if !sprung {
        return;
    }

    let player = &mut state.player;
    player.trap_timer = TRAP_STUN_TICKS;
    player.stamina = (player.stamina - TRAP_STAMINA_PENALTY).max(0.0);
    state.noise.emit(NoiseSource::Trap, pos);
    state.shake(SHAKE_TRAP);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Projectile, Trap};
    use glam::Vec2;

    fn dart(pos: Vec2, vel: Vec2) -> Projectile {
        Projectile {
            pos,
            vel,
            active: true,
        }
    }

    fn trap(pos: Vec2) -> Trap {
        Trap {
            pos,
            active: true,
            set_by_granny: true,
        }
    }

    #[test]
    fn test_dart_flies_straight() {
        let mut state = GameState::test_playing(1);
        state
            .projectiles
            .push(dart(Vec2::new(300.0, 400.0), Vec2::new(PROJECTILE_SPEED, 0.0)));
        update_projectiles(&mut state);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos, Vec2::new(308.0, 400.0));
    }

    #[test]
    fn test_dart_stops_at_wall() {
        let mut state = GameState::test_playing(1);
        // Heading into the hallway wall at x=400
        state
            .projectiles
            .push(dart(Vec2::new(390.0, 400.0), Vec2::new(PROJECTILE_SPEED, 0.0)));
        update_projectiles(&mut state);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_dart_stuns_awake_granny() {
        let mut state = GameState::test_playing(1);
        state.granny.sleeping = false;
        state.granny.state = GrannyState::Chasing;
        state.granny.body.pos = Vec2::new(320.0, 400.0);
        state
            .projectiles
            .push(dart(Vec2::new(290.0, 400.0), Vec2::new(PROJECTILE_SPEED, 0.0)));
        update_projectiles(&mut state);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.granny.state, GrannyState::Stunned);
        assert_eq!(state.granny.stun_timer, STUN_TICKS);
        assert!(state.events.contains(&GameEvent::GrannyStunned));
    }

    #[test]
    fn test_dart_interrupts_inspection() {
        let mut state = GameState::test_playing(1);
        state.granny.sleeping = false;
        state.granny.state = GrannyState::Checking;
        state.granny.check_timer = 50;
        state.furniture[0].is_being_checked = true;
        state.granny.body.pos = Vec2::new(320.0, 400.0);
        state
            .projectiles
            .push(dart(Vec2::new(290.0, 400.0), Vec2::new(PROJECTILE_SPEED, 0.0)));
        update_projectiles(&mut state);
        assert_eq!(state.granny.state, GrannyState::Stunned);
        assert_eq!(state.granny.check_timer, 0);
        assert!(state.furniture.iter().all(|f| !f.is_being_checked));
    }

    #[test]
    fn test_dart_passes_sleeping_granny() {
        let mut state = GameState::test_playing(1);
        state.granny.body.pos = Vec2::new(320.0, 400.0);
        state
            .projectiles
            .push(dart(Vec2::new(312.0, 400.0), Vec2::new(PROJECTILE_SPEED, 0.0)));
        update_projectiles(&mut state);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.granny.state, GrannyState::Wandering);
    }

    #[test]
    fn test_trap_springs_once() {
        let mut state = GameState::test_playing(1);
        state.player.body.pos = Vec2::new(300.0, 400.0);
        state.traps.push(trap(Vec2::new(310.0, 400.0)));

        update_traps(&mut state);
        assert!(!state.traps[0].active);
        assert_eq!(state.player.trap_timer, TRAP_STUN_TICKS);
        assert_eq!(state.player.stamina, MAX_STAMINA - TRAP_STAMINA_PENALTY);
        assert_eq!(state.noise.level, 1.0);
        assert_eq!(state.noise.scent, Some(Vec2::new(300.0, 400.0)));
        assert_eq!(state.screen_shake, SHAKE_TRAP);
    }

    #[test]
    fn test_trapped_player_stays_noisy() {
        let mut state = GameState::test_playing(1);
        state.player.trap_timer = 2;
        state.noise.level = 0.1;
        update_traps(&mut state);
        assert_eq!(state.player.trap_timer, 1);
        assert_eq!(state.noise.level, TRAP_NOISE_FLOOR);
        update_traps(&mut state);
        update_traps(&mut state);
        assert_eq!(state.player.trap_timer, 0);
    }

    #[test]
    fn test_trap_penalty_floors_stamina() {
        let mut state = GameState::test_playing(1);
        state.player.stamina = 10.0;
        state.player.body.pos = Vec2::new(300.0, 400.0);
        state.traps.push(trap(Vec2::new(300.0, 405.0)));
        update_traps(&mut state);
        assert_eq!(state.player.stamina, 0.0);
    }

    #[test]
    fn test_distant_trap_is_ignored() {
        let mut state = GameState::test_playing(1);
        state.player.body.pos = Vec2::new(300.0, 400.0);
        state.traps.push(trap(Vec2::new(320.0, 400.0)));
        update_traps(&mut state);
        assert!(state.traps[0].active);
        assert_eq!(state.player.trap_timer, 0);
    }
}
