//! Granny Escape - a top-down stealth-horror escape game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision, antagonist AI, noise, hazards)
//! - `level`: The fixed house layout
//! - `settings`: Difficulty and player preferences
//! - `highscores`: Best-score persistence boundary
//! - `logging`: Logger setup for the headless runner

pub mod highscores;
pub mod level;
pub mod logging;
pub mod settings;
pub mod sim;

pub use highscores::{FileScoreStore, MemoryScoreStore, ScoreStore, StoreError};
pub use level::Level;
pub use settings::{Difficulty, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per real-time second (one tick per rendered frame)
    pub const TICKS_PER_SECOND: u64 = 60;

    /// Game clock: starts at 05:00 AM, advances 0.05 minutes per tick
    pub const CLOCK_START_MINUTES: f32 = 300.0;
    pub const TICKS_PER_GAME_MINUTE: u64 = 20;
    /// Granny wakes at 10:00 AM on the first day
    pub const WAKE_MINUTES: f32 = 600.0;

    /// Entity sizes
    pub const PLAYER_RADIUS: f32 = 14.0;
    pub const GRANNY_RADIUS: f32 = 18.0;
    pub const PROJECTILE_RADIUS: f32 = 4.0;

    /// Player movement (units per tick)
    pub const PLAYER_SPEED: f32 = 2.4;
    pub const PLAYER_SPRINT_SPEED: f32 = 4.0;
    pub const MOVE_DEADZONE: f32 = 0.1;
    /// Stick deflection needed to leave a hiding spot
    pub const UNHIDE_THRESHOLD: f32 = 0.5;

    /// Stamina (0-100)
    pub const MAX_STAMINA: f32 = 100.0;
    pub const SPRINT_DRAIN: f32 = 0.4;
    pub const WALK_REGEN: f32 = 0.1;
    pub const IDLE_REGEN: f32 = 0.3;

    /// Jump
    pub const JUMP_DURATION_TICKS: u32 = 60;
    pub const JUMP_PEAK_HEIGHT: f32 = 25.0;
    pub const WALK_CYCLE_STEP: f32 = 0.2;

    /// Interaction ranges
    pub const HIDE_MARGIN: f32 = 25.0;
    pub const INTERACT_RANGE: f32 = 50.0;
    pub const PICKUP_RANGE: f32 = 30.0;
    pub const CREAK_RANGE: f32 = 30.0;
    pub const VASE_RANGE: f32 = 15.0;
    pub const TRAP_RANGE: f32 = 20.0;

    /// Exit door half-extents the player must be inside to escape
    pub const EXIT_REACH_X: f32 = 30.0;
    pub const EXIT_REACH_Y: f32 = 40.0;
    /// Inventory items needed before the exit opens
    pub const ITEMS_TO_ESCAPE: usize = 3;

    /// Weapon
    pub const PROJECTILE_SPEED: f32 = 8.0;
    pub const PROJECTILE_HIT_SLACK: f32 = 5.0;

    /// Traps
    pub const TRAP_STUN_TICKS: u32 = 180;
    pub const TRAP_STAMINA_PENALTY: f32 = 40.0;
    pub const TRAP_NOISE_FLOOR: f32 = 0.5;
    pub const TRAP_DROP_INTERVAL: u32 = 300;
    pub const TRAP_DROP_CHANCE: f64 = 0.3;

    /// Noise (0-1)
    pub const NOISE_DECAY: f32 = 0.01;
    /// Fear falls off to zero at this distance from Granny
    pub const FEAR_RANGE: f32 = 350.0;

    /// Granny movement (units per tick)
    pub const GRANNY_BASE_SPEED: f32 = 1.0;
    pub const GRANNY_SPEED_PER_DAY: f32 = 0.1;
    pub const GRANNY_CHASE_SPEED: f32 = 2.3;

    /// Granny perception
    pub const SIGHT_RADIUS: f32 = 250.0;
    pub const SIGHT_RADIUS_EXTREME: f32 = 350.0;
    pub const HIDE_WITNESS_RANGE: f32 = 280.0;
    pub const HIDE_WITNESS_CONE: f32 = 1.0;

    /// Granny routine and search
    pub const WAYPOINT_REACHED: f32 = 20.0;
    pub const WORK_MIN_TICKS: u32 = 300;
    pub const WORK_MAX_TICKS: u32 = 900;
    pub const SEARCH_INSPECT_RANGE: f32 = 50.0;
    pub const SEARCH_GIVE_UP_RANGE: f32 = 30.0;
    pub const HIDING_SPOT_RANGE: f32 = 60.0;
    pub const RANDOM_CHECK_CHANCE: f64 = 0.05;
    pub const CHECK_TICKS: u32 = 120;
    pub const STUN_TICKS: u32 = 600;

    /// Balance knob: flat overlap required before a touch counts as a catch.
    pub const CAPTURE_SLACK: f32 = 5.0;
    /// Captures before this day restart the house; from it on they end the run
    pub const FINAL_DAY: u32 = 5;

    /// Deferred actions
    pub const DISTRACTION_TICKS: u64 = 5 * TICKS_PER_SECOND;
    pub const CUTSCENE_TICKS: u64 = 2 * TICKS_PER_SECOND;

    /// Score awards
    pub const ITEM_SCORE: u64 = 500;
    pub const ESCAPE_SCORE: u64 = 5000;

    /// Screen shake amounts
    pub const SHAKE_VASE: f32 = 15.0;
    pub const SHAKE_TRAP: f32 = 20.0;
    pub const SHAKE_CAPTURE: f32 = 40.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Absolute difference between two angles, in [0, π]
#[inline]
pub fn angle_between(a: f32, b: f32) -> f32 {
    normalize_angle(a - b).abs()
}

/// Bearing from `from` toward `to`; a zero-length offset faces angle 0
#[inline]
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    heading(to - from)
}

/// Angle of a direction vector; the zero vector maps to 0
#[inline]
pub fn heading(dir: Vec2) -> f32 {
    if dir == Vec2::ZERO {
        0.0
    } else {
        dir.y.atan2(dir.x)
    }
}

/// Unit vector for an angle
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_heading_zero_vector() {
        assert_eq!(heading(Vec2::ZERO), 0.0);
        assert_eq!(bearing(Vec2::new(3.0, 4.0), Vec2::new(3.0, 4.0)), 0.0);
    }

    #[test]
    fn test_angle_between_wraps() {
        // Just either side of ±π are neighbours
        let d = angle_between(PI - 0.1, -PI + 0.1);
        assert!((d - 0.2).abs() < 1e-4);
        assert!((angle_between(0.0, PI / 2.0) - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_direction_unit_length() {
        for i in 0..16 {
            let a = i as f32 * 0.4 - 3.0;
            assert!((direction(a).length() - 1.0).abs() < 1e-5);
        }
    }
}
