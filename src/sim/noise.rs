//! Noise and fear
//!
//! Noise is a single 0-1 level that decays every tick and is raised (never
//! summed) by the loudest thing that happened. Every noise leaves a scent at
//! the spot it came from, which Granny will go and investigate.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{FEAR_RANGE, NOISE_DECAY};

/// Things that make noise, with their instantaneous loudness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoiseSource {
    Sprint,
    CreakyFloor,
    VaseBreak,
    Jump,
    Gunshot,
    Trap,
    Radio,
}

impl NoiseSource {
    pub fn level(self) -> f32 {
        match self {
            NoiseSource::Sprint => 0.4,
            NoiseSource::CreakyFloor => 0.6,
            NoiseSource::Jump => 0.8,
            NoiseSource::VaseBreak
            | NoiseSource::Gunshot
            | NoiseSource::Trap
            | NoiseSource::Radio => 1.0,
        }
    }
}

/// Current loudness plus the last place a noise came from
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Noise {
    pub level: f32,
    /// Last noise position (Granny's scent trail)
    pub scent: Option<Vec2>,
}

impl Noise {
    /// Fade toward silence by the fixed per-tick amount
    pub fn decay(&mut self) {
        self.level = (self.level - NOISE_DECAY).max(0.0);
    }

    /// Record a noise event at `at`
    pub fn emit(&mut self, source: NoiseSource, at: Vec2) {
        self.raise(source.level());
        self.scent = Some(at);
        log::debug!("Noise {:?} at ({:.0}, {:.0})", source, at.x, at.y);
    }

    /// Keep the level at or above `floor` without touching the scent
    pub fn raise(&mut self, floor: f32) {
        self.level = self.level.max(floor).clamp(0.0, 1.0);
    }

    pub fn clear_scent(&mut self) {
        self.scent = None;
    }
}

/// Dread from proximity alone: 1 when touching, 0 from `FEAR_RANGE` out
pub fn fear_level(player: Vec2, granny: Vec2) -> f32 {
    (1.0 - player.distance(granny) / FEAR_RANGE).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_emit_is_max_not_sum() {
        let mut noise = Noise::default();
        noise.emit(NoiseSource::Sprint, Vec2::new(1.0, 2.0));
        noise.emit(NoiseSource::CreakyFloor, Vec2::new(3.0, 4.0));
        assert!((noise.level - 0.6).abs() < 1e-6);
        noise.emit(NoiseSource::Sprint, Vec2::new(5.0, 6.0));
        assert!((noise.level - 0.6).abs() < 1e-6);
        assert_eq!(noise.scent, Some(Vec2::new(5.0, 6.0)));
    }

    #[test]
    fn test_raise_keeps_scent() {
        let mut noise = Noise::default();
        noise.raise(0.5);
        assert_eq!(noise.level, 0.5);
        assert!(noise.scent.is_none());
    }

    #[test]
    fn test_fear_level() {
        let p = Vec2::new(0.0, 0.0);
        assert_eq!(fear_level(p, p), 1.0);
        assert!((fear_level(p, Vec2::new(175.0, 0.0)) - 0.5).abs() < 1e-6);
        assert_eq!(fear_level(p, Vec2::new(500.0, 0.0)), 0.0);
    }

    proptest! {
        #[test]
        fn prop_decay_is_exact_and_bounded(start in 0.0f32..=1.0, ticks in 0usize..200) {
            let mut noise = Noise { level: start, scent: None };
            for i in 0..ticks {
                let before = noise.level;
                noise.decay();
                prop_assert!(noise.level >= 0.0 && noise.level <= 1.0);
                let expected = (before - NOISE_DECAY).max(0.0);
                prop_assert_eq!(noise.level, expected, "tick {}", i);
            }
        }

        #[test]
        fn prop_level_stays_in_unit_range(sources in proptest::collection::vec(0usize..7, 0..50)) {
            let all = [
                NoiseSource::Sprint,
                NoiseSource::CreakyFloor,
                NoiseSource::VaseBreak,
                NoiseSource::Jump,
                NoiseSource::Gunshot,
                NoiseSource::Trap,
                NoiseSource::Radio,
            ];
            let mut noise = Noise::default();
            for s in sources {
                noise.emit(all[s], Vec2::ZERO);
                noise.decay();
                prop_assert!(noise.level >= 0.0 && noise.level <= 1.0);
            }
        }
    }
}
