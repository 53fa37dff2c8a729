//! Read-only view of the state for rendering, HUD and tooling

use glam::Vec2;
use serde::Serialize;

use super::geometry::Rect;
use super::state::{FurnitureKind, GameState, GameStatus, GrannyState, ItemKind};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub facing: f32,
    pub radius: f32,
    pub jump_height: f32,
    pub walk_cycle: f32,
    pub is_hiding: bool,
    pub is_peeking: bool,
    pub is_trapped: bool,
    pub stamina: f32,
    pub ammo: u32,
    pub has_weapon: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GrannyView {
    pub pos: Vec2,
    pub facing: f32,
    pub radius: f32,
    pub state: GrannyState,
    pub sleeping: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FurnitureView {
    pub rect: Rect,
    pub kind: FurnitureKind,
    pub is_broken: bool,
    pub is_being_checked: bool,
    pub is_distracting: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    pub id: String,
    pub pos: Vec2,
    pub kind: ItemKind,
}

/// Everything presentation needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub status: GameStatus,
    pub day: u32,
    pub game_time: f32,
    pub clock: String,
    pub player: PlayerView,
    pub granny: GrannyView,
    pub score: u64,
    pub high_score: u64,
    pub inventory: Vec<String>,
    pub inventory_count: usize,
    pub fear_level: f32,
    pub noise_level: f32,
    pub screen_shake: f32,
    pub hide_prompt: bool,
    pub interact_prompt: bool,
    pub exit_ready: bool,
    pub furniture: Vec<FurnitureView>,
    /// Items still lying around
    pub items: Vec<ItemView>,
    /// Armed traps
    pub traps: Vec<Vec2>,
    /// Darts in flight
    pub projectiles: Vec<Vec2>,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        let p = &self.player;
        let g = &self.granny;
        Snapshot {
            status: self.status,
            day: self.day,
            game_time: self.game_time(),
            clock: self.game_time_str(),
            player: PlayerView {
                pos: p.body.pos,
                facing: p.body.facing,
                radius: p.body.radius,
                jump_height: p.jump_height,
                walk_cycle: p.walk_cycle,
                is_hiding: p.is_hiding,
                is_peeking: p.is_peeking,
                is_trapped: p.is_trapped(),
                stamina: p.stamina,
                ammo: p.ammo,
                has_weapon: p.has_weapon,
            },
            granny: GrannyView {
                pos: g.body.pos,
                facing: g.body.facing,
                radius: g.body.radius,
                state: g.state,
                sleeping: g.sleeping,
            },
            score: self.score,
            high_score: self.high_score,
            inventory: self.inventory.clone(),
            inventory_count: self.inventory.len(),
            fear_level: self.fear_level,
            noise_level: self.noise.level,
            screen_shake: self.screen_shake,
            hide_prompt: self.hide_prompt,
            interact_prompt: self.interact_prompt.is_some(),
            exit_ready: self.is_exit_ready(),
            furniture: self
                .furniture
                .iter()
                .map(|f| FurnitureView {
                    rect: f.rect,
                    kind: f.kind,
                    is_broken: f.is_broken,
                    is_being_checked: f.is_being_checked,
                    is_distracting: f.is_distracting,
                })
                .collect(),
            items: self
                .items
                .iter()
                .filter(|i| !i.collected)
                .map(|i| ItemView {
                    id: i.id.clone(),
                    pos: i.pos,
                    kind: i.kind,
                })
                .collect(),
            traps: self.traps.iter().filter(|t| t.active).map(|t| t.pos).collect(),
            projectiles: self.projectiles.iter().map(|p| p.pos).collect(),
        }
    }
}
