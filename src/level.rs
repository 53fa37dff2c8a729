//! The house
//!
//! Static layout loaded once per run: outer walls and room dividers, the
//! furniture arena template, Granny's routine, the exit and item placements.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::geometry::Rect;
use crate::sim::state::{Furniture, FurnitureKind, Item, ItemKind};

/// Static level data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub width: f32,
    pub height: f32,
    /// Always-solid walls
    pub walls: Vec<Rect>,
    /// Furniture template; each run works on its own copy
    pub furniture: Vec<Furniture>,
    /// Granny's cyclic patrol route
    pub routine: Vec<Vec2>,
    pub exit_door: Rect,
    pub player_spawn: Vec2,
    pub granny_spawn: Vec2,
    pub items: Vec<Item>,
}

impl Level {
    /// The house everything takes place in
    pub fn house() -> Self {
        use FurnitureKind::*;

        let walls = vec![
            Rect::new(0.0, 0.0, 800.0, 25.0),
            Rect::new(0.0, 575.0, 800.0, 25.0),
            Rect::new(0.0, 0.0, 25.0, 600.0),
            Rect::new(775.0, 0.0, 25.0, 600.0),
            // Bedroom
            Rect::new(25.0, 250.0, 200.0, 20.0),
            // Hallway, split by the doorway at y 225..320
            Rect::new(400.0, 25.0, 20.0, 200.0),
            Rect::new(400.0, 320.0, 20.0, 255.0),
            // Kitchen
            Rect::new(550.0, 250.0, 225.0, 20.0),
        ];

        let furniture = vec![
            Furniture::new(Rect::new(50.0, 50.0, 60.0, 100.0), Bed, true),
            Furniture::new(Rect::new(450.0, 40.0, 40.0, 80.0), Wardrobe, true),
            Furniture::new(Rect::new(40.0, 450.0, 80.0, 110.0), Bed, true),
            // Granny cooks here
            Furniture::new(Rect::new(650.0, 40.0, 80.0, 60.0), Stove, false),
            Furniture::new(Rect::new(100.0, 300.0, 40.0, 40.0), Radio, false),
            Furniture::new(Rect::new(550.0, 450.0, 100.0, 60.0), Table, false),
            Furniture::new(Rect::new(450.0, 350.0, 20.0, 20.0), Vase, false),
            Furniture::new(Rect::new(150.0, 200.0, 100.0, 30.0), CreakyFloor, false),
        ];

        let routine = vec![
            Vec2::new(100.0, 100.0), // bedroom
            Vec2::new(680.0, 100.0), // stove
            Vec2::new(600.0, 450.0), // dining
            Vec2::new(100.0, 500.0), // storage
        ];

        let items = vec![
            Item::new("key_1", "Master Key", Vec2::new(710.0, 70.0), ItemKind::Key),
            Item::new("hammer", "Hammer", Vec2::new(340.0, 500.0), ItemKind::Hammer),
            // Beside the storage bed, not under it
            Item::new("fuse", "Fuse", Vec2::new(140.0, 520.0), ItemKind::Fuse),
            Item::new("tranq_gun", "Tranq Gun", Vec2::new(600.0, 50.0), ItemKind::Weapon),
            Item::new("dart_1", "Dart", Vec2::new(200.0, 400.0), ItemKind::Ammo),
        ];

        Self {
            width: 800.0,
            height: 600.0,
            walls,
            furniture,
            routine,
            exit_door: Rect::new(765.0, 240.0, 35.0, 120.0),
            player_spawn: Vec2::new(80.0, 200.0),
            granny_spawn: Vec2::new(700.0, 500.0),
            items,
        }
    }

    /// Routine waypoint for any index, wrapped around the route
    pub fn waypoint(&self, index: usize) -> Vec2 {
        if self.routine.is_empty() {
            return self.granny_spawn;
        }
        self.routine[index % self.routine.len()]
    }

    /// True if `p` is outside the house rectangle
    pub fn out_of_bounds(&self, p: Vec2) -> bool {
        p.x < 0.0 || p.y < 0.0 || p.x > self.width || p.y > self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GRANNY_RADIUS, PLAYER_RADIUS};
    use crate::sim::geometry::intersects;

    #[test]
    fn test_waypoint_wraps() {
        let level = Level::house();
        assert_eq!(level.waypoint(0), level.waypoint(4));
        assert_eq!(level.waypoint(5), Vec2::new(680.0, 100.0));
    }

    #[test]
    fn test_empty_routine_falls_back_to_spawn() {
        let mut level = Level::house();
        level.routine.clear();
        assert_eq!(level.waypoint(3), level.granny_spawn);
    }

    #[test]
    fn test_spawns_are_clear_of_walls() {
        let level = Level::house();
        assert!(!intersects(level.player_spawn, PLAYER_RADIUS, &level.walls));
        assert!(!intersects(level.granny_spawn, GRANNY_RADIUS, &level.walls));
    }

    #[test]
    fn test_escape_items_are_reachable() {
        use crate::consts::{ITEMS_TO_ESCAPE, PICKUP_RANGE};
        use crate::sim::state::player_blocked;

        let level = Level::house();
        let escape_items: Vec<_> = level
            .items
            .iter()
            .filter(|i| !matches!(i.kind, ItemKind::Weapon | ItemKind::Ammo))
            .collect();
        assert!(escape_items.len() >= ITEMS_TO_ESCAPE);

        // Some legal player centre must be within pickup range of every item
        for item in level.items.iter() {
            let reachable = (-30..=30).any(|dx| {
                (-30..=30).any(|dy| {
                    let p = item.pos + Vec2::new(dx as f32, dy as f32);
                    p.distance(item.pos) < PICKUP_RANGE
                        && !player_blocked(&level.walls, &level.furniture, p, PLAYER_RADIUS)
                })
            });
            assert!(reachable, "{} cannot be picked up", item.id);
        }
    }
}
