//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (owned by `GameState`)
//! - Stable iteration order (furniture by index, traps and darts by insertion)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod geometry;
pub mod granny;
pub mod hazards;
pub mod noise;
pub mod player;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod timers;

pub use geometry::{Rect, circle_rect_overlap, intersects, slide};
pub use noise::{Noise, NoiseSource, fear_level};
pub use snapshot::Snapshot;
pub use state::{
    Body, Furniture, FurnitureKind, GameEvent, GameState, GameStatus, Granny, GrannyState, Item,
    ItemKind, Player, Projectile, Trap,
};
pub use tick::{TickInput, tick};
pub use timers::{DeferredAction, DeferredQueue};
