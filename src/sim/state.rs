//! Game state and core simulation types
//!
//! One `GameState` owns everything a run needs. It is re-initialised at the
//! start of every run and every new day, and mutated only by `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{self, Rect};
use super::noise::Noise;
use super::timers::{DeferredAction, DeferredQueue};
use crate::consts::*;
use crate::level::Level;
use crate::settings::Settings;

/// Overall status of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No run in progress
    Menu,
    /// Active gameplay
    Playing,
    /// Gameplay frozen by the player
    Paused,
    /// Caught before the final day; the next day starts shortly
    Cutscene,
    /// Caught on the final day, run over
    Caught,
    /// Made it out the front door
    Escaped,
}

/// Granny's behaviour state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrannyState {
    /// Walking the routine between waypoints
    Wandering,
    /// Busy at a routine stop, may set traps
    Working,
    /// Running at the player's live position
    Chasing,
    /// Heading for the last heard noise
    Searching,
    /// Inspecting a hiding spot
    Checking,
    /// Knocked out by a dart
    Stunned,
}

impl GrannyState {
    /// States in which Granny walks toward a target this tick
    pub fn is_mobile(self) -> bool {
        match self {
            GrannyState::Wandering | GrannyState::Chasing | GrannyState::Searching => true,
            GrannyState::Working | GrannyState::Checking | GrannyState::Stunned => false,
        }
    }
}

/// Furniture categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FurnitureKind {
    Bed,
    Table,
    Wardrobe,
    Vase,
    CreakyFloor,
    Stove,
    Radio,
}

impl FurnitureKind {
    /// Whether bodies are blocked by this piece
    pub fn is_solid(self) -> bool {
        match self {
            FurnitureKind::Bed | FurnitureKind::Table | FurnitureKind::Wardrobe => true,
            FurnitureKind::Vase
            | FurnitureKind::CreakyFloor
            | FurnitureKind::Stove
            | FurnitureKind::Radio => false,
        }
    }
}

/// A piece of furniture; flags flip during play but the piece never goes away
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Furniture {
    pub rect: Rect,
    pub kind: FurnitureKind,
    pub can_hide: bool,
    pub is_broken: bool,
    pub is_being_checked: bool,
    pub is_distracting: bool,
}

impl Furniture {
    pub fn new(rect: Rect, kind: FurnitureKind, can_hide: bool) -> Self {
        Self {
            rect,
            kind,
            can_hide,
            is_broken: false,
            is_being_checked: false,
            is_distracting: false,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }
}

/// Collectible item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Key,
    Hammer,
    Fuse,
    Crowbar,
    Weapon,
    Ammo,
    Trap,
}

/// A collectible; `collected` flips once and the item stays listed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub pos: Vec2,
    pub kind: ItemKind,
    pub collected: bool,
}

impl Item {
    pub fn new(id: &str, name: &str, pos: Vec2, kind: ItemKind) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            pos,
            kind,
            collected: false,
        }
    }
}

/// A floor trap
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Trap {
    pub pos: Vec2,
    pub active: bool,
    pub set_by_granny: bool,
}

/// A tranquilliser dart in flight
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub active: bool,
}

/// A circular body in the house
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub radius: f32,
    /// Facing angle in radians
    pub facing: f32,
    /// Base speed in units per tick
    pub speed: f32,
}

impl Body {
    pub fn new(pos: Vec2, radius: f32, speed: f32) -> Self {
        Self {
            pos,
            radius,
            facing: 0.0,
            speed,
        }
    }

    #[inline]
    pub fn distance_to(&self, other: &Body) -> f32 {
        self.pos.distance(other.pos)
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub is_jumping: bool,
    /// Ticks until another jump may start
    pub jump_cooldown: u32,
    /// Visual height of the current jump
    pub jump_height: f32,
    pub is_hiding: bool,
    pub is_peeking: bool,
    /// Granny watched the player slip into the current hiding spot
    pub was_seen_hiding: bool,
    /// Where the player stood before hiding; restored on the way out
    pub hide_from: Vec2,
    pub stamina: f32,
    pub ammo: u32,
    pub has_weapon: bool,
    /// Ticks left stuck in a sprung trap
    pub trap_timer: u32,
    /// Walk animation phase
    pub walk_cycle: f32,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            body: Body::new(spawn, PLAYER_RADIUS, PLAYER_SPEED),
            is_jumping: false,
            jump_cooldown: 0,
            jump_height: 0.0,
            is_hiding: false,
            is_peeking: false,
            was_seen_hiding: false,
            hide_from: spawn,
            stamina: MAX_STAMINA,
            ammo: 0,
            has_weapon: false,
            trap_timer: 0,
            walk_cycle: 0.0,
        }
    }

    #[inline]
    pub fn is_trapped(&self) -> bool {
        self.trap_timer > 0
    }
}

/// The antagonist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Granny {
    pub body: Body,
    pub state: GrannyState,
    pub sleeping: bool,
    /// Index into the level's routine waypoints (wrapped on use)
    pub target_node: usize,
    pub work_timer: u32,
    pub check_timer: u32,
    pub stun_timer: u32,
}

impl Granny {
    pub fn new(spawn: Vec2, speed: f32, sleeping: bool) -> Self {
        Self {
            body: Body::new(spawn, GRANNY_RADIUS, speed),
            state: GrannyState::Wandering,
            sleeping,
            target_node: 0,
            work_timer: 0,
            check_timer: 0,
            stun_timer: 0,
        }
    }

    /// Awake and not knocked out
    #[inline]
    pub fn is_alert(&self) -> bool {
        !self.sleeping && self.state != GrannyState::Stunned
    }
}

/// Things that happened during a tick, for audio/UI/persistence collaborators
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    GrannyWoke,
    ItemCollected { id: String },
    Hid { seen: bool },
    RadioUsed { furniture: usize },
    VaseBroken { furniture: usize },
    ShotFired,
    GrannyStunned,
    TrapDropped { pos: Vec2 },
    TrapTriggered { pos: Vec2 },
    Caught { day: u32 },
    DayStarted { day: u32 },
    Escaped { score: u64 },
    NewHighScore { score: u64 },
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Random source for trap drops, work durations and spot checks
    pub rng: Pcg32,
    pub settings: Settings,
    /// Static geometry and spawn data
    pub level: Level,
    pub status: GameStatus,
    /// Bumped whenever a run or day starts or is abandoned
    pub run_id: u32,
    pub day: u32,
    /// Ticks processed while playing or in a cutscene
    pub time_ticks: u64,
    /// Game clock ticks since the day started
    pub clock_ticks: u64,
    pub player: Player,
    pub granny: Granny,
    /// Furniture arena, addressed by index
    pub furniture: Vec<Furniture>,
    pub items: Vec<Item>,
    pub traps: Vec<Trap>,
    pub projectiles: Vec<Projectile>,
    pub noise: Noise,
    /// Presentation-only proximity dread (0-1)
    pub fear_level: f32,
    pub score: u64,
    pub high_score: u64,
    /// Ids of collected escape items
    pub inventory: Vec<String>,
    /// Screen shake intensity (decays 1 per tick)
    pub screen_shake: f32,
    /// Player is next to a hiding spot
    pub hide_prompt: bool,
    /// Radio the player can switch on
    pub interact_prompt: Option<usize>,
    pub deferred: DeferredQueue,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state on the title menu
    pub fn new(seed: u64, settings: Settings) -> Self {
        Self::with_level(seed, settings, Level::house())
    }

    /// Create a new game state for a custom level
    pub fn with_level(seed: u64, settings: Settings, level: Level) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            settings,
            player: Player::new(level.player_spawn),
            granny: Granny::new(level.granny_spawn, GRANNY_BASE_SPEED, true),
            furniture: level.furniture.clone(),
            items: level.items.clone(),
            level,
            status: GameStatus::Menu,
            run_id: 0,
            day: 1,
            time_ticks: 0,
            clock_ticks: 0,
            traps: Vec::new(),
            projectiles: Vec::new(),
            noise: Noise::default(),
            fear_level: 0.0,
            score: 0,
            high_score: 0,
            inventory: Vec::new(),
            screen_shake: 0.0,
            hide_prompt: false,
            interact_prompt: None,
            deferred: DeferredQueue::default(),
            events: Vec::new(),
        }
    }

    /// Start a fresh run on day 1
    pub fn start_run(&mut self) {
        self.items = self.level.items.clone();
        self.furniture = self.level.furniture.clone();
        self.inventory.clear();
        self.score = 0;
        self.player = Player::new(self.level.player_spawn);
        self.begin_day(1);
        log::info!("New run started (seed {})", self.seed);
    }

    /// Restart the house on the next day, keeping items, inventory, score and gear
    pub fn advance_day(&mut self) {
        let (ammo, has_weapon) = (self.player.ammo, self.player.has_weapon);
        self.player = Player::new(self.level.player_spawn);
        self.player.ammo = ammo;
        self.player.has_weapon = has_weapon;
        self.begin_day(self.day + 1);
    }

    /// Abandon the run; pending deferred work for it becomes stale
    pub fn return_to_menu(&mut self) {
        self.run_id = self.run_id.wrapping_add(1);
        self.status = GameStatus::Menu;
        log::info!("Returned to menu on day {}", self.day);
    }

    fn begin_day(&mut self, day: u32) {
        self.run_id = self.run_id.wrapping_add(1);
        self.day = day;
        let speed = (GRANNY_BASE_SPEED + day as f32 * GRANNY_SPEED_PER_DAY)
            * self.settings.difficulty.day_speed_scale();
        // Granny only sleeps in on the first morning
        self.granny = Granny::new(self.level.granny_spawn, speed, day == 1);
        for f in &mut self.furniture {
            f.is_being_checked = false;
            f.is_distracting = false;
        }
        self.traps.clear();
        self.projectiles.clear();
        self.noise = Noise::default();
        self.fear_level = 0.0;
        self.clock_ticks = 0;
        self.screen_shake = 0.0;
        self.hide_prompt = false;
        self.interact_prompt = None;
        self.status = GameStatus::Playing;
        self.events.push(GameEvent::DayStarted { day });
        log::info!("Day {} begins", day);
    }

    /// Minutes since midnight on the in-game clock
    pub fn game_time(&self) -> f32 {
        CLOCK_START_MINUTES + self.clock_ticks as f32 / TICKS_PER_GAME_MINUTE as f32
    }

    /// Clock formatted as `hh:mm AM`
    pub fn game_time_str(&self) -> String {
        let t = self.game_time();
        let hours = (t / 60.0).floor() as u32 % 24;
        let mins = (t % 60.0).floor() as u32;
        let display = if hours % 12 == 0 { 12 } else { hours % 12 };
        let meridiem = if hours >= 12 { "PM" } else { "AM" };
        format!("{:02}:{:02} {}", display, mins, meridiem)
    }

    /// Enough escape items collected to open the front door
    pub fn is_exit_ready(&self) -> bool {
        self.inventory.len() >= ITEMS_TO_ESCAPE
    }

    /// Queue a deferred action for the current run
    pub fn schedule(&mut self, delay: u64, action: DeferredAction) {
        self.deferred
            .schedule(self.time_ticks + delay, self.run_id, action);
    }

    /// Raise screen shake to at least `amount`
    pub fn shake(&mut self, amount: f32) {
        self.screen_shake = self.screen_shake.max(amount);
    }

    /// Granny got the player; before the final day the house restarts
    pub fn capture(&mut self) {
        self.shake(SHAKE_CAPTURE);
        self.events.push(GameEvent::Caught { day: self.day });
        if self.day < FINAL_DAY {
            log::info!("Caught on day {}, waking up again", self.day);
            self.status = GameStatus::Cutscene;
            self.schedule(CUTSCENE_TICKS, DeferredAction::AdvanceDay);
        } else {
            log::info!("Caught on day {}, run over (score {})", self.day, self.score);
            self.status = GameStatus::Caught;
        }
    }
}

#[cfg(test)]
impl GameState {
    /// Default-settings state already playing day 1
    pub(crate) fn test_playing(seed: u64) -> Self {
        let mut state = Self::new(seed, Settings::default());
        state.start_run();
        state
    }
}

/// Walls plus solid furniture, as seen by the player and darts
pub fn player_blocked(walls: &[Rect], furniture: &[Furniture], p: Vec2, radius: f32) -> bool {
    let solid = furniture
        .iter()
        .filter(|f| f.kind.is_solid())
        .map(|f| &f.rect);
    geometry::intersects(p, radius, walls.iter().chain(solid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_on_menu() {
        let state = GameState::new(1, Settings::default());
        assert_eq!(state.status, GameStatus::Menu);
        assert_eq!(state.items.len(), state.level.items.len());
        assert!(state.granny.sleeping);
    }

    #[test]
    fn test_clock_string() {
        let mut state = GameState::new(1, Settings::default());
        assert_eq!(state.game_time_str(), "05:00 AM");
        // 12:30 PM is 450 minutes past the start
        state.clock_ticks = 450 * TICKS_PER_GAME_MINUTE;
        assert_eq!(state.game_time_str(), "12:30 PM");
        // Past midnight wraps to 12 AM
        state.clock_ticks = (24 * 60 + 5 - 300) * TICKS_PER_GAME_MINUTE;
        assert_eq!(state.game_time_str(), "12:05 AM");
    }

    #[test]
    fn test_advance_day_keeps_progress() {
        let mut state = GameState::new(7, Settings::default());
        state.start_run();
        state.items[0].collected = true;
        state.inventory.push(state.items[0].id.clone());
        state.score = 500;
        state.player.ammo = 2;
        state.player.has_weapon = true;
        state.player.stamina = 3.0;
        let run = state.run_id;

        state.advance_day();
        assert_eq!(state.day, 2);
        assert_eq!(state.score, 500);
        assert_eq!(state.inventory.len(), 1);
        assert!(state.items[0].collected);
        assert_eq!(state.player.ammo, 2);
        assert!(state.player.has_weapon);
        assert_eq!(state.player.stamina, MAX_STAMINA);
        assert!(!state.granny.sleeping);
        assert!(state.granny.body.speed > GRANNY_BASE_SPEED);
        assert_ne!(state.run_id, run);
    }

    #[test]
    fn test_start_run_resets_progress() {
        let mut state = GameState::new(7, Settings::default());
        state.start_run();
        state.score = 900;
        state.inventory.push("key_1".into());
        state.player.has_weapon = true;
        state.day = 4;
        state.start_run();
        assert_eq!(state.day, 1);
        assert_eq!(state.score, 0);
        assert!(state.inventory.is_empty());
        assert!(!state.player.has_weapon);
        assert!(state.granny.sleeping);
    }

    #[test]
    fn test_capture_before_final_day_is_cutscene() {
        let mut state = GameState::new(3, Settings::default());
        state.start_run();
        state.capture();
        assert_eq!(state.status, GameStatus::Cutscene);
        assert_eq!(state.deferred.len(), 1);

        state.day = FINAL_DAY;
        state.status = GameStatus::Playing;
        state.capture();
        assert_eq!(state.status, GameStatus::Caught);
    }

    #[test]
    fn test_day_speed_scales_with_difficulty() {
        use crate::settings::Difficulty;

        let speed_on = |difficulty: Difficulty, days: u32| {
            let mut state = GameState::new(
                9,
                Settings {
                    difficulty,
                    ..Default::default()
                },
            );
            state.start_run();
            for _ in 1..days {
                state.advance_day();
            }
            state.granny.body.speed
        };

        let day_one = GRANNY_BASE_SPEED + GRANNY_SPEED_PER_DAY;
        let day_two = GRANNY_BASE_SPEED + 2.0 * GRANNY_SPEED_PER_DAY;
        assert!((speed_on(Difficulty::Normal, 1) - day_one).abs() < 1e-5);
        assert!((speed_on(Difficulty::Easy, 1) - day_one * 0.75).abs() < 1e-5);
        assert!((speed_on(Difficulty::Extreme, 1) - day_one * 1.4).abs() < 1e-5);
        assert!((speed_on(Difficulty::Extreme, 2) - day_two * 1.4).abs() < 1e-5);
    }

    #[test]
    fn test_furniture_solidity() {
        assert!(FurnitureKind::Bed.is_solid());
        assert!(FurnitureKind::Table.is_solid());
        assert!(!FurnitureKind::Vase.is_solid());
        assert!(!FurnitureKind::Radio.is_solid());
        assert!(!FurnitureKind::Stove.is_solid());
        assert!(!FurnitureKind::CreakyFloor.is_solid());
    }
}
