//! Game state and core simulation types
//!
//! Everything a session mutates lives in `GameState`; nothing is shared.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn::Spawner;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start intent
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for the restart intent
    Over,
}

/// Play area reported by the host (CSS pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Top of the ground strip
    pub fn ground_y(&self) -> f32 {
        self.height - GROUND_HEIGHT
    }

    /// Spawn edge for new entities
    pub fn right_edge(&self) -> f32 {
        self.width
    }

    /// True when there is no room to play (zero-sized or collapsed canvas)
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.ground_y() > 0.0)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; x never changes
    pub pos: Vec2,
    pub size: Vec2,
    pub velocity_y: f32,
    pub gravity: f32,
    /// Negative is upward
    pub jump_power: f32,
    pub on_ground: bool,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, 0.0),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            velocity_y: 0.0,
            gravity: tuning.gravity,
            jump_power: tuning.jump_power,
            on_ground: false,
        }
    }

    /// Put the player back on the ground at rest; constants are kept
    pub fn reset(&mut self, ground_y: f32) {
        self.pos = Vec2::new(PLAYER_X, ground_y - self.size.y);
        self.velocity_y = 0.0;
        self.on_ground = true;
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Ground-standing hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Obstacle {
    pub fn advance(&mut self) {
        self.pos.x -= self.speed;
    }

    /// Fully past the left edge
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// Floating pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    /// Center
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub collected: bool,
}

impl Coin {
    pub fn advance(&mut self) {
        self.pos.x -= self.speed;
    }

    /// Fully past the left edge
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.radius < 0.0
    }

    /// Mark the coin as taken. A coin is collected at most once.
    pub fn collect(&mut self) {
        debug_assert!(!self.collected, "coin {} collected twice", self.id);
        self.collected = true;
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn RNG, seeded from `seed`. Resets keep its stream; only `reseed`
    /// replaces it.
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub arena: Arena,
    pub phase: GamePhase,
    /// Live score, reset to 0 on start/restart
    pub score: u32,
    /// Score snapshot taken on the transition to Over
    pub final_score: Option<u32>,
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Live coins in spawn order
    pub coins: Vec<Coin>,
    pub spawner: Spawner,
    /// Decorative background scroll, one unit per tick
    pub cloud_offset: u64,
    /// Simulation tick counter for the current session
    pub time_ticks: u64,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create an idle session with default tuning
    pub fn new(seed: u64, arena: Arena) -> Self {
        Self::with_tuning(seed, arena, Tuning::default())
    }

    pub fn with_tuning(seed: u64, arena: Arena, tuning: Tuning) -> Self {
        let mut player = Player::new(&tuning);
        player.reset(arena.ground_y());
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            spawner: Spawner::new(&tuning, 0.0),
            tuning,
            arena,
            phase: GamePhase::Idle,
            score: 0,
            final_score: None,
            player,
            obstacles: Vec::new(),
            coins: Vec::new(),
            cloud_offset: 0,
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Host canvas changed size. A grounded player follows the new ground.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.arena = Arena::new(width, height);
        let ground_y = self.arena.ground_y();
        if self.player.on_ground || self.player.bottom() > ground_y {
            self.player.pos.y = ground_y - self.player.size.y;
            self.player.velocity_y = 0.0;
            self.player.on_ground = true;
        }
    }

    /// Fresh session at time `now`: score, entities, player and spawn timers
    pub fn reset(&mut self, now: f64) {
        self.score = 0;
        self.final_score = None;
        self.obstacles.clear();
        self.coins.clear();
        self.player.reset(self.arena.ground_y());
        self.spawner = Spawner::new(&self.tuning, now);
        self.cloud_offset = 0;
        self.time_ticks = 0;
    }

    /// Reseed for a new run so each session is reproducible on its own
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
    }
}
