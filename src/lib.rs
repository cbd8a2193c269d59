//! Coin Runner - a one-button endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, lifecycle)
//! - `tuning`: Data-driven game balance
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Frame clock and browser glue
//! - `audio`: Procedural Web Audio cues (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// Distances are in CSS pixels, velocities in pixels per tick.
pub mod consts {
    /// Simulation tick rate
    pub const SIM_HZ: f64 = 60.0;
    /// Fixed simulation timestep in milliseconds
    pub const SIM_DT_MS: f64 = 1000.0 / SIM_HZ;
    /// Maximum ticks per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta the clock will accept (tab switches, breakpoints)
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Height of the ground strip at the bottom of the play area
    pub const GROUND_HEIGHT: f32 = 100.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 80.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const GRAVITY: f32 = 0.6;
    /// Negative is upward
    pub const JUMP_POWER: f32 = -14.0;

    /// Obstacle size ranges (min, max)
    pub const OBSTACLE_WIDTH: (f32, f32) = (30.0, 55.0);
    pub const OBSTACLE_HEIGHT: (f32, f32) = (40.0, 80.0);
    /// Horizontal space the newest obstacle must clear before another spawns
    pub const MIN_OBSTACLE_GAP: f32 = 250.0;

    /// Coin defaults
    pub const COIN_RADIUS: f32 = 15.0;
    /// Coins float at least this far above the ground
    pub const COIN_LIFT: f32 = 100.0;
    /// Extra random height on top of `COIN_LIFT`
    pub const COIN_EXTRA_HEIGHT: f32 = 150.0;
    pub const COIN_VALUE: u32 = 10;
    /// Largest `coin_value` a tuning table may set
    pub const MAX_COIN_VALUE: u32 = 1_000_000;
    /// Pickup leniency added to the coin radius. Deliberately independent of
    /// the player's size.
    pub const COIN_PICKUP_MARGIN: f32 = 20.0;

    /// Scroll speed ramp: BASE_SPEED + min(score * SPEED_PER_POINT, MAX_SPEED_BONUS)
    pub const BASE_SPEED: f32 = 4.0;
    pub const SPEED_PER_POINT: f32 = 0.03;
    pub const MAX_SPEED_BONUS: f32 = 6.0;

    /// Timed spawn policy (milliseconds)
    pub const OBSTACLE_FIRST_INTERVAL_MS: f64 = 1500.0;
    pub const OBSTACLE_INTERVAL_MS: (f64, f64) = (1300.0, 2500.0);
    pub const COIN_FIRST_INTERVAL_MS: f64 = 1200.0;
    pub const COIN_INTERVAL_MS: (f64, f64) = (1000.0, 2500.0);
    /// Chance a due coin actually appears
    pub const COIN_SPAWN_CHANCE: f64 = 0.7;

    /// Per-tick spawn policy
    pub const OBSTACLE_TICK_CHANCE: f64 = 0.02;
    pub const COIN_TICK_CHANCE: f64 = 0.015;
}
