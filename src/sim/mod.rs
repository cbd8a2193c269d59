//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick rate only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod hooks;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, coin_hits, obstacle_hits};
pub use hooks::{GameEvent, GameHooks, Intent, NoHooks};
pub use physics::{jump, update_player};
pub use spawn::{SpawnDecision, SpawnPolicy, SpawnTimer, Spawner, speed_for_score};
pub use state::{Arena, Coin, GamePhase, GameState, Obstacle, Player};
pub use tick::{apply_intent, request_jump, restart, start, step};
