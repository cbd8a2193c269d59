//! Obstacle and coin spawning
//!
//! Two policies exist and a session uses exactly one of them:
//! - `TimedInterval`: randomized wall-clock intervals, re-rolled after each
//!   spawn, with a minimum gap between obstacles and a coin chance roll
//! - `PerTickProbability`: an independent roll every tick, no timers, no gap
//!
//! The random source is always passed in, so a seeded RNG reproduces a run.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Arena, Coin, Obstacle};
use crate::tuning::{Span, Tuning};

/// Rule set deciding when new entities appear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnPolicy {
    #[default]
    TimedInterval,
    PerTickProbability,
}

/// Last spawn time plus the interval that must elapse before the next one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub last_spawn_ms: f64,
    pub interval_ms: f64,
}

impl SpawnTimer {
    pub fn new(now: f64, interval_ms: f64) -> Self {
        Self {
            last_spawn_ms: now,
            interval_ms,
        }
    }

    pub fn is_due(&self, now: f64) -> bool {
        now - self.last_spawn_ms > self.interval_ms
    }

    /// Restart the timer at `now` with a freshly rolled interval
    pub fn rearm<R: Rng>(&mut self, now: f64, range: &Span, rng: &mut R) {
        self.last_spawn_ms = now;
        self.interval_ms = range.sample(rng);
    }
}

/// What the spawner wants this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnDecision {
    pub obstacle: bool,
    pub coin: bool,
}

/// Spawn bookkeeping for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    pub policy: SpawnPolicy,
    pub obstacle_timer: SpawnTimer,
    pub coin_timer: SpawnTimer,
}

impl Spawner {
    /// Timers start at `now` with the tuning's first-spawn intervals
    pub fn new(tuning: &Tuning, now: f64) -> Self {
        Self {
            policy: tuning.spawn_policy,
            obstacle_timer: SpawnTimer::new(now, tuning.obstacle_first_interval_ms),
            coin_timer: SpawnTimer::new(now, tuning.coin_first_interval_ms),
        }
    }

    /// Decide which entities to spawn this tick and update the timers.
    ///
    /// `newest_obstacle_x` is the x of the most recently spawned live obstacle.
    pub fn poll<R: Rng>(
        &mut self,
        now: f64,
        arena: &Arena,
        newest_obstacle_x: Option<f32>,
        tuning: &Tuning,
        rng: &mut R,
    ) -> SpawnDecision {
        if arena.is_degenerate() {
            return SpawnDecision::default();
        }

        match self.policy {
            SpawnPolicy::TimedInterval => {
                let mut decision = SpawnDecision::default();

                if self.obstacle_timer.is_due(now) {
                    let gap_clear = newest_obstacle_x
                        .is_none_or(|x| x < arena.right_edge() - tuning.min_obstacle_gap);
                    if gap_clear {
                        decision.obstacle = true;
                        self.obstacle_timer
                            .rearm(now, &tuning.obstacle_interval_ms, rng);
                    }
                }

                if self.coin_timer.is_due(now) {
                    decision.coin = rng.random_bool(tuning.coin_spawn_chance);
                    self.coin_timer.rearm(now, &tuning.coin_interval_ms, rng);
                }

                decision
            }
            SpawnPolicy::PerTickProbability => SpawnDecision {
                obstacle: rng.random_bool(tuning.obstacle_tick_chance),
                coin: rng.random_bool(tuning.coin_tick_chance),
            },
        }
    }
}

/// Scroll speed for entities spawned at `score`: non-decreasing, capped at
/// `base_speed + max_speed_bonus`
pub fn speed_for_score(score: u32, tuning: &Tuning) -> f32 {
    let bonus = (score as f32 * tuning.speed_per_point).min(tuning.max_speed_bonus);
    tuning.base_speed + bonus
}

/// New obstacle resting on the ground at the right edge
pub fn spawn_obstacle<R: Rng>(
    id: u32,
    arena: &Arena,
    speed: f32,
    tuning: &Tuning,
    rng: &mut R,
) -> Obstacle {
    let size = Vec2::new(
        tuning.obstacle_width.sample(rng) as f32,
        tuning.obstacle_height.sample(rng) as f32,
    );
    Obstacle {
        id,
        pos: Vec2::new(arena.right_edge(), arena.ground_y() - size.y),
        size,
        speed,
    }
}

/// New coin at the right edge, floating within jump reach
pub fn spawn_coin<R: Rng>(
    id: u32,
    arena: &Arena,
    speed: f32,
    tuning: &Tuning,
    rng: &mut R,
) -> Coin {
    let extra = rng.random::<f32>() * tuning.coin_extra_height;
    Coin {
        id,
        pos: Vec2::new(
            arena.right_edge(),
            arena.ground_y() - tuning.coin_lift - extra,
        ),
        radius: tuning.coin_radius,
        speed,
        collected: false,
    }
}
