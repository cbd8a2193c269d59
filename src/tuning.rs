//! Game balance table
//!
//! Defaults mirror `consts`. A page can override any subset through an inline
//! JSON block; unknown keys are rejected so typos don't silently fall back.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::SpawnPolicy;

/// Errors produced while loading a tuning table
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("`{field}` must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
        value: f64,
    },
    #[error("`{field}` range is inverted: min {min} > max {max}")]
    InvertedRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
}

/// Closed-open numeric range `[min, max)` sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        self.min + rng.random::<f64>() * (self.max - self.min)
    }

    fn check(&self, field: &'static str) -> Result<(), TuningError> {
        if self.min > self.max {
            return Err(TuningError::InvertedRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl From<(f32, f32)> for Span {
    fn from((min, max): (f32, f32)) -> Self {
        Self::new(min as f64, max as f64)
    }
}

impl From<(f64, f64)> for Span {
    fn from((min, max): (f64, f64)) -> Self {
        Self::new(min, max)
    }
}

/// Data-driven balance values for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    // === Player ===
    pub gravity: f32,
    pub jump_power: f32,

    // === Scrolling ===
    pub base_speed: f32,
    pub speed_per_point: f32,
    pub max_speed_bonus: f32,
    pub coin_value: u32,

    // === Entities ===
    pub obstacle_width: Span,
    pub obstacle_height: Span,
    pub coin_radius: f32,
    pub coin_lift: f32,
    pub coin_extra_height: f32,

    // === Spawning ===
    pub spawn_policy: SpawnPolicy,
    pub obstacle_first_interval_ms: f64,
    pub obstacle_interval_ms: Span,
    pub coin_first_interval_ms: f64,
    pub coin_interval_ms: Span,
    pub coin_spawn_chance: f64,
    pub min_obstacle_gap: f32,
    pub obstacle_tick_chance: f64,
    pub coin_tick_chance: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_power: JUMP_POWER,

            base_speed: BASE_SPEED,
            speed_per_point: SPEED_PER_POINT,
            max_speed_bonus: MAX_SPEED_BONUS,
            coin_value: COIN_VALUE,

            obstacle_width: OBSTACLE_WIDTH.into(),
            obstacle_height: OBSTACLE_HEIGHT.into(),
            coin_radius: COIN_RADIUS,
            coin_lift: COIN_LIFT,
            coin_extra_height: COIN_EXTRA_HEIGHT,

            spawn_policy: SpawnPolicy::TimedInterval,
            obstacle_first_interval_ms: OBSTACLE_FIRST_INTERVAL_MS,
            obstacle_interval_ms: OBSTACLE_INTERVAL_MS.into(),
            coin_first_interval_ms: COIN_FIRST_INTERVAL_MS,
            coin_interval_ms: COIN_INTERVAL_MS.into(),
            coin_spawn_chance: COIN_SPAWN_CHANCE,
            min_obstacle_gap: MIN_OBSTACLE_GAP,
            obstacle_tick_chance: OBSTACLE_TICK_CHANCE,
            coin_tick_chance: COIN_TICK_CHANCE,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON tuning table
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Same table with a different spawn policy
    pub fn with_policy(mut self, policy: SpawnPolicy) -> Self {
        self.spawn_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        positive("gravity", self.gravity as f64)?;
        if self.jump_power >= 0.0 {
            return Err(TuningError::OutOfRange {
                field: "jump_power",
                expected: "negative (upward)",
                value: self.jump_power as f64,
            });
        }
        positive("base_speed", self.base_speed as f64)?;
        non_negative("speed_per_point", self.speed_per_point as f64)?;
        non_negative("max_speed_bonus", self.max_speed_bonus as f64)?;
        if !(1..=MAX_COIN_VALUE).contains(&self.coin_value) {
            return Err(TuningError::OutOfRange {
                field: "coin_value",
                expected: "within [1, 1000000]",
                value: self.coin_value as f64,
            });
        }
        positive("coin_radius", self.coin_radius as f64)?;
        non_negative("coin_lift", self.coin_lift as f64)?;
        non_negative("coin_extra_height", self.coin_extra_height as f64)?;
        non_negative("min_obstacle_gap", self.min_obstacle_gap as f64)?;

        self.obstacle_width.check("obstacle_width")?;
        self.obstacle_height.check("obstacle_height")?;
        self.obstacle_interval_ms.check("obstacle_interval_ms")?;
        self.coin_interval_ms.check("coin_interval_ms")?;
        positive("obstacle_width.min", self.obstacle_width.min)?;
        positive("obstacle_height.min", self.obstacle_height.min)?;
        non_negative("obstacle_first_interval_ms", self.obstacle_first_interval_ms)?;
        non_negative("coin_first_interval_ms", self.coin_first_interval_ms)?;
        non_negative("obstacle_interval_ms.min", self.obstacle_interval_ms.min)?;
        non_negative("coin_interval_ms.min", self.coin_interval_ms.min)?;

        probability("coin_spawn_chance", self.coin_spawn_chance)?;
        probability("obstacle_tick_chance", self.obstacle_tick_chance)?;
        probability("coin_tick_chance", self.coin_tick_chance)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), TuningError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            field,
            expected: "positive",
            value,
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), TuningError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            field,
            expected: "zero or positive",
            value,
        })
    }
}

fn probability(field: &'static str, value: f64) -> Result<(), TuningError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            field,
            expected: "within [0, 1]",
            value,
        })
    }
}
