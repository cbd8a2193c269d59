//! Boundary between the simulation and its host
//!
//! The host drives the core with `Intent`s and `step` calls; the core reports
//! back through `GameHooks`.

use serde::{Deserialize, Serialize};

/// Core-to-host notifications
pub trait GameHooks {
    /// Fired once per collected coin with the post-increment score
    fn on_score_changed(&mut self, score: u32);

    /// Fired once per Playing -> Over transition
    fn on_game_over(&mut self, final_score: u32);

    fn on_jump_performed(&mut self) {}

    fn on_game_started(&mut self) {}
}

/// Hooks that drop every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl GameHooks for NoHooks {
    fn on_score_changed(&mut self, _score: u32) {}
    fn on_game_over(&mut self, _final_score: u32) {}
}

/// Recorded notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    JumpPerformed,
    ScoreChanged(u32),
    GameOver(u32),
}

/// A `Vec` records notifications in the order they were fired
impl GameHooks for Vec<GameEvent> {
    fn on_score_changed(&mut self, score: u32) {
        self.push(GameEvent::ScoreChanged(score));
    }

    fn on_game_over(&mut self, final_score: u32) {
        self.push(GameEvent::GameOver(final_score));
    }

    fn on_jump_performed(&mut self) {
        self.push(GameEvent::JumpPerformed);
    }

    fn on_game_started(&mut self) {
        self.push(GameEvent::GameStarted);
    }
}

/// Host-to-core requests (button presses, taps)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Start,
    Restart,
    Jump,
}
