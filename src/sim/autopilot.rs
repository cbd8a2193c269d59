//! Demo autopilot
//!
//! Plays the game for attract/headless mode: jump when the nearest obstacle
//! ahead is about to reach the player.

use super::state::{GamePhase, GameState, Obstacle};

/// Ticks of warning before an obstacle reaches the player's front edge
const LEAD_TICKS: f32 = 8.0;

/// Nearest obstacle that hasn't reached the player's front edge yet
fn next_obstacle(state: &GameState) -> Option<&Obstacle> {
    let front = state.player.pos.x + state.player.size.x;
    state
        .obstacles
        .iter()
        .filter(|o| o.pos.x >= front)
        .min_by(|a, b| {
            a.pos
                .x
                .partial_cmp(&b.pos.x)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Should the autopilot press jump this tick?
pub fn wants_jump(state: &GameState) -> bool {
    if state.phase != GamePhase::Playing || !state.player.on_ground {
        return false;
    }
    let Some(obstacle) = next_obstacle(state) else {
        return false;
    };
    let front = state.player.pos.x + state.player.size.x;
    obstacle.pos.x - front <= obstacle.speed * LEAD_TICKS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::hooks::NoHooks;
    use crate::sim::spawn::SpawnPolicy;
    use crate::sim::state::Arena;
    use crate::sim::tick::{request_jump, start, step};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn quiet_playing() -> GameState {
        let tuning = Tuning {
            obstacle_tick_chance: 0.0,
            coin_tick_chance: 0.0,
            ..Tuning::default().with_policy(SpawnPolicy::PerTickProbability)
        };
        let mut state = GameState::with_tuning(1, Arena::new(800.0, 700.0), tuning);
        start(&mut state, 0.0, &mut NoHooks);
        state
    }

    fn clears_tallest_obstacle(speed: f32) {
        let mut state = quiet_playing();
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(300.0, state.arena.ground_y() - 80.0),
            size: Vec2::new(55.0, 80.0),
            speed,
        });

        let mut jumps = 0;
        let mut now = 0.0;
        for _ in 0..150 {
            if wants_jump(&state) && request_jump(&mut state, &mut NoHooks) {
                jumps += 1;
            }
            now += 16.0;
            step(&mut state, now, &mut NoHooks);
            assert_eq!(state.phase, GamePhase::Playing, "crashed at speed {speed}");
        }
        assert_eq!(jumps, 1);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_clears_obstacle_at_base_speed() {
        clears_tallest_obstacle(4.0);
    }

    #[test]
    fn test_clears_obstacle_at_max_speed() {
        clears_tallest_obstacle(10.0);
    }

    #[test]
    fn test_no_jump_without_threat() {
        let mut state = quiet_playing();
        assert!(!wants_jump(&state));

        // Obstacle far away
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(700.0, 540.0),
            size: Vec2::new(30.0, 60.0),
            speed: 4.0,
        });
        assert!(!wants_jump(&state));

        // Not while airborne or after the run
        state.obstacles[0].pos.x = 130.0;
        assert!(wants_jump(&state));
        state.player.on_ground = false;
        assert!(!wants_jump(&state));
        state.player.on_ground = true;
        state.phase = GamePhase::Over;
        assert!(!wants_jump(&state));
    }
}
