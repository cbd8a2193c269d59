//! Per-tick simulation and session lifecycle
//!
//! Tick order while Playing:
//! 1. background scroll
//! 2. player physics
//! 3. spawns
//! 4. obstacles: advance, hit test (a hit ends the session immediately), prune
//! 5. coins: advance, pickup test (collect and remove), prune

use super::collision::{coin_hits, obstacle_hits};
use super::hooks::{GameHooks, Intent};
use super::physics::{jump, update_player};
use super::spawn::{speed_for_score, spawn_coin, spawn_obstacle};
use super::state::{GamePhase, GameState};

/// Idle -> Playing. Ignored in any other phase.
pub fn start(state: &mut GameState, now: f64, hooks: &mut impl GameHooks) -> bool {
    if state.phase != GamePhase::Idle {
        log::debug!("start ignored in {:?}", state.phase);
        return false;
    }
    begin_session(state, now, hooks);
    true
}

/// Over -> Playing. Ignored in any other phase.
pub fn restart(state: &mut GameState, now: f64, hooks: &mut impl GameHooks) -> bool {
    if state.phase != GamePhase::Over {
        log::debug!("restart ignored in {:?}", state.phase);
        return false;
    }
    begin_session(state, now, hooks);
    true
}

/// Jump right away if Playing and on the ground
pub fn request_jump(state: &mut GameState, hooks: &mut impl GameHooks) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    let jumped = jump(&mut state.player);
    if jumped {
        hooks.on_jump_performed();
    }
    jumped
}

/// Dispatch a host intent. Returns false when the intent was dropped.
pub fn apply_intent(
    state: &mut GameState,
    intent: Intent,
    now: f64,
    hooks: &mut impl GameHooks,
) -> bool {
    match intent {
        Intent::Start => start(state, now, hooks),
        Intent::Restart => restart(state, now, hooks),
        Intent::Jump => request_jump(state, hooks),
    }
}

fn begin_session(state: &mut GameState, now: f64, hooks: &mut impl GameHooks) {
    state.reset(now);
    state.phase = GamePhase::Playing;
    log::info!("Session started (seed {})", state.seed);
    hooks.on_game_started();
}

fn end_session(state: &mut GameState, hooks: &mut impl GameHooks) {
    let final_score = state.score;
    state.phase = GamePhase::Over;
    state.final_score = Some(final_score);
    state.obstacles.clear();
    state.coins.clear();
    log::info!(
        "Game over: score {} after {} ticks",
        final_score,
        state.time_ticks
    );
    hooks.on_game_over(final_score);
}

/// Advance the session by one tick at wall-clock time `now` (milliseconds)
pub fn step(state: &mut GameState, now: f64, hooks: &mut impl GameHooks) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.cloud_offset += 1;

    update_player(&mut state.player, state.arena.ground_y());

    spawn_entities(state, now);

    // Obstacles: survivors are kept in order; once something is hit the rest
    // are left untouched
    let player = &state.player;
    let mut crashed = false;
    state.obstacles.retain_mut(|obstacle| {
        if crashed {
            return true;
        }
        obstacle.advance();
        if obstacle_hits(player, obstacle) {
            crashed = true;
            return true;
        }
        !obstacle.is_off_screen()
    });
    if crashed {
        end_session(state, hooks);
        return;
    }

    // Coins
    let mut collected = 0u32;
    state.coins.retain_mut(|coin| {
        coin.advance();
        if !coin.collected && coin_hits(player, coin) {
            coin.collect();
            collected += 1;
            return false;
        }
        !coin.is_off_screen()
    });
    for _ in 0..collected {
        state.score = state.score.saturating_add(state.tuning.coin_value);
        hooks.on_score_changed(state.score);
    }

    state.time_ticks += 1;
}

fn spawn_entities(state: &mut GameState, now: f64) {
    let newest_obstacle_x = state.obstacles.last().map(|o| o.pos.x);
    let decision = state.spawner.poll(
        now,
        &state.arena,
        newest_obstacle_x,
        &state.tuning,
        &mut state.rng,
    );
    if !decision.obstacle && !decision.coin {
        return;
    }

    let speed = speed_for_score(state.score, &state.tuning);
    if decision.obstacle {
        let id = state.next_entity_id();
        let obstacle = spawn_obstacle(id, &state.arena, speed, &state.tuning, &mut state.rng);
        log::debug!(
            "Spawned obstacle {} ({:.0}x{:.0}) at speed {:.2}",
            id,
            obstacle.size.x,
            obstacle.size.y,
            speed
        );
        state.obstacles.push(obstacle);
    }
    if decision.coin {
        let id = state.next_entity_id();
        let coin = spawn_coin(id, &state.arena, speed, &state.tuning, &mut state.rng);
        log::debug!("Spawned coin {} at y {:.0}", id, coin.pos.y);
        state.coins.push(coin);
    }
}
