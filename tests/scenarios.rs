//! End-to-end sessions driven through the public API, the way a host would

use coin_runner::consts::*;
use coin_runner::sim::autopilot::wants_jump;
use coin_runner::sim::{
    Arena, Coin, GameEvent, GamePhase, GameState, Intent, NoHooks, Obstacle, SpawnPolicy,
    apply_intent, coin_hits, obstacle_hits, request_jump, restart, speed_for_score, start, step,
};
use coin_runner::{Tuning, TuningError};
use glam::Vec2;

/// Ground at y=600, resting player at y=560
fn arena() -> Arena {
    Arena::new(800.0, 700.0)
}

/// Spawning off so entities are placed by hand
fn quiet_tuning() -> Tuning {
    Tuning {
        obstacle_tick_chance: 0.0,
        coin_tick_chance: 0.0,
        ..Tuning::default().with_policy(SpawnPolicy::PerTickProbability)
    }
}

fn playing(events: &mut Vec<GameEvent>) -> GameState {
    let mut state = GameState::with_tuning(3, arena(), quiet_tuning());
    assert!(apply_intent(&mut state, Intent::Start, 0.0, events));
    state
}

fn obstacle(state: &mut GameState, x: f32, y: f32, w: f32, h: f32, speed: f32) -> Obstacle {
    Obstacle {
        id: state.next_entity_id(),
        pos: Vec2::new(x, y),
        size: Vec2::new(w, h),
        speed,
    }
}

#[test]
fn jump_from_rest() {
    let mut events: Vec<GameEvent> = Vec::new();
    let mut state = playing(&mut events);
    assert!(state.player.on_ground);
    assert_eq!(state.player.pos.y, 560.0);

    assert!(request_jump(&mut state, &mut events));
    assert_eq!(state.player.velocity_y, -14.0);
    // Position only moves on the next tick
    assert_eq!(state.player.pos.y, 560.0);

    step(&mut state, SIM_DT_MS, &mut events);
    assert!(state.player.pos.y < 560.0);
    assert!(!state.player.on_ground);

    // Mid-air jump requests change nothing
    let before = state.player.clone();
    assert!(!request_jump(&mut state, &mut events));
    assert_eq!(state.player.velocity_y, before.velocity_y);
    assert_eq!(state.player.pos, before.pos);
    assert_eq!(
        events,
        vec![GameEvent::GameStarted, GameEvent::JumpPerformed]
    );
}

#[test]
fn jump_lands_back_on_the_ground() {
    let mut state = playing(&mut Vec::<GameEvent>::new());
    request_jump(&mut state, &mut NoHooks);
    let mut now = 0.0;
    let mut peak = state.player.pos.y;
    for _ in 0..120 {
        now += SIM_DT_MS;
        step(&mut state, now, &mut NoHooks);
        peak = peak.min(state.player.pos.y);
        assert!(state.player.bottom() <= state.arena.ground_y());
    }
    assert!(state.player.on_ground);
    assert_eq!(state.player.pos.y, 560.0);
    // Apex is ~150px above the rest position
    assert!(peak < 560.0 - 140.0);
}

#[test]
fn obstacle_overlap_and_clearance() {
    let mut state = GameState::new(1, arena());
    state.player.pos = Vec2::new(80.0, 560.0);

    // Overlaps the player's left edge
    let near = obstacle(&mut state, 60.0, 560.0, 30.0, 60.0, 4.0);
    assert!(obstacle_hits(&state.player, &near));

    let far = obstacle(&mut state, 200.0, 560.0, 30.0, 60.0, 4.0);
    assert!(!obstacle_hits(&state.player, &far));

    // Entirely behind the player
    let behind = obstacle(&mut state, 0.0, 560.0, 30.0, 60.0, 4.0);
    assert!(!obstacle_hits(&state.player, &behind));
}

#[test]
fn coin_pickup_scores_once() {
    let mut events: Vec<GameEvent> = Vec::new();
    let mut state = playing(&mut events);
    events.clear();

    // Player box centered at (100, 520), in the air
    state.player.pos = Vec2::new(80.0, 500.0);
    state.player.on_ground = false;
    let coin = Coin {
        id: state.next_entity_id(),
        pos: Vec2::new(100.0, 500.0),
        radius: 15.0,
        speed: 0.0,
        collected: false,
    };
    assert!(coin_hits(&state.player, &coin));
    state.coins.push(coin);

    step(&mut state, SIM_DT_MS, &mut events);
    assert_eq!(events, vec![GameEvent::ScoreChanged(10)]);
    assert_eq!(state.score, 10);
    assert!(state.coins.is_empty());

    step(&mut state, 2.0 * SIM_DT_MS, &mut events);
    assert_eq!(events.len(), 1);
}

#[test]
fn crash_ends_run_until_restart() {
    let mut events: Vec<GameEvent> = Vec::new();
    let mut state = playing(&mut events);
    state.score = 30;
    let o = obstacle(&mut state, 119.0, 560.0, 30.0, 40.0, 4.0);
    state.obstacles.push(o);

    step(&mut state, SIM_DT_MS, &mut events);
    assert_eq!(state.phase, GamePhase::Over);
    assert_eq!(state.final_score, Some(30));
    assert_eq!(
        events,
        vec![GameEvent::GameStarted, GameEvent::GameOver(30)]
    );

    // Frozen until restart
    let frozen = state.clone();
    for i in 2..10 {
        step(&mut state, i as f64 * SIM_DT_MS, &mut events);
    }
    assert_eq!(state.time_ticks, frozen.time_ticks);
    assert_eq!(state.player.pos, frozen.player.pos);
    assert!(!apply_intent(&mut state, Intent::Jump, 200.0, &mut events));
    assert!(!apply_intent(&mut state, Intent::Start, 200.0, &mut events));
    assert_eq!(events.len(), 2);

    assert!(restart(&mut state, 500.0, &mut events));
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.score, 0);
    assert_eq!(events.last(), Some(&GameEvent::GameStarted));
}

#[test]
fn entities_pruned_only_after_leaving() {
    let mut state = playing(&mut Vec::<GameEvent>::new());
    let o = obstacle(&mut state, 10.0, 100.0, 30.0, 40.0, 20.0);
    state.obstacles.push(o);

    let mut now = 0.0;
    let mut ticks = 0;
    while !state.obstacles.is_empty() {
        let o = &state.obstacles[0];
        let was_visible = o.pos.x + o.size.x >= 0.0;
        now += SIM_DT_MS;
        step(&mut state, now, &mut NoHooks);
        ticks += 1;
        if was_visible && !state.obstacles.is_empty() {
            continue;
        }
        // Removed on the tick that pushed it past the edge
        assert!(state.obstacles.is_empty());
        assert!(was_visible);
    }
    // 10 + 30 - 20 * 3 = -20 < 0
    assert_eq!(ticks, 3);
}

#[test]
fn speed_rises_with_score_to_a_cap() {
    let tuning = Tuning::default();
    let mut last = speed_for_score(0, &tuning);
    assert_eq!(last, BASE_SPEED);
    for score in (10..=1000).step_by(10) {
        let speed = speed_for_score(score, &tuning);
        assert!(speed >= last);
        assert!(speed <= BASE_SPEED + MAX_SPEED_BONUS);
        last = speed;
    }
    assert_eq!(last, BASE_SPEED + MAX_SPEED_BONUS);
}

#[test]
fn timed_spawns_respect_gap_and_ground() {
    let mut state = GameState::new(2024, arena());
    start(&mut state, 0.0, &mut NoHooks);
    let ground_y = state.arena.ground_y();

    let mut now = 0.0;
    let mut newest_id = 0;
    let mut spawned = 0;
    for _ in 0..(60 * 30) {
        if wants_jump(&state) {
            request_jump(&mut state, &mut NoHooks);
        }
        now += SIM_DT_MS;
        step(&mut state, now, &mut NoHooks);
        if state.phase != GamePhase::Playing {
            break;
        }
        if let Some(last) = state.obstacles.last().filter(|o| o.id > newest_id) {
            newest_id = last.id;
            spawned += 1;
            assert_eq!(last.pos.x, state.arena.width - last.speed);
            // The previous obstacle had already cleared the gap
            if let [.., prev, _] = state.obstacles.as_slice() {
                assert!(prev.pos.x < state.arena.width - MIN_OBSTACLE_GAP);
            }
        }
        for o in &state.obstacles {
            assert_eq!(o.pos.y + o.size.y, ground_y);
        }
        for c in &state.coins {
            assert!(c.pos.y < ground_y);
        }
    }
    assert!(state.time_ticks > 60 * 5, "autopilot crashed early");
    assert!(spawned >= 2);
}

#[test]
fn degenerate_arena_spawns_nothing() {
    let tuning = Tuning {
        obstacle_tick_chance: 1.0,
        coin_tick_chance: 1.0,
        ..Tuning::default().with_policy(SpawnPolicy::PerTickProbability)
    };
    let mut state = GameState::with_tuning(5, Arena::new(0.0, 0.0), tuning);
    start(&mut state, 0.0, &mut NoHooks);
    for i in 1..=30 {
        step(&mut state, i as f64 * SIM_DT_MS, &mut NoHooks);
    }
    assert!(state.obstacles.is_empty());
    assert!(state.coins.is_empty());
}

#[test]
fn tuning_from_page_json() {
    let tuning = Tuning::from_json(r#"{ "gravity": 0.8, "spawn_policy": "per_tick_probability" }"#)
        .expect("valid tuning");
    assert_eq!(tuning.gravity, 0.8);
    assert_eq!(tuning.spawn_policy, SpawnPolicy::PerTickProbability);

    let state = GameState::with_tuning(1, arena(), tuning);
    assert_eq!(state.player.gravity, 0.8);

    assert!(matches!(
        Tuning::from_json(r#"{ "gravity": -1 }"#),
        Err(TuningError::OutOfRange { .. })
    ));
}
