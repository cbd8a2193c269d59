//! Player integration
//!
//! Explicit Euler, one step per tick. Velocities are in pixels per tick so the
//! result is deterministic for a fixed tick rate.

use super::state::Player;

/// Apply gravity, move, and clamp the player to the ground line
pub fn update_player(player: &mut Player, ground_y: f32) {
    player.velocity_y += player.gravity;
    player.pos.y += player.velocity_y;

    let rest_y = ground_y - player.size.y;
    if player.pos.y >= rest_y {
        player.pos.y = rest_y;
        player.velocity_y = 0.0;
        player.on_ground = true;
    } else {
        player.on_ground = false;
    }
}

/// Launch the player upward. Returns false (and changes nothing) when airborne.
pub fn jump(player: &mut Player) -> bool {
    if !player.on_ground {
        return false;
    }
    player.velocity_y = player.jump_power;
    player.on_ground = false;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn grounded_player(ground_y: f32) -> Player {
        let mut player = Player::new(&Tuning::default());
        player.reset(ground_y);
        player
    }

    #[test]
    fn test_gravity_accumulates() {
        let mut player = grounded_player(600.0);
        player.pos.y = 100.0;
        player.on_ground = false;

        update_player(&mut player, 600.0);
        assert!((player.velocity_y - GRAVITY).abs() < 1e-6);
        assert!((player.pos.y - (100.0 + GRAVITY)).abs() < 1e-4);
        assert!(!player.on_ground);

        update_player(&mut player, 600.0);
        assert!((player.velocity_y - 2.0 * GRAVITY).abs() < 1e-6);
        assert!((player.pos.y - (100.0 + 3.0 * GRAVITY)).abs() < 1e-4);
    }

    #[test]
    fn test_clamps_to_ground() {
        let mut player = grounded_player(600.0);
        player.pos.y = 555.0;
        player.velocity_y = 10.0;
        player.on_ground = false;

        update_player(&mut player, 600.0);
        assert_eq!(player.pos.y, 560.0);
        assert_eq!(player.velocity_y, 0.0);
        assert!(player.on_ground);
    }

    #[test]
    fn test_resting_player_stays_grounded() {
        let mut player = grounded_player(600.0);
        for _ in 0..10 {
            update_player(&mut player, 600.0);
            assert_eq!(player.pos.y, 560.0);
            assert!(player.on_ground);
        }
    }

    #[test]
    fn test_jump_from_ground() {
        // Player resting at y=560 on ground 600
        let mut player = grounded_player(600.0);
        assert_eq!(player.pos.y, 560.0);

        assert!(jump(&mut player));
        assert_eq!(player.velocity_y, -14.0);
        assert!(!player.on_ground);

        update_player(&mut player, 600.0);
        assert!(player.pos.y < 560.0);
        assert!(!player.on_ground);
    }

    #[test]
    fn test_jump_in_air_is_noop() {
        let mut player = grounded_player(600.0);
        assert!(jump(&mut player));
        update_player(&mut player, 600.0);
        let before = player.clone();

        assert!(!jump(&mut player));
        assert_eq!(player.velocity_y, before.velocity_y);
        assert_eq!(player.pos, before.pos);
        assert_eq!(player.on_ground, before.on_ground);
    }

    #[test]
    fn test_full_jump_lands() {
        let mut player = grounded_player(600.0);
        jump(&mut player);
        let mut ticks = 0;
        let mut apex = player.pos.y;
        loop {
            update_player(&mut player, 600.0);
            apex = apex.min(player.pos.y);
            ticks += 1;
            if player.on_ground {
                break;
            }
            assert!(ticks < 200, "player never landed");
        }
        assert_eq!(player.pos.y, 560.0);
        // v^2 / 2g with v = 14, g = 0.6 is ~163px; Euler lands a little under
        assert!(560.0 - apex > 140.0);
    }

    proptest! {
        #[test]
        fn prop_never_below_ground(
            start_y in -500.0f32..560.0,
            start_vel in -30.0f32..30.0,
            jumps in proptest::collection::vec(any::<bool>(), 1..300),
        ) {
            let ground_y = 600.0;
            let mut player = grounded_player(ground_y);
            player.pos.y = start_y;
            player.velocity_y = start_vel;
            player.on_ground = false;

            for wants_jump in jumps {
                if wants_jump {
                    let was_grounded = player.on_ground;
                    let vel = player.velocity_y;
                    let jumped = jump(&mut player);
                    prop_assert_eq!(jumped, was_grounded);
                    if !jumped {
                        prop_assert_eq!(player.velocity_y, vel);
                    }
                }
                update_player(&mut player, ground_y);
                prop_assert!(player.bottom() <= ground_y);
                prop_assert_eq!(player.on_ground, player.pos.y == ground_y - player.size.y);
            }
        }
    }
}
