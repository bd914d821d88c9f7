//! End-to-end gameplay scenarios driven through `tick`

use arcade_shooter::consts::*;
use arcade_shooter::sim::{Bullet, Enemy, GamePhase, GameState, TickInput, tick};
use glam::Vec2;
use proptest::prelude::*;

/// A running game whose spawn timer never comes due while the clock stays at 0
fn quiet_state() -> GameState {
    let mut state = GameState::new(1);
    state.last_spawn_ms = Some(0);
    state
}

fn idle() -> TickInput {
    TickInput::default()
}

#[test]
fn idle_ship_stays_put() {
    let mut state = quiet_state();
    for _ in 0..60 {
        tick(&mut state, &idle());
    }
    assert_eq!(state.player.pos.x, PLAYER_START_X);
    assert_eq!(state.player.velocity_x, 0.0);
}

#[test]
fn idle_ship_coasts_to_a_stop() {
    let mut state = quiet_state();
    state.player.velocity_x = -0.5;
    for _ in 0..60 {
        tick(&mut state, &idle());
    }
    assert!(state.player.velocity_x.abs() < 1e-3);
    assert!(state.player.pos.x < PLAYER_START_X);
    assert!(state.player.pos.x >= 0.0 && state.player.pos.x <= PLAYER_MAX_X);
}

#[test]
fn damping_slows_every_idle_frame() {
    let mut state = quiet_state();
    state.player.velocity_x = PLAYER_MAX_SPEED;
    let mut previous = state.player.velocity_x;
    for _ in 0..120 {
        tick(&mut state, &idle());
        assert!(state.player.velocity_x < previous);
        previous = state.player.velocity_x;
        assert!(state.player.pos.x >= 0.0 && state.player.pos.x <= PLAYER_MAX_X);
    }
    assert!(state.player.velocity_x.abs() < 1e-3);
}

#[test]
fn held_direction_reaches_top_speed_and_wall() {
    let mut state = quiet_state();
    let right = TickInput {
        right: true,
        ..Default::default()
    };
    for _ in 0..16 {
        tick(&mut state, &right);
    }
    assert_eq!(state.player.velocity_x, PLAYER_MAX_SPEED);

    for _ in 0..100 {
        tick(&mut state, &right);
    }
    assert_eq!(state.player.pos.x, PLAYER_MAX_X);
}

#[test]
fn bullet_leaves_screen_after_42_frames() {
    let mut state = quiet_state();
    tick(
        &mut state,
        &TickInput {
            fire: true,
            ..Default::default()
        },
    );
    assert_eq!(state.bullets.active_count(), 1);

    for _ in 1..41 {
        tick(&mut state, &idle());
    }
    assert_eq!(state.bullets.active_count(), 1);

    tick(&mut state, &idle());
    assert_eq!(state.bullets.active_count(), 0);
}

#[test]
fn escaped_enemy_costs_a_life_after_214_frames() {
    let mut state = quiet_state();
    state.enemies.spawn(Enemy::new(Vec2::new(0.0, ENEMY_SPAWN_Y)));

    for _ in 0..213 {
        tick(&mut state, &idle());
    }
    assert_eq!(state.lives, 3);
    assert_eq!(state.enemies.active_count(), 1);

    tick(&mut state, &idle());
    assert_eq!(state.lives, 2);
    assert_eq!(state.enemies.active_count(), 0);
}

#[test]
fn touching_bullet_does_not_hit() {
    let mut state = quiet_state();
    state.enemies.spawn(Enemy::new(Vec2::new(100.0, 200.0)));
    // Right edge of the bullet sits exactly on the enemy's left edge
    state.bullets.spawn(Bullet::new(Vec2::new(95.0, 230.0)));

    tick(&mut state, &idle());

    assert_eq!(state.score, 0);
    assert_eq!(state.enemies.active_count(), 1);
    assert_eq!(state.bullets.active_count(), 1);
}

#[test]
fn overlapping_bullet_kills_enemy() {
    let mut state = quiet_state();
    state.enemies.spawn(Enemy::new(Vec2::new(100.0, 200.0)));
    state.bullets.spawn(Bullet::new(Vec2::new(110.0, 230.0)));

    tick(&mut state, &idle());

    assert_eq!(state.score, 1);
    assert_eq!(state.enemies.active_count(), 0);
    assert_eq!(state.bullets.active_count(), 0);
}

#[test]
fn game_over_freezes_the_world() {
    let mut state = quiet_state();
    state.lives = 1;
    state.enemies.spawn(Enemy::new(Vec2::new(0.0, 598.0)));

    tick(&mut state, &idle());
    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.lives, 0);

    let ticks = state.time_ticks;
    let player = state.player.clone();
    let busy = TickInput {
        left: true,
        fire: true,
        now_ms: 10_000,
        ..Default::default()
    };
    for _ in 0..120 {
        tick(&mut state, &busy);
    }
    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.time_ticks, ticks);
    assert_eq!(state.player, player);
    assert_eq!(state.bullets.active_count(), 0);
    assert_eq!(state.score, 0);
}

#[test]
fn restart_after_game_over() {
    let mut state = quiet_state();
    state.lives = 1;
    state.enemies.spawn(Enemy::new(Vec2::new(0.0, 598.0)));
    tick(&mut state, &idle());
    assert!(state.is_game_over());

    state.restart(2);
    assert_eq!(state.phase, GamePhase::Running);
    assert_eq!(state.lives, STARTING_LIVES);

    tick(&mut state, &idle());
    assert_eq!(state.time_ticks, 1);
    // Spawn timer starts ready
    assert_eq!(state.enemies.active_count(), 1);
}

fn arb_frames() -> impl Strategy<Value = Vec<(bool, bool, bool, u64)>> {
    prop::collection::vec(
        (any::<bool>(), any::<bool>(), any::<bool>(), 0u64..40),
        1..600,
    )
}

proptest! {
    #[test]
    fn world_stays_within_limits(seed in any::<u64>(), frames in arb_frames()) {
        let mut state = GameState::new(seed);
        let mut now_ms = 0u64;
        let mut last_shot: Option<u64> = None;
        let mut last_spawn: Option<u64> = None;

        for (left, right, fire, dt) in frames {
            now_ms += dt;
            let before_enemies: Vec<bool> =
                state.enemies.slots().iter().map(|e| e.active).collect();

            tick(&mut state, &TickInput { left, right, fire, now_ms });

            prop_assert!(state.player.velocity_x.abs() <= PLAYER_MAX_SPEED);
            prop_assert!(state.player.pos.x >= 0.0 && state.player.pos.x <= PLAYER_MAX_X);
            prop_assert_eq!(state.player.pos.y, PLAYER_Y);
            prop_assert!(state.enemies.active_count() <= MAX_ACTIVE_ENEMIES);
            prop_assert!(state.bullets.active_count() <= BULLET_POOL_SIZE);

            if state.last_shot_ms != last_shot {
                if let (Some(prev), Some(cur)) = (last_shot, state.last_shot_ms) {
                    prop_assert!(cur - prev >= SHOT_COOLDOWN_MS);
                }
                last_shot = state.last_shot_ms;
            }

            if state.last_spawn_ms != last_spawn {
                if let (Some(prev), Some(cur)) = (last_spawn, state.last_spawn_ms) {
                    prop_assert!(cur - prev >= SPAWN_INTERVAL_MS);
                }
                last_spawn = state.last_spawn_ms;
            }

            // A freshly spawned enemy keeps its distance from the spawn band
            let fresh = state
                .enemies
                .iter_active()
                .find(|(i, _)| !before_enemies[*i])
                .map(|(i, e)| (i, e.pos));
            if let Some((fresh_slot, fresh_pos)) = fresh {
                prop_assert_eq!(fresh_pos.y, ENEMY_SPAWN_Y + ENEMY_SPEED);
                for (i, other) in state.enemies.iter_active() {
                    if i != fresh_slot && other.pos.y - ENEMY_SPEED < SPAWN_BAND_Y {
                        prop_assert!((other.pos.x - fresh_pos.x).abs() >= SPAWN_MIN_SPACING);
                    }
                }
            }
        }
    }

    #[test]
    fn same_seed_and_input_replay_identically(seed in any::<u64>(), frames in arb_frames()) {
        let mut a = GameState::new(seed);
        let mut b = GameState::new(seed);
        let mut now_ms = 0u64;
        for (left, right, fire, dt) in frames {
            now_ms += dt;
            let input = TickInput { left, right, fire, now_ms };
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        prop_assert_eq!(a.score, b.score);
        prop_assert_eq!(a.lives, b.lives);
        prop_assert_eq!(a.player, b.player);
        prop_assert_eq!(a.enemies.slots(), b.enemies.slots());
    }
}
