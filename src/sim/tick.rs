//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation by one frame.

use glam::Vec2;
use rand::Rng;

use super::state::{Bullet, Enemy, GameState};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Left direction held
    pub left: bool,
    /// Right direction held
    pub right: bool,
    /// Fire held (only the press edge shoots)
    pub fire: bool,
    /// Monotonic clock reading in milliseconds
    pub now_ms: u64,
}

impl TickInput {
    /// Horizontal direction: -1, 0 or 1. Both directions cancel out.
    pub fn direction(&self) -> i8 {
        match (self.left, self.right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }
}

/// What happened to this tick's enemy spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnAttempt {
    /// Interval not elapsed, or too many enemies alive
    NotDue,
    /// No free slot
    PoolFull,
    /// Too close to an enemy still in the spawn band
    Rejected,
    /// Spawned into this slot
    Spawned(usize),
}

/// Advance the game state by one frame. No-op once the game is over.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.is_game_over() {
        return;
    }

    state.time_ticks += 1;

    state.player.apply_input(input.direction());
    try_shoot(state, input);
    advance_bullets(state);
    try_spawn_enemy(state, input.now_ms);
    advance_enemies(state);

    if state.is_game_over() {
        log::info!(
            "Game over after {} ticks, final score {}",
            state.time_ticks,
            state.score
        );
        return;
    }

    state.grid.rebuild(&state.enemies);
    resolve_collisions(state);

    state.fps.frame(input.now_ms);
}

/// Fire on the press edge if the cooldown has elapsed. Returns the bullet
/// slot used, if any.
pub fn try_shoot(state: &mut GameState, input: &TickInput) -> Option<usize> {
    let pressed = input.fire && !state.fire_held;
    state.fire_held = input.fire;
    if !pressed {
        return None;
    }

    let ready = state
        .last_shot_ms
        .is_none_or(|last| input.now_ms.saturating_sub(last) >= SHOT_COOLDOWN_MS);
    if !ready {
        return None;
    }

    // Full pool drops the shot without consuming the cooldown
    let slot = state.bullets.spawn(Bullet::new(state.player.muzzle()))?;
    state.last_shot_ms = Some(input.now_ms);
    Some(slot)
}

/// Move bullets up; free the ones that left the top of the screen
pub fn advance_bullets(state: &mut GameState) {
    for bullet in state.bullets.iter_active_mut() {
        bullet.pos.y -= BULLET_SPEED;
        if bullet.pos.y < 0.0 {
            bullet.active = false;
        }
    }
}

/// Rate- and spacing-limited enemy spawn
pub fn try_spawn_enemy(state: &mut GameState, now_ms: u64) -> SpawnAttempt {
    let due = state
        .last_spawn_ms
        .is_none_or(|last| now_ms.saturating_sub(last) >= SPAWN_INTERVAL_MS);
    if !due || state.enemies.active_count() >= MAX_ACTIVE_ENEMIES {
        return SpawnAttempt::NotDue;
    }

    state.last_spawn_ms = Some(now_ms);

    let Some(slot) = state.enemies.first_free() else {
        return SpawnAttempt::PoolFull;
    };

    let x = state.rng.random_range(0.0..ENEMY_SPAWN_MAX_X);
    let crowded = state
        .enemies
        .iter_active()
        .any(|(_, e)| e.pos.y < SPAWN_BAND_Y && (e.pos.x - x).abs() < SPAWN_MIN_SPACING);
    if crowded {
        return SpawnAttempt::Rejected;
    }

    state.enemies.put(slot, Enemy::new(Vec2::new(x, ENEMY_SPAWN_Y)));
    SpawnAttempt::Spawned(slot)
}

/// Move enemies down. Each one that falls past the bottom costs a life.
pub fn advance_enemies(state: &mut GameState) {
    let mut escaped = 0u8;
    for enemy in state.enemies.iter_active_mut() {
        enemy.pos.y += ENEMY_SPEED;
        if enemy.pos.y > SCREEN_HEIGHT {
            enemy.active = false;
            escaped += 1;
        }
    }

    for _ in 0..escaped {
        state.lose_life();
        log::debug!("Enemy escaped, {} lives left", state.lives);
    }
}

/// Bullet vs enemy using the current grid. Each bullet kills at most one
/// enemy. Returns the number of kills.
pub fn resolve_collisions(state: &mut GameState) -> u32 {
    let GameState {
        bullets,
        enemies,
        grid,
        score,
        ..
    } = state;

    let mut kills = 0;
    for bullet in bullets.iter_active_mut() {
        let Some(hit) = grid.first_hit(&bullet.rect(), enemies) else {
            continue;
        };
        bullet.active = false;
        if let Some(enemy) = enemies.get_mut(hit) {
            enemy.active = false;
        }
        *score += 1;
        kills += 1;
    }
    kills
}

/// Idle/demo mode: chase the lowest enemy and keep tapping fire
pub fn autopilot_input(state: &GameState, now_ms: u64) -> TickInput {
    let target = state
        .enemies
        .iter_active()
        .map(|(_, e)| e)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| e.pos.x + ENEMY_WIDTH / 2.0);

    let ship_center = state.player.pos.x + PLAYER_WIDTH / 2.0;
    let (left, right) = match target {
        // Small dead zone so the ship settles instead of jittering
        Some(x) if x < ship_center - 4.0 => (true, false),
        Some(x) if x > ship_center + 4.0 => (false, true),
        _ => (false, false),
    };

    TickInput {
        left,
        right,
        // Release every other frame so each press is a new edge
        fire: target.is_some() && !state.fire_held,
        now_ms,
    }
}
