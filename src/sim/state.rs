//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::fps::FpsCounter;
use super::grid::SpatialGrid;
use super::pool::{Pool, Pooled};
use crate::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Lives exhausted; the simulation is frozen
    GameOver,
}

/// A player projectile
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bullet {
    /// Top-left corner
    pub pos: Vec2,
    pub active: bool,
}

impl Bullet {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, active: true }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT))
    }
}

impl Pooled for Bullet {
    #[inline(always)]
    fn is_active(&self) -> bool {
        self.active
    }
}

/// A descending enemy
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Enemy {
    /// Top-left corner
    pub pos: Vec2,
    pub active: bool,
}

impl Enemy {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, active: true }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT))
    }
}

impl Pooled for Enemy {
    #[inline(always)]
    fn is_active(&self) -> bool {
        self.active
    }
}

pub type BulletPool = Pool<Bullet, BULLET_POOL_SIZE>;
pub type EnemyPool = Pool<Enemy, ENEMY_POOL_SIZE>;

/// The player's ship. Only moves horizontally.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner; y never changes
    pub pos: Vec2,
    /// Horizontal velocity (px/frame)
    pub velocity_x: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_Y),
            velocity_x: 0.0,
        }
    }
}

impl Player {
    /// Apply one frame of horizontal input: -1 (left), 0 (idle) or 1 (right)
    pub fn apply_input(&mut self, direction: i8) {
        if direction == 0 {
            self.velocity_x *= PLAYER_DAMPING;
        } else {
            self.velocity_x += PLAYER_ACCEL * direction as f32;
        }
        self.velocity_x = self.velocity_x.clamp(-PLAYER_MAX_SPEED, PLAYER_MAX_SPEED);
        self.pos.x = (self.pos.x + self.velocity_x).clamp(0.0, PLAYER_MAX_X);
    }

    /// Where a freshly fired bullet appears
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + BULLET_SPAWN_OFFSET_X, self.pos.y)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn-position RNG
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u8,
    /// Frames simulated while running
    pub time_ticks: u64,
    pub player: Player,
    pub bullets: BulletPool,
    pub enemies: EnemyPool,
    /// Per-frame collision index (rebuilt every tick)
    pub grid: SpatialGrid,
    /// Fire input seen on the previous tick (rising-edge detection)
    pub fire_held: bool,
    /// Clock time of the last shot, `None` before the first
    pub last_shot_ms: Option<u64>,
    /// Clock time of the last spawn attempt, `None` before the first
    pub last_spawn_ms: Option<u64>,
    pub fps: FpsCounter,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            score: 0,
            lives: STARTING_LIVES,
            time_ticks: 0,
            player: Player::default(),
            bullets: BulletPool::new(),
            enemies: EnemyPool::new(),
            grid: SpatialGrid::new(),
            fire_held: false,
            last_shot_ms: None,
            last_spawn_ms: None,
            fps: FpsCounter::default(),
        }
    }

    /// Throw away the current run and start over with a new seed
    pub fn restart(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take one life; flips to GameOver when none remain
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
        }
    }
}
