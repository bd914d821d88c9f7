//! Arcade Shooter - A single-screen ship-versus-descenders arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pools, physics, spatial grid, game state)
//! - `renderer`: Scene building and WebGPU rendering pipeline
//! - `settings`: Player preferences
//! - `highscores`: Top-10 leaderboard
//! - `storage`: Key/value persistence for settings and high scores
//! - `headless`: Autopilot play on a simulated clock

pub mod headless;
pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod storage;

pub use highscores::HighScores;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (frames per second)
    pub const FRAME_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / FRAME_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Play field dimensions (top-left origin, y grows downward)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    pub const PLAYER_START_X: f32 = 375.0;
    pub const PLAYER_Y: f32 = 500.0;
    /// Rightmost x the ship may occupy
    pub const PLAYER_MAX_X: f32 = SCREEN_WIDTH - PLAYER_WIDTH;
    /// Velocity change per frame while a direction is held
    pub const PLAYER_ACCEL: f32 = 0.5;
    /// Velocity multiplier per frame while idle
    pub const PLAYER_DAMPING: f32 = 0.9;
    /// Absolute velocity cap (px/frame)
    pub const PLAYER_MAX_SPEED: f32 = 8.0;

    /// Bullets
    pub const BULLET_WIDTH: f32 = 5.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    pub const BULLET_SPEED: f32 = 12.0;
    /// Horizontal offset from the ship's left edge (centers the bullet)
    pub const BULLET_SPAWN_OFFSET_X: f32 = 22.5;
    pub const BULLET_POOL_SIZE: usize = 20;
    pub const SHOT_COOLDOWN_MS: u64 = 250;

    /// Enemies
    pub const ENEMY_WIDTH: f32 = 40.0;
    pub const ENEMY_HEIGHT: f32 = 40.0;
    pub const ENEMY_SPEED: f32 = 3.0;
    pub const ENEMY_SPAWN_Y: f32 = -40.0;
    /// Spawn x is drawn from [0, ENEMY_SPAWN_MAX_X)
    pub const ENEMY_SPAWN_MAX_X: f32 = SCREEN_WIDTH - ENEMY_WIDTH;
    pub const ENEMY_POOL_SIZE: usize = 10;
    pub const MAX_ACTIVE_ENEMIES: usize = 6;
    pub const SPAWN_INTERVAL_MS: u64 = 1000;
    /// Enemies above this y count as "still spawning" for spacing checks
    pub const SPAWN_BAND_Y: f32 = 100.0;
    /// Minimum horizontal distance between a new enemy and one in the spawn band
    pub const SPAWN_MIN_SPACING: f32 = 100.0;

    /// Spatial grid (10x10 cells of 80x60)
    pub const GRID_COLS: usize = 10;
    pub const GRID_ROWS: usize = 10;
    pub const CELL_WIDTH: f32 = SCREEN_WIDTH / GRID_COLS as f32;
    pub const CELL_HEIGHT: f32 = SCREEN_HEIGHT / GRID_ROWS as f32;

    pub const STARTING_LIVES: u8 = 3;

    /// FPS sampling window
    pub const FPS_WINDOW_MS: u64 = 1000;
}

/// An axis-aligned rectangle in play-field coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn from_pos(pos: Vec2, size: Vec2) -> Self {
        Self { min: pos, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap test: rectangles that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}
