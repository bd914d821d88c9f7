//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, time supplied by the caller
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering or platform dependencies

pub mod fps;
pub mod grid;
pub mod pool;
pub mod state;
pub mod tick;

pub use fps::FpsCounter;
pub use grid::{SpatialGrid, cell_of};
pub use pool::{Pool, Pooled};
pub use state::{Bullet, BulletPool, Enemy, EnemyPool, GamePhase, GameState, Player};
pub use tick::{SpawnAttempt, TickInput, autopilot_input, tick};
