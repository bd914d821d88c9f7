//! Leaderboard of the ten best runs
//!
//! Runs rank by kills. Between equal kills the one that took fewer frames
//! ranks higher; a full tie keeps the earlier run on top.

use serde::{Deserialize, Serialize};

use crate::storage::{self, KeyValueStore, StoreError};

pub const MAX_HIGH_SCORES: usize = 10;

/// One finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Enemies destroyed
    pub score: u32,
    /// Frames the run lasted
    pub ticks: u64,
    /// Unix time (ms) the run ended
    pub timestamp: f64,
}

impl HighScoreEntry {
    fn outranks(&self, other: &HighScoreEntry) -> bool {
        self.score > other.score || (self.score == other.score && self.ticks < other.ticks)
    }
}

/// Best runs first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    const STORAGE_KEY: &'static str = "arcade_shooter_highscores";

    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished run. Returns its 1-based rank, or `None` if it
    /// missed the board. Runs without a kill never place.
    pub fn add_score(&mut self, score: u32, ticks: u64, timestamp: f64) -> Option<usize> {
        if score == 0 {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            ticks,
            timestamp,
        };
        let rank = self
            .entries
            .iter()
            .position(|e| entry.outranks(e))
            .unwrap_or(self.entries.len());
        if rank >= MAX_HIGH_SCORES {
            return None;
        }

        self.entries.insert(rank, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank + 1)
    }

    pub fn load_from(store: &impl KeyValueStore) -> Self {
        match storage::load_json::<Self>(store, Self::STORAGE_KEY) {
            Ok(Some(mut scores)) => {
                scores.entries.truncate(MAX_HIGH_SCORES);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Ok(None) => Self::new(),
            Err(e) => {
                log::warn!("Discarding stored high scores: {}", e);
                Self::new()
            }
        }
    }

    pub fn save_to(&self, store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        storage::save_json(store, Self::STORAGE_KEY, self)?;
        log::debug!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        match storage::LocalStorage::open() {
            Ok(store) => Self::load_from(&store),
            Err(e) => {
                log::warn!("High scores unavailable: {}", e);
                Self::new()
            }
        }
    }

    /// Persist to LocalStorage. Failures are logged; the in-memory board is kept.
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let result = storage::LocalStorage::open().and_then(|mut store| self.save_to(&mut store));
        if let Err(e) = result {
            log::warn!("High scores not saved: {}", e);
        }
    }
}
