//! Game settings and preferences
//!
//! Stored as JSON: LocalStorage on the web, a read-only file in the working
//! directory on native. A missing or unreadable store means defaults.

use serde::{Deserialize, Serialize};

use crate::storage::{self, KeyValueStore, StoreError};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Draw the FPS counter in the HUD
    pub show_fps: bool,
    /// Brighter, flatter palette
    pub high_contrast: bool,
    /// Fixed RNG seed for reproducible runs (`None` = clock-derived)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_fps: true,
            high_contrast: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Storage key / native file stem
    const STORAGE_KEY: &'static str = "arcade_shooter_settings";

    /// Parse settings JSON. Unknown fields are ignored, missing ones default.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Seed for a new run: the configured one, else `fallback`
    pub fn seed_or(&self, fallback: u64) -> u64 {
        self.seed.unwrap_or(fallback)
    }

    pub fn load_from(store: &impl KeyValueStore) -> Self {
        match storage::load_json(store, Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        storage::save_json(store, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        match storage::LocalStorage::open() {
            Ok(store) => Self::load_from(&store),
            Err(e) => {
                log::warn!("Using default settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage (WASM only). Failures are logged.
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let result = storage::LocalStorage::open().and_then(|mut store| self.save_to(&mut store));
        if let Err(e) = result {
            log::warn!("Settings not saved: {}", e);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn path() -> std::path::PathBuf {
        std::path::PathBuf::from(format!("{}.json", Self::STORAGE_KEY))
    }

    /// Load settings from the working directory (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path = Self::path();
        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
