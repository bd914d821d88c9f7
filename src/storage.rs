//! Key/value persistence for player data
//!
//! The web build stores JSON in the browser's LocalStorage. Native sessions
//! use [`MemoryStore`], which lives as long as the process.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("could not encode {key}: {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },
    #[error("could not decode {key}: {source}")]
    Decode {
        key: String,
        source: serde_json::Error,
    },
    #[error("write to {key} rejected: {reason}")]
    Write { key: String, reason: String },
}

/// String-keyed string storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Process-lifetime store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage(web_sys::Storage);

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn open() -> Result<Self, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .map(Self)
            .ok_or(StoreError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // Quota errors and private-mode denials both surface here
        self.0.set_item(key, value).map_err(|e| StoreError::Write {
            key: key.to_owned(),
            reason: format!("{:?}", e),
        })
    }
}

/// Read and decode `key`. `Ok(None)` when nothing is stored.
pub fn load_json<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    let Some(json) = store.get(key) else {
        return Ok(None);
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|source| StoreError::Decode {
            key: key.to_owned(),
            source,
        })
}

pub fn save_json<T: Serialize>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_owned(),
        source,
    })?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        let store = MemoryStore::default();
        let value: Option<Vec<u32>> = load_json(&store, "nothing").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::default();
        save_json(&mut store, "numbers", &vec![3u32, 1, 2]).unwrap();
        let value: Option<Vec<u32>> = load_json(&store, "numbers").unwrap();
        assert_eq!(value, Some(vec![3, 1, 2]));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let mut store = MemoryStore::default();
        store.set("numbers", "not json").unwrap();
        let result: Result<Option<Vec<u32>>, _> = load_json(&store, "numbers");
        assert!(matches!(result, Err(StoreError::Decode { ref key, .. }) if key == "numbers"));
    }
}
