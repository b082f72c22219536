//! Best-effort key/value persistence
//!
//! Backends:
//! - `LocalStore`: browser LocalStorage (wasm32 only)
//! - `MemoryStore`: in-process map, shared between clones
//!
//! Nothing here is fatal. `BestScore` treats every storage failure as
//! "no stored best" and keeps playing.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

/// LocalStorage key holding the best score
pub const BEST_SCORE_KEY: &str = "flappy_gap_best";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("malformed value for {key}: {value:?}")]
    Malformed { key: String, value: String },
}

/// A string key/value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - scores will not persist");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .get_item(key)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }
}

/// Persisted best score. Read once at construction, written on every raise.
#[derive(Debug)]
pub struct BestScore<K: KeyValueStore> {
    store: K,
    value: u64,
}

impl<K: KeyValueStore> BestScore<K> {
    pub fn load(store: K) -> Self {
        let value = match Self::read(&store) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("Could not read best score ({}), starting from 0", e);
                0
            }
        };
        log::info!("Best score: {}", value);
        Self { store, value }
    }

    fn read(store: &K) -> Result<u64, StorageError> {
        match store.get(BEST_SCORE_KEY)? {
            None => Ok(0),
            Some(raw) => raw.trim().parse().map_err(|_| StorageError::Malformed {
                key: BEST_SCORE_KEY.to_string(),
                value: raw,
            }),
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Raise the best to `score` if it is higher. Returns true when raised.
    pub fn offer(&mut self, score: u64) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        self.persist();
        true
    }

    /// Write the current value through to the store
    fn persist(&mut self) {
        if let Err(e) = self.store.set(BEST_SCORE_KEY, &self.value.to_string()) {
            log::warn!("Could not save best score: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Store whose every call fails
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("quota exceeded".into()))
        }
    }

    #[test]
    fn test_missing_key_defaults_to_zero() {
        let best = BestScore::load(MemoryStore::new());
        assert_eq!(best.value(), 0);
    }

    #[test]
    fn test_malformed_value_defaults_to_zero() {
        let best = BestScore::load(MemoryStore::with_entry(BEST_SCORE_KEY, "twelve"));
        assert_eq!(best.value(), 0);
    }

    #[test]
    fn test_stored_value_is_read() {
        let best = BestScore::load(MemoryStore::with_entry(BEST_SCORE_KEY, " 17 "));
        assert_eq!(best.value(), 17);
    }

    #[test]
    fn test_offer_only_raises() {
        let store = MemoryStore::with_entry(BEST_SCORE_KEY, "5");
        let mut best = BestScore::load(store.clone());

        assert!(!best.offer(3));
        assert!(!best.offer(5));
        assert_eq!(store.get(BEST_SCORE_KEY).unwrap().as_deref(), Some("5"));

        assert!(best.offer(8));
        assert_eq!(best.value(), 8);
        assert_eq!(store.get(BEST_SCORE_KEY).unwrap().as_deref(), Some("8"));
    }

    #[test]
    fn test_broken_store_is_swallowed() {
        let mut best = BestScore::load(BrokenStore);
        assert_eq!(best.value(), 0);
        assert!(best.offer(4));
        assert_eq!(best.value(), 4);
    }
}
