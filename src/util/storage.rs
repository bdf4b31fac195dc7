//! Durable key-value storage for session persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store only needs a string key-value surface that survives page
//! reloads. In the browser that is `localStorage`; during SSR there is no such
//! surface, so [`BrowserStorage`] reports itself unavailable and every write is
//! dropped. [`MemoryStorage`] stands in for tests and headless use.
//!
//! Writes are best effort: a full or blocked `localStorage` is ignored rather
//! than surfaced, since the in-memory session stays authoritative.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A persistent string key-value capability.
pub trait KeyValueStore {
    /// Whether the capability is backed by a real durable store.
    ///
    /// `false` means the caller is not running in a browser execution context.
    fn is_available(&self) -> bool;

    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);

    fn remove(&self, key: &str);
}

/// Load a JSON value for `key`. Missing or unparseable entries yield `None`.
pub fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    serde_json::from_str(&raw).ok()
}

/// Save a JSON value for `key`.
pub fn save_json<T: Serialize>(store: &impl KeyValueStore, key: &str, value: &T) {
    let Ok(raw) = serde_json::to_string(value) else {
        return;
    };
    store.set(key, &raw);
}

/// `window.localStorage` in the hydrate build; unavailable everywhere else.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for BrowserStorage {
    fn is_available(&self) -> bool {
        #[cfg(feature = "hydrate")]
        {
            local_storage().is_some()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            false
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(key, value);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// In-process store. Clones share the same entries.
#[derive(Clone, Debug)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    available: bool,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self { entries: Arc::default(), available: true }
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that behaves like a non-browser context: it reports itself
    /// unavailable but still records writes so callers can assert on them.
    pub fn unavailable() -> Self {
        Self { entries: Arc::default(), available: false }
    }

    /// Pre-populate an entry.
    #[must_use]
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStorage {
    fn is_available(&self) -> bool {
        self.available
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}
