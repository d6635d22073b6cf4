use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::cache::store::ObjectStore;

/// Typed layer over an [`ObjectStore`]: payloads cross the store boundary
/// as `serde_json` bytes. A persisted payload that no longer decodes is
/// corruption: the entry is purged and reported as a miss, never as an
/// error.
#[derive(Clone)]
pub struct ObjectCache {
    store: Arc<dyn ObjectStore>,
}

impl ObjectCache {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = self.store.get(key)?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(err) => {
                debug!("corrupt cache entry '{}' purged: {}", key, err);
                self.store.purge(key);
                None
            }
        }
    }

    /// Serialize and store `value`, handing it back for call chaining.
    pub fn put<T: Serialize>(&self, key: &str, value: T) -> T {
        match serde_json::to_vec(&value) {
            Ok(bytes) => {
                self.store.put(key, bytes);
            }
            Err(err) => debug!("cache encode for '{}' failed: {}", key, err),
        }
        value
    }

    pub fn purge(&self, key: &str) {
        self.store.purge(key);
    }
}
