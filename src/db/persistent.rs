use log::{error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::db::normalize::normalize_workers;
use crate::db::seed::seed_workers;
use crate::db::storage::{Storage, StorageError};
use crate::models::Worker;

pub const WORKERS_KEY: &str = "workers";
pub const FAVORITES_KEY: &str = "favorites";
pub const BOOKINGS_KEY: &str = "bookings";
pub const OFFERS_KEY: &str = "offers";
pub const CART_KEY: &str = "cart";

/// JSON collections over a key-value [`Storage`].
///
/// Loading never fails: a missing key or an unreadable value yields the
/// supplied default. Each key is saved independently; there is no
/// cross-key transaction.
pub struct PersistentStore {
    backend: Box<dyn Storage>,
}

impl PersistentStore {
    pub fn new(backend: impl Storage + 'static) -> Self {
        PersistentStore {
            backend: Box::new(backend),
        }
    }

    fn read_json(&self, key: &str) -> Result<Option<Value>, StorageError> {
        match self.backend.get_item(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.read_json(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                warn!("Failed to read '{}' from storage, using default: {}", key, e);
                return default;
            }
        };

        match serde_json::from_value(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Malformed '{}' in storage, using default: {}", key, e);
                default
            }
        }
    }

    /// Loads the worker collection with per-record normalization, falling
    /// back to the seed catalogue when nothing usable is stored.
    pub fn load_workers(&self, fallback: (f64, f64)) -> Vec<Worker> {
        let raw = match self.read_json(WORKERS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return seed_workers(fallback),
            Err(e) => {
                warn!("Failed to read workers from storage, using seed data: {}", e);
                return seed_workers(fallback);
            }
        };

        let total = raw.as_array().map(Vec::len);
        match normalize_workers(&raw, fallback) {
            Some(workers) => {
                if let Some(total) = total.filter(|t| *t != workers.len()) {
                    warn!(
                        "Dropped {} malformed worker record(s) while loading",
                        total - workers.len()
                    );
                }
                workers
            }
            None => {
                warn!("Persisted workers are not a list, using seed data");
                seed_workers(fallback)
            }
        }
    }

    /// Failures are logged and swallowed; the in-memory state stays authoritative.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(StorageError::from)
            .and_then(|json| self.backend.set_item(key, &json));

        if let Err(e) = result {
            error!("Failed to persist '{}': {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::storage::MemoryStorage;

    const FALLBACK: (f64, f64) = (17.385, 78.4867);

    #[test]
    fn load_returns_default_for_missing_or_corrupt_keys() {
        let storage = MemoryStorage::with_entries([("favorites", "not json"), ("cart", "{\"a\":1}")]);
        let store = PersistentStore::new(storage);

        assert_eq!(store.load::<Vec<i64>>(FAVORITES_KEY, vec![9]), vec![9]);
        assert_eq!(store.load::<Vec<i64>>(BOOKINGS_KEY, Vec::new()), Vec::<i64>::new());
        assert_eq!(store.load::<Vec<i64>>(CART_KEY, Vec::new()), Vec::<i64>::new());
    }

    #[test]
    fn save_then_load() {
        let storage = MemoryStorage::new();
        let store = PersistentStore::new(storage.clone());
        store.save(FAVORITES_KEY, &vec![3_i64, 1]);

        assert_eq!(storage.get_item(FAVORITES_KEY).expect("read").as_deref(), Some("[3,1]"));
        assert_eq!(store.load::<Vec<i64>>(FAVORITES_KEY, Vec::new()), vec![3, 1]);
    }

    #[test]
    fn workers_fall_back_to_seed_when_absent_or_unparseable() {
        let empty = PersistentStore::new(MemoryStorage::new());
        assert_eq!(empty.load_workers(FALLBACK).len(), 5);

        let broken = PersistentStore::new(MemoryStorage::with_entries([("workers", "{oops")]));
        assert_eq!(broken.load_workers(FALLBACK).len(), 5);
    }

    #[test]
    fn workers_with_a_corrupt_entry_keep_the_good_one() {
        let blob = r#"[{"id": 10, "name": "Kiran", "categoryId": "painter"}, "junk"]"#;
        let store = PersistentStore::new(MemoryStorage::with_entries([("workers", blob)]));
        let workers = store.load_workers(FALLBACK);
        assert_eq!(workers.len(), 1);
        assert_eq!(workers[0].id, 10);
    }

    #[test]
    fn an_empty_persisted_list_is_respected() {
        let store = PersistentStore::new(MemoryStorage::with_entries([("workers", "[]")]));
        assert!(store.load_workers(FALLBACK).is_empty());
    }
}
