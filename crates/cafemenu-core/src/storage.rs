//! Durable client-side storage.
//!
//! A string key-value store plus typed helpers for what the storefront keeps
//! between sessions: favorites, the last submitted order, and the customer's
//! contact details. Reads never fail from the caller's point of view: a
//! missing or corrupt entry is logged and treated as absent.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::cart::CartLine;

pub const FAVORITES_KEY: &str = "coffee_favorites";
pub const LAST_ORDER_KEY: &str = "coffee_last_order";
pub const USERNAME_KEY: &str = "coffee_username";
pub const PHONE_KEY: &str = "coffee_phone";
pub const ADDRESS_KEY: &str = "coffee_address";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

pub trait KeyValueStore {
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns [`StorageError`] when the value cannot be persisted.
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns [`StorageError`] when the removal cannot be persisted.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Volatile store, used in tests and when no storage path is configured.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store persisted as one JSON object of string values. Every write
/// rewrites the whole file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store; an
    /// unreadable or corrupt one is logged and also starts empty.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match load_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable storage file");
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&self.entries).map_err(|e| StorageError::Parse {
            context: "storage entries".to_owned(),
            source: e,
        })?;
        std::fs::write(&self.path, json).map_err(|e| StorageError::Io {
            path: self.path.display().to_string(),
            source: e,
        })
    }
}

fn load_entries(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => {
            return Err(StorageError::Io {
                path: path.display().to_string(),
                source: e,
            })
        }
    };
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(&content).map_err(|e| StorageError::Parse {
        context: path.display().to_string(),
        source: e,
    })
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Contact details remembered from the last successful order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Customer {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Typed access to the storefront's stored data.
#[derive(Debug)]
pub struct ClientStorage<S> {
    store: S,
}

impl<S: KeyValueStore> ClientStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Raw string entry; failures are logged and read as absent.
    pub fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "storage read failed");
                None
            }
        }
    }

    /// JSON entry; missing, unreadable and undecodable entries are `None`.
    pub fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring corrupt storage entry");
                None
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`StorageError`] when encoding or persisting fails.
    pub fn write_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value).map_err(|e| StorageError::Parse {
            context: key.to_owned(),
            source: e,
        })?;
        self.store.set(key, json)
    }


    pub fn favorites(&self) -> Vec<String> {
        self.read_json(FAVORITES_KEY).unwrap_or_default()
    }

    /// Adds or removes `id` from the favorites. Returns `true` when the
    /// product is a favorite afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the new list cannot be persisted.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool, StorageError> {
        let mut favorites = self.favorites();
        let now_favorite = match favorites.iter().position(|f| f == id) {
            Some(index) => {
                favorites.remove(index);
                false
            }
            None => {
                favorites.push(id.to_owned());
                true
            }
        };
        self.write_json(FAVORITES_KEY, &favorites)?;
        Ok(now_favorite)
    }

    /// Lines of the last submitted order; `None` when there is none.
    pub fn last_order(&self) -> Option<Vec<CartLine>> {
        self.read_json::<Vec<CartLine>>(LAST_ORDER_KEY)
            .filter(|lines| !lines.is_empty())
    }

    /// # Errors
    ///
    /// Returns [`StorageError`] when the snapshot cannot be persisted.
    pub fn save_last_order(&mut self, lines: &[CartLine]) -> Result<(), StorageError> {
        self.write_json(LAST_ORDER_KEY, lines)
    }

    pub fn customer(&self) -> Customer {
        let field = |key: &str| self.read(key).filter(|v| !v.trim().is_empty());
        Customer {
            name: field(USERNAME_KEY),
            phone: field(PHONE_KEY),
            address: field(ADDRESS_KEY),
        }
    }

    /// Stores the non-empty contact fields. Best-effort: failures are logged.
    pub fn remember_customer(&mut self, name: &str, phone: &str, address: &str) {
        for (key, value) in [(USERNAME_KEY, name), (PHONE_KEY, phone), (ADDRESS_KEY, address)] {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            if let Err(e) = self.store.set(key, value.to_owned()) {
                tracing::warn!(key, error = %e, "failed to remember customer field");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{Cart, CartOptions};

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Io {
                path: "broken".to_owned(),
                source: std::io::Error::other("disk gone"),
            })
        }

        fn set(&mut self, _key: &str, _value: String) -> Result<(), StorageError> {
            Err(StorageError::Io {
                path: "broken".to_owned(),
                source: std::io::Error::other("disk gone"),
            })
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn toggle_favorite_adds_then_removes() {
        let mut storage = ClientStorage::new(MemoryStore::new());
        assert!(storage.toggle_favorite("7").unwrap());
        assert!(storage.toggle_favorite("9").unwrap());
        assert_eq!(storage.favorites(), ["7", "9"]);
        assert!(!storage.toggle_favorite("7").unwrap());
        assert_eq!(storage.favorites(), ["9"]);
    }

    #[test]
    fn corrupt_entries_read_as_absent() {
        let mut store = MemoryStore::new();
        store.set(FAVORITES_KEY, "{not json".to_owned()).unwrap();
        store.set(LAST_ORDER_KEY, "[]".to_owned()).unwrap();
        let storage = ClientStorage::new(store);
        assert!(storage.favorites().is_empty());
        assert!(storage.last_order().is_none());
    }

    #[test]
    fn read_failures_read_as_absent() {
        let mut storage = ClientStorage::new(BrokenStore);
        assert!(storage.favorites().is_empty());
        assert_eq!(storage.customer(), Customer::default());
        storage.remember_customer("Ann", "+7 700", "");
        assert!(storage.toggle_favorite("1").is_err());
    }

    #[test]
    fn customer_fields_skip_blanks() {
        let mut storage = ClientStorage::new(MemoryStore::new());
        storage.remember_customer(" Ann ", "+7 701 000 00 00", "  ");
        let customer = storage.customer();
        assert_eq!(customer.name.as_deref(), Some("Ann"));
        assert_eq!(customer.phone.as_deref(), Some("+7 701 000 00 00"));
        assert_eq!(customer.address, None);
    }

    #[test]
    fn file_store_persists_last_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut cart = Cart::new();
        cart.add(CartLine::from_parts("LATTE", "COFFEE", 900, CartOptions::default()));
        cart.increment(0).unwrap();

        let mut storage = ClientStorage::new(JsonFileStore::open(&path));
        storage.save_last_order(&cart.snapshot()).unwrap();
        storage.toggle_favorite("3").unwrap();

        let reopened = ClientStorage::new(JsonFileStore::open(&path));
        assert_eq!(reopened.last_order(), Some(cart.snapshot()));
        assert_eq!(reopened.favorites(), ["3"]);
    }

    #[test]
    fn corrupt_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "garbage").unwrap();

        let mut store = JsonFileStore::open(&path);
        assert_eq!(store.get(FAVORITES_KEY).unwrap(), None);
        store.set(PHONE_KEY, "+7".to_owned()).unwrap();
        assert_eq!(JsonFileStore::open(&path).get(PHONE_KEY).unwrap().as_deref(), Some("+7"));
    }

    #[test]
    fn missing_file_opens_empty_and_remove_is_quiet() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path().join("absent.json"));
        store.remove(USERNAME_KEY).unwrap();
        assert!(!store.path().exists());
    }
}
