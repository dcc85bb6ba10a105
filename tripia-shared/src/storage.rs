//! Key-value persistence seam.
//!
//! The browser crate implements [`KeyValueStore`] over `localStorage`; tests
//! and server rendering use [`MemoryStore`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::models::errors::StorageError;

/// A string key-value store with the semantics of browser local storage.
pub trait KeyValueStore {
    /// Reads `key`; `Ok(None)` when absent.
    ///
    /// # Errors
    /// Returns a [`StorageError`] when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes `value` under `key`.
    ///
    /// # Errors
    /// Returns a [`StorageError`] when the write is rejected.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`; removing an absent key succeeds.
    ///
    /// # Errors
    /// Returns a [`StorageError`] when the backend cannot be modified.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Lists every stored key.
    ///
    /// # Errors
    /// Returns a [`StorageError`] when the backend cannot be enumerated.
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

/// In-memory store. Clones share the same entries, like two handles to the
/// same `localStorage`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
    reject_writes: Rc<RefCell<bool>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        store.entries.borrow_mut().extend(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
        store
    }

    /// Makes every subsequent write fail with [`StorageError::QuotaExceeded`].
    pub fn reject_writes(&self, reject: bool) {
        *self.reject_writes.borrow_mut() = reject;
    }

    /// Snapshot of the stored entries.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries.borrow().clone()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if *self.reject_writes.borrow() {
            return Err(StorageError::QuotaExceeded { key: key.into() });
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if *self.reject_writes.borrow() {
            return Err(StorageError::Backend {
                message: format!("cannot remove `{key}`"),
            });
        }
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.entries.borrow().keys().cloned().collect())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        (**self).keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("a", "1").unwrap();
        assert_eq!(other.get("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn rejected_writes_leave_entries_unchanged() {
        let store = MemoryStore::with_entries([("a", "1")]);
        store.reject_writes(true);

        assert!(matches!(
            store.set("a", "2"),
            Err(StorageError::QuotaExceeded { .. })
        ));
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn removing_absent_key_succeeds() {
        let store = MemoryStore::new();
        assert!(store.remove("missing").is_ok());
        assert!(store.keys().unwrap().is_empty());
    }
}
