//! `localStorage` backend for the shared [`KeyValueStore`] seam.

use tripia_shared::models::StorageError;
use tripia_shared::storage::KeyValueStore;
use wasm_bindgen::JsValue;

use crate::diagnostics;

/// Handle to the window's local storage.
#[derive(Debug, Clone)]
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    /// Opens local storage. `None` when rendering outside a browser or when
    /// the user disabled storage.
    pub fn open() -> Option<Self> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = web_sys::window()?.local_storage().ok().flatten()?;
            Some(Self { storage })
        }
        #[cfg(not(target_arch = "wasm32"))]
        None
    }
}

fn backend_error(error: &JsValue) -> StorageError {
    StorageError::Backend {
        message: error
            .as_string()
            .unwrap_or_else(|| format!("{error:?}")),
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(|error| backend_error(&error))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|_| {
                diagnostics::warn(&format!("localStorage rejected a write to {key}"));
                StorageError::QuotaExceeded { key: key.into() }
            })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|error| backend_error(&error))
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let length = self.storage.length().map_err(|error| backend_error(&error))?;
        let mut keys = Vec::new();
        for index in 0..length {
            if let Some(key) = self
                .storage
                .key(index)
                .map_err(|error| backend_error(&error))?
            {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
