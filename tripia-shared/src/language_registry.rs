//! Single owner of the stored interface language.

use strum::IntoEnumIterator;

use crate::models::language::{Language, LanguageOption};
use crate::storage::KeyValueStore;

/// Storage key of the language preference. Deliberately outside the
/// `lg:settings:` namespace so that a settings reset keeps it.
pub const LANGUAGE_KEY: &str = "lg:chat:language";

/// Reads and writes the language preference.
#[derive(Debug, Clone)]
pub struct LanguageRegistry<S> {
    storage: Option<S>,
}

impl<S: KeyValueStore> LanguageRegistry<S> {
    /// Creates a registry; `None` means no storage is available.
    pub fn new(storage: Option<S>) -> Self {
        Self { storage }
    }

    /// Supported languages in display order.
    pub fn list_supported() -> Vec<LanguageOption> {
        Language::iter()
            .map(|language| LanguageOption {
                language,
                code: language.code(),
                label: language.label(),
            })
            .collect()
    }

    /// Stored language, or the default when absent, unsupported or unreadable.
    pub fn get_stored(&self) -> Language {
        let Some(storage) = &self.storage else {
            return Language::default();
        };
        match storage.get(LANGUAGE_KEY) {
            Ok(Some(code)) => Language::from_code(&code).unwrap_or_else(|| {
                tracing::debug!(%code, "unsupported stored language, using default");
                Language::default()
            }),
            Ok(None) => Language::default(),
            Err(error) => {
                tracing::warn!(%error, "failed to read stored language");
                Language::default()
            }
        }
    }

    /// Persists `code` as is. Validation happens on read.
    pub fn set_stored(&self, code: &str) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(error) = storage.set(LANGUAGE_KEY, code) {
            tracing::warn!(%error, "failed to persist language preference");
        }
    }
}
