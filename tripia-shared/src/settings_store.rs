//! Persistence of [`Settings`] under the `lg:settings:` namespace.

use std::str::FromStr;

use crate::language_registry::LanguageRegistry;
use crate::models::settings::{
    AUTO_SCROLL_KEY, ENABLE_SOUNDS_KEY, HIDE_TOOL_CALLS_KEY, SETTINGS_KEY_PREFIX,
    SHOW_THREAD_HISTORY_KEY, Settings, SettingsPatch, THEME_KEY,
};
use crate::storage::KeyValueStore;

/// Owns the in-memory settings and mirrors every change to storage.
///
/// Storage is optional: without it every operation is memory-only. Storage
/// failures are logged and never returned, the in-memory state still changes.
#[derive(Debug, Clone)]
pub struct SettingsStore<S> {
    storage: Option<S>,
    languages: LanguageRegistry<S>,
    settings: Settings,
}

impl<S: KeyValueStore + Clone> SettingsStore<S> {
    /// Creates a store holding the defaults. Nothing is read until [`load`].
    ///
    /// [`load`]: SettingsStore::load
    pub fn new(storage: Option<S>) -> Self {
        Self {
            languages: LanguageRegistry::new(storage.clone()),
            storage,
            settings: Settings::default(),
        }
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Hydrates from storage. Each key falls back to its default when it is
    /// absent, unreadable or not a recognised value.
    pub fn load(&mut self) -> &Settings {
        let Some(storage) = &self.storage else {
            return &self.settings;
        };
        let defaults = Settings::default();
        self.settings = Settings {
            language: self.languages.get_stored(),
            hide_tool_calls: read_or(storage, HIDE_TOOL_CALLS_KEY, defaults.hide_tool_calls),
            theme: read_or(storage, THEME_KEY, defaults.theme),
            auto_scroll: read_or(storage, AUTO_SCROLL_KEY, defaults.auto_scroll),
            enable_sounds: read_or(storage, ENABLE_SOUNDS_KEY, defaults.enable_sounds),
            show_thread_history: read_or(
                storage,
                SHOW_THREAD_HISTORY_KEY,
                defaults.show_thread_history,
            ),
        };
        &self.settings
    }

    /// Applies `patch`: every present field is written to its key and to
    /// memory, absent fields are left alone.
    pub fn update(&mut self, patch: &SettingsPatch) -> &Settings {
        if let Some(language) = patch.language {
            self.languages.set_stored(language.code());
        }
        if let Some(storage) = &self.storage {
            let writes = [
                (HIDE_TOOL_CALLS_KEY, patch.hide_tool_calls.map(|v| v.to_string())),
                (THEME_KEY, patch.theme.map(|v| v.to_string())),
                (AUTO_SCROLL_KEY, patch.auto_scroll.map(|v| v.to_string())),
                (ENABLE_SOUNDS_KEY, patch.enable_sounds.map(|v| v.to_string())),
                (
                    SHOW_THREAD_HISTORY_KEY,
                    patch.show_thread_history.map(|v| v.to_string()),
                ),
            ];
            for (key, value) in writes {
                let Some(value) = value else { continue };
                if let Err(error) = storage.set(key, &value) {
                    tracing::warn!(%error, key, "settings change kept in memory only");
                }
            }
        }
        self.settings = self.settings.merged(patch);
        &self.settings
    }

    /// Removes every `lg:settings:` key and restores the defaults in memory.
    ///
    /// The language preference lives under its own key and survives.
    pub fn reset(&mut self) -> &Settings {
        if let Some(storage) = &self.storage {
            match storage.keys() {
                Ok(keys) => {
                    for key in keys.iter().filter(|key| key.starts_with(SETTINGS_KEY_PREFIX)) {
                        if let Err(error) = storage.remove(key) {
                            tracing::warn!(%error, key = %key, "failed to clear setting");
                        }
                    }
                }
                Err(error) => tracing::warn!(%error, "failed to enumerate settings keys"),
            }
        }
        self.settings = Settings::default();
        &self.settings
    }
}

fn read_or<S, T>(storage: &S, key: &str, default: T) -> T
where
    S: KeyValueStore,
    T: FromStr,
{
    match storage.get(key) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
            tracing::debug!(key, value = %raw, "ignoring unrecognised stored setting");
            default
        }),
        Ok(None) => default,
        Err(error) => {
            tracing::warn!(%error, key, "failed to read setting");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language_registry::LANGUAGE_KEY;
    use crate::models::language::Language;
    use crate::models::settings::Theme;
    use crate::storage::MemoryStore;

    fn reload(store: &MemoryStore) -> Settings {
        SettingsStore::new(Some(store.clone())).load().clone()
    }

    #[test]
    fn load_without_storage_yields_defaults() {
        let mut settings = SettingsStore::<MemoryStore>::new(None);
        assert_eq!(settings.load(), &Settings::default());
    }

    #[test]
    fn unrecognised_theme_falls_back_to_system() {
        let store = MemoryStore::with_entries([(THEME_KEY, "maybe")]);
        assert_eq!(reload(&store).theme, Theme::System);
    }

    #[test]
    fn unparsable_booleans_fall_back_to_defaults() {
        let store = MemoryStore::with_entries([
            (AUTO_SCROLL_KEY, "yes"),
            (HIDE_TOOL_CALLS_KEY, "1"),
        ]);
        let loaded = reload(&store);
        assert!(loaded.auto_scroll);
        assert!(!loaded.hide_tool_calls);
    }

    #[test]
    fn update_survives_reload_and_keeps_other_fields() {
        let store = MemoryStore::with_entries([(THEME_KEY, "dark")]);
        let mut settings = SettingsStore::new(Some(store.clone()));
        let before = settings.load().clone();

        settings.update(&SettingsPatch::default().enable_sounds(true));

        let after = reload(&store);
        assert!(after.enable_sounds);
        assert_eq!(
            Settings {
                enable_sounds: before.enable_sounds,
                ..after
            },
            before
        );
    }

    #[test]
    fn values_are_string_encoded() {
        let store = MemoryStore::new();
        let mut settings = SettingsStore::new(Some(store.clone()));
        settings.update(
            &SettingsPatch::default()
                .theme(Theme::Light)
                .hide_tool_calls(true),
        );

        let snapshot = store.snapshot();
        assert_eq!(snapshot[THEME_KEY], "light");
        assert_eq!(snapshot[HIDE_TOOL_CALLS_KEY], "true");
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn disjoint_updates_persist_independently() {
        let store = MemoryStore::new();
        let mut settings = SettingsStore::new(Some(store.clone()));

        settings.update(&SettingsPatch::default().auto_scroll(false));
        settings.update(&SettingsPatch::default().show_thread_history(false));

        let loaded = reload(&store);
        assert!(!loaded.auto_scroll);
        assert!(!loaded.show_thread_history);
    }

    #[test]
    fn update_is_idempotent() {
        let store = MemoryStore::new();
        let mut settings = SettingsStore::new(Some(store.clone()));
        let patch = SettingsPatch::default().theme(Theme::Dark);

        let first = settings.update(&patch).clone();
        let second = settings.update(&patch).clone();

        assert_eq!(first, second);
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn reset_restores_defaults_and_spares_foreign_keys() {
        let store = MemoryStore::with_entries([("other:key", "kept")]);
        let mut settings = SettingsStore::new(Some(store.clone()));
        settings.update(
            &SettingsPatch::default()
                .language(Language::En)
                .theme(Theme::Dark)
                .enable_sounds(true),
        );

        settings.reset();

        assert_eq!(settings.settings(), &Settings::default());
        let snapshot = store.snapshot();
        assert!(!snapshot.keys().any(|key| key.starts_with(SETTINGS_KEY_PREFIX)));
        assert_eq!(snapshot["other:key"], "kept");
        assert_eq!(snapshot[LANGUAGE_KEY], "en");

        let reloaded = reload(&store);
        assert_eq!(
            reloaded,
            Settings {
                language: Language::En,
                ..Settings::default()
            }
        );
    }

    #[test]
    fn reset_then_load_without_language_yields_defaults() {
        let store = MemoryStore::new();
        let mut settings = SettingsStore::new(Some(store.clone()));
        settings.update(&SettingsPatch::default().theme(Theme::Light).auto_scroll(false));
        settings.reset();
        assert_eq!(reload(&store), Settings::default());
    }

    #[test]
    fn rejected_writes_still_update_memory() {
        let store = MemoryStore::new();
        store.reject_writes(true);
        let mut settings = SettingsStore::new(Some(store.clone()));

        let updated = settings
            .update(&SettingsPatch::default().enable_sounds(true).language(Language::En))
            .clone();

        assert!(updated.enable_sounds);
        assert_eq!(updated.language, Language::En);
        assert!(store.snapshot().is_empty());
        assert_eq!(settings.reset(), &Settings::default());
    }

    #[test]
    fn language_is_hydrated_from_the_registry() {
        let store = MemoryStore::with_entries([(LANGUAGE_KEY, "en")]);
        assert_eq!(reload(&store).language, Language::En);
    }
}
