use i18nrs::yew::use_translation;
use tripia_shared::models::{Settings, SettingsPatch, Theme};
use web_sys::window;
use yew::{Callback, hook, use_effect_with};
use yewdux::prelude::use_store;

use crate::models::app_state::SettingsState;

/// Settings plus the operations that change them.
#[derive(Clone, PartialEq)]
pub struct SettingsHandle {
    pub settings: Settings,
    /// Merges a partial update and persists the changed fields.
    pub update: Callback<SettingsPatch>,
    /// Clears stored settings and restores the defaults.
    pub reset: Callback<()>,
}

impl std::fmt::Debug for SettingsHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsHandle")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[hook]
pub fn use_settings() -> SettingsHandle {
    let (state, dispatch) = use_store::<SettingsState>();
    let (_, set_language) = use_translation();

    let update = {
        let dispatch = dispatch.clone();
        let set_language = set_language.clone();
        Callback::from(move |patch: SettingsPatch| {
            if patch.is_empty() {
                return;
            }
            if let Some(language) = patch.language {
                set_language.emit(language.code().to_string());
            }
            dispatch.reduce_mut(|state| {
                state.store.update(&patch);
            });
        })
    };

    // The stored language survives a reset but the in-memory one does not;
    // the interface follows memory until the next load.
    let reset = Callback::from(move |()| {
        dispatch.reduce_mut(|state| {
            state.store.reset();
        });
        let language = dispatch.get().settings().language;
        set_language.emit(language.code().to_string());
    });

    SettingsHandle {
        settings: state.settings().clone(),
        update,
        reset,
    }
}

/// Reads stored settings once on mount and keeps the page theme in sync.
#[hook]
pub fn use_settings_hydration() {
    let (state, dispatch) = use_store::<SettingsState>();
    let (i18n, set_language) = use_translation();

    {
        let current = i18n.get_current_language().to_string();
        use_effect_with((), move |()| {
            let mut language = None;
            dispatch.reduce_mut(|state| {
                if !state.loaded {
                    language = Some(state.store.load().language);
                    state.loaded = true;
                }
            });
            if let Some(language) = language
                && language.code() != current
            {
                set_language.emit(language.code().to_string());
            }
            || ()
        });
    }

    use_effect_with(state.settings().theme, |theme| {
        apply_theme(*theme);
        || ()
    });
}

fn system_prefers_dark() -> bool {
    window()
        .and_then(|window| window.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .is_some_and(|media_query| media_query.matches())
}

/// Sets `data-theme` on the root element.
pub fn apply_theme(theme: Theme) {
    let resolved = theme.resolve(system_prefers_dark());
    if let Some(window) = window()
        && let Some(document) = window.document()
        && let Some(html_element) = document.document_element()
    {
        let _ = html_element.set_attribute("data-theme", resolved.as_ref());
    }
}
