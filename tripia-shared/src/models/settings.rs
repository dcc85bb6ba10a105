use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use super::language::Language;

/// Namespace shared by every settings key; reset clears exactly this prefix.
pub const SETTINGS_KEY_PREFIX: &str = "lg:settings:";
/// Storage key of [`Settings::hide_tool_calls`].
pub const HIDE_TOOL_CALLS_KEY: &str = "lg:settings:hideToolCalls";
/// Storage key of [`Settings::theme`].
pub const THEME_KEY: &str = "lg:settings:theme";
/// Storage key of [`Settings::auto_scroll`].
pub const AUTO_SCROLL_KEY: &str = "lg:settings:autoScroll";
/// Storage key of [`Settings::enable_sounds`].
pub const ENABLE_SOUNDS_KEY: &str = "lg:settings:enableSounds";
/// Storage key of [`Settings::show_thread_history`].
pub const SHOW_THREAD_HISTORY_KEY: &str = "lg:settings:showThreadHistory";

/// Colour theme preference.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    /// Always light.
    Light,
    /// Always dark.
    Dark,
    /// Follow the operating system preference.
    #[default]
    System,
}

impl Theme {
    /// Resolves the concrete theme to paint given the system preference.
    pub fn resolve(self, system_prefers_dark: bool) -> Theme {
        match self {
            Theme::System if system_prefers_dark => Theme::Dark,
            Theme::System => Theme::Light,
            other => other,
        }
    }
}

/// User interface preferences.
///
/// Always fully populated; [`Settings::default`] holds the canonical defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Interface and agent language.
    pub language: Language,
    /// Suppress tool calls and tool results in the message list.
    pub hide_tool_calls: bool,
    /// Colour theme.
    pub theme: Theme,
    /// Scroll to the newest message automatically.
    pub auto_scroll: bool,
    /// Play a chime when the assistant starts answering.
    pub enable_sounds: bool,
    /// Show the thread history sidebar.
    pub show_thread_history: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::PtBr,
            hide_tool_calls: false,
            theme: Theme::System,
            auto_scroll: true,
            enable_sounds: false,
            show_thread_history: true,
        }
    }
}

impl Settings {
    /// Returns a copy with every field of `patch` that is set applied.
    pub fn merged(&self, patch: &SettingsPatch) -> Settings {
        Settings {
            language: patch.language.unwrap_or(self.language),
            hide_tool_calls: patch.hide_tool_calls.unwrap_or(self.hide_tool_calls),
            theme: patch.theme.unwrap_or(self.theme),
            auto_scroll: patch.auto_scroll.unwrap_or(self.auto_scroll),
            enable_sounds: patch.enable_sounds.unwrap_or(self.enable_sounds),
            show_thread_history: patch
                .show_thread_history
                .unwrap_or(self.show_thread_history),
        }
    }
}

/// A partial set of settings changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    /// New language, if changed.
    pub language: Option<Language>,
    /// New tool-call visibility, if changed.
    pub hide_tool_calls: Option<bool>,
    /// New theme, if changed.
    pub theme: Option<Theme>,
    /// New auto-scroll flag, if changed.
    pub auto_scroll: Option<bool>,
    /// New sound flag, if changed.
    pub enable_sounds: Option<bool>,
    /// New sidebar flag, if changed.
    pub show_thread_history: Option<bool>,
}

impl SettingsPatch {
    /// A patch that sets every field to the values of `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            language: Some(settings.language),
            hide_tool_calls: Some(settings.hide_tool_calls),
            theme: Some(settings.theme),
            auto_scroll: Some(settings.auto_scroll),
            enable_sounds: Some(settings.enable_sounds),
            show_thread_history: Some(settings.show_thread_history),
        }
    }

    /// Sets the language.
    #[must_use]
    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Sets tool-call visibility.
    #[must_use]
    pub fn hide_tool_calls(mut self, hide: bool) -> Self {
        self.hide_tool_calls = Some(hide);
        self
    }

    /// Sets the theme.
    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Sets auto-scroll.
    #[must_use]
    pub fn auto_scroll(mut self, enabled: bool) -> Self {
        self.auto_scroll = Some(enabled);
        self
    }

    /// Sets notification sounds.
    #[must_use]
    pub fn enable_sounds(mut self, enabled: bool) -> Self {
        self.enable_sounds = Some(enabled);
        self
    }

    /// Sets thread history visibility.
    #[must_use]
    pub fn show_thread_history(mut self, show: bool) -> Self {
        self.show_thread_history = Some(show);
        self
    }

    /// Returns `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
