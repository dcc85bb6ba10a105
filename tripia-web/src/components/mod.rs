pub(crate) mod artifact_panel;
pub(crate) mod assistant_message;
pub(crate) mod branch_switcher;
pub mod external;
pub(crate) mod human_message;
pub(crate) mod interrupt;
pub(crate) mod language_selector;
pub(crate) mod loading;
pub(crate) mod settings_modal;
pub(crate) mod theme_selector;
pub(crate) mod thread_footer;
pub(crate) mod thread_header;
pub(crate) mod thread_history;
pub(crate) mod toast;
pub(crate) mod tool_calls;
pub(crate) mod typing_indicator;
pub(crate) mod welcome_screen;

// Re-export components for convenience
pub use artifact_panel::ArtifactPanel;
pub use assistant_message::{AssistantInterrupt, AssistantMessage, AssistantMessageLoading};
pub use human_message::{HumanAction, HumanMessage};
pub use loading::Loading;
pub use settings_modal::SettingsModal;
pub use thread_footer::ThreadFooter;
pub use thread_header::ThreadHeader;
pub use thread_history::ThreadHistory;
pub use toast::Toaster;
pub use welcome_screen::WelcomeScreen;
