pub mod notification_sound;
pub mod settings;
pub mod stream;

pub use notification_sound::use_notification_sound;
pub use settings::{SettingsHandle, use_settings, use_settings_hydration};
pub use stream::{StreamController, Submission, use_stream};
