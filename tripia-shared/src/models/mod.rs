pub mod content;
pub mod errors;
pub mod language;
pub mod message;
pub mod settings;
pub mod thread;
pub mod ui;

pub use content::{
    ContentBlock, EMPTY_MESSAGE, INVALID_FORMAT, MULTIMODAL_MESSAGE, SUPPORTED_FILE_TYPES,
    attachment_blocks, content_string, is_supported_file_type,
};
pub use errors::{ComponentError, ErrorResponse, StorageError};
pub use language::{Language, LanguageOption};
pub use message::{DO_NOT_RENDER_ID_PREFIX, Message, MessageType, ToolCall};
pub use settings::{Settings, SettingsPatch, Theme};
pub use thread::{
    Checkpoint, Interrupt, RunInput, RunRequest, StreamMode, Thread, ThreadState, ThreadValues,
    thread_label,
};
pub use ui::{DescriptorCheck, FailureKind, UiDescriptor, classify_failure, is_known_failure};
