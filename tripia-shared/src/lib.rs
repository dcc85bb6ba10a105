#![cfg_attr(not(test), forbid(unsafe_code))]

//! Platform-neutral core of the Trip-IA web client.
//!
//! Everything here compiles for both the browser and the host, so the
//! invariant-bearing logic (settings persistence, content extraction, stream
//! decoding, branching) is tested with plain `cargo test`.

pub mod agent;
pub mod branching;
pub mod chime;
pub mod language_registry;
pub mod models;
pub mod notices;
pub mod settings_store;
pub mod sse;
pub mod storage;

pub use branching::{BranchTree, MessageMetadata};
pub use language_registry::{LANGUAGE_KEY, LanguageRegistry};
pub use models::*;
pub use notices::ErrorAnnouncer;
pub use settings_store::SettingsStore;
pub use sse::{RunEvent, SseDecoder, SseFrame};
pub use storage::{KeyValueStore, MemoryStore};
