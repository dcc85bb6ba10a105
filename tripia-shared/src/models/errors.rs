use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures of the key-value storage backing user preferences.
///
/// These never reach the user: callers degrade to in-memory state and log.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No storage is available (server rendering, disabled storage).
    #[error("storage is unavailable")]
    Unavailable,

    /// The backend rejected a write because it is full.
    #[error("storage quota exceeded while writing `{key}`")]
    QuotaExceeded { key: String },

    /// Any other backend failure.
    #[error("storage backend error: {message}")]
    Backend { message: String },
}

/// Failures raised while rendering an agent-supplied component.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// The registry has no renderer for the descriptor name.
    #[error("no component registered under `{name}`")]
    NotRegistered { name: String },

    /// The descriptor props did not have the expected shape.
    #[error("invalid props for `{name}`: {message}")]
    InvalidProps { name: String, message: String },

    /// Raised by the component itself while rendering or after mount.
    #[error("{message}")]
    Runtime { message: String },
}

impl ComponentError {
    /// Creates a runtime failure carrying the raw error text.
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime {
            message: message.into(),
        }
    }
}

/// Error body returned by the agent server.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone)]
pub struct ErrorResponse {
    /// The main error message.
    #[serde(alias = "detail", alias = "error")]
    pub message: String,
    /// Optional additional details about the error.
    #[serde(default)]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new error response with message and details.
    pub fn with_details(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: Some(details.into()),
        }
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{}: {}", self.message, details),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ErrorResponse {}
