//! Error types for chunking, storage, and indexing

use thiserror::Error;

/// Result type alias for sheets-rag operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the spreadsheet retrieval core
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed arguments to a synchronous API
    #[error("Validation error: {0}")]
    Validation(String),

    /// Failure reported by a Sheets/Drive collaborator
    #[error("Collaborator error: {message}")]
    Api {
        /// HTTP status, when the collaborator saw one
        status: Option<u16>,
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a collaborator error
    pub fn api(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a collaborator permission error (HTTP 403)
    pub fn permission(message: impl Into<String>) -> Self {
        Self::Api {
            status: Some(403),
            message: message.into(),
        }
    }

    /// Whether this error means "access denied" rather than a hard failure.
    ///
    /// The indexer skips the affected spreadsheet or tab on permission
    /// errors and aborts the run on anything else.
    pub fn is_permission(&self) -> bool {
        match self {
            Self::Api { status, message } => {
                *status == Some(403) || message.to_ascii_lowercase().contains("permission")
            }
            other => other.to_string().to_ascii_lowercase().contains("permission"),
        }
    }
}
