//! Facade error types.

use thiserror::Error;

/// Result type for mutating and administrative facade operations.
///
/// Read and discovery operations do not use this type; they degrade to empty
/// results instead of surfacing errors.
pub type AdminResult<T> = Result<T, AdminError>;

/// Facade errors.
#[derive(Debug, Error)]
pub enum AdminError {
    /// The facade has no active connection.
    #[error("not connected to a vector store")]
    NotConnected,

    /// An update was requested for a record without an id.
    #[error("record is missing an id")]
    MissingRecordId,

    /// Error from the store client.
    #[error("store error: {0}")]
    Store(#[from] vexa_chroma::Error),

    /// Backend-specific error.
    #[error("backend error: {0}")]
    Backend(String),
}

impl AdminError {
    /// Creates a backend error.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
