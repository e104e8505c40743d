//! Error types for mortar-core

use thiserror::Error;

use crate::remote::RemoteError;
use crate::storage::StorageError;

/// Result type alias using mortar-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mortar-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Durable local storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A remote store call failed
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    /// The post-drain authoritative re-fetch failed; the queue is kept
    #[error("Refresh failed: {0}")]
    Refresh(#[source] RemoteError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),
}
