//! Durable local storage for mortar
//!
//! A small libsql database holds everything the client must keep across
//! restarts: the offline mutation queue and the optimistic mirror snapshots.
//! Both are stored as JSON strings behind the [`KvStore`] interface.

mod connection;
mod kv;
mod migrations;

use thiserror::Error;

pub use connection::Database;
pub use kv::{KvStore, LibSqlKvStore, MemoryKvStore};

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Errors from durable local storage
#[derive(Error, Debug)]
pub enum StorageError {
    /// libSQL error
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
