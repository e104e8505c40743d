use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] mortar_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error("Invalid quote line '{0}': expected NAME:QTY:UNIT_PRICE")]
    InvalidQuoteLine(String),
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Cannot sync while --offline; reconnect and retry")]
    OfflineSync,
    #[error(
        "No remote is configured. Run `mortar config init --remote-url ... --api-key ...`, or set MORTAR_REMOTE_URL/MORTAR_API_KEY."
    )]
    RemoteNotConfigured,
}

impl From<mortar_core::storage::StorageError> for CliError {
    fn from(error: mortar_core::storage::StorageError) -> Self {
        Self::Core(error.into())
    }
}
