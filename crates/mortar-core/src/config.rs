//! Client configuration for the hosted pharmacy backend.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

/// Connection settings for the remote store.
///
/// `api_key` is a safe-to-ship public key; per-user credentials are handled
/// by the external auth provider and are never stored here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfig {
    /// Base URL of the hosted REST API (e.g. `https://api.example.com/v1`)
    pub base_url: String,
    /// Optional bearer token sent with every request
    #[serde(default)]
    pub api_key: Option<String>,
}

impl RemoteConfig {
    /// Create a validated config, normalizing the base URL.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let base_url = normalize_text_option(Some(base_url.into()))
            .ok_or_else(|| Error::InvalidInput("remote base URL must not be empty".to_string()))?;
        if !is_http_url(&base_url) {
            return Err(Error::InvalidInput(
                "remote base URL must include http:// or https://".to_string(),
            ));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: normalize_text_option(api_key),
        })
    }
}

impl std::fmt::Display for RemoteConfig {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the key itself
        write!(
            formatter,
            "{} (key {})",
            self.base_url,
            if self.api_key.is_some() { "set" } else { "unset" }
        )
    }
}
