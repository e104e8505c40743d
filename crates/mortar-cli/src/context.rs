//! Shared service stack the command handlers run against.

use std::path::PathBuf;
use std::sync::Arc;

use mortar_core::config::RemoteConfig;
use mortar_core::queue::OfflineQueue;
use mortar_core::remote::HttpRemoteStore;
use mortar_core::services::{Bulletins, Ledger, Purchasing, Records};
use mortar_core::storage::LibSqlKvStore;
use mortar_core::sync::{notice_channel, MirrorStore, NoticeReceiver, Reconciler, StatusBoard};

use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

const DB_FILE_NAME: &str = "offline.db";

/// Everything a command handler may need, wired once per invocation
pub struct Context {
    pub records: Records<HttpRemoteStore, LibSqlKvStore>,
    pub reconciler: Reconciler<HttpRemoteStore, LibSqlKvStore>,
    pub ledger: Ledger<HttpRemoteStore>,
    pub purchasing: Purchasing<HttpRemoteStore>,
    pub bulletins: Bulletins<HttpRemoteStore>,
    pub status: StatusBoard,
    pub queue: OfflineQueue<LibSqlKvStore>,
    pub mirror: MirrorStore<LibSqlKvStore>,
    pub notice_rx: NoticeReceiver,
}

impl Context {
    /// Build the stack for one CLI invocation.
    ///
    /// `require_remote` commands fail fast when no remote is configured;
    /// offline-only paths run against a placeholder that is never called.
    pub async fn build(
        db_path: Option<PathBuf>,
        profile: Option<&str>,
        offline: bool,
        require_remote: bool,
    ) -> Result<Self, CliError> {
        let remote_config = resolve_remote_config(profile)?;
        let remote_config = match remote_config {
            Some(config) => config,
            None if require_remote => return Err(CliError::RemoteNotConfigured),
            // Never dialed: every write is queued while offline
            None => RemoteConfig::new("https://remote.unconfigured.invalid", None)
                .map_err(CliError::Core)?,
        };

        let db_path = db_path.unwrap_or_else(default_db_path);
        tracing::debug!(db = %db_path.display(), "opening offline store");
        let kv = LibSqlKvStore::open(&db_path).await?;
        let queue = OfflineQueue::new(kv.clone());
        let mirror = MirrorStore::load(kv).await?;
        let status = StatusBoard::new(!offline);
        let (notices, notice_rx) = notice_channel();

        let remote = Arc::new(HttpRemoteStore::new(remote_config).map_err(mortar_core::Error::from)?);
        let records = Records::new(
            Arc::clone(&remote),
            queue.clone(),
            mirror.clone(),
            status.clone(),
        );
        let reconciler = Reconciler::new(
            queue.clone(),
            Arc::clone(&remote),
            mirror.clone(),
            status.clone(),
            notices,
        );

        Ok(Self {
            ledger: Ledger::new(Arc::clone(&remote)),
            purchasing: Purchasing::new(Arc::clone(&remote)),
            bulletins: Bulletins::new(remote),
            records,
            reconciler,
            status,
            queue,
            mirror,
            notice_rx,
        })
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mortar")
        .join(DB_FILE_NAME)
}

/// Profile config first, env-mode (`MORTAR_REMOTE_URL`/`MORTAR_API_KEY`) as
/// fallback.
fn resolve_remote_config(profile: Option<&str>) -> Result<Option<RemoteConfig>, CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile);

    if let Some(profile) = config.profile(&profile_name) {
        if let Some(url) = profile.remote_url() {
            let remote = RemoteConfig::new(url, profile.api_key()).map_err(CliError::Core)?;
            return Ok(Some(remote));
        }
    }

    if let Ok(url) = std::env::var("MORTAR_REMOTE_URL") {
        let api_key = std::env::var("MORTAR_API_KEY").ok();
        let remote = RemoteConfig::new(url, api_key).map_err(CliError::Core)?;
        return Ok(Some(remote));
    }

    Ok(None)
}
