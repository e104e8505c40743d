//! Key-value access over the local database.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use libsql::params;
use tokio::sync::Mutex;

use super::{Database, StorageResult};

/// Durable key-value storage with JSON string values.
///
/// This is the only interface the offline queue and the mirror snapshots
/// consume; callers own (de)serialization of the values.
#[allow(async_fn_in_trait)]
pub trait KvStore: Clone + Send + Sync + 'static {
    /// Read the value stored under `key`, if any
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete the value stored under `key`; missing keys are not an error
    async fn remove(&self, key: &str) -> StorageResult<()>;
}

/// `KvStore` backed by the local libSQL database
#[derive(Clone)]
pub struct LibSqlKvStore {
    db: Arc<Mutex<Database>>,
}

impl LibSqlKvStore {
    /// Open (or create) the backing database at the given filesystem path
    pub async fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::open(path).await?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
        })
    }

    /// Open an in-memory store (primarily for tests)
    pub async fn open_in_memory() -> StorageResult<Self> {
        let db = Database::open_in_memory().await?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
        })
    }
}

impl KvStore for LibSqlKvStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let db = self.db.lock().await;
        let mut rows = db
            .connection()
            .query("SELECT value FROM kv WHERE key = ?1", params![key])
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(row.get::<String>(0)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let db = self.db.lock().await;
        db.connection()
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let db = self.db.lock().await;
        db.connection()
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .await?;
        Ok(())
    }
}

/// In-memory `KvStore` (primarily for tests)
#[derive(Clone, Default)]
pub struct MemoryKvStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKvStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test(flavor = "multi_thread")]
    async fn memory_roundtrip() {
        let kv = MemoryKvStore::new();
        assert_eq!(kv.get("a").await.unwrap(), None);

        kv.set("a", "1").await.unwrap();
        assert_eq!(kv.get("a").await.unwrap().as_deref(), Some("1"));

        kv.remove("a").await.unwrap();
        assert_eq!(kv.get("a").await.unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn libsql_roundtrip_and_overwrite() {
        let kv = LibSqlKvStore::open_in_memory().await.unwrap();

        kv.set("queue", r#"[{"id":1}]"#).await.unwrap();
        kv.set("queue", r#"[{"id":2}]"#).await.unwrap();
        assert_eq!(
            kv.get("queue").await.unwrap().as_deref(),
            Some(r#"[{"id":2}]"#)
        );

        kv.remove("queue").await.unwrap();
        kv.remove("queue").await.unwrap(); // Missing key is fine
        assert_eq!(kv.get("queue").await.unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn libsql_persists_across_reopen() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("kv.db");

        {
            let kv = LibSqlKvStore::open(&path).await.unwrap();
            kv.set("mirror/medicines", "[]").await.unwrap();
        }

        let kv = LibSqlKvStore::open(&path).await.unwrap();
        assert_eq!(
            kv.get("mirror/medicines").await.unwrap().as_deref(),
            Some("[]")
        );
    }
}
