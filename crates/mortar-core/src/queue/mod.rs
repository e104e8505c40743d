//! Persistent offline mutation queue
//!
//! Writes made while disconnected are captured as [`QueueItem`]s and kept in
//! durable storage until a reconciliation pass replays them against the
//! remote store. Items are replayed strictly in enqueue order; the queue is
//! cleared only after a pass in which every item was applied.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::{
    Medicine, MedicineId, MedicinePatch, Revenue, RevenueId, RevenuePatch,
};
use crate::storage::{KvStore, StorageResult};
use crate::util::unix_millis_now;

/// Storage key holding the serialized queue
const QUEUE_KEY: &str = "offline/queue";

/// A unique identifier for a queued mutation, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueueItemId(Uuid);

impl QueueItemId {
    /// Create a new unique queue item ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for QueueItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QueueItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of entity a queued mutation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Medicine,
    Revenue,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Medicine => write!(f, "medicine"),
            Self::Revenue => write!(f, "revenue"),
        }
    }
}

/// What a queued mutation does to its entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationAction {
    Add,
    Update,
    Delete,
}

impl fmt::Display for MutationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// A deferred write, tagged by entity and action so replay dispatch is
/// exhaustive and compiler-checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueuedMutation {
    AddMedicine(Medicine),
    UpdateMedicine {
        id: MedicineId,
        patch: MedicinePatch,
    },
    DeleteMedicine {
        id: MedicineId,
    },
    AddRevenue(Revenue),
    UpdateRevenue {
        id: RevenueId,
        patch: RevenuePatch,
    },
    DeleteRevenue {
        id: RevenueId,
    },
}

impl QueuedMutation {
    /// Entity kind this mutation targets
    #[must_use]
    pub const fn entity_kind(&self) -> EntityKind {
        match self {
            Self::AddMedicine(_) | Self::UpdateMedicine { .. } | Self::DeleteMedicine { .. } => {
                EntityKind::Medicine
            }
            Self::AddRevenue(_) | Self::UpdateRevenue { .. } | Self::DeleteRevenue { .. } => {
                EntityKind::Revenue
            }
        }
    }

    /// Action this mutation performs
    #[must_use]
    pub const fn action(&self) -> MutationAction {
        match self {
            Self::AddMedicine(_) | Self::AddRevenue(_) => MutationAction::Add,
            Self::UpdateMedicine { .. } | Self::UpdateRevenue { .. } => MutationAction::Update,
            Self::DeleteMedicine { .. } | Self::DeleteRevenue { .. } => MutationAction::Delete,
        }
    }
}

/// A pending mutation waiting for replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueItem {
    /// Unique identifier, assigned at enqueue time
    pub id: QueueItemId,
    /// The deferred write
    pub mutation: QueuedMutation,
    /// Enqueue timestamp (Unix ms), the replay ordering key
    pub enqueued_at: i64,
}

/// Durable FIFO of deferred writes.
///
/// Cheap to clone; clones share the same storage and write lock, so an
/// enqueue racing a drain is a single atomic storage operation.
#[derive(Clone)]
pub struct OfflineQueue<K> {
    kv: K,
    write_lock: Arc<Mutex<()>>,
}

impl<K: KvStore> OfflineQueue<K> {
    /// Create a queue over the given storage
    pub fn new(kv: K) -> Self {
        Self {
            kv,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Append a mutation, assigning its id and enqueue timestamp.
    ///
    /// A storage-write failure propagates to the caller; the mutation is
    /// then not queued anywhere and the caller decides how to surface it.
    pub async fn enqueue(&self, mutation: QueuedMutation) -> StorageResult<QueueItem> {
        let item = QueueItem {
            id: QueueItemId::new(),
            mutation,
            enqueued_at: unix_millis_now(),
        };

        let _append = self.write_lock.lock().await;
        let mut items = self.load().await?;
        items.push(item.clone());
        self.persist(&items).await?;

        tracing::debug!(
            item = %item.id,
            entity = %item.mutation.entity_kind(),
            action = %item.mutation.action(),
            pending = items.len(),
            "queued offline mutation"
        );
        Ok(item)
    }

    /// All pending items sorted ascending by enqueue time, ties in insertion
    /// order. Does not remove anything.
    pub async fn drain_ordered(&self) -> StorageResult<Vec<QueueItem>> {
        let mut items = self.load().await?;
        // Stable sort keeps insertion order for equal timestamps
        items.sort_by_key(|item| item.enqueued_at);
        Ok(items)
    }

    /// Remove every pending item. Called only after a full successful drain.
    pub async fn clear(&self) -> StorageResult<()> {
        let _append = self.write_lock.lock().await;
        self.kv.remove(QUEUE_KEY).await
    }

    /// Number of pending items, for user-facing indicators
    pub async fn len(&self) -> StorageResult<usize> {
        Ok(self.load().await?.len())
    }

    /// Whether the queue has no pending items
    pub async fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len().await? == 0)
    }

    async fn load(&self) -> StorageResult<Vec<QueueItem>> {
        match self.kv.get(QUEUE_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    async fn persist(&self, items: &[QueueItem]) -> StorageResult<()> {
        let raw = serde_json::to_string(items)?;
        self.kv.set(QUEUE_KEY, &raw).await
    }
}
