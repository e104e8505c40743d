//! Reconciliation of offline writes with the remote store.
//!
//! A pass walks Idle -> Draining -> Refreshing -> Idle. Draining replays
//! every queued mutation strictly in enqueue order, one awaited call at a
//! time; a failed item is logged and the pass moves on. Refreshing then
//! re-fetches the authoritative lists and supersedes the optimistic mirror.
//! The queue is cleared only when every item succeeded and the refresh
//! succeeded; otherwise the next pass re-attempts the whole queue, which can
//! re-apply items that already went through. That trade-off is inherited
//! from the drain-then-clear design and is asserted by the tests below.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::queue::OfflineQueue;
use crate::remote::RemoteStore;
use crate::storage::KvStore;
use crate::sync::executor::MutationExecutor;
use crate::sync::mirror::MirrorStore;
use crate::sync::notices::{Notice, NoticeSender};
use crate::sync::status::StatusBoard;

/// What a call to [`Reconciler::sync`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A pass was already in progress; this call was a no-op
    AlreadyRunning,
    /// A pass ran to its end
    Completed(SyncReport),
}

/// Tally of one reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Items taken from the queue
    pub attempted: usize,
    /// Items the remote store accepted
    pub synced: usize,
    /// Items that failed and stay queued
    pub failed: usize,
    /// Whether the queue was cleared at the end of the pass
    pub queue_cleared: bool,
}

/// Orchestrates drain + refresh. Cheap to clone; clones share the guard, so
/// only one pass runs at a time no matter who triggers it.
#[derive(Clone)]
pub struct Reconciler<R, K> {
    queue: OfflineQueue<K>,
    executor: MutationExecutor<R>,
    remote: Arc<R>,
    mirror: MirrorStore<K>,
    status: StatusBoard,
    notices: NoticeSender,
    active: Arc<AtomicBool>,
}

/// Resets the pass guard and the public `syncing` flag on every exit path
struct PassGuard {
    active: Arc<AtomicBool>,
    status: StatusBoard,
}

impl Drop for PassGuard {
    fn drop(&mut self) {
        self.status.set_syncing(false);
        self.active.store(false, Ordering::SeqCst);
    }
}

impl<R: RemoteStore, K: KvStore> Reconciler<R, K> {
    /// Wire a reconciler over the shared queue, remote store, and mirror
    pub fn new(
        queue: OfflineQueue<K>,
        remote: Arc<R>,
        mirror: MirrorStore<K>,
        status: StatusBoard,
        notices: NoticeSender,
    ) -> Self {
        Self {
            queue,
            executor: MutationExecutor::new(Arc::clone(&remote)),
            remote,
            mirror,
            status,
            notices,
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Run one reconciliation pass.
    ///
    /// Idempotent while active: a second call during Draining/Refreshing
    /// returns [`SyncOutcome::AlreadyRunning`] without touching anything.
    /// There is no mid-pass cancellation; the pass runs to completion or to
    /// its first unrecoverable error.
    pub async fn sync(&self) -> Result<SyncOutcome> {
        if self
            .active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("reconciliation already in progress, ignoring trigger");
            return Ok(SyncOutcome::AlreadyRunning);
        }
        let _guard = PassGuard {
            active: Arc::clone(&self.active),
            status: self.status.clone(),
        };

        self.status.set_syncing(true);
        self.notices.send(Notice::SyncStarted);

        let items = match self.queue.drain_ordered().await {
            Ok(items) => items,
            Err(error) => {
                self.notices.send(Notice::SyncFailed {
                    message: error.to_string(),
                });
                return Err(error.into());
            }
        };

        if items.is_empty() {
            tracing::debug!("offline queue empty, nothing to replay");
            self.notices.send(Notice::SyncSucceeded { synced: 0 });
            return Ok(SyncOutcome::Completed(SyncReport::default()));
        }

        let attempted = items.len();
        let mut synced = 0usize;
        let mut failed = 0usize;
        for item in &items {
            match self.executor.execute(item).await {
                Ok(()) => synced += 1,
                Err(error) => {
                    // No rollback and no per-item retry; the item stays
                    // queued for the next pass
                    failed += 1;
                    tracing::warn!(
                        item = %item.id,
                        entity = %item.mutation.entity_kind(),
                        action = %item.mutation.action(),
                        %error,
                        "queued mutation failed, continuing with next item"
                    );
                }
            }
        }

        if let Err(error) = self.refresh().await {
            self.notices.send(Notice::SyncFailed {
                message: error.to_string(),
            });
            return Err(error);
        }

        if failed == 0 {
            self.queue.clear().await?;
            tracing::info!(synced, "reconciliation complete");
            self.notices.send(Notice::SyncSucceeded { synced });
            Ok(SyncOutcome::Completed(SyncReport {
                attempted,
                synced,
                failed,
                queue_cleared: true,
            }))
        } else {
            tracing::warn!(synced, failed, "reconciliation left items queued");
            self.notices.send(Notice::SyncFailed {
                message: format!("{failed} of {attempted} queued changes failed and remain queued"),
            });
            Ok(SyncOutcome::Completed(SyncReport {
                attempted,
                synced,
                failed,
                queue_cleared: false,
            }))
        }
    }

    /// Re-fetch the authoritative lists and supersede the mirror
    async fn refresh(&self) -> Result<()> {
        let medicines = self
            .remote
            .fetch_medicines()
            .await
            .map_err(Error::Refresh)?;
        let revenues = self.remote.fetch_revenues().await.map_err(Error::Refresh)?;
        self.mirror.apply_refresh(medicines, revenues).await?;
        Ok(())
    }
}
