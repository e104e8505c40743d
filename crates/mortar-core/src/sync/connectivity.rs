//! Connectivity monitoring.

use tokio::sync::watch;

use crate::remote::RemoteStore;
use crate::storage::KvStore;
use crate::sync::notices::{Notice, NoticeSender};
use crate::sync::reconciler::Reconciler;
use crate::sync::status::StatusBoard;

/// Watches the platform's online/offline signal and reacts to edges.
///
/// The platform side is a plain `watch::Receiver<bool>`; shells feed it from
/// whatever their OS exposes. `run` seeds the shared state from the signal's
/// current value and then reacts once per transition: reconnecting triggers
/// a reconciliation pass, disconnecting surfaces an advisory. The loop ends
/// when the platform sender is dropped, so the subscription's lifetime is
/// the signal's lifetime (callers abort the driving task on teardown).
pub struct ConnectivityMonitor<R, K> {
    status: StatusBoard,
    notices: NoticeSender,
    reconciler: Reconciler<R, K>,
}

impl<R: RemoteStore, K: KvStore> ConnectivityMonitor<R, K> {
    /// Create a monitor driving the given reconciler
    pub fn new(status: StatusBoard, notices: NoticeSender, reconciler: Reconciler<R, K>) -> Self {
        Self {
            status,
            notices,
            reconciler,
        }
    }

    /// Consume the platform signal until its sender is dropped
    pub async fn run(self, mut signal: watch::Receiver<bool>) {
        let mut online = *signal.borrow_and_update();
        self.status.set_online(online);

        while signal.changed().await.is_ok() {
            let now_online = *signal.borrow_and_update();
            if now_online == online {
                // Repeated events on the same side of the edge are ignored
                continue;
            }
            online = now_online;
            self.status.set_online(online);

            if online {
                tracing::info!("connection restored, draining offline queue");
                if let Err(error) = self.reconciler.sync().await {
                    tracing::error!(%error, "reconciliation after reconnect failed");
                }
            } else {
                tracing::info!("connection lost, queueing further writes");
                self.notices.send(Notice::OfflineEntered);
            }
        }
    }
}
