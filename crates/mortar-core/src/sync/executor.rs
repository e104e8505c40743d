//! Replay of queued mutations against the remote store.

use std::sync::Arc;

use crate::queue::{QueueItem, QueuedMutation};
use crate::remote::{RemoteResult, RemoteStore};

/// Applies one queue item at a time to the remote store.
///
/// Dispatch is an exhaustive match over [`QueuedMutation`], so adding an
/// entity kind or action fails to compile until replay handles it. The
/// caller awaits every call before the next item: an update must never race
/// ahead of its own add.
#[derive(Clone)]
pub struct MutationExecutor<R> {
    remote: Arc<R>,
}

impl<R: RemoteStore> MutationExecutor<R> {
    /// Create an executor over the given remote store
    pub fn new(remote: Arc<R>) -> Self {
        Self { remote }
    }

    /// Apply a single queued mutation as one independent remote call
    pub async fn execute(&self, item: &QueueItem) -> RemoteResult<()> {
        match &item.mutation {
            QueuedMutation::AddMedicine(medicine) => self.remote.add_medicine(medicine).await,
            QueuedMutation::UpdateMedicine { id, patch } => {
                self.remote.update_medicine(*id, patch).await
            }
            QueuedMutation::DeleteMedicine { id } => self.remote.delete_medicine(*id).await,
            QueuedMutation::AddRevenue(revenue) => self.remote.add_revenue(revenue).await,
            QueuedMutation::UpdateRevenue { id, patch } => {
                self.remote.update_revenue(*id, patch).await
            }
            QueuedMutation::DeleteRevenue { id } => self.remote.delete_revenue(*id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Medicine, MedicineDraft, MedicinePatch};
    use crate::queue::QueueItemId;
    use crate::testing::RecordingRemote;

    fn item(mutation: QueuedMutation) -> QueueItem {
        QueueItem {
            id: QueueItemId::new(),
            mutation,
            enqueued_at: 0,
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn dispatches_to_matching_remote_call() {
        let remote = Arc::new(RecordingRemote::default());
        let executor = MutationExecutor::new(Arc::clone(&remote));

        let medicine = Medicine::new(MedicineDraft {
            name: "Amoxicillin".to_string(),
            quantity: 1,
            ..Default::default()
        });
        let id = medicine.id;

        executor
            .execute(&item(QueuedMutation::AddMedicine(medicine)))
            .await
            .unwrap();
        executor
            .execute(&item(QueuedMutation::UpdateMedicine {
                id,
                patch: MedicinePatch {
                    quantity: Some(3),
                    ..Default::default()
                },
            }))
            .await
            .unwrap();
        executor
            .execute(&item(QueuedMutation::DeleteMedicine { id }))
            .await
            .unwrap();

        assert_eq!(
            remote.calls().await,
            vec![
                "add_medicine Amoxicillin".to_string(),
                format!("update_medicine {id}"),
                format!("delete_medicine {id}"),
            ]
        );
    }
}
