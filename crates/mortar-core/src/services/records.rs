//! Offline-first write path for shortage and revenue records.
//!
//! Every write checks connectivity first. Online, the remote store is
//! called directly and the confirmed projection is kept current. Offline,
//! the mutation is queued for replay and mirrored as pending so the UI can
//! show it immediately.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::{
    Medicine, MedicineDraft, MedicineId, MedicinePatch, Revenue, RevenueDraft, RevenueId,
    RevenuePatch,
};
use crate::queue::{OfflineQueue, QueuedMutation};
use crate::remote::RemoteStore;
use crate::storage::KvStore;
use crate::sync::{MirrorStore, StatusBoard};
use crate::util::normalize_text_option;

/// Shortage/revenue record service shared by the shells
#[derive(Clone)]
pub struct Records<R, K> {
    remote: Arc<R>,
    queue: OfflineQueue<K>,
    mirror: MirrorStore<K>,
    status: StatusBoard,
}

impl<R: RemoteStore, K: KvStore> Records<R, K> {
    /// Wire the service over the shared sync components
    pub fn new(
        remote: Arc<R>,
        queue: OfflineQueue<K>,
        mirror: MirrorStore<K>,
        status: StatusBoard,
    ) -> Self {
        Self {
            remote,
            queue,
            mirror,
            status,
        }
    }

    // --- shortages ---

    /// Register a medicine shortage
    pub async fn add_medicine(&self, mut draft: MedicineDraft) -> Result<Medicine> {
        draft.name = normalize_text_option(Some(draft.name))
            .ok_or_else(|| Error::InvalidInput("medicine name cannot be empty".to_string()))?;
        if draft.quantity == 0 {
            return Err(Error::InvalidInput(
                "shortage quantity must be at least 1".to_string(),
            ));
        }

        let medicine = Medicine::new(draft);
        if self.status.is_online() {
            self.remote.add_medicine(&medicine).await?;
            self.mirror.push_confirmed_medicine(medicine.clone()).await;
        } else {
            self.queue
                .enqueue(QueuedMutation::AddMedicine(medicine.clone()))
                .await?;
            self.mirror.add_pending_medicine(medicine.clone()).await?;
        }
        Ok(medicine)
    }

    /// Update a shortage entry
    pub async fn update_medicine(&self, id: MedicineId, patch: MedicinePatch) -> Result<()> {
        if patch.is_empty() {
            return Err(Error::InvalidInput(
                "update carries no fields".to_string(),
            ));
        }

        if self.status.is_online() {
            self.remote.update_medicine(id, &patch).await?;
            self.mirror.merge_confirmed_medicine(id, &patch).await;
        } else {
            self.queue
                .enqueue(QueuedMutation::UpdateMedicine {
                    id,
                    patch: patch.clone(),
                })
                .await?;
            self.mirror.merge_pending_medicine(id, &patch).await?;
        }
        Ok(())
    }

    /// Remove a shortage entry (e.g. restocked)
    pub async fn delete_medicine(&self, id: MedicineId) -> Result<()> {
        if self.status.is_online() {
            self.remote.delete_medicine(id).await?;
            self.mirror.remove_confirmed_medicine(id).await;
        } else {
            self.queue
                .enqueue(QueuedMutation::DeleteMedicine { id })
                .await?;
            self.mirror.remove_pending_medicine(id).await?;
        }
        Ok(())
    }

    /// Current shortage projection (confirmed then pending)
    pub async fn medicines(&self) -> Vec<Medicine> {
        self.mirror.projected_medicines().await
    }

    // --- revenues ---

    /// Log a shift revenue entry
    pub async fn add_revenue(&self, draft: RevenueDraft) -> Result<Revenue> {
        if draft.cash < 0 || draft.card < 0 || draft.banking < 0 {
            return Err(Error::InvalidInput(
                "revenue amounts cannot be negative".to_string(),
            ));
        }

        let revenue = Revenue::new(draft);
        if self.status.is_online() {
            self.remote.add_revenue(&revenue).await?;
            self.mirror.push_confirmed_revenue(revenue.clone()).await;
        } else {
            self.queue
                .enqueue(QueuedMutation::AddRevenue(revenue.clone()))
                .await?;
            self.mirror.add_pending_revenue(revenue.clone()).await?;
        }
        Ok(revenue)
    }

    /// Update a revenue entry
    pub async fn update_revenue(&self, id: RevenueId, patch: RevenuePatch) -> Result<()> {
        if patch.is_empty() {
            return Err(Error::InvalidInput(
                "update carries no fields".to_string(),
            ));
        }

        if self.status.is_online() {
            self.remote.update_revenue(id, &patch).await?;
            self.mirror.merge_confirmed_revenue(id, &patch).await;
        } else {
            self.queue
                .enqueue(QueuedMutation::UpdateRevenue {
                    id,
                    patch: patch.clone(),
                })
                .await?;
            self.mirror.merge_pending_revenue(id, &patch).await?;
        }
        Ok(())
    }

    /// Remove a revenue entry
    pub async fn delete_revenue(&self, id: RevenueId) -> Result<()> {
        if self.status.is_online() {
            self.remote.delete_revenue(id).await?;
            self.mirror.remove_confirmed_revenue(id).await;
        } else {
            self.queue
                .enqueue(QueuedMutation::DeleteRevenue { id })
                .await?;
            self.mirror.remove_pending_revenue(id).await?;
        }
        Ok(())
    }

    /// Current revenue projection (confirmed then pending)
    pub async fn revenues(&self) -> Vec<Revenue> {
        self.mirror.projected_revenues().await
    }

    // --- indicators / initial load ---

    /// Queued writes waiting for reconnect
    pub async fn pending_count(&self) -> Result<usize> {
        Ok(self.queue.len().await?)
    }

    /// Fetch the authoritative lists, replacing the projection wholesale.
    /// Used for the initial load; the reconciler refreshes after drains.
    pub async fn refresh(&self) -> Result<()> {
        let medicines = self.remote.fetch_medicines().await?;
        let revenues = self.remote.fetch_revenues().await?;
        self.mirror.apply_refresh(medicines, revenues).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKvStore;
    use crate::testing::RecordingRemote;
    use pretty_assertions::assert_eq;

    struct Fixture {
        remote: Arc<RecordingRemote>,
        queue: OfflineQueue<MemoryKvStore>,
        records: Records<RecordingRemote, MemoryKvStore>,
    }

    fn fixture(online: bool) -> Fixture {
        let kv = MemoryKvStore::new();
        let remote = Arc::new(RecordingRemote::default());
        let queue = OfflineQueue::new(kv.clone());
        let mirror = MirrorStore::new(kv);
        let records = Records::new(
            Arc::clone(&remote),
            queue.clone(),
            mirror,
            StatusBoard::new(online),
        );
        Fixture {
            remote,
            queue,
            records,
        }
    }

    fn draft(name: &str) -> MedicineDraft {
        MedicineDraft {
            name: name.to_string(),
            quantity: 2,
            ..Default::default()
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn online_add_goes_straight_to_remote() {
        let fx = fixture(true);
        fx.records.add_medicine(draft("Amoxicillin")).await.unwrap();

        assert_eq!(
            fx.remote.calls().await,
            vec!["add_medicine Amoxicillin".to_string()]
        );
        assert_eq!(fx.queue.len().await.unwrap(), 0);
        assert_eq!(fx.records.medicines().await.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn offline_add_queues_and_mirrors() {
        let fx = fixture(false);
        let medicine = fx.records.add_medicine(draft("Amoxicillin")).await.unwrap();

        assert!(fx.remote.calls().await.is_empty());
        assert_eq!(fx.queue.len().await.unwrap(), 1);

        let projected = fx.records.medicines().await;
        assert_eq!(projected, vec![medicine]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn add_rejects_blank_name_and_zero_quantity() {
        let fx = fixture(false);

        let blank = fx.records.add_medicine(draft("   ")).await;
        assert!(matches!(blank, Err(Error::InvalidInput(_))));

        let zero = fx
            .records
            .add_medicine(MedicineDraft {
                name: "Ibuprofen".to_string(),
                quantity: 0,
                ..Default::default()
            })
            .await;
        assert!(matches!(zero, Err(Error::InvalidInput(_))));
        assert_eq!(fx.queue.len().await.unwrap(), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn empty_patch_is_rejected_before_queueing() {
        let fx = fixture(false);
        let result = fx
            .records
            .update_medicine(MedicineId::new(), MedicinePatch::default())
            .await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert_eq!(fx.queue.len().await.unwrap(), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn offline_update_merges_into_pending_mirror() {
        let fx = fixture(false);
        let medicine = fx.records.add_medicine(draft("Amoxicillin")).await.unwrap();

        fx.records
            .update_medicine(
                medicine.id,
                MedicinePatch {
                    quantity: Some(9),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(fx.queue.len().await.unwrap(), 2);
        let projected = fx.records.medicines().await;
        assert_eq!(projected[0].quantity, 9);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn negative_revenue_amounts_are_rejected() {
        let fx = fixture(true);
        let result = fx
            .records
            .add_revenue(RevenueDraft {
                shift_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
                shift: crate::models::Shift::Evening,
                cash: -5,
                card: 0,
                banking: 0,
                note: None,
            })
            .await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
