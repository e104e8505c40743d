//! Optimistic local projection of remote entities.
//!
//! Each entity kind keeps two shelves: the confirmed list (server truth from
//! the last fetch) and the pending list (offline writes not yet replayed).
//! Projections concatenate confirmed then pending and are display-only;
//! the write path never reads them back as truth. Pending shelves are
//! snapshotted to durable storage so optimistic entries survive restarts.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::models::{Medicine, MedicineId, MedicinePatch, Revenue, RevenueId, RevenuePatch};
use crate::storage::{KvStore, StorageResult};

const MEDICINES_SNAPSHOT_KEY: &str = "offline/mirror/medicines";
const REVENUES_SNAPSHOT_KEY: &str = "offline/mirror/revenues";

#[derive(Default)]
struct Shelves {
    confirmed_medicines: Vec<Medicine>,
    pending_medicines: Vec<Medicine>,
    confirmed_revenues: Vec<Revenue>,
    pending_revenues: Vec<Revenue>,
}

/// Cheap-to-clone handle over the shared mirror shelves
#[derive(Clone)]
pub struct MirrorStore<K> {
    kv: K,
    shelves: Arc<Mutex<Shelves>>,
}

impl<K: KvStore> MirrorStore<K> {
    /// Create an empty mirror over the given snapshot storage
    pub fn new(kv: K) -> Self {
        Self {
            kv,
            shelves: Arc::new(Mutex::new(Shelves::default())),
        }
    }

    /// Create a mirror, restoring pending shelves from their snapshots
    pub async fn load(kv: K) -> StorageResult<Self> {
        let pending_medicines = match kv.get(MEDICINES_SNAPSHOT_KEY).await? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        let pending_revenues = match kv.get(REVENUES_SNAPSHOT_KEY).await? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };

        if !pending_medicines.is_empty() || !pending_revenues.is_empty() {
            tracing::info!(
                medicines = pending_medicines.len(),
                revenues = pending_revenues.len(),
                "restored optimistic mirror entries"
            );
        }

        Ok(Self {
            kv,
            shelves: Arc::new(Mutex::new(Shelves {
                pending_medicines,
                pending_revenues,
                ..Default::default()
            })),
        })
    }

    // --- pending shelf (offline writes) ---

    /// Mirror a not-yet-synced shortage entry for immediate display
    pub async fn add_pending_medicine(&self, medicine: Medicine) -> StorageResult<()> {
        let snapshot = {
            let mut shelves = self.shelves.lock().await;
            shelves.pending_medicines.push(medicine);
            shelves.pending_medicines.clone()
        };
        self.save_snapshot(MEDICINES_SNAPSHOT_KEY, &snapshot).await
    }

    /// Merge fields into a pending shortage entry, if present
    pub async fn merge_pending_medicine(
        &self,
        id: MedicineId,
        patch: &MedicinePatch,
    ) -> StorageResult<bool> {
        let (found, snapshot) = {
            let mut shelves = self.shelves.lock().await;
            let found = match shelves
                .pending_medicines
                .iter_mut()
                .find(|medicine| medicine.id == id)
            {
                Some(medicine) => {
                    patch.apply(medicine);
                    true
                }
                None => false,
            };
            (found, shelves.pending_medicines.clone())
        };
        if found {
            self.save_snapshot(MEDICINES_SNAPSHOT_KEY, &snapshot).await?;
        }
        Ok(found)
    }

    /// Drop a pending shortage entry, if present
    pub async fn remove_pending_medicine(&self, id: MedicineId) -> StorageResult<bool> {
        let (found, snapshot) = {
            let mut shelves = self.shelves.lock().await;
            let before = shelves.pending_medicines.len();
            shelves.pending_medicines.retain(|medicine| medicine.id != id);
            (
                shelves.pending_medicines.len() != before,
                shelves.pending_medicines.clone(),
            )
        };
        if found {
            self.save_snapshot(MEDICINES_SNAPSHOT_KEY, &snapshot).await?;
        }
        Ok(found)
    }

    /// Mirror a not-yet-synced revenue entry for immediate display
    pub async fn add_pending_revenue(&self, revenue: Revenue) -> StorageResult<()> {
        let snapshot = {
            let mut shelves = self.shelves.lock().await;
            shelves.pending_revenues.push(revenue);
            shelves.pending_revenues.clone()
        };
        self.save_snapshot(REVENUES_SNAPSHOT_KEY, &snapshot).await
    }

    /// Merge fields into a pending revenue entry, if present
    pub async fn merge_pending_revenue(
        &self,
        id: RevenueId,
        patch: &RevenuePatch,
    ) -> StorageResult<bool> {
        let (found, snapshot) = {
            let mut shelves = self.shelves.lock().await;
            let found = match shelves
                .pending_revenues
                .iter_mut()
                .find(|revenue| revenue.id == id)
            {
                Some(revenue) => {
                    patch.apply(revenue);
                    true
                }
                None => false,
            };
            (found, shelves.pending_revenues.clone())
        };
        if found {
            self.save_snapshot(REVENUES_SNAPSHOT_KEY, &snapshot).await?;
        }
        Ok(found)
    }

    /// Drop a pending revenue entry, if present
    pub async fn remove_pending_revenue(&self, id: RevenueId) -> StorageResult<bool> {
        let (found, snapshot) = {
            let mut shelves = self.shelves.lock().await;
            let before = shelves.pending_revenues.len();
            shelves.pending_revenues.retain(|revenue| revenue.id != id);
            (
                shelves.pending_revenues.len() != before,
                shelves.pending_revenues.clone(),
            )
        };
        if found {
            self.save_snapshot(REVENUES_SNAPSHOT_KEY, &snapshot).await?;
        }
        Ok(found)
    }

    // --- confirmed shelf (direct online writes keep it current) ---

    pub(crate) async fn push_confirmed_medicine(&self, medicine: Medicine) {
        self.shelves.lock().await.confirmed_medicines.push(medicine);
    }

    pub(crate) async fn merge_confirmed_medicine(&self, id: MedicineId, patch: &MedicinePatch) {
        let mut shelves = self.shelves.lock().await;
        if let Some(medicine) = shelves
            .confirmed_medicines
            .iter_mut()
            .find(|medicine| medicine.id == id)
        {
            patch.apply(medicine);
        }
    }

    pub(crate) async fn remove_confirmed_medicine(&self, id: MedicineId) {
        self.shelves
            .lock()
            .await
            .confirmed_medicines
            .retain(|medicine| medicine.id != id);
    }

    pub(crate) async fn push_confirmed_revenue(&self, revenue: Revenue) {
        self.shelves.lock().await.confirmed_revenues.push(revenue);
    }

    pub(crate) async fn merge_confirmed_revenue(&self, id: RevenueId, patch: &RevenuePatch) {
        let mut shelves = self.shelves.lock().await;
        if let Some(revenue) = shelves
            .confirmed_revenues
            .iter_mut()
            .find(|revenue| revenue.id == id)
        {
            patch.apply(revenue);
        }
    }

    pub(crate) async fn remove_confirmed_revenue(&self, id: RevenueId) {
        self.shelves
            .lock()
            .await
            .confirmed_revenues
            .retain(|revenue| revenue.id != id);
    }

    // --- projections and refresh ---

    /// Confirmed then pending shortage entries, for display only
    pub async fn projected_medicines(&self) -> Vec<Medicine> {
        let shelves = self.shelves.lock().await;
        let mut projected = shelves.confirmed_medicines.clone();
        projected.extend(shelves.pending_medicines.iter().cloned());
        projected
    }

    /// Confirmed then pending revenue entries, for display only
    pub async fn projected_revenues(&self) -> Vec<Revenue> {
        let shelves = self.shelves.lock().await;
        let mut projected = shelves.confirmed_revenues.clone();
        projected.extend(shelves.pending_revenues.iter().cloned());
        projected
    }

    /// Number of records still awaiting confirmation
    pub async fn pending_len(&self) -> usize {
        let shelves = self.shelves.lock().await;
        shelves.pending_medicines.len() + shelves.pending_revenues.len()
    }

    /// Replace the confirmed shelves with a fresh authoritative fetch and
    /// clear everything pending; the fetch supersedes the mirrored writes.
    pub(crate) async fn apply_refresh(
        &self,
        medicines: Vec<Medicine>,
        revenues: Vec<Revenue>,
    ) -> StorageResult<()> {
        {
            let mut shelves = self.shelves.lock().await;
            shelves.confirmed_medicines = medicines;
            shelves.confirmed_revenues = revenues;
            shelves.pending_medicines.clear();
            shelves.pending_revenues.clear();
        }
        self.kv.remove(MEDICINES_SNAPSHOT_KEY).await?;
        self.kv.remove(REVENUES_SNAPSHOT_KEY).await?;
        Ok(())
    }

    async fn save_snapshot<T: serde::Serialize>(
        &self,
        key: &str,
        records: &[T],
    ) -> StorageResult<()> {
        let raw = serde_json::to_string(records)?;
        self.kv.set(key, &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MedicineDraft;
    use crate::storage::MemoryKvStore;
    use pretty_assertions::assert_eq;

    fn medicine(name: &str) -> Medicine {
        Medicine::new(MedicineDraft {
            name: name.to_string(),
            quantity: 1,
            ..Default::default()
        })
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn projection_concatenates_confirmed_then_pending() {
        let mirror = MirrorStore::new(MemoryKvStore::new());
        mirror.push_confirmed_medicine(medicine("confirmed")).await;
        mirror
            .add_pending_medicine(medicine("pending"))
            .await
            .unwrap();

        let projected = mirror.projected_medicines().await;
        assert_eq!(projected.len(), 2);
        assert_eq!(projected[0].name, "confirmed");
        assert_eq!(projected[1].name, "pending");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn merge_pending_only_touches_matching_record() {
        let mirror = MirrorStore::new(MemoryKvStore::new());
        let entry = medicine("Amoxicillin");
        let id = entry.id;
        mirror.add_pending_medicine(entry).await.unwrap();

        let patch = MedicinePatch {
            quantity: Some(7),
            ..Default::default()
        };
        assert!(mirror.merge_pending_medicine(id, &patch).await.unwrap());
        assert!(!mirror
            .merge_pending_medicine(MedicineId::new(), &patch)
            .await
            .unwrap());

        let projected = mirror.projected_medicines().await;
        assert_eq!(projected[0].quantity, 7);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn refresh_supersedes_pending_records() {
        let mirror = MirrorStore::new(MemoryKvStore::new());
        mirror
            .add_pending_medicine(medicine("pending"))
            .await
            .unwrap();

        mirror
            .apply_refresh(vec![medicine("fresh")], vec![])
            .await
            .unwrap();

        let projected = mirror.projected_medicines().await;
        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].name, "fresh");
        assert_eq!(mirror.pending_len().await, 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn pending_records_survive_reload() {
        let kv = MemoryKvStore::new();
        {
            let mirror = MirrorStore::new(kv.clone());
            mirror
                .add_pending_medicine(medicine("survivor"))
                .await
                .unwrap();
        }

        let mirror = MirrorStore::load(kv).await.unwrap();
        let projected = mirror.projected_medicines().await;
        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].name, "survivor");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn refresh_drops_snapshots() {
        let kv = MemoryKvStore::new();
        let mirror = MirrorStore::new(kv.clone());
        mirror
            .add_pending_medicine(medicine("pending"))
            .await
            .unwrap();

        mirror.apply_refresh(vec![], vec![]).await.unwrap();

        let reloaded = MirrorStore::load(kv).await.unwrap();
        assert_eq!(reloaded.pending_len().await, 0);
    }
}
