//! Shared test doubles.

use tokio::sync::Mutex;

use crate::models::{
    Medicine, MedicineDraft, MedicineId, MedicinePatch, Revenue, RevenueDraft, RevenueId,
    RevenuePatch, Shift,
};
use crate::remote::{RemoteError, RemoteResult, RemoteStore};

/// In-memory remote store that records calls and can inject failures.
///
/// Every call yields once before completing so concurrent sync attempts
/// interleave deterministically in tests.
#[derive(Default)]
pub(crate) struct RecordingRemote {
    calls: Mutex<Vec<String>>,
    fail_matching: Mutex<Option<String>>,
    fail_fetches: Mutex<bool>,
    medicines: Mutex<Vec<Medicine>>,
    revenues: Mutex<Vec<Revenue>>,
}

impl RecordingRemote {
    pub(crate) async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    /// Make every mutation call containing `needle` fail
    pub(crate) async fn fail_on(&self, needle: &str) {
        *self.fail_matching.lock().await = Some(needle.to_string());
    }

    pub(crate) async fn succeed_again(&self) {
        *self.fail_matching.lock().await = None;
    }

    pub(crate) async fn fail_fetches(&self, fail: bool) {
        *self.fail_fetches.lock().await = fail;
    }

    pub(crate) async fn serve_medicines(&self, medicines: Vec<Medicine>) {
        *self.medicines.lock().await = medicines;
    }

    async fn record(&self, call: String) -> RemoteResult<()> {
        tokio::task::yield_now().await;
        self.calls.lock().await.push(call.clone());
        if let Some(needle) = self.fail_matching.lock().await.as_deref() {
            if call.contains(needle) {
                return Err(RemoteError::Api(format!("injected failure for {call}")));
            }
        }
        Ok(())
    }
}

impl RemoteStore for RecordingRemote {
    async fn add_medicine(&self, medicine: &Medicine) -> RemoteResult<()> {
        self.record(format!("add_medicine {}", medicine.name)).await
    }

    async fn update_medicine(&self, id: MedicineId, _patch: &MedicinePatch) -> RemoteResult<()> {
        self.record(format!("update_medicine {id}")).await
    }

    async fn delete_medicine(&self, id: MedicineId) -> RemoteResult<()> {
        self.record(format!("delete_medicine {id}")).await
    }

    async fn add_revenue(&self, revenue: &Revenue) -> RemoteResult<()> {
        self.record(format!("add_revenue {}", revenue.shift)).await
    }

    async fn update_revenue(&self, id: RevenueId, _patch: &RevenuePatch) -> RemoteResult<()> {
        self.record(format!("update_revenue {id}")).await
    }

    async fn delete_revenue(&self, id: RevenueId) -> RemoteResult<()> {
        self.record(format!("delete_revenue {id}")).await
    }

    async fn fetch_medicines(&self) -> RemoteResult<Vec<Medicine>> {
        self.record("fetch_medicines".to_string()).await?;
        if *self.fail_fetches.lock().await {
            return Err(RemoteError::Api("injected fetch failure".to_string()));
        }
        Ok(self.medicines.lock().await.clone())
    }

    async fn fetch_revenues(&self) -> RemoteResult<Vec<Revenue>> {
        self.record("fetch_revenues".to_string()).await?;
        if *self.fail_fetches.lock().await {
            return Err(RemoteError::Api("injected fetch failure".to_string()));
        }
        Ok(self.revenues.lock().await.clone())
    }
}

/// Shortage entry with the given name and a quantity of one
pub(crate) fn medicine(name: &str) -> Medicine {
    Medicine::new(MedicineDraft {
        name: name.to_string(),
        quantity: 1,
        ..Default::default()
    })
}

/// A small cash-only morning revenue entry
pub(crate) fn revenue() -> Revenue {
    Revenue::new(RevenueDraft {
        shift_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        shift: Shift::Morning,
        cash: 1_000,
        card: 0,
        banking: 0,
        note: None,
    })
}
