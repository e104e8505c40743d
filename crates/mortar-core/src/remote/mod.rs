//! Remote store client
//!
//! The hosted backend exposes a plain REST API; this module defines the
//! consumed surface as traits so sync components stay testable, plus the
//! HTTP implementation used in production.

mod http;

use thiserror::Error;

pub use http::HttpRemoteStore;

use crate::models::{
    Bulletin, Medicine, MedicineId, MedicinePatch, OrderId, OrderStatus, Payment, PaymentId,
    PurchaseOrder, Revenue, RevenueId, RevenuePatch,
};

/// Result type for remote operations
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

/// Errors from the remote store
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport-level failure (connect, TLS, decode)
    #[error("Remote HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Remote API error: {0}")]
    Api(String),

    /// The API answered with a body we could not interpret
    #[error("Invalid remote payload: {0}")]
    InvalidPayload(String),
}

/// Entity operations replayed by the offline queue, plus the bulk fetches
/// used by the post-drain refresh.
#[allow(async_fn_in_trait)]
pub trait RemoteStore: Send + Sync {
    async fn add_medicine(&self, medicine: &Medicine) -> RemoteResult<()>;
    async fn update_medicine(&self, id: MedicineId, patch: &MedicinePatch) -> RemoteResult<()>;
    async fn delete_medicine(&self, id: MedicineId) -> RemoteResult<()>;

    async fn add_revenue(&self, revenue: &Revenue) -> RemoteResult<()>;
    async fn update_revenue(&self, id: RevenueId, patch: &RevenuePatch) -> RemoteResult<()>;
    async fn delete_revenue(&self, id: RevenueId) -> RemoteResult<()>;

    /// Authoritative shortage list
    async fn fetch_medicines(&self) -> RemoteResult<Vec<Medicine>>;
    /// Authoritative revenue list
    async fn fetch_revenues(&self) -> RemoteResult<Vec<Revenue>>;
}

/// Back-office records that are only written while online: company
/// payments/expenses, purchase orders, staff bulletins.
#[allow(async_fn_in_trait)]
pub trait RemoteBackOffice: Send + Sync {
    async fn add_payment(&self, payment: &Payment) -> RemoteResult<()>;
    async fn settle_payment(&self, id: PaymentId) -> RemoteResult<()>;
    async fn fetch_payments(&self) -> RemoteResult<Vec<Payment>>;

    async fn add_order(&self, order: &PurchaseOrder) -> RemoteResult<()>;
    async fn set_order_status(&self, id: OrderId, status: OrderStatus) -> RemoteResult<()>;
    async fn fetch_orders(&self) -> RemoteResult<Vec<PurchaseOrder>>;

    async fn add_bulletin(&self, bulletin: &Bulletin) -> RemoteResult<()>;
    async fn fetch_bulletins(&self) -> RemoteResult<Vec<Bulletin>>;
}
