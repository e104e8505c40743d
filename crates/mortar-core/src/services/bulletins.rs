//! Role-addressed staff bulletins (online-only).

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::{Bulletin, StaffRole};
use crate::remote::RemoteBackOffice;
use crate::util::normalize_text_option;

/// Thin service over the remote bulletin board
#[derive(Clone)]
pub struct Bulletins<R> {
    remote: Arc<R>,
}

impl<R: RemoteBackOffice> Bulletins<R> {
    /// Create a bulletin service over the given remote store
    pub fn new(remote: Arc<R>) -> Self {
        Self { remote }
    }

    /// Post a bulletin to the given audience
    pub async fn post(
        &self,
        title: impl Into<String>,
        body: impl Into<String>,
        audience: StaffRole,
    ) -> Result<Bulletin> {
        let title = normalize_text_option(Some(title.into()))
            .ok_or_else(|| Error::InvalidInput("bulletin title cannot be empty".to_string()))?;

        let bulletin = Bulletin::new(title, body, audience);
        self.remote.add_bulletin(&bulletin).await?;
        Ok(bulletin)
    }

    /// Bulletins visible to a reader with the given role, newest first
    pub async fn inbox(&self, role: StaffRole) -> Result<Vec<Bulletin>> {
        let mut bulletins: Vec<Bulletin> = self
            .remote
            .fetch_bulletins()
            .await?
            .into_iter()
            .filter(|bulletin| bulletin.visible_to(role))
            .collect();
        bulletins.sort_by_key(|bulletin| std::cmp::Reverse(bulletin.created_at));
        Ok(bulletins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderId, OrderStatus, Payment, PaymentId, PurchaseOrder};
    use crate::remote::RemoteResult;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct StubBoard {
        bulletins: Mutex<Vec<Bulletin>>,
    }

    impl RemoteBackOffice for StubBoard {
        async fn add_payment(&self, _payment: &Payment) -> RemoteResult<()> {
            Ok(())
        }

        async fn settle_payment(&self, _id: PaymentId) -> RemoteResult<()> {
            Ok(())
        }

        async fn fetch_payments(&self) -> RemoteResult<Vec<Payment>> {
            Ok(Vec::new())
        }

        async fn add_order(&self, _order: &PurchaseOrder) -> RemoteResult<()> {
            Ok(())
        }

        async fn set_order_status(&self, _id: OrderId, _status: OrderStatus) -> RemoteResult<()> {
            Ok(())
        }

        async fn fetch_orders(&self) -> RemoteResult<Vec<PurchaseOrder>> {
            Ok(Vec::new())
        }

        async fn add_bulletin(&self, bulletin: &Bulletin) -> RemoteResult<()> {
            self.bulletins.lock().await.push(bulletin.clone());
            Ok(())
        }

        async fn fetch_bulletins(&self) -> RemoteResult<Vec<Bulletin>> {
            Ok(self.bulletins.lock().await.clone())
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn inbox_filters_by_audience() {
        let remote = Arc::new(StubBoard::default());
        let bulletins = Bulletins::new(Arc::clone(&remote));

        bulletins
            .post("Stock count", "Friday 8pm", StaffRole::Pharmacist)
            .await
            .unwrap();
        bulletins
            .post("Drawer check", "Daily", StaffRole::Cashier)
            .await
            .unwrap();
        bulletins
            .post("Holiday hours", "Closed Sunday", StaffRole::All)
            .await
            .unwrap();

        let inbox = bulletins.inbox(StaffRole::Cashier).await.unwrap();
        let titles: Vec<&str> = inbox.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles.len(), 2);
        assert!(titles.contains(&"Drawer check"));
        assert!(titles.contains(&"Holiday hours"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn post_rejects_blank_title() {
        let bulletins = Bulletins::new(Arc::new(StubBoard::default()));
        assert!(bulletins
            .post("  ", "body", StaffRole::All)
            .await
            .is_err());
    }
}
