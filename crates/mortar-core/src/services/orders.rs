//! Purchase orders built from supplier quotes (online-only).

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::{OrderId, OrderLine, OrderStatus, PurchaseOrder};
use crate::remote::RemoteBackOffice;
use crate::util::normalize_text_option;

/// Thin service over the remote purchase orders
#[derive(Clone)]
pub struct Purchasing<R> {
    remote: Arc<R>,
}

impl<R: RemoteBackOffice> Purchasing<R> {
    /// Create a purchasing service over the given remote store
    pub fn new(remote: Arc<R>) -> Self {
        Self { remote }
    }

    /// Build a draft order from supplier quote lines and store it
    pub async fn build_order(
        &self,
        supplier: impl Into<String>,
        lines: Vec<OrderLine>,
    ) -> Result<PurchaseOrder> {
        let supplier = normalize_text_option(Some(supplier.into()))
            .ok_or_else(|| Error::InvalidInput("supplier cannot be empty".to_string()))?;
        if lines.is_empty() {
            return Err(Error::InvalidInput(
                "an order needs at least one quote line".to_string(),
            ));
        }
        for line in &lines {
            if line.name.trim().is_empty() {
                return Err(Error::InvalidInput(
                    "quote lines need an item name".to_string(),
                ));
            }
            if line.quantity == 0 {
                return Err(Error::InvalidInput(format!(
                    "quote line '{}' has zero quantity",
                    line.name
                )));
            }
        }

        let order = PurchaseOrder::from_quote(supplier, lines);
        self.remote.add_order(&order).await?;
        Ok(order)
    }

    /// Send a draft order to the supplier
    pub async fn submit(&self, id: OrderId) -> Result<()> {
        self.remote
            .set_order_status(id, OrderStatus::Submitted)
            .await?;
        Ok(())
    }

    /// Mark an order received
    pub async fn mark_received(&self, id: OrderId) -> Result<()> {
        self.remote
            .set_order_status(id, OrderStatus::Received)
            .await?;
        Ok(())
    }

    /// All purchase orders
    pub async fn list(&self) -> Result<Vec<PurchaseOrder>> {
        Ok(self.remote.fetch_orders().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{RemoteError, RemoteResult};
    use crate::models::{Bulletin, Payment, PaymentId};
    use tokio::sync::Mutex;

    /// Back-office stub that stores whatever it is given
    #[derive(Default)]
    struct StubBackOffice {
        orders: Mutex<Vec<PurchaseOrder>>,
        status_calls: Mutex<Vec<(OrderId, OrderStatus)>>,
    }

    impl RemoteBackOffice for StubBackOffice {
        async fn add_payment(&self, _payment: &Payment) -> RemoteResult<()> {
            Ok(())
        }

        async fn settle_payment(&self, _id: PaymentId) -> RemoteResult<()> {
            Ok(())
        }

        async fn fetch_payments(&self) -> RemoteResult<Vec<Payment>> {
            Ok(Vec::new())
        }

        async fn add_order(&self, order: &PurchaseOrder) -> RemoteResult<()> {
            self.orders.lock().await.push(order.clone());
            Ok(())
        }

        async fn set_order_status(&self, id: OrderId, status: OrderStatus) -> RemoteResult<()> {
            if !self.orders.lock().await.iter().any(|order| order.id == id) {
                return Err(RemoteError::Api("unknown order (404)".to_string()));
            }
            self.status_calls.lock().await.push((id, status));
            Ok(())
        }

        async fn fetch_orders(&self) -> RemoteResult<Vec<PurchaseOrder>> {
            Ok(self.orders.lock().await.clone())
        }

        async fn add_bulletin(&self, _bulletin: &Bulletin) -> RemoteResult<()> {
            Ok(())
        }

        async fn fetch_bulletins(&self) -> RemoteResult<Vec<Bulletin>> {
            Ok(Vec::new())
        }
    }

    fn lines() -> Vec<OrderLine> {
        vec![OrderLine {
            name: "Paracetamol 500mg".to_string(),
            quantity: 10,
            unit_price: 1_200,
        }]
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn build_order_stores_draft() {
        let remote = Arc::new(StubBackOffice::default());
        let purchasing = Purchasing::new(Arc::clone(&remote));

        let order = purchasing.build_order("Delta Pharma", lines()).await.unwrap();
        assert_eq!(order.status, OrderStatus::Draft);
        assert_eq!(remote.orders.lock().await.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn build_order_validates_lines() {
        let purchasing = Purchasing::new(Arc::new(StubBackOffice::default()));

        assert!(purchasing
            .build_order("Delta Pharma", Vec::new())
            .await
            .is_err());
        assert!(purchasing
            .build_order(
                "Delta Pharma",
                vec![OrderLine {
                    name: "Insulin".to_string(),
                    quantity: 0,
                    unit_price: 100,
                }],
            )
            .await
            .is_err());
        assert!(purchasing.build_order("  ", lines()).await.is_err());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn submit_moves_order_to_submitted() {
        let remote = Arc::new(StubBackOffice::default());
        let purchasing = Purchasing::new(Arc::clone(&remote));

        let order = purchasing.build_order("Delta Pharma", lines()).await.unwrap();
        purchasing.submit(order.id).await.unwrap();

        assert_eq!(
            remote.status_calls.lock().await.as_slice(),
            &[(order.id, OrderStatus::Submitted)]
        );
    }
}
