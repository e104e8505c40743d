//! Company payments and expenses (online-only).

use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::{Payment, PaymentDraft, PaymentId};
use crate::remote::RemoteBackOffice;
use crate::util::normalize_text_option;

/// Thin service over the remote payments ledger
#[derive(Clone)]
pub struct Ledger<R> {
    remote: Arc<R>,
}

impl<R: RemoteBackOffice> Ledger<R> {
    /// Create a ledger over the given remote store
    pub fn new(remote: Arc<R>) -> Self {
        Self { remote }
    }

    /// Record a payment or expense
    pub async fn record(&self, mut draft: PaymentDraft) -> Result<Payment> {
        draft.counterparty = normalize_text_option(Some(draft.counterparty))
            .ok_or_else(|| Error::InvalidInput("counterparty cannot be empty".to_string()))?;
        if draft.amount <= 0 {
            return Err(Error::InvalidInput(
                "payment amount must be positive".to_string(),
            ));
        }

        let payment = Payment::new(draft);
        self.remote.add_payment(&payment).await?;
        Ok(payment)
    }

    /// Mark a payment settled
    pub async fn settle(&self, id: PaymentId) -> Result<()> {
        self.remote.settle_payment(id).await?;
        Ok(())
    }

    /// All tracked payments and expenses
    pub async fn list(&self) -> Result<Vec<Payment>> {
        Ok(self.remote.fetch_payments().await?)
    }
}

/// Sum of unsettled amounts
#[must_use]
pub fn outstanding_total(payments: &[Payment]) -> i64 {
    payments
        .iter()
        .filter(|payment| !payment.settled)
        .map(|payment| payment.amount)
        .sum()
}

/// Unsettled payments past their due date
#[must_use]
pub fn overdue(payments: &[Payment], today: NaiveDate) -> Vec<&Payment> {
    payments
        .iter()
        .filter(|payment| payment.is_overdue(today))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentKind;

    fn payment(amount: i64, settled: bool) -> Payment {
        let mut payment = Payment::new(PaymentDraft {
            counterparty: "Delta Pharma".to_string(),
            kind: PaymentKind::Payment,
            amount,
            due_date: None,
            note: None,
        });
        payment.settled = settled;
        payment
    }

    #[test]
    fn outstanding_total_skips_settled() {
        let payments = vec![payment(100, false), payment(250, true), payment(50, false)];
        assert_eq!(outstanding_total(&payments), 150);
    }

    #[test]
    fn overdue_filters_by_due_date() {
        let today = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
        let mut due = payment(100, false);
        due.due_date = NaiveDate::from_ymd_opt(2024, 4, 1);
        let mut not_due = payment(100, false);
        not_due.due_date = NaiveDate::from_ymd_opt(2024, 4, 20);

        let payments = vec![due.clone(), not_due];
        let overdue = overdue(&payments, today);
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id, due.id);
    }
}
