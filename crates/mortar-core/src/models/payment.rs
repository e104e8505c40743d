//! Company payment / expense model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::util::unix_millis_now;

/// A unique identifier for a payment record, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentId(Uuid);

impl PaymentId {
    /// Create a new unique payment ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for PaymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PaymentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Whether the record is a supplier payment or a running expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentKind {
    Payment,
    Expense,
}

impl fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Payment => write!(f, "payment"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A tracked company payment or expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// Supplier or payee name
    pub counterparty: String,
    /// Payment vs expense
    pub kind: PaymentKind,
    /// Amount in minor currency units
    pub amount: i64,
    /// Optional due date
    pub due_date: Option<NaiveDate>,
    /// Whether the amount has been settled
    pub settled: bool,
    /// Free-form note
    pub note: Option<String>,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
    /// Last update timestamp (Unix ms)
    pub updated_at: i64,
}

/// Caller-supplied fields for a new payment record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDraft {
    pub counterparty: String,
    pub kind: PaymentKind,
    pub amount: i64,
    pub due_date: Option<NaiveDate>,
    pub note: Option<String>,
}

impl Payment {
    /// Create a new unsettled payment from a draft
    #[must_use]
    pub fn new(draft: PaymentDraft) -> Self {
        let now = unix_millis_now();
        Self {
            id: PaymentId::new(),
            counterparty: draft.counterparty,
            kind: draft.kind,
            amount: draft.amount,
            due_date: draft.due_date,
            settled: false,
            note: draft.note,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the payment is past its due date and still unsettled
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.settled && self.due_date.is_some_and(|due| due < today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PaymentDraft {
        PaymentDraft {
            counterparty: "Delta Pharma".to_string(),
            kind: PaymentKind::Payment,
            amount: 250_000,
            due_date: NaiveDate::from_ymd_opt(2024, 4, 1),
            note: None,
        }
    }

    #[test]
    fn new_payment_starts_unsettled() {
        let payment = Payment::new(draft());
        assert!(!payment.settled);
        assert_eq!(payment.kind, PaymentKind::Payment);
    }

    #[test]
    fn overdue_requires_past_due_and_unsettled() {
        let mut payment = Payment::new(draft());
        let after_due = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
        let before_due = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();

        assert!(payment.is_overdue(after_due));
        assert!(!payment.is_overdue(before_due));

        payment.settled = true;
        assert!(!payment.is_overdue(after_due));
    }
}
