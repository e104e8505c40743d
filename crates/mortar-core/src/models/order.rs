//! Purchase order model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::util::unix_millis_now;

/// A unique identifier for a purchase order, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Create a new unique order ID using UUID v7
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

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Order lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Draft,
    Submitted,
    Received,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Submitted => write!(f, "submitted"),
            Self::Received => write!(f, "received"),
        }
    }
}

/// One line of a supplier quote / purchase order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Item name as quoted by the supplier
    pub name: String,
    /// Packs ordered
    pub quantity: u32,
    /// Quoted unit price in minor currency units
    pub unit_price: i64,
}

impl OrderLine {
    /// Line subtotal
    #[must_use]
    pub const fn subtotal(&self) -> i64 {
        self.unit_price * self.quantity as i64
    }
}

/// A purchase order built from supplier quote lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// Unique identifier
    pub id: OrderId,
    /// Supplier name
    pub supplier: String,
    /// Quoted lines
    pub lines: Vec<OrderLine>,
    /// Lifecycle state
    pub status: OrderStatus,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
    /// Last update timestamp (Unix ms)
    pub updated_at: i64,
}

impl PurchaseOrder {
    /// Create a draft order from quote lines
    #[must_use]
    pub fn from_quote(supplier: impl Into<String>, lines: Vec<OrderLine>) -> Self {
        let now = unix_millis_now();
        Self {
            id: OrderId::new(),
            supplier: supplier.into(),
            lines,
            status: OrderStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    /// Order total across all lines
    #[must_use]
    pub fn total(&self) -> i64 {
        self.lines.iter().map(OrderLine::subtotal).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines() -> Vec<OrderLine> {
        vec![
            OrderLine {
                name: "Paracetamol 500mg".to_string(),
                quantity: 10,
                unit_price: 1_200,
            },
            OrderLine {
                name: "Insulin pens".to_string(),
                quantity: 3,
                unit_price: 15_000,
            },
        ]
    }

    #[test]
    fn from_quote_starts_draft() {
        let order = PurchaseOrder::from_quote("Delta Pharma", lines());
        assert_eq!(order.status, OrderStatus::Draft);
        assert_eq!(order.lines.len(), 2);
    }

    #[test]
    fn total_sums_line_subtotals() {
        let order = PurchaseOrder::from_quote("Delta Pharma", lines());
        assert_eq!(order.total(), 10 * 1_200 + 3 * 15_000);
    }
}
