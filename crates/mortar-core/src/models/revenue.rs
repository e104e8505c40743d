//! Shift revenue model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::util::unix_millis_now;

/// A unique identifier for a revenue entry, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevenueId(Uuid);

impl RevenueId {
    /// Create a new unique revenue entry ID using UUID v7
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

impl Default for RevenueId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RevenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RevenueId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Working shift a revenue entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    Morning,
    Evening,
    Night,
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Morning => write!(f, "morning"),
            Self::Evening => write!(f, "evening"),
            Self::Night => write!(f, "night"),
        }
    }
}

/// Revenue logged for one shift.
///
/// Amounts are in minor currency units. `banking` is the total collected
/// through banking-service transactions (wallets, cards-on-delivery, etc.).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revenue {
    /// Unique identifier
    pub id: RevenueId,
    /// Business date the shift belongs to
    pub shift_date: NaiveDate,
    /// Which shift
    pub shift: Shift,
    /// Cash takings
    pub cash: i64,
    /// Card takings
    pub card: i64,
    /// Banking-service transactions total
    pub banking: i64,
    /// Free-form staff note
    pub note: Option<String>,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
    /// Last update timestamp (Unix ms)
    pub updated_at: i64,
}

/// Caller-supplied fields for a new revenue entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueDraft {
    pub shift_date: NaiveDate,
    pub shift: Shift,
    pub cash: i64,
    pub card: i64,
    pub banking: i64,
    pub note: Option<String>,
}

impl Revenue {
    /// Create a new revenue entry from a draft, assigning id and timestamps
    #[must_use]
    pub fn new(draft: RevenueDraft) -> Self {
        let now = unix_millis_now();
        Self {
            id: RevenueId::new(),
            shift_date: draft.shift_date,
            shift: draft.shift,
            cash: draft.cash,
            card: draft.card,
            banking: draft.banking,
            note: draft.note,
            created_at: now,
            updated_at: now,
        }
    }

    /// Total takings for the shift
    #[must_use]
    pub const fn total(&self) -> i64 {
        self.cash + self.card + self.banking
    }
}

/// Partial update for a revenue entry; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenuePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift: Option<Shift>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banking: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RevenuePatch {
    /// Whether the patch carries no fields at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.shift_date.is_none()
            && self.shift.is_none()
            && self.cash.is_none()
            && self.card.is_none()
            && self.banking.is_none()
            && self.note.is_none()
    }

    /// Merge the patch into an entry, bumping `updated_at`
    pub fn apply(&self, revenue: &mut Revenue) {
        if let Some(shift_date) = self.shift_date {
            revenue.shift_date = shift_date;
        }
        if let Some(shift) = self.shift {
            revenue.shift = shift;
        }
        if let Some(cash) = self.cash {
            revenue.cash = cash;
        }
        if let Some(card) = self.card {
            revenue.card = card;
        }
        if let Some(banking) = self.banking {
            revenue.banking = banking;
        }
        if let Some(note) = &self.note {
            revenue.note = Some(note.clone());
        }
        revenue.updated_at = unix_millis_now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RevenueDraft {
        RevenueDraft {
            shift_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            shift: Shift::Morning,
            cash: 12_500,
            card: 4_000,
            banking: 1_500,
            note: None,
        }
    }

    #[test]
    fn total_sums_all_channels() {
        let revenue = Revenue::new(draft());
        assert_eq!(revenue.total(), 18_000);
    }

    #[test]
    fn patch_updates_amounts_only() {
        let mut revenue = Revenue::new(draft());
        let patch = RevenuePatch {
            cash: Some(20_000),
            ..Default::default()
        };
        patch.apply(&mut revenue);

        assert_eq!(revenue.cash, 20_000);
        assert_eq!(revenue.card, 4_000);
        assert_eq!(revenue.shift, Shift::Morning);
    }

    #[test]
    fn shift_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Shift::Night).unwrap(), r#""night""#);
    }
}
