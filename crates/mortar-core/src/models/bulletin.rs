//! Staff bulletin model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::util::unix_millis_now;

/// A unique identifier for a bulletin, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BulletinId(Uuid);

impl BulletinId {
    /// Create a new unique bulletin ID using UUID v7
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

impl Default for BulletinId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BulletinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BulletinId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Staff role a bulletin is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    All,
    Pharmacist,
    Cashier,
    Manager,
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Pharmacist => write!(f, "pharmacist"),
            Self::Cashier => write!(f, "cashier"),
            Self::Manager => write!(f, "manager"),
        }
    }
}

/// A role-addressed notification exchanged between staff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bulletin {
    /// Unique identifier
    pub id: BulletinId,
    /// Short headline
    pub title: String,
    /// Message body
    pub body: String,
    /// Addressed role
    pub audience: StaffRole,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
}

impl Bulletin {
    /// Create a new bulletin
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>, audience: StaffRole) -> Self {
        Self {
            id: BulletinId::new(),
            title: title.into(),
            body: body.into(),
            audience,
            created_at: unix_millis_now(),
        }
    }

    /// Whether a reader with the given role should see this bulletin
    #[must_use]
    pub fn visible_to(&self, role: StaffRole) -> bool {
        matches!(self.audience, StaffRole::All) || self.audience == role || role == StaffRole::All
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_to_matches_audience() {
        let bulletin = Bulletin::new("Stock count", "Friday 8pm", StaffRole::Pharmacist);
        assert!(bulletin.visible_to(StaffRole::Pharmacist));
        assert!(!bulletin.visible_to(StaffRole::Cashier));
    }

    #[test]
    fn broadcast_visible_to_everyone() {
        let bulletin = Bulletin::new("Holiday hours", "Closed Sunday", StaffRole::All);
        assert!(bulletin.visible_to(StaffRole::Cashier));
        assert!(bulletin.visible_to(StaffRole::Manager));
    }

    #[test]
    fn all_role_reader_sees_everything() {
        let bulletin = Bulletin::new("Ledger", "Check drawer", StaffRole::Manager);
        assert!(bulletin.visible_to(StaffRole::All));
    }
}
