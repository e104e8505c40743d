//! Medicine shortage model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::util::unix_millis_now;

/// A unique identifier for a shortage entry, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MedicineId(Uuid);

impl MedicineId {
    /// Create a new unique shortage entry ID using UUID v7
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

impl Default for MedicineId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MedicineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MedicineId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A registered medicine/supply shortage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    /// Unique identifier
    pub id: MedicineId,
    /// Commercial or generic name
    pub name: String,
    /// Dose strength, e.g. "500 mg"
    pub strength: Option<String>,
    /// Dosage form, e.g. "tablet", "syrup"
    pub form: Option<String>,
    /// Packs needed
    pub quantity: u32,
    /// Whether the shortage blocks dispensing
    pub urgent: bool,
    /// Free-form staff note
    pub note: Option<String>,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
    /// Last update timestamp (Unix ms)
    pub updated_at: i64,
}

/// Caller-supplied fields for a new shortage entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicineDraft {
    pub name: String,
    pub strength: Option<String>,
    pub form: Option<String>,
    pub quantity: u32,
    pub urgent: bool,
    pub note: Option<String>,
}

impl Medicine {
    /// Create a new shortage entry from a draft, assigning id and timestamps
    #[must_use]
    pub fn new(draft: MedicineDraft) -> Self {
        let now = unix_millis_now();
        Self {
            id: MedicineId::new(),
            name: draft.name,
            strength: draft.strength,
            form: draft.form,
            quantity: draft.quantity,
            urgent: draft.urgent,
            note: draft.note,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a shortage entry; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicinePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MedicinePatch {
    /// Whether the patch carries no fields at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.strength.is_none()
            && self.form.is_none()
            && self.quantity.is_none()
            && self.urgent.is_none()
            && self.note.is_none()
    }

    /// Merge the patch into an entry, bumping `updated_at`
    pub fn apply(&self, medicine: &mut Medicine) {
        if let Some(name) = &self.name {
            medicine.name.clone_from(name);
        }
        if let Some(strength) = &self.strength {
            medicine.strength = Some(strength.clone());
        }
        if let Some(form) = &self.form {
            medicine.form = Some(form.clone());
        }
        if let Some(quantity) = self.quantity {
            medicine.quantity = quantity;
        }
        if let Some(urgent) = self.urgent {
            medicine.urgent = urgent;
        }
        if let Some(note) = &self.note {
            medicine.note = Some(note.clone());
        }
        medicine.updated_at = unix_millis_now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> MedicineDraft {
        MedicineDraft {
            name: name.to_string(),
            quantity: 2,
            ..Default::default()
        }
    }

    #[test]
    fn medicine_id_unique_and_parseable() {
        let id1 = MedicineId::new();
        let id2 = MedicineId::new();
        assert_ne!(id1, id2);

        let parsed: MedicineId = id1.as_str().parse().unwrap();
        assert_eq!(id1, parsed);
    }

    #[test]
    fn new_stamps_timestamps() {
        let medicine = Medicine::new(draft("Amoxicillin"));
        assert_eq!(medicine.name, "Amoxicillin");
        assert!(medicine.created_at > 0);
        assert_eq!(medicine.created_at, medicine.updated_at);
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let mut medicine = Medicine::new(draft("Amoxicillin"));
        let before = medicine.clone();

        let patch = MedicinePatch {
            quantity: Some(10),
            urgent: Some(true),
            ..Default::default()
        };
        patch.apply(&mut medicine);

        assert_eq!(medicine.name, before.name);
        assert_eq!(medicine.quantity, 10);
        assert!(medicine.urgent);
        assert!(medicine.updated_at >= before.updated_at);
    }

    #[test]
    fn empty_patch_detected() {
        assert!(MedicinePatch::default().is_empty());
        let patch = MedicinePatch {
            name: Some("Ibuprofen".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = MedicinePatch {
            quantity: Some(5),
            ..Default::default()
        };
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"quantity":5}"#);
    }
}
