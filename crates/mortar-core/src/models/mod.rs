//! Data models for mortar

mod bulletin;
mod medicine;
mod order;
mod payment;
mod revenue;

pub use bulletin::{Bulletin, BulletinId, StaffRole};
pub use medicine::{Medicine, MedicineDraft, MedicineId, MedicinePatch};
pub use order::{OrderId, OrderLine, OrderStatus, PurchaseOrder};
pub use payment::{Payment, PaymentDraft, PaymentId, PaymentKind};
pub use revenue::{Revenue, RevenueDraft, RevenueId, RevenuePatch, Shift};
