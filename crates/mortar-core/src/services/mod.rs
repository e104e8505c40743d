//! Application services used by the shells (CLI, future UI)

mod bulletins;
mod orders;
pub mod payments;
mod records;

pub use bulletins::Bulletins;
pub use orders::Purchasing;
pub use payments::Ledger;
pub use records::Records;
