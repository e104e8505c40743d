//! Offline reconciliation
//!
//! When the device reconnects, queued mutations are replayed in order
//! against the remote store, the authoritative lists are re-fetched, and the
//! optimistic mirror is superseded. See the module docs of
//! [`reconciler`](self::reconciler) for the pass semantics.

mod connectivity;
mod executor;
mod mirror;
mod notices;
mod reconciler;
mod status;

pub use connectivity::ConnectivityMonitor;
pub use executor::MutationExecutor;
pub use mirror::MirrorStore;
pub use notices::{notice_channel, Notice, NoticeReceiver, NoticeSender};
pub use reconciler::{Reconciler, SyncOutcome, SyncReport};
pub use status::{ConnectivityState, StatusBoard};
