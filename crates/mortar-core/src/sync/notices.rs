//! User-facing advisory messages.

use tokio::sync::mpsc;

/// Fire-and-forget advisory surfaced to the user by whatever shell is
/// embedding the core (toast, banner, CLI line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Connection lost; further writes will be queued
    OfflineEntered,
    /// A reconciliation pass started
    SyncStarted,
    /// A reconciliation pass finished cleanly
    SyncSucceeded { synced: usize },
    /// A reconciliation pass failed or left items behind
    SyncFailed { message: String },
}

/// Receiving half handed to the UI layer
pub type NoticeReceiver = mpsc::UnboundedReceiver<Notice>;

/// Cloneable sending half used by the sync components.
///
/// Sending never fails: a dropped receiver just means nobody is listening.
#[derive(Clone)]
pub struct NoticeSender {
    tx: mpsc::UnboundedSender<Notice>,
}

impl NoticeSender {
    /// Emit an advisory
    pub fn send(&self, notice: Notice) {
        tracing::debug!(?notice, "advisory");
        let _ = self.tx.send(notice);
    }
}

/// Create the advisory channel
#[must_use]
pub fn notice_channel() -> (NoticeSender, NoticeReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (NoticeSender { tx }, rx)
}
