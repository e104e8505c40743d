//! Shared connectivity/sync state observable by the UI.

use std::sync::Arc;

use tokio::sync::watch;

/// Snapshot of the client's connectivity and sync activity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConnectivityState {
    /// Whether the platform reports a usable connection
    pub online: bool,
    /// Whether a reconciliation pass is in progress
    pub syncing: bool,
}

/// Handle to the process-wide connectivity state.
///
/// `online` is written only by the connectivity monitor and `syncing` only
/// by the reconciler; everyone else observes through [`subscribe`].
///
/// [`subscribe`]: StatusBoard::subscribe
#[derive(Clone)]
pub struct StatusBoard {
    tx: Arc<watch::Sender<ConnectivityState>>,
}

impl StatusBoard {
    /// Create a board with the platform's current connectivity
    #[must_use]
    pub fn new(online: bool) -> Self {
        let (tx, _rx) = watch::channel(ConnectivityState {
            online,
            syncing: false,
        });
        Self { tx: Arc::new(tx) }
    }

    /// Watch for state changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ConnectivityState> {
        self.tx.subscribe()
    }

    /// Current state
    #[must_use]
    pub fn snapshot(&self) -> ConnectivityState {
        *self.tx.borrow()
    }

    /// Whether the client currently considers itself online
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.snapshot().online
    }

    pub(crate) fn set_online(&self, online: bool) {
        self.tx.send_modify(|state| state.online = online);
    }

    pub(crate) fn set_syncing(&self, syncing: bool) {
        self.tx.send_modify(|state| state.syncing = syncing);
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_touch_only_their_field() {
        let board = StatusBoard::new(true);

        board.set_syncing(true);
        assert_eq!(
            board.snapshot(),
            ConnectivityState {
                online: true,
                syncing: true
            }
        );

        board.set_online(false);
        assert_eq!(
            board.snapshot(),
            ConnectivityState {
                online: false,
                syncing: true
            }
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn subscribers_observe_changes() {
        let board = StatusBoard::new(false);
        let mut rx = board.subscribe();

        board.set_online(true);
        rx.changed().await.unwrap();
        assert!(rx.borrow().online);
    }
}
