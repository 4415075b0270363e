//! Server lifecycle state machine.
//!
//! ```text
//! Created → Listening → Draining → Stopped
//!                    ↘ Failed
//! ```
//!
//! Each transition happens at most once. `Stopped` and `Failed` are terminal.

use std::fmt;

use tokio::sync::watch;

/// Lifecycle state of the webhook server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// Configured, not yet bound.
    Created,
    /// Bound and serving.
    Listening,
    /// No longer accepting; in-flight requests finishing.
    Draining,
    /// Shut down (drained or force-closed).
    Stopped,
    /// Serve loop ended without a shutdown request.
    Failed,
}

impl ServerState {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(self, next: ServerState) -> bool {
        use ServerState::*;
        matches!(
            (self, next),
            (Created, Listening) | (Listening, Draining) | (Listening, Failed) | (Draining, Stopped)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ServerState::Stopped | ServerState::Failed)
    }
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Listening => write!(f, "listening"),
            Self::Draining => write!(f, "draining"),
            Self::Stopped => write!(f, "stopped"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Owner of the current [`ServerState`]; observers subscribe to changes.
#[derive(Debug)]
pub struct StateTracker {
    tx: watch::Sender<ServerState>,
}

impl StateTracker {
    /// Start in [`ServerState::Created`].
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ServerState::Created);
        Self { tx }
    }

    pub fn current(&self) -> ServerState {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ServerState> {
        self.tx.subscribe()
    }

    /// Move to `next`. Illegal transitions are refused and logged; returns
    /// whether the state changed.
    pub fn transition(&self, next: ServerState) -> bool {
        let mut from = self.current();
        let applied = self.tx.send_if_modified(|state| {
            from = *state;
            if state.can_transition_to(next) {
                *state = next;
                true
            } else {
                false
            }
        });

        if applied {
            tracing::debug!(from = %from, to = %next, "Server state changed");
        } else {
            tracing::warn!(from = %from, to = %next, "Refused server state transition");
        }
        applied
    }
}

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}
