//! Shutdown coordination for the webhook server.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

/// Why shutdown was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownCause {
    /// SIGINT / Ctrl-C.
    Interrupt,
    /// SIGTERM.
    Terminate,
    /// Programmatic trigger (tests, parent task).
    Requested,
}

impl fmt::Display for ShutdownCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupt => write!(f, "interrupt"),
            Self::Terminate => write!(f, "terminated"),
            Self::Requested => write!(f, "requested"),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Triggers {
    count: u32,
    first: Option<ShutdownCause>,
}

/// Cancellation source for graceful shutdown.
///
/// Cheap to clone; every clone observes the same triggers. Waiters that start
/// after a trigger still see it.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: Arc<watch::Sender<Triggers>>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Triggers::default());
        Self { tx: Arc::new(tx) }
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self, cause: ShutdownCause) {
        self.tx.send_modify(|triggers| {
            triggers.count += 1;
            triggers.first.get_or_insert(cause);
        });
    }

    /// Number of triggers received so far.
    pub fn trigger_count(&self) -> u32 {
        self.tx.borrow().count
    }

    /// Whether shutdown has been requested.
    pub fn is_triggered(&self) -> bool {
        self.trigger_count() > 0
    }

    /// Resolves with the first cause once shutdown has been requested.
    pub async fn requested(&self) -> ShutdownCause {
        self.nth(1).await
    }

    /// Resolves once shutdown has been requested a second time.
    pub async fn repeated(&self) -> ShutdownCause {
        self.nth(2).await
    }

    async fn nth(&self, n: u32) -> ShutdownCause {
        let mut rx = self.tx.subscribe();
        let cause = match rx.wait_for(|t| t.count >= n).await {
            Ok(triggers) => triggers.first,
            Err(_) => None,
        };
        match cause {
            Some(cause) => cause,
            // The sender lives as long as `self`, so this is unreachable in practice.
            None => std::future::pending().await,
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
