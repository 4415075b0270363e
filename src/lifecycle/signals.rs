//! OS signal handling.
//!
//! # Responsibilities
//! - Register signal handlers (SIGTERM, SIGINT)
//! - Translate signals into shutdown triggers
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Handlers are installed before returning, so installation failures are
//!   startup errors rather than a silently missing shutdown path
//! - Every signal is forwarded; the coordinator decides what a repeat means

use tokio::task::JoinHandle;

use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::shutdown::{Shutdown, ShutdownCause};

/// Install signal handlers and forward every signal to `shutdown`.
///
/// Must be called from within a Tokio runtime.
#[cfg(unix)]
pub fn listen(shutdown: Shutdown) -> Result<JoinHandle<()>, LifecycleError> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt()).map_err(LifecycleError::Signals)?;
    let mut terminate = signal(SignalKind::terminate()).map_err(LifecycleError::Signals)?;

    Ok(tokio::spawn(async move {
        loop {
            let cause = tokio::select! {
                Some(()) = interrupt.recv() => ShutdownCause::Interrupt,
                Some(()) = terminate.recv() => ShutdownCause::Terminate,
                else => break,
            };
            forward(&shutdown, cause);
        }
    }))
}

/// Install the Ctrl-C handler and forward every press to `shutdown`.
#[cfg(not(unix))]
pub fn listen(shutdown: Shutdown) -> Result<JoinHandle<()>, LifecycleError> {
    Ok(tokio::spawn(async move {
        loop {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl-C");
                break;
            }
            forward(&shutdown, ShutdownCause::Interrupt);
        }
    }))
}

fn forward(shutdown: &Shutdown, cause: ShutdownCause) {
    if shutdown.is_triggered() {
        tracing::warn!(signal = %cause, "Shutdown signal repeated");
    } else {
        tracing::info!(signal = %cause, "Shutdown signal received");
    }
    shutdown.trigger(cause);
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Duration;

    fn send(signal: &str) {
        std::process::Command::new("kill")
            .args([signal, &std::process::id().to_string()])
            .status()
            .unwrap();
    }

    // Both signals share one test: every listener in the process sees every signal.
    #[tokio::test]
    async fn forwards_interrupt_and_terminate() {
        let shutdown = Shutdown::new();
        let task = listen(shutdown.clone()).unwrap();

        // The handlers installed above replace the default disposition.
        send("-INT");
        let cause = tokio::time::timeout(Duration::from_secs(5), shutdown.requested())
            .await
            .unwrap();
        assert_eq!(cause, ShutdownCause::Interrupt);

        send("-TERM");
        tokio::time::timeout(Duration::from_secs(5), shutdown.repeated())
            .await
            .unwrap();
        assert_eq!(shutdown.trigger_count(), 2);
        task.abort();
    }
}
