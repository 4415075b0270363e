//! Errors that end the server lifecycle.

use std::time::Duration;

use thiserror::Error;
use tokio::time::error::Elapsed;

use crate::net::TlsError;

/// The TLS listener could not be started.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("binding {addr}: {source}")]
    Address {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("loading TLS material: {0}")]
    Tls(#[from] TlsError),
}

/// Terminal outcome of starting or running the server.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Startup failed before the serve loop began.
    #[error(transparent)]
    Bind(#[from] BindError),

    /// The serve loop ended while the server was listening.
    #[error("server error: {0}")]
    Server(#[source] std::io::Error),

    /// Drain exceeded its deadline; remaining connections were force-closed.
    #[error("could not stop server gracefully within {}: {remaining} connection(s) force-closed", humantime::format_duration(*timeout))]
    ShutdownTimeout {
        timeout: Duration,
        remaining: usize,
        #[source]
        source: Elapsed,
    },

    /// A repeated shutdown trigger cut the drain short.
    #[error("shutdown forced by repeated signal: {remaining} connection(s) force-closed")]
    ShutdownAborted { remaining: usize },

    /// OS signal handlers could not be installed.
    #[error("installing signal handlers: {0}")]
    Signals(#[source] std::io::Error),
}
