//! Startup orchestration.
//!
//! # Responsibilities
//! - Report the effective configuration
//! - Build the API and start the TLS listener
//! - Hand control to the shutdown coordinator
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The shutdown trigger is passed in, so callers decide what ends the run
//!   (OS signals in the binary, the harness in tests)

use crate::config::Config;
use crate::http::{handlers, HttpServer};
use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::shutdown::Shutdown;

/// Serve the webhook API until `shutdown` fires or the listener fails.
pub async fn run(config: &Config, build: &'static str, shutdown: Shutdown) -> Result<(), LifecycleError> {
    tracing::info!("Config:\n{}", config);

    tracing::info!(build, "Initializing API support");
    let server = HttpServer::new(config.web.clone(), handlers::api(build));
    let running = server.start(&config.tls).await?;

    running
        .await_shutdown(&shutdown, config.web.shutdown_timeout)
        .await
}
