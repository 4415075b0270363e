//! HTTPS server setup and lifecycle coordination.
//!
//! # Responsibilities
//! - Wrap the API router with request ID, tracing, and write timeout layers
//! - Load TLS material and bind the listener before anything is spawned
//! - Run the serve loop on a background task
//! - Race serve loop exit against the shutdown trigger
//! - Drain in-flight requests within a deadline, then force-close

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use axum_server::tls_rustls::RustlsAcceptor;
use axum_server::Handle;
use hyper_util::rt::TokioTimer;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::error::Elapsed;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::instrument::WithSubscriber;

use crate::config::{TlsConfig, WebConfig};
use crate::http::request::{propagate_request_id, request_span, set_request_id};
use crate::lifecycle::{BindError, LifecycleError, Race, ServerState, Shutdown, ShutdownCause, StateTracker};
use crate::net::{bind_listener, load_tls_config};

/// How long a forced close may wait for the serve loop before aborting it.
const FORCE_CLOSE_WAIT: Duration = Duration::from_millis(250);

/// What ended the wait in [`RunningServer::await_shutdown`].
enum LifecycleEvent {
    ServerExited(io::Error),
    ShutdownRequested(ShutdownCause),
}

/// What ended the drain.
enum DrainOutcome {
    Drained(io::Result<()>),
    TimedOut(Elapsed),
    Forced,
}

/// A configured, not yet listening, webhook server.
pub struct HttpServer {
    config: WebConfig,
    router: Router,
    state: StateTracker,
}

impl HttpServer {
    /// Create a server that will serve `app` with the given web settings.
    pub fn new(config: WebConfig, app: Router) -> Self {
        let router = Self::build_router(&config, app);
        Self {
            config,
            router,
            state: StateTracker::new(),
        }
    }

    /// Wrap the application router with the middleware stack.
    fn build_router(config: &WebConfig, app: Router) -> Router {
        app.layer(
            ServiceBuilder::new()
                .layer(set_request_id())
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(propagate_request_id())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    config.write_timeout,
                )),
        )
    }

    /// Current lifecycle state (always `Created` before [`start`](Self::start)).
    pub fn state(&self) -> ServerState {
        self.state.current()
    }

    /// Load TLS material, bind the configured address, and spawn the serve loop.
    ///
    /// Returns as soon as the socket is bound; the serve loop's outcome is
    /// observed through [`RunningServer::await_shutdown`].
    pub async fn start(self, tls: &TlsConfig) -> Result<RunningServer, LifecycleError> {
        let rustls = load_tls_config(&tls.cert_path, &tls.key_path)
            .await
            .map_err(BindError::Tls)?;

        let bind_error = |source| BindError::Address {
            addr: self.config.api_host.clone(),
            source,
        };
        let listener = bind_listener(&self.config.api_host).map_err(bind_error)?;
        let local_addr = listener.local_addr().map_err(bind_error)?;

        // A client that never finishes the handshake is dropped after the read timeout.
        let acceptor = RustlsAcceptor::new(rustls).handshake_timeout(self.config.read_timeout);
        let handle = Handle::new();
        let mut server = axum_server::from_tcp(listener)
            .acceptor(acceptor)
            .handle(handle.clone());
        server
            .http_builder()
            .http1()
            .timer(TokioTimer::new())
            .header_read_timeout(self.config.read_timeout);

        let app = self.router.into_make_service();
        let task = tokio::spawn(server.serve(app).with_current_subscriber());

        self.state.transition(ServerState::Listening);
        tracing::info!(address = %local_addr, "API listening");

        Ok(RunningServer {
            local_addr,
            handle,
            task,
            state: self.state,
        })
    }
}

/// A listening server, owned by the coordinator until it stops.
pub struct RunningServer {
    local_addr: SocketAddr,
    handle: Handle,
    task: JoinHandle<io::Result<()>>,
    state: StateTracker,
}

impl RunningServer {
    /// Address the listener is bound to (resolves port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn state(&self) -> ServerState {
        self.state.current()
    }

    /// Observe state changes, e.g. to wait for `Draining` from a test.
    pub fn watch_state(&self) -> watch::Receiver<ServerState> {
        self.state.subscribe()
    }

    /// Number of open client connections.
    pub fn connection_count(&self) -> usize {
        self.handle.connection_count()
    }

    /// Block until the serve loop fails or `shutdown` is triggered.
    ///
    /// A serve loop exit is reported as [`LifecycleError::Server`] without
    /// waiting for a signal. A shutdown trigger starts a graceful drain bounded
    /// by `drain_timeout`; connections still open at the deadline are
    /// force-closed and [`LifecycleError::ShutdownTimeout`] is returned. A
    /// second trigger during the drain force-closes immediately.
    pub async fn await_shutdown(
        mut self,
        shutdown: &Shutdown,
        drain_timeout: Duration,
    ) -> Result<(), LifecycleError> {
        let task = &mut self.task;
        let winner = Race::new("server", async move {
            let error = match serve_outcome(task.await) {
                Ok(()) => io::Error::other("listener closed unexpectedly"),
                Err(e) => e,
            };
            LifecycleEvent::ServerExited(error)
        })
        .with("shutdown", async {
            LifecycleEvent::ShutdownRequested(shutdown.requested().await)
        })
        .run()
        .await;

        tracing::debug!(source = winner.source, "Lifecycle event");

        match winner.value {
            LifecycleEvent::ServerExited(e) => {
                self.state.transition(ServerState::Failed);
                tracing::error!(error = %e, "Server stopped unexpectedly");
                Err(LifecycleError::Server(e))
            }
            LifecycleEvent::ShutdownRequested(cause) => {
                self.drain(shutdown, cause, drain_timeout).await
            }
        }
    }

    async fn drain(
        mut self,
        shutdown: &Shutdown,
        cause: ShutdownCause,
        drain_timeout: Duration,
    ) -> Result<(), LifecycleError> {
        self.state.transition(ServerState::Draining);
        tracing::info!(
            signal = %cause,
            connections = self.handle.connection_count(),
            drain_timeout = ?drain_timeout,
            "Start shutdown"
        );
        self.handle.graceful_shutdown(None);

        let task = &mut self.task;
        let outcome = Race::new("drain", async move {
            match tokio::time::timeout(drain_timeout, task).await {
                Ok(joined) => DrainOutcome::Drained(serve_outcome(joined)),
                Err(elapsed) => DrainOutcome::TimedOut(elapsed),
            }
        })
        .with("repeat signal", async {
            shutdown.repeated().await;
            DrainOutcome::Forced
        })
        .run()
        .await
        .value;

        let result = match outcome {
            DrainOutcome::Drained(Ok(())) => {
                tracing::info!("Shutdown complete");
                Ok(())
            }
            DrainOutcome::Drained(Err(e)) => {
                tracing::error!(error = %e, "Server failed while draining");
                Err(LifecycleError::Server(e))
            }
            DrainOutcome::TimedOut(source) => {
                let remaining = self.force_close().await;
                tracing::warn!(remaining, "Drain deadline exceeded, connections force-closed");
                Err(LifecycleError::ShutdownTimeout {
                    timeout: drain_timeout,
                    remaining,
                    source,
                })
            }
            DrainOutcome::Forced => {
                let remaining = self.force_close().await;
                tracing::warn!(remaining, "Shutdown repeated, connections force-closed");
                Err(LifecycleError::ShutdownAborted { remaining })
            }
        };

        self.state.transition(ServerState::Stopped);
        result
    }

    /// Close every connection now and wait briefly for the serve loop to return.
    ///
    /// Connections still in the TLS handshake do not observe the close, and
    /// the serve loop waits on them; past [`FORCE_CLOSE_WAIT`] the loop is
    /// aborted instead.
    async fn force_close(&mut self) -> usize {
        let remaining = self.handle.connection_count();
        self.handle.shutdown();
        match tokio::time::timeout(FORCE_CLOSE_WAIT, &mut self.task).await {
            Ok(joined) => {
                if let Err(e) = serve_outcome(joined) {
                    tracing::debug!(error = %e, "Serve loop error after force close");
                }
            }
            Err(_) => {
                self.task.abort();
                tracing::warn!(
                    connections = self.handle.connection_count(),
                    "Serve loop still waiting on connections, aborted"
                );
            }
        }
        remaining
    }
}

fn serve_outcome(joined: Result<io::Result<()>, JoinError>) -> io::Result<()> {
    match joined {
        Ok(result) => result,
        Err(e) => Err(io::Error::other(e)),
    }
}
