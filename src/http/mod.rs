//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TLS connection (axum-server, rustls)
//!     → server.rs (hyper builder: header read timeout)
//!     → request.rs (assign / propagate x-request-id)
//!     → TraceLayer, write timeout
//!     → handlers.rs (probe API)
//! ```
//!
//! `server.rs` also owns the lifecycle coordinator: starting the serve loop
//! and racing its exit against the shutdown trigger.

pub mod handlers;
pub mod request;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{HttpServer, RunningServer};
