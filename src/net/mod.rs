//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Start
//!     → tls.rs (load certificate chain + private key into a rustls config)
//!     → listener.rs (bind TCP socket up front, so bind errors are synchronous)
//!     → Hand off to the HTTP layer's serve loop
//! ```
//!
//! # Design Decisions
//! - Both steps happen before the serve loop is spawned: a bad certificate or
//!   an occupied port is a startup error, never a runtime one
//! - TLS is mandatory; admission webhooks are only called over HTTPS

pub mod listener;
pub mod tls;

pub use listener::bind_listener;
pub use tls::{load_tls_config, TlsError};
