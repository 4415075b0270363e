//! Kubernetes admission webhook server bootstrap.
//!
//! Parses configuration, serves HTTPS on a rustls listener, and shuts down in
//! an orderly way when interrupted: stop accepting, drain in-flight requests
//! within a deadline, force-close whatever remains.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::Config;
pub use http::{HttpServer, RunningServer};
pub use lifecycle::{LifecycleError, Shutdown, ShutdownCause};
