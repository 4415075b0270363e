//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (startup, signal, drain, completion)
//!     → tower-http request spans, tagged with x-request-id
//!
//! Consumers:
//!     → stdout, scraped by the cluster's log aggregation
//! ```
//!
//! # Design Decisions
//! - The logging handle is a `tracing::Dispatch` built here and installed by
//!   the binary; library code never installs a global subscriber
//! - Log filter comes from `RUST_LOG`, with a per-crate default

pub mod logging;
