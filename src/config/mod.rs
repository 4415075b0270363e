//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → optional TOML file (loader.rs)
//!     → environment + flags (cli.rs, clap)
//!     → validation.rs (semantic checks)
//!     → Config (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults to allow an empty invocation
//! - Validation separates syntactic (serde/clap) from semantic checks
//! - Help and version requests are not errors

pub mod cli;
pub mod duration_format;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::{parse_args, Invocation};
pub use error::ConfigError;
pub use schema::{Config, TlsConfig, WebConfig};
