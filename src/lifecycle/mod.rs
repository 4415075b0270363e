//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Dump config → Build API → Start listener → Await shutdown
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Coordination (race.rs, shutdown.rs, state.rs):
//!     Race { serve loop exit, shutdown trigger }
//!         serve loop exit  → Failed
//!         shutdown trigger → Draining → Stopped (drained or force-closed)
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then TLS, then the listener
//! - Any listener failure is terminal; nothing is retried
//! - Shutdown has timeout: forced close after the drain deadline
//! - A second trigger during drain forces the close immediately

pub mod error;
pub mod race;
pub mod shutdown;
pub mod signals;
pub mod startup;
pub mod state;

pub use error::{BindError, LifecycleError};
pub use race::{Race, Winner};
pub use shutdown::{Shutdown, ShutdownCause};
pub use state::{ServerState, StateTracker};
