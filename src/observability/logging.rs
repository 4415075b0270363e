//! Structured logging.
//!
//! Builds the process logging handle. Lines carry timestamp, level, target,
//! and source location so a log line can be traced to the code that wrote it.

use tracing::Dispatch;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "k8s_svc_controller=info,tower_http=info";

/// Build a stdout logging handle.
///
/// `RUST_LOG` takes precedence over `default_filter`.
pub fn subscriber(default_filter: &str) -> Dispatch {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(true)
            .with_file(true)
            .with_line_number(true),
    );

    Dispatch::new(subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_is_scoped() {
        let dispatch = subscriber("k8s_svc_controller=debug");
        tracing::dispatcher::with_default(&dispatch, || {
            tracing::info!("scoped log line");
            if std::env::var_os("RUST_LOG").is_none() {
                assert!(tracing::enabled!(tracing::Level::DEBUG));
            }
        });
    }
}
