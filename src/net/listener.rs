//! TCP listener binding.
//!
//! # Responsibilities
//! - Resolve and bind the configured address
//! - Hand a non-blocking std listener to the TLS server

use std::net::TcpListener;

/// Bind to `address` ("host:port", hostnames are resolved).
///
/// The listener is switched to non-blocking mode so it can be adopted by the
/// async runtime.
pub fn bind_listener(address: &str) -> Result<TcpListener, std::io::Error> {
    let listener = TcpListener::bind(address)?;
    listener.set_nonblocking(true)?;

    tracing::debug!(
        address = %listener.local_addr()?,
        requested = %address,
        "Listener bound"
    );

    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ephemeral_port_is_assigned() {
        let listener = bind_listener("127.0.0.1:0").unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[test]
    fn occupied_port_fails() {
        let first = bind_listener("127.0.0.1:0").unwrap();
        let addr = first.local_addr().unwrap().to_string();

        let err = bind_listener(&addr).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::AddrInUse);
    }
}
