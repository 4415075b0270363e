//! Shared utilities for lifecycle integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use k8s_svc_controller::config::{TlsConfig, WebConfig};
use k8s_svc_controller::http::RunningServer;
use tempfile::TempDir;
use tokio::sync::Notify;

/// A self-signed certificate pair on disk, removed on drop.
pub struct TestCerts {
    _dir: TempDir,
    pub tls: TlsConfig,
}

/// Generate a self-signed certificate for "localhost" into a temp directory.
pub fn self_signed() -> TestCerts {
    let dir = tempfile::tempdir().unwrap();
    let certified = rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();

    let tls = TlsConfig {
        cert_path: dir.path().join("webhook.crt"),
        key_path: dir.path().join("webhook-key.pem"),
    };
    std::fs::write(&tls.cert_path, certified.cert.pem()).unwrap();
    std::fs::write(&tls.key_path, certified.key_pair.serialize_pem()).unwrap();

    TestCerts { _dir: dir, tls }
}

/// Web settings on an ephemeral loopback port.
pub fn web_config(shutdown_timeout: Duration) -> WebConfig {
    WebConfig {
        api_host: "127.0.0.1:0".to_string(),
        shutdown_timeout,
        ..WebConfig::default()
    }
}

/// HTTPS client that trusts the self-signed test certificate.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .no_proxy()
        .build()
        .unwrap()
}

/// Router whose `/hold` handler signals `started`, then sleeps for `hold`
/// before answering "released".
pub fn hold_app(hold: Duration, started: Arc<Notify>) -> Router {
    Router::new().route(
        "/hold",
        get(move || {
            let started = started.clone();
            async move {
                started.notify_one();
                tokio::time::sleep(hold).await;
                "released"
            }
        }),
    )
}

/// Wait until the server has accepted at least `count` connections.
pub async fn wait_for_connections(server: &RunningServer, count: usize) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while server.connection_count() < count {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap();
}
