//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Defaults match what the webhook deployment provisions: TLS on `0.0.0.0:443`
//! with the certificate pair mounted under `/certs`.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::duration_format;

/// Default TLS certificate path (PEM).
pub const DEFAULT_CERT_PATH: &str = "/certs/webhook.crt";

/// Default TLS private key path (PEM).
pub const DEFAULT_KEY_PATH: &str = "/certs/webhook-key.pem";

/// Root configuration for the webhook server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Listener and request timing.
    pub web: WebConfig,

    /// Certificate material for the TLS listener.
    pub tls: TlsConfig,
}

/// Web listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WebConfig {
    /// Bind address (e.g., "0.0.0.0:443").
    pub api_host: String,

    /// Time allowed to read request headers.
    #[serde(with = "duration_format")]
    pub read_timeout: Duration,

    /// Time allowed to produce a response.
    #[serde(with = "duration_format")]
    pub write_timeout: Duration,

    /// Maximum drain time before remaining connections are force-closed.
    #[serde(with = "duration_format")]
    pub shutdown_timeout: Duration,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0:443".to_string(),
            read_timeout: Duration::from_secs(5),
            write_timeout: Duration::from_secs(5),
            shutdown_timeout: Duration::from_secs(5),
        }
    }
}

/// TLS certificate and key locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TlsConfig {
    /// Path to certificate chain file (PEM).
    pub cert_path: PathBuf,

    /// Path to private key file (PEM).
    pub key_path: PathBuf,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            cert_path: PathBuf::from(DEFAULT_CERT_PATH),
            key_path: PathBuf::from(DEFAULT_KEY_PATH),
        }
    }
}

/// Human-readable dump, one `--flag=value` line per option.
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--web-api-host={}", self.web.api_host)?;
        writeln!(
            f,
            "--web-read-timeout={}",
            humantime::format_duration(self.web.read_timeout)
        )?;
        writeln!(
            f,
            "--web-write-timeout={}",
            humantime::format_duration(self.web.write_timeout)
        )?;
        writeln!(
            f,
            "--web-shutdown-timeout={}",
            humantime::format_duration(self.web.shutdown_timeout)
        )?;
        writeln!(f, "--tls-cert-path={}", self.tls.cert_path.display())?;
        write!(f, "--tls-key-path={}", self.tls.key_path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployment() {
        let config = Config::default();
        assert_eq!(config.web.api_host, "0.0.0.0:443");
        assert_eq!(config.web.read_timeout, Duration::from_secs(5));
        assert_eq!(config.web.write_timeout, Duration::from_secs(5));
        assert_eq!(config.web.shutdown_timeout, Duration::from_secs(5));
        assert_eq!(config.tls.cert_path, PathBuf::from("/certs/webhook.crt"));
        assert_eq!(config.tls.key_path, PathBuf::from("/certs/webhook-key.pem"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [web]
            api_host = "127.0.0.1:8443"
            shutdown_timeout = "1m 30s"
            "#,
        )
        .unwrap();

        assert_eq!(config.web.api_host, "127.0.0.1:8443");
        assert_eq!(config.web.shutdown_timeout, Duration::from_secs(90));
        assert_eq!(config.web.read_timeout, Duration::from_secs(5));
        assert_eq!(config.tls, TlsConfig::default());
    }

    #[test]
    fn dump_lists_every_option() {
        let dump = Config::default().to_string();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(
            lines,
            vec![
                "--web-api-host=0.0.0.0:443",
                "--web-read-timeout=5s",
                "--web-write-timeout=5s",
                "--web-shutdown-timeout=5s",
                "--tls-cert-path=/certs/webhook.crt",
                "--tls-key-path=/certs/webhook-key.pem",
            ]
        );
    }
}
