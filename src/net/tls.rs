//! TLS configuration and certificate loading.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum_server::tls_rustls::RustlsConfig;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use thiserror::Error;

/// Failure to turn the configured PEM files into a server TLS config.
#[derive(Debug, Error)]
pub enum TlsError {
    #[error("reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing PEM in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no certificates found in {}", path.display())]
    NoCertificates { path: PathBuf },

    #[error("no private key found in {}", path.display())]
    NoPrivateKey { path: PathBuf },

    #[error("invalid certificate/key pair: {0}")]
    Config(#[from] rustls::Error),
}

/// Load TLS configuration from certificate and key files.
///
/// The crypto provider is chosen explicitly so the result does not depend on
/// which rustls backends other crates in the build enable.
pub async fn load_tls_config(cert_path: &Path, key_path: &Path) -> Result<RustlsConfig, TlsError> {
    let certs = read_certs(cert_path).await?;
    let key = read_key(key_path).await?;

    let provider = Arc::new(rustls::crypto::aws_lc_rs::default_provider());
    let mut config = rustls::ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .with_no_client_auth()
        .with_single_cert(certs, key)?;
    config.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];

    tracing::debug!(
        cert_path = %cert_path.display(),
        key_path = %key_path.display(),
        "TLS material loaded"
    );

    Ok(RustlsConfig::from_config(Arc::new(config)))
}

async fn read_pem(path: &Path) -> Result<Vec<u8>, TlsError> {
    tokio::fs::read(path).await.map_err(|source| TlsError::Read {
        path: path.to_path_buf(),
        source,
    })
}

async fn read_certs(path: &Path) -> Result<Vec<CertificateDer<'static>>, TlsError> {
    let pem = read_pem(path).await?;
    let certs = rustls_pemfile::certs(&mut pem.as_slice())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| TlsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if certs.is_empty() {
        return Err(TlsError::NoCertificates {
            path: path.to_path_buf(),
        });
    }
    Ok(certs)
}

async fn read_key(path: &Path) -> Result<PrivateKeyDer<'static>, TlsError> {
    let pem = read_pem(path).await?;
    rustls_pemfile::private_key(&mut pem.as_slice())
        .map_err(|source| TlsError::Parse {
            path: path.to_path_buf(),
            source,
        })?
        .ok_or_else(|| TlsError::NoPrivateKey {
            path: path.to_path_buf(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_pair(dir: &Path) -> (PathBuf, PathBuf) {
        let certified = rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
        let cert_path = dir.join("webhook.crt");
        let key_path = dir.join("webhook-key.pem");
        std::fs::write(&cert_path, certified.cert.pem()).unwrap();
        std::fs::write(&key_path, certified.key_pair.serialize_pem()).unwrap();
        (cert_path, key_path)
    }

    #[tokio::test]
    async fn loads_valid_pair() {
        let dir = tempfile::tempdir().unwrap();
        let (cert, key) = write_pair(dir.path());
        assert!(load_tls_config(&cert, &key).await.is_ok());
    }

    #[tokio::test]
    async fn missing_cert_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let (_, key) = write_pair(dir.path());

        let err = load_tls_config(&dir.path().join("absent.crt"), &key)
            .await
            .unwrap_err();
        assert!(matches!(err, TlsError::Read { .. }));
    }

    #[tokio::test]
    async fn key_file_without_certs() {
        let dir = tempfile::tempdir().unwrap();
        let (_, key) = write_pair(dir.path());

        let err = load_tls_config(&key, &key).await.unwrap_err();
        assert!(matches!(err, TlsError::NoCertificates { .. }));
    }

    #[tokio::test]
    async fn cert_file_without_key() {
        let dir = tempfile::tempdir().unwrap();
        let (cert, _) = write_pair(dir.path());

        let err = load_tls_config(&cert, &cert).await.unwrap_err();
        assert!(matches!(err, TlsError::NoPrivateKey { .. }));
    }
}
