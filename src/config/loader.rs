//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::error::ConfigError;
use crate::config::schema::Config;

/// Load configuration from a TOML file.
///
/// Missing sections and keys fall back to defaults. Validation is left to the
/// caller so flag overrides can be applied first.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn loads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[web]\napi_host = \"127.0.0.1:9443\"\nwrite_timeout = \"10s\"\n\n[tls]\ncert_path = \"/tmp/tls.crt\""
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.web.api_host, "127.0.0.1:9443");
        assert_eq!(config.web.write_timeout, Duration::from_secs(10));
        assert_eq!(config.tls.cert_path, Path::new("/tmp/tls.crt"));
        assert_eq!(config.tls.key_path, Path::new("/certs/webhook-key.pem"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/k8s-svc-controller.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn bad_duration_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[web]\nread_timeout = \"whenever\"").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("whenever"));
    }
}
