//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::validation::ValidationError;

/// Configuration loading, parsing, and validation errors.
///
/// Any of these is fatal at startup; help and version requests never
/// surface as a `ConfigError`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("reading config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for the schema.
    #[error("parsing config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Flags or environment variables were malformed.
    #[error("parsing flags: {0}")]
    Flags(#[from] clap::Error),

    /// Values parsed but are semantically invalid.
    #[error("validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
