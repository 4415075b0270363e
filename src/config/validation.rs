//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde and clap handle syntax)
//! - Validate value ranges (timeouts > 0, port present)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: Config → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::Config;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("web.api_host must not be empty")]
    EmptyApiHost,

    #[error("web.api_host '{0}' must be host:port with a numeric port")]
    InvalidApiHost(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let web = &config.web;

    if web.api_host.trim().is_empty() {
        errors.push(ValidationError::EmptyApiHost);
    } else {
        let port_ok = web
            .api_host
            .rsplit_once(':')
            .map(|(host, port)| !host.is_empty() && port.parse::<u16>().is_ok())
            .unwrap_or(false);
        if !port_ok {
            errors.push(ValidationError::InvalidApiHost(web.api_host.clone()));
        }
    }

    for (name, value) in [
        ("web.read_timeout", web.read_timeout),
        ("web.write_timeout", web.write_timeout),
        ("web.shutdown_timeout", web.shutdown_timeout),
    ] {
        if value.is_zero() {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
