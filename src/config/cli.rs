//! Command-line flags and environment overrides.
//!
//! Every option can be given as a flag or as a `K8S_SVC_CONTROLLER_*`
//! environment variable; flags win over the environment, which wins over the
//! config file, which wins over defaults.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches, Parser};

use crate::config::duration_format::parse_duration;
use crate::config::error::ConfigError;
use crate::config::loader::load_config;
use crate::config::schema::Config;
use crate::config::validation::validate_config;

/// Build identifier, set at compile time through `BUILD_REF`.
pub const BUILD: &str = match option_env!("BUILD_REF") {
    Some(build) => build,
    None => "develop",
};

/// Service description shown with `--version`.
pub const DESCRIPTION: &str = "copyright v1.0.0";

#[derive(Debug, Parser)]
#[command(
    name = "k8s-svc-controller",
    version = BUILD,
    about = "Kubernetes admission webhook server",
    long_about = None
)]
struct Cli {
    /// TOML config file; flags and environment override its values.
    #[arg(long, env = "K8S_SVC_CONTROLLER_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Address the TLS listener binds to [default: 0.0.0.0:443]
    #[arg(long, env = "K8S_SVC_CONTROLLER_WEB_API_HOST", value_name = "HOST:PORT")]
    web_api_host: Option<String>,

    /// Time allowed to read request headers [default: 5s]
    #[arg(long, env = "K8S_SVC_CONTROLLER_WEB_READ_TIMEOUT", value_name = "DURATION", value_parser = parse_duration)]
    web_read_timeout: Option<Duration>,

    /// Time allowed to produce a response [default: 5s]
    #[arg(long, env = "K8S_SVC_CONTROLLER_WEB_WRITE_TIMEOUT", value_name = "DURATION", value_parser = parse_duration)]
    web_write_timeout: Option<Duration>,

    /// Drain time allowed on shutdown before connections are closed [default: 5s]
    #[arg(long, env = "K8S_SVC_CONTROLLER_WEB_SHUTDOWN_TIMEOUT", value_name = "DURATION", value_parser = parse_duration)]
    web_shutdown_timeout: Option<Duration>,

    /// TLS certificate chain (PEM) [default: /certs/webhook.crt]
    #[arg(long, env = "K8S_SVC_CONTROLLER_TLS_CERT_PATH", value_name = "PATH")]
    tls_cert_path: Option<PathBuf>,

    /// TLS private key (PEM) [default: /certs/webhook-key.pem]
    #[arg(long, env = "K8S_SVC_CONTROLLER_TLS_KEY_PATH", value_name = "PATH")]
    tls_key_path: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => Config::default(),
        };

        if let Some(host) = self.web_api_host {
            config.web.api_host = host;
        }
        if let Some(timeout) = self.web_read_timeout {
            config.web.read_timeout = timeout;
        }
        if let Some(timeout) = self.web_write_timeout {
            config.web.write_timeout = timeout;
        }
        if let Some(timeout) = self.web_shutdown_timeout {
            config.web.shutdown_timeout = timeout;
        }
        if let Some(path) = self.tls_cert_path {
            config.tls.cert_path = path;
        }
        if let Some(path) = self.tls_key_path {
            config.tls.key_path = path;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

/// What the process was asked to do.
#[derive(Debug)]
pub enum Invocation {
    /// Serve with the given configuration.
    Run(Config),
    /// Print usage or version text and exit successfully.
    Display(String),
}

/// Parse process arguments (including `argv[0]`) into an [`Invocation`].
pub fn parse_args<I, T>(args: I) -> Result<Invocation, ConfigError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let command = Cli::command().long_version(format!("{BUILD}\n{DESCRIPTION}"));
    let matches = match command.try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(e)
            if matches!(
                e.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) =>
        {
            return Ok(Invocation::Display(e.render().to_string()));
        }
        Err(e) => return Err(ConfigError::Flags(e)),
    };

    let cli = Cli::from_arg_matches(&matches).map_err(ConfigError::Flags)?;
    cli.into_config().map(Invocation::Run)
}
