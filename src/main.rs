use std::process::ExitCode;

use k8s_svc_controller::config::{self, cli::BUILD, Invocation};
use k8s_svc_controller::lifecycle::{signals, startup, LifecycleError, Shutdown};
use k8s_svc_controller::observability::logging;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) =
        tracing::dispatcher::set_global_default(logging::subscriber(logging::DEFAULT_FILTER))
    {
        eprintln!("k8s-svc-controller: logging unavailable: {e}");
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "main: error");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = match config::parse_args(std::env::args_os())? {
        Invocation::Run(config) => config,
        Invocation::Display(text) => {
            print!("{text}");
            return Ok(());
        }
    };

    tracing::info!(build = BUILD, "k8s-svc-controller starting");

    let result: Result<(), LifecycleError> = async {
        let shutdown = Shutdown::new();
        let _signals = signals::listen(shutdown.clone())?;
        startup::run(&config, BUILD, shutdown).await
    }
    .await;
    tracing::info!("main: Completed");
    result.map_err(Into::into)
}
