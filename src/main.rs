//! Pullgen CLI entrypoint for Bitbucket Server pull request enumeration.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use pullgen::telemetry::StderrJsonlTelemetrySink;
use pullgen::{EnumerationError, PullgenConfig};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

mod cli;

const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => report_failure(&mut io::stderr().lock(), &error),
    }
}

/// Writes `error` to `writer`; the exit code is a failure either way.
fn report_failure(writer: &mut impl Write, error: &EnumerationError) -> ExitCode {
    let _ignored = writeln!(writer, "{error}");
    ExitCode::FAILURE
}

async fn run() -> Result<(), EnumerationError> {
    let config = load_config()?;
    init_tracing(config.log_filter.as_deref());

    let cancellation = CancellationToken::new();
    let on_interrupt = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received; cancelling enumeration");
            on_interrupt.cancel();
        }
    });

    cli::listing::run(&config, &StderrJsonlTelemetrySink, &cancellation).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`EnumerationError::Configuration`] when ortho-config fails to
/// parse arguments or load configuration files.
fn load_config() -> Result<PullgenConfig, EnumerationError> {
    PullgenConfig::load().map_err(|error| EnumerationError::Configuration {
        message: error.to_string(),
    })
}

/// Installs a stderr `fmt` subscriber; `RUST_LOG` wins over `configured`.
fn init_tracing(configured: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured.unwrap_or(DEFAULT_LOG_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A subscriber installed by an embedding process takes precedence.
    let _ignored = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
