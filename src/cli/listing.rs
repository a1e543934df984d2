//! Repository pull request listing operation.

use std::io::{self, Write};

use pullgen::bitbucket::PageGateway;
use pullgen::telemetry::TelemetrySink;
use pullgen::{
    BitbucketServerGateway, EnumerationError, PullRequestService, PullgenConfig, ServiceConfig,
};
use tokio_util::sync::CancellationToken;

use super::output::write_listing;

/// Lists the open pull requests of the configured repository.
///
/// # Errors
///
/// Returns [`EnumerationError::Configuration`] if required configuration is
/// missing, and any enumeration failure otherwise.
pub async fn run(
    config: &PullgenConfig,
    telemetry: &dyn TelemetrySink,
    cancellation: &CancellationToken,
) -> Result<(), EnumerationError> {
    run_with_gateway_builder(
        config,
        BitbucketServerGateway::new,
        telemetry,
        cancellation,
        &mut io::stdout(),
    )
    .await
}

/// Lists pull requests using a custom gateway builder.
///
/// `writer` is only touched once every page has been fetched. This function
/// is exposed for testing with stub gateways.
pub async fn run_with_gateway_builder<G, F, W>(
    config: &PullgenConfig,
    build_gateway: F,
    telemetry: &dyn TelemetrySink,
    cancellation: &CancellationToken,
    writer: &mut W,
) -> Result<(), EnumerationError>
where
    G: PageGateway,
    F: FnOnce(&ServiceConfig) -> Result<G, EnumerationError>,
    W: Write,
{
    let format = config.output_format()?;
    let filters = config.filters();
    let service_config = config.service_config()?;

    let gateway = build_gateway(&service_config)?;
    let service = PullRequestService::new(&gateway).with_telemetry(telemetry);

    let pull_requests = service
        .list_pull_requests_with_cancellation(&filters, cancellation)
        .await?;
    write_listing(writer, format, &pull_requests)
}
