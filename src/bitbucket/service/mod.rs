//! High-level enumeration facade used by generators and the CLI.
//!
//! One call compiles the filters, walks every page, normalises each record in
//! page order, applies the filters and returns the surviving pull requests.
//! Any error aborts the whole call; no partial listing is returned.

use std::collections::HashSet;

use tokio_util::sync::CancellationToken;

use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

use super::error::EnumerationError;
use super::filter::{CompiledFilters, PullRequestFilter};
use super::gateway::PageGateway;
use super::models::PullRequest;
use super::pagination::PullRequestPages;

/// Enumerates open pull requests through a page gateway.
///
/// # Example
///
/// ```no_run
/// use pullgen::{BitbucketServerGateway, PullRequestFilter, PullRequestService};
///
/// # async fn run() -> Result<(), pullgen::EnumerationError> {
/// let gateway = BitbucketServerGateway::no_auth("https://bitbucket.example.com", "PROJ", "repo")?;
/// let service = PullRequestService::new(&gateway);
/// let pull_requests = service
///     .list_pull_requests(&[PullRequestFilter::branch_match("^feature-")])
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct PullRequestService<'client, Gateway>
where
    Gateway: PageGateway + ?Sized,
{
    client: &'client Gateway,
    telemetry: &'client dyn TelemetrySink,
}

impl<'client, Gateway> PullRequestService<'client, Gateway>
where
    Gateway: PageGateway + ?Sized,
{
    /// Create a new facade using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self {
            client,
            telemetry: &NoopTelemetrySink,
        }
    }

    /// Records a telemetry event for every successful enumeration.
    #[must_use]
    pub const fn with_telemetry(mut self, telemetry: &'client dyn TelemetrySink) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// List every open pull request that matches all `filters`.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError::Filter`] before any request when a pattern
    /// is invalid, and propagates transport and decode failures from the
    /// page walk.
    pub async fn list_pull_requests(
        &self,
        filters: &[PullRequestFilter],
    ) -> Result<Vec<PullRequest>, EnumerationError> {
        self.list_pull_requests_with_cancellation(filters, &CancellationToken::new())
            .await
    }

    /// As [`Self::list_pull_requests`], aborting when `cancellation` fires.
    ///
    /// Cancellation is checked before each page request and interrupts a
    /// request that is already in flight.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError::Cancelled`] when the token fires before the
    /// walk completes, in addition to the errors of
    /// [`Self::list_pull_requests`].
    pub async fn list_pull_requests_with_cancellation(
        &self,
        filters: &[PullRequestFilter],
        cancellation: &CancellationToken,
    ) -> Result<Vec<PullRequest>, EnumerationError> {
        let compiled = CompiledFilters::compile(filters)?;
        let mut pages = PullRequestPages::new(self.client);
        let mut aggregated: Vec<PullRequest> = Vec::new();

        loop {
            let pages_fetched = pages.pages_fetched();
            let next = tokio::select! {
                biased;
                () = cancellation.cancelled() => {
                    return Err(EnumerationError::Cancelled { pages_fetched });
                }
                next = pages.next_page() => next,
            };

            let Some(page) = next else {
                break;
            };
            aggregated.extend(page?.values.into_iter().map(PullRequest::from));
        }

        let duplicates = duplicate_numbers(&aggregated);
        if !duplicates.is_empty() {
            tracing::warn!(
                ?duplicates,
                "pull request numbers repeated across pages; keeping every occurrence"
            );
        }

        let total = aggregated.len();
        let retained = compiled.retain(aggregated);
        tracing::info!(
            pages = pages.pages_fetched(),
            pull_requests = total,
            retained = retained.len(),
            filters = compiled.len(),
            "listed open pull requests"
        );
        self.telemetry.record(TelemetryEvent::PullRequestsListed {
            pages: pages.pages_fetched(),
            pull_requests: total,
            retained: retained.len(),
            duplicate_numbers: duplicates,
        });

        Ok(retained)
    }
}

/// Pull request numbers occurring more than once, in order of first repeat.
///
/// Cursor pagination over a live repository can return the same pull request
/// on two pages when the listing shifts between requests. Enumeration keeps
/// such repeats; callers that need unique numbers can detect them here.
#[must_use]
pub fn duplicate_numbers(pull_requests: &[PullRequest]) -> Vec<u64> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    pull_requests
        .iter()
        .map(|pull_request| pull_request.number)
        .filter(|number| !seen.insert(*number) && reported.insert(*number))
        .collect()
}
