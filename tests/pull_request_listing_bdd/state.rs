//! Scenario state and listing runner for the pull request listing BDD tests.

use pullgen::{
    AuthStrategy, BitbucketServerGateway, EnumerationError, PullRequest, PullRequestFilter,
    PullRequestService, RepositoryLocator, ServiceConfig,
};
use pullgen::bitbucket::{BasicCredentials, BearerToken};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use wiremock::MockServer;

use super::harness::{PROJECT, REPOSITORY};
use super::runtime::{SharedRuntime, ensure_runtime_and_server};

#[derive(ScenarioState, Default)]
pub(crate) struct ListingState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) auth: Slot<AuthStrategy>,
    pub(crate) result: Slot<Vec<PullRequest>>,
    pub(crate) error: Slot<EnumerationError>,
}

impl ListingState {
    /// Runtime and server for this scenario, created on first use.
    pub(crate) fn runtime(&self) -> SharedRuntime {
        ensure_runtime_and_server(&self.runtime, &self.server)
            .unwrap_or_else(|error| panic!("failed to initialise scenario runtime: {error}"))
    }

    pub(crate) fn use_bearer_token(&self, value: &str) {
        let token = BearerToken::new(value)
            .unwrap_or_else(|error| panic!("scenario token rejected: {error}"));
        self.auth.set(AuthStrategy::Bearer(token));
    }

    pub(crate) fn use_basic_credentials(&self, username: &str, password: &str) {
        let credentials = BasicCredentials::new(username, password)
            .unwrap_or_else(|error| panic!("scenario credentials rejected: {error}"));
        self.auth.set(AuthStrategy::Basic(credentials));
    }

    /// Number of requests the mock server has seen.
    pub(crate) fn received_requests(&self) -> usize {
        let runtime = self.runtime();
        self.server
            .with_ref(|server| runtime.block_on(server.received_requests()))
            .flatten()
            .map_or(0, |requests| requests.len())
    }
}

/// Lists pull requests from the scenario server with the configured credentials.
pub(crate) fn run_listing(
    listing_state: &ListingState,
    filters: &[PullRequestFilter],
) -> Result<Vec<PullRequest>, EnumerationError> {
    let runtime = listing_state.runtime();
    let server_url = listing_state
        .server
        .with_ref(MockServer::uri)
        .ok_or_else(|| EnumerationError::Configuration {
            message: "mock server URL missing".to_owned(),
        })?;

    let locator = RepositoryLocator::new(&server_url, PROJECT, REPOSITORY)?;
    let auth = listing_state.auth.get().unwrap_or_default();

    runtime.block_on(async {
        let gateway = BitbucketServerGateway::new(&ServiceConfig::new(locator, auth))?;
        PullRequestService::new(&gateway)
            .list_pull_requests(filters)
            .await
    })
}
