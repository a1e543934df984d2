//! `reqwest`-backed gateway for Bitbucket Server / Data Center.

use async_trait::async_trait;
use http::header::ACCEPT;
use reqwest::Client;

use crate::bitbucket::auth::AuthStrategy;
use crate::bitbucket::error::EnumerationError;
use crate::bitbucket::locator::RepositoryLocator;
use crate::bitbucket::pagination::PAGE_LIMIT;
use crate::bitbucket::service_config::ServiceConfig;

use super::client::build_http_client;
use super::error_mapping::{map_http_error, map_request_error};
use super::http_utils::extract_bitbucket_message;
use super::{PageBody, PageGateway};

/// Gateway issuing listing requests against one Bitbucket repository.
#[derive(Debug, Clone)]
pub struct BitbucketServerGateway {
    client: Client,
    locator: RepositoryLocator,
    auth: AuthStrategy,
}

impl BitbucketServerGateway {
    /// Builds a gateway from validated service settings.
    ///
    /// No request is made; reachability is only discovered on first use.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError::Configuration`] when the HTTP client cannot
    /// be initialised.
    pub fn new(config: &ServiceConfig) -> Result<Self, EnumerationError> {
        let client = build_http_client(config.request_timeout())?;
        Ok(Self {
            client,
            locator: config.locator().clone(),
            auth: config.auth().clone(),
        })
    }

    /// Gateway for anonymous access.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError::Configuration`] when the base URL is
    /// malformed or an identifier is blank.
    pub fn no_auth(
        base_url: &str,
        project: &str,
        repository: &str,
    ) -> Result<Self, EnumerationError> {
        Self::new(&ServiceConfig::no_auth(base_url, project, repository)?)
    }

    /// Gateway using HTTP basic authentication.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError::Configuration`] when the base URL is
    /// malformed, an identifier is blank, or the username is blank.
    pub fn basic_auth(
        username: &str,
        password: &str,
        base_url: &str,
        project: &str,
        repository: &str,
    ) -> Result<Self, EnumerationError> {
        Self::new(&ServiceConfig::basic_auth(
            username, password, base_url, project, repository,
        )?)
    }

    /// Gateway using a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError::Configuration`] when the base URL is
    /// malformed, an identifier is blank, or the token is blank.
    pub fn bearer_token(
        token: &str,
        base_url: &str,
        project: &str,
        repository: &str,
    ) -> Result<Self, EnumerationError> {
        Self::new(&ServiceConfig::bearer_token(
            token, base_url, project, repository,
        )?)
    }

    /// Repository this gateway lists.
    #[must_use]
    pub const fn locator(&self) -> &RepositoryLocator {
        &self.locator
    }
}

#[async_trait]
impl PageGateway for BitbucketServerGateway {
    async fn fetch_page(&self, start: Option<u64>) -> Result<PageBody, EnumerationError> {
        let url = self.locator.pull_requests_url(PAGE_LIMIT, start);
        let endpoint = url.to_string();
        tracing::debug!(
            endpoint = %endpoint,
            auth = self.auth.mode(),
            "requesting pull request page"
        );

        let request = self
            .auth
            .apply(self.client.get(url).header(ACCEPT, "application/json"));
        let response = request
            .send()
            .await
            .map_err(|error| map_request_error(&endpoint, &error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_http_error(
                &endpoint,
                status,
                extract_bitbucket_message(&body),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|error| map_request_error(&endpoint, &error))?;
        let body = decode_utf8(&endpoint, bytes.to_vec())?;

        Ok(PageBody { endpoint, body })
    }
}

/// Rejects page bodies that are not valid UTF-8 instead of replacing bytes.
fn decode_utf8(endpoint: &str, bytes: Vec<u8>) -> Result<String, EnumerationError> {
    String::from_utf8(bytes).map_err(|error| EnumerationError::Decode {
        endpoint: endpoint.to_owned(),
        message: format!("response body is not valid UTF-8: {error}"),
    })
}
