//! Immutable settings backing one Bitbucket service handle.

use std::time::Duration;

use super::auth::{AuthStrategy, BasicCredentials, BearerToken};
use super::error::EnumerationError;
use super::locator::RepositoryLocator;

/// Repository identity, credential mode and transport settings.
///
/// Built once per generator evaluation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    locator: RepositoryLocator,
    auth: AuthStrategy,
    request_timeout: Option<Duration>,
}

impl ServiceConfig {
    /// Creates settings for an already validated repository locator.
    #[must_use]
    pub const fn new(locator: RepositoryLocator, auth: AuthStrategy) -> Self {
        Self {
            locator,
            auth,
            request_timeout: None,
        }
    }

    /// Settings for anonymous access.
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
        let locator = RepositoryLocator::new(base_url, project, repository)?;
        Ok(Self::new(locator, AuthStrategy::Anonymous))
    }

    /// Settings for HTTP basic authentication.
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
        let locator = RepositoryLocator::new(base_url, project, repository)?;
        let credentials = BasicCredentials::new(username, password)?;
        Ok(Self::new(locator, AuthStrategy::Basic(credentials)))
    }

    /// Settings for bearer token authentication.
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
        let locator = RepositoryLocator::new(base_url, project, repository)?;
        let bearer = BearerToken::new(token)?;
        Ok(Self::new(locator, AuthStrategy::Bearer(bearer)))
    }

    /// Applies a per-request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Repository being enumerated.
    #[must_use]
    pub const fn locator(&self) -> &RepositoryLocator {
        &self.locator
    }

    /// Credential mode applied to every request.
    #[must_use]
    pub const fn auth(&self) -> &AuthStrategy {
        &self.auth
    }

    /// Per-request timeout, if any.
    #[must_use]
    pub const fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}
