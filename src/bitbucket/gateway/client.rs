//! HTTP client construction helpers for gateway implementations.

use std::time::Duration;

use reqwest::Client;

use crate::bitbucket::error::EnumerationError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builds the `reqwest` client shared by every page request of a gateway.
///
/// # Errors
///
/// Returns [`EnumerationError::Configuration`] when the TLS backend or client
/// settings cannot be initialised.
pub(super) fn build_http_client(timeout: Option<Duration>) -> Result<Client, EnumerationError> {
    let builder = Client::builder().user_agent(USER_AGENT);
    let configured = match timeout {
        Some(limit) => builder.timeout(limit),
        None => builder,
    };

    configured
        .build()
        .map_err(|error| EnumerationError::Configuration {
            message: format!("failed to configure HTTP client: {error}"),
        })
}
