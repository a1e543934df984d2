//! Gateways for fetching pull request listing pages over HTTP.
//!
//! The [`PageGateway`] trait is the seam between the cursor walker and the
//! network: tests drive the walker with mock gateways while
//! [`BitbucketServerGateway`] issues real requests with `reqwest`.

mod client;
mod error_mapping;
mod http_utils;
mod server;

pub use server::BitbucketServerGateway;

use async_trait::async_trait;

use crate::bitbucket::error::EnumerationError;

/// Undecoded body of one listing page together with the URL it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBody {
    /// Fully qualified URL that produced the body.
    pub endpoint: String,
    /// Raw response body.
    pub body: String,
}

/// Gateway that can fetch one page of the open pull request listing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageGateway: Send + Sync {
    /// Fetch the page beginning at `start`, or the first page when `None`.
    async fn fetch_page(&self, start: Option<u64>) -> Result<PageBody, EnumerationError>;
}
