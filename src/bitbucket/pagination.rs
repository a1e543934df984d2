//! Cursor-driven walk over a paginated listing.
//!
//! Bitbucket Server pages with an offset cursor: each response states whether
//! it is the last page and, if not, the `nextPageStart` offset to request
//! next. [`PullRequestPages`] turns that protocol into a finite, lazy sequence
//! of decoded pages. Nothing is fetched until [`PullRequestPages::next_page`]
//! is awaited, and each call fetches exactly one page, so callers can stop or
//! cancel between pages.

use super::error::EnumerationError;
use super::gateway::PageGateway;
use super::models::{ApiPullRequest, Page, decode_page};

/// Page size requested on every listing call.
pub const PAGE_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    First,
    At(u64),
    Exhausted,
}

/// Lazy, non-restartable sequence of listing pages.
///
/// The sequence ends after a page reports `isLastPage`, after a page omits
/// its continuation cursor, or after the first error. A fresh walk requires a
/// new instance, which re-issues every request from the beginning.
pub struct PullRequestPages<'gateway, Gateway>
where
    Gateway: PageGateway + ?Sized,
{
    gateway: &'gateway Gateway,
    cursor: Cursor,
    pages_fetched: usize,
}

impl<'gateway, Gateway> PullRequestPages<'gateway, Gateway>
where
    Gateway: PageGateway + ?Sized,
{
    /// Starts a walk at the first page.
    #[must_use]
    pub const fn new(gateway: &'gateway Gateway) -> Self {
        Self {
            gateway,
            cursor: Cursor::First,
            pages_fetched: 0,
        }
    }

    /// Number of pages fetched and decoded successfully so far.
    #[must_use]
    pub const fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Returns true once no further page will be requested.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self.cursor, Cursor::Exhausted)
    }

    /// Fetches and decodes the next page.
    ///
    /// Returns `None` once the sequence is exhausted. After an error the
    /// sequence is exhausted as well.
    pub async fn next_page(&mut self) -> Option<Result<Page<ApiPullRequest>, EnumerationError>> {
        let start = match self.cursor {
            Cursor::Exhausted => return None,
            Cursor::First => None,
            Cursor::At(offset) => Some(offset),
        };

        let outcome = self.fetch_and_advance(start).await;
        if outcome.is_err() {
            self.cursor = Cursor::Exhausted;
        }
        Some(outcome)
    }

    async fn fetch_and_advance(
        &mut self,
        start: Option<u64>,
    ) -> Result<Page<ApiPullRequest>, EnumerationError> {
        let raw = self.gateway.fetch_page(start).await?;
        let page = decode_page(&raw.body).map_err(|error| EnumerationError::Decode {
            endpoint: raw.endpoint.clone(),
            message: error.to_string(),
        })?;

        self.cursor = next_cursor(start, &page, &raw.endpoint)?;
        self.pages_fetched += 1;

        tracing::debug!(
            endpoint = %raw.endpoint,
            records = page.values.len(),
            is_last_page = page.is_last_page,
            next_page_start = ?page.next_page_start,
            "decoded pull request page"
        );

        Ok(page)
    }
}

fn next_cursor(
    start: Option<u64>,
    page: &Page<ApiPullRequest>,
    endpoint: &str,
) -> Result<Cursor, EnumerationError> {
    if page.is_last_page {
        return Ok(Cursor::Exhausted);
    }

    let Some(next) = page.next_page_start else {
        return Ok(Cursor::Exhausted);
    };

    let current = start.unwrap_or(0);
    if next <= current {
        return Err(EnumerationError::Decode {
            endpoint: endpoint.to_owned(),
            message: format!("nextPageStart {next} does not advance beyond start {current}"),
        });
    }

    Ok(Cursor::At(next))
}
