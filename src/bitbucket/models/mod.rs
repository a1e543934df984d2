//! Data models for Bitbucket Server pull request listings.
//!
//! Types prefixed with `Api` are deserialisation targets mirroring the
//! provider's JSON; they convert into the generator-facing [`PullRequest`].
//! Decoding is strict: required fields must be present and `values` must be a
//! JSON array.

use serde::{Deserialize, Serialize};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// One open pull request in the shape consumed by deployment generators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    /// Identifier, unique within the repository.
    pub number: u64,
    /// Source branch short name.
    pub branch: String,
    /// Destination branch short name.
    pub target_branch: String,
    /// Commit hash at the tip of the source branch.
    #[serde(rename = "headSHA")]
    pub head_sha: String,
    /// Labels attached to the pull request; always present, possibly empty.
    #[serde(default)]
    pub labels: Vec<String>,
}

/// One decoded page of a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Records on this page in provider order.
    pub values: Vec<T>,
    /// Whether the provider reported this as the final page.
    pub is_last_page: bool,
    /// Offset at which the next page begins, when one exists.
    pub next_page_start: Option<u64>,
}

/// Listing envelope returned by `/rest/api/1.0/.../pull-requests`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiPage {
    pub(crate) size: Option<u64>,
    pub(crate) limit: Option<u64>,
    pub(crate) start: Option<u64>,
    pub(crate) is_last_page: bool,
    pub(crate) values: Vec<ApiPullRequest>,
    pub(crate) next_page_start: Option<u64>,
}

/// Provider pull request record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPullRequest {
    /// Pull request identifier.
    pub id: u64,
    /// Destination reference.
    pub to_ref: ApiTargetRef,
    /// Source reference.
    pub from_ref: ApiSourceRef,
}

/// The "to" side of a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTargetRef {
    /// Fully qualified ref name, e.g. `refs/heads/master`.
    pub id: Option<String>,
    /// Short branch name, e.g. `master`.
    pub display_id: String,
    /// Commit at the tip of the target branch.
    pub latest_commit: String,
}

/// The "from" side of a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSourceRef {
    /// Fully qualified ref name, e.g. `refs/heads/feature-1`.
    pub id: String,
    /// Short branch name, e.g. `feature-1`.
    pub display_id: String,
    /// Commit at the tip of the source branch.
    pub latest_commit: String,
}

impl From<ApiPage> for Page<ApiPullRequest> {
    fn from(value: ApiPage) -> Self {
        Self {
            values: value.values,
            is_last_page: value.is_last_page,
            next_page_start: value.next_page_start,
        }
    }
}

impl From<ApiPullRequest> for PullRequest {
    fn from(value: ApiPullRequest) -> Self {
        Self {
            number: value.id,
            branch: value.from_ref.display_id,
            target_branch: value.to_ref.display_id,
            head_sha: value.from_ref.latest_commit,
            // The listing endpoint does not report labels.
            labels: Vec::new(),
        }
    }
}

/// Decodes one listing page body.
///
/// # Errors
///
/// Returns the parser error when the body is not a page envelope, when
/// `values` is not an array, or when a record lacks a required field.
pub fn decode_page(body: &str) -> Result<Page<ApiPullRequest>, serde_json::Error> {
    let page: ApiPage = serde_json::from_str(body)?;
    tracing::trace!(
        size = ?page.size,
        limit = ?page.limit,
        start = ?page.start,
        "decoded pull request page envelope"
    );
    Ok(page.into())
}
