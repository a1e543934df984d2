//! Test helpers for constructing Bitbucket listing payloads.
//!
//! These builders produce the JSON the provider would send, so tests can
//! describe pages in terms of pull request numbers and branch names instead of
//! hand-written documents.
//!
//! # Examples
//!
//! ```
//! use pullgen::bitbucket::models::test_support::{last_page, pull_request_record};
//!
//! let body = last_page(vec![pull_request_record(101, "feature-101", "master")]);
//! assert_eq!(body["isLastPage"], true);
//! assert_eq!(body["values"][0]["fromRef"]["displayId"], "feature-101");
//! ```

use serde_json::{Value, json};

use super::PullRequest;

/// Commit reported at the tip of every generated target branch.
pub const TARGET_COMMIT: &str = "5b766e3564a3453808f3cd3dd3f2e5fad8ef0e7a";

/// Deterministic source commit hash for a pull request number.
#[must_use]
pub fn head_commit_for(id: u64) -> String {
    format!("{id:0>8}e4d1517c83e720d2585b9402dbef71f9")
}

/// Builds one provider pull request record.
///
/// The source commit is derived from `id` with [`head_commit_for`].
#[must_use]
pub fn pull_request_record(id: u64, branch: &str, target_branch: &str) -> Value {
    json!({
        "id": id,
        "toRef": {
            "latestCommit": TARGET_COMMIT,
            "displayId": target_branch,
            "id": format!("refs/heads/{target_branch}")
        },
        "fromRef": {
            "id": format!("refs/heads/{branch}"),
            "displayId": branch,
            "latestCommit": head_commit_for(id)
        }
    })
}

/// Builds a page envelope that continues at `next_page_start`.
#[must_use]
pub fn continued_page(values: Vec<Value>, start: u64, next_page_start: u64) -> Value {
    json!({
        "size": values.len(),
        "limit": values.len(),
        "isLastPage": false,
        "values": values,
        "start": start,
        "nextPageStart": next_page_start
    })
}

/// Builds the final page envelope of a listing.
#[must_use]
pub fn last_page(values: Vec<Value>) -> Value {
    json!({
        "size": values.len(),
        "limit": 100,
        "isLastPage": true,
        "values": values,
        "start": 0
    })
}

/// The normalised pull request expected for [`pull_request_record`].
#[must_use]
pub fn expected_pull_request(id: u64, branch: &str, target_branch: &str) -> PullRequest {
    PullRequest {
        number: id,
        branch: branch.to_owned(),
        target_branch: target_branch.to_owned(),
        head_sha: head_commit_for(id),
        labels: Vec::new(),
    }
}
