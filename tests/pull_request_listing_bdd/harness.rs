//! Provider payload helpers for the pull request listing BDD tests.

use pullgen::bitbucket::models::test_support::{continued_page, last_page, pull_request_record};
use serde_json::Value;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, ResponseTemplate};

pub(crate) const PROJECT: &str = "PROJECT";
pub(crate) const REPOSITORY: &str = "REPO";
pub(crate) const PULLS_PATH: &str = "/rest/api/1.0/projects/PROJECT/repos/REPO/pull-requests";

/// Parses `"101, 102, 200"` into pull request numbers.
pub(crate) fn parse_numbers(list: &str) -> Vec<u64> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse()
                .unwrap_or_else(|error| panic!("`{item}` is not a pull request number: {error}"))
        })
        .collect()
}

/// Provider records for `numbers`, each on branch `feature-<number>` into `master`.
pub(crate) fn feature_records(numbers: &[u64]) -> Vec<Value> {
    numbers
        .iter()
        .map(|number| pull_request_record(*number, &format!("feature-{number}"), "master"))
        .collect()
}

/// Mock answering the listing request at `start` with `body`.
///
/// The first page (`start == 0`) is requested without a `start` parameter.
pub(crate) fn page_mock(start: u64, body: &Value) -> Mock {
    let listing = Mock::given(method("GET"))
        .and(path(PULLS_PATH))
        .and(query_param("limit", "100"));
    let positioned = if start == 0 {
        listing.and(query_param_is_missing("start"))
    } else {
        listing.and(query_param("start", start.to_string()))
    };
    positioned.respond_with(ResponseTemplate::new(200).set_body_json(body))
}

/// Continued page envelope for `numbers`.
pub(crate) fn continued(numbers: &[u64], start: u64, next: u64) -> Value {
    continued_page(feature_records(numbers), start, next)
}

/// Final page envelope for `numbers`.
pub(crate) fn last(numbers: &[u64]) -> Value {
    last_page(feature_records(numbers))
}
