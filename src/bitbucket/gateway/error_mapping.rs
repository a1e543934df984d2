//! Error mapping helpers for the Bitbucket gateway implementation.

use http::StatusCode;

use crate::bitbucket::error::EnumerationError;

/// Checks if a Bitbucket status indicates rejected credentials.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Maps a failure to send a request or read its body.
pub(super) fn map_request_error(endpoint: &str, error: &reqwest::Error) -> EnumerationError {
    let message = if error.is_timeout() {
        format!("request timed out: {error}")
    } else if error.is_connect() {
        format!("could not connect: {error}")
    } else {
        error.to_string()
    };

    EnumerationError::Transport {
        endpoint: endpoint.to_owned(),
        status: error.status().map(|status| status.as_u16()),
        message,
    }
}

/// Maps a non-success response into a transport error.
pub(super) fn map_http_error(
    endpoint: &str,
    status: StatusCode,
    maybe_message: Option<String>,
) -> EnumerationError {
    let detail = maybe_message.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_owned()
    });
    let message = if is_auth_failure(status) {
        format!("Bitbucket rejected the credentials: {detail}")
    } else {
        detail
    };

    EnumerationError::Transport {
        endpoint: endpoint.to_owned(),
        status: Some(status.as_u16()),
        message,
    }
}
