//! Error types exposed by the Bitbucket enumeration layer.

use thiserror::Error;

/// Errors surfaced while configuring a service or enumerating pull requests.
///
/// Every variant aborts the enumeration call it was raised from; no partial
/// listing is ever returned alongside an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnumerationError {
    /// The service could not be constructed from the supplied settings.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the invalid or missing setting.
        message: String,
    },

    /// The provider answered with a non-success status, or the request never
    /// completed at the network level.
    #[error("request to {endpoint} failed{}: {message}", status_suffix(.status))]
    Transport {
        /// Endpoint that was being requested.
        endpoint: String,
        /// HTTP status when the provider responded at all.
        status: Option<u16>,
        /// Provider message or transport-level error detail.
        message: String,
    },

    /// A page body did not match the expected envelope.
    #[error("malformed page from {endpoint}: {message}")]
    Decode {
        /// Endpoint whose response failed to decode.
        endpoint: String,
        /// Parser detail describing the mismatch.
        message: String,
    },

    /// A branch-match pattern is not a valid regular expression.
    #[error("invalid branch match pattern `{pattern}`: {message}")]
    Filter {
        /// The pattern exactly as supplied.
        pattern: String,
        /// Compiler diagnostic.
        message: String,
    },

    /// The caller cancelled the enumeration before the walk completed.
    #[error("pull request enumeration cancelled after {pages_fetched} page(s)")]
    Cancelled {
        /// Number of pages that completed before cancellation.
        pages_fetched: usize,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl EnumerationError {
    /// Returns true when re-issuing the whole enumeration may succeed.
    ///
    /// Only transport failures qualify. Decode failures are provider
    /// contract violations and configuration or filter errors are
    /// deterministic.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

#[expect(
    clippy::ref_option,
    reason = "thiserror passes formatted fields by reference"
)]
fn status_suffix(status: &Option<u16>) -> String {
    status.map_or_else(String::new, |code| format!(" with status {code}"))
}
