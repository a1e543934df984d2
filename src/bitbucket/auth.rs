//! Credential strategies applied to every outgoing Bitbucket request.
//!
//! The three supported modes form a closed set: anonymous access, HTTP basic
//! authentication and bearer tokens (Bitbucket personal access tokens). Both
//! credentialed modes also send `X-Atlassian-Token: no-check`, without which
//! Bitbucket Server rejects scripted clients with an XSRF check failure.

use std::fmt;

use reqwest::RequestBuilder;

use super::error::EnumerationError;

/// Header disabling Bitbucket's XSRF token check.
pub const ATLASSIAN_TOKEN_HEADER: &str = "X-Atlassian-Token";

/// Value sent with [`ATLASSIAN_TOKEN_HEADER`].
pub const ATLASSIAN_TOKEN_NO_CHECK: &str = "no-check";

/// Username and password pair for HTTP basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    username: String,
    password: String,
}

impl BasicCredentials {
    /// Validates that the username is present.
    ///
    /// Both values are sent exactly as given. The password may be empty;
    /// Bitbucket decides whether that is acceptable.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError::Configuration`] when the username is blank.
    pub fn new(
        username: impl AsRef<str>,
        password: impl Into<String>,
    ) -> Result<Self, EnumerationError> {
        let name = username.as_ref();
        if name.trim().is_empty() {
            return Err(EnumerationError::Configuration {
                message: "basic authentication requires a username".to_owned(),
            });
        }
        Ok(Self {
            username: name.to_owned(),
            password: password.into(),
        })
    }

    /// Borrow the username.
    #[must_use]
    pub const fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Borrow the password.
    #[must_use]
    pub const fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Bearer token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Validates that the token is not blank; the value is kept as given.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError::Configuration`] when the supplied string is
    /// blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, EnumerationError> {
        let value = token.as_ref();
        if value.trim().is_empty() {
            return Err(EnumerationError::Configuration {
                message: "bearer token must not be empty".to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for BearerToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// How outgoing requests are credentialed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthStrategy {
    /// No credential headers are attached.
    #[default]
    Anonymous,
    /// `Authorization: Basic <base64(username:password)>`.
    Basic(BasicCredentials),
    /// `Authorization: Bearer <token>`.
    Bearer(BearerToken),
}

impl AuthStrategy {
    /// Attaches the credential headers for this mode to `request`.
    #[must_use]
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Anonymous => request,
            Self::Basic(credentials) => request
                .basic_auth(credentials.username(), Some(credentials.password()))
                .header(ATLASSIAN_TOKEN_HEADER, ATLASSIAN_TOKEN_NO_CHECK),
            Self::Bearer(token) => request
                .bearer_auth(token.value())
                .header(ATLASSIAN_TOKEN_HEADER, ATLASSIAN_TOKEN_NO_CHECK),
        }
    }

    /// Short label used in logs; never includes secrets.
    #[must_use]
    pub const fn mode(&self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Basic(_) => "basic",
            Self::Bearer(_) => "bearer",
        }
    }
}

#[cfg(test)]
mod tests {
    use http::header::AUTHORIZATION;
    use rstest::rstest;

    use super::{
        ATLASSIAN_TOKEN_HEADER, AuthStrategy, BasicCredentials, BearerToken, EnumerationError,
    };

    fn built_headers(strategy: &AuthStrategy) -> http::HeaderMap {
        let client = reqwest::Client::new();
        let request = strategy
            .apply(client.get("http://bitbucket.invalid/rest"))
            .build()
            .expect("request should build");
        request.headers().clone()
    }

    #[rstest]
    fn anonymous_strategy_adds_no_headers() {
        let headers = built_headers(&AuthStrategy::Anonymous);

        assert!(headers.get(AUTHORIZATION).is_none(), "unexpected auth header");
        assert!(
            headers.get(ATLASSIAN_TOKEN_HEADER).is_none(),
            "unexpected XSRF header"
        );
    }

    #[rstest]
    fn basic_strategy_encodes_username_and_password() {
        let credentials = BasicCredentials::new("user", "password").expect("credentials");
        let headers = built_headers(&AuthStrategy::Basic(credentials));

        assert_eq!(
            headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok()),
            Some("Basic dXNlcjpwYXNzd29yZA==")
        );
        assert_eq!(
            headers
                .get(ATLASSIAN_TOKEN_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some("no-check")
        );
    }

    #[rstest]
    fn bearer_strategy_sends_token() {
        let token = BearerToken::new("tolkien").expect("token");
        let headers = built_headers(&AuthStrategy::Bearer(token));

        assert_eq!(
            headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok()),
            Some("Bearer tolkien")
        );
        assert_eq!(
            headers
                .get(ATLASSIAN_TOKEN_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some("no-check")
        );
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("   ")]
    fn blank_tokens_are_rejected(#[case] raw: &str) {
        let result = BearerToken::new(raw);

        assert!(
            matches!(result, Err(EnumerationError::Configuration { .. })),
            "expected configuration error, got {result:?}"
        );
    }

    #[rstest]
    fn blank_usernames_are_rejected() {
        let result = BasicCredentials::new(" ", "secret");

        assert!(
            matches!(result, Err(EnumerationError::Configuration { .. })),
            "expected configuration error, got {result:?}"
        );
    }

    #[rstest]
    fn surrounding_whitespace_is_preserved() {
        let credentials = BasicCredentials::new(" user ", " pass ").expect("credentials");
        let token = BearerToken::new(" tolkien ").expect("token");

        assert_eq!(credentials.username(), " user ");
        assert_eq!(credentials.password(), " pass ");
        assert_eq!(token.value(), " tolkien ");
    }

    #[rstest]
    fn debug_output_redacts_secrets() {
        let credentials = BasicCredentials::new("user", "hunter2").expect("credentials");
        let token = BearerToken::new("s3cr3t").expect("token");

        let rendered = format!("{credentials:?} {token:?}");

        assert!(!rendered.contains("hunter2"), "password leaked: {rendered}");
        assert!(!rendered.contains("s3cr3t"), "token leaked: {rendered}");
        assert!(rendered.contains("user"), "username missing: {rendered}");
    }
}
