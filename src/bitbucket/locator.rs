//! Base URL parsing and identity wrappers for a Bitbucket Server repository.

use url::Url;

use super::error::EnumerationError;

/// Bitbucket project key wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectKey(String);

impl ProjectKey {
    /// Validates that the project key is present.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError::Configuration`] when the key is blank.
    pub fn new(value: &str) -> Result<Self, EnumerationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(EnumerationError::Configuration {
                message: "project key is required".to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the project key.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository slug wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySlug(String);

impl RepositorySlug {
    /// Validates that the repository slug is present.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError::Configuration`] when the slug is blank.
    pub fn new(value: &str) -> Result<Self, EnumerationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(EnumerationError::Configuration {
                message: "repository slug is required".to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the repository slug.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Parsed Bitbucket Server base URL with project and repository identity.
///
/// Construction only checks that the URL parses and can carry a path; the
/// endpoint is never probed.
///
/// # Example
///
/// ```
/// use pullgen::bitbucket::locator::RepositoryLocator;
///
/// let locator = RepositoryLocator::new("https://bb.example.com/", "PROJ", "repo")
///     .expect("should parse base URL");
/// assert_eq!(locator.project().as_str(), "PROJ");
/// assert_eq!(
///     locator.pull_requests_url(100, None).as_str(),
///     "https://bb.example.com/rest/api/1.0/projects/PROJ/repos/repo/pull-requests?limit=100"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    base_url: Url,
    project: ProjectKey,
    repository: RepositorySlug,
}

impl RepositoryLocator {
    /// Parses the base URL and validates the identifiers.
    ///
    /// Any path already present on the base URL (for example a context path
    /// such as `/bitbucket`) is preserved in front of the REST path.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError::Configuration`] when the base URL does not
    /// parse, is not an `http`/`https` URL with a host, or when the project
    /// key or repository slug is blank.
    pub fn new(base_url: &str, project: &str, repository: &str) -> Result<Self, EnumerationError> {
        let parsed = Url::parse(base_url.trim()).map_err(|error| EnumerationError::Configuration {
            message: format!("base URL `{base_url}` is invalid: {error}"),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(EnumerationError::Configuration {
                message: format!("base URL `{base_url}` must use http or https"),
            });
        }

        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(EnumerationError::Configuration {
                message: format!("base URL `{base_url}` must include a host"),
            });
        }

        Ok(Self {
            base_url: parsed,
            project: ProjectKey::new(project)?,
            repository: RepositorySlug::new(repository)?,
        })
    }

    /// Base URL as supplied.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Project key.
    #[must_use]
    pub const fn project(&self) -> &ProjectKey {
        &self.project
    }

    /// Repository slug.
    #[must_use]
    pub const fn repository(&self) -> &RepositorySlug {
        &self.repository
    }

    /// Builds the pull request listing URL for one page.
    ///
    /// `limit` is always sent; `start` only when continuing from a cursor.
    #[must_use]
    pub fn pull_requests_url(&self, limit: u32, start: Option<u64>) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);

        // http(s) URLs with a host always accept path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                "rest",
                "api",
                "1.0",
                "projects",
                self.project.as_str(),
                "repos",
                self.repository.as_str(),
                "pull-requests",
            ]);
        }

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("limit", &limit.to_string());
            if let Some(cursor) = start {
                query.append_pair("start", &cursor.to_string());
            }
        }

        url
    }
}
