//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.pullgen.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `PULLGEN_BASE_URL`, `PULLGEN_TOKEN`, and
//!    so on, or the shared `BITBUCKET_TOKEN`
//! 4. **Command-line arguments** – `--base-url`/`-b`, `--project`/`-p`, ...
//!
//! # Configuration File
//!
//! ```toml
//! base_url = "https://bitbucket.example.com"
//! project = "PROJ"
//! repo = "service"
//! token = "example-token"
//! branch_match = "^feature-"
//! request_timeout_seconds = 30
//! output = "json"
//! ```

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::bitbucket::auth::{AuthStrategy, BasicCredentials, BearerToken};
use crate::bitbucket::error::EnumerationError;
use crate::bitbucket::filter::PullRequestFilter;
use crate::bitbucket::locator::RepositoryLocator;
use crate::bitbucket::service_config::ServiceConfig;

/// Environment variable consulted when no token is configured.
pub const SHARED_TOKEN_ENV: &str = "BITBUCKET_TOKEN";

const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// How the CLI renders the listing on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned, human-readable columns.
    #[default]
    Table,
    /// One JSON object per pull request, per line.
    Json,
}

impl FromStr for OutputFormat {
    type Err = EnumerationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(EnumerationError::Configuration {
                message: format!("unknown output format `{other}` (expected `table` or `json`)"),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Table => "table",
            Self::Json => "json",
        })
    }
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `PULLGEN_BASE_URL` or `--base-url`: Bitbucket Server root URL
/// - `PULLGEN_PROJECT` or `--project`: Project key
/// - `PULLGEN_REPO` or `--repo`: Repository slug
/// - `PULLGEN_USERNAME` / `PULLGEN_PASSWORD`: Basic authentication
/// - `PULLGEN_TOKEN`, `BITBUCKET_TOKEN`, or `--token`: Bearer token
/// - `PULLGEN_BRANCH_MATCH` or `--branch-match`: Source branch pattern
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use pullgen::PullgenConfig;
///
/// let config = PullgenConfig::load().expect("failed to load configuration");
/// let service_config = config.service_config().expect("repository required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "PULLGEN",
    discovery(
        dotfile_name = ".pullgen.toml",
        config_file_name = "pullgen.toml",
        app_name = "pullgen"
    )
)]
pub struct PullgenConfig {
    /// Root URL of the Bitbucket Server instance, including any context path.
    #[ortho_config(cli_short = 'b')]
    pub base_url: Option<String>,

    /// Project key owning the repository (e.g., "PROJ").
    #[ortho_config(cli_short = 'p')]
    pub project: Option<String>,

    /// Repository slug (e.g., "service").
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Username for HTTP basic authentication.
    #[ortho_config(cli_short = 'u')]
    pub username: Option<String>,

    /// Password or HTTP access token paired with `username`.
    #[ortho_config()]
    pub password: Option<String>,

    /// Bearer token; `BITBUCKET_TOKEN` is read when unset.
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Regular expression that source branch names must contain a match of.
    #[ortho_config(cli_short = 'm')]
    pub branch_match: Option<String>,

    /// Per-request timeout in seconds; `0` disables the timeout.
    ///
    /// Defaults to 30 seconds.
    #[ortho_config()]
    pub request_timeout_seconds: u64,

    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[ortho_config()]
    pub log_filter: Option<String>,

    /// Output format: `table` (default) or `json`.
    #[ortho_config(cli_short = 'o')]
    pub output: Option<String>,
}

impl Default for PullgenConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            project: None,
            repo: None,
            username: None,
            password: None,
            token: None,
            branch_match: None,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            log_filter: None,
            output: None,
        }
    }
}

impl PullgenConfig {
    /// Resolves the bearer token from configuration or `BITBUCKET_TOKEN`.
    #[must_use]
    pub fn resolve_token(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| env::var(SHARED_TOKEN_ENV).ok())
    }

    /// Returns base URL, project and repository if all are configured.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError::Configuration`] naming the first missing
    /// value.
    pub fn require_repository(&self) -> Result<(&str, &str, &str), EnumerationError> {
        fn required<'value>(
            value: Option<&'value str>,
            what: &str,
            flag: &str,
        ) -> Result<&'value str, EnumerationError> {
            value.ok_or_else(|| EnumerationError::Configuration {
                message: format!("{what} is required (use {flag})"),
            })
        }

        Ok((
            required(
                self.base_url.as_deref(),
                "Bitbucket base URL",
                "--base-url or -b",
            )?,
            required(self.project.as_deref(), "project key", "--project or -p")?,
            required(self.repo.as_deref(), "repository slug", "--repo or -r")?,
        ))
    }

    /// Selects the credential mode from the configured secrets.
    ///
    /// A token selects bearer authentication, a username with a password
    /// selects basic authentication, and no credentials select anonymous
    /// access.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError::Configuration`] when a token is combined
    /// with a username, when only one half of a basic credential is set, or
    /// when a credential is blank.
    pub fn auth_strategy(&self) -> Result<AuthStrategy, EnumerationError> {
        let token = self.resolve_token();
        match (token, self.username.as_deref(), self.password.as_deref()) {
            (Some(_), Some(_), _) => Err(EnumerationError::Configuration {
                message: "configure either a token or a username and password, not both"
                    .to_owned(),
            }),
            (Some(token), None, _) => Ok(AuthStrategy::Bearer(BearerToken::new(token)?)),
            (None, Some(username), Some(password)) => Ok(AuthStrategy::Basic(
                BasicCredentials::new(username, password)?,
            )),
            (None, Some(_), None) => Err(EnumerationError::Configuration {
                message: "a password is required with a username (use --password)".to_owned(),
            }),
            (None, None, Some(_)) => Err(EnumerationError::Configuration {
                message: "a username is required with a password (use --username or -u)"
                    .to_owned(),
            }),
            (None, None, None) => Ok(AuthStrategy::Anonymous),
        }
    }

    /// Filters selected by the configuration, in evaluation order.
    #[must_use]
    pub fn filters(&self) -> Vec<PullRequestFilter> {
        self.branch_match
            .iter()
            .map(PullRequestFilter::branch_match)
            .collect()
    }

    /// Per-request timeout, or `None` when disabled.
    #[must_use]
    pub const fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_seconds {
            0 => None,
            seconds => Some(Duration::from_secs(seconds)),
        }
    }

    /// Output format requested for the CLI.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError::Configuration`] for unknown formats.
    pub fn output_format(&self) -> Result<OutputFormat, EnumerationError> {
        self.output
            .as_deref()
            .map_or(Ok(OutputFormat::default()), str::parse)
    }

    /// Builds the immutable settings for one Bitbucket service handle.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError::Configuration`] when the repository is
    /// incomplete or malformed, or the credentials are inconsistent.
    pub fn service_config(&self) -> Result<ServiceConfig, EnumerationError> {
        let (base_url, project, repository) = self.require_repository()?;
        let locator = RepositoryLocator::new(base_url, project, repository)?;
        let config = ServiceConfig::new(locator, self.auth_strategy()?);

        Ok(match self.request_timeout() {
            Some(timeout) => config.with_request_timeout(timeout),
            None => config,
        })
    }
}

#[cfg(test)]
mod tests;
