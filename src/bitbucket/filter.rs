//! Caller-supplied predicates narrowing an enumeration result.
//!
//! Filters arrive as [`PullRequestFilter`] values and are compiled once per
//! enumeration call into [`CompiledFilters`]. A pull request is retained only
//! when every compiled filter matches it.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::EnumerationError;
use super::models::PullRequest;

/// One predicate supplied for an enumeration call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PullRequestFilter {
    /// Regular expression searched for anywhere in the source branch name.
    BranchMatch(String),
}

impl PullRequestFilter {
    /// Convenience constructor for [`PullRequestFilter::BranchMatch`].
    #[must_use]
    pub fn branch_match(pattern: impl Into<String>) -> Self {
        Self::BranchMatch(pattern.into())
    }
}

#[derive(Debug, Clone)]
enum CompiledFilter {
    BranchMatch(Regex),
}

impl CompiledFilter {
    fn compile(filter: &PullRequestFilter) -> Result<Self, EnumerationError> {
        match filter {
            PullRequestFilter::BranchMatch(pattern) => Regex::new(pattern)
                .map(Self::BranchMatch)
                .map_err(|error| EnumerationError::Filter {
                    pattern: pattern.clone(),
                    message: error.to_string(),
                }),
        }
    }

    fn matches(&self, pull_request: &PullRequest) -> bool {
        match self {
            Self::BranchMatch(regex) => regex.is_match(&pull_request.branch),
        }
    }
}

/// Filters compiled for a single enumeration call.
#[derive(Debug, Clone, Default)]
pub struct CompiledFilters {
    filters: Vec<CompiledFilter>,
}

impl CompiledFilters {
    /// Compiles every filter, failing on the first invalid pattern.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError::Filter`] naming the offending pattern.
    pub fn compile(filters: &[PullRequestFilter]) -> Result<Self, EnumerationError> {
        let compiled = filters
            .iter()
            .map(CompiledFilter::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { filters: compiled })
    }

    /// Number of compiled predicates.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns true when no predicates were supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns true when every predicate accepts `pull_request`.
    #[must_use]
    pub fn matches(&self, pull_request: &PullRequest) -> bool {
        self.filters
            .iter()
            .all(|filter| filter.matches(pull_request))
    }

    /// Keeps matching pull requests, preserving their order.
    #[must_use]
    pub fn retain(&self, mut pull_requests: Vec<PullRequest>) -> Vec<PullRequest> {
        pull_requests.retain(|pull_request| self.matches(pull_request));
        pull_requests
    }
}
