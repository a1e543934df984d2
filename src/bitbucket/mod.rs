//! Bitbucket Server pull request enumeration.
//!
//! This module lists the open pull requests of one Bitbucket Server / Data
//! Center repository, walking the paginated REST listing, normalising each
//! record into a [`PullRequest`] and applying branch filters. Failures are
//! reported through [`EnumerationError`] so callers can distinguish
//! configuration mistakes from transport and decoding problems.

pub mod auth;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod pagination;
pub mod service;
pub mod service_config;

pub use auth::{AuthStrategy, BasicCredentials, BearerToken};
pub use error::EnumerationError;
pub use filter::{CompiledFilters, PullRequestFilter};
pub use gateway::{BitbucketServerGateway, PageBody, PageGateway};
pub use locator::{ProjectKey, RepositoryLocator, RepositorySlug};
pub use models::{Page, PullRequest};
pub use pagination::{PAGE_LIMIT, PullRequestPages};
pub use service::{PullRequestService, duplicate_numbers};
pub use service_config::ServiceConfig;

#[cfg(test)]
pub use gateway::MockPageGateway;
