//! Pullgen library crate providing Bitbucket Server pull request enumeration.
//!
//! The library lists the open pull requests of a Bitbucket Server repository
//! for deployment generators: it authenticates, follows the paginated REST
//! listing, normalises each record and filters by branch name. Configuration
//! loading and the `pullgen` command-line front end live alongside it.

pub mod bitbucket;
pub mod config;
pub mod telemetry;

pub use bitbucket::{
    AuthStrategy, BitbucketServerGateway, EnumerationError, PullRequest, PullRequestFilter,
    PullRequestService, RepositoryLocator, ServiceConfig, duplicate_numbers,
};
pub use config::{OutputFormat, PullgenConfig};
