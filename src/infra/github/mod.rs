//! GitHub REST API client module using reqwest.
//!
//! Provides GitHubClient for repository operations, plus parsers for the
//! pagination and rate-limit headers GitHub attaches to responses.

mod client;
pub(crate) mod error;
pub mod link;
#[cfg(test)]
mod mock;
pub mod rate_limit;
mod repo;
mod types;

pub use client::{DEFAULT_API_BASE_URL, GitHubClient, resolve_token};
pub use error::GitHubError;
#[cfg(test)]
pub use mock::{GitHubMockServer, TEST_PER_PAGE, mock_repository};
pub use repo::RepoApi;
pub use types::{NewRepository, Repository, RepositoryPatch};
