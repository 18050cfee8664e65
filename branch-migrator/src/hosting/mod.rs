//! Hosting-provider operations consumed by the migration core.

mod error;
mod github;
pub mod rate_limit;

pub use error::HostingError;
pub use github::GitHubHosting;

use async_trait::async_trait;

/// Branch and pull request operations on a hosted repository.
///
/// Each call is an independent, fallible remote operation.
#[async_trait]
pub trait Hosting: Send + Sync {
    /// Returns the repository's current default branch.
    async fn default_branch(&self, owner: &str, name: &str) -> Result<String, HostingError>;

    /// Creates `new_branch` pointing at the head of `base`.
    async fn create_branch(
        &self,
        owner: &str,
        name: &str,
        base: &str,
        new_branch: &str,
    ) -> Result<(), HostingError>;

    /// Makes `branch` the repository's default branch.
    async fn set_default_branch(
        &self,
        owner: &str,
        name: &str,
        branch: &str,
    ) -> Result<(), HostingError>;

    /// Changes the base of every open pull request from `from` to `to`.
    ///
    /// Returns the number of pull requests retargeted.
    async fn retarget_pull_requests(
        &self,
        owner: &str,
        name: &str,
        from: &str,
        to: &str,
    ) -> Result<usize, HostingError>;
}
