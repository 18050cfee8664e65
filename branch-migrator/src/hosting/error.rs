//! Hosting error types.

use thiserror::Error;

/// Errors that can occur during hosting operations.
#[derive(Debug, Error)]
pub enum HostingError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// The base branch could not be resolved to a commit.
    #[error("Branch '{branch}' does not point at a commit")]
    UnresolvedBranch { branch: String },

    /// The repository resource carried no default branch.
    #[error("No default branch reported for {repository}")]
    MissingDefaultBranch { repository: String },

    /// Failure reported by a non-GitHub backend.
    #[error("{message}")]
    Other { message: String },
}
