//! Local working copies of fleet repositories.

mod cli;
mod error;

pub use cli::GitCli;
pub use error::GitError;

use async_trait::async_trait;
use std::path::Path;

/// A single file to commit and push on the working copy's current branch.
#[derive(Debug, Clone, Copy)]
pub struct FileCommit<'a> {
    /// Root of the working copy.
    pub repo_path: &'a Path,
    /// File to write, inside `repo_path`.
    pub file_path: &'a Path,
    /// File content.
    pub content: &'a str,
    /// Commit message.
    pub message: &'a str,
}

/// Operations on a repository's local working copy.
#[async_trait]
pub trait WorkingCopy: Send + Sync {
    /// Clones or refreshes the working copy at `path` on branch `version`.
    ///
    /// Returns a human-readable description of what happened.
    async fn pull(&self, url: &str, path: &Path, version: &str) -> Result<String, GitError>;

    /// Writes, commits and pushes exactly one file.
    ///
    /// With `dry_run` set nothing is written or pushed; the returned message
    /// describes what would have happened.
    async fn commit_and_push_file(
        &self,
        commit: &FileCommit<'_>,
        dry_run: bool,
    ) -> Result<String, GitError>;
}
