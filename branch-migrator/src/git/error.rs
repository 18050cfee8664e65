//! Git error types.

use thiserror::Error;

/// Errors that can occur while operating on a local working copy.
#[derive(Debug, Error)]
pub enum GitError {
    /// The git executable could not be started.
    #[error("Failed to execute git {command}: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A git command exited unsuccessfully.
    #[error("git {command} failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    /// Failed to write inside the working copy.
    #[error("Failed to write '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
