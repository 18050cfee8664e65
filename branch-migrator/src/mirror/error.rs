//! Mirror workflow error types.

use thiserror::Error;

/// Errors that can occur while installing the mirror workflow.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// The existing workflow file could not be checked.
    #[error("Failed to inspect {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The workflow could not be rendered.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),

    /// The workflow could not be committed or pushed.
    #[error(transparent)]
    Git(#[from] crate::git::GitError),
}
