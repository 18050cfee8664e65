//! Mirror workflow installation.
//!
//! While a fleet moves to a new development branch, a GitHub Actions workflow
//! keeps the old branch alive by replaying every push on the new branch onto
//! it. Branch protection rules and downstream consumers pinned to the old
//! name continue to work during the transition.

mod error;

pub use error::MirrorError;

use crate::git::{FileCommit, WorkingCopy};
use crate::summary::StepOutcome;
use crate::templates::TemplateRenderer;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Location of the mirror workflow inside a working copy.
///
/// Format: `.github/workflows/mirror-{new_branch}-to-{old_branch}.yaml`
#[must_use]
pub fn workflow_path(repo_path: &Path, old_branch: &str, new_branch: &str) -> PathBuf {
    repo_path
        .join(".github")
        .join("workflows")
        .join(format!("mirror-{new_branch}-to-{old_branch}.yaml"))
}

/// Commit message used for the mirror workflow.
#[must_use]
pub fn commit_message(old_branch: &str, new_branch: &str) -> String {
    format!("Mirror {new_branch} to {old_branch}")
}

/// Ensures the mirror workflow exists in the repository.
///
/// An existing workflow file is left alone. Otherwise the workflow is
/// rendered and committed on its own; with `dry_run` the commit is only
/// simulated.
///
/// # Errors
///
/// Returns [`MirrorError`] if the workflow path cannot be inspected, or if
/// rendering or the commit and push fail.
pub async fn install_mirror_workflow(
    working_copy: &dyn WorkingCopy,
    renderer: &TemplateRenderer,
    repo_path: &Path,
    old_branch: &str,
    new_branch: &str,
    dry_run: bool,
) -> Result<StepOutcome, MirrorError> {
    let file_path = workflow_path(repo_path, old_branch, new_branch);

    let exists = tokio::fs::try_exists(&file_path)
        .await
        .map_err(|source| MirrorError::Io {
            path: file_path.display().to_string(),
            source,
        })?;
    if exists {
        debug!(path = %file_path.display(), "Mirror workflow already present");
        return Ok(StepOutcome::Succeeded {
            message: format!(
                "Doing nothing - Workflow file already exists: {}",
                file_path.display()
            ),
        });
    }

    let content = renderer.render_mirror_workflow(old_branch, new_branch)?;
    let message = commit_message(old_branch, new_branch);
    let commit = FileCommit {
        repo_path,
        file_path: &file_path,
        content: &content,
        message: &message,
    };
    let message = working_copy.commit_and_push_file(&commit, dry_run).await?;

    Ok(if dry_run {
        StepOutcome::Simulated { message }
    } else {
        StepOutcome::Succeeded { message }
    })
}
