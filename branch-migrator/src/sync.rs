//! Keeps the distribution manifest in step with migrated repositories.

use crate::manifest::{Distribution, RepoEntry};
use crate::report::Reporter;
use tracing::debug;

/// Result of updating one repository in the distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The tracked version was set.
    Updated,
    /// The repository is not part of the distribution (or has nothing to track).
    NotInDistribution,
}

/// Points the distribution's entry for `repo` at `branch`.
///
/// A repository missing from the distribution is reported as information;
/// it is never an error.
pub fn sync_distribution(
    distribution: &mut Distribution,
    repo: &RepoEntry,
    branch: &str,
    reporter: &dyn Reporter,
) -> SyncOutcome {
    match distribution.set_version(&repo.name, branch) {
        Ok(()) => {
            debug!(repo = %repo.full_name(), branch, "Updated distribution version");
            SyncOutcome::Updated
        }
        Err(e) => {
            debug!(repo = %repo.full_name(), reason = %e, "Distribution not updated");
            reporter.sub_item(&format!(
                "Could not update distribution.yaml, since {} is not in the distribution.yaml",
                repo.full_name()
            ));
            SyncOutcome::NotInDistribution
        }
    }
}
