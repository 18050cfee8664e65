//! Hosting-side branch migration: branch creation, default branch change and
//! pull request retargeting.
//!
//! Every step is attempted regardless of how the previous one went. Failures
//! are reported and folded into a [`RetargetOutcome`]; none escape.

use crate::hosting::Hosting;
use crate::report::Reporter;
use crate::summary::StepOutcome;
use tracing::{debug, warn};

/// Parameters for migrating one repository on the hosting side.
#[derive(Debug, Clone, Copy)]
pub struct RetargetRequest<'a> {
    /// Repository owner.
    pub owner: &'a str,
    /// Repository name.
    pub name: &'a str,
    /// Branch being migrated away from.
    pub base_branch: &'a str,
    /// Branch being migrated to.
    pub new_branch: &'a str,
    /// Whether the hosted default branch is currently `base_branch`.
    pub change_default_branch: bool,
    /// Describe instead of mutate.
    pub dry_run: bool,
}

impl RetargetRequest<'_> {
    fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Per-step results of a retarget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetargetOutcome {
    /// Creation of the new branch.
    pub create_branch: StepOutcome,
    /// Default branch change; [`StepOutcome::NotAttempted`] when the default
    /// was not the old branch.
    pub default_branch: StepOutcome,
    /// Retargeting of open pull requests.
    pub pull_requests: StepOutcome,
    /// Human-readable summary.
    pub summary: String,
}

impl RetargetOutcome {
    /// Returns true if the default change or the PR retarget failed.
    ///
    /// A failed branch creation on its own does not count.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.default_branch.is_failed() || self.pull_requests.is_failed()
    }
}

/// Creates the new branch, flips the default branch if requested, and
/// retargets open pull requests, reporting the summary line.
pub async fn retarget_default_branch_and_prs(
    hosting: &dyn Hosting,
    request: &RetargetRequest<'_>,
    reporter: &dyn Reporter,
) -> RetargetOutcome {
    let RetargetRequest {
        owner,
        name,
        base_branch,
        new_branch,
        ..
    } = *request;

    let outcome = if request.dry_run {
        let message = format!("Would create a new branch {new_branch} from {base_branch}");
        RetargetOutcome {
            create_branch: StepOutcome::Simulated { message },
            default_branch: if request.change_default_branch {
                StepOutcome::Simulated {
                    message: format!("Would set the default branch to {new_branch}"),
                }
            } else {
                StepOutcome::NotAttempted
            },
            pull_requests: StepOutcome::Simulated {
                message: format!("Would retarget PRs from {base_branch} to {new_branch}"),
            },
            summary: format!(
                "Would create a new branch {new_branch} from {base_branch} and retarget PRs"
            ),
        }
    } else {
        let create_branch = match hosting
            .create_branch(owner, name, base_branch, new_branch)
            .await
        {
            Ok(()) => StepOutcome::Succeeded {
                message: format!("Created branch {new_branch} from {base_branch}"),
            },
            Err(e) => {
                warn!(repo = %request.full_name(), error = %e, "Failed to create branch");
                let error = format!(
                    "Error creating branch {new_branch} on {}: {e}",
                    request.full_name()
                );
                reporter.sub_item(&error);
                StepOutcome::Failed { error }
            }
        };

        let default_branch = if request.change_default_branch {
            match hosting.set_default_branch(owner, name, new_branch).await {
                Ok(()) => StepOutcome::Succeeded {
                    message: format!("Set default branch to {new_branch}"),
                },
                Err(e) => {
                    let error = format!(
                        "Error changing default branch on {}: {e}",
                        request.full_name()
                    );
                    reporter.sub_item(&error);
                    StepOutcome::Failed { error }
                }
            }
        } else {
            debug!(repo = %request.full_name(), "Default branch is not the old branch, leaving it");
            StepOutcome::NotAttempted
        };

        let pull_requests = match hosting
            .retarget_pull_requests(owner, name, base_branch, new_branch)
            .await
        {
            Ok(count) => StepOutcome::Succeeded {
                message: format!("Retargeted {count} PRs from {base_branch} to {new_branch}"),
            },
            Err(e) => {
                let error = format!("Error retargeting PRs on {}: {e}", request.full_name());
                reporter.sub_item(&error);
                StepOutcome::Failed { error }
            }
        };

        let mut outcome = RetargetOutcome {
            create_branch,
            default_branch,
            pull_requests,
            summary: String::new(),
        };
        outcome.summary = if outcome.has_errors() {
            format!(
                "Errors updating {} default branch from {base_branch} to {new_branch}",
                request.full_name()
            )
        } else {
            format!(
                "Updated {} default branch from {base_branch} to {new_branch} and retargetted PRs",
                request.full_name()
            )
        };
        outcome
    };

    reporter.sub_item(&outcome.summary);
    outcome
}
