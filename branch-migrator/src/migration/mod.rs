//! Per-repository migration.
//!
//! A repository already on the target branch only has its distribution entry
//! synced. Otherwise it moves through
//! `NotStarted → PullComplete → MirrorWorkflowAttempted → RetargetAttempted →
//! VersionUpdated`. A failed mirror install is recorded and the run carries
//! on; a failed pull or default-branch query ends the repository's migration
//! with its version untouched.

use crate::config::MigrationTarget;
use crate::git::WorkingCopy;
use crate::hosting::Hosting;
use crate::manifest::{Distribution, RepoEntry};
use crate::mirror::install_mirror_workflow;
use crate::report::Reporter;
use crate::retarget::{retarget_default_branch_and_prs, RetargetRequest};
use crate::summary::{MigrationRecord, MigrationState, RepoOutcome, StepOutcome};
use crate::sync::sync_distribution;
use crate::templates::TemplateRenderer;
use std::path::{Path, PathBuf};
use tracing::{debug, info_span, Instrument};

/// Collaborators and settings shared by every repository in a run.
#[derive(Clone, Copy)]
pub struct MigrationContext<'a> {
    /// Hosting provider.
    pub hosting: &'a dyn Hosting,
    /// Local working copies.
    pub working_copy: &'a dyn WorkingCopy,
    /// Workflow renderer.
    pub renderer: &'a TemplateRenderer,
    /// Operator output.
    pub reporter: &'a dyn Reporter,
    /// Branch pair for this run.
    pub target: &'a MigrationTarget,
    /// Directory holding working copies as `<org>/<name>`.
    pub workspace: &'a Path,
    /// Describe instead of mutate.
    pub dry_run: bool,
}

impl MigrationContext<'_> {
    /// Working copy location for a repository.
    #[must_use]
    pub fn repo_path(&self, repo: &RepoEntry) -> PathBuf {
        self.workspace.join(&repo.org).join(&repo.name)
    }
}

/// Migrates one repository and syncs its distribution entry.
///
/// Never fails: every problem ends up in the returned outcome's errors.
pub async fn migrate_repository(
    ctx: &MigrationContext<'_>,
    repo: &mut RepoEntry,
    distribution: &mut Distribution,
) -> RepoOutcome {
    let span = info_span!("migrate", repo = %repo.full_name(), version = %repo.version);
    async {
        let new_branch = ctx.target.new_branch();
        if repo.version == new_branch {
            ctx.reporter.sub_item(&format!(
                "Doing nothing - {} already has the default branch {new_branch}",
                repo.full_name()
            ));
            debug!(state = ?MigrationState::AlreadyOnTarget, "State transition");
            return RepoOutcome::AlreadyOnTarget {
                repository: repo.full_name(),
                distribution: sync_distribution(distribution, repo, new_branch, ctx.reporter),
            };
        }

        ctx.reporter
            .progress(&format!("Processing {}", repo.full_name()));
        RepoOutcome::Processed(run_steps(ctx, repo, distribution).await)
    }
    .instrument(span)
    .await
}

async fn run_steps(
    ctx: &MigrationContext<'_>,
    repo: &mut RepoEntry,
    distribution: &mut Distribution,
) -> MigrationRecord {
    let full_name = repo.full_name();
    let new_branch = ctx.target.new_branch();
    let repo_path = ctx.repo_path(repo);
    let mut record = MigrationRecord::new(full_name.clone());

    match ctx
        .working_copy
        .pull(&repo.url, &repo_path, &repo.version)
        .await
    {
        Ok(message) => {
            ctx.reporter.sub_item(&message);
            record.pull = StepOutcome::Succeeded { message };
        }
        Err(e) => {
            let error = format!("Error pulling {full_name}: {e}");
            fail(ctx, &mut record, error.clone());
            record.pull = StepOutcome::Failed { error };
            return record;
        }
    }
    advance(&mut record, MigrationState::PullComplete);

    record.mirror = match install_mirror_workflow(
        ctx.working_copy,
        ctx.renderer,
        &repo_path,
        &repo.version,
        new_branch,
        ctx.dry_run,
    )
    .await
    {
        Ok(outcome) => {
            if let StepOutcome::Succeeded { message } | StepOutcome::Simulated { message } =
                &outcome
            {
                ctx.reporter.sub_item(message);
            }
            outcome
        }
        Err(e) => {
            let error = format!("Error pushing mirror workflow on {full_name}: {e}");
            fail(ctx, &mut record, error.clone());
            StepOutcome::Failed { error }
        }
    };
    advance(&mut record, MigrationState::MirrorWorkflowAttempted);

    let current_default = match ctx.hosting.default_branch(&repo.org, &repo.name).await {
        Ok(branch) => branch,
        Err(e) => {
            let error = format!(
                "Error changing default branch and retargetting PRs on {full_name}: {e}"
            );
            fail(ctx, &mut record, error);
            return record;
        }
    };

    let request = RetargetRequest {
        owner: &repo.org,
        name: &repo.name,
        base_branch: &repo.version,
        new_branch,
        change_default_branch: current_default == repo.version,
        dry_run: ctx.dry_run,
    };
    record.retarget =
        Some(retarget_default_branch_and_prs(ctx.hosting, &request, ctx.reporter).await);
    advance(&mut record, MigrationState::RetargetAttempted);

    repo.version = new_branch.to_string();
    advance(&mut record, MigrationState::VersionUpdated);
    record.distribution = Some(sync_distribution(
        distribution,
        repo,
        new_branch,
        ctx.reporter,
    ));

    record
}

fn advance(record: &mut MigrationRecord, state: MigrationState) {
    debug!(from = ?record.state, to = ?state, "State transition");
    record.state = state;
}

fn fail(ctx: &MigrationContext<'_>, record: &mut MigrationRecord, error: String) {
    ctx.reporter.sub_item_error(&error);
    record.errors.push(error);
}
