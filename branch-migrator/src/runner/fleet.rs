//! The fleet migration loop.

use crate::exclusion::ExclusionSet;
use crate::manifest::{Distribution, ReposFile};
use crate::migration::{migrate_repository, MigrationContext};
use crate::summary::RunReport;
use tracing::info;

/// Migrates every repository in manifest order.
///
/// Repositories are processed one at a time; a failure in one is recorded in
/// the report and never stops the others.
pub async fn migrate_fleet(
    ctx: &MigrationContext<'_>,
    repos: &mut ReposFile,
    distribution: &mut Distribution,
    exclusions: &ExclusionSet,
) -> RunReport {
    let mut report = RunReport::new(ctx.dry_run);
    let total = repos.repositories.len();

    for (index, repo) in repos.repositories.iter_mut().enumerate() {
        let full_name = repo.full_name();
        if exclusions.excludes(&full_name, ctx.reporter) {
            report.record_excluded(full_name);
            continue;
        }

        info!(repo = %full_name, position = index + 1, total, "Migrating repository");
        let outcome = migrate_repository(ctx, repo, distribution).await;
        report.record_outcome(&outcome);
    }

    info!(
        migrated = report.repos_migrated.len(),
        skipped = report.repos_skipped.len(),
        excluded = report.repos_excluded.len(),
        errors = report.errors.len(),
        "Fleet migration finished"
    );
    report
}
