//! Run report types.

use super::result::{MigrationState, RepoOutcome};
use crate::report::Reporter;

/// Accumulated outcome of a fleet run.
///
/// Entries are only ever appended, in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Errors collected across all repositories.
    pub errors: Vec<String>,

    /// Repositories already on the target branch (`org/name`).
    pub repos_skipped: Vec<String>,

    /// Repositories whose version advanced this run (`org/name`).
    pub repos_migrated: Vec<String>,

    /// Repositories left alone because of the exclusion list (`org/name`).
    pub repos_excluded: Vec<String>,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Records a repository skipped by the exclusion list.
    pub fn record_excluded(&mut self, repository: impl Into<String>) {
        self.repos_excluded.push(repository.into());
    }

    /// Updates the report with a repository outcome.
    pub fn record_outcome(&mut self, outcome: &RepoOutcome) {
        match outcome {
            RepoOutcome::AlreadyOnTarget { repository, .. } => {
                self.repos_skipped.push(repository.clone());
            }
            RepoOutcome::Processed(record) => {
                self.errors.extend(record.errors.iter().cloned());
                if record.state == MigrationState::VersionUpdated {
                    self.repos_migrated.push(record.repository.clone());
                }
            }
        }
    }

    /// Returns true if any errors occurred.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Emits the end-of-run summary: errors (or a success line), then skips.
    pub fn report_to(&self, reporter: &dyn Reporter) {
        if self.errors.is_empty() {
            reporter.progress("Done! - No errors");
        } else {
            reporter.progress("Finished with errors:");
            for error in &self.errors {
                reporter.sub_item(error);
            }
        }

        if !self.repos_skipped.is_empty() {
            reporter.progress("Skipped repos:");
            for repo in &self.repos_skipped {
                reporter.sub_item(repo);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::RecordingReporter;
    use crate::summary::MigrationRecord;
    use crate::sync::SyncOutcome;

    #[test]
    fn records_outcomes_in_order() {
        let mut report = RunReport::new(false);

        report.record_outcome(&RepoOutcome::AlreadyOnTarget {
            repository: "ros2/rcl".to_string(),
            distribution: SyncOutcome::Updated,
        });
        let mut failed = MigrationRecord::new("ros2/rclpy");
        failed.errors.push("boom".to_string());
        report.record_outcome(&RepoOutcome::Processed(failed));
        let mut migrated = MigrationRecord::new("ros2/rclcpp");
        migrated.state = MigrationState::VersionUpdated;
        report.record_outcome(&RepoOutcome::Processed(migrated));

        assert_eq!(report.repos_skipped, vec!["ros2/rcl"]);
        assert_eq!(report.errors, vec!["boom"]);
        assert_eq!(report.repos_migrated, vec!["ros2/rclcpp"]);
        assert!(report.has_errors());
    }

    #[test]
    fn summary_without_errors() {
        let reporter = RecordingReporter::default();
        let mut report = RunReport::new(true);
        report.repos_skipped.push("ros2/rcl".to_string());

        report.report_to(&reporter);

        assert_eq!(
            reporter.lines(),
            vec!["Done! - No errors", "Skipped repos:", " - ros2/rcl"]
        );
    }

    #[test]
    fn summary_lists_errors() {
        let reporter = RecordingReporter::default();
        let mut report = RunReport::new(false);
        report.errors.push("Error pulling ros2/rclpy: offline".to_string());

        report.report_to(&reporter);

        assert_eq!(
            reporter.lines(),
            vec![
                "Finished with errors:",
                " - Error pulling ros2/rclpy: offline"
            ]
        );
    }
}
