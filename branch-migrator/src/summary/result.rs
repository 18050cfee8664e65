//! Per-repository outcome types.

use super::StepOutcome;
use crate::retarget::RetargetOutcome;
use crate::sync::SyncOutcome;

/// Progress of a repository through its migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationState {
    /// Nothing has run yet.
    NotStarted,
    /// The working copy is at the old branch.
    PullComplete,
    /// The mirror workflow step ran (successfully or not).
    MirrorWorkflowAttempted,
    /// Branch creation, default change and PR retargeting ran.
    RetargetAttempted,
    /// The repository was already on the target branch.
    AlreadyOnTarget,
    /// The tracked version now names the target branch.
    VersionUpdated,
}

/// Step-by-step record of a repository that needed migrating.
#[derive(Debug, Clone)]
pub struct MigrationRecord {
    /// Repository `org/name`.
    pub repository: String,
    /// Last state reached.
    pub state: MigrationState,
    /// Working copy refresh.
    pub pull: StepOutcome,
    /// Mirror workflow installation.
    pub mirror: StepOutcome,
    /// Hosting-side outcome; `None` if the retarget step was not reached.
    pub retarget: Option<RetargetOutcome>,
    /// Distribution update; `None` if the version did not advance.
    pub distribution: Option<SyncOutcome>,
    /// Messages destined for the run's error list, in occurrence order.
    pub errors: Vec<String>,
}

impl MigrationRecord {
    /// Starts a record for a repository.
    #[must_use]
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            state: MigrationState::NotStarted,
            pull: StepOutcome::NotAttempted,
            mirror: StepOutcome::NotAttempted,
            retarget: None,
            distribution: None,
            errors: Vec::new(),
        }
    }
}

/// Result of processing a single repository.
#[derive(Debug, Clone)]
pub enum RepoOutcome {
    /// The repository already tracked the target branch.
    AlreadyOnTarget {
        /// Repository `org/name`.
        repository: String,
        /// Distribution update.
        distribution: SyncOutcome,
    },

    /// The repository went through the migration steps.
    Processed(MigrationRecord),
}

impl RepoOutcome {
    /// Repository `org/name`.
    #[must_use]
    pub fn repository(&self) -> &str {
        match self {
            Self::AlreadyOnTarget { repository, .. } => repository,
            Self::Processed(record) => &record.repository,
        }
    }

    /// Final state of the repository.
    #[must_use]
    pub fn state(&self) -> MigrationState {
        match self {
            Self::AlreadyOnTarget { .. } => MigrationState::VersionUpdated,
            Self::Processed(record) => record.state,
        }
    }

    /// Errors attributable to this repository.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        match self {
            Self::AlreadyOnTarget { .. } => &[],
            Self::Processed(record) => &record.errors,
        }
    }
}
