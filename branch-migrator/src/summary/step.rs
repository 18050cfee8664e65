//! Outcome of a single migration step.

/// What happened when a step ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step was not reached or did not apply.
    NotAttempted,

    /// Dry run: the step only described its intent.
    Simulated {
        /// Intent description.
        message: String,
    },

    /// The step completed.
    Succeeded {
        /// Outcome description.
        message: String,
    },

    /// The step failed.
    Failed {
        /// Error message.
        error: String,
    },
}

impl StepOutcome {
    /// Returns true if the step failed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Returns the error message of a failed step.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error } => Some(error),
            _ => None,
        }
    }
}
