//! The branch pair a run migrates between.

use super::ConfigError;
use bstr::ByteSlice;

/// Branch being migrated to, and the repository-list branch being read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationTarget {
    new_branch: String,
    repos_branch: String,
}

impl MigrationTarget {
    /// Creates a target after validating both branch names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBranch`] for a malformed branch name.
    pub fn new(
        new_branch: impl Into<String>,
        repos_branch: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let new_branch = new_branch.into();
        let repos_branch = repos_branch.into();
        validate_branch_name("new-branch", &new_branch)?;
        validate_branch_name("repos-branch", &repos_branch)?;
        Ok(Self {
            new_branch,
            repos_branch,
        })
    }

    /// The branch repositories are migrated to.
    pub fn new_branch(&self) -> &str {
        &self.new_branch
    }

    /// The branch of the repository-list manifest being read.
    pub fn repos_branch(&self) -> &str {
        &self.repos_branch
    }
}

/// Checks that `value` is usable as a git branch name.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBranch`] describing the problem.
pub fn validate_branch_name(name: &'static str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::InvalidBranch {
        name,
        value: value.to_string(),
        message,
    };

    if value.is_empty() {
        return Err(invalid("branch name is empty".to_string()));
    }
    gix_validate::reference::name_partial(value.as_bytes().as_bstr())
        .map_err(|e| invalid(e.to_string()))?;
    Ok(())
}
