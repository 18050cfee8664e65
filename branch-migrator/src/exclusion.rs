//! Repositories exempt from migration.

use crate::report::Reporter;
use std::collections::BTreeSet;
use tracing::debug;

/// A set of `org/name` identifiers that must never be migrated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    repositories: BTreeSet<String>,
}

impl ExclusionSet {
    /// Creates an exclusion set from `org/name` identifiers.
    pub fn new<I, S>(repositories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            repositories: repositories.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if `full_name` is on the exclusion list.
    #[must_use]
    pub fn contains(&self, full_name: &str) -> bool {
        self.repositories.contains(full_name)
    }

    /// Checks a repository against the list, reporting when it is excluded.
    pub fn excludes(&self, full_name: &str, reporter: &dyn Reporter) -> bool {
        if !self.contains(full_name) {
            return false;
        }
        debug!(repo = %full_name, "Repository excluded");
        reporter.progress(&format!(
            "Excluded {full_name} since it is on the exclude list"
        ));
        true
    }

    /// Number of excluded repositories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    /// Returns true if nothing is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }

    /// Iterates the excluded identifiers in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.repositories.iter().map(String::as_str)
    }
}
