//! The distribution manifest (`distribution.yaml`, REP 143).
//!
//! Only the `version` of a repository's `source` and `doc` sections is ever
//! changed; everything else in the document is carried through untouched.

use super::{DistributionError, ManifestError};
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Sections whose `version` tracks the development branch.
const VERSIONED_SECTIONS: [&str; 2] = ["source", "doc"];

/// A parsed distribution manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    /// Leading directive and comment lines, re-emitted verbatim.
    header: String,
    document: Value,
}

impl Distribution {
    /// Reads and parses a distribution manifest from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] if the file cannot be read or is malformed.
    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parses distribution content. `origin` names the source in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] if the content is not a valid distribution.
    pub fn parse(content: &str, origin: &str) -> Result<Self, ManifestError> {
        let document: Value =
            serde_yaml::from_str(content).map_err(|source| ManifestError::YamlError {
                origin: origin.to_string(),
                source,
            })?;

        if !matches!(document.get("repositories"), Some(Value::Mapping(_))) {
            return Err(ManifestError::MissingRepositories {
                origin: origin.to_string(),
            });
        }

        Ok(Self {
            header: extract_header(content),
            document,
        })
    }

    /// Returns the tracked source version of a repository, if present.
    #[must_use]
    pub fn version(&self, repo_name: &str) -> Option<&str> {
        self.repositories()?
            .get(repo_name)?
            .get("source")?
            .get("version")?
            .as_str()
    }

    /// Returns true if the repository is part of the distribution.
    #[must_use]
    pub fn contains(&self, repo_name: &str) -> bool {
        self.repositories()
            .is_some_and(|repos| repos.contains_key(repo_name))
    }

    /// Sets the tracked version of a repository.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError::RepositoryNotFound`] if the repository is
    /// not in the distribution.
    pub fn set_version(&mut self, repo_name: &str, version: &str) -> Result<(), DistributionError> {
        let not_found = || DistributionError::RepositoryNotFound {
            name: repo_name.to_string(),
        };

        let entry = self
            .document
            .get_mut("repositories")
            .and_then(Value::as_mapping_mut)
            .and_then(|repos| repos.get_mut(repo_name))
            .and_then(Value::as_mapping_mut)
            .ok_or_else(not_found)?;

        let mut updated = false;
        for section in VERSIONED_SECTIONS {
            if let Some(Value::Mapping(fields)) = entry.get_mut(section) {
                fields.insert(
                    Value::String("version".to_string()),
                    Value::String(version.to_string()),
                );
                updated = true;
            }
        }

        if updated {
            Ok(())
        } else {
            Err(DistributionError::NoVersionedSection {
                name: repo_name.to_string(),
            })
        }
    }

    /// Serializes the distribution, restoring the original header.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::YamlError`] if serialization fails.
    pub fn to_yaml_string(&self) -> Result<String, ManifestError> {
        let body =
            serde_yaml::to_string(&self.document).map_err(|source| ManifestError::YamlError {
                origin: "distribution.yaml output".to_string(),
                source,
            })?;
        Ok(format!("{}{body}", self.header))
    }

    fn repositories(&self) -> Option<&Mapping> {
        self.document.get("repositories")?.as_mapping()
    }
}

/// Collects the `%YAML` directive, comments and `---` marker preceding the body.
fn extract_header(content: &str) -> String {
    let mut header = String::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('%') || trimmed.starts_with('#') || trimmed == "---" {
            header.push_str(line);
            header.push('\n');
        } else if !trimmed.is_empty() {
            break;
        }
    }
    header
}
