//! The repository-list manifest (`ros2.repos`, vcstool format).

use super::ManifestError;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// One repository tracked by the repository-list manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoEntry {
    /// Owning organization (first key component).
    pub org: String,

    /// Repository name (second key component).
    pub name: String,

    /// Source URL.
    pub url: String,

    /// Currently tracked branch.
    pub version: String,

    /// VCS type, usually `git`.
    pub kind: String,
}

impl RepoEntry {
    /// Creates a git repository entry.
    pub fn new(
        org: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            org: org.into(),
            name: name.into(),
            url: url.into(),
            version: version.into(),
            kind: default_kind(),
        }
    }

    /// Returns the `org/name` identifier.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.org, self.name)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ReposDocument {
    repositories: Mapping,
}

#[derive(Debug, Serialize, Deserialize)]
struct RepositorySource {
    #[serde(rename = "type", default = "default_kind")]
    kind: String,
    url: String,
    version: Option<String>,
}

fn default_kind() -> String {
    "git".to_string()
}

/// Ordered list of repositories read from a repository-list manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReposFile {
    /// Entries in manifest order.
    pub repositories: Vec<RepoEntry>,
}

impl ReposFile {
    /// Reads and parses a manifest from disk.
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

    /// Parses manifest content. `origin` names the source in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] if the content is not a valid manifest.
    pub fn parse(content: &str, origin: &str) -> Result<Self, ManifestError> {
        let yaml_error = |source| ManifestError::YamlError {
            origin: origin.to_string(),
            source,
        };

        let document: ReposDocument = serde_yaml::from_str(content).map_err(yaml_error)?;

        let mut repositories = Vec::with_capacity(document.repositories.len());
        for (key, value) in document.repositories {
            let key = match key {
                Value::String(key) => key,
                other => {
                    return Err(ManifestError::InvalidRepositoryKey {
                        origin: origin.to_string(),
                        key: format!("{other:?}"),
                    })
                }
            };
            let (org, name) = match key.split_once('/') {
                Some((org, name)) if !org.is_empty() && !name.is_empty() => {
                    (org.to_string(), name.to_string())
                }
                _ => {
                    return Err(ManifestError::InvalidRepositoryKey {
                        origin: origin.to_string(),
                        key: key.clone(),
                    })
                }
            };

            let source: RepositorySource = serde_yaml::from_value(value).map_err(yaml_error)?;
            let version = source.version.ok_or_else(|| ManifestError::MissingVersion {
                origin: origin.to_string(),
                key: key.clone(),
            })?;

            repositories.push(RepoEntry {
                org,
                name,
                url: source.url,
                version,
                kind: source.kind,
            });
        }

        Ok(Self { repositories })
    }

    /// Serializes the manifest, preserving entry order.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::YamlError`] if serialization fails.
    pub fn to_yaml_string(&self) -> Result<String, ManifestError> {
        let yaml_error = |source| ManifestError::YamlError {
            origin: "ros2.repos output".to_string(),
            source,
        };

        let mut repositories = Mapping::new();
        for repo in &self.repositories {
            let source = RepositorySource {
                kind: repo.kind.clone(),
                url: repo.url.clone(),
                version: Some(repo.version.clone()),
            };
            repositories.insert(
                Value::String(repo.full_name()),
                serde_yaml::to_value(source).map_err(yaml_error)?,
            );
        }

        serde_yaml::to_string(&ReposDocument { repositories }).map_err(yaml_error)
    }
}
