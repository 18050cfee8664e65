//! Manifest error types.

use thiserror::Error;

/// Errors that can occur while reading or writing manifests.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Failed to read or write a manifest file.
    #[error("Failed to access manifest '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse or serialize YAML content.
    #[error("Invalid YAML in '{origin}': {source}")]
    YamlError {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// The document has no `repositories` mapping.
    #[error("'{origin}' has no repositories mapping")]
    MissingRepositories { origin: String },

    /// A repository key is not of the form `org/name`.
    #[error("Repository key '{key}' in '{origin}' is not of the form org/name")]
    InvalidRepositoryKey { origin: String, key: String },

    /// A repository has no version to migrate from.
    #[error("Repository '{key}' in '{origin}' has no version")]
    MissingVersion { origin: String, key: String },
}

/// Errors that can occur while updating the distribution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DistributionError {
    /// The repository is not part of the distribution.
    #[error("'{name}' is not in the distribution")]
    RepositoryNotFound { name: String },

    /// The repository has neither a source nor a doc section to update.
    #[error("'{name}' has no source or doc entry")]
    NoVersionedSection { name: String },
}
