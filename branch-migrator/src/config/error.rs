//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading or resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse config file '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A required setting was not provided.
    #[error("Missing required setting: {name}")]
    MissingSetting { name: &'static str },

    /// A branch name is not a valid git reference name.
    #[error("Invalid {name} '{value}': {message}")]
    InvalidBranch {
        name: &'static str,
        value: String,
        message: String,
    },

    /// A URL setting could not be parsed.
    #[error("Invalid {name} '{value}': {source}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    /// An exclusion is not of the form `org/name`.
    #[error("Invalid exclusion '{value}': expected org/name")]
    InvalidExclusion { value: String },
}
