//! Runner error types.

/// Errors that abort a run before or after the fleet loop.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Cache directory or download errors.
    #[error(transparent)]
    Cache(#[from] crate::cache::CacheError),

    /// Manifest parse or write errors.
    #[error(transparent)]
    Manifest(#[from] crate::manifest::ManifestError),

    /// Template registry errors.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),

    /// GitHub client initialization errors.
    #[error(transparent)]
    Hosting(#[from] crate::hosting::HostingError),

    /// HTTP client initialization errors.
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
