//! Cache error types.

use thiserror::Error;

/// Errors that can occur while managing the local cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Filesystem error inside the cache directory.
    #[error("Cache I/O error at '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// HTTP transport error.
    #[error("Failed to download '{url}': {source}")]
    HttpError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Failed to download '{url}': HTTP {status}")]
    BadStatus { url: String, status: u16 },
}
