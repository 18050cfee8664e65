//! Local cache directory and manifest downloads.

mod error;

pub use error::CacheError;

use std::path::Path;
use tracing::{debug, info};
use url::Url;

/// Whether a download hit the network or reused a cached copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStatus {
    /// The file was fetched.
    Downloaded,
    /// A previously downloaded file was reused.
    Cached,
}

/// Creates the cache directory, wiping it first when `force_refresh` is set.
///
/// # Errors
///
/// Returns [`CacheError::IoError`] if the directory cannot be removed or created.
pub fn prepare_cache_dir(path: &Path, force_refresh: bool) -> Result<(), CacheError> {
    let io_error = |source| CacheError::IoError {
        path: path.display().to_string(),
        source,
    };

    if force_refresh && path.exists() {
        info!(path = %path.display(), "Clearing cache directory");
        std::fs::remove_dir_all(path).map_err(io_error)?;
    }
    std::fs::create_dir_all(path).map_err(io_error)
}

/// Downloads `url` to `path` unless a cached copy exists.
///
/// # Errors
///
/// Returns [`CacheError`] on transport failure, a non-success status, or if
/// the file cannot be written.
pub async fn download_file(
    client: &reqwest::Client,
    url: &Url,
    path: &Path,
) -> Result<DownloadStatus, CacheError> {
    let cached = tokio::fs::try_exists(path)
        .await
        .map_err(|e| CacheError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
    if cached {
        debug!(path = %path.display(), "Using cached file");
        return Ok(DownloadStatus::Cached);
    }

    info!(url = %url, path = %path.display(), "Downloading");
    let http_error = |source| CacheError::HttpError {
        url: url.to_string(),
        source,
    };

    let response = client.get(url.clone()).send().await.map_err(http_error)?;
    let status = response.status();
    if !status.is_success() {
        return Err(CacheError::BadStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let body = response.bytes().await.map_err(http_error)?;

    tokio::fs::write(path, &body)
        .await
        .map_err(|e| CacheError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
    Ok(DownloadStatus::Downloaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn creates_missing_cache_dir() {
        let temp = TempDir::new().unwrap();
        let cache = temp.path().join(".cache/nested");

        prepare_cache_dir(&cache, false).unwrap();

        assert!(cache.is_dir());
    }

    #[test]
    fn keeps_contents_without_force_refresh() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("ros2.repos.rolling.yaml"), "x").unwrap();

        prepare_cache_dir(temp.path(), false).unwrap();

        assert!(temp.path().join("ros2.repos.rolling.yaml").exists());
    }

    #[test]
    fn force_refresh_clears_contents() {
        let temp = TempDir::new().unwrap();
        let cache = temp.path().join("cache");
        fs::create_dir_all(cache.join("rolling/ros2/rclcpp")).unwrap();
        fs::write(cache.join("ros2.repos.rolling.yaml"), "x").unwrap();

        prepare_cache_dir(&cache, true).unwrap();

        assert!(cache.is_dir());
        assert_eq!(fs::read_dir(&cache).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn reuses_cached_download() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("distribution.rolling.yaml");
        fs::write(&path, "cached").unwrap();
        // Unroutable URL: a network attempt would fail the test.
        let url = Url::parse("http://127.0.0.1:9/distribution.yaml").unwrap();

        let status = download_file(&reqwest::Client::new(), &url, &path)
            .await
            .unwrap();

        assert_eq!(status, DownloadStatus::Cached);
        assert_eq!(fs::read_to_string(&path).unwrap(), "cached");
    }

    #[tokio::test]
    async fn uninspectable_cache_path_is_an_error() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("cache");
        fs::write(&blocker, "not a directory").unwrap();
        let url = Url::parse("http://127.0.0.1:9/ros2.repos").unwrap();

        let result =
            download_file(&reqwest::Client::new(), &url, &blocker.join("ros2.repos.yaml")).await;

        assert!(matches!(result, Err(CacheError::IoError { .. })));
    }
}
