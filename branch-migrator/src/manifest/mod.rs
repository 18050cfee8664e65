//! Repository-list and distribution manifests.
//!
//! Both documents are read once at the start of a run, mutated in memory and
//! written once to distinct output paths after the whole fleet is processed.

mod distribution;
mod error;
mod repos;

pub use distribution::Distribution;
pub use error::{DistributionError, ManifestError};
pub use repos::{RepoEntry, ReposFile};

use std::path::{Path, PathBuf};
use tracing::info;

/// Destinations for the updated manifests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Where the updated repository list is written.
    pub repos: PathBuf,
    /// Where the updated distribution is written.
    pub distribution: PathBuf,
}

/// Serializes both manifests and writes them to their output paths.
///
/// # Errors
///
/// Returns [`ManifestError`] if serialization or writing fails.
pub fn write_outputs(
    paths: &OutputPaths,
    repos: &ReposFile,
    distribution: &Distribution,
) -> Result<(), ManifestError> {
    write_file(&paths.repos, &repos.to_yaml_string()?)?;
    write_file(&paths.distribution, &distribution.to_yaml_string()?)?;
    info!(
        repos = %paths.repos.display(),
        distribution = %paths.distribution.display(),
        "Wrote updated manifests"
    );
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<(), ManifestError> {
    std::fs::write(path, content).map_err(|e| ManifestError::IoError {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_both_outputs() {
        let temp = TempDir::new().unwrap();
        let paths = OutputPaths {
            repos: temp.path().join("ros2.repos.rolling.output.yaml"),
            distribution: temp.path().join("distribution.rolling.output.yaml"),
        };
        let repos = ReposFile {
            repositories: vec![RepoEntry::new(
                "ros2",
                "rclcpp",
                "https://github.com/ros2/rclcpp.git",
                "jazzy",
            )],
        };
        let distribution =
            Distribution::parse("repositories:\n  rclcpp:\n    source:\n      version: jazzy\n", "t")
                .unwrap();

        write_outputs(&paths, &repos, &distribution).unwrap();

        let written = ReposFile::from_path(&paths.repos).unwrap();
        assert_eq!(written, repos);
        let written = Distribution::from_path(&paths.distribution).unwrap();
        assert_eq!(written.version("rclcpp"), Some("jazzy"));
    }

    #[test]
    fn reports_unwritable_destination() {
        let temp = TempDir::new().unwrap();
        let paths = OutputPaths {
            repos: temp.path().join("missing-dir/repos.yaml"),
            distribution: temp.path().join("distribution.yaml"),
        };
        let distribution = Distribution::parse("repositories: {}\n", "t").unwrap();

        let result = write_outputs(&paths, &ReposFile::default(), &distribution);

        assert!(matches!(result, Err(ManifestError::IoError { .. })));
    }
}
