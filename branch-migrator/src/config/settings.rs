//! Unresolved run settings, as given on the command line or in a config file.

use super::{validate_branch_name, ConfigError, MigrationTarget};
use crate::exclusion::ExclusionSet;
use crate::runner::RunnerConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Cache directory used when none is configured.
pub const DEFAULT_CACHE_DIR: &str = ".cache";

/// Settings before defaults are applied.
///
/// Every field is optional so that command-line values can be layered over
/// a config file with [`MigrationSettings::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct MigrationSettings {
    /// Branch to migrate every repository to.
    pub new_branch: Option<String>,

    /// Branch of the ros2/ros2 repository whose `ros2.repos` is read.
    pub repos_branch: Option<String>,

    /// Override URL for the repository-list manifest.
    pub repos_url: Option<String>,

    /// rosdistro directory holding the distribution (defaults to `repos_branch`).
    pub distro_directory: Option<String>,

    /// Override URL for the distribution manifest.
    pub distribution_url: Option<String>,

    /// Local cache directory.
    pub cache_dir: Option<PathBuf>,

    /// Repositories (`org/name`) to leave untouched.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Describe instead of mutate (defaults to true).
    pub dry_run: Option<bool>,

    /// Wipe the cache before running.
    pub force_refresh: Option<bool>,

    /// GitHub token; never read from a config file.
    #[serde(skip)]
    pub token: Option<String>,
}

impl MigrationSettings {
    /// Loads settings from a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing or malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading config file");
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Layers `self` over `fallback`: values set here win, exclusions combine.
    #[must_use]
    pub fn merge(self, fallback: Self) -> Self {
        let mut exclude = fallback.exclude;
        for repo in self.exclude {
            if !exclude.contains(&repo) {
                exclude.push(repo);
            }
        }

        Self {
            new_branch: self.new_branch.or(fallback.new_branch),
            repos_branch: self.repos_branch.or(fallback.repos_branch),
            repos_url: self.repos_url.or(fallback.repos_url),
            distro_directory: self.distro_directory.or(fallback.distro_directory),
            distribution_url: self.distribution_url.or(fallback.distribution_url),
            cache_dir: self.cache_dir.or(fallback.cache_dir),
            exclude,
            dry_run: self.dry_run.or(fallback.dry_run),
            force_refresh: self.force_refresh.or(fallback.force_refresh),
            token: self.token.or(fallback.token),
        }
    }

    /// Applies defaults and validates, producing a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required setting is missing or invalid.
    pub fn resolve(self) -> Result<RunnerConfig, ConfigError> {
        let new_branch = self.new_branch.ok_or(ConfigError::MissingSetting {
            name: "new-branch",
        })?;
        let repos_branch = self.repos_branch.ok_or(ConfigError::MissingSetting {
            name: "repos-branch",
        })?;
        let target = MigrationTarget::new(new_branch, repos_branch)?;

        let distro_directory = self
            .distro_directory
            .unwrap_or_else(|| target.repos_branch().to_string());
        validate_branch_name("distro-directory", &distro_directory)?;

        let repos_url = parse_url(
            "repos-url",
            self.repos_url
                .unwrap_or_else(|| default_repos_url(target.repos_branch())),
        )?;
        let distribution_url = parse_url(
            "distribution-url",
            self.distribution_url
                .unwrap_or_else(|| default_distribution_url(&distro_directory)),
        )?;

        for repo in &self.exclude {
            if !is_full_name(repo) {
                return Err(ConfigError::InvalidExclusion {
                    value: repo.clone(),
                });
            }
        }

        Ok(RunnerConfig::new(
            target,
            distro_directory,
            repos_url,
            distribution_url,
            self.cache_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR)),
            ExclusionSet::new(self.exclude),
        )
        .with_dry_run(self.dry_run.unwrap_or(true))
        .with_force_refresh(self.force_refresh.unwrap_or(false))
        .with_token(self.token))
    }
}

/// Default location of `ros2.repos` for a ros2/ros2 branch.
#[must_use]
pub fn default_repos_url(repos_branch: &str) -> String {
    format!("https://raw.githubusercontent.com/ros2/ros2/{repos_branch}/ros2.repos")
}

/// Default location of a rosdistro `distribution.yaml`.
#[must_use]
pub fn default_distribution_url(distro_directory: &str) -> String {
    format!(
        "https://raw.githubusercontent.com/ros/rosdistro/master/{distro_directory}/distribution.yaml"
    )
}

fn parse_url(name: &'static str, value: String) -> Result<Url, ConfigError> {
    Url::parse(&value).map_err(|source| ConfigError::InvalidUrl {
        name,
        value,
        source,
    })
}

fn is_full_name(value: &str) -> bool {
    matches!(
        value.split_once('/'),
        Some((org, name)) if !org.is_empty() && !name.is_empty() && !name.contains('/')
    )
}
