//! Runner configuration.

use crate::config::MigrationTarget;
use crate::exclusion::ExclusionSet;
use crate::manifest::OutputPaths;
use std::path::{Path, PathBuf};
use url::Url;

/// Fully resolved configuration for a migration run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Branch pair being migrated.
    target: MigrationTarget,
    /// rosdistro directory of the distribution.
    distro_directory: String,
    /// Source of the repository-list manifest.
    repos_url: Url,
    /// Source of the distribution manifest.
    distribution_url: Url,
    /// Local cache directory.
    cache_dir: PathBuf,
    /// Repositories left untouched.
    exclusions: ExclusionSet,
    /// Whether to describe instead of mutate.
    dry_run: bool,
    /// Whether to wipe the cache first.
    force_refresh: bool,
    /// GitHub token used for API calls.
    token: Option<String>,
}

impl RunnerConfig {
    /// Creates a configuration for a dry run without a token.
    pub fn new(
        target: MigrationTarget,
        distro_directory: String,
        repos_url: Url,
        distribution_url: Url,
        cache_dir: PathBuf,
        exclusions: ExclusionSet,
    ) -> Self {
        Self {
            target,
            distro_directory,
            repos_url,
            distribution_url,
            cache_dir,
            exclusions,
            dry_run: true,
            force_refresh: false,
            token: None,
        }
    }

    /// Sets dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Sets whether the cache is wiped first.
    pub fn with_force_refresh(mut self, force_refresh: bool) -> Self {
        self.force_refresh = force_refresh;
        self
    }

    /// Sets the GitHub token.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Returns the branch pair being migrated.
    pub fn target(&self) -> &MigrationTarget {
        &self.target
    }

    /// Returns the rosdistro directory.
    pub fn distro_directory(&self) -> &str {
        &self.distro_directory
    }

    /// Returns the repository-list manifest URL.
    pub fn repos_url(&self) -> &Url {
        &self.repos_url
    }

    /// Returns the distribution manifest URL.
    pub fn distribution_url(&self) -> &Url {
        &self.distribution_url
    }

    /// Returns the cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the exclusion list.
    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns whether the cache is wiped first.
    pub fn force_refresh(&self) -> bool {
        self.force_refresh
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Downloaded repository-list manifest.
    pub fn repos_path(&self) -> PathBuf {
        self.cache_dir
            .join(format!("ros2.repos.{}.yaml", self.target.repos_branch()))
    }

    /// Downloaded distribution manifest.
    pub fn distribution_path(&self) -> PathBuf {
        self.cache_dir
            .join(format!("distribution.{}.yaml", self.distro_directory))
    }

    /// Where the updated manifests are written.
    pub fn output_paths(&self) -> OutputPaths {
        OutputPaths {
            repos: self
                .cache_dir
                .join(format!("ros2.repos.{}.output.yaml", self.target.repos_branch())),
            distribution: self
                .cache_dir
                .join(format!("distribution.{}.output.yaml", self.distro_directory)),
        }
    }

    /// Directory holding the working copies, as `<org>/<name>`.
    pub fn workspace(&self) -> PathBuf {
        self.cache_dir.join(self.target.repos_branch())
    }
}
