//! Orchestrates a full migration run.

mod config;
mod error;
mod fleet;

pub use config::RunnerConfig;
pub use error::RunnerError;
pub use fleet::migrate_fleet;

use crate::cache::{download_file, prepare_cache_dir};
use crate::git::{GitCli, WorkingCopy};
use crate::hosting::{GitHubHosting, Hosting};
use crate::manifest::{write_outputs, Distribution, ReposFile};
use crate::migration::MigrationContext;
use crate::report::{Reporter, TracingReporter};
use crate::summary::RunReport;
use crate::templates::TemplateRenderer;
use tracing::info;

/// Runs a migration against a hosting provider and local working copies.
pub struct Runner {
    config: RunnerConfig,
    hosting: Box<dyn Hosting>,
    working_copy: Box<dyn WorkingCopy>,
    http: reqwest::Client,
    renderer: TemplateRenderer,
    reporter: Box<dyn Reporter>,
}

impl Runner {
    /// Builds a runner that talks to GitHub and runs `git`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if a client or the template registry cannot be built.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let hosting = GitHubHosting::new(config.token())?;
        Self::from_parts(config, Box::new(hosting), Box::new(GitCli))
    }

    /// Builds a runner around the given hosting and working-copy backends.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the HTTP client or the template registry
    /// cannot be built.
    pub fn from_parts(
        config: RunnerConfig,
        hosting: Box<dyn Hosting>,
        working_copy: Box<dyn WorkingCopy>,
    ) -> Result<Self, RunnerError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            config,
            hosting,
            working_copy,
            http,
            renderer: TemplateRenderer::new()?,
            reporter: Box::new(TracingReporter),
        })
    }

    /// Replaces the hosting backend.
    pub fn with_hosting(mut self, hosting: Box<dyn Hosting>) -> Self {
        self.hosting = hosting;
        self
    }

    /// Replaces the working-copy backend.
    pub fn with_working_copy(mut self, working_copy: Box<dyn WorkingCopy>) -> Self {
        self.working_copy = working_copy;
        self
    }

    /// Replaces the reporter receiving progress lines.
    pub fn with_reporter(mut self, reporter: Box<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Returns the run configuration.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Executes the full flow: fetch manifests, migrate the fleet, write outputs.
    ///
    /// Per-repository failures are collected in the returned report; only
    /// failures outside the fleet loop are returned as errors.
    pub async fn run(&self) -> Result<RunReport, RunnerError> {
        let config = &self.config;
        info!(
            new_branch = config.target().new_branch(),
            repos_branch = config.target().repos_branch(),
            dry_run = config.dry_run(),
            "Starting migration"
        );

        prepare_cache_dir(config.cache_dir(), config.force_refresh())?;

        let repos_path = config.repos_path();
        download_file(&self.http, config.repos_url(), &repos_path).await?;
        let mut repos = ReposFile::from_path(&repos_path)?;

        let distribution_path = config.distribution_path();
        download_file(&self.http, config.distribution_url(), &distribution_path).await?;
        let mut distribution = Distribution::from_path(&distribution_path)?;

        info!(count = repos.repositories.len(), "Loaded repositories");

        let workspace = config.workspace();
        let ctx = MigrationContext {
            hosting: self.hosting.as_ref(),
            working_copy: self.working_copy.as_ref(),
            renderer: &self.renderer,
            reporter: self.reporter.as_ref(),
            target: config.target(),
            workspace: &workspace,
            dry_run: config.dry_run(),
        };
        let report = migrate_fleet(&ctx, &mut repos, &mut distribution, config.exclusions()).await;

        write_outputs(&config.output_paths(), &repos, &distribution)?;
        report.report_to(self.reporter.as_ref());
        Ok(report)
    }
}
