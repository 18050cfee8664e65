//! CLI for the branch migrator.
//!
//! Renames the default development branch of every repository listed in a
//! ROS 2 `ros2.repos` manifest and writes updated copies of `ros2.repos` and
//! the rosdistro `distribution.yaml` into the cache directory.

use branch_migrator::{MigrationSettings, RunReport, Runner, RunnerError};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Branch Migrator - Move a ROS 2 repository fleet to a new default branch.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Branch every repository is migrated to (e.g. `rolling`).
    #[arg(long)]
    new_branch: Option<String>,

    /// Branch of ros2/ros2 whose `ros2.repos` lists the fleet.
    #[arg(long)]
    repos_branch: Option<String>,

    /// Override URL for `ros2.repos`.
    #[arg(long)]
    repos_url: Option<String>,

    /// rosdistro directory of the distribution (defaults to the repos branch).
    #[arg(long)]
    distro_directory: Option<String>,

    /// Override URL for `distribution.yaml`.
    #[arg(long)]
    distribution_url: Option<String>,

    /// Directory for downloads, working copies and output manifests.
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Repository (`org/name`) to leave untouched; may be repeated.
    #[arg(long = "exclude", value_name = "ORG/NAME")]
    exclude: Vec<String>,

    /// Push commits and call the GitHub API instead of describing the changes.
    #[arg(long, conflicts_with = "dry_run")]
    live: bool,

    /// Only describe the changes, even if the config file disables dry runs.
    #[arg(long)]
    dry_run: bool,

    /// Wipe the cache directory before running.
    #[arg(long)]
    force_refresh: bool,

    /// TOML file with default settings; command-line values take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let args = Args::parse();

    match run(args).await {
        Ok(report) => {
            print_summary(&report);

            if report.has_errors() {
                ExitCode::from(1)
            } else {
                ExitCode::from(0)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Log levels are read from `RUST_LOG`, falling back to "info".
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunReport, RunnerError> {
    let file_settings = match &args.config {
        Some(path) => MigrationSettings::load(path)?,
        None => MigrationSettings::default(),
    };

    let settings = args.into_settings().merge(file_settings);
    let runner = Runner::new(settings.resolve()?)?;
    runner.run().await
}

impl Args {
    /// Settings given on the command line; unset flags stay `None`.
    fn into_settings(self) -> MigrationSettings {
        let dry_run = if self.live {
            Some(false)
        } else if self.dry_run {
            Some(true)
        } else {
            None
        };

        MigrationSettings {
            new_branch: self.new_branch,
            repos_branch: self.repos_branch,
            repos_url: self.repos_url,
            distro_directory: self.distro_directory,
            distribution_url: self.distribution_url,
            cache_dir: self.cache_dir,
            exclude: self.exclude,
            dry_run,
            force_refresh: self.force_refresh.then_some(true),
            token: self.token,
        }
    }
}

/// Prints the final run summary.
fn print_summary(report: &RunReport) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if report.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Repositories migrated: {}", report.repos_migrated.len());
    println!("  Repositories skipped: {}", report.repos_skipped.len());
    println!("  Repositories excluded: {}", report.repos_excluded.len());
    println!("  Errors: {}", report.errors.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec![
            "branch-migrator-cli",
            "--new-branch",
            "kilted",
            "--repos-branch",
            "rolling",
        ];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    fn file_disabling_dry_run() -> MigrationSettings {
        MigrationSettings {
            dry_run: Some(false),
            ..Default::default()
        }
    }

    #[test]
    fn dry_run_flag_overrides_config_file() {
        let settings = parse(&["--dry-run"])
            .into_settings()
            .merge(file_disabling_dry_run());

        assert_eq!(settings.dry_run, Some(true));
    }

    #[test]
    fn config_file_applies_without_mode_flags() {
        let settings = parse(&[]).into_settings().merge(file_disabling_dry_run());

        assert_eq!(settings.dry_run, Some(false));
    }

    #[test]
    fn live_disables_dry_run() {
        let settings = parse(&["--live"]).into_settings();

        assert_eq!(settings.dry_run, Some(false));
        assert!(!settings.resolve().unwrap().dry_run());
    }

    #[test]
    fn live_and_dry_run_conflict() {
        let result = Args::try_parse_from([
            "branch-migrator-cli",
            "--new-branch",
            "kilted",
            "--repos-branch",
            "rolling",
            "--live",
            "--dry-run",
        ]);

        assert!(result.is_err());
    }
}
