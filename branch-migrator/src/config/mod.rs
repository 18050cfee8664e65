//! Configuration loading and resolution.
//!
//! Settings come from the command line and an optional TOML file:
//!
//! ```toml
//! new-branch = "jazzy"
//! repos-branch = "rolling"
//! exclude = ["ros2/ros2_documentation"]
//! dry-run = false
//! ```
//!
//! [`MigrationSettings::resolve`] turns them into a fully populated
//! [`RunnerConfig`](crate::runner::RunnerConfig) before any work starts.

mod error;
mod settings;
mod target;

pub use error::ConfigError;
pub use settings::{
    default_distribution_url, default_repos_url, MigrationSettings, DEFAULT_CACHE_DIR,
};
pub use target::{validate_branch_name, MigrationTarget};
