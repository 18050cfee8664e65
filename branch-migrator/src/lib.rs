#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod cache;
pub mod config;
pub mod exclusion;
pub mod fakes;
pub mod git;
pub mod hosting;
pub mod manifest;
pub mod migration;
pub mod mirror;
pub mod report;
pub mod retarget;
pub mod runner;
pub mod summary;
pub mod sync;
pub mod templates;

pub use cache::{download_file, prepare_cache_dir, CacheError, DownloadStatus};
pub use config::{ConfigError, MigrationSettings, MigrationTarget};
pub use exclusion::ExclusionSet;
pub use git::{FileCommit, GitCli, GitError, WorkingCopy};
pub use hosting::rate_limit::{check_core_rate_limit, ensure_core_rate_limit, RateLimitInfo};
pub use hosting::{GitHubHosting, Hosting, HostingError};
pub use manifest::{
    write_outputs, Distribution, DistributionError, ManifestError, OutputPaths, RepoEntry,
    ReposFile,
};
pub use migration::{migrate_repository, MigrationContext};
pub use mirror::{install_mirror_workflow, MirrorError};
pub use report::{Reporter, TracingReporter};
pub use retarget::{retarget_default_branch_and_prs, RetargetOutcome, RetargetRequest};
pub use runner::{migrate_fleet, Runner, RunnerConfig, RunnerError};
pub use summary::{MigrationRecord, MigrationState, RepoOutcome, RunReport, StepOutcome};
pub use sync::{sync_distribution, SyncOutcome};
pub use templates::{create_handlebars_registry, TemplateError, TemplateRenderer};
