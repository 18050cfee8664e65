//! In-memory collaborators for exercising the migration core without a
//! network, a git binary or a terminal.
//!
//! Every fake records the calls it receives so tests can assert on exactly
//! what a run would have done.

use crate::git::{FileCommit, GitError, WorkingCopy};
use crate::hosting::{Hosting, HostingError};
use crate::report::Reporter;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// FakeHosting
// ---------------------------------------------------------------------------

/// A hosting call, with the repository as `org/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostingCall {
    DefaultBranch {
        repo: String,
    },
    CreateBranch {
        repo: String,
        base: String,
        new_branch: String,
    },
    SetDefaultBranch {
        repo: String,
        branch: String,
    },
    RetargetPullRequests {
        repo: String,
        from: String,
        to: String,
    },
}

impl HostingCall {
    /// Returns true for calls that change remote state.
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::DefaultBranch { .. })
    }
}

/// Records hosting calls; failures can be injected per repository.
///
/// Default branches are `rolling` unless configured otherwise.
#[derive(Debug, Default)]
pub struct FakeHosting {
    default_branches: HashMap<String, String>,
    failing_default_branch: HashSet<String>,
    failing_create_branch: HashSet<String>,
    failing_set_default_branch: HashSet<String>,
    failing_retarget: HashSet<String>,
    calls: Mutex<Vec<HostingCall>>,
}

impl FakeHosting {
    /// Sets the hosted default branch of `repo`.
    #[must_use]
    pub fn with_default_branch(mut self, repo: &str, branch: &str) -> Self {
        self.default_branches
            .insert(repo.to_string(), branch.to_string());
        self
    }

    /// Makes the default-branch query fail for `repo`.
    #[must_use]
    pub fn failing_default_branch(mut self, repo: &str) -> Self {
        self.failing_default_branch.insert(repo.to_string());
        self
    }

    /// Makes branch creation fail for `repo`.
    #[must_use]
    pub fn failing_create_branch(mut self, repo: &str) -> Self {
        self.failing_create_branch.insert(repo.to_string());
        self
    }

    /// Makes the default-branch change fail for `repo`.
    #[must_use]
    pub fn failing_set_default_branch(mut self, repo: &str) -> Self {
        self.failing_set_default_branch.insert(repo.to_string());
        self
    }

    /// Makes PR retargeting fail for `repo`.
    #[must_use]
    pub fn failing_retarget(mut self, repo: &str) -> Self {
        self.failing_retarget.insert(repo.to_string());
        self
    }

    /// All calls received, in order.
    pub fn calls(&self) -> Vec<HostingCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that would have changed remote state, in order.
    pub fn mutations(&self) -> Vec<HostingCall> {
        self.calls()
            .into_iter()
            .filter(HostingCall::is_mutation)
            .collect()
    }

    fn record(&self, call: HostingCall, failing: &HashSet<String>, repo: &str) -> Result<(), HostingError> {
        self.calls.lock().unwrap().push(call);
        if failing.contains(repo) {
            return Err(HostingError::Other {
                message: format!("injected failure for {repo}"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Hosting for FakeHosting {
    async fn default_branch(&self, owner: &str, name: &str) -> Result<String, HostingError> {
        let repo = format!("{owner}/{name}");
        self.record(
            HostingCall::DefaultBranch { repo: repo.clone() },
            &self.failing_default_branch,
            &repo,
        )?;
        Ok(self
            .default_branches
            .get(&repo)
            .cloned()
            .unwrap_or_else(|| "rolling".to_string()))
    }

    async fn create_branch(
        &self,
        owner: &str,
        name: &str,
        base: &str,
        new_branch: &str,
    ) -> Result<(), HostingError> {
        let repo = format!("{owner}/{name}");
        self.record(
            HostingCall::CreateBranch {
                repo: repo.clone(),
                base: base.to_string(),
                new_branch: new_branch.to_string(),
            },
            &self.failing_create_branch,
            &repo,
        )
    }

    async fn set_default_branch(
        &self,
        owner: &str,
        name: &str,
        branch: &str,
    ) -> Result<(), HostingError> {
        let repo = format!("{owner}/{name}");
        self.record(
            HostingCall::SetDefaultBranch {
                repo: repo.clone(),
                branch: branch.to_string(),
            },
            &self.failing_set_default_branch,
            &repo,
        )
    }

    async fn retarget_pull_requests(
        &self,
        owner: &str,
        name: &str,
        from: &str,
        to: &str,
    ) -> Result<usize, HostingError> {
        let repo = format!("{owner}/{name}");
        self.record(
            HostingCall::RetargetPullRequests {
                repo: repo.clone(),
                from: from.to_string(),
                to: to.to_string(),
            },
            &self.failing_retarget,
            &repo,
        )?;
        Ok(0)
    }
}

// ---------------------------------------------------------------------------
// FakeWorkingCopy
// ---------------------------------------------------------------------------

/// A recorded `pull`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPull {
    pub url: String,
    pub path: PathBuf,
    pub version: String,
}

/// A recorded `commit_and_push_file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommit {
    pub repo_path: PathBuf,
    pub file_path: PathBuf,
    pub content: String,
    pub message: String,
    pub dry_run: bool,
}

/// Records working-copy operations without touching disk.
#[derive(Debug, Default)]
pub struct FakeWorkingCopy {
    failing_pull: HashSet<PathBuf>,
    failing_push: HashSet<PathBuf>,
    pulls: Mutex<Vec<RecordedPull>>,
    commits: Mutex<Vec<RecordedCommit>>,
}

impl FakeWorkingCopy {
    /// Makes pulls into `repo_path` fail.
    #[must_use]
    pub fn failing_pull(mut self, repo_path: &Path) -> Self {
        self.failing_pull.insert(repo_path.to_path_buf());
        self
    }

    /// Makes commits in `repo_path` fail.
    #[must_use]
    pub fn failing_push(mut self, repo_path: &Path) -> Self {
        self.failing_push.insert(repo_path.to_path_buf());
        self
    }

    /// All pulls received, in order.
    pub fn pulls(&self) -> Vec<RecordedPull> {
        self.pulls.lock().unwrap().clone()
    }

    /// All commits received (dry or live), in order.
    pub fn commits(&self) -> Vec<RecordedCommit> {
        self.commits.lock().unwrap().clone()
    }

    /// Commits that would have reached the remote.
    pub fn live_commits(&self) -> Vec<RecordedCommit> {
        self.commits()
            .into_iter()
            .filter(|commit| !commit.dry_run)
            .collect()
    }
}

#[async_trait]
impl WorkingCopy for FakeWorkingCopy {
    async fn pull(&self, url: &str, path: &Path, version: &str) -> Result<String, GitError> {
        self.pulls.lock().unwrap().push(RecordedPull {
            url: url.to_string(),
            path: path.to_path_buf(),
            version: version.to_string(),
        });
        if self.failing_pull.contains(path) {
            return Err(GitError::CommandFailed {
                command: format!("clone --branch {version} {url}"),
                stderr: "injected failure".to_string(),
            });
        }
        Ok(format!("Cloned {url} ({version}) into {}", path.display()))
    }

    async fn commit_and_push_file(
        &self,
        commit: &FileCommit<'_>,
        dry_run: bool,
    ) -> Result<String, GitError> {
        self.commits.lock().unwrap().push(RecordedCommit {
            repo_path: commit.repo_path.to_path_buf(),
            file_path: commit.file_path.to_path_buf(),
            content: commit.content.to_string(),
            message: commit.message.to_string(),
            dry_run,
        });
        if self.failing_push.contains(commit.repo_path) {
            return Err(GitError::CommandFailed {
                command: "push origin HEAD".to_string(),
                stderr: "injected failure".to_string(),
            });
        }
        Ok(if dry_run {
            format!("Would commit and push {}", commit.file_path.display())
        } else {
            format!("Committed and pushed {}", commit.file_path.display())
        })
    }
}

// ---------------------------------------------------------------------------
// RecordingReporter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Progress,
    SubItem,
    Error,
}

/// Captures report lines as they would be printed.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    lines: Mutex<Vec<(LineKind, String)>>,
}

impl RecordingReporter {
    /// Rendered lines: progress as-is, sub-items prefixed with ` - `, errors
    /// with ` - ERROR: `.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .map(|(kind, message)| match kind {
                LineKind::Progress => message.clone(),
                LineKind::SubItem => format!(" - {message}"),
                LineKind::Error => format!(" - ERROR: {message}"),
            })
            .collect()
    }

    /// Messages reported as errors.
    pub fn errors(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(kind, _)| *kind == LineKind::Error)
            .map(|(_, message)| message.clone())
            .collect()
    }

    fn push(&self, kind: LineKind, message: &str) {
        self.lines.lock().unwrap().push((kind, message.to_string()));
    }
}

impl Reporter for RecordingReporter {
    fn progress(&self, message: &str) {
        self.push(LineKind::Progress, message);
    }

    fn sub_item(&self, message: &str) {
        self.push(LineKind::SubItem, message);
    }

    fn sub_item_error(&self, message: &str) {
        self.push(LineKind::Error, message);
    }
}
