//! [`WorkingCopy`] backed by the `git` executable.

use super::{FileCommit, GitError, WorkingCopy};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Runs `git` as a subprocess.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCli;

#[async_trait]
impl WorkingCopy for GitCli {
    async fn pull(&self, url: &str, path: &Path, version: &str) -> Result<String, GitError> {
        if path.join(".git").exists() {
            debug!(path = %path.display(), version, "Updating working copy");
            run_git_command(path, &["fetch", "origin"]).await?;
            run_git_command(path, &["checkout", version]).await?;
            run_git_command(path, &["pull", "--ff-only", "origin", version]).await?;
            return Ok(format!("Updated {} to {version}", path.display()));
        }

        debug!(url, path = %path.display(), version, "Cloning working copy");
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| GitError::IoError {
                path: parent.display().to_string(),
                source: e,
            })?;
        let directory = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| ".".to_string());
        run_git_command(
            parent,
            &["clone", "--branch", version, url, directory.as_str()],
        )
        .await?;
        Ok(format!("Cloned {url} ({version}) into {}", path.display()))
    }

    async fn commit_and_push_file(
        &self,
        commit: &FileCommit<'_>,
        dry_run: bool,
    ) -> Result<String, GitError> {
        let file = commit.file_path.display().to_string();
        if dry_run {
            return Ok(format!(
                "Would commit and push {file} with message \"{}\"",
                commit.message
            ));
        }

        if let Some(parent) = commit.file_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| GitError::IoError {
                    path: parent.display().to_string(),
                    source: e,
                })?;
        }
        tokio::fs::write(commit.file_path, commit.content)
            .await
            .map_err(|e| GitError::IoError {
                path: file.clone(),
                source: e,
            })?;

        let relative = commit
            .file_path
            .strip_prefix(commit.repo_path)
            .unwrap_or(commit.file_path);
        let file_arg = relative.to_string_lossy().into_owned();
        run_git_command(commit.repo_path, &["add", "--", file_arg.as_str()]).await?;
        run_git_command(
            commit.repo_path,
            &["commit", "-m", commit.message, "--", file_arg.as_str()],
        )
        .await?;
        run_git_command(commit.repo_path, &["push", "origin", "HEAD"]).await?;

        Ok(format!("Committed and pushed {file}"))
    }
}

/// Runs a git command, returning its stdout.
async fn run_git_command(path: &Path, args: &[&str]) -> Result<String, GitError> {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| GitError::SpawnFailed {
            command: args.join(" "),
            source: e,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitError::CommandFailed {
            command: args.join(" "),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
