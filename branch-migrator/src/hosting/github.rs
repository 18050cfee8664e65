//! [`Hosting`] backed by the GitHub REST API.

use super::rate_limit::ensure_core_rate_limit;
use super::{Hosting, HostingError};
use async_trait::async_trait;
use octocrab::models::pulls::PullRequest;
use octocrab::models::repos::Object;
use octocrab::models::Repository;
use octocrab::params::repos::Reference;
use octocrab::params::State;
use octocrab::Octocrab;
use serde_json::json;
use tracing::{debug, info};

/// Open pull requests fetched per page while retargeting.
const PULLS_PER_PAGE: u8 = 100;

/// GitHub client used for branch and pull request mutations.
#[derive(Clone)]
pub struct GitHubHosting {
    octocrab: Octocrab,
}

impl GitHubHosting {
    /// Builds a client, authenticated when a token is supplied.
    ///
    /// # Errors
    ///
    /// Returns [`HostingError::GitHubError`] if the client cannot be built.
    pub fn new(token: Option<&str>) -> Result<Self, HostingError> {
        let builder = Octocrab::builder();
        let builder = match token {
            Some(token) => builder.personal_token(token.to_string()),
            None => builder,
        };
        Ok(Self {
            octocrab: builder.build()?,
        })
    }

    /// Wraps an existing client.
    #[must_use]
    pub fn from_octocrab(octocrab: Octocrab) -> Self {
        Self { octocrab }
    }
}

#[async_trait]
impl Hosting for GitHubHosting {
    async fn default_branch(&self, owner: &str, name: &str) -> Result<String, HostingError> {
        ensure_core_rate_limit(&self.octocrab).await?;
        let repo_info = self.octocrab.repos(owner, name).get().await?;
        default_branch_of(repo_info, owner, name)
    }

    async fn create_branch(
        &self,
        owner: &str,
        name: &str,
        base: &str,
        new_branch: &str,
    ) -> Result<(), HostingError> {
        ensure_core_rate_limit(&self.octocrab).await?;
        let repos = self.octocrab.repos(owner, name);
        let base_ref = repos
            .get_ref(&Reference::Branch(base.to_string()))
            .await?;
        let sha = match base_ref.object {
            Object::Commit { sha, .. } | Object::Tag { sha, .. } => sha,
            _ => {
                return Err(HostingError::UnresolvedBranch {
                    branch: base.to_string(),
                })
            }
        };

        debug!(repo = %format!("{owner}/{name}"), base, new_branch, sha = %sha, "Creating branch");
        repos
            .create_ref(&Reference::Branch(new_branch.to_string()), sha)
            .await?;
        Ok(())
    }

    async fn set_default_branch(
        &self,
        owner: &str,
        name: &str,
        branch: &str,
    ) -> Result<(), HostingError> {
        ensure_core_rate_limit(&self.octocrab).await?;
        let _: Repository = self
            .octocrab
            .patch(
                format!("/repos/{owner}/{name}"),
                Some(&json!({ "default_branch": branch })),
            )
            .await?;
        Ok(())
    }

    async fn retarget_pull_requests(
        &self,
        owner: &str,
        name: &str,
        from: &str,
        to: &str,
    ) -> Result<usize, HostingError> {
        ensure_core_rate_limit(&self.octocrab).await?;
        let page = self
            .octocrab
            .pulls(owner, name)
            .list()
            .state(State::Open)
            .base(from)
            .per_page(PULLS_PER_PAGE)
            .send()
            .await?;
        let pulls = self.octocrab.all_pages(page).await?;

        for pull in &pulls {
            ensure_core_rate_limit(&self.octocrab).await?;
            let _: PullRequest = self
                .octocrab
                .patch(
                    format!("/repos/{owner}/{name}/pulls/{}", pull.number),
                    Some(&json!({ "base": to })),
                )
                .await?;
            debug!(number = pull.number, from, to, "Retargeted pull request");
        }

        info!(repo = %format!("{owner}/{name}"), count = pulls.len(), "Retargeted pull requests");
        Ok(pulls.len())
    }
}

fn default_branch_of(repo: Repository, owner: &str, name: &str) -> Result<String, HostingError> {
    repo.default_branch
        .ok_or_else(|| HostingError::MissingDefaultBranch {
            repository: format!("{owner}/{name}"),
        })
}
