//! Implements the GitHub trait using the search API
use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use color_eyre::eyre::eyre;
use log::*;
use octocrab::{Octocrab, models::issues::Issue};

use crate::{
    forge::{
        config::{DEFAULT_PAGE_SIZE, RemoteConfig},
        traits::GitHub,
        types::PullRequest,
    },
    result::Result,
};

/// GitHub client that finds merged pull requests for one repository.
pub struct GithubClient {
    config: RemoteConfig,
    instance: Octocrab,
}

impl GithubClient {
    /// Create GitHub client with personal access token authentication and
    /// API base URL configuration.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        if !config.has_token() {
            return Err(eyre!(
                "must set github token: use --github-token or GITHUB_TOKEN"
            ));
        }

        let builder = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(config.api_base_uri())?;
        let instance = builder.build()?;

        Ok(Self { config, instance })
    }

    fn search_query(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> String {
        merged_search_query(&self.config.owner, &self.config.repo, from, to)
    }
}

/// Search qualifier selecting PRs merged in `(from, to]`. The `merged:`
/// range is inclusive, so the lower bound is moved one second forward.
fn merged_search_query(
    owner: &str,
    repo: &str,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> String {
    let from = (from + Duration::seconds(1))
        .to_rfc3339_opts(SecondsFormat::Secs, true);
    let to = to.to_rfc3339_opts(SecondsFormat::Secs, true);

    format!("repo:{owner}/{repo} is:pr is:merged merged:{from}..{to}")
}

impl From<Issue> for PullRequest {
    fn from(issue: Issue) -> Self {
        Self {
            number: issue.number,
            title: issue.title,
            user: issue.user.login,
            labels: issue.labels.into_iter().map(|l| l.name).collect(),
        }
    }
}

#[async_trait]
impl GitHub for GithubClient {
    fn repo_owner(&self) -> String {
        self.config.owner.clone()
    }

    fn repo_name(&self) -> String {
        self.config.repo.clone()
    }

    async fn pull_requests_merged_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<PullRequest>> {
        let query = self.search_query(from, to);

        debug!("searching pull requests: {query}");

        let mut page = self
            .instance
            .search()
            .issues_and_pull_requests(&query)
            .per_page(DEFAULT_PAGE_SIZE)
            .send()
            .await?;

        let mut pull_requests: Vec<PullRequest> = vec![];

        loop {
            pull_requests
                .extend(page.take_items().into_iter().map(PullRequest::from));

            match self.instance.get_page::<Issue>(&page.next).await? {
                Some(next) => page = next,
                None => break,
            }
        }

        debug!("found {} merged pull requests", pull_requests.len());

        Ok(pull_requests)
    }
}
