//! Traits related to the GitHub collaborator
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;

use crate::forge::types::PullRequest;

/// Source of merged pull requests for one repository.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitHub: Send + Sync {
    fn repo_owner(&self) -> String;
    fn repo_name(&self) -> String;

    /// Pull requests merged strictly after `from` and at or before `to`.
    async fn pull_requests_merged_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<PullRequest>>;
}
