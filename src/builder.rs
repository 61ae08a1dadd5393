//! Assembles a [`ChangelogStore`] from git tags and merged pull requests.
//!
//! Tags are paired with their next-older neighbour and every pull request
//! merged in between is classified into the newer tag's entry. The oldest
//! selected tag is paired with the repository's first commit.
use chrono::{DateTime, Utc};

use crate::{
    changelog::{ChangelogStore, Entry},
    error::{ChangelogError, Result},
    forge::{traits::GitHub, types::PullRequest},
    repo::Git,
};

pub mod classifier;
pub mod options;
pub mod tags;

pub use classifier::{Classification, PullRequestClassifier};
pub use options::BuildOptions;
pub use tags::{Tag, TagSelection, TagSelector};

/// Builds changelogs for one repository.
pub struct ChangelogBuilder {
    git: Box<dyn Git>,
    github: Box<dyn GitHub>,
    classifier: PullRequestClassifier,
    options: BuildOptions,
    now: DateTime<Utc>,
}

impl ChangelogBuilder {
    pub fn new(
        git: Box<dyn Git>,
        github: Box<dyn GitHub>,
        classifier: PullRequestClassifier,
        options: BuildOptions,
    ) -> Self {
        Self {
            git,
            github,
            classifier,
            options,
            now: Utc::now(),
        }
    }

    /// Overrides the timestamp used for unreleased work and the next
    /// version entry.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub async fn build(&self) -> Result<ChangelogStore> {
        let lines = self
            .git
            .tags()
            .map_err(|e| ChangelogError::upstream("unable to list tags", e))?;

        let selection = TagSelector::new(self.git.as_ref(), &self.options, self.now)
            .select(&lines)?;

        let first_commit = self.first_commit_tag()?;

        let mut store =
            ChangelogStore::new(self.github.repo_owner(), self.github.repo_name());
        store.set_base_ref(Some(first_commit.name.clone()));

        if self.options.show_unreleased
            && self.options.next_version.is_none()
            && let Some(latest) = &selection.latest_tag
        {
            let unreleased = self.unreleased_lines(latest).await?;
            store.add_unreleased(unreleased);
        }

        for (index, tag) in selection.tags.iter().enumerate() {
            let previous = selection.tags.get(index + 1).unwrap_or(&first_commit);
            let entry = self.released_entry(previous, tag).await?;
            store.insert(entry);
        }

        Ok(store)
    }

    /// The repository root stands in for the tag before the oldest one.
    fn first_commit_tag(&self) -> Result<Tag> {
        let sha = self.git.first_commit().map_err(|e| {
            ChangelogError::upstream("unable to find the first commit", e)
        })?;

        let date = self.git.date_of_commit(&sha).map_err(|e| {
            ChangelogError::upstream(format!("unable to date commit {sha}"), e)
        })?;

        Ok(Tag {
            name: sha.clone(),
            sha,
            date,
        })
    }

    /// Lines for work merged after the latest tag. Exclusions apply but
    /// unreleased lines are not sorted into sections.
    async fn unreleased_lines(&self, latest: &Tag) -> Result<Vec<String>> {
        let between = format!("{} and now", latest.name);
        let pull_requests =
            self.merged_between(&between, latest.date, self.now).await?;

        Ok(pull_requests
            .iter()
            .filter(|pr| !self.classifier.is_excluded(pr))
            .map(|pr| self.format_line(pr))
            .collect())
    }

    async fn released_entry(&self, previous: &Tag, current: &Tag) -> Result<Entry> {
        let between = format!("{} and {}", previous.name, current.name);
        let pull_requests = self
            .merged_between(&between, previous.date, current.date)
            .await?;

        let mut entry = Entry::new(&current.name, current.date);

        for pr in pull_requests.iter() {
            if let Classification::Section(section) = self.classifier.classify(pr)
            {
                entry.append(section, self.format_line(pr));
            }
        }

        Ok(entry)
    }

    /// `between` names the refs bounding the query, for error context.
    async fn merged_between(
        &self,
        between: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<PullRequest>> {
        self.github
            .pull_requests_merged_between(from, to)
            .await
            .map_err(|e| {
                ChangelogError::upstream(
                    format!(
                        "unable to fetch pull requests merged between {between} ({from}..{to})"
                    ),
                    e,
                )
            })
    }

    fn format_line(&self, pr: &PullRequest) -> String {
        format!(
            "{} [#{}](https://github.com/{}/{}/pull/{}) ([{}](https://github.com/{}))",
            pr.title,
            pr.number,
            self.github.repo_owner(),
            self.github.repo_name(),
            pr.number,
            pr.user,
            pr.user,
        )
    }
}

#[cfg(test)]
mod tests;
