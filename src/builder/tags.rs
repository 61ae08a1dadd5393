//! Turns raw tag lines into the ordered list of tags to document.
use chrono::{DateTime, Utc};

use crate::{
    builder::options::BuildOptions,
    error::{ChangelogError, Result},
    repo::Git,
    version,
};

/// A release point in the repository's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub sha: String,
    pub date: DateTime<Utc>,
}

/// Tags chosen for a build, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection {
    pub tags: Vec<Tag>,
    /// Newest tag in the repository before any filtering.
    pub latest_tag: Option<Tag>,
}

/// Parses, sorts and filters tags according to [`BuildOptions`].
pub struct TagSelector<'a> {
    git: &'a dyn Git,
    options: &'a BuildOptions,
    now: DateTime<Utc>,
}

impl<'a> TagSelector<'a> {
    pub fn new(
        git: &'a dyn Git,
        options: &'a BuildOptions,
        now: DateTime<Utc>,
    ) -> Self {
        Self { git, options, now }
    }

    pub fn select(&self, lines: &[String]) -> Result<TagSelection> {
        let mut tags = lines
            .iter()
            .map(|line| line.trim().trim_matches('\''))
            .filter(|line| !line.is_empty())
            .map(|line| self.parse_line(line))
            .collect::<Result<Vec<_>>>()?;

        tags.sort_by(|a, b| b.date.cmp(&a.date));

        let latest_tag = tags.first().cloned();

        if let Some(from_version) = &self.options.from_version {
            tags = from_version_onwards(tags, from_version);
        }

        if let Some(filter) = &self.options.filter {
            tags.retain(|tag| filter.is_match(&tag.name));
        }

        if self.options.ancestors_only {
            tags = self.ancestors_of_current_branch(tags)?;
        }

        if self.options.latest_only {
            tags.truncate(1);
        }

        if let Some(next_version) = &self.options.next_version {
            let next = self.next_version_tag(next_version, tags.first())?;
            tags.insert(0, next);
        }

        if tags.is_empty() {
            return Err(ChangelogError::NoTagsFound);
        }

        Ok(TagSelection { tags, latest_tag })
    }

    /// Lines carry `<name> <sha>` and an optional RFC 3339 date.
    fn parse_line(&self, line: &str) -> Result<Tag> {
        let parts = line.split_whitespace().collect::<Vec<_>>();

        let (name, sha, date) = match parts.as_slice() {
            [name, sha, date] => {
                let date = DateTime::parse_from_rfc3339(date)
                    .map_err(|e| ChangelogError::invalid_tag(line, e.to_string()))?
                    .with_timezone(&Utc);
                (name, sha, date)
            }
            [name, sha] => {
                let date = self.git.date_of_commit(sha).map_err(|e| {
                    ChangelogError::upstream(
                        format!("unable to date commit {sha} for tag {name}"),
                        e,
                    )
                })?;
                (name, sha, date)
            }
            _ => {
                return Err(ChangelogError::invalid_tag(
                    line,
                    "expected '<name> <sha> [<date>]'",
                ));
            }
        };

        Ok(Tag {
            name: name.to_string(),
            sha: sha.to_string(),
            date,
        })
    }

    fn ancestors_of_current_branch(&self, tags: Vec<Tag>) -> Result<Vec<Tag>> {
        let branch = self.git.current_branch().map_err(|e| {
            ChangelogError::upstream("unable to determine current branch", e)
        })?;

        let mut ancestors = vec![];

        for tag in tags {
            let is_ancestor =
                self.git.is_ancestor(&tag.sha, &branch).map_err(|e| {
                    ChangelogError::NoPreReleaseAncestor {
                        tag: tag.name.clone(),
                        branch: branch.clone(),
                        source: e.into(),
                    }
                })?;

            if is_ancestor {
                ancestors.push(tag);
            }
        }

        Ok(ancestors)
    }

    /// Synthetic tag for the upcoming release, pinned to HEAD.
    fn next_version_tag(
        &self,
        next_version: &str,
        current: Option<&Tag>,
    ) -> Result<Tag> {
        let current_name = current.map(|t| t.name.as_str()).unwrap_or_default();

        if !version::is_valid(next_version) {
            return Err(ChangelogError::InvalidNextVersion {
                next: next_version.to_string(),
                current: current_name.to_string(),
            });
        }

        if let Some(current) = current
            && !version::is_greater(next_version, &current.name)
        {
            return Err(ChangelogError::VersionOrdering {
                next: next_version.to_string(),
                current: current.name.clone(),
            });
        }

        let sha = self.git.last_commit().map_err(|e| {
            ChangelogError::upstream("unable to resolve the last commit", e)
        })?;

        Ok(Tag {
            name: next_version.to_string(),
            sha,
            date: self.now,
        })
    }
}

/// Keeps tags from the newest down to and including `from_version`. When
/// no tag carries that name everything is kept.
fn from_version_onwards(tags: Vec<Tag>, from_version: &str) -> Vec<Tag> {
    match tags
        .iter()
        .position(|t| t.name.eq_ignore_ascii_case(from_version))
    {
        Some(index) => tags.into_iter().take(index + 1).collect(),
        None => tags,
    }
}
