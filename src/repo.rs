//! Local git repository access for changelog generation.
//!
//! This module exposes the small set of git queries the changelog builder
//! needs through the [`Git`] trait, and implements it on top of `git2`:
//!
//! - Listing tags with the commit they point to and, for annotated tags, the
//!   tagger date
//! - Finding the repository's first commit and the current HEAD commit
//! - Resolving commit dates
//! - Checking whether a tag is reachable from the current branch
//!
//! # Tag Lines
//!
//! Tags are reported as whitespace separated lines of the form
//! `<name> <sha> [<rfc3339 date>]`. The date is only present for annotated
//! tags; lightweight tags are dated by their commit.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::path::Path;
//!
//! let repo = Repository::discover(Path::new("."))?;
//! let lines = repo.tags()?;
//! let first = repo.first_commit()?;
//! ```
use chrono::{DateTime, FixedOffset, Utc};
use color_eyre::eyre::{OptionExt, eyre};
use log::*;
use std::path::Path;

use crate::result::Result;

/// Default name of the remote used to infer the GitHub repository.
pub const DEFAULT_REMOTE: &str = "origin";

/// Git queries the changelog builder depends on.
#[cfg_attr(test, mockall::automock)]
pub trait Git {
    /// Raw tag lines, see the module docs for the format.
    fn tags(&self) -> Result<Vec<String>>;
    /// Sha of the root commit reachable from HEAD.
    fn first_commit(&self) -> Result<String>;
    /// Sha of the commit HEAD points to.
    fn last_commit(&self) -> Result<String>;
    /// Commit date of the given sha.
    fn date_of_commit(&self, sha: &str) -> Result<DateTime<Utc>>;
    /// Short name of the checked out branch.
    fn current_branch(&self) -> Result<String>;
    /// True if `commit` is reachable from `branch`.
    fn is_ancestor(&self, commit: &str, branch: &str) -> Result<bool>;
}

/// `git2` backed implementation of [`Git`].
pub struct Repository {
    repo: git2::Repository,
}

impl Repository {
    /// Open the repository containing `path`, searching parent directories.
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = git2::Repository::discover(path)?;
        debug!("opened git repository at {}", repo.path().display());
        Ok(Self { repo })
    }

    /// URL of the `origin` remote, if the repository has one.
    pub fn origin_url(&self) -> Result<Option<String>> {
        match self.repo.find_remote(DEFAULT_REMOTE) {
            Ok(remote) => Ok(remote.url().map(String::from)),
            Err(err) if err.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn resolve_commit(&self, spec: &str) -> Result<git2::Commit<'_>> {
        Ok(self.repo.revparse_single(spec)?.peel_to_commit()?)
    }
}

/// Convert a git timestamp into an RFC 3339 string keeping its offset.
fn format_git_time(time: git2::Time) -> Option<String> {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)?;
    let date = DateTime::from_timestamp(time.seconds(), 0)?;
    Some(date.with_timezone(&offset).to_rfc3339())
}

impl Git for Repository {
    fn tags(&self) -> Result<Vec<String>> {
        let names = self.repo.tag_names(None)?;
        let mut lines = vec![];

        for name in names.iter().flatten() {
            let reference =
                self.repo.find_reference(&format!("refs/tags/{name}"))?;
            let commit = reference.peel_to_commit()?;

            let tagger_date = reference
                .peel_to_tag()
                .ok()
                .and_then(|tag| tag.tagger().map(|sig| sig.when()))
                .and_then(format_git_time);

            let line = match tagger_date {
                Some(date) => format!("{name} {} {date}", commit.id()),
                None => format!("{name} {}", commit.id()),
            };

            debug!("found tag: {line}");
            lines.push(line);
        }

        Ok(lines)
    }

    fn first_commit(&self) -> Result<String> {
        let mut walk = self.repo.revwalk()?;
        walk.push_head()?;
        walk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::REVERSE)?;

        for oid in walk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            if commit.parent_count() == 0 {
                return Ok(oid.to_string());
            }
        }

        Err(eyre!("unable to find the first commit of the repository"))
    }

    fn last_commit(&self) -> Result<String> {
        let commit = self.repo.head()?.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    fn date_of_commit(&self, sha: &str) -> Result<DateTime<Utc>> {
        let commit = self.resolve_commit(sha)?;
        DateTime::from_timestamp(commit.time().seconds(), 0)
            .ok_or_eyre(format!("invalid commit time for {sha}"))
    }

    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        head.shorthand()
            .map(String::from)
            .ok_or_eyre("unable to determine current branch")
    }

    fn is_ancestor(&self, commit: &str, branch: &str) -> Result<bool> {
        let commit = self.resolve_commit(commit)?.id();
        let branch = self.resolve_commit(branch)?.id();

        if commit == branch {
            return Ok(true);
        }

        Ok(self.repo.graph_descendant_of(branch, commit)?)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn commit(repo: &git2::Repository, message: &str, time: i64) -> git2::Oid {
        let sig = git2::Signature::new(
            "tester",
            "tester@example.com",
            &git2::Time::new(time, 0),
        )
        .unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parents = match repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => vec![],
        };
        let parent_refs = parents.iter().collect::<Vec<_>>();

        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    fn setup() -> (TempDir, git2::Repository, Vec<git2::Oid>) {
        let tmp = TempDir::new().unwrap();
        let repo = git2::Repository::init(tmp.path()).unwrap();
        let oids = vec![
            commit(&repo, "initial", 1_700_000_000),
            commit(&repo, "second", 1_700_100_000),
            commit(&repo, "third", 1_700_200_000),
        ];
        (tmp, repo, oids)
    }

    #[test]
    fn finds_first_and_last_commit() {
        let (tmp, _raw, oids) = setup();
        let repo = Repository::discover(tmp.path()).unwrap();

        assert_eq!(repo.first_commit().unwrap(), oids[0].to_string());
        assert_eq!(repo.last_commit().unwrap(), oids[2].to_string());
    }

    #[test]
    fn resolves_commit_dates() {
        let (tmp, _raw, oids) = setup();
        let repo = Repository::discover(tmp.path()).unwrap();

        let date = repo.date_of_commit(&oids[1].to_string()).unwrap();
        assert_eq!(date.timestamp(), 1_700_100_000);
    }

    #[test]
    fn lists_lightweight_and_annotated_tags() {
        let (tmp, raw, oids) = setup();

        let first = raw.find_object(oids[0], None).unwrap();
        raw.tag_lightweight("v1.0.0", &first, false).unwrap();

        let third = raw.find_object(oids[2], None).unwrap();
        let sig = git2::Signature::new(
            "tester",
            "tester@example.com",
            &git2::Time::new(1_700_300_000, 60),
        )
        .unwrap();
        raw.tag("v2.0.0", &third, &sig, "release", false).unwrap();

        let repo = Repository::discover(tmp.path()).unwrap();
        let mut lines = repo.tags().unwrap();
        lines.sort();

        assert_eq!(lines[0], format!("v1.0.0 {}", oids[0]));

        let parts = lines[1].split_whitespace().collect::<Vec<_>>();
        assert_eq!(parts[0], "v2.0.0");
        assert_eq!(parts[1], oids[2].to_string());
        let date = DateTime::parse_from_rfc3339(parts[2]).unwrap();
        assert_eq!(date.timestamp(), 1_700_300_000);
        assert_eq!(date.offset().local_minus_utc(), 3600);
    }

    #[test]
    fn checks_ancestry_against_branch() {
        let (tmp, raw, oids) = setup();
        let branch = raw.head().unwrap().shorthand().unwrap().to_string();

        // a commit that is not on the current branch
        let sig = git2::Signature::now("tester", "tester@example.com").unwrap();
        let tree = raw.find_commit(oids[0]).unwrap().tree().unwrap();
        let orphan = raw.commit(None, &sig, &sig, "orphan", &tree, &[]).unwrap();

        let repo = Repository::discover(tmp.path()).unwrap();

        assert_eq!(repo.current_branch().unwrap(), branch);
        assert!(repo.is_ancestor(&oids[0].to_string(), &branch).unwrap());
        assert!(repo.is_ancestor(&oids[2].to_string(), &branch).unwrap());
        assert!(!repo.is_ancestor(&orphan.to_string(), &branch).unwrap());
    }

    #[test]
    fn origin_url_is_optional() {
        let (tmp, raw, _) = setup();
        let repo = Repository::discover(tmp.path()).unwrap();

        assert_eq!(repo.origin_url().unwrap(), None);

        raw.remote("origin", "https://github.com/owner/repo.git")
            .unwrap();
        let repo = Repository::discover(tmp.path()).unwrap();

        assert_eq!(
            repo.origin_url().unwrap(),
            Some("https://github.com/owner/repo.git".to_string())
        );
    }
}
