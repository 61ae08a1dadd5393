//! Common test helper functions shared across test modules.
//!
//! This module provides reusable fixtures for dates, pull requests, entries
//! and stores, reducing code duplication across different test suites.
use chrono::{DateTime, NaiveDate, Utc};
use secrecy::SecretString;

use crate::{
    changelog::{ChangelogStore, Entry, Section},
    forge::{config::RemoteConfig, types::PullRequest},
};

/// Midnight UTC on the given `YYYY-MM-DD` date.
///
/// # Example
/// ```ignore
/// let date = date("2024-01-01");
/// ```
pub fn date(value: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

/// Creates a test RemoteConfig pointing at github.com/owner/repo.
pub fn create_test_remote_config() -> RemoteConfig {
    RemoteConfig {
        host: "github.com".to_string(),
        scheme: "https".to_string(),
        owner: "owner".to_string(),
        repo: "repo".to_string(),
        token: SecretString::from("test-token".to_string()),
    }
}

/// Creates a merged pull request authored by `user`.
///
/// # Example
/// ```ignore
/// let pr = create_test_pr(1, "Add feature", &["feature"]);
/// ```
pub fn create_test_pr(number: u64, title: &str, labels: &[&str]) -> PullRequest {
    PullRequest {
        number,
        title: title.to_string(),
        user: "user".to_string(),
        labels: labels.iter().map(|l| l.to_string()).collect(),
    }
}

/// Creates an entry with no lines.
pub fn create_test_entry(tag: &str, day: &str) -> Entry {
    Entry::new(tag, date(day))
}

/// Three empty entries, newest first: v3.0.0, v2.0.0, v1.0.0.
pub fn create_test_store() -> ChangelogStore {
    let mut store = ChangelogStore::new("owner", "repo");
    store.insert(create_test_entry("v3.0.0", "2024-03-01"));
    store.insert(create_test_entry("v2.0.0", "2024-02-01"));
    store.insert(create_test_entry("v1.0.0", "2024-01-01"));
    store
}

/// Two populated entries plus unreleased work, based on commit `root`.
pub fn create_populated_store() -> ChangelogStore {
    let mut store = ChangelogStore::new("owner", "repo");
    store.set_base_ref(Some("root".to_string()));
    store.add_unreleased(vec!["Work in progress".to_string()]);

    let mut newest = create_test_entry("v2.0.0", "2024-02-01");
    newest.append(Section::Added, "New thing");
    newest.append(Section::Added, "Another thing");
    newest.append(Section::Fixed, "Broken thing");
    store.insert(newest);

    let mut oldest = create_test_entry("v1.0.0", "2024-01-01");
    oldest.append(Section::Other, "First release");
    store.insert(oldest);

    store
}
