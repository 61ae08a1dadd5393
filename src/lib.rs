//! Generates and maintains a Keep a Changelog style `CHANGELOG.md` from git
//! tags and merged GitHub pull requests.
pub mod builder;
pub mod changelog;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod forge;
pub mod markdown;
pub mod repo;
pub mod result;
pub mod version;

pub use builder::{BuildOptions, ChangelogBuilder, PullRequestClassifier};
pub use changelog::{ChangelogStore, Entry, Section};
pub use error::ChangelogError;
pub use markdown::{MarkdownParser, writer};

#[cfg(test)]
pub mod test_helpers;
