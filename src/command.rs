//! Command execution for changelogger.
//!
//! Each subcommand lives in its own module:
//!
//! - **new**: Build the changelog from git tags and merged pull requests and
//!   write it to disk
//! - **get**: Read the changelog and print all of it, the latest entry or a
//!   single version, optionally as release notes
//! - **parse**: Read the changelog and print its repository and tags
//! - **config**: Print the effective configuration
//!
//! Shared helpers for locating and reading the changelog file live in
//! **common**.

/// Shared helpers for commands that read or write the changelog file.
pub mod common;

/// Print the effective configuration.
pub mod config;

/// Print all or part of an existing changelog.
pub mod get;

/// Build and write a new changelog.
pub mod new;

/// Print the repository and tags of an existing changelog.
pub mod parse;
