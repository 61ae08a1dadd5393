//! GitHub access for collecting merged pull requests.
//!
//! The changelog builder only sees the [`traits::GitHub`] trait, so the
//! octocrab backed client can be swapped for a mock in tests.

/// Remote repository coordinates and authentication.
pub mod config;

/// GitHub API client backed by octocrab.
pub mod github;

/// Trait the changelog builder consumes.
pub mod traits;

/// Pull request data shared between the client and the builder.
pub mod types;
