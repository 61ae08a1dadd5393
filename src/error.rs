//! Typed errors for changelog generation, rendering and parsing.

use thiserror::Error;

/// Boxed source error carried by variants that wrap collaborator failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for changelog operations.
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("'{0}' is not a valid semantic version")]
    InvalidVersion(String),

    #[error(
        "the next version '{next}' is not a valid semantic version (current: '{current}')"
    )]
    InvalidNextVersion { next: String, current: String },

    #[error(
        "the next version should be greater than the former: '{next}' ≤ '{current}'"
    )]
    VersionOrdering { next: String, current: String },

    #[error(
        "there are no tags on this repository to evaluate and no next version was given"
    )]
    NoTagsFound,

    #[error("unable to parse tag '{line}': {reason}")]
    InvalidTag { line: String, reason: String },

    #[error("unable to determine if {tag} is an ancestor of {branch}: {source}")]
    NoPreReleaseAncestor {
        tag: String,
        branch: String,
        source: BoxError,
    },

    #[error("malformed changelog at '{heading}': {reason}")]
    MalformedDocument { heading: String, reason: String },

    #[error("{context}: {source}")]
    UpstreamFetch { context: String, source: BoxError },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("version {0} was not found in the changelog")]
    VersionNotFound(String),

    #[error("the changelog does not contain any released entries")]
    EmptyChangelog,

    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] tera::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ChangelogError {
    /// Wrap a failure reported by the git or GitHub collaborators.
    pub fn upstream(
        context: impl Into<String>,
        err: color_eyre::eyre::Report,
    ) -> Self {
        ChangelogError::UpstreamFetch {
            context: context.into(),
            source: err.into(),
        }
    }

    /// Create a malformed-document error for the given heading.
    pub fn malformed(
        heading: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ChangelogError::MalformedDocument {
            heading: heading.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid-tag error for a raw tag line.
    pub fn invalid_tag(line: impl Into<String>, reason: impl Into<String>) -> Self {
        ChangelogError::InvalidTag {
            line: line.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for changelog engine operations.
pub type Result<T> = std::result::Result<T, ChangelogError>;
