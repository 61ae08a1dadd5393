//! Result type used at the application boundary.
//!
//! Collaborators (git, GitHub) and the command layer report failures through
//! `color-eyre` so context can be attached with `.wrap_err()` as errors
//! propagate. The changelog engine itself uses the typed
//! [`crate::error::ChangelogError`].

use color_eyre::eyre::Result as EyreResult;

/// Standard result type for collaborators and commands.
pub type Result<T> = EyreResult<T>;
