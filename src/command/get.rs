//! Prints all or part of an existing changelog.
//!
//! Useful for GitHub release notes:
//!
//! ```text
//! changelogger get --latest --output notes > release_notes.md
//! gh release create v1.0.0 -F release_notes.md
//! ```
use color_eyre::eyre::eyre;
use log::*;

use crate::{
    changelog::ChangelogStore,
    cli::{Args, GetArgs, OutputFormat},
    command::common,
    config::Config,
    error::{self, ChangelogError},
    markdown::writer,
    result::Result,
};

/// The whole changelog, unreleased work included.
pub fn all(store: ChangelogStore) -> ChangelogStore {
    store
}

/// Only the most recent release.
pub fn latest(store: &ChangelogStore) -> error::Result<ChangelogStore> {
    store.latest().ok_or(ChangelogError::EmptyChangelog)
}

/// Only the release tagged `tag`.
pub fn version(store: &ChangelogStore, tag: &str) -> error::Result<ChangelogStore> {
    store
        .isolate(tag)
        .ok_or_else(|| ChangelogError::VersionNotFound(tag.to_string()))
}

/// Select the requested entries and render them.
pub fn render(store: ChangelogStore, get_args: &GetArgs) -> Result<String> {
    let selected = if get_args.latest {
        latest(&store)?
    } else if let Some(tag) = &get_args.version {
        version(&store, tag)?
    } else if get_args.output == OutputFormat::Notes {
        return Err(eyre!(
            "notes output is only supported with --latest or --version"
        ));
    } else {
        all(store)
    };

    let output = match get_args.output {
        OutputFormat::Standard => writer::write(&selected)?,
        OutputFormat::Notes => writer::write_notes(&selected)?,
    };

    Ok(output)
}

/// Execute get command.
pub fn execute(args: &Args, get_args: &GetArgs, config: &Config) -> Result<()> {
    let path = common::changelog_path(args, config);
    let store = common::read_changelog(&path)?;

    info!("read {} entries from {}", store.len(), path.display());

    print!("{}", render(store, get_args)?);

    Ok(())
}
