//! Common functionality shared between changelog commands
use color_eyre::eyre::WrapErr;
use log::*;
use std::path::{Path, PathBuf};

use crate::{
    changelog::ChangelogStore, cli::Args, config::Config,
    markdown::MarkdownParser, result::Result,
};

/// Changelog file from `--file`, falling back to the configured name.
pub fn changelog_path(args: &Args, config: &Config) -> PathBuf {
    args.file
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.file_name))
}

/// Read and parse an existing changelog. The repository is recovered from
/// the document's own links.
pub fn read_changelog(path: &Path) -> Result<ChangelogStore> {
    debug!("reading changelog from {}", path.display());

    let markdown = std::fs::read_to_string(path).wrap_err_with(|| {
        format!(
            "unable to read {}: run `changelogger new` to create it",
            path.display()
        )
    })?;

    let store = MarkdownParser::new("", "").parse(&markdown)?;

    debug!(
        "parsed {} entries for {}/{}",
        store.len(),
        store.repo_owner(),
        store.repo_name()
    );

    Ok(store)
}
