//! Builds a changelog from git tags and merged pull requests and writes it
//! to disk.
use log::*;
use std::path::Path;

use crate::{
    builder::{BuildOptions, ChangelogBuilder, PullRequestClassifier},
    cli::{Args, NewArgs},
    command::common,
    config::Config,
    error,
    forge::github::GithubClient,
    markdown::writer,
    repo::Repository,
    result::Result,
};

/// Execute new command.
pub async fn execute(args: &Args, new_args: &NewArgs, config: &Config) -> Result<()> {
    let repo = Repository::discover(Path::new("."))?;
    let origin = repo.origin_url()?;
    let remote = args.get_remote(origin.as_deref())?;

    info!("building changelog for {}/{}", remote.owner, remote.repo);

    let github = GithubClient::new(remote)?;
    let classifier = PullRequestClassifier::from_config(config)?;
    let options = build_options(new_args, config)?;

    let builder = ChangelogBuilder::new(
        Box::new(repo),
        Box::new(github),
        classifier,
        options,
    );

    let store = builder.build().await?;

    let markdown = writer::write(&store)?;
    let path = common::changelog_path(args, config);

    tokio::fs::write(&path, markdown).await?;

    info!(
        "wrote {} entries and {} unreleased changes to {}",
        store.len(),
        store.unreleased().len(),
        path.display()
    );

    Ok(())
}

/// Merge command line flags with the configuration.
pub fn build_options(new_args: &NewArgs, config: &Config) -> error::Result<BuildOptions> {
    let mut builder = BuildOptions::builder();

    builder
        .latest_only(new_args.latest)
        .ancestors_only(new_args.ancestors_only)
        .show_unreleased(config.show_unreleased);

    if let Some(next_version) = &new_args.next_version {
        builder.next_version(next_version.clone());
    }

    if let Some(from_version) = &new_args.from_version {
        builder.from_version(from_version.clone());
    }

    if let Some(filter) = &new_args.filter {
        builder.filter(filter.clone());
    }

    builder.build()
}
