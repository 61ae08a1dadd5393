//! Prints the repository and tags recorded in an existing changelog.
use crate::{
    changelog::ChangelogStore, cli::Args, command::common, config::Config,
    result::Result,
};

/// Execute parse command.
pub fn execute(args: &Args, config: &Config) -> Result<()> {
    let store = common::read_changelog(&common::changelog_path(args, config))?;
    print!("{}", summarize(&store));
    Ok(())
}

/// Owner, name and tags, newest first.
pub fn summarize(store: &ChangelogStore) -> String {
    let mut summary = format!(
        "owner: {}\nname: {}\ntags:\n",
        store.repo_owner(),
        store.repo_name()
    );

    for entry in store.entries() {
        summary.push_str(&format!(" {}\n", entry.tag));
    }

    summary
}
