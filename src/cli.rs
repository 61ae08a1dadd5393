//! CLI argument parsing and GitHub repository resolution.
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::eyre;
use git_url_parse::GitUrl;
use secrecy::SecretString;
use std::{env, path::PathBuf};

use crate::{
    config::{ConfigFormat, DEFAULT_CONFIG_FILE},
    forge::config::RemoteConfig,
    result::Result,
};

/// Global CLI arguments for repository configuration and debugging.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value = "", global = true)]
    /// GitHub repository URL (https://github.com/owner/repo). Defaults to
    /// the origin remote of the current repository.
    pub github_repo: String,

    #[arg(long, default_value = "", global = true)]
    /// GitHub personal access token. Falls back to GITHUB_TOKEN env var.
    pub github_token: String,

    #[arg(long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    /// Path to the configuration file.
    pub config: PathBuf,

    #[arg(long, global = true)]
    /// Changelog file to write or read. Overrides `file_name` from the
    /// configuration.
    pub file: Option<PathBuf>,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Changelog subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a new changelog from tags and merged pull requests.
    New(NewArgs),

    /// Read the changelog file and print all or part of it.
    Get(GetArgs),

    /// Parse the changelog file and print its repository and tags.
    Parse,

    /// Print the effective configuration.
    Config(ConfigArgs),
}

#[derive(clap::Args, Debug, Default, Clone)]
pub struct NewArgs {
    #[arg(long)]
    /// Version to use for changes merged since the latest tag.
    pub next_version: Option<String>,

    #[arg(long)]
    /// Only include tags from this version onwards.
    pub from_version: Option<String>,

    #[arg(long, default_value_t = false)]
    /// Only include the most recent tag.
    pub latest: bool,

    #[arg(long)]
    /// Regular expression tag names must match.
    pub filter: Option<String>,

    #[arg(long, default_value_t = false)]
    /// Only include tags reachable from the current branch.
    pub ancestors_only: bool,
}

/// How `get` renders the selected entries.
#[derive(ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// The full changelog document.
    #[default]
    Standard,
    /// Sections only, suitable for release notes.
    Notes,
}

#[derive(clap::Args, Debug, Default, Clone)]
pub struct GetArgs {
    #[arg(long, default_value_t = false, conflicts_with = "version")]
    /// Print only the most recent entry.
    pub latest: bool,

    #[arg(long)]
    /// Print only the entry for this version.
    pub version: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Standard)]
    /// Output format.
    pub output: OutputFormat,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(long, value_enum, default_value_t = ConfigFormat::Toml)]
    /// Output format.
    pub output: ConfigFormat,
}

impl Args {
    /// Configure the GitHub repository from `--github-repo`, falling back
    /// to the given origin remote URL.
    pub fn get_remote(&self, origin_url: Option<&str>) -> Result<RemoteConfig> {
        let repo_url = if !self.github_repo.is_empty() {
            self.github_repo.as_str()
        } else if let Some(origin) = origin_url {
            origin
        } else {
            return Err(eyre!(
                "must configure a remote: use --github-repo or add an origin remote"
            ));
        };

        get_github_remote(repo_url, &self.github_token)
    }
}

/// Configure GitHub remote with URL parsing and token resolution.
fn get_github_remote(github_repo: &str, github_token: &str) -> Result<RemoteConfig> {
    let parsed = GitUrl::parse(github_repo)?;

    // ssh remotes talk to the API over https
    let scheme = match parsed.scheme {
        git_url_parse::Scheme::Http => "http".to_string(),
        _ => "https".to_string(),
    };

    let mut token = github_token.to_string();

    if token.is_empty()
        && let Some(parsed_token) = parsed.token
    {
        token = parsed_token;
    }

    if token.is_empty()
        && let Ok(env_var_token) = env::var("GITHUB_TOKEN")
    {
        token = env_var_token;
    }

    let host = parsed
        .host
        .ok_or(eyre!("unable to parse host from github repo"))?;

    let owner = parsed
        .owner
        .ok_or(eyre!("unable to parse owner from github repo"))?;

    Ok(RemoteConfig {
        host,
        scheme,
        owner,
        repo: parsed.name,
        token: SecretString::from(token),
    })
}
