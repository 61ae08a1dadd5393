//! Configuration loading and parsing for `.changelog.toml` files.
//!
//! Every field is optional; missing fields fall back to defaults that
//! document merged pull requests under Keep a Changelog sections.
use color_eyre::eyre::WrapErr;
use log::*;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};

use crate::result::Result;

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = ".changelog.toml";

/// Default changelog filename.
pub const DEFAULT_CHANGELOG_FILE: &str = "CHANGELOG.md";

/// Output encodings for `config` display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
}

/// Changelog generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)] // Use default for missing fields
pub struct Config {
    /// Changelog file to write and read (default: CHANGELOG.md)
    pub file_name: String,
    /// Pull requests carrying any of these labels are left out.
    pub excluded_labels: Vec<String>,
    /// Section name to the labels that select it.
    pub sections: BTreeMap<String, Vec<String>>,
    /// Leave out pull requests with no label mapped to a section
    /// (default: false)
    pub skip_entries_without_label: bool,
    /// Include merged but untagged work (default: true)
    pub show_unreleased: bool,
}

impl Default for Config {
    fn default() -> Self {
        let sections = [
            ("changed", vec!["backwards-incompatible"]),
            ("added", vec!["feature", "enhancement"]),
            ("fixed", vec!["bug", "bugfix", "documentation"]),
        ]
        .into_iter()
        .map(|(name, labels)| {
            (
                name.to_string(),
                labels.into_iter().map(String::from).collect(),
            )
        })
        .collect();

        Self {
            file_name: DEFAULT_CHANGELOG_FILE.to_string(),
            excluded_labels: vec![
                "maintenance".to_string(),
                "dependencies".to_string(),
            ],
            sections,
            skip_entries_without_label: false,
            show_unreleased: true,
        }
    }
}

impl Config {
    /// Loads configuration from `path`, using defaults when the file does
    /// not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(
                "no configuration found at {}: using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).wrap_err_with(|| {
            format!("failed to read configuration file {}", path.display())
        })?;

        let config = Self::from_toml(&content).wrap_err_with(|| {
            format!("failed to parse configuration file {}", path.display())
        })?;

        debug!("loaded configuration: {config:?}");

        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Renders the effective configuration.
    pub fn render(&self, format: ConfigFormat) -> Result<String> {
        match format {
            ConfigFormat::Toml => Ok(toml::to_string_pretty(self)?),
            ConfigFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}
