//! Maps pull request labels onto changelog sections.
use std::{
    collections::{BTreeMap, HashMap, HashSet},
    str::FromStr,
};

use crate::{
    changelog::Section,
    config::Config,
    error::{ChangelogError, Result},
    forge::types::PullRequest,
};

/// Outcome of classifying a single pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Carries an excluded label and is left out entirely.
    Excluded,
    /// No label maps to a section and unlabelled entries are skipped.
    Unsectioned,
    Section(Section),
}

/// Label driven section lookup.
#[derive(Debug, Clone, Default)]
pub struct PullRequestClassifier {
    sections: HashMap<String, Section>,
    excluded_labels: HashSet<String>,
    skip_entries_without_label: bool,
}

impl PullRequestClassifier {
    /// `sections` maps a section name to the labels that select it.
    pub fn new(
        sections: &BTreeMap<String, Vec<String>>,
        excluded_labels: &[String],
        skip_entries_without_label: bool,
    ) -> Result<Self> {
        let mut lookup = HashMap::new();

        for (name, labels) in sections {
            let section = Section::from_str(name).map_err(|_| {
                ChangelogError::InvalidConfig(format!(
                    "unknown changelog section '{name}'"
                ))
            })?;

            for label in labels {
                lookup.insert(label.clone(), section);
            }
        }

        Ok(Self {
            sections: lookup,
            excluded_labels: excluded_labels.iter().cloned().collect(),
            skip_entries_without_label,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.sections,
            &config.excluded_labels,
            config.skip_entries_without_label,
        )
    }

    /// True if any of the pull request's labels is excluded.
    pub fn is_excluded(&self, pr: &PullRequest) -> bool {
        pr.labels.iter().any(|l| self.excluded_labels.contains(l))
    }

    /// Exclusion wins over any section. Otherwise the last label that maps
    /// to a section decides; with no mapped label the pull request lands in
    /// Other unless unlabelled entries are skipped.
    pub fn classify(&self, pr: &PullRequest) -> Classification {
        if self.is_excluded(pr) {
            return Classification::Excluded;
        }

        let fallback = (!self.skip_entries_without_label).then_some(Section::Other);

        pr.labels
            .iter()
            .fold(fallback, |winner, label| {
                self.sections.get(label).copied().or(winner)
            })
            .map_or(Classification::Unsectioned, Classification::Section)
    }
}
