//! A single released version and its categorized lines.
use chrono::{DateTime, NaiveTime, Utc};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Keep a Changelog categories, declared in rendering order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Section {
    Added,
    Changed,
    Deprecated,
    Removed,
    Fixed,
    Security,
    Other,
}

/// One released version of the project. Entries are dated to the day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub tag: String,
    pub date: DateTime<Utc>,
    pub added: Vec<String>,
    pub changed: Vec<String>,
    pub deprecated: Vec<String>,
    pub removed: Vec<String>,
    pub fixed: Vec<String>,
    pub security: Vec<String>,
    pub other: Vec<String>,
}

impl Entry {
    /// Creates an empty entry. The time of day is dropped from `date`.
    pub fn new(tag: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            tag: tag.into(),
            date: date.date_naive().and_time(NaiveTime::MIN).and_utc(),
            added: vec![],
            changed: vec![],
            deprecated: vec![],
            removed: vec![],
            fixed: vec![],
            security: vec![],
            other: vec![],
        }
    }

    /// Appends a line to the end of the given section.
    pub fn append(&mut self, section: Section, line: impl Into<String>) {
        self.section_mut(section).push(line.into());
    }

    /// Lines recorded for a section, in insertion order.
    pub fn section(&self, section: Section) -> &[String] {
        match section {
            Section::Added => &self.added,
            Section::Changed => &self.changed,
            Section::Deprecated => &self.deprecated,
            Section::Removed => &self.removed,
            Section::Fixed => &self.fixed,
            Section::Security => &self.security,
            Section::Other => &self.other,
        }
    }

    /// True when no section holds any line.
    pub fn is_empty(&self) -> bool {
        [
            &self.added,
            &self.changed,
            &self.deprecated,
            &self.removed,
            &self.fixed,
            &self.security,
            &self.other,
        ]
        .iter()
        .all(|lines| lines.is_empty())
    }

    fn section_mut(&mut self, section: Section) -> &mut Vec<String> {
        match section {
            Section::Added => &mut self.added,
            Section::Changed => &mut self.changed,
            Section::Deprecated => &mut self.deprecated,
            Section::Removed => &mut self.removed,
            Section::Fixed => &mut self.fixed,
            Section::Security => &mut self.security,
            Section::Other => &mut self.other,
        }
    }
}
