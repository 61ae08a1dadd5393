//! Renders a [`ChangelogStore`] as Keep a Changelog markdown.
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use strum::IntoEnumIterator;
use tera::{Context, Tera};

use crate::{
    changelog::{ChangelogStore, Section},
    error::Result,
};

/// Matches 3 or more consecutive new lines
static EXTRA_NEW_LINES_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Date format used in entry headings.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const CHANGELOG_TEMPLATE: &str = r#"<!-- markdownlint-disable MD024 -->
# Changelog

All notable changes to this project will be documented in this file.

The format is based on [Keep a Changelog](http://keepachangelog.com/en/1.0.0/) and this project adheres to [Semantic Versioning](http://semver.org).
{% if has_unreleased %}
## Unreleased
{% for line in unreleased %}
- {{ line }}
{%- endfor %}
{% endif %}
{% for entry in entries %}
## [{{ entry.tag }}](https://github.com/{{ owner }}/{{ name }}/tree/{{ entry.tag }}) - {{ entry.date }}
{% if entry.has_compare_base %}
[Full Changelog](https://github.com/{{ owner }}/{{ name }}/compare/{{ entry.compare_base }}...{{ entry.tag }})
{% endif %}
{% for section in entry.sections %}
### {{ section.title }}
{% for line in section.lines %}
- {{ line }}
{%- endfor %}
{% endfor %}
{% endfor %}
"#;

const NOTES_TEMPLATE: &str = r#"
{% for entry in entries %}
{% for section in entry.sections %}
### {{ section.title }}
{% for line in section.lines %}
- {{ line }}
{%- endfor %}
{% endfor %}
{% endfor %}
"#;

#[derive(Debug, Serialize)]
struct SectionView<'a> {
    title: String,
    lines: &'a [String],
}

#[derive(Debug, Serialize)]
struct EntryView<'a> {
    tag: &'a str,
    date: String,
    has_compare_base: bool,
    compare_base: &'a str,
    sections: Vec<SectionView<'a>>,
}

#[derive(Debug, Serialize)]
struct ChangelogView<'a> {
    owner: &'a str,
    name: &'a str,
    has_unreleased: bool,
    unreleased: &'a [String],
    entries: Vec<EntryView<'a>>,
}

impl<'a> ChangelogView<'a> {
    fn new(store: &'a ChangelogStore) -> Self {
        let entries = store
            .nodes()
            .map(|node| {
                let entry = node.entry();
                let compare_base = node.compare_base();

                // empty sections are left out entirely
                let sections = Section::iter()
                    .filter(move |s| !entry.section(*s).is_empty())
                    .map(move |s| SectionView {
                        title: s.to_string(),
                        lines: entry.section(s),
                    })
                    .collect();

                EntryView {
                    tag: &entry.tag,
                    date: entry.date.format(DATE_FORMAT).to_string(),
                    has_compare_base: compare_base.is_some(),
                    compare_base: compare_base.unwrap_or_default(),
                    sections,
                }
            })
            .collect();

        Self {
            owner: store.repo_owner(),
            name: store.repo_name(),
            has_unreleased: !store.unreleased().is_empty(),
            unreleased: store.unreleased(),
            entries,
        }
    }
}

/// Normalize changelog formatting by replacing consecutive blank lines (3+)
/// with double newlines and trimming whitespace.
fn strip_extra_lines(changelog: &str) -> String {
    EXTRA_NEW_LINES_REGEX
        .replace_all(changelog, "\n\n")
        .trim()
        .to_string()
}

fn render(template: &str, store: &ChangelogStore) -> Result<String> {
    let view = ChangelogView::new(store);
    let context = Context::from_serialize(&view)?;
    let rendered = Tera::one_off(template, &context, false)?;
    Ok(format!("{}\n", strip_extra_lines(&rendered)))
}

/// Renders the full changelog document.
pub fn write(store: &ChangelogStore) -> Result<String> {
    render(CHANGELOG_TEMPLATE, store)
}

/// Renders only the categorized sections of each entry, without the
/// document header, entry headings or compare links. Used for release
/// notes.
pub fn write_notes(store: &ChangelogStore) -> Result<String> {
    render(NOTES_TEMPLATE, store)
}
