//! Reads a changelog document back into a [`ChangelogStore`].
//!
//! The parser walks pulldown-cmark events and understands the structure the
//! writer produces:
//!
//! - `## [tag](…/tree/tag) - YYYY-MM-DD` starts an entry
//! - `## Unreleased` collects bullets into the unreleased list
//! - `### Section` selects the section bullets are appended to; unknown
//!   section names are ignored along with their bullets
//! - `[Full Changelog](…/compare/base...tag)` records the compare base
//!
//! Bullets are taken verbatim from the source so titles containing
//! markdown syntax, entities or escapes read back unchanged. Anything else
//! (the document header, free text) is skipped.
use chrono::{NaiveDate, Utc};
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use std::{ops::Range, str::FromStr};

use crate::{
    changelog::{ChangelogStore, Entry, Section},
    error::{ChangelogError, Result},
    markdown::writer::DATE_FORMAT,
};

const UNRELEASED_HEADING: &str = "Unreleased";
const GITHUB_PREFIX: &str = "https://github.com/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    None,
    Unreleased,
    Entry(usize, Option<Section>),
}

/// Text gathered while inside a heading.
#[derive(Debug, Default)]
struct HeadingText {
    level: u8,
    /// Full rendered text, used for error messages.
    full: String,
    /// Text outside of links.
    literal: String,
    /// Text of the first link.
    link_text: Option<String>,
    link_url: Option<String>,
    in_link: bool,
    links_seen: usize,
}

/// Parses changelog markdown for a given repository.
#[derive(Debug, Clone)]
pub struct MarkdownParser {
    repo_owner: String,
    repo_name: String,
}

#[derive(Debug)]
struct ParseState<'a> {
    source: &'a str,
    entries: Vec<Entry>,
    compare_bases: Vec<Option<String>>,
    unreleased: Vec<String>,
    target: Target,
    heading: Option<HeadingText>,
    /// Source ranges of the list items currently open.
    items: Vec<Range<usize>>,
    discovered_repo: Option<(String, String)>,
}

impl MarkdownParser {
    pub fn new(repo_owner: impl Into<String>, repo_name: impl Into<String>) -> Self {
        Self {
            repo_owner: repo_owner.into(),
            repo_name: repo_name.into(),
        }
    }

    pub fn parse(&self, markdown: &str) -> Result<ChangelogStore> {
        let mut state = ParseState {
            source: markdown,
            entries: vec![],
            compare_bases: vec![],
            unreleased: vec![],
            target: Target::None,
            heading: None,
            items: vec![],
            discovered_repo: None,
        };

        for (event, range) in Parser::new(markdown).into_offset_iter() {
            state.handle(event, range)?;
        }

        let (owner, name) = match state.discovered_repo.take() {
            Some((owner, name)) if self.repo_owner.is_empty() => (owner, name),
            _ => (self.repo_owner.clone(), self.repo_name.clone()),
        };

        let mut store = ChangelogStore::new(owner, name);
        store.add_unreleased(state.unreleased);
        store.set_base_ref(state.compare_bases.last().cloned().flatten());

        for entry in state.entries {
            store.insert(entry);
        }

        Ok(store)
    }
}

impl ParseState<'_> {
    fn handle(&mut self, event: Event<'_>, range: Range<usize>) -> Result<()> {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                self.heading = Some(HeadingText {
                    level: heading_level(level),
                    ..Default::default()
                });
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(heading) = self.heading.take() {
                    self.finish_heading(heading)?;
                }
            }
            Event::Start(Tag::Item) => self.items.push(range),
            Event::End(TagEnd::Item) => {
                if let Some(item) = self.items.pop()
                    && self.items.is_empty()
                {
                    self.finish_item(item);
                }
            }
            Event::Start(Tag::Link { dest_url, .. }) => {
                self.start_link(dest_url.to_string())
            }
            Event::End(TagEnd::Link) => self.end_link(),
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => self.push_text(&format!("`{code}`")),
            Event::InlineHtml(html) => self.push_text(&html),
            Event::SoftBreak | Event::HardBreak => self.push_text(" "),
            _ => {}
        }

        Ok(())
    }

    fn start_link(&mut self, url: String) {
        if let Some(heading) = self.heading.as_mut() {
            heading.in_link = true;
            if heading.links_seen == 0 {
                heading.link_text = Some(String::new());
                heading.link_url = Some(url);
            }
            return;
        }

        if !self.items.is_empty() {
            return;
        }

        if let Target::Entry(index, _) = self.target
            && let Some(base) = compare_base(&url)
        {
            self.compare_bases[index] = Some(base);
        }
    }

    fn end_link(&mut self) {
        if let Some(heading) = self.heading.as_mut() {
            heading.in_link = false;
            heading.links_seen += 1;
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(heading) = self.heading.as_mut() {
            heading.full.push_str(text);
            if heading.in_link {
                if heading.links_seen == 0
                    && let Some(link_text) = heading.link_text.as_mut()
                {
                    link_text.push_str(text);
                }
            } else {
                heading.literal.push_str(text);
            }
        }
    }

    fn finish_heading(&mut self, heading: HeadingText) -> Result<()> {
        match heading.level {
            2 => self.start_entry(heading),
            3 => {
                self.select_section(&heading);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn start_entry(&mut self, heading: HeadingText) -> Result<()> {
        let tag = match heading.link_text {
            Some(tag) => tag.trim().to_string(),
            None if heading.full.contains(UNRELEASED_HEADING) => {
                self.target = Target::Unreleased;
                return Ok(());
            }
            None => String::new(),
        };

        if self.discovered_repo.is_none()
            && let Some(url) = &heading.link_url
        {
            self.discovered_repo = repo_from_url(url);
        }

        let date = parse_heading_date(&heading.literal).ok_or_else(|| {
            ChangelogError::malformed(
                format!("## {}", heading.full.trim()),
                "expected a YYYY-MM-DD date after the version",
            )
        })?;

        // a repeated heading continues the existing entry
        let index = match self.entries.iter().position(|e| e.tag == tag) {
            Some(index) => index,
            None => {
                self.entries.push(Entry::new(tag, date));
                self.compare_bases.push(None);
                self.entries.len() - 1
            }
        };

        self.target = Target::Entry(index, None);

        Ok(())
    }

    fn select_section(&mut self, heading: &HeadingText) {
        if let Target::Entry(index, _) = self.target {
            let section = Section::from_str(heading.full.trim()).ok();
            self.target = Target::Entry(index, section);
        }
    }

    fn finish_item(&mut self, range: Range<usize>) {
        let text = item_source(&self.source[range]);

        match self.target {
            Target::Unreleased => self.unreleased.push(text),
            Target::Entry(index, Some(section)) => {
                self.entries[index].append(section, text)
            }
            _ => {}
        }
    }
}

/// The raw markdown of a top-level bullet without its marker. Continuation
/// lines and nested bullets are folded onto one line.
fn item_source(item: &str) -> String {
    item.lines()
        .map(|line| strip_bullet(line.trim()))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_bullet(line: &str) -> &str {
    ["- ", "* ", "+ "]
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
        .unwrap_or(line)
        .trim_start()
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Accepts `- 2024-01-01`, `— 2024-01-01` or a bare date.
fn parse_heading_date(literal: &str) -> Option<chrono::DateTime<Utc>> {
    let date = literal
        .trim()
        .trim_start_matches(['-', '—', '–'])
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')');

    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|d| d.and_utc())
}

/// `https://github.com/o/r/compare/base...tag` yields `base`.
fn compare_base(url: &str) -> Option<String> {
    let (_, range) = url.rsplit_once("/compare/")?;
    let (base, _) = range.split_once("...")?;
    Some(base.to_string())
}

/// `https://github.com/o/r/tree/tag` yields `(o, r)`.
fn repo_from_url(url: &str) -> Option<(String, String)> {
    let path = url.strip_prefix(GITHUB_PREFIX)?;
    let mut parts = path.split('/');
    let owner = parts.next().filter(|p| !p.is_empty())?;
    let name = parts.next().filter(|p| !p.is_empty())?;
    Some((owner.to_string(), name.to_string()))
}
