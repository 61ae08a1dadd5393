//! In-memory changelog: released entries, unreleased lines and the
//! repository they belong to.
//!
//! Entries are kept in insertion order. The builder inserts newest first,
//! so index `0` is the most recent release. Neighbours are expressed in
//! release order: an entry's *previous* is the next-older release and its
//! *next* is the next-newer one.
use std::ops::Deref;

pub mod entry;

pub use entry::{Entry, Section};

/// Ordered collection of changelog entries for one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangelogStore {
    repo_owner: String,
    repo_name: String,
    entries: Vec<Entry>,
    unreleased: Vec<String>,
    base_ref: Option<String>,
}

/// A positioned view of an entry that can walk to its neighbours.
#[derive(Debug, Clone, Copy)]
pub struct EntryNode<'a> {
    store: &'a ChangelogStore,
    index: usize,
}

impl<'a> EntryNode<'a> {
    pub fn entry(&self) -> &'a Entry {
        &self.store.entries[self.index]
    }

    /// The next-older entry, if any.
    pub fn previous(&self) -> Option<EntryNode<'a>> {
        self.store.node(self.index + 1)
    }

    /// The next-newer entry, if any.
    pub fn next(&self) -> Option<EntryNode<'a>> {
        self.index
            .checked_sub(1)
            .and_then(|index| self.store.node(index))
    }

    /// Ref this entry is compared against: the previous tag, or the store's
    /// base ref for the oldest entry.
    pub fn compare_base(&self) -> Option<&'a str> {
        match self.previous() {
            Some(previous) => Some(previous.entry().tag.as_str()),
            None => self.store.base_ref(),
        }
    }
}

impl Deref for EntryNode<'_> {
    type Target = Entry;

    fn deref(&self) -> &Self::Target {
        self.entry()
    }
}

impl ChangelogStore {
    pub fn new(repo_owner: impl Into<String>, repo_name: impl Into<String>) -> Self {
        Self {
            repo_owner: repo_owner.into(),
            repo_name: repo_name.into(),
            ..Default::default()
        }
    }

    pub fn repo_owner(&self) -> &str {
        &self.repo_owner
    }

    pub fn repo_name(&self) -> &str {
        &self.repo_name
    }

    /// Ref the oldest entry's compare link starts from (typically the
    /// repository's first commit).
    pub fn base_ref(&self) -> Option<&str> {
        self.base_ref.as_deref()
    }

    pub fn set_base_ref(&mut self, base_ref: Option<String>) {
        self.base_ref = base_ref;
    }

    /// Appends an entry after all existing ones.
    pub fn insert(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn add_unreleased(&mut self, lines: Vec<String>) {
        self.unreleased.extend(lines);
    }

    pub fn unreleased(&self) -> &[String] {
        &self.unreleased
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = EntryNode<'_>> {
        (0..self.entries.len()).map(move |index| EntryNode { store: self, index })
    }

    /// The first inserted entry (the most recent release).
    pub fn tail(&self) -> Option<EntryNode<'_>> {
        self.node(0)
    }

    /// The last inserted entry (the oldest release).
    pub fn head(&self) -> Option<EntryNode<'_>> {
        self.entries.len().checked_sub(1).and_then(|i| self.node(i))
    }

    pub fn find(&self, tag: &str) -> Option<EntryNode<'_>> {
        self.nodes().find(|node| node.tag == tag)
    }

    /// A new store holding only `tag`'s entry. The compare base is carried
    /// over so the isolated entry still links against its predecessor.
    pub fn isolate(&self, tag: &str) -> Option<ChangelogStore> {
        let node = self.find(tag)?;

        Some(ChangelogStore {
            repo_owner: self.repo_owner.clone(),
            repo_name: self.repo_name.clone(),
            entries: vec![node.entry().clone()],
            unreleased: vec![],
            base_ref: node.compare_base().map(String::from),
        })
    }

    /// Isolates the most recent release.
    pub fn latest(&self) -> Option<ChangelogStore> {
        let tail = self.tail()?;
        self.isolate(&tail.tag)
    }

    fn node(&self, index: usize) -> Option<EntryNode<'_>> {
        (index < self.entries.len()).then_some(EntryNode { store: self, index })
    }
}
