//! Markdown encoding of the changelog.
//!
//! [`writer`] renders a store with Tera templates and [`parser`] reads the
//! rendered document back. Writing a store and parsing the result yields an
//! equal store.

/// Reads changelog markdown into a store.
pub mod parser;

/// Renders a store as changelog markdown or release notes.
pub mod writer;

pub use parser::MarkdownParser;
