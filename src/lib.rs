//! # Simple Journal
//!
//! A minimal static generator for monthly journals. Every Markdown file in
//! the source directory is one journal entry; entries are grouped into months
//! by their `published` date, and the generator writes entry pages, month
//! overviews with teasers, complete-month pages, and the navigation files a
//! documentation site builder picks up.
//!
//! # Architecture: Scan, Group, Generate
//!
//! ```text
//! 1. Scan      blog/     →  Manifest   (files → parsed entries + config)
//! 2. Group     entries   →  Journal    (validated, bucketed by month)
//! 3. Generate  Journal   →  docs/      (entry, month and navigation pages)
//! ```
//!
//! Each entry is read and parsed exactly once. Parsing records line offsets
//! (title, author-card position, teaser end) alongside the document lines, so
//! every later rendering is a replay of those lines rather than a re-parse.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the source directory, loads config, parses every entry |
//! | [`parse`] | Line-by-line state machine: meta section, title, lead-in, teaser |
//! | [`frontmatter`] | Decodes the YAML meta section into typed fields |
//! | [`reading`] | Word counts to coarse reading-time labels |
//! | [`slug`] | Title to URL-safe slug |
//! | [`entry`] | The parsed entry and its offsets |
//! | [`journal`] | Duplicate checks, month grouping, traversal orders |
//! | [`render`] | Replays entries as full pages, embedded sections, or teasers |
//! | [`generate`] | Plans every output page and writes them to a sink |
//! | [`sink`] | Output targets: directory on disk or memory |
//! | [`config`] | `config.toml` loading, validation, and merging over stock defaults |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Dates Are Opaque Keys
//!
//! The `published` value is never parsed as a date. Its first seven
//! characters (`YYYY-MM`) name the month and the full string orders entries.
//! Any consistently formatted ISO-like value sorts correctly.
//!
//! ## All Or Nothing
//!
//! The full page plan is rendered in memory before the first file is written.
//! A broken entry or a duplicate date stops the build with the offending file
//! named and leaves the output directory untouched.

pub mod config;
pub mod entry;
pub mod frontmatter;
pub mod generate;
pub mod journal;
pub mod output;
pub mod parse;
pub mod reading;
pub mod render;
pub mod scan;
pub mod sink;
pub mod slug;

#[cfg(test)]
pub(crate) mod test_helpers;
