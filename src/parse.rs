//! Entry document parsing.
//!
//! Every entry is walked exactly once, line by line, by a small state machine.
//! The walk validates the document structure and records the line offsets the
//! renderer later uses to slice the same document into a full page, an
//! embedded section, or a teaser.
//!
//! ## Document Layout
//!
//! ```text
//!  1  ---                         ← fence opens the meta section
//!  2  published: 2024-01-05T10:00
//!  3  entry: 7
//!  4  ---                         ← fence closes it; first body line = 5
//!  5
//!  6  # A Title                   ← heading line; card goes after line 6
//!  7
//!  8  __Opening remark that       ← optional lead-in span...
//!  9  wraps two lines.__          ← ...moves the card after line 9
//! 10
//! 11  The first paragraph, which
//! 12  makes up the teaser.
//! 13                              ← end of teaser (first blank after it)
//! 14  More text.
//! ```
//!
//! ## States
//!
//! `Start → Metadata → Head → Doc`, never backwards:
//!
//! - **Start**: blank lines are skipped; anything else must be a fence.
//! - **Metadata**: lines are collected verbatim until the closing fence.
//! - **Head**: looking for the title. The first `#` line must be level 1.
//! - **Doc**: two detectors run side by side. The lead-in detector watches
//!   for a `__`-opened span and moves the card insertion point behind its
//!   closing `__`. The teaser detector marks the first blank line after the
//!   first paragraph. Closing the lead-in restarts teaser detection, so the
//!   lead-in never counts as the first paragraph.
//!
//! Words are counted from the `Head` state on, title included.

use crate::config::JournalConfig;
use crate::entry::{Entry, Offsets, TeaserEnd, group_key};
use crate::frontmatter::{self, MetadataError};
use crate::reading::{ReadingTime, count_words};
use crate::slug::slugify;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error reading {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("Meta section missing in journal entry: {0}")]
    MissingMetadata(PathBuf),
    #[error("Meta section not closed in journal entry: {0}")]
    UnclosedMetadata(PathBuf),
    #[error("Invalid meta section in journal entry {0}: {1}")]
    Metadata(PathBuf, #[source] MetadataError),
    #[error("First heading must be level 1 in journal entry: {0} (line {1})")]
    HeadingLevel(PathBuf, usize),
    #[error("No level one heading in journal entry: {0}")]
    NoHeading(PathBuf),
    #[error("Empty slug for journal entry: {0} (set `slug:` in the meta section)")]
    EmptySlug(PathBuf),
    #[error("Slug '{1}' of journal entry {0} is not a plain file name")]
    UnsafeSlug(PathBuf, String),
    #[error("Month key '{1}' of journal entry {0} is not a plain directory name")]
    UnsafeGroup(PathBuf, String),
}

/// The lines of a source document, split once.
///
/// Line terminators are kept so replaying lines reproduces the source
/// byte for byte. All offsets are 1-based indices into this sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(String::from).collect(),
        }
    }

    /// Number of lines; also the number of the last line.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line `n` (1-based), terminator included.
    pub fn line(&self, n: usize) -> Option<&str> {
        n.checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map(String::as_str)
    }

    /// `(line number, line)` pairs, starting at 1.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| (i + 1, line.as_str()))
    }
}

/// Is this line a meta-section fence? (`---`, `.....`, surrounding
/// whitespace allowed; the two characters never mix.)
pub fn is_fence(line: &str) -> bool {
    let trimmed = line.trim();
    let Some(first) = trimmed.chars().next() else {
        return false;
    };
    (first == '-' || first == '.') && trimmed.len() >= 3 && trimmed.chars().all(|c| c == first)
}

/// Parser state. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Metadata,
    Head,
    Doc,
}

/// Progress of the optional `__lead-in__` span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LeadIn {
    Idle,
    Armed,
    Closed,
}

/// Everything a single pass over a document yields.
#[derive(Debug, Clone, PartialEq)]
pub struct Scanned {
    /// Raw meta section, lines concatenated verbatim.
    pub metadata: String,
    /// Title heading text, marker stripped.
    pub title: String,
    pub offsets: Offsets,
    /// Words from the title heading onward.
    pub words: usize,
}

/// Walk a document once, validating its structure and recording offsets.
pub fn scan_document(source: &Path, doc: &Document) -> Result<Scanned, ParseError> {
    let mut state = State::Start;
    let mut metadata = String::new();
    let mut title = String::new();
    let mut words = 0;

    let mut first_body_line = 0;
    let mut heading_line = 0;
    let mut card_insert_line = 0;

    let mut lead_in = LeadIn::Idle;
    let mut in_first_paragraph = false;
    let mut teaser_end: Option<usize> = None;

    for (n, line) in doc.numbered() {
        let sline = line.trim();
        match state {
            State::Start => {
                if sline.is_empty() {
                    continue;
                }
                if !is_fence(sline) {
                    return Err(ParseError::MissingMetadata(source.to_path_buf()));
                }
                state = State::Metadata;
            }
            State::Metadata => {
                if is_fence(sline) {
                    first_body_line = n + 1;
                    state = State::Head;
                } else {
                    metadata.push_str(line);
                }
            }
            State::Head => {
                words += count_words(sline);
                if let Some(text) = sline.strip_prefix('#') {
                    if text.starts_with('#') {
                        return Err(ParseError::HeadingLevel(source.to_path_buf(), n));
                    }
                    title = text.trim().to_string();
                    heading_line = n;
                    card_insert_line = n + 1;
                    state = State::Doc;
                }
            }
            State::Doc => {
                if lead_in == LeadIn::Idle && sline.starts_with("__") {
                    lead_in = LeadIn::Armed;
                }
                if lead_in == LeadIn::Armed && sline.ends_with("__") {
                    lead_in = LeadIn::Closed;
                    card_insert_line = n + 1;
                    teaser_end = None;
                    in_first_paragraph = false;
                } else if teaser_end.is_none() {
                    if in_first_paragraph && sline.is_empty() {
                        teaser_end = Some(n);
                    }
                    if !sline.is_empty() && !sline.starts_with('#') {
                        in_first_paragraph = true;
                    }
                }
                words += count_words(sline);
            }
        }
    }

    match state {
        State::Start => Err(ParseError::MissingMetadata(source.to_path_buf())),
        State::Metadata => Err(ParseError::UnclosedMetadata(source.to_path_buf())),
        State::Head => Err(ParseError::NoHeading(source.to_path_buf())),
        State::Doc => Ok(Scanned {
            metadata,
            title,
            offsets: Offsets {
                first_body_line,
                heading_line,
                card_insert_line,
                teaser_end: match teaser_end {
                    Some(n) => TeaserEnd::Blank(n),
                    None => TeaserEnd::EndOfDocument(doc.len()),
                },
            },
            words,
        }),
    }
}

/// Parse a document's text into an [`Entry`].
///
/// Pure function of its inputs: `source` is only carried along for error
/// messages and display.
pub fn parse_document(
    source: &Path,
    text: &str,
    config: &JournalConfig,
) -> Result<Entry, ParseError> {
    let document = Document::new(text);
    let scanned = scan_document(source, &document)?;
    let front = frontmatter::decode(&scanned.metadata)
        .map_err(|e| ParseError::Metadata(source.to_path_buf(), e))?;

    let slug = match &front.slug {
        Some(slug) => slug.trim().to_string(),
        None => slugify(&scanned.title),
    };
    if slug.is_empty() {
        return Err(ParseError::EmptySlug(source.to_path_buf()));
    }
    if !is_plain_name(&slug) {
        return Err(ParseError::UnsafeSlug(source.to_path_buf(), slug));
    }
    let group = group_key(&front.published);
    if !is_plain_name(&group) {
        return Err(ParseError::UnsafeGroup(source.to_path_buf(), group));
    }

    let reading_time = ReadingTime::from_words(scanned.words, config.reading.words_per_minute);
    Ok(Entry::new(
        source.to_path_buf(),
        front,
        scanned.title,
        slug,
        reading_time,
        scanned.offsets,
        document,
        &config.output.extension,
    ))
}

/// A single, non-empty path component that cannot climb out of its
/// directory.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && !name.contains("..") && name != "."
}

/// Read and parse an entry file.
pub fn parse_file(path: &Path, config: &JournalConfig) -> Result<Entry, ParseError> {
    let text = fs::read_to_string(path).map_err(|e| ParseError::Io(path.to_path_buf(), e))?;
    parse_document(path, &text, config)
}
