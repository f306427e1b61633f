//! The parsed entry model.
//!
//! An [`Entry`] is built once by [`crate::parse::parse_document`] and never
//! changes afterwards. It keeps the document's lines alongside the offsets
//! computed from them, so every render pass slices the exact sequence the
//! parser counted.

use crate::frontmatter::FrontMatter;
use crate::parse::Document;
use crate::reading::ReadingTime;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Length of the group key taken from the front of `published` (`YYYY-MM`).
pub const GROUP_KEY_LEN: usize = 7;

/// Where the teaser of an entry stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TeaserEnd {
    /// The first blank line after the first paragraph. The teaser stops
    /// before this line.
    Blank(usize),
    /// No boundary was found; the value is the document's last line and the
    /// teaser is the whole entry.
    EndOfDocument(usize),
}

impl TeaserEnd {
    pub fn line(&self) -> usize {
        match *self {
            TeaserEnd::Blank(n) | TeaserEnd::EndOfDocument(n) => n,
        }
    }

    /// First line number that is not part of the teaser.
    pub fn stop_before(&self) -> usize {
        match *self {
            TeaserEnd::Blank(n) => n,
            TeaserEnd::EndOfDocument(n) => n + 1,
        }
    }
}

/// 1-based line offsets recorded by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Offsets {
    /// First line after the closing meta fence.
    pub first_body_line: usize,
    /// Line holding the `# Title` heading.
    pub heading_line: usize,
    /// The author card is injected after this line.
    pub card_insert_line: usize,
    pub teaser_end: TeaserEnd,
}

/// One journal entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    source: PathBuf,
    published: String,
    group: String,
    slug: String,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
    reading_time: ReadingTime,
    offsets: Offsets,
    file_name: String,
    path: String,
    #[serde(skip)]
    document: Document,
}

/// Month key of a `published` value: its first [`GROUP_KEY_LEN`] characters.
pub fn group_key(published: &str) -> String {
    published.chars().take(GROUP_KEY_LEN).collect()
}

impl Entry {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        source: PathBuf,
        front: FrontMatter,
        title: String,
        slug: String,
        reading_time: ReadingTime,
        offsets: Offsets,
        document: Document,
        page_extension: &str,
    ) -> Self {
        let group = group_key(&front.published);
        let file_name = format!("{slug}.{page_extension}");
        let path = format!("{group}/{file_name}");
        Self {
            source,
            published: front.published,
            group,
            slug,
            title,
            number: front.entry,
            tag: front.tag,
            reading_time,
            offsets,
            file_name,
            path,
            document,
        }
    }

    /// Path of the source document.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Publication timestamp; unique key and sort key.
    pub fn published(&self) -> &str {
        &self.published
    }

    /// Year-month group key.
    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Author-assigned entry number.
    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    /// Source-repository tag.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn reading_time(&self) -> ReadingTime {
        self.reading_time
    }

    pub fn offsets(&self) -> &Offsets {
        &self.offsets
    }

    pub fn first_body_line(&self) -> usize {
        self.offsets.first_body_line
    }

    pub fn heading_line(&self) -> usize {
        self.offsets.heading_line
    }

    pub fn card_insert_line(&self) -> usize {
        self.offsets.card_insert_line
    }

    pub fn end_of_teaser_line(&self) -> usize {
        self.offsets.teaser_end.line()
    }

    /// Page file name inside the group directory (`slug.md`).
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Canonical output path (`2024-01/slug.md`).
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn group_is_year_month_prefix() {
        let e = entry_at("2024-01-20T09:00", "Title");
        assert_eq!(e.group(), "2024-01");
    }

    #[test]
    fn short_published_keeps_whole_key() {
        let e = entry_at("2024", "Title");
        assert_eq!(e.group(), "2024");
        assert_eq!(e.path(), "2024/title.md");
    }

    #[test]
    fn teaser_end_stop_before() {
        assert_eq!(TeaserEnd::Blank(9).stop_before(), 9);
        assert_eq!(TeaserEnd::EndOfDocument(9).stop_before(), 10);
        assert_eq!(TeaserEnd::EndOfDocument(9).line(), 9);
    }

    #[test]
    fn optional_fields_from_front_matter() {
        let e = parse_str(
            "---\npublished: 2024-05-01\nentry: 12\ntag: v1.2\n---\n# Tagged\n\nBody\n",
        );
        assert_eq!(e.number(), Some("12"));
        assert_eq!(e.tag(), Some("v1.2"));
        assert_eq!(e.file_name(), "tagged.md");
    }

    #[test]
    fn serializes_without_document() {
        let e = entry_at("2024-01-05T10:00", "Hello");
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["path"], "2024-01/hello.md");
        assert_eq!(json["offsets"]["heading_line"], 4);
        assert!(json.get("document").is_none());
        assert!(json.get("tag").is_none());
    }
}
