//! Shared test utilities for the simple-journal test suite.
//!
//! Provides entry fixtures, a throwaway journal source tree, and lookup
//! helpers that panic with the available alternatives on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_journal();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let entry = find_entry(&manifest.entries, "Registers");
//! assert_eq!(entry.group(), "2024-01");
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::config::JournalConfig;
use crate::entry::Entry;
use crate::parse::parse_document;
use crate::sink::MemorySink;

// =========================================================================
// Entry fixtures
// =========================================================================

/// Title, one two-line paragraph, a second paragraph.
pub const SIMPLE_ENTRY: &str = "---\n\
published: 2024-01-05T10:00\n\
---\n\
\n\
# First Steps\n\
\n\
The first paragraph\n\
spans two lines.\n\
\n\
More text follows.\n";

/// Title directly after the fence, followed by a `__` lead-in span.
pub const LEAD_IN_ENTRY: &str = "---\n\
published: 2024-01-20T09:00\n\
---\n\
# Lead In\n\
\n\
__Bold opening\n\
lead-in.__\n\
\n\
Paragraph\n\
\n\
Rest\n";

/// A single paragraph running to the end of the file, no final newline.
pub const NO_TRAILING_BLANK_ENTRY: &str = "---\n\
published: 2024-02-01T08:00\n\
---\n\
# Single\n\
\n\
Just one paragraph without a trailing blank line";

/// Parse an in-memory entry with the default config.
pub fn parse_str(text: &str) -> Entry {
    parse_document(Path::new("test.md"), text, &JournalConfig::default())
        .unwrap_or_else(|e| panic!("fixture failed to parse: {e}"))
}

/// A minimal entry: heading on line 4, one body paragraph.
///
/// The source path is derived from both arguments so two entries built here
/// never share one.
pub fn entry_at(published: &str, title: &str) -> Entry {
    let text = format!("---\npublished: {published}\n---\n# {title}\n\nBody text.\n");
    let source = format!("blog/{published}-{title}.md");
    parse_document(Path::new(&source), &text, &JournalConfig::default())
        .unwrap_or_else(|e| panic!("entry_at({published:?}, {title:?}) failed: {e}"))
}

// =========================================================================
// Source tree setup
// =========================================================================

/// Write `contents` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// A journal source with three entries across two months and one draft.
///
/// | File | Published | Title |
/// |------|-----------|-------|
/// | `2024/first-steps.md` | 2024-01-05T10:00 | First Steps |
/// | `2024/registers.md` | 2024-01-20T09:00 | Registers |
/// | `2024/stack.md` | 2024-02-01T08:00 | The Stack |
/// | `draft/later.md` | (skipped) | |
pub fn setup_journal() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_file(
        root,
        "2024/first-steps.md",
        "---\npublished: 2024-01-05T10:00\nentry: 1\n---\n\n# First Steps\n\n\
         Today the machine printed its very first line of text.\n\
         It took a whole evening.\n\n\
         The rest of the evening went into cleaning up the loader.\n",
    );
    write_file(
        root,
        "2024/registers.md",
        "---\npublished: 2024-01-20T09:00\nentry: 2\ntag: v0.1\n---\n# Registers\n\n\
         __Short answer: sixteen of them.__\n\n\
         Every register is sixteen bits wide and none of them is special.\n\n\
         Except the program counter, of course.\n",
    );
    write_file(
        root,
        "2024/stack.md",
        "---\npublished: 2024-02-01T08:00\nentry: 3\n---\n# The Stack\n\n\
         The stack grows downwards from the top of memory.\n\n\
         Pushing and popping are single instructions.\n",
    );
    write_file(root, "draft/later.md", "not an entry yet\n");
    tmp
}

// =========================================================================
// Lookups - panics with a clear message on miss
// =========================================================================

/// Find an entry by title. Panics if not found.
pub fn find_entry<'a>(entries: &'a [Entry], title: &str) -> &'a Entry {
    entries
        .iter()
        .find(|e| e.title() == title)
        .unwrap_or_else(|| {
            let titles: Vec<&str> = entries.iter().map(Entry::title).collect();
            panic!("entry '{title}' not found. Available: {titles:?}")
        })
}

/// Contents of a page written to a memory sink. Panics if missing.
pub fn page_of<'a>(sink: &'a MemorySink, path: &str) -> &'a str {
    sink.get(path).unwrap_or_else(|| {
        let paths: Vec<&str> = sink.paths().collect();
        panic!("page '{path}' not written. Available: {paths:?}")
    })
}
