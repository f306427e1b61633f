//! CLI output formatting for scan and build.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every entry is shown
//! by its positional index within its month and its title; the source file
//! and bibliographic details follow as indented context lines.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Months
//! 2024-01 January 2024 (2 entries)
//!     001 First Steps
//!         Source: 2024/first-steps.md
//!         Published: 2024-01-05T10:00 · Entry #1 · < 1 min
//!     002 Registers
//!         Source: 2024/registers.md
//!         Published: 2024-01-20T09:00 · Entry #2 · < 1 min · Tag v0.1
//!
//! Config
//!     Author: kratenko
//!     Reading speed: 275 words/min
//! ```
//!
//! ## Build
//!
//! ```text
//! 2024-02 February 2024
//!     001 The Stack → 2024-02/the-stack.md
//!     Navigation → 2024-02/NAV.md
//!     Overview → 2024-02/index.md
//!     Complete month → 2024-02/ALL.md
//! Journal
//!     Navigation → journal/NAV.md
//!     Month navigation → months/NAV.md
//!     Landing page → journal/index.md
//!
//! Generated 3 entries in 2 months, 12 pages
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::config::JournalConfig;
use crate::entry::Entry;
use crate::generate::{Page, PageKind};
use crate::journal::{Journal, month_label};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// `2024-01 January 2024 (2 entries)`
fn month_header(key: &str, count: Option<usize>) -> String {
    match count {
        Some(n) => format!("{} {} ({})", key, month_label(key), plural(n, "entry", "entries")),
        None => format!("{} {}", key, month_label(key)),
    }
}

/// Plain-text bibliographic line, e.g.
/// `2024-01-20T09:00 · Entry #2 · 1 min · Tag v0.1`.
fn details_line(entry: &Entry) -> String {
    let mut parts = vec![entry.published().to_string()];
    if let Some(n) = entry.number() {
        parts.push(format!("Entry #{n}"));
    }
    parts.push(entry.reading_time().to_string());
    if let Some(tag) = entry.tag() {
        parts.push(format!("Tag {tag}"));
    }
    parts.join(" \u{b7} ")
}

/// Source path relative to the source root, `/`-separated.
fn display_source(source: &Path, source_root: &Path) -> String {
    source
        .strip_prefix(source_root)
        .unwrap_or(source)
        .to_string_lossy()
        .replace('\\', "/")
}

// ============================================================================
// Scan output
// ============================================================================

/// Format scan output showing the discovered journal structure.
pub fn format_scan_output(
    journal: &Journal,
    config: &JournalConfig,
    source_root: &Path,
) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Months".to_string());
    if journal.is_empty() {
        lines.push(format!("{}(no entries)", indent(1)));
    }
    for month in journal.months() {
        lines.push(month_header(month.key(), Some(month.len())));
        for (i, entry) in month.chronological().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(i + 1), entry.title()));
            lines.push(format!(
                "{}Source: {}",
                indent(2),
                display_source(entry.source(), source_root)
            ));
            lines.push(format!("{}Published: {}", indent(2), details_line(entry)));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    lines.push(format!("{}Author: {}", indent(1), config.author.name));
    lines.push(format!(
        "{}Reading speed: {} words/min",
        indent(1),
        config.reading.words_per_minute
    ));
    if let Some(repo) = &config.source.repository {
        lines.push(format!("{}Repository: {}", indent(1), repo));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(journal: &Journal, config: &JournalConfig, source_root: &Path) {
    for line in format_scan_output(journal, config, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Build output
// ============================================================================

fn page_label(kind: PageKind) -> &'static str {
    match kind {
        PageKind::Entry => "Entry",
        PageKind::MonthNav => "Navigation",
        PageKind::MonthIndex => "Overview",
        PageKind::MonthComplete => "Complete month",
        PageKind::JournalNav => "Navigation",
        PageKind::MonthsNav => "Month navigation",
        PageKind::Landing => "Landing page",
    }
}

/// Format the page plan of a build, grouped by month.
///
/// Entry pages lead with their positional index and title, followed by `→`
/// and the output path.
pub fn format_build_output(journal: &Journal, pages: &[Page]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_month: Option<&str> = None;
    let mut journal_header = false;
    let mut position = 0;

    for page in pages {
        match page.kind {
            PageKind::Entry | PageKind::MonthNav | PageKind::MonthIndex | PageKind::MonthComplete => {
                let key = page.path.split('/').next().unwrap_or(&page.path);
                if current_month != Some(key) {
                    lines.push(month_header(key, None));
                    current_month = Some(key);
                    position = 0;
                }
                if page.kind == PageKind::Entry {
                    position += 1;
                    let title = journal
                        .entries()
                        .find(|e| e.path() == page.path)
                        .map(Entry::title)
                        .unwrap_or(page_label(page.kind));
                    lines.push(format!(
                        "{}{} {} \u{2192} {}",
                        indent(1),
                        format_index(position),
                        title,
                        page.path
                    ));
                } else {
                    lines.push(format!(
                        "{}{} \u{2192} {}",
                        indent(1),
                        page_label(page.kind),
                        page.path
                    ));
                }
            }
            PageKind::JournalNav | PageKind::MonthsNav | PageKind::Landing => {
                if !journal_header {
                    lines.push("Journal".to_string());
                    journal_header = true;
                }
                lines.push(format!(
                    "{}{} \u{2192} {}",
                    indent(1),
                    page_label(page.kind),
                    page.path
                ));
            }
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {} in {}, {}",
        plural(journal.entry_count(), "entry", "entries"),
        plural(journal.months().count(), "month", "months"),
        plural(pages.len(), "page", "pages")
    ));
    lines
}

/// Print build output to stdout.
pub fn print_build_output(journal: &Journal, pages: &[Page]) {
    for line in format_build_output(journal, pages) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
