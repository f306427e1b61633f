//! Page generation.
//!
//! Turns a [`Journal`] into the complete set of output pages, then writes
//! them to a [`Sink`]. The whole plan is assembled in memory first: a build
//! that fails (duplicate key, broken entry, two pages on one path) writes
//! nothing at all.
//!
//! ## Generated Pages
//!
//! ```text
//! 2024-01/
//! ├── first-steps.md      # Entry page: full entry, card, tag footer
//! ├── registers.md
//! ├── NAV.md              # Entries of the month, latest first
//! ├── index.md            # Month overview: teasers, latest first
//! └── ALL.md              # Complete month: all entries, chronological
//! 2024-02/
//! └── ...
//! journal/
//! ├── NAV.md              # Months, latest first
//! └── index.md            # Landing page: latest and first entry
//! months/
//! └── NAV.md              # Complete-month pages, oldest first
//! ```
//!
//! Navigation links are relative to the file they appear in, so the output
//! tree can be dropped anywhere inside a documentation site.

use crate::config::JournalConfig;
use crate::entry::Entry;
use crate::journal::{Journal, JournalError, Month};
use crate::render::{RenderMode, Renderer};
use crate::scan::{self, ScanError};
use crate::sink::Sink;
use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Journal(#[from] JournalError),
    #[error(
        "Journal entry {entry} would be written to {path}, which is a generated page \
         (set another `slug:` in its meta section)"
    )]
    ReservedPath { path: String, entry: PathBuf },
    #[error("Output path {0} is generated twice (check the [output] names in config.toml)")]
    PathCollision(String),
    #[error("Failed to write {0}: {1}")]
    Write(String, #[source] io::Error),
}

/// What a generated page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Entry,
    MonthNav,
    MonthIndex,
    MonthComplete,
    JournalNav,
    MonthsNav,
    Landing,
}

/// One generated output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub kind: PageKind,
    pub path: String,
    pub contents: String,
}

/// Result of a full build.
#[derive(Debug)]
pub struct BuildReport {
    pub journal: Journal,
    pub config: JournalConfig,
    pub pages: Vec<Page>,
}

/// Scan `source`, validate and group the entries, and write every page to
/// `sink`.
pub fn build(source: &Path, sink: &mut dyn Sink) -> Result<BuildReport, BuildError> {
    let manifest = scan::scan(source)?;
    let journal = Journal::from_entries(manifest.entries)?;
    let pages = plan(&journal, &manifest.config)?;
    write_pages(&pages, sink)?;
    Ok(BuildReport {
        journal,
        config: manifest.config,
        pages,
    })
}

/// Write pages to a sink, in order.
pub fn write_pages(pages: &[Page], sink: &mut dyn Sink) -> Result<(), BuildError> {
    for page in pages {
        let write = |sink: &mut dyn Sink| -> io::Result<()> {
            let mut out = sink.open(&page.path)?;
            out.write_all(page.contents.as_bytes())?;
            out.flush()
        };
        write(sink).map_err(|e| BuildError::Write(page.path.clone(), e))?;
    }
    Ok(())
}

/// Assemble every output page of a journal.
///
/// Order: per month (latest first) its entry pages, navigation, overview and
/// complete page; then the journal-wide navigation and landing page.
///
/// Fails if two pages share an output path, e.g. an entry whose slug is
/// `index`. Paths are compared case-insensitively.
pub fn plan(journal: &Journal, config: &JournalConfig) -> Result<Vec<Page>, BuildError> {
    let renderer = Renderer::new(config);
    let out = &config.output;
    let mut pages = Vec::new();

    for month in journal.months_latest_first() {
        for entry in month.latest_first() {
            pages.push(Page {
                kind: PageKind::Entry,
                path: entry.path().to_string(),
                contents: renderer.render(entry, RenderMode::Full),
            });
        }
        pages.push(Page {
            kind: PageKind::MonthNav,
            path: format!("{}/{}", month.key(), out.nav_file),
            contents: month_nav(month),
        });
        pages.push(Page {
            kind: PageKind::MonthIndex,
            path: format!("{}/index.{}", month.key(), out.extension),
            contents: month_index(month, &renderer, config),
        });
        pages.push(Page {
            kind: PageKind::MonthComplete,
            path: complete_page_path(month, config),
            contents: month_complete(month, &renderer),
        });
    }

    pages.push(Page {
        kind: PageKind::JournalNav,
        path: format!("{}/{}", out.journal_dir, out.nav_file),
        contents: journal_nav(journal),
    });
    pages.push(Page {
        kind: PageKind::MonthsNav,
        path: format!("{}/{}", out.months_dir, out.nav_file),
        contents: months_nav(journal, config),
    });
    pages.push(Page {
        kind: PageKind::Landing,
        path: format!("{}/index.{}", out.journal_dir, out.extension),
        contents: landing(journal, &renderer, config),
    });
    check_unique_paths(journal, &pages)?;
    Ok(pages)
}

fn check_unique_paths(journal: &Journal, pages: &[Page]) -> Result<(), BuildError> {
    let mut seen = BTreeSet::new();
    for page in pages {
        if seen.insert(page.path.to_ascii_lowercase()) {
            continue;
        }
        let owner = journal
            .entries()
            .find(|e| e.path().eq_ignore_ascii_case(&page.path));
        return Err(match owner {
            Some(entry) => BuildError::ReservedPath {
                path: page.path.clone(),
                entry: entry.source().to_path_buf(),
            },
            None => BuildError::PathCollision(page.path.clone()),
        });
    }
    Ok(())
}

/// Link text with the brackets that would end it early escaped.
fn link_text(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}

fn complete_page_path(month: &Month, config: &JournalConfig) -> String {
    format!("{}/ALL.{}", month.key(), config.output.extension)
}

/// `- [Title](slug.md)` for every entry, latest first.
fn month_nav(month: &Month) -> String {
    month
        .latest_first()
        .map(|e| format!("- [{}]({})\n", link_text(e.title()), e.file_name()))
        .collect()
}

fn month_index(month: &Month, renderer: &Renderer, config: &JournalConfig) -> String {
    let mut page = format!(
        "# Journal entries from {}\n\n[Read all in single page](ALL.{})\n\n",
        month.label(),
        config.output.extension
    );
    for entry in month.latest_first() {
        page.push_str(&renderer.render(entry, RenderMode::Teaser));
    }
    page
}

fn month_complete(month: &Month, renderer: &Renderer) -> String {
    let mut page = format!("# Complete month of {}\n\n", month.label());
    for entry in month.chronological() {
        page.push_str(&renderer.render(entry, RenderMode::Embedded));
        if !page.ends_with('\n') {
            page.push('\n');
        }
        page.push('\n');
    }
    page
}

/// Months latest first, linking the month overview.
fn journal_nav(journal: &Journal) -> String {
    journal
        .months_latest_first()
        .map(|m| format!("- [{}](../{}/)\n", m.label(), m.key()))
        .collect()
}

/// Complete-month pages, oldest first.
fn months_nav(journal: &Journal, config: &JournalConfig) -> String {
    journal
        .months()
        .map(|m| complete_month_item(m, config))
        .collect()
}

fn complete_month_item(month: &Month, config: &JournalConfig) -> String {
    format!(
        "- [{} complete](../{})\n",
        month.label(),
        complete_page_path(month, config)
    )
}

fn landing(journal: &Journal, renderer: &Renderer, config: &JournalConfig) -> String {
    let mut page = String::from("# Journal\n\n");
    if let Some(latest) = journal.latest_entry() {
        page.push_str("## Latest entry\n\n");
        page.push_str(&landing_item(latest, renderer));
    }
    if let Some(first) = journal.first_entry() {
        page.push_str("## First entry\n\n");
        page.push_str(&landing_item(first, renderer));
    }
    page.push_str("## Complete month in single page\n\n");
    page.push_str("If you want to read the whole story, this might be easier to follow.\n\n");
    for month in journal.months() {
        page.push_str(&complete_month_item(month, config));
    }
    page
}

fn landing_item(entry: &Entry, renderer: &Renderer) -> String {
    format!(
        "[{}](../{})\n\n{}\n\n",
        link_text(entry.title()),
        entry.path(),
        renderer.bibliography(entry)
    )
}
