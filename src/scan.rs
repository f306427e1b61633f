//! Entry discovery and parsing.
//!
//! Walks the journal source directory and parses every entry document found.
//!
//! ## Directory Structure
//!
//! The directory layout carries no meaning; entries are grouped by their
//! `published` key, not by where they live:
//!
//! ```text
//! blog/                            # Source root
//! ├── config.toml                  # Journal configuration (optional)
//! ├── 2024/
//! │   ├── first-steps.md           # Entry
//! │   └── registers.md
//! ├── misc-notes.md                # Entry
//! ├── draft/                       # Never scanned
//! │   └── half-done.md
//! └── .scratch.md                  # Hidden, never scanned
//! ```
//!
//! Files are visited in sorted order so a build is deterministic. Any parse
//! error aborts the scan.

use crate::config::{self, ConfigError, JournalConfig};
use crate::entry::Entry;
use crate::parse::{self, ParseError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Source directory not found: {0}")]
    MissingSource(PathBuf),
    #[error("Cannot walk source directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Output of the scan: parsed entries in discovery order, plus the config
/// they were parsed with.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub entries: Vec<Entry>,
    pub config: JournalConfig,
}

/// Load config, discover entries, parse them all.
pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::MissingSource(root.to_path_buf()));
    }
    let config = config::load_config(root)?;
    let entries = discover(root, &config)?
        .iter()
        .map(|path| parse::parse_file(path, &config))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Manifest { entries, config })
}

/// Find every entry document below `root`, sorted by path.
pub fn discover(root: &Path, config: &JournalConfig) -> Result<Vec<PathBuf>, ScanError> {
    let draft = root.join(&config.source.draft_dir);
    let mut paths = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded(e, &draft));
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && has_extension(entry.path(), &config.source.extension) {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

fn is_excluded(entry: &DirEntry, draft: &Path) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    let hidden = entry.file_name().to_string_lossy().starts_with('.');
    hidden || entry.path() == draft
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}
