//! Grouping and ordering of entries.
//!
//! A [`Journal`] is the complete, validated set of entries of one build,
//! bucketed into months. It is built in one step from all parsed entries and
//! is read-only afterwards.
//!
//! ## Ordering
//!
//! Storage is ordered by key, but callers always pick a traversal explicitly:
//!
//! | Traversal | Order | Used by |
//! |-----------|-------|---------|
//! | [`Journal::months`] | oldest month first | "complete month" navigation |
//! | [`Journal::months_latest_first`] | newest month first | month navigation |
//! | [`Month::chronological`] | oldest entry first | `ALL` pages |
//! | [`Month::latest_first`] | newest entry first | month index, month nav |
//!
//! Entries inside a month are ordered by their `published` key, which is
//! unique across the journal.

use crate::entry::Entry;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Duplicate published date/time '{published}': {second} (already used by {first})")]
    DuplicatePublished {
        published: String,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("Duplicate entry page '{path}': {second} (already produced by {first})")]
    DuplicatePath {
        path: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// All entries sharing one year-month key, ascending by `published`.
#[derive(Debug, Clone, PartialEq)]
pub struct Month {
    key: String,
    entries: Vec<Entry>,
}

impl Month {
    /// Year-month key, e.g. `2024-01`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Human-readable label, e.g. `January 2024`.
    pub fn label(&self) -> String {
        month_label(&self.key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest entry first.
    pub fn chronological(&self) -> impl DoubleEndedIterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Newest entry first.
    pub fn latest_first(&self) -> impl DoubleEndedIterator<Item = &Entry> {
        self.entries.iter().rev()
    }
}

/// The validated entry set of a build, grouped by month.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Journal {
    months: BTreeMap<String, Month>,
}

impl Journal {
    /// Validate and group a set of entries.
    ///
    /// Fails on the first `published` key or output path seen twice. The
    /// input order does not matter.
    pub fn from_entries(entries: Vec<Entry>) -> Result<Self, JournalError> {
        let mut by_published: BTreeMap<String, Entry> = BTreeMap::new();
        let mut by_path: BTreeMap<String, PathBuf> = BTreeMap::new();

        for entry in entries {
            if let Some(first) = by_published.get(entry.published()) {
                return Err(JournalError::DuplicatePublished {
                    published: entry.published().to_string(),
                    first: first.source().to_path_buf(),
                    second: entry.source().to_path_buf(),
                });
            }
            match by_path.entry(entry.path().to_string()) {
                btree_map::Entry::Occupied(occupied) => {
                    return Err(JournalError::DuplicatePath {
                        path: entry.path().to_string(),
                        first: occupied.get().clone(),
                        second: entry.source().to_path_buf(),
                    });
                }
                btree_map::Entry::Vacant(vacant) => {
                    vacant.insert(entry.source().to_path_buf());
                }
            }
            by_published.insert(entry.published().to_string(), entry);
        }

        let mut months: BTreeMap<String, Month> = BTreeMap::new();
        for (_, entry) in by_published {
            months
                .entry(entry.group().to_string())
                .or_insert_with(|| Month {
                    key: entry.group().to_string(),
                    entries: Vec::new(),
                })
                .entries
                .push(entry);
        }
        Ok(Self { months })
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Total number of entries.
    pub fn entry_count(&self) -> usize {
        self.months.values().map(Month::len).sum()
    }

    pub fn month(&self, key: &str) -> Option<&Month> {
        self.months.get(key)
    }

    /// Oldest month first.
    pub fn months(&self) -> impl DoubleEndedIterator<Item = &Month> {
        self.months.values()
    }

    /// Newest month first.
    pub fn months_latest_first(&self) -> impl DoubleEndedIterator<Item = &Month> {
        self.months.values().rev()
    }

    /// Every entry, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.months().flat_map(Month::chronological)
    }

    /// The very first entry: first entry of the earliest month.
    pub fn first_entry(&self) -> Option<&Entry> {
        self.months().next().and_then(|m| m.chronological().next())
    }

    /// The latest entry: last entry of the latest month.
    pub fn latest_entry(&self) -> Option<&Entry> {
        self.months_latest_first()
            .next()
            .and_then(|m| m.chronological().next_back())
    }
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// `2024-01` → `January 2024`. Keys that are not `YYYY-MM` come back as-is.
pub fn month_label(key: &str) -> String {
    let Some((year, month)) = key.split_once('-') else {
        return key.to_string();
    };
    match month.parse::<usize>() {
        Ok(m @ 1..=12) => format!("{} {}", MONTH_NAMES[m - 1], year),
        _ => key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn titles<'a>(it: impl Iterator<Item = &'a Entry>) -> Vec<&'a str> {
        it.map(Entry::title).collect()
    }

    fn three_entries() -> Vec<Entry> {
        // Deliberately out of order
        vec![
            entry_at("2024-02-01T08:00", "February"),
            entry_at("2024-01-20T09:00", "Jan Twenty"),
            entry_at("2024-01-05T10:00", "Jan Five"),
        ]
    }

    #[test]
    fn groups_by_year_month() {
        let journal = Journal::from_entries(three_entries()).unwrap();
        let keys: Vec<&str> = journal.months().map(Month::key).collect();
        assert_eq!(keys, vec!["2024-01", "2024-02"]);
        assert_eq!(journal.entry_count(), 3);
    }

    #[test]
    fn months_latest_first_descends() {
        let journal = Journal::from_entries(three_entries()).unwrap();
        let keys: Vec<&str> = journal.months_latest_first().map(Month::key).collect();
        assert_eq!(keys, vec!["2024-02", "2024-01"]);
    }

    #[test]
    fn entries_within_month_ordered_by_published() {
        let journal = Journal::from_entries(three_entries()).unwrap();
        let jan = journal.month("2024-01").unwrap();
        assert_eq!(titles(jan.chronological()), vec!["Jan Five", "Jan Twenty"]);
        assert_eq!(titles(jan.latest_first()), vec!["Jan Twenty", "Jan Five"]);
    }

    #[test]
    fn all_entries_oldest_first() {
        let journal = Journal::from_entries(three_entries()).unwrap();
        assert_eq!(
            titles(journal.entries()),
            vec!["Jan Five", "Jan Twenty", "February"]
        );
    }

    #[test]
    fn first_and_latest_entry() {
        let journal = Journal::from_entries(three_entries()).unwrap();
        assert_eq!(journal.first_entry().unwrap().title(), "Jan Five");
        assert_eq!(journal.latest_entry().unwrap().title(), "February");
    }

    #[test]
    fn empty_journal() {
        let journal = Journal::from_entries(vec![]).unwrap();
        assert!(journal.is_empty());
        assert!(journal.first_entry().is_none());
        assert!(journal.latest_entry().is_none());
    }

    #[test]
    fn duplicate_published_is_error() {
        let entries = vec![
            entry_at("2024-01-05T10:00", "One"),
            entry_at("2024-01-05T10:00", "Two"),
        ];
        let err = Journal::from_entries(entries).unwrap_err();
        assert!(matches!(
            &err,
            JournalError::DuplicatePublished { published, .. } if published == "2024-01-05T10:00"
        ));
        assert!(err.to_string().contains("Duplicate published"));
    }

    #[test]
    fn duplicate_path_is_error() {
        let entries = vec![
            entry_at("2024-01-05T10:00", "Same Title"),
            entry_at("2024-01-06T10:00", "Same Title"),
        ];
        assert!(matches!(
            Journal::from_entries(entries),
            Err(JournalError::DuplicatePath { path, .. }) if path == "2024-01/same-title.md"
        ));
    }

    #[test]
    fn same_slug_in_different_months_is_fine() {
        let entries = vec![
            entry_at("2024-01-05T10:00", "Weekly"),
            entry_at("2024-02-05T10:00", "Weekly"),
        ];
        assert!(Journal::from_entries(entries).is_ok());
    }

    #[test]
    fn month_labels() {
        assert_eq!(month_label("2024-01"), "January 2024");
        assert_eq!(month_label("1999-12"), "December 1999");
        assert_eq!(month_label("2024-13"), "2024-13");
        assert_eq!(month_label("2024-00"), "2024-00");
        assert_eq!(month_label("someday"), "someday");
    }
}
