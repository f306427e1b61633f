//! Reading-time estimation.
//!
//! The parser counts whitespace-delimited words from the title heading
//! onward; this module turns the count into a coarse label. Minutes are
//! floored, never rounded up, so anything shorter than one full minute of
//! reading is labelled `< 1 min` rather than `0 min`.

use serde::Serialize;
use std::fmt;

/// Coarse reading time of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingTime {
    LessThanAMinute,
    Minutes(usize),
}

impl ReadingTime {
    /// Estimate from a word count. `words_per_minute` must be non-zero
    /// (enforced by config validation).
    pub fn from_words(words: usize, words_per_minute: usize) -> Self {
        match words / words_per_minute {
            0 => ReadingTime::LessThanAMinute,
            mins => ReadingTime::Minutes(mins),
        }
    }

    /// Label for use inside generated Markdown, with `<` entity-escaped.
    pub fn markup(&self) -> String {
        match self {
            ReadingTime::LessThanAMinute => "&lt; 1 min".to_string(),
            ReadingTime::Minutes(m) => format!("{m} min"),
        }
    }
}

impl fmt::Display for ReadingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadingTime::LessThanAMinute => write!(f, "< 1 min"),
            ReadingTime::Minutes(m) => write!(f, "{m} min"),
        }
    }
}

/// Number of whitespace-delimited words in a line.
pub fn count_words(line: &str) -> usize {
    line.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_rate_is_sub_minute() {
        assert_eq!(ReadingTime::from_words(0, 250), ReadingTime::LessThanAMinute);
        assert_eq!(
            ReadingTime::from_words(249, 250),
            ReadingTime::LessThanAMinute
        );
    }

    #[test]
    fn exact_rate_is_one_minute() {
        assert_eq!(ReadingTime::from_words(250, 250), ReadingTime::Minutes(1));
    }

    #[test]
    fn minutes_are_floored() {
        assert_eq!(ReadingTime::from_words(749, 250), ReadingTime::Minutes(2));
        assert_eq!(ReadingTime::from_words(750, 250), ReadingTime::Minutes(3));
    }

    #[test]
    fn labels_never_show_zero() {
        for words in 0..275 {
            let label = ReadingTime::from_words(words, 275).to_string();
            assert_eq!(label, "< 1 min");
        }
    }

    #[test]
    fn markup_escapes_less_than() {
        assert_eq!(ReadingTime::LessThanAMinute.markup(), "&lt; 1 min");
        assert_eq!(ReadingTime::Minutes(4).markup(), "4 min");
    }

    #[test]
    fn count_words_ignores_surrounding_whitespace() {
        assert_eq!(count_words("  one two\tthree \n"), 3);
        assert_eq!(count_words("   "), 0);
    }
}
