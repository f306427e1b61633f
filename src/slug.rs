//! Slug generation for entry titles.
//!
//! An entry's output file is named after its title: `# Hello, World!` becomes
//! `hello-world.md`. The `slug:` front-matter key overrides this entirely.
//!
//! ## Rules
//!
//! - Non-ASCII text is transliterated (`ä` → `a`, `ß` → `ss`, `мир` → `mir`)
//! - ASCII letters are lowercased, digits kept
//! - Everything else becomes a dash
//! - Consecutive dashes collapse, leading and trailing dashes are stripped
//! - Result is cut at the last dash before [`MAX_SLUG_LEN`]

pub const MAX_SLUG_LEN: usize = 80;

/// Derive a URL-safe slug from a title.
///
/// ```
/// use simple_journal::slug::slugify;
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("  Grüße aus Köln "), "grusse-aus-koln");
/// ```
pub fn slugify(title: &str) -> String {
    let slug = ::slug::slugify(title);
    truncate_at_dash(&slug, MAX_SLUG_LEN).to_string()
}

/// Truncate at the last dash before `max` bytes (slugs are ASCII).
fn truncate_at_dash(slug: &str, max: usize) -> &str {
    if slug.len() <= max {
        return slug;
    }
    let head = &slug[..max];
    match head.rfind('-') {
        Some(pos) if pos > 0 => &head[..pos],
        _ => head,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_dashes() {
        assert_eq!(slugify("My First Entry"), "my-first-entry");
    }

    #[test]
    fn punctuation_collapses() {
        assert_eq!(slugify("Hello,   World!!"), "hello-world");
    }

    #[test]
    fn leading_and_trailing_separators_stripped() {
        assert_eq!(slugify("  -- Title --  "), "title");
    }

    #[test]
    fn digits_kept() {
        assert_eq!(slugify("Day 42: 6502 assembly"), "day-42-6502-assembly");
    }

    #[test]
    fn german_umlauts_folded() {
        assert_eq!(slugify("Über Größe"), "uber-grosse");
    }

    #[test]
    fn only_symbols_is_empty() {
        assert_eq!(slugify("!!! ???"), "");
    }

    #[test]
    fn cyrillic_transliterated() {
        assert_eq!(slugify("Привет мир"), "privet-mir");
    }

    #[test]
    fn central_european_letters_kept() {
        assert_eq!(slugify("Łódź Środa"), "lodz-sroda");
    }

    #[test]
    fn long_title_truncated_at_dash() {
        let title = "word ".repeat(30);
        let slug = slugify(&title);
        assert!(slug.len() <= MAX_SLUG_LEN);
        assert!(slug.ends_with("word"));
    }

    #[test]
    fn long_title_without_dash_truncated_hard() {
        let title = "a".repeat(100);
        assert_eq!(slugify(&title).len(), MAX_SLUG_LEN);
    }
}
