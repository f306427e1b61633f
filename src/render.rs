//! Replaying entries into pages.
//!
//! Rendering never touches the source file again: it walks the entry's
//! [`Document`](crate::parse::Document) from the first body line, copying
//! lines through and applying two transforms on the way.
//!
//! - **Heading demotion** (embedded and teaser modes): a heading line gets one
//!   extra `#` so the entry nests below the heading of the page it is embedded
//!   in. Lines indented by four spaces or a tab are code and left alone.
//! - **Card injection**: right after the card insertion line the author card
//!   is written, carrying the bibliographic line
//!   `date · entry number · reading time · tag`.
//!
//! Depending on the [`RenderMode`], a "Continue reading" link or the tag
//! footer is appended after the body.

use crate::config::JournalConfig;
use crate::entry::Entry;
use std::borrow::Cow;
use std::io::{self, Write};

/// How an entry is placed on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// The entry's own page. Headings untouched, tag footer appended.
    Full,
    /// Embedded below a page heading (complete-month page).
    Embedded,
    /// Embedded, cut at the teaser boundary, with a link to the entry page.
    Teaser,
}

const BIB_SEPARATOR: &str = " \u{b7} ";

/// Renders entries with the author identity and repository from config.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    config: &'a JournalConfig,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a JournalConfig) -> Self {
        Self { config }
    }

    /// Render an entry's body to text.
    pub fn render(&self, entry: &Entry, mode: RenderMode) -> String {
        let doc = entry.document();
        let stop_before = match mode {
            RenderMode::Teaser => entry.offsets().teaser_end.stop_before(),
            RenderMode::Full | RenderMode::Embedded => doc.len() + 1,
        };
        let demote = mode != RenderMode::Full;
        let card_line = entry.card_insert_line();

        let mut out = String::new();
        let mut card_written = false;
        for (n, line) in doc.numbered() {
            if n < entry.first_body_line() {
                continue;
            }
            if n >= stop_before {
                break;
            }
            if demote {
                out.push_str(&demote_heading(line));
            } else {
                out.push_str(line);
            }
            if n == card_line {
                end_line(&mut out);
                out.push_str(&self.card(entry));
                card_written = true;
            }
        }
        // Title (or lead-in) on the very last line: the card still belongs
        // below it.
        if !card_written && card_line > doc.len() && stop_before > doc.len() {
            end_line(&mut out);
            out.push_str(&self.card(entry));
        }

        match mode {
            RenderMode::Teaser => {
                end_line(&mut out);
                out.push_str(&format!(
                    "\n[:octicons-arrow-right-24: Continue reading]({})\n\n",
                    entry.file_name()
                ));
            }
            RenderMode::Full => {
                if let Some(tag) = entry.tag() {
                    end_line(&mut out);
                    out.push_str(&self.tag_footer(tag));
                }
            }
            RenderMode::Embedded => {}
        }
        out
    }

    /// Render an entry to a writer.
    pub fn write_entry(&self, out: &mut dyn Write, entry: &Entry, mode: RenderMode) -> io::Result<()> {
        out.write_all(self.render(entry, mode).as_bytes())
    }

    /// The bibliographic line: whichever of publication date, entry number,
    /// reading time and tag are present, in that order.
    pub fn bibliography(&self, entry: &Entry) -> String {
        let mut bibs = vec![format!(":octicons-calendar-24: {}", entry.published())];
        if let Some(number) = entry.number() {
            bibs.push(format!(":octicons-book-24: Entry \\#{number}"));
        }
        bibs.push(format!(
            ":octicons-clock-24: {} read",
            entry.reading_time().markup()
        ));
        if let Some(tag) = entry.tag() {
            bibs.push(format!(":octicons-tag-24: {tag}"));
        }
        bibs.join(BIB_SEPARATOR)
    }

    /// The author/meta card injected below the title.
    pub fn card(&self, entry: &Entry) -> String {
        let author = &self.config.author;
        format!(
            r#"

<aside class="mdx-author" markdown>
![@{name}]({avatar})

<span>__{name}__ · :octicons-mark-github-16: [{name}]({profile})</span>
<span> {bibs}
</span>
</aside>

---


"#,
            name = author.name,
            avatar = author.avatar,
            profile = author.profile_url,
            bibs = self.bibliography(entry),
        )
    }

    /// Footer for entries tied to a tag of the source repository.
    pub fn tag_footer(&self, tag: &str) -> String {
        let mut footer = String::from("\n---\n\n");
        match self.config.source.repository.as_deref() {
            Some(repo) => {
                let repo = repo.trim_end_matches('/');
                footer.push_str(&format!(
                    ":octicons-tag-24: This entry refers to [`{tag}`]({repo}/tree/{tag}) of the source repository.\n\n"
                ));
                footer.push_str(&format!(
                    "- :octicons-file-code-24: [Browse the source at `{tag}`]({repo}/tree/{tag})\n"
                ));
                footer.push_str(&format!(
                    "- :octicons-package-24: [Release `{tag}`]({repo}/releases/tag/{tag})\n"
                ));
                footer.push_str(&format!(
                    "- :octicons-download-24: Download [zip]({repo}/archive/refs/tags/{tag}.zip){BIB_SEPARATOR}[tar.gz]({repo}/archive/refs/tags/{tag}.tar.gz)\n\n"
                ));
                footer.push_str(&format!(
                    "Check out this state of the source:\n\n```\ngit clone --branch {tag} --depth 1 {repo}.git\n```\n"
                ));
            }
            None => {
                footer.push_str(&format!(
                    ":octicons-tag-24: This entry refers to tag `{tag}` of the source repository.\n\n"
                ));
                footer.push_str(&format!(
                    "Check out this state of the source:\n\n```\ngit checkout {tag}\n```\n"
                ));
            }
        }
        footer
    }
}

/// Push one `#` in front of an unindented heading line.
pub fn demote_heading(line: &str) -> Cow<'_, str> {
    if line.starts_with("    ") || line.starts_with('\t') {
        return Cow::Borrowed(line);
    }
    let stripped = line.trim_start();
    if stripped.starts_with('#') {
        Cow::Owned(format!("#{stripped}"))
    } else {
        Cow::Borrowed(line)
    }
}

/// Terminate the last line if the source left it open.
fn end_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}
