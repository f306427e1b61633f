//! Journal configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the source root next to the entries and is sparse: stock defaults are the
//! base layer, user values override them key by key.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [author]
//! name = "kratenko"
//! avatar = "https://avatars.githubusercontent.com/kratenko"
//! profile_url = "https://github.com/kratenko"
//!
//! [reading]
//! words_per_minute = 275    # Reading-time divisor
//!
//! [source]
//! draft_dir = "draft"       # Sub-path excluded from discovery
//! extension = "md"          # Only files with this extension are entries
//! # repository = "https://github.com/user/project"
//!
//! [output]
//! extension = "md"          # Extension of generated pages
//! nav_file = "NAV.md"       # Navigation listing file name
//! journal_dir = "journal"   # Top-level navigation + landing page
//! months_dir = "months"     # "Complete month" navigation
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Name of the config file inside the source root.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Journal configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JournalConfig {
    /// Identity shown in the author card of every entry.
    pub author: AuthorConfig,
    /// Reading-time estimation.
    pub reading: ReadingConfig,
    /// Discovery of entry documents.
    pub source: SourceConfig,
    /// Names of generated files and directories.
    pub output: OutputConfig,
}

impl JournalConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reading.words_per_minute == 0 {
            return Err(ConfigError::Validation(
                "reading.words_per_minute must be greater than 0".into(),
            ));
        }
        let names = [
            ("source.extension", &self.source.extension),
            ("output.extension", &self.output.extension),
            ("output.nav_file", &self.output.nav_file),
            ("output.journal_dir", &self.output.journal_dir),
            ("output.months_dir", &self.output.months_dir),
        ];
        for (key, value) in names {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if self.output.journal_dir == self.output.months_dir {
            return Err(ConfigError::Validation(
                "output.journal_dir and output.months_dir must differ".into(),
            ));
        }
        Ok(())
    }
}

/// Author identity for the card injected below each entry title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthorConfig {
    /// Display name, also used as the avatar alt text.
    pub name: String,
    /// Avatar image URL.
    pub avatar: String,
    /// Profile link shown next to the name.
    pub profile_url: String,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            name: "kratenko".to_string(),
            avatar: "https://avatars.githubusercontent.com/kratenko".to_string(),
            profile_url: "https://github.com/kratenko".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReadingConfig {
    /// Words read per minute. Reading time is `words / words_per_minute`,
    /// rounded down.
    pub words_per_minute: usize,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 275,
        }
    }
}

/// Discovery settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Sub-path of the source root that is never scanned (work in progress).
    pub draft_dir: String,
    /// File extension of entry documents.
    pub extension: String,
    /// Repository URL used by the tag footer (`tag:` front-matter key).
    /// Without it the footer only carries the checkout instruction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            draft_dir: "draft".to_string(),
            extension: "md".to_string(),
            repository: None,
        }
    }
}

/// Names of generated files and directories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Extension of every generated page.
    pub extension: String,
    /// File name of navigation listings.
    pub nav_file: String,
    /// Directory holding the top-level month navigation and the landing page.
    pub journal_dir: String,
    /// Directory holding the navigation of "complete month" pages.
    pub months_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            extension: "md".to_string(),
            nav_file: "NAV.md".to_string(),
            journal_dir: "journal".to_string(),
            months_dir: "months".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(JournalConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no config file exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<JournalConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: JournalConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given source root.
pub fn load_config(root: &Path) -> Result<JournalConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Journal Configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as config.toml in the journal source directory.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Author card, injected below the title of every entry
# ---------------------------------------------------------------------------
[author]
name = "kratenko"
avatar = "https://avatars.githubusercontent.com/kratenko"
profile_url = "https://github.com/kratenko"

# ---------------------------------------------------------------------------
# Reading time
# ---------------------------------------------------------------------------
[reading]
# Word count is divided by this value and rounded down.
# Entries below one minute read "< 1 min".
words_per_minute = 275

# ---------------------------------------------------------------------------
# Entry discovery
# ---------------------------------------------------------------------------
[source]
# Sub-directory that is never scanned (unfinished entries).
draft_dir = "draft"

# Only files with this extension are parsed as entries.
extension = "md"

# Repository referenced by entries carrying a `tag:` key.
# Enables archive, release and download links in the entry footer.
# repository = "https://github.com/kratenko/project"

# ---------------------------------------------------------------------------
# Generated files
# ---------------------------------------------------------------------------
[output]
extension = "md"
nav_file = "NAV.md"
journal_dir = "journal"
months_dir = "months"
"##
}
