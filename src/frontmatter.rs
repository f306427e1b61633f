//! Front-matter decoding.
//!
//! The parser captures the raw text between the two fence lines; this module
//! decodes it as a YAML mapping and pulls out the keys the journal knows:
//!
//! | Key | Required | Meaning |
//! |-----|----------|---------|
//! | `published` | yes | Publication timestamp, unique across the journal |
//! | `entry` | no | Author-assigned entry number, shown in the card |
//! | `slug` | no | Overrides the slug derived from the title |
//! | `tag` | no | Source-repository tag, enables the tag footer |
//!
//! Scalar values of any YAML type are accepted and kept as their string form
//! (`entry: 7` and `entry: "7"` are the same). Unknown keys are ignored so
//! entries can carry metadata for other tools.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("meta section is empty")]
    Empty,
    #[error("meta section is not valid YAML: {0}")]
    Malformed(#[from] serde_yaml::Error),
    #[error("meta section is not a key/value mapping")]
    NotAMapping,
    #[error("required key `published` is missing")]
    MissingPublished,
    #[error("key `{0}` must be a plain value (string, number or boolean)")]
    InvalidValue(&'static str),
}

/// Decoded front matter of one entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrontMatter {
    pub published: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

#[derive(Deserialize)]
struct RawFrontMatter {
    published: Option<Value>,
    entry: Option<Value>,
    slug: Option<Value>,
    tag: Option<Value>,
}

/// Decode the captured meta section.
pub fn decode(text: &str) -> Result<FrontMatter, MetadataError> {
    let has_content = text.lines().map(str::trim).any(|l| !l.is_empty() && !l.starts_with('#'));
    if !has_content {
        return Err(MetadataError::Empty);
    }
    let value: Value = serde_yaml::from_str(text)?;
    match value {
        Value::Null => return Err(MetadataError::Empty),
        Value::Mapping(_) => {}
        _ => return Err(MetadataError::NotAMapping),
    }
    let raw: RawFrontMatter = serde_yaml::from_value(value)?;

    let published = scalar("published", raw.published)?.ok_or(MetadataError::MissingPublished)?;
    Ok(FrontMatter {
        published,
        entry: scalar("entry", raw.entry)?,
        slug: scalar("slug", raw.slug)?,
        tag: scalar("tag", raw.tag)?,
    })
}

fn scalar(key: &'static str, value: Option<Value>) -> Result<Option<String>, MetadataError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(MetadataError::InvalidValue(key)),
    }
}
