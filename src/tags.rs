//! Tag validation and normalization.
//!
//! Tags categorize todos and feed the tag-frequency statistics. A tag set
//! is normalized on every write: names are validated, duplicates dropped
//! while keeping first-seen order, and the set is capped at
//! [`MAX_TAGS_PER_TODO`].
//!
//! Valid tag names:
//! - Alphanumeric characters, underscores (`_`), and hyphens (`-`)
//! - Non-empty, at most [`MAX_TAG_LEN`] characters

use crate::error::{Result, TaskError};

/// Maximum length of a single tag name, in characters.
pub const MAX_TAG_LEN: usize = 20;

/// Maximum number of tags on a single todo, counted after deduplication.
pub const MAX_TAGS_PER_TODO: usize = 10;

/// Validates a single tag name.
///
/// # Examples
/// ```
/// use taskdeck::tags::validate_tag_name;
///
/// assert!(validate_tag_name("work").is_ok());
/// assert!(validate_tag_name("q3-goals").is_ok());
/// assert!(validate_tag_name("side_project").is_ok());
///
/// assert!(validate_tag_name("").is_err());
/// assert!(validate_tag_name("has space").is_err());
/// assert!(validate_tag_name(&"x".repeat(21)).is_err());
/// ```
pub fn validate_tag_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(TaskError::Validation("tag name cannot be empty".into()));
    }

    let len = name.chars().count();
    if len > MAX_TAG_LEN {
        return Err(TaskError::Validation(format!(
            "tag name '{}' is {} characters long (maximum is {})",
            name, len, MAX_TAG_LEN
        )));
    }

    for ch in name.chars() {
        if !is_valid_tag_char(ch) {
            return Err(TaskError::Validation(format!(
                "tag name '{}' contains invalid character '{}' (only alphanumeric, underscore, and hyphen allowed)",
                name, ch
            )));
        }
    }

    Ok(())
}

fn is_valid_tag_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

/// Validates and normalizes a tag set: every name checked, duplicates
/// removed preserving first-seen order, count capped.
pub fn normalize_tags<I, S>(tags: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let name = tag.as_ref().trim();
        validate_tag_name(name)?;
        if !normalized.iter().any(|t| t == name) {
            normalized.push(name.to_string());
        }
    }

    if normalized.len() > MAX_TAGS_PER_TODO {
        return Err(TaskError::Validation(format!(
            "too many tags: {} (maximum is {})",
            normalized.len(),
            MAX_TAGS_PER_TODO
        )));
    }

    Ok(normalized)
}
